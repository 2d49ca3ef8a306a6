//! Core type definitions using newtype patterns for type safety.

mod port;
mod target;

pub use port::{Port, PortError};
pub use target::{DbType, Target};
