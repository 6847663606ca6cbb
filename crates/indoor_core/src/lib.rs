//! # indoor_core - Indoor Map Core
//!
//! Primitives shared by every other crate of the workspace:
//! - **Identity**: process-unique, save/load-stable element identifiers
//! - **Errors**: the small error vocabulary of the core layer

pub mod error;
pub mod id;

pub use error::*;
pub use id::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::id::ElementId;
}
