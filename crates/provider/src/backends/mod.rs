//! Backend implementations
//!
//! One module per wire format.

pub mod hosted;
pub mod local;

pub use hosted::HostedProvider;
pub use local::LocalProvider;
