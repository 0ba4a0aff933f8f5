//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the import use case and the outside
//! world. Each port is a trait implemented by adapters in the infrastructure
//! layer.

mod clock;
mod transport;

pub use clock::Clock;
pub use transport::{Transport, TransportError, TransportFuture};
