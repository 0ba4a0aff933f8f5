//! Adapters implementing the application ports.

mod form_transport;
mod reqwest_transport;
mod system_clock;

pub use form_transport::FormTransport;
pub use reqwest_transport::ReqwestTransport;
pub use system_clock::SystemClock;
