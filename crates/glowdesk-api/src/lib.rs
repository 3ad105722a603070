// glowdesk-api: Async HTTP client for the Glowdesk salon backend.

pub mod client;
pub mod error;
pub mod payload;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use payload::{FilePart, MethodOverride, Payload};
pub use transport::{TlsMode, TransportConfig};
