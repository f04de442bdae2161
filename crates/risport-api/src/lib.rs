// risport-api: Async Rust client for the CUCM RisPort70 real-time information service

pub mod auth;
pub mod catalog;
pub mod client;
pub mod criteria;
pub mod envelope;
pub mod error;
pub mod retry;
pub mod transport;

pub use auth::Credentials;
pub use client::{ClientConfig, RisClient};
pub use criteria::{CtiQuery, DeviceQuery, DeviceVariant, Items, Model};
pub use envelope::{DeviceRecord, Fault, FaultCode, QueryResult};
pub use error::Error;
pub use retry::{Backoff, RetryPolicy};
pub use transport::{TlsMode, TransportConfig};
