//! Network fetch abstraction

use crate::http::{Request, Response};

/// Errors from the network layer
///
/// An HTTP error status is not a network error; it arrives as a normal
/// [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkError {
    /// No connectivity
    Offline,
    /// Request timed out
    Timeout,
    /// Request was blocked or aborted by the host
    Aborted,
}

impl core::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NetworkError::Offline => f.write_str("network unreachable"),
            NetworkError::Timeout => f.write_str("network request timed out"),
            NetworkError::Aborted => f.write_str("network request aborted"),
        }
    }
}

/// Network fetch trait
pub trait Network {
    /// Issue a request to the network
    fn fetch(&mut self, request: &Request) -> impl core::future::Future<Output = Result<Response, NetworkError>>;
}
