//! Request and response values exchanged with the host
//!
//! Only the parts of a request/response the cache inspects are modelled:
//! method, URL, navigation mode, status, response type, headers and body.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Request method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Other,
}

/// How the page issued the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RequestMode {
    /// Top-level page navigation
    Navigate,
    /// Same-origin subresource
    #[default]
    SameOrigin,
    /// Cross-origin request with CORS
    Cors,
    /// Cross-origin request without CORS (opaque result)
    NoCors,
}

/// An asset request intercepted from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Absolute path or URL; also the cache key
    pub url: String,
    pub mode: RequestMode,
}

impl Request {
    /// Create a same-origin GET request
    pub fn get(url: &str) -> Self {
        Self {
            method: Method::Get,
            url: String::from(url),
            mode: RequestMode::SameOrigin,
        }
    }

    /// Create a page navigation request
    pub fn navigate(url: &str) -> Self {
        Self {
            method: Method::Get,
            url: String::from(url),
            mode: RequestMode::Navigate,
        }
    }

    /// Check if this is a page navigation
    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }
}

/// Response type as classified by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResponseKind {
    /// Same-origin response with readable body
    #[default]
    Basic,
    /// Cross-origin response with CORS headers
    Cors,
    /// Cross-origin response without CORS; status and body hidden
    Opaque,
    /// Network error placeholder
    Error,
}

/// A response body plus the metadata the cache stores with it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Response {
    pub status: u16,
    pub kind: ResponseKind,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Create a same-origin response
    pub fn new(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            kind: ResponseKind::Basic,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((String::from(name), String::from(value)));
        self
    }

    /// Set the response type
    pub fn with_kind(mut self, kind: ResponseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Status in the 200-299 range
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a header value (case-insensitive name)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
