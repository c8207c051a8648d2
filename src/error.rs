//! Error types for the tunnel core.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error type used for error chaining across crate boundaries.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Context wrapper that preserves an optional underlying source error.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ErrorContext {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ErrorContext {
    /// Create context-only error (no underlying source).
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create context error with an underlying source.
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Tunnel-specific errors.
///
/// Everything here is fatal at setup time. Per-packet runtime failures
/// (short reads, undecodable datagrams) never surface as errors: the pumps
/// log and retry, matching the lossy transport underneath.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TunnelError {
    /// TUN device creation or configuration failed.
    #[error("TUN device error: {0}")]
    TunDevice(#[source] ErrorContext),

    /// Network I/O error.
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[source] ErrorContext),

    /// UDP transport setup error (resolve, bind, QoS marking).
    #[error("Transport error: {0}")]
    Transport(#[source] ErrorContext),
}

impl TunnelError {
    /// Create a TUN device error with context only.
    pub fn tun_device(message: impl Into<String>) -> Self {
        Self::TunDevice(ErrorContext::new(message))
    }

    /// Create a TUN device error with preserved source.
    pub fn tun_device_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::TunDevice(ErrorContext::with_source(message, source))
    }

    /// Create a configuration error with context only.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(ErrorContext::new(message))
    }

    /// Create a transport error with context only.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(ErrorContext::new(message))
    }

    /// Create a transport error with preserved source.
    pub fn transport_with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Transport(ErrorContext::with_source(message, source))
    }
}

/// Result type alias for tunnel operations.
pub type TunnelResult<T> = Result<T, TunnelError>;
