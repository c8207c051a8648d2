//! UDP packet-relay core for an IP tunnel.
//!
//! This crate provides the forwarding engine of a VPN-style tunnel:
//! - **tun**: Cross-platform TUN device creation and async I/O
//! - **tokio**: UDP transport and the two concurrent packet pumps
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          udptun                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TUN Device ◄──► PacketPipeline ◄──► UDP Socket ◄──► Peer   │
//! ├─────────────────────────────────────────────────────────────┤
//! │     host routing: split-default + bypass routes (client)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Raw IP packets read from the TUN device are obfuscated/compressed per
//! datagram and sent to the remote endpoint over UDP; received datagrams go
//! through the inverse transforms and are written back to the TUN device.
//! The transport is unreliable by design: lost, reordered, or undecodable
//! datagrams are dropped, never retried.
//!
//! Command-line parsing and logger installation belong to the consuming
//! binary; this crate only logs through the `log` facade.

pub mod config;
pub mod device;
pub mod error;
pub mod forwarder;
pub mod pipeline;
pub mod transport;

// Re-exports for convenience
pub use config::TunnelConfig;
pub use device::{CommandRunner, RouteSet, SystemCommandRunner, TunDevice};
pub use error::{TunnelError, TunnelResult};
pub use forwarder::{run_client, Forwarder};
pub use pipeline::PacketPipeline;
pub use transport::TransportSession;
