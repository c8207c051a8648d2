//! UDP transport session: address resolution, binding, and QoS marking.

use crate::config::TunnelConfig;
use crate::error::{TunnelError, TunnelResult};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{lookup_host, UdpSocket};

/// DSCP Expedited Forwarding (EF, 101110) shifted into the ToS/traffic-class
/// byte. Advisory only; honored by cooperating network equipment.
const DSCP_EF_TOS: u32 = 0xb8;

/// A bound datagram socket plus the resolved remote endpoint.
///
/// Exactly one session exists per tunnel; both pumps share the socket
/// (`UdpSocket` supports a concurrent receiver/sender pair without locking).
pub struct TransportSession {
    socket: Arc<UdpSocket>,
    remote: SocketAddr,
}

impl TransportSession {
    /// Resolve the remote endpoint and local bind address, bind the socket,
    /// and apply expedited-forwarding marking.
    ///
    /// Resolution happens exactly once, here. Every failure is fatal: a
    /// tunnel without a usable transport socket has no degraded mode.
    pub async fn open(config: &TunnelConfig) -> TunnelResult<Self> {
        let remote = resolve(&config.server_addr, "server_addr").await?;
        let local = resolve(&config.local_addr, "local_addr").await?;

        let socket = UdpSocket::bind(local).await.map_err(|e| {
            TunnelError::transport_with_source(format!("Failed to bind UDP socket on {}", local), e)
        })?;

        mark_expedited_forwarding(&socket, local)?;

        log::info!("UDP transport bound on {} for remote {}", local, remote);

        Ok(Self {
            socket: Arc::new(socket),
            remote,
        })
    }

    /// The shared datagram socket.
    pub fn socket(&self) -> Arc<UdpSocket> {
        self.socket.clone()
    }

    /// The resolved remote endpoint.
    pub fn remote(&self) -> SocketAddr {
        self.remote
    }
}

/// Resolve a host:port string to its first address.
async fn resolve(addr: &str, field: &str) -> TunnelResult<SocketAddr> {
    lookup_host(addr)
        .await
        .map_err(|e| {
            TunnelError::transport_with_source(format!("Failed to resolve '{}' {}", field, addr), e)
        })?
        .next()
        .ok_or_else(|| {
            TunnelError::transport(format!("'{}' {} resolved to no addresses", field, addr))
        })
}

/// Apply DSCP EF marking on the code path matching the local address family.
///
/// A socket that rejects its own per-family option is unusable for the
/// intended path, so marking failure is fatal.
fn mark_expedited_forwarding(socket: &UdpSocket, local: SocketAddr) -> TunnelResult<()> {
    let sock = socket2::SockRef::from(socket);
    let result = if local.is_ipv4() {
        sock.set_tos_v4(DSCP_EF_TOS)
    } else {
        sock.set_tclass_v6(DSCP_EF_TOS)
    };
    result.map_err(|e| {
        TunnelError::transport_with_source("Failed to set expedited-forwarding marking", e)
    })
}
