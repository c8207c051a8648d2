//! The bidirectional packet-forwarding engine.
//!
//! Two independent pumps run for the life of the process:
//! - **Ingress**: UDP datagram -> inbound pipeline -> TUN write.
//! - **Egress**: TUN packet -> outbound pipeline -> UDP send.
//!
//! Each pump owns one half of the split TUN device and shares the UDP
//! socket, so no lock sits between them. Every per-iteration failure —
//! zero-length reads, I/O errors, undecodable datagrams — is logged and
//! skipped; the pumps never terminate on their own. Backpressure is left
//! entirely to the OS socket and interface buffers: under load this design
//! drops packets instead of queuing them.

use crate::config::TunnelConfig;
use crate::device::{configure_interface, SystemCommandRunner, TunDevice, TunReader, TunWriter};
use crate::error::{TunnelError, TunnelResult};
use crate::pipeline::PacketPipeline;
use crate::transport::TransportSession;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;

/// Size of the per-pump packet slab, allocated once before each loop.
/// Large enough for any supported MTU plus transform expansion headroom.
pub const RELAY_BUFFER_SIZE: usize = 4096;

/// Composes the transport session and pipeline into the two packet pumps.
pub struct Forwarder {
    socket: Arc<UdpSocket>,
    remote: SocketAddr,
    pipeline: PacketPipeline,
}

impl Forwarder {
    /// Create a forwarder over an open transport session.
    pub fn new(session: &TransportSession, pipeline: PacketPipeline) -> Self {
        Self {
            socket: session.socket(),
            remote: session.remote(),
            pipeline,
        }
    }

    /// Run both pumps until the process ends.
    ///
    /// The pumps have no termination signal; this only returns if a pump
    /// task fails to join. Panics inside a pump are propagated.
    pub async fn run(self, tun_reader: TunReader, tun_writer: TunWriter) -> TunnelResult<()> {
        let ingress = tokio::spawn(run_ingress(
            self.socket.clone(),
            self.pipeline,
            tun_writer,
        ));
        let egress = tokio::spawn(run_egress(
            tun_reader,
            self.pipeline,
            self.socket,
            self.remote,
        ));

        tokio::select! {
            res = ingress => handle_join_result(res, "ingress"),
            res = egress => handle_join_result(res, "egress"),
        }
    }
}

/// Ingress pump: receive datagrams, decode, write to the TUN device.
async fn run_ingress(socket: Arc<UdpSocket>, pipeline: PacketPipeline, mut tun_writer: TunWriter) {
    let mut buf = vec![0u8; RELAY_BUFFER_SIZE];
    loop {
        let len = match socket.recv_from(&mut buf).await {
            Ok((len, _)) if len > 0 => len,
            Ok(_) => continue,
            Err(e) => {
                log::debug!("UDP receive failed: {}", e);
                continue;
            }
        };

        let packet = match pipeline.inbound(&buf[..len]) {
            Ok(packet) => packet,
            Err(e) => {
                // Routine on a lossy transport: drop, don't forward.
                log::debug!("Dropping undecodable datagram ({} bytes): {}", len, e);
                continue;
            }
        };

        if let Err(e) = tun_writer.write_all(&packet).await {
            log::debug!("TUN write failed: {}", e);
        }
    }
}

/// Egress pump: read TUN packets, encode, send to the remote endpoint.
async fn run_egress(
    mut tun_reader: TunReader,
    pipeline: PacketPipeline,
    socket: Arc<UdpSocket>,
    remote: SocketAddr,
) {
    let mut buf = vec![0u8; RELAY_BUFFER_SIZE];
    loop {
        let len = match tun_reader.read(&mut buf).await {
            Ok(len) if len > 0 => len,
            Ok(_) => continue,
            Err(e) => {
                log::debug!("TUN read failed: {}", e);
                continue;
            }
        };

        let datagram = match pipeline.outbound(&buf[..len]) {
            Ok(datagram) => datagram,
            Err(e) => {
                log::warn!("Failed to encode packet ({} bytes): {}", len, e);
                continue;
            }
        };

        if let Err(e) = socket.send_to(&datagram, remote).await {
            log::debug!("UDP send failed: {}", e);
        }
    }
}

/// Handle a JoinResult, propagating panics and converting other errors.
fn handle_join_result(
    res: Result<(), tokio::task::JoinError>,
    task_name: &str,
) -> TunnelResult<()> {
    match res {
        Ok(()) => Ok(()),
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(TunnelError::Network(std::io::Error::other(format!(
            "{} pump failed: {}",
            task_name, e
        )))),
    }
}

/// Run the complete client tunnel: open the transport, create and configure
/// the TUN device, then pump packets until the process ends.
///
/// Setup failures are fatal and returned; nothing is after the pumps start.
pub async fn run_client(config: TunnelConfig) -> TunnelResult<()> {
    config.validate().map_err(TunnelError::config)?;

    // Resolves the remote endpoint exactly once; the bypass route below
    // reuses that resolution.
    let session = TransportSession::open(&config).await?;

    let device = TunDevice::create(&config)?;
    let runner = SystemCommandRunner;
    let routes = configure_interface(&config, device.name(), session.remote().ip(), &runner);

    let (tun_reader, tun_writer) = device.split()?;
    let pipeline = PacketPipeline::from_config(&config);

    log::info!(
        "Tunnel up: {} <-> {} (compress: {}, obfs: {})",
        config.cidr,
        session.remote(),
        config.compress,
        config.obfs
    );

    let result = Forwarder::new(&session, pipeline)
        .run(tun_reader, tun_writer)
        .await;

    // Only reachable when a pump fails to join; still put the routing
    // table back the way we found it.
    routes.undo(&runner);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Relay one datagram across a loopback socket pair through the full
    /// outbound/inbound pipeline, the way the pumps do.
    #[tokio::test]
    async fn test_datagram_relay_round_trip_over_loopback() {
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let remote = receiver.local_addr().unwrap();

        let pipeline = PacketPipeline::new(true, true);
        let packet: Vec<u8> = b"raw ip packet bytes raw ip packet bytes".to_vec();

        // Egress side: encode then send as a single datagram.
        let wire = pipeline.outbound(&packet).unwrap();
        sender.send_to(&wire, remote).await.unwrap();

        // Ingress side: one recv yields exactly one tunnel packet.
        let mut buf = vec![0u8; RELAY_BUFFER_SIZE];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert_eq!(len, wire.len());

        let restored = pipeline.inbound(&buf[..len]).unwrap();
        assert_eq!(restored.as_ref(), packet.as_slice());
    }

    /// A corrupted datagram is dropped by the ingress decode step instead
    /// of reaching the interface.
    #[tokio::test]
    async fn test_corrupt_datagram_is_dropped_not_forwarded() {
        let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let receiver = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let remote = receiver.local_addr().unwrap();

        let pipeline = PacketPipeline::new(false, true);
        sender.send_to(b"\xff\xfenot zlib", remote).await.unwrap();

        let mut buf = vec![0u8; RELAY_BUFFER_SIZE];
        let (len, _) = receiver.recv_from(&mut buf).await.unwrap();
        assert!(pipeline.inbound(&buf[..len]).is_err());
    }
}
