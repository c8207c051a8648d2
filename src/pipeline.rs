//! Per-packet transform pipeline: obfuscation and compression.
//!
//! The two directions are exact inverses and the transform order is a
//! correctness contract: outbound applies obfuscation then compression,
//! inbound applies decompression then de-obfuscation. Each datagram is
//! transformed independently of every other datagram, because the UDP
//! transport may lose or reorder them arbitrarily.

use crate::config::TunnelConfig;
use crate::error::{TunnelError, TunnelResult};
use std::borrow::Cow;
use std::io::{Read, Write};

/// Repeating key for the XOR obfuscation transform.
///
/// XOR against a fixed key is involutive (applying it twice restores the
/// original bytes). This is a traffic-disguise measure, not encryption.
const OBFS_KEY: &[u8] = b"c9bd3f4e81d0a6f2734b5c1e08a9d7e6";

/// Upper bound on the decompressed size of a single datagram. Anything
/// larger than the maximum IP packet is garbage or a decompression bomb.
const MAX_DECOMPRESSED_LEN: usize = 65535;

/// Stateless per-packet transform pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PacketPipeline {
    obfs: bool,
    compress: bool,
}

impl PacketPipeline {
    /// Create a pipeline with explicit transform flags.
    pub fn new(obfs: bool, compress: bool) -> Self {
        Self { obfs, compress }
    }

    /// Create a pipeline from the tunnel configuration.
    pub fn from_config(config: &TunnelConfig) -> Self {
        Self::new(config.obfs, config.compress)
    }

    /// Encode a packet for the wire (TUN -> UDP direction).
    ///
    /// Obfuscation first, compression second. With both transforms disabled
    /// the packet is passed through without copying.
    pub fn outbound<'a>(&self, packet: &'a [u8]) -> TunnelResult<Cow<'a, [u8]>> {
        if !self.obfs && !self.compress {
            return Ok(Cow::Borrowed(packet));
        }
        let mut bytes = packet.to_vec();
        if self.obfs {
            xor_in_place(&mut bytes);
        }
        if self.compress {
            bytes = deflate(&bytes)?;
        }
        Ok(Cow::Owned(bytes))
    }

    /// Decode a received datagram (UDP -> TUN direction).
    ///
    /// Decompression first, de-obfuscation second — the exact reverse of
    /// [`outbound`](Self::outbound). An error means the datagram is
    /// undecodable; callers drop it and move on.
    pub fn inbound<'a>(&self, datagram: &'a [u8]) -> TunnelResult<Cow<'a, [u8]>> {
        if !self.obfs && !self.compress {
            return Ok(Cow::Borrowed(datagram));
        }
        let mut bytes;
        if self.compress {
            bytes = inflate(datagram)?;
        } else {
            bytes = datagram.to_vec();
        }
        if self.obfs {
            xor_in_place(&mut bytes);
        }
        Ok(Cow::Owned(bytes))
    }
}

/// XOR the buffer against the repeating obfuscation key, in place.
fn xor_in_place(bytes: &mut [u8]) {
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte ^= OBFS_KEY[i % OBFS_KEY.len()];
    }
}

/// Compress one datagram as an independent zlib stream (no shared dictionary).
fn deflate(data: &[u8]) -> TunnelResult<Vec<u8>> {
    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).map_err(TunnelError::Network)?;
    encoder.finish().map_err(TunnelError::Network)
}

/// Decompress one datagram. Fails on corrupt input or oversized output.
fn inflate(data: &[u8]) -> TunnelResult<Vec<u8>> {
    let decoder = flate2::read::ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .take(MAX_DECOMPRESSED_LEN as u64 + 1)
        .read_to_end(&mut out)
        .map_err(TunnelError::Network)?;
    if out.len() > MAX_DECOMPRESSED_LEN {
        return Err(TunnelError::transport(
            "decompressed datagram exceeds maximum IP packet size",
        ));
    }
    Ok(out)
}
