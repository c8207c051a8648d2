//! Tunnel configuration types.

use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Default MTU for the TUN device (1500 - headroom for UDP/IP encapsulation
/// and per-datagram transform overhead).
pub const DEFAULT_MTU: u16 = 1400;

/// Tunnel configuration, supplied once at startup and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunnelConfig {
    /// TUN device name (e.g., "tun0"). If None, the system assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,

    /// IPv4 address and prefix for this end of the tunnel (e.g., "10.0.0.2/24").
    pub cidr: Ipv4Net,

    /// IPv6 address and prefix for this end of the tunnel (e.g., "fd00::2/64").
    pub cidr_v6: Ipv6Net,

    /// MTU for the TUN device.
    #[serde(default = "default_mtu")]
    pub mtu: u16,

    /// Run as the server side of the tunnel. Servers never touch the host
    /// routing table.
    #[serde(default)]
    pub server_mode: bool,

    /// Redirect all host traffic through the tunnel (split-default routes).
    /// When false, only traffic addressed into the tunnel networks is captured.
    #[serde(default)]
    pub global_mode: bool,

    /// Compress each datagram independently before sending.
    #[serde(default)]
    pub compress: bool,

    /// Obfuscate packet bytes (reversible XOR, not encryption).
    #[serde(default)]
    pub obfs: bool,

    /// Remote endpoint as host:port (resolved once during setup).
    pub server_addr: String,

    /// Local UDP bind address as host:port.
    pub local_addr: String,

    /// Gateway of the pre-existing physical network, used for bypass routes
    /// in global mode.
    #[serde(default = "default_local_gateway")]
    pub local_gateway: IpAddr,

    /// DNS server that must stay reachable outside the tunnel in global mode.
    #[serde(default = "default_dns_server")]
    pub dns_server: IpAddr,

    /// Server-side IPv4 address inside the tunnel network (point-to-point
    /// destination of the TUN device).
    #[serde(default = "default_intranet_ip")]
    pub intranet_server_ip: Ipv4Addr,

    /// Server-side IPv6 address inside the tunnel network.
    #[serde(default = "default_intranet_ip6")]
    pub intranet_server_ip6: Ipv6Addr,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            device_name: None,
            cidr: default_cidr(),
            cidr_v6: default_cidr_v6(),
            mtu: DEFAULT_MTU,
            server_mode: false,
            global_mode: false,
            compress: false,
            obfs: false,
            server_addr: "127.0.0.1:3001".to_string(),
            local_addr: "0.0.0.0:3000".to_string(),
            local_gateway: default_local_gateway(),
            dns_server: default_dns_server(),
            intranet_server_ip: default_intranet_ip(),
            intranet_server_ip6: default_intranet_ip6(),
        }
    }
}

impl TunnelConfig {
    /// Validate the tunnel configuration.
    ///
    /// Checks constraints that the type system cannot express. Address and
    /// prefix syntax is already enforced by `Ipv4Net`/`Ipv6Net` at parse time.
    pub fn validate(&self) -> Result<(), String> {
        if self.mtu == 0 {
            return Err("MTU must be greater than 0".to_string());
        }
        if self.mtu as usize > crate::forwarder::RELAY_BUFFER_SIZE {
            return Err(format!(
                "MTU {} exceeds the relay buffer size ({})",
                self.mtu,
                crate::forwarder::RELAY_BUFFER_SIZE
            ));
        }
        if self.server_addr.is_empty() {
            return Err("'server_addr' must not be empty".to_string());
        }
        if self.local_addr.is_empty() {
            return Err("'local_addr' must not be empty".to_string());
        }
        if !self.cidr.contains(&self.intranet_server_ip) {
            return Err(format!(
                "'intranet_server_ip' {} is not inside the tunnel network {}",
                self.intranet_server_ip,
                self.cidr.trunc()
            ));
        }
        Ok(())
    }
}

// Default value functions for serde
fn default_mtu() -> u16 {
    DEFAULT_MTU
}

fn default_cidr() -> Ipv4Net {
    "10.0.0.2/24".parse().expect("valid default CIDR")
}

fn default_cidr_v6() -> Ipv6Net {
    "fd00::2/64".parse().expect("valid default IPv6 CIDR")
}

fn default_local_gateway() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1))
}

fn default_dns_server() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))
}

fn default_intranet_ip() -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 0, 1)
}

fn default_intranet_ip6() -> Ipv6Addr {
    "fd00::1".parse().expect("valid default IPv6 address")
}
