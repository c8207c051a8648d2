//! TUN device creation and host routing configuration.
//!
//! This module owns the virtual interface lifecycle: creating the TUN
//! device, assigning addresses, and — for clients that redirect all traffic
//! through the tunnel — mutating the host routing table.
//!
//! Routing mutations are modeled as an ordered list of (apply, undo) command
//! pairs ([`RouteSet`]), so teardown is derived from setup by symmetry
//! instead of being maintained as a separate per-platform branch. Bypass
//! routes for the remote endpoint and the DNS server are installed before
//! the split-default routes, so tunnel-bound traffic can never black-hole
//! the tunnel's own transport.

use crate::config::TunnelConfig;
use crate::error::{TunnelError, TunnelResult};
use std::fmt;
use std::io;
use std::net::IpAddr;
use std::process::Output;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tun::{AbstractDevice, AsyncDevice, Configuration, DeviceReader, DeviceWriter};

/// A managed TUN device with async I/O.
pub struct TunDevice {
    /// The underlying async TUN device.
    device: AsyncDevice,
    /// Device name, fixed after creation.
    name: String,
    /// Configured MTU.
    mtu: u16,
}

impl TunDevice {
    /// Create a new TUN device from the tunnel configuration.
    ///
    /// The IPv4 address, netmask, MTU, and admin-up state are applied at
    /// creation; the IPv6 address is added afterwards via
    /// [`configure_interface`] since the tun crate only programs IPv4.
    pub fn create(config: &TunnelConfig) -> TunnelResult<Self> {
        let mut tun_config = Configuration::default();

        tun_config
            .address(config.cidr.addr())
            .netmask(config.cidr.netmask())
            .destination(config.intranet_server_ip)
            .mtu(config.mtu)
            .up();

        if let Some(ref name) = config.device_name {
            #[allow(deprecated)]
            tun_config.name(name);
        }

        #[cfg(target_os = "linux")]
        tun_config.platform_config(|platform_config| {
            platform_config.ensure_root_privileges(true);
        });

        let device = tun::create_as_async(&tun_config)
            .map_err(|e| TunnelError::tun_device_with_source("Failed to create TUN device", e))?;

        let name = device
            .tun_name()
            .map_err(|e| TunnelError::tun_device_with_source("Failed to get TUN name", e))?;

        log::info!(
            "Created TUN device {} with address {} mtu {}",
            name,
            config.cidr,
            config.mtu
        );

        Ok(Self {
            device,
            name,
            mtu: config.mtu,
        })
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the configured MTU.
    pub fn mtu(&self) -> u16 {
        self.mtu
    }

    /// Split the device into read and write halves.
    /// Note: The tun crate returns (writer, reader) order from split().
    pub fn split(self) -> TunnelResult<(TunReader, TunWriter)> {
        let (writer, reader) = self
            .device
            .split()
            .map_err(|e| TunnelError::tun_device_with_source("Failed to split TUN device", e))?;

        Ok((TunReader { reader }, TunWriter { writer }))
    }
}

/// Read half of a split TUN device, owned by the egress pump.
pub struct TunReader {
    reader: DeviceReader,
}

impl TunReader {
    /// Read one IP packet from the TUN device.
    pub async fn read(&mut self, buf: &mut [u8]) -> TunnelResult<usize> {
        self.reader.read(buf).await.map_err(TunnelError::Network)
    }
}

/// Write half of a split TUN device, owned by the ingress pump.
pub struct TunWriter {
    writer: DeviceWriter,
}

impl TunWriter {
    /// Write one IP packet to the TUN device.
    pub async fn write_all(&mut self, buf: &[u8]) -> TunnelResult<()> {
        self.writer
            .write_all(buf)
            .await
            .map_err(TunnelError::Network)
    }
}

// ============================================================================
// Host Command Execution
// ============================================================================

/// Executes host networking commands (`ip`, `route`, `ifconfig`).
///
/// Production code uses [`SystemCommandRunner`]; tests substitute a
/// recording fake so route plans can be asserted without touching the host
/// routing table or requiring root.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and return its captured output.
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output>;
}

/// [`CommandRunner`] that shells out to the host.
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<Output> {
        std::process::Command::new(program).args(args).output()
    }
}

/// Check if an error message indicates that a resource already exists.
///
/// Used for idempotent route/address operations. Handles both formats:
/// - Linux iproute2: "RTNETLINK answers: File exists"
/// - macOS route: "route: writing to routing socket: File exists"
fn is_already_exists_error(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("file exists") || lower.contains("eexist") || lower.contains("already exists")
}

// ============================================================================
// Route Commands and the RouteSet Transaction
// ============================================================================

/// One host networking command: a program plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCommand {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl RouteCommand {
    fn new<I, S>(program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run the command, treating "already exists" failures as success.
    /// All failures are logged; none are escalated — routing commands are
    /// best-effort by design.
    fn execute(&self, runner: &dyn CommandRunner) {
        match runner.run(self.program, &self.args) {
            Ok(output) if output.status.success() => {
                log::info!("Applied: {}", self);
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                if is_already_exists_error(&stderr) {
                    log::warn!("{} already applied (treating as success)", self);
                } else {
                    log::warn!("Command failed: {}: {}", self, stderr.trim());
                }
            }
            Err(e) => {
                log::warn!("Failed to execute {}: {}", self, e);
            }
        }
    }
}

impl fmt::Display for RouteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// A routing mutation paired with the command that reverses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub apply: RouteCommand,
    pub undo: RouteCommand,
}

/// An ordered, reversible list of host routing-table mutations.
///
/// `apply` runs the entries in order; `undo` runs the reverse commands in
/// reverse order. An empty set (server role, selective capture, or an
/// unsupported host OS) issues zero commands either way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet {
    entries: Vec<RouteEntry>,
}

impl RouteSet {
    /// Create an empty route set.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, apply: RouteCommand, undo: RouteCommand) {
        self.entries.push(RouteEntry { apply, undo });
    }

    /// Number of routing mutations in this set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no routing mutation is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The apply-side commands, in application order.
    pub fn apply_commands(&self) -> impl Iterator<Item = &RouteCommand> + '_ {
        self.entries.iter().map(|e| &e.apply)
    }

    /// Apply every mutation in order.
    pub fn apply(&self, runner: &dyn CommandRunner) {
        for entry in &self.entries {
            entry.apply.execute(runner);
        }
    }

    /// Reverse every mutation, newest first.
    pub fn undo(&self, runner: &dyn CommandRunner) {
        for entry in self.entries.iter().rev() {
            entry.undo.execute(runner);
        }
    }
}

// ============================================================================
// Platform Route Plans
// ============================================================================

/// Host platform for routing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    /// Routing configuration is skipped; the interface exists but carries
    /// no traffic until configured manually.
    Unsupported,
}

impl Platform {
    /// Detect the platform this process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unsupported
        }
    }
}

/// Build the command that assigns the IPv6 address to the TUN device.
///
/// The tun crate only programs the IPv4 side, so IPv6 goes through the host
/// tooling on every platform.
fn ipv6_address_command(
    platform: Platform,
    config: &TunnelConfig,
    tun_name: &str,
) -> Option<RouteCommand> {
    match platform {
        Platform::Linux => Some(RouteCommand::new(
            "ip",
            [
                "-6",
                "addr",
                "add",
                &config.cidr_v6.to_string(),
                "dev",
                tun_name,
            ],
        )),
        Platform::MacOs => Some(RouteCommand::new(
            "ifconfig",
            [
                tun_name,
                "inet6",
                "add",
                &config.cidr_v6.addr().to_string(),
                "prefixlen",
                &config.cidr_v6.prefix_len().to_string(),
            ],
        )),
        Platform::Unsupported => None,
    }
}

/// Build the full-traffic-redirection route set for a client.
///
/// Entry order matters: bypass routes for the remote endpoint and the DNS
/// server go first (via the pre-existing physical gateway), then the
/// split-default half-space routes for both address families. The remote
/// bypass matches the address family the endpoint resolution returned:
/// a /32 for IPv4, a /64 for IPv6.
fn redirect_route_set(
    platform: Platform,
    config: &TunnelConfig,
    tun_name: &str,
    physical_iface: &str,
    remote: IpAddr,
) -> RouteSet {
    let mut routes = RouteSet::new();
    let gateway = config.local_gateway.to_string();

    match platform {
        Platform::Linux => {
            let via_physical = |target: &str, v6: bool| -> (RouteCommand, RouteCommand) {
                let family: &[&str] = if v6 { &["-6"] } else { &[] };
                let add = family
                    .iter()
                    .copied()
                    .chain(["route", "add", target, "via", &gateway, "dev", physical_iface])
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                let del = family
                    .iter()
                    .copied()
                    .chain(["route", "del", target, "via", &gateway, "dev", physical_iface])
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                (
                    RouteCommand { program: "ip", args: add },
                    RouteCommand { program: "ip", args: del },
                )
            };

            match remote {
                IpAddr::V4(addr) => {
                    let (add, del) = via_physical(&format!("{}/32", addr), false);
                    routes.push(add, del);
                }
                IpAddr::V6(addr) => {
                    let (add, del) = via_physical(&format!("{}/64", addr), true);
                    routes.push(add, del);
                }
            }
            let (add, del) = via_physical(&format!("{}/32", config.dns_server), false);
            routes.push(add, del);

            for half in ["0.0.0.0/1", "128.0.0.0/1"] {
                routes.push(
                    RouteCommand::new("ip", ["route", "add", half, "dev", tun_name]),
                    RouteCommand::new("ip", ["route", "del", half, "dev", tun_name]),
                );
            }
            for half in ["::/1", "8000::/1"] {
                routes.push(
                    RouteCommand::new("ip", ["-6", "route", "add", half, "dev", tun_name]),
                    RouteCommand::new("ip", ["-6", "route", "del", half, "dev", tun_name]),
                );
            }
        }
        Platform::MacOs => {
            match remote {
                IpAddr::V4(addr) => routes.push(
                    RouteCommand::new("route", ["add", &addr.to_string(), &gateway]),
                    RouteCommand::new("route", ["delete", &addr.to_string(), &gateway]),
                ),
                IpAddr::V6(addr) => routes.push(
                    RouteCommand::new("route", ["add", "-inet6", &addr.to_string(), &gateway]),
                    RouteCommand::new("route", ["delete", "-inet6", &addr.to_string(), &gateway]),
                ),
            }
            routes.push(
                RouteCommand::new("route", ["add", &config.dns_server.to_string(), &gateway]),
                RouteCommand::new("route", ["delete", &config.dns_server.to_string(), &gateway]),
            );

            for half in ["0.0.0.0/1", "128.0.0.0/1"] {
                routes.push(
                    RouteCommand::new("route", ["add", half, "-interface", tun_name]),
                    RouteCommand::new("route", ["delete", half, "-interface", tun_name]),
                );
            }
            for half in ["::/1", "8000::/1"] {
                routes.push(
                    RouteCommand::new("route", ["add", "-inet6", half, "-interface", tun_name]),
                    RouteCommand::new("route", ["delete", "-inet6", half, "-interface", tun_name]),
                );
            }

            // macOS supports replacing the default route in place; the undo
            // side points it back at the original physical gateway.
            let tunnel_gateway = config.intranet_server_ip.to_string();
            routes.push(
                RouteCommand::new("route", ["change", "default", &tunnel_gateway]),
                RouteCommand::new("route", ["change", "default", &gateway]),
            );
        }
        Platform::Unsupported => {}
    }

    routes
}

/// Parse the physical default interface name out of the host tooling output.
///
/// Linux: `ip -4 route show default` → "default via 192.168.1.1 dev eth0 ...".
/// macOS: `route -n get default` → an "interface: en0" line.
fn parse_default_interface(platform: Platform, output: &str) -> Option<String> {
    match platform {
        Platform::Linux => {
            let mut tokens = output.split_whitespace();
            while let Some(token) = tokens.next() {
                if token == "dev" {
                    return tokens.next().map(str::to_string);
                }
            }
            None
        }
        Platform::MacOs => output.lines().find_map(|line| {
            line.trim()
                .strip_prefix("interface:")
                .map(|name| name.trim().to_string())
        }),
        Platform::Unsupported => None,
    }
}

/// Discover the physical interface currently holding the default route.
fn detect_default_interface(platform: Platform, runner: &dyn CommandRunner) -> Option<String> {
    let (program, args): (&'static str, &[&str]) = match platform {
        Platform::Linux => ("ip", &["-4", "route", "show", "default"]),
        Platform::MacOs => ("route", &["-n", "get", "default"]),
        Platform::Unsupported => return None,
    };
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    match runner.run(program, &args) {
        Ok(output) if output.status.success() => {
            parse_default_interface(platform, &String::from_utf8_lossy(&output.stdout))
        }
        Ok(output) => {
            log::warn!(
                "Default route lookup failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            None
        }
        Err(e) => {
            log::warn!("Failed to execute default route lookup: {}", e);
            None
        }
    }
}

// ============================================================================
// Interface Configuration Entry Points
// ============================================================================

/// Plan the routing-table mutations for this session, without executing them.
///
/// Returns an empty set unless the process is a client in global mode on a
/// supported platform with a discoverable physical interface.
pub fn plan_routes(
    platform: Platform,
    config: &TunnelConfig,
    tun_name: &str,
    physical_iface: Option<&str>,
    remote: IpAddr,
) -> RouteSet {
    if config.server_mode || !config.global_mode {
        return RouteSet::new();
    }
    match physical_iface {
        Some(iface) => redirect_route_set(platform, config, tun_name, iface, remote),
        None => RouteSet::new(),
    }
}

/// Configure addresses and routing for a freshly created TUN device.
///
/// Applies the IPv6 address, then — for global-mode clients — installs the
/// redirect route set. The returned [`RouteSet`] records every mutation so
/// the caller can reverse it with [`RouteSet::undo`]. On an unsupported
/// platform this logs a warning and mutates nothing.
pub fn configure_interface(
    config: &TunnelConfig,
    tun_name: &str,
    remote: IpAddr,
    runner: &dyn CommandRunner,
) -> RouteSet {
    let platform = Platform::current();
    if platform == Platform::Unsupported {
        log::warn!(
            "Unsupported host OS: no routing configured for {}; \
             the interface carries no traffic until configured manually",
            tun_name
        );
        return RouteSet::new();
    }

    if let Some(cmd) = ipv6_address_command(platform, config, tun_name) {
        cmd.execute(runner);
    }

    if config.server_mode || !config.global_mode {
        return RouteSet::new();
    }

    let physical_iface = detect_default_interface(platform, runner);
    if physical_iface.is_none() {
        log::warn!("No physical default interface found; skipping traffic redirection");
    }
    let routes = plan_routes(platform, config, tun_name, physical_iface.as_deref(), remote);
    routes.apply(runner);
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;
    use std::sync::Mutex;

    /// Records every command instead of executing it.
    struct RecordingRunner {
        commands: Mutex<Vec<String>>,
        stdout: Vec<u8>,
        exit_code: i32,
        stderr: Vec<u8>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            Self {
                commands: Mutex::new(Vec::new()),
                stdout: Vec::new(),
                exit_code: 0,
                stderr: Vec::new(),
            }
        }

        fn recorded(&self) -> Vec<String> {
            self.commands.lock().unwrap().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String]) -> io::Result<Output> {
            self.commands
                .lock()
                .unwrap()
                .push(format!("{} {}", program, args.join(" ")));
            Ok(Output {
                status: ExitStatus::from_raw(self.exit_code),
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
            })
        }
    }

    fn client_global_config() -> TunnelConfig {
        TunnelConfig {
            cidr: "10.0.0.2/24".parse().unwrap(),
            cidr_v6: "fd00::2/64".parse().unwrap(),
            global_mode: true,
            local_gateway: "192.168.1.1".parse().unwrap(),
            dns_server: "8.8.8.8".parse().unwrap(),
            ..TunnelConfig::default()
        }
    }

    #[test]
    fn test_dual_stack_redirect_plan_linux() {
        let config = client_global_config();
        let routes = plan_routes(
            Platform::Linux,
            &config,
            "tun0",
            Some("eth0"),
            "203.0.113.9".parse().unwrap(),
        );
        let applies: Vec<String> = routes.apply_commands().map(|c| c.to_string()).collect();

        // Bypass routes first, then both half-space routes per family.
        assert_eq!(
            applies[0],
            "ip route add 203.0.113.9/32 via 192.168.1.1 dev eth0"
        );
        assert_eq!(applies[1], "ip route add 8.8.8.8/32 via 192.168.1.1 dev eth0");
        assert!(applies.contains(&"ip route add 0.0.0.0/1 dev tun0".to_string()));
        assert!(applies.contains(&"ip route add 128.0.0.0/1 dev tun0".to_string()));
        assert!(applies.contains(&"ip -6 route add ::/1 dev tun0".to_string()));
        assert!(applies.contains(&"ip -6 route add 8000::/1 dev tun0".to_string()));
        assert_eq!(routes.len(), 6);
    }

    #[test]
    fn test_ipv6_remote_gets_ipv6_bypass() {
        let config = client_global_config();
        let routes = plan_routes(
            Platform::Linux,
            &config,
            "tun0",
            Some("eth0"),
            "2001:db8::9".parse().unwrap(),
        );
        let first = routes.apply_commands().next().unwrap().to_string();
        assert_eq!(
            first,
            "ip -6 route add 2001:db8::9/64 via 192.168.1.1 dev eth0"
        );
    }

    #[test]
    fn test_dual_stack_redirect_plan_macos() {
        let config = client_global_config();
        let routes = plan_routes(
            Platform::MacOs,
            &config,
            "utun3",
            Some("en0"),
            "203.0.113.9".parse().unwrap(),
        );
        let applies: Vec<String> = routes.apply_commands().map(|c| c.to_string()).collect();

        assert_eq!(applies[0], "route add 203.0.113.9 192.168.1.1");
        assert_eq!(applies[1], "route add 8.8.8.8 192.168.1.1");
        assert!(applies.contains(&"route add 0.0.0.0/1 -interface utun3".to_string()));
        assert!(applies.contains(&"route add 128.0.0.0/1 -interface utun3".to_string()));
        assert!(applies.contains(&"route add -inet6 ::/1 -interface utun3".to_string()));
        assert!(applies.contains(&"route add -inet6 8000::/1 -interface utun3".to_string()));
        // Default-route replace comes last; its undo restores the original
        // gateway.
        assert_eq!(applies.last().unwrap(), "route change default 10.0.0.1");
    }

    #[test]
    fn test_undo_reverses_apply_order() {
        let config = client_global_config();
        let routes = plan_routes(
            Platform::MacOs,
            &config,
            "utun3",
            Some("en0"),
            "203.0.113.9".parse().unwrap(),
        );
        let runner = RecordingRunner::new();
        routes.undo(&runner);
        let recorded = runner.recorded();

        // The last mutation (default-route replace) is reversed first.
        assert_eq!(recorded[0], "route change default 192.168.1.1");
        assert_eq!(
            recorded.last().unwrap(),
            "route delete 203.0.113.9 192.168.1.1"
        );
        assert_eq!(recorded.len(), routes.len());
    }

    #[test]
    fn test_server_role_plans_no_routes() {
        let config = TunnelConfig {
            server_mode: true,
            global_mode: true,
            ..client_global_config()
        };
        let routes = plan_routes(
            Platform::Linux,
            &config,
            "tun0",
            Some("eth0"),
            "203.0.113.9".parse().unwrap(),
        );
        assert!(routes.is_empty());

        // Teardown of a never-applied set issues zero commands.
        let runner = RecordingRunner::new();
        routes.undo(&runner);
        assert!(runner.recorded().is_empty());
    }

    #[test]
    fn test_selective_capture_plans_no_routes() {
        let config = TunnelConfig {
            global_mode: false,
            ..client_global_config()
        };
        let routes = plan_routes(
            Platform::Linux,
            &config,
            "tun0",
            Some("eth0"),
            "203.0.113.9".parse().unwrap(),
        );
        assert!(routes.is_empty());
    }

    #[test]
    fn test_missing_physical_interface_skips_redirection() {
        let config = client_global_config();
        let routes = plan_routes(
            Platform::Linux,
            &config,
            "tun0",
            None,
            "203.0.113.9".parse().unwrap(),
        );
        assert!(routes.is_empty());
    }

    #[test]
    fn test_apply_runs_every_command_in_order() {
        let config = client_global_config();
        let routes = plan_routes(
            Platform::Linux,
            &config,
            "tun0",
            Some("eth0"),
            "203.0.113.9".parse().unwrap(),
        );
        let runner = RecordingRunner::new();
        routes.apply(&runner);
        let expected: Vec<String> = routes.apply_commands().map(|c| c.to_string()).collect();
        assert_eq!(runner.recorded(), expected);
    }

    #[test]
    fn test_already_exists_failures_are_tolerated() {
        let runner = RecordingRunner {
            exit_code: 2 << 8, // wait status for exit code 2
            stderr: b"RTNETLINK answers: File exists".to_vec(),
            ..RecordingRunner::new()
        };
        let cmd = RouteCommand::new("ip", ["route", "add", "0.0.0.0/1", "dev", "tun0"]);
        // Must not panic; failure is logged and swallowed.
        cmd.execute(&runner);
        assert_eq!(runner.recorded().len(), 1);
    }

    #[test]
    fn test_parse_default_interface_linux() {
        let output = "default via 192.168.1.1 dev eth0 proto dhcp src 192.168.1.23 metric 100\n";
        assert_eq!(
            parse_default_interface(Platform::Linux, output).as_deref(),
            Some("eth0")
        );
        assert_eq!(parse_default_interface(Platform::Linux, "no default here"), None);
    }

    #[test]
    fn test_parse_default_interface_macos() {
        let output = "\
   route to: default
destination: default
       mask: default
    gateway: 192.168.1.1
  interface: en0
      flags: <UP,GATEWAY,DONE,STATIC,PRCLONING>
";
        assert_eq!(
            parse_default_interface(Platform::MacOs, output).as_deref(),
            Some("en0")
        );
        assert_eq!(parse_default_interface(Platform::MacOs, "gateway: x\n"), None);
    }

    #[test]
    fn test_ipv6_address_command_per_platform() {
        let config = client_global_config();
        let linux = ipv6_address_command(Platform::Linux, &config, "tun0").unwrap();
        assert_eq!(linux.to_string(), "ip -6 addr add fd00::2/64 dev tun0");

        let macos = ipv6_address_command(Platform::MacOs, &config, "utun3").unwrap();
        assert_eq!(
            macos.to_string(),
            "ifconfig utun3 inet6 add fd00::2 prefixlen 64"
        );

        assert!(ipv6_address_command(Platform::Unsupported, &config, "tun0").is_none());
    }
}
