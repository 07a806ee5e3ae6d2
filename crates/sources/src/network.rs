//! Network screen fields
//!
//! Addresses come from `ip -4 -o addr show`, one line per address in kernel
//! interface index order, e.g.
//!
//! ```text
//! 2: eth0    inet 192.168.1.50/24 brd 192.168.1.255 scope global eth0\       valid_lft forever preferred_lft forever
//! ```

use crate::command::run_command;
use crate::error::MetricResult;
use log::debug;
use oled_sens_types::{ConnectionKind, NetworkStatus, Reading};
use std::net::Ipv4Addr;
use std::time::Duration;

/// IP line shown when the host has no usable address
pub const NO_IP_LABEL: &str = "No IP";

const IP_ADDR_COMMAND: &[&str] = &["ip", "-4", "-o", "addr", "show"];
const SSID_COMMAND: &[&str] = &["iwgetid", "-r"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    pub interface: String,
    pub address: Ipv4Addr,
}

impl InterfaceAddress {
    pub fn is_loopback(&self) -> bool {
        self.interface == "lo" || self.address.is_loopback()
    }

    pub fn kind(&self) -> ConnectionKind {
        let name = self.interface.as_str();
        if name.starts_with("eth") || name.starts_with("en") {
            ConnectionKind::Ethernet
        } else if name.starts_with("wl") {
            ConnectionKind::Wifi
        } else {
            ConnectionKind::Connected
        }
    }
}

/// Parse `ip -4 -o addr show` output, keeping line order
///
/// Lines that do not carry an `inet` address are skipped.
pub fn parse_ip_addr_output(output: &str) -> Vec<InterfaceAddress> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let _index = fields.next()?;
            // Virtual links show up as "veth0@if5"
            let interface = fields.next()?.split('@').next()?.trim_end_matches(':');
            let mut rest = fields.skip_while(|f| *f != "inet");
            rest.next()?;
            let address = rest.next()?.split('/').next()?.parse().ok()?;
            Some(InterfaceAddress {
                interface: interface.to_string(),
                address,
            })
        })
        .collect()
}

/// The address the screen reports: the first non-loopback one
pub fn select_address(addresses: &[InterfaceAddress]) -> Option<&InterfaceAddress> {
    addresses.iter().find(|a| !a.is_loopback())
}

/// Network status from already-parsed addresses and an SSID lookup
///
/// The lookup only runs when the chosen interface is wireless.
pub(crate) fn status_from<F>(addresses: &[InterfaceAddress], ssid: F) -> NetworkStatus
where
    F: FnOnce() -> MetricResult<String>,
{
    let Some(selected) = select_address(addresses) else {
        return NetworkStatus {
            kind: ConnectionKind::Disconnected,
            ssid: Reading::Unavailable,
            ip: Reading::value(NO_IP_LABEL),
        };
    };

    let kind = selected.kind();
    let ssid = if kind == ConnectionKind::Wifi {
        match ssid() {
            Ok(name) if !name.is_empty() => Reading::Value(name),
            Ok(_) => Reading::Unavailable,
            Err(e) => {
                debug!("SSID lookup failed: {}", e);
                Reading::Unavailable
            }
        }
    } else {
        Reading::Unavailable
    };

    NetworkStatus {
        kind,
        ssid,
        ip: Reading::value(selected.address.to_string()),
    }
}

/// Probe the live system
pub(crate) fn network_status(timeout: Duration) -> MetricResult<NetworkStatus> {
    let output = run_command(IP_ADDR_COMMAND, timeout)?;
    let addresses = parse_ip_addr_output(&output);
    debug!("Found {} IPv4 addresses", addresses.len());
    Ok(status_from(&addresses, || run_command(SSID_COMMAND, timeout)))
}
