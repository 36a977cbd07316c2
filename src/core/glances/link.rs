//! Network link detection.
//!
//! The client refuses to issue requests when no usable interface is up,
//! which keeps a disconnected panel from stalling on request timeouts.
//! Loopback hosts skip the check.

use std::net::IpAddr;

use sysinfo::Networks;

pub trait NetworkLink {
    fn is_up(&mut self) -> bool;
}

/// Link probe backed by the host's interface table.
///
/// The link counts as up when any non-loopback interface carries a
/// non-loopback address.
pub struct SystemLink {
    networks: Networks,
}

impl SystemLink {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl Default for SystemLink {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkLink for SystemLink {
    fn is_up(&mut self) -> bool {
        self.networks.refresh(true);
        self.networks.iter().any(|(name, data)| {
            name != "lo"
                && data
                    .ip_networks()
                    .iter()
                    .any(|net| !net.addr.is_loopback() && !net.addr.is_unspecified())
        })
    }
}

/// Whether `host` names this machine, so no interface needs to be up to reach it.
pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim();
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok_and(|addr| addr.is_loopback())
}

/// Probe that always reports a fixed state.
#[derive(Debug, Clone, Copy)]
pub struct StaticLink(pub bool);

impl NetworkLink for StaticLink {
    fn is_up(&mut self) -> bool {
        self.0
    }
}
