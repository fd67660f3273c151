use crate::inventory::domain::HostInfo;
use crate::ports::HostProbe;
use crate::shared::{Result, SbomError};
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::process::Command;
use std::time::Duration;

/// Timeout for each public-IP service attempt.
const PUBLIC_IP_TIMEOUT: Duration = Duration::from_secs(5);

/// An IP address string can be at most 45 characters (full IPv6).
/// Anything longer from an external service is rejected outright.
const MAX_IP_RESPONSE_LEN: usize = 45;

const PUBLIC_IP_SERVICES: [&str; 3] = [
    "https://api.ipify.org",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
];

/// SysinfoHostProbe adapter for gathering host metadata.
///
/// Hostname, OS identity and interface addresses come from sysinfo;
/// logged-in users come from `who` / `query user` since no session
/// enumeration exists in the library. The public IP lookup is the only
/// network access in the whole binary and is opt-in.
pub struct SysinfoHostProbe;

impl SysinfoHostProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SysinfoHostProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe for SysinfoHostProbe {
    fn probe(&self, fetch_public_ip: bool) -> Result<HostInfo> {
        let hostname = sysinfo::System::host_name().ok_or_else(|| SbomError::HostProbe {
            details: "hostname unavailable".to_string(),
        })?;

        let os_name = sysinfo::System::name().unwrap_or_else(|| "unknown".to_string());
        let os_version = sysinfo::System::os_version().unwrap_or_else(|| "unknown".to_string());

        Ok(HostInfo {
            hostname,
            os_name,
            os_version,
            users: logged_in_users(),
            local_ips: local_ips(),
            public_ip: if fetch_public_ip { fetch_public_ip_address() } else { None },
        })
    }
}

/// Non-loopback interface addresses; link-local and unique-local IPv6
/// are skipped to match what an inventory consumer can actually route
/// to.
fn local_ips() -> Vec<String> {
    let networks = sysinfo::Networks::new_with_refreshed_list();
    let mut ips = BTreeSet::new();
    for (_interface, data) in networks.iter() {
        for network in data.ip_networks() {
            match network.addr {
                IpAddr::V4(v4) => {
                    if !v4.is_loopback() && !v4.is_link_local() {
                        ips.insert(v4.to_string());
                    }
                }
                IpAddr::V6(v6) => {
                    let first = v6.segments()[0];
                    let link_local = (first & 0xffc0) == 0xfe80;
                    let unique_local = (first & 0xfe00) == 0xfc00;
                    if !v6.is_loopback() && !link_local && !unique_local {
                        ips.insert(v6.to_string());
                    }
                }
            }
        }
    }
    ips.into_iter().collect()
}

/// Best-effort list of currently logged-in users. An empty list is
/// fine; the property is simply omitted from the document then.
fn logged_in_users() -> Vec<String> {
    let output = if cfg!(windows) {
        Command::new("query").arg("user").output()
    } else {
        Command::new("who").output()
    };

    let Ok(output) = output else {
        return Vec::new();
    };
    let text = String::from_utf8_lossy(&output.stdout);

    let mut users = BTreeSet::new();
    for (i, line) in text.lines().enumerate() {
        if cfg!(windows) && i == 0 {
            continue; // header row
        }
        if let Some(user) = line.split_whitespace().next() {
            users.insert(user.trim_start_matches('>').to_string());
        }
    }
    users.into_iter().collect()
}

fn fetch_public_ip_address() -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(PUBLIC_IP_TIMEOUT)
        .build()
        .ok()?;

    for service in PUBLIC_IP_SERVICES {
        let Ok(response) = client.get(service).send() else {
            continue;
        };
        if !response.status().is_success() {
            continue;
        }
        let Ok(body) = response.text() else {
            continue;
        };
        let candidate = body.trim();
        if is_valid_public_ip(candidate) {
            return Some(candidate.to_string());
        }
    }
    None
}

/// Strict validation of an IP string received from an untrusted
/// external service: must parse, must not be a private/loopback/
/// multicast address, must be a sane length.
fn is_valid_public_ip(candidate: &str) -> bool {
    if candidate.len() > MAX_IP_RESPONSE_LEN {
        return false;
    }
    let Ok(ip) = candidate.parse::<IpAddr>() else {
        return false;
    };
    match ip {
        IpAddr::V4(v4) => {
            !v4.is_loopback() && !v4.is_private() && !v4.is_link_local() && !v4.is_multicast()
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            let link_local = (first & 0xffc0) == 0xfe80;
            let unique_local = (first & 0xfe00) == 0xfc00;
            !v6.is_loopback() && !v6.is_multicast() && !link_local && !unique_local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_public_ip_accepts_public_addresses() {
        assert!(is_valid_public_ip("203.0.113.7"));
        assert!(is_valid_public_ip("2001:db8::1"));
    }

    #[test]
    fn test_is_valid_public_ip_rejects_private_and_loopback() {
        assert!(!is_valid_public_ip("127.0.0.1"));
        assert!(!is_valid_public_ip("10.0.0.5"));
        assert!(!is_valid_public_ip("192.168.1.10"));
        assert!(!is_valid_public_ip("169.254.0.1"));
        assert!(!is_valid_public_ip("::1"));
        assert!(!is_valid_public_ip("fe80::1"));
        assert!(!is_valid_public_ip("fd00::1"));
    }

    #[test]
    fn test_is_valid_public_ip_rejects_garbage() {
        assert!(!is_valid_public_ip(""));
        assert!(!is_valid_public_ip("<html>error</html>"));
        assert!(!is_valid_public_ip("203.0.113.7; rm -rf /"));
        assert!(!is_valid_public_ip(&"1".repeat(100)));
    }

    #[test]
    fn test_probe_without_public_ip_never_touches_network() {
        // sysinfo may legitimately fail in minimal containers; only
        // assert the shape when a hostname exists.
        if let Ok(info) = SysinfoHostProbe::new().probe(false) {
            assert!(!info.hostname.is_empty());
            assert!(info.public_ip.is_none());
        }
    }
}
