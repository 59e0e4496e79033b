// src/netutil.rs  (linux-only)
//
// Local IPv4 lookup for the standby screen. Interfaces are tried in a fixed
// priority order: wireless first, then wired, then USB gadget adapters
// (kernel "enx<mac>" names).

use local_ip_address::list_afinet_netifas;
use log::warn;
use std::net::IpAddr;

pub const NOT_CONNECTED: &str = "Not connected";

/// Best local IPv4 address as text, or the "Not connected" sentinel. Never
/// fails: an enumeration error is logged and degrades to the sentinel.
pub fn local_ipv4() -> String {
    match list_afinet_netifas() {
        Ok(ifas) => pick_ipv4(&ifas),
        Err(e) => {
            warn!("network interface enumeration failed: {}", e);
            NOT_CONNECTED.to_string()
        }
    }
}

fn pick_ipv4(ifas: &[(String, IpAddr)]) -> String {
    let priority: [fn(&str) -> bool; 3] = [
        |name| name.starts_with("wlan"),
        |name| name.starts_with("eth"),
        |name| name.starts_with("enx"),
    ];
    for matches in priority {
        for (name, addr) in ifas {
            if let IpAddr::V4(v4) = addr {
                if matches(name) && !v4.is_loopback() {
                    return v4.to_string();
                }
            }
        }
    }
    NOT_CONNECTED.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn ifa(name: &str, a: u8, b: u8, c: u8, d: u8) -> (String, IpAddr) {
        (name.to_string(), IpAddr::V4(Ipv4Addr::new(a, b, c, d)))
    }

    #[test]
    fn test_wireless_beats_wired() {
        let ifas = vec![
            ifa("eth0", 10, 0, 0, 2),
            ifa("wlan0", 192, 168, 0, 17),
        ];
        assert_eq!(pick_ipv4(&ifas), "192.168.0.17");
    }

    #[test]
    fn test_usb_gadget_last() {
        let ifas = vec![ifa("enxb827eb488a6e", 10, 42, 0, 1)];
        assert_eq!(pick_ipv4(&ifas), "10.42.0.1");
    }

    #[test]
    fn test_no_reachable_interface() {
        let ifas = vec![
            ifa("lo", 127, 0, 0, 1),
            ifa("docker0", 172, 17, 0, 1),
        ];
        assert_eq!(pick_ipv4(&ifas), NOT_CONNECTED);
        assert_eq!(pick_ipv4(&[]), NOT_CONNECTED);
    }
}
