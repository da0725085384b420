//! Client address resolution for rate limiting and record keeping.
//!
//! The transport peer is authoritative. `X-Forwarded-For` is read only when the
//! peer is a configured trusted proxy. Proxies append on the right, so the
//! header is walked right to left past trusted hops; the first untrusted entry
//! is the client. Anything left of it was written by the client and is ignored.

use std::future::{ready, Ready};
use std::net::{IpAddr, SocketAddr};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use super::app_state;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Rate-limit key shared by every request without a known address.
pub const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp {
    pub ip: Option<IpAddr>,
}

impl ClientIp {
    pub fn resolve(peer: Option<IpAddr>, forwarded_for: Option<&str>, state: &AppState) -> Self {
        let peer = peer.map(|ip| ip.to_canonical());
        let ip = match (peer, forwarded_for) {
            (Some(p), Some(header)) if state.is_trusted_proxy(p) => {
                forwarded_client(header, state).or(Some(p))
            }
            _ => peer,
        };
        Self { ip }
    }

    /// Loopback clients (including IPv4-mapped) skip rate limiting.
    pub fn is_loopback(&self) -> bool {
        self.ip.is_some_and(|ip| ip.to_canonical().is_loopback())
    }

    pub fn rate_key(&self) -> String {
        self.ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    }

    /// Value written to `ip_address`; empty when unknown.
    pub fn stored_ip(&self) -> String {
        self.ip.map(|ip| ip.to_string()).unwrap_or_default()
    }
}

// An unparseable hop ends the walk: nothing left of it can be attributed.
fn forwarded_client(header: &str, state: &AppState) -> Option<IpAddr> {
    for entry in header.rsplit(',').map(str::trim) {
        let ip = parse_hop(entry)?;
        if !state.is_trusted_proxy(ip) {
            return Some(ip);
        }
    }
    None
}

fn parse_hop(entry: &str) -> Option<IpAddr> {
    entry
        .parse::<IpAddr>()
        .ok()
        .or_else(|| entry.parse::<SocketAddr>().ok().map(|s| s.ip()))
        .map(|ip| ip.to_canonical())
}

impl FromRequest for ClientIp {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(app_state(req).map(|state| {
            let forwarded = req
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok());
            ClientIp::resolve(req.peer_addr().map(|a| a.ip()), forwarded, state)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::state::StateBuilder;
    use crate::state::security_config::SecurityConfig;

    fn builder() -> StateBuilder {
        StateBuilder::new(SecurityConfig::for_tests())
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn untrusted_peer_ignores_forwarded_for() {
        let state = builder().build();
        let client = ClientIp::resolve(Some(ip("203.0.113.7")), Some("1.2.3.4"), &state);
        assert_eq!(client.ip, Some(ip("203.0.113.7")));
    }

    #[test]
    fn trusted_proxy_uses_rightmost_untrusted_entry() {
        let state = builder()
            .with_trusted_proxies(vec![ip("10.0.0.1"), ip("10.0.0.2")])
            .build();

        let client = ClientIp::resolve(
            Some(ip("10.0.0.1")),
            Some("192.0.2.9, 198.51.100.2:4711, 10.0.0.2"),
            &state,
        );
        assert_eq!(client.ip, Some(ip("198.51.100.2")));

        let client = ClientIp::resolve(Some(ip("10.0.0.1")), Some("nonsense"), &state);
        assert_eq!(client.ip, Some(ip("10.0.0.1")));

        let client = ClientIp::resolve(Some(ip("10.0.0.1")), Some("10.0.0.2"), &state);
        assert_eq!(client.ip, Some(ip("10.0.0.1")));
    }

    #[test]
    fn forged_leftmost_entries_are_ignored() {
        let state = builder()
            .with_trusted_proxies(vec![ip("10.0.0.5")])
            .build();

        for forged in ["127.0.0.1", "1.1.1.1", "garbage", "::1"] {
            let header = format!("{forged}, 198.51.100.9");
            let client = ClientIp::resolve(Some(ip("10.0.0.5")), Some(&header), &state);
            assert_eq!(client.ip, Some(ip("198.51.100.9")));
            assert!(!client.is_loopback());
        }
    }

    #[test]
    fn garbage_hop_stops_the_walk_at_the_proxy() {
        let state = builder()
            .with_trusted_proxies(vec![ip("10.0.0.5")])
            .build();

        let client = ClientIp::resolve(Some(ip("10.0.0.5")), Some("198.51.100.9, junk"), &state);
        assert_eq!(client.ip, Some(ip("10.0.0.5")));
    }

    #[test]
    fn loopback_detection_covers_mapped_addresses() {
        let state = builder().build();
        for addr in ["127.0.0.1", "::1", "::ffff:127.0.0.1"] {
            assert!(ClientIp::resolve(Some(ip(addr)), None, &state).is_loopback());
        }
        assert!(!ClientIp::resolve(Some(ip("192.0.2.1")), None, &state).is_loopback());
    }

    #[test]
    fn missing_peer_is_unknown() {
        let client = ClientIp::resolve(None, Some("1.2.3.4"), &builder().build());
        assert_eq!(client.rate_key(), UNKNOWN_CLIENT);
        assert_eq!(client.stored_ip(), "");
        assert!(!client.is_loopback());
    }
}
