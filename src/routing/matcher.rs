//! Host value normalization.
//!
//! # Responsibilities
//! - Turn a raw `Host` header or SNI value into a lookup path
//! - Strip the port, if any
//! - Strip a single trailing dot (fully qualified form)
//!
//! # Design Decisions
//! - Host matching is case-insensitive (RFC 9110), so the value is
//!   lowercased here; the label tree itself compares labels verbatim
//! - Bracketed IPv6 literals keep their brackets; bare IPv6 is left alone

/// Normalize a raw host value for lookup.
pub fn normalize_host(raw: &str) -> String {
    let host = raw.trim();
    let host = strip_port(host);
    let host = host.strip_suffix('.').unwrap_or(host);
    host.to_ascii_lowercase()
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [v6] or [v6]:port, anything else is left as is.
        return match host.find(']') {
            Some(end) => {
                let (addr, rest) = host.split_at(end + 1);
                match rest.strip_prefix(':') {
                    _ if rest.is_empty() => addr,
                    Some(port) if is_port(port) => addr,
                    _ => host,
                }
            }
            None => host,
        };
    }

    match host.rsplit_once(':') {
        // A second colon means a bare IPv6 literal, not a port.
        Some((name, port)) if !name.contains(':') && is_port(port) => name,
        _ => host,
    }
}

fn is_port(port: &str) -> bool {
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}
