//! Endpoint strings: drive path derivation and server display names.

use std::net::IpAddr;
use url::Url;

/// Path component of a drive endpoint, for drives that carry no `path`.
///
/// `https://node1:21000/hadoop/data1/minio` → `data1/minio`,
/// `https://node1:9000/data1/minio` → `/data1/minio`.
pub fn path_from_endpoint(endpoint: &str) -> String {
    if let Some((_, rest)) = endpoint.split_once("/hadoop/") {
        return rest.to_string();
    }
    let parts: Vec<&str> = endpoint.splitn(4, '/').collect();
    if parts.len() == 4 {
        format!("/{}", parts[3])
    } else {
        String::new()
    }
}

/// Host part of an endpoint, without scheme, port or path.
pub fn host_of(endpoint: &str) -> String {
    let parsed = if endpoint.contains("://") {
        Url::parse(endpoint).ok()
    } else if endpoint.contains('/') {
        Url::parse(&format!("http://{}", endpoint)).ok()
    } else {
        None
    };

    if let Some(host) = parsed.as_ref().and_then(Url::host_str) {
        return host.trim_start_matches('[').trim_end_matches(']').to_string();
    }
    strip_port(endpoint).to_string()
}

fn strip_port(host: &str) -> &str {
    if let Some(inner) = host.strip_prefix('[') {
        return inner.split(']').next().unwrap_or(inner);
    }
    match host.rsplit_once(':') {
        // a bare IPv6 address has more than one colon
        Some((h, port)) if !h.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    }
}

/// Server name as displayed.
///
/// IP hosts are shown unchanged. With an empty `suffix` only the first DNS
/// label is kept; otherwise `suffix` and a trailing dot are removed.
pub fn display_host(endpoint: &str, suffix: &str) -> String {
    let host = host_of(endpoint);
    if let Ok(ip) = host.parse::<IpAddr>() {
        return ip.to_string();
    }
    if suffix.is_empty() {
        return host.split('.').next().unwrap_or_default().to_string();
    }
    let trimmed = host.strip_suffix(suffix).unwrap_or(&host);
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_endpoint() {
        assert_eq!(path_from_endpoint("https://server.example.com:9000/data1/minio"), "/data1/minio");
        assert_eq!(path_from_endpoint("https://server.example.com:21000/hadoop/data1/minio"), "data1/minio");
        assert_eq!(path_from_endpoint("server:9000"), "");
        assert_eq!(path_from_endpoint("http://host"), "");
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://node1.example.com:9000/data1"), "node1.example.com");
        assert_eq!(host_of("node1.example.com:9000"), "node1.example.com");
        assert_eq!(host_of("node1.example.com:9000/data"), "node1.example.com");
        assert_eq!(host_of("[::1]:9000"), "::1");
        assert_eq!(host_of("node1"), "node1");
    }

    #[test]
    fn test_display_host_first_label() {
        assert_eq!(display_host("node1.rack2.example.com:9000", ""), "node1");
        assert_eq!(display_host("https://node1.example.com:9000", ""), "node1");
    }

    #[test]
    fn test_display_host_suffix() {
        assert_eq!(display_host("node1.rack2.example.com:9000", "example.com"), "node1.rack2");
        assert_eq!(display_host("node1.rack2.example.com:9000", ".example.com"), "node1.rack2");
        assert_eq!(display_host("node1.other.org:9000", "example.com"), "node1.other.org");
    }

    #[test]
    fn test_display_host_ip_unchanged() {
        assert_eq!(display_host("10.0.0.5:9000", ""), "10.0.0.5");
        assert_eq!(display_host("http://192.168.1.20:9000/data", "example.com"), "192.168.1.20");
        assert_eq!(display_host("[fe80::1]:9000", ""), "fe80::1");
    }
}
