// src/parse.rs

//! Parsers for `ps` output.
//!
//! These turn the raw text captured by the dispatcher into container names
//! and published ports. They only understand the classic tabular layout:
//!
//! ```text
//!       Name           Command      State          Ports
//! ---------------------------------------------------------------
//! proj_web_1    nginx -g daemon off   Up      0.0.0.0:8080->80/tcp
//! ```

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;

static PORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(\d{1,3}(?:\.\d{1,3}){3}):)?(\d+)->(\d+)/tcp").expect("valid port regex")
});

/// Semantic service names found in `ps` output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerNames(BTreeSet<String>);

impl ContainerNames {
    pub fn parse_from_ps(output: &str) -> Self {
        let names = output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !is_header(line))
            .filter_map(|line| line.split_whitespace().next())
            .map(semantic_name)
            .collect();
        Self(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn is_header(line: &str) -> bool {
    line.starts_with("---") || line.split_whitespace().next() == Some("Name")
}

/// `proj_web_1` -> `web`, `web_1` -> `web`, anything else unchanged.
fn semantic_name(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('_').collect();
    let numbered = parts.last().is_some_and(|p| p.chars().all(|c| c.is_ascii_digit()));

    match parts.len() {
        n if n >= 3 && numbered => parts[1..n - 1].join("_"),
        2 if numbered => parts[0].to_string(),
        _ => raw.to_string(),
    }
}

/// One published port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub ip: IpAddr,
    pub external: u16,
    pub internal: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ports(Vec<PortMapping>);

impl Ports {
    /// Collect every `[ip:]external->internal/tcp` entry. An unspecified
    /// address (`0.0.0.0` or none) is replaced with `host_ip`.
    pub fn parse_from_ps(output: &str, host_ip: IpAddr) -> Self {
        let ports = PORT_RE
            .captures_iter(output)
            .filter_map(|caps| {
                let ip = match caps.get(1).map(|m| m.as_str().parse::<IpAddr>()) {
                    Some(Ok(ip)) if !ip.is_unspecified() => ip,
                    Some(Err(_)) => return None,
                    _ => host_ip,
                };
                let external = caps[2].parse().ok()?;
                let internal = caps[3].parse().ok()?;
                Some(PortMapping {
                    ip,
                    external,
                    internal,
                })
            })
            .collect();
        Self(ports)
    }

    /// The mapping for a given container port, if published.
    pub fn port(&self, internal: u16) -> Option<&PortMapping> {
        self.0.iter().find(|p| p.internal == internal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortMapping> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use proptest::prelude::*;

    use super::*;

    const LOCAL: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn single_line_without_header() {
        let names = ContainerNames::parse_from_ps("web_1   Up   0.0.0.0:8080->80/tcp");
        assert!(names.contains("web"));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn header_and_separator_are_skipped() {
        let output = "\
      Name             Command         State           Ports
-------------------------------------------------------------------
proj_db_1        postgres            Up      5432/tcp
proj_web_app_1   nginx -g daemon     Up      0.0.0.0:8080->80/tcp
";
        let names = ContainerNames::parse_from_ps(output);
        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["db", "web_app"]);
    }

    #[test]
    fn unnumbered_names_are_kept_verbatim() {
        let names = ContainerNames::parse_from_ps("standalone  Up");
        assert!(names.contains("standalone"));
    }

    #[test]
    fn empty_output_has_no_names() {
        assert!(ContainerNames::parse_from_ps("").is_empty());
    }

    #[test]
    fn unspecified_ip_is_replaced_by_host_ip() {
        let host: IpAddr = "192.168.99.100".parse().unwrap();
        let ports = Ports::parse_from_ps("web_1  Up  0.0.0.0:8080->80/tcp", host);

        assert_eq!(
            ports.port(80),
            Some(&PortMapping {
                ip: host,
                external: 8080,
                internal: 80
            })
        );
    }

    #[test]
    fn multiple_ports_and_explicit_ips() {
        let output = "db_1  Up  127.0.0.1:5433->5432/tcp, 0.0.0.0:9000->9000/tcp, 6379/tcp";
        let ports = Ports::parse_from_ps(output, LOCAL);

        assert_eq!(ports.len(), 2);
        assert_eq!(ports.port(5432).map(|p| p.external), Some(5433));
        assert_eq!(ports.port(9000).map(|p| p.ip), Some(LOCAL));
        assert!(ports.port(6379).is_none());
    }

    proptest! {
        #[test]
        fn project_and_index_are_stripped(service in "[a-z]{1,10}", index in 1u32..50) {
            let line = format!("proj_{service}_{index}   Up");
            let names = ContainerNames::parse_from_ps(&line);
            prop_assert!(names.contains(&service));
        }
    }
}
