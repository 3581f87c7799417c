//! Extraction of route prefixes from RPSL whois output

use crate::error::RegistryError;
use crate::prefix::Prefix;
use regex::Regex;
use std::sync::LazyLock;

static ROUTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^route6?:\s+(.+)$").expect("route line pattern is valid")
});

/// How to treat a `route:` line whose value is not a valid CIDR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidRoutePolicy {
    /// Fail the whole lookup
    #[default]
    Abort,
    /// Log a warning and skip the line
    Skip,
}

/// Return the CIDR text of a `route:` or `route6:` line
///
/// Other attributes, and lines without a value, yield `None`.
pub fn route_text(line: &str) -> Option<&str> {
    ROUTE_LINE
        .captures(line.trim_end())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|text| !text.is_empty())
}

/// Parse all route prefixes out of a whois response
pub fn parse_routes<I, S>(lines: I, policy: InvalidRoutePolicy) -> Result<Vec<Prefix>, RegistryError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut prefixes = Vec::new();
    for line in lines {
        let line = line.as_ref();
        let Some(text) = route_text(line) else {
            continue;
        };
        match Prefix::parse(text) {
            Ok(prefix) => prefixes.push(prefix),
            Err(source) => match policy {
                InvalidRoutePolicy::Abort => {
                    return Err(RegistryError::InvalidRoute {
                        line: line.to_string(),
                        source,
                    })
                }
                InvalidRoutePolicy::Skip => {
                    tracing::warn!(line, error = %source, "skipping unparseable route");
                }
            },
        }
    }
    Ok(prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADB_SAMPLE: &str = "\
route:          192.0.2.0/24
descr:          Example route
origin:         AS64496
mnt-by:         MAINT-EXAMPLE
source:         RADB

route6:         2001:db8::/32
descr:          Example v6 route
origin:         AS64496
source:         RADB

route:          198.51.100.0/22
origin:         AS64496
";

    #[test]
    fn test_route_text() {
        assert_eq!(route_text("route:          192.0.2.0/24"), Some("192.0.2.0/24"));
        assert_eq!(route_text("route6:\t2001:db8::/32"), Some("2001:db8::/32"));
        assert_eq!(route_text("route:  10.0.0.0/8   \r"), Some("10.0.0.0/8"));
    }

    #[test]
    fn test_route_text_ignores_other_attributes() {
        assert_eq!(route_text("origin:         AS64496"), None);
        assert_eq!(route_text("descr:          route: 10.0.0.0/8"), None);
        assert_eq!(route_text("route66:        10.0.0.0/8"), None);
        assert_eq!(route_text("route:"), None);
        assert_eq!(route_text(""), None);
        assert_eq!(route_text("% This is the RADb whois query server"), None);
    }

    #[test]
    fn test_parse_routes() {
        let prefixes = parse_routes(RADB_SAMPLE.lines(), InvalidRoutePolicy::Abort).unwrap();
        let texts: Vec<String> = prefixes.iter().map(ToString::to_string).collect();
        assert_eq!(texts, vec!["192.0.2.0/24", "2001:db8::/32", "198.51.100.0/22"]);
    }

    #[test]
    fn test_parse_routes_masks_host_bits() {
        let prefixes = parse_routes(["route: 198.51.100.7/22"], InvalidRoutePolicy::Abort).unwrap();
        assert_eq!(prefixes[0].to_string(), "198.51.100.0/22");
    }

    #[test]
    fn test_invalid_route_aborts() {
        let lines = ["route: 192.0.2.0/24", "route: 192.0.2.0/33", "route: 10.0.0.0/8"];
        let err = parse_routes(lines, InvalidRoutePolicy::Abort).unwrap_err();
        match err {
            RegistryError::InvalidRoute { line, .. } => assert_eq!(line, "route: 192.0.2.0/33"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_route_skipped() {
        let lines = ["route: 192.0.2.0/24", "route: not-a-prefix", "route: 10.0.0.0/8"];
        let prefixes = parse_routes(lines, InvalidRoutePolicy::Skip).unwrap();
        assert_eq!(prefixes.len(), 2);
    }

    #[test]
    fn test_empty_response() {
        let lines: Vec<String> = Vec::new();
        assert!(parse_routes(lines, InvalidRoutePolicy::Abort).unwrap().is_empty());
    }
}
