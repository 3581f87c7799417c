//! Tests for main.rs functionality

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::*;
    use asnroutes::Prefix;
    use clap::Parser;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());

        #[cfg(debug_assertions)]
        assert!(version.ends_with("-UNRELEASED"));

        #[cfg(not(debug_assertions))]
        assert!(!version.contains("UNRELEASED"));
    }

    #[test]
    fn test_parse_comma_separated_asns() {
        let args = Args::try_parse_from(["asnroutes", "--as", "15169,AS13335,as64496"]).unwrap();
        assert_eq!(
            args.asns,
            vec![Asn::new(15169), Asn::new(13335), Asn::new(64496)]
        );
        assert!(!args.json);
        assert!(!args.skip_invalid);
        assert_eq!(args.port, 43);
        assert_eq!(args.timeout_ms, 10_000);
    }

    #[test]
    fn test_parse_short_flag_and_options() {
        let args = Args::try_parse_from([
            "asnroutes",
            "-a",
            "64496",
            "--server",
            "whois.example.net",
            "--port",
            "4343",
            "--timeout-ms",
            "250",
            "--json",
            "--skip-invalid",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.asns, vec![Asn::new(64496)]);
        assert_eq!(args.server.as_deref(), Some("whois.example.net"));
        assert_eq!(args.port, 4343);
        assert_eq!(args.timeout_ms, 250);
        assert!(args.json);
        assert!(args.skip_invalid);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_invalid_asn_rejected() {
        assert!(Args::try_parse_from(["asnroutes", "--as", "15169,abc"]).is_err());
        assert!(Args::try_parse_from(["asnroutes", "--as", "-1"]).is_err());
    }

    #[test]
    fn test_asns_required() {
        assert!(Args::try_parse_from(["asnroutes"]).is_err());
    }

    #[test]
    fn test_build_config() {
        let args = Args::try_parse_from([
            "asnroutes",
            "--as",
            "64496",
            "--server",
            "127.0.0.1",
            "--port",
            "4343",
            "--timeout-ms",
            "500",
        ])
        .unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.address(), "127.0.0.1:4343");
        assert_eq!(config.timeout.as_millis(), 500);
    }

    #[test]
    fn test_build_config_rejects_zero_timeout() {
        let args =
            Args::try_parse_from(["asnroutes", "--as", "64496", "--timeout-ms", "0"]).unwrap();
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_json_output() {
        let table: RouteTable = ["192.0.2.0/24", "2001:db8::/32"]
            .iter()
            .map(|s| Prefix::parse(s).unwrap())
            .collect();
        let output = json_output(&[Asn::new(64496)], &table);
        assert_eq!(output.asns, vec!["AS64496"]);
        assert_eq!(output.ipv4, vec!["192.0.2.0/24"]);
        assert_eq!(output.ipv6, vec!["2001:db8::/32"]);

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["version"], get_version());
    }
}
