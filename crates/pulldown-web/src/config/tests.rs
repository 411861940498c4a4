#[cfg(test)]
mod tests {
    use super::super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.data.path, "data/proteomics_lfc.csv.gz");
        assert_eq!(config.table.page_size, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.string_db.species, 7227);
        assert_eq!(config.string_db.gene_limit, 550);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_default_string_settings_match_client_defaults() {
        let settings = StringDbConfig::default().settings();
        assert_eq!(settings, StringDbSettings::default());
        assert_eq!(StringDbConfig::default().pause(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9000

            [string_db]
            caller_identity = "pulldown-test"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.bind_address(), "127.0.0.1:9000");

        let settings = config.string_db.settings();
        assert_eq!(settings.caller_identity, "pulldown-test");
        assert_eq!(settings.network_flavor, "confidence");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = Config::from_toml("[table]\npage_size = 0\n").unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("absent.toml")).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.table.page_size, 10);
    }

    #[test]
    fn test_load_from_file_records_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\npath = \"fixtures/small.csv\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.data.path, "fixtures/small.csv");
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = Config::from_toml(include_str!("../../../../pulldown.example.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.data.path, defaults.data.path);
        assert_eq!(config.string_db.settings(), defaults.string_db.settings());
        assert_eq!(config.string_db.gene_limit, defaults.string_db.gene_limit);
        assert_eq!(config.table.page_size, defaults.table.page_size);
    }
}
