//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.client.api_key.is_none());
        assert!(config.client.base_url.is_none());
        assert!(config.webhook.signing_secret.is_none());
    }

    #[test]
    fn parse_client_section() {
        let toml = r#"
            [client]
            api_key = "lys_test_abc"
            base_url = "http://localhost:8080"
            timeout = 10
            max_retries = 5
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        let client = &config.client;

        assert_eq!(client.api_key.as_deref(), Some("lys_test_abc"));
        assert_eq!(client.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(client.timeout, Some(10));
        assert_eq!(client.max_retries, Some(5));
    }

    #[test]
    fn parse_webhook_section() {
        let toml = r#"
            [webhook]
            signing_secret = "whsec_abc"
            tolerance = 120
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.webhook.signing_secret.as_deref(), Some("whsec_abc"));
        assert_eq!(config.webhook.tolerance, Some(120));
    }
}

mod errors {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn unknown_section_is_rejected() {
        let result = TomlConfig::parse("[monitor]\npoll_interval = 60\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = TomlConfig::parse("[client]\napi_secret = \"x\"\n");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = TomlConfig::parse("[client]\ntimeout = \"thirty\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn negative_retries_are_rejected() {
        assert!(TomlConfig::parse("[client]\nmax_retries = -1\n").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::path::Path::new("/nonexistent/lystica.toml");
        let result = TomlConfig::load(path);

        match result {
            Err(ConfigError::FileRead { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected FileRead error, got {other:?}"),
        }
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses_as_valid_config() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.client.timeout, Some(30));
        assert_eq!(config.client.max_retries, Some(2));
        assert!(config.client.api_key.is_none());
    }

    #[test]
    fn template_mentions_environment_variables() {
        let template = default_config_template();

        assert!(template.contains("LYSTICA_API_KEY"));
        assert!(template.contains("LYSTICA_WEBHOOK_SECRET"));
    }
}
