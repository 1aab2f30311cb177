//! Tests for merging CLI and TOML into `ValidatedConfig`.

use super::{Cli, ConfigError, TomlConfig, ValidatedConfig, write_default_config};
use std::io::Write;
use std::time::Duration;
use tempfile::{NamedTempFile, tempdir};

/// Parses CLI arguments for the `verify-key` command, with environment
/// secrets cleared so the tests only see what they pass.
fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["lystica"];
    full.extend_from_slice(args);
    full.push("verify-key");

    let mut cli = Cli::parse_from_iter(full);
    if !args.contains(&"--api-key") {
        cli.api_key = None;
    }
    if !args.contains(&"--signing-secret") {
        cli.signing_secret = None;
    }
    cli
}

fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod defaults {
    use super::*;

    #[test]
    fn empty_sources_use_builtin_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert!(config.api_key.is_none());
        assert_eq!(config.base_url.as_str(), "https://api.lystica.cloud/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 2);
        assert!(config.signing_secret.is_none());
        assert_eq!(config.webhook_tolerance, Duration::from_secs(300));
        assert!(!config.verbose);
    }

    #[test]
    fn verbose_flag_is_carried() {
        let config = ValidatedConfig::from_raw(&cli(&["-v"]), None).unwrap();

        assert!(config.verbose);
    }
}

mod precedence {
    use super::*;

    const TOML: &str = r#"
        [client]
        api_key = "lys_test_fromtoml"
        base_url = "http://toml.local"
        timeout = 10
        max_retries = 4

        [webhook]
        signing_secret = "whsec_toml"
        tolerance = 60
    "#;

    #[test]
    fn toml_overrides_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml(TOML))).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("lys_test_fromtoml"));
        assert_eq!(config.base_url.as_str(), "http://toml.local/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.signing_secret.as_deref(), Some("whsec_toml"));
        assert_eq!(config.webhook_tolerance, Duration::from_secs(60));
    }

    #[test]
    fn cli_overrides_toml() {
        let cli = cli(&[
            "--api-key",
            "lys_live_fromcli",
            "--base-url",
            "https://cli.local",
            "--timeout",
            "3",
            "--max-retries",
            "0",
            "--signing-secret",
            "whsec_cli",
        ]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML))).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("lys_live_fromcli"));
        assert_eq!(config.base_url.as_str(), "https://cli.local/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.signing_secret.as_deref(), Some("whsec_cli"));
    }

    #[test]
    fn partial_cli_keeps_remaining_toml_values() {
        let cli = cli(&["--timeout", "7"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&toml(TOML))).unwrap();

        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.api_key.as_deref(), Some("lys_test_fromtoml"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn malformed_api_key_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--api-key", "sk_abc"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidApiKey { .. })));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--base-url", "not a url"]), None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&["--timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn zero_tolerance_is_rejected() {
        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml("[webhook]\ntolerance = 0\n")));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "tolerance",
                ..
            })
        ));
    }

    #[test]
    fn empty_api_key_in_toml_counts_as_absent() {
        let config =
            ValidatedConfig::from_raw(&cli(&[]), Some(&toml("[client]\napi_key = \"\"\n"))).unwrap();

        assert!(config.api_key.is_none());
    }
}

mod required_on_demand {
    use super::*;

    #[test]
    fn client_config_requires_api_key() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert!(matches!(
            config.client_config(),
            Err(ConfigError::MissingRequired {
                field: "api_key",
                ..
            })
        ));
    }

    #[test]
    fn client_config_carries_merged_values() {
        let cli = cli(&["--api-key", "lys_test_abc", "--timeout", "9", "--max-retries", "1"]);
        let client = ValidatedConfig::from_raw(&cli, None)
            .unwrap()
            .client_config()
            .unwrap();

        assert_eq!(client.api_key, "lys_test_abc");
        assert_eq!(client.base_url, "https://api.lystica.cloud/");
        assert_eq!(client.timeout, Duration::from_secs(9));
        assert_eq!(client.max_retries, 1);
    }

    #[test]
    fn signing_secret_is_required_when_asked_for() {
        let config = ValidatedConfig::from_raw(&cli(&[]), None).unwrap();

        assert!(matches!(
            config.signing_secret(),
            Err(ConfigError::MissingRequired {
                field: "signing_secret",
                ..
            })
        ));
    }

    #[test]
    fn display_and_debug_hide_secrets() {
        let cli = cli(&["--api-key", "lys_live_topsecret", "--signing-secret", "whsec_hidden"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        for rendered in [config.to_string(), format!("{config:?}")] {
            assert!(!rendered.contains("topsecret"), "{rendered}");
            assert!(!rendered.contains("whsec_hidden"), "{rendered}");
        }
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nmax_retries = 7").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = cli(&["-c", &path]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.max_retries, 7);
    }

    #[test]
    fn load_without_config_file_uses_defaults() {
        let config = ValidatedConfig::load(&cli(&[])).unwrap();

        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn load_reports_missing_file() {
        let cli = cli(&["-c", "/nonexistent/lystica.toml"]);

        assert!(matches!(
            ValidatedConfig::load(&cli),
            Err(ConfigError::FileRead { .. })
        ));
    }

    #[test]
    fn written_default_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lystica.toml");

        write_default_config(&path).unwrap();
        let loaded = TomlConfig::load(&path).unwrap();

        assert_eq!(loaded.client.timeout, Some(30));
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("lystica.toml");

        assert!(matches!(
            write_default_config(&path),
            Err(ConfigError::FileWrite { .. })
        ));
    }
}
