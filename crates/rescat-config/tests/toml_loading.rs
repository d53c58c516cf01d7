//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use rescat_config::{ConfigError, RescatConfig};

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind = "0.0.0.0:8080"
allowed_origins = ["https://catalog.example.org", "http://localhost:5173"]
max_upload_bytes = 2048

[database]
path = "/var/lib/rescat/catalog.db"

[pagination]
default_per_page = 25
max_per_page = 50
"#,
        )?;

        let config: RescatConfig = Figment::from(Serialized::defaults(RescatConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.server.allowed_origins.len(), 2);
        assert_eq!(config.server.max_upload_bytes, 2048);
        assert_eq!(config.database.path, "/var/lib/rescat/catalog.db");
        assert_eq!(config.pagination.default_per_page, 25);
        assert_eq!(config.pagination.max_per_page, 50);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = ":memory:"
"#,
        )?;

        let config: RescatConfig = Figment::from(Serialized::defaults(RescatConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.database.is_in_memory());
        assert_eq!(config.server, RescatConfig::default().server);
        assert_eq!(config.pagination.default_per_page, 10);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".rescat")?;
        jail.create_file(
            ".rescat/config.toml",
            r#"
[server]
bind = "127.0.0.1:4000"
"#,
        )?;

        let config = RescatConfig::load().expect("config loads");
        assert_eq!(config.server.bind, "127.0.0.1:4000");
        Ok(())
    });
}

#[test]
fn inconsistent_pagination_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[pagination]
default_per_page = 200
max_per_page = 100
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(RescatConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = RescatConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn malformed_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[pagination]
max_per_page = "lots"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(RescatConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = RescatConfig::from_figment(&figment).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
