//! Settings of the application, read from `settings.toml` and from
//! `MINHAS_FINANCAS__`-prefixed environment variables.
//!
//! ```toml
//! [app]
//! level = "info"
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 3000
//! database = { sqlite = "minhas_financas.db" }
//! ```
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const ENV_PREFIX: &str = "MINHAS_FINANCAS";

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    /// Load `path` (extension optional) layered with the environment.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    #[cfg(test)]
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(content, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_settings() {
        let settings = Settings::from_toml(
            r#"
            [app]
            level = "debug"

            [server]
            bind = "0.0.0.0"
            port = 8080
            database = { sqlite = "finances.db" }
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.level, "debug");
        let server = settings.server.unwrap();
        assert_eq!(server.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, 8080);
        assert_eq!(server.database, Database::Sqlite("finances.db".to_string()));
    }

    #[test]
    fn defaults_and_memory_database() {
        let settings = Settings::from_toml(
            r#"
            [server]
            port = 3000
            database = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(settings.app.level, "info");
        let server = settings.server.unwrap();
        assert_eq!(server.bind, None);
        assert_eq!(server.database, Database::Memory);
    }

    #[test]
    fn server_section_is_optional() {
        let settings = Settings::from_toml("[app]\nlevel = \"warn\"\n").unwrap();

        assert!(settings.server.is_none());
    }
}
