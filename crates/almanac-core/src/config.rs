use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
    pub logging: LoggingConfig,
}

/// Options applied to every document read.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// Decode `^n`, `^^` and `^'` inside parameter values (RFC 6868).
    pub caret_encoding: bool,
    /// Version assumed until a document declares its own VERSION.
    pub default_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub caret_encoding: bool,
    pub version: String,
    /// Fold threshold in octets. `0` disables folding.
    pub fold_line_length: usize,
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with the default values.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be registered.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("reader.caret_encoding", true)?
            .set_default("reader.default_version", "2.0")?
            .set_default("writer.caret_encoding", false)?
            .set_default("writer.version", "2.0")?
            .set_default("writer.fold_line_length", 75)?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// Variables use the `ALMANAC_` prefix with `__` between nested keys, for
    /// example `ALMANAC_WRITER__FOLD_LINE_LENGTH=0`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // Environment
            .add_source(
                config::Environment::with_prefix("ALMANAC")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reader: ReaderConfig {
                caret_encoding: true,
                default_version: "2.0".to_string(),
            },
            writer: WriterConfig {
                caret_encoding: false,
                version: "2.0".to_string(),
                fold_line_length: 75,
                product_id: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
