mod settings;

use ::config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{BrokerSettings, LoggingSettings, Settings};

/// Prefix of environment variables read by [`load_config`], e.g.
/// `PULLSUB__BROKER__QUEUE_WARN_THRESHOLD=5000`.
pub const ENV_PREFIX: &str = "PULLSUB";

/// Loads the configuration from `config/default`, a `.env` file and
/// environment variables, merged over default values.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Same as [`load_config`] with an explicit config file path (extension
/// optional). A missing file is not an error.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    // a missing .env is fine
    let _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    Ok(partial.merge_with_defaults())
}
