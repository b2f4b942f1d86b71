//! Configuration management

use serde::Deserialize;

/// Names the toggler uses to find its storage entry, attribute and control.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToggleConfig {
    /// Key of the persisted entry
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Attribute on the root element read by the stylesheet
    #[serde(default = "default_attribute")]
    pub attribute: String,

    /// Id of the element whose click flips the theme
    #[serde(default = "default_control_id")]
    pub control_id: String,
}

fn default_storage_key() -> String {
    "theme".to_string()
}

fn default_attribute() -> String {
    "data-theme".to_string()
}

fn default_control_id() -> String {
    "toggle-theme".to_string()
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            attribute: default_attribute(),
            control_id: default_control_id(),
        }
    }
}

/// Base name of the optional config file (extension picked by the `config` crate)
#[cfg(feature = "native")]
const CONFIG_FILE_NAME: &str = "theme-toggle";

/// Directory holding `theme-toggle.*`: THEME_TOGGLE_CONFIG_DIR, else the working directory
#[cfg(feature = "native")]
pub fn config_dir() -> std::path::PathBuf {
    std::env::var("THEME_TOGGLE_CONFIG_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
}

/// Load config: defaults, then `<dir>/theme-toggle.*`, then `THEME_TOGGLE__*` env vars.
///
/// `dir` defaults to [`config_dir`].
#[cfg(feature = "native")]
pub fn load_config(dir: Option<&std::path::Path>) -> anyhow::Result<ToggleConfig> {
    let config_dir = dir.map_or_else(config_dir, std::path::Path::to_path_buf);

    let builder = ::config::Config::builder()
        // Start with defaults
        .set_default("storage_key", default_storage_key())?
        .set_default("attribute", default_attribute())?
        .set_default("control_id", default_control_id())?
        // Load from config file if it exists
        .add_source(
            ::config::File::with_name(&config_dir.join(CONFIG_FILE_NAME).to_string_lossy())
                .required(false),
        )
        // Override with environment variables (THEME_TOGGLE__STORAGE_KEY, ...)
        .add_source(::config::Environment::with_prefix("THEME_TOGGLE").separator("__"));

    let config: ToggleConfig = builder.build()?.try_deserialize()?;
    tracing::debug!(
        "Theme toggle config: key={} attribute={} control={}",
        config.storage_key,
        config.attribute,
        config.control_id
    );
    Ok(config)
}
