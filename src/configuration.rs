use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub api_keys: ApiKeySettings,
}

#[derive(Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub analyze_port: u16,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub reach_port: u16,
}

#[derive(Clone, Deserialize)]
pub struct ApiKeySettings {
    pub perplexity: String,
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    #[serde(default = "default_reddit_user_agent")]
    pub reddit_user_agent: String,
}

fn default_reddit_user_agent() -> String {
    "StartupLeadScout/1.0".to_string()
}

/// Reads `configuration.yaml` and applies `APP_`-prefixed environment
/// overrides, e.g. `APP_API_KEYS__PERPLEXITY`.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration"))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
