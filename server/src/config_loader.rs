use balance_ledger_application::error::{AppError, AppResult};
use balance_ledger_application::infrastructure_config::Config;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load_config() -> AppResult<Config> {
    generate_env_template_if_missing()?;
    extract_config(base_figment())
}

/// Layers, lowest priority first: defaults, `config.toml`, `config.json`,
/// `REDIS_HOST`/`REDIS_PORT`, then `LEDGER_`-prefixed variables.
pub fn base_figment() -> Figment {
    let default_config = Config::default();
    let mut figment = Figment::from(Serialized::defaults(default_config));

    if Path::new("config.toml").exists() {
        figment = figment.merge(Toml::file("config.toml"));
    }

    if Path::new("config.json").exists() {
        figment = figment.merge(Json::file("config.json"));
    }

    figment
        .merge(
            Env::raw()
                .only(&["redis_host", "redis_port"])
                .map(|key| key.as_str().replacen('_', ".", 1).into()),
        )
        .merge(Env::prefixed("LEDGER_").split("__"))
}

pub fn extract_config(figment: Figment) -> AppResult<Config> {
    let config: Config = figment.extract().map_err(|e| AppError::ConfigError {
        message: format!("Failed to load configuration: {e}"),
    })?;

    config.validate()?;
    Ok(config)
}

fn generate_env_template_if_missing() -> AppResult<()> {
    let env_file = ".env";
    let template_file = ".env.example";

    if Path::new(env_file).exists() {
        return Ok(());
    }

    if !Path::new(template_file).exists() {
        return Ok(());
    }

    fs::copy(template_file, env_file).map_err(|e| AppError::ConfigError {
        message: format!("Failed to generate .env file from template: {e}"),
    })?;

    info!("Generated .env from template. Please review the Redis endpoint settings.");

    Ok(())
}
