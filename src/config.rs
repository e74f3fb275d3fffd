use web::config::Config;

/// Reads the TOML config from `FEEDWIRE_CONFIG`, or `config.toml` in the working directory.
pub fn process_config() -> anyhow::Result<Config> {
    let path = std::env::var("FEEDWIRE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = std::fs::read_to_string(&path)
        .map_err(|err| anyhow::anyhow!("could not read {}: {}", path, err))?;
    Ok(toml::from_str(&config)?)
}
