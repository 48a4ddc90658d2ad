use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// MongoDB connection string (`MONGO_URI`). May be empty or unreachable;
    /// the server starts anyway and requests fail until the deployment is up.
    #[serde(default)]
    pub mongo_uri: String,
    /// HTTP listen port (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3000
}

pub fn load() -> Result<Config> {
    let cfg = config::Config::builder()
        .add_source(config::Environment::default())
        .set_default("mongo_uri", "")?
        .set_default("port", 3000)?
        .build()?
        .try_deserialize()?;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: Config = serde_json::from_str("{}").expect("empty config should deserialize");
        assert_eq!(cfg.port, 3000);
        assert!(cfg.mongo_uri.is_empty());
    }
}
