use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = include_str!("mythmap.default.toml");

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub db: Option<Db>,
    pub media: Option<Media>,
    pub webserver: Option<WebServer>,
}

impl Config {
    pub fn embedded_default() -> Result<Self, toml::de::Error> {
        toml::from_str(DEFAULT_CONFIG_FILE)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Media {
    pub dir: PathBuf,
    pub max_image_size: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg = Config::embedded_default().unwrap();
        assert!(cfg.db.is_some());
        assert!(cfg.media.is_some());
        assert!(cfg.webserver.is_some());
    }

    #[test]
    fn sections_are_optional() {
        let cfg: Config = toml::from_str("[webserver]\ncors = true").unwrap();
        assert!(cfg.db.is_none());
        assert!(cfg.webserver.unwrap().cors);
    }

    #[test]
    fn reject_unknown_sections() {
        assert!(toml::from_str::<Config>("[email]\ngateway = \"sendmail\"").is_err());
    }
}
