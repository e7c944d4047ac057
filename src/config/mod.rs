use anyhow::{anyhow, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "mythmap.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_MEDIA_DIR: &str = "MEDIA_DIR";

#[derive(Debug)]
pub struct Config {
    pub db: Db,
    pub media: Media,
    pub webserver: WebServer,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    raw::Config::default()
                }
                _ => return Err(err.into()),
            },
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        if let Ok(dir) = env::var(ENV_NAME_MEDIA_DIR) {
            cfg.media.dir = dir.into();
        }
        Ok(cfg)
    }
}

#[derive(Debug)]
pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

#[derive(Debug)]
pub struct Media {
    /// File system directory of uploaded images.
    pub dir: PathBuf,
    pub max_image_size: u64,
}

#[derive(Debug)]
pub struct WebServer {
    pub enable_cors: bool,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            media,
            webserver,
        } = from;

        // Missing sections are taken from the embedded defaults.
        let defaults = raw::Config::embedded_default()?;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db
            .or(defaults.db)
            .ok_or_else(|| anyhow!("Missing database configuration"))?;
        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool size must not be 0"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Media {
            dir,
            max_image_size,
        } = media
            .or(defaults.media)
            .ok_or_else(|| anyhow!("Missing media configuration"))?;
        if max_image_size == 0 {
            return Err(anyhow!("The max. image size must not be 0"));
        }
        let media = Media {
            dir,
            max_image_size,
        };

        let raw::WebServer { cors } = webserver
            .or(defaults.webserver)
            .ok_or_else(|| anyhow!("Missing webserver configuration"))?;
        let webserver = WebServer { enable_cors: cors };

        Ok(Self {
            db,
            media,
            webserver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_default_config() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        assert_eq!("mythmap.db", cfg.db.conn_sqlite);
        assert_eq!(10, cfg.db.conn_pool_size);
        assert_eq!(Path::new("media"), cfg.media.dir);
        assert!(!cfg.webserver.enable_cors);
    }

    #[test]
    fn load_partial_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[webserver]\ncors = true\n\n[media]\ndir = \"/srv/media\"\nmax-image-size = 1024").unwrap();
        let cfg = Config::try_load_from_file_or_default(Some(file.path())).unwrap();
        assert!(cfg.webserver.enable_cors);
        assert_eq!(1024, cfg.media.max_image_size);
        assert_eq!(10, cfg.db.conn_pool_size);
    }

    #[test]
    fn reject_empty_connection_pool() {
        let raw: raw::Config =
            toml::from_str("[db]\nconnection-sqlite = \"x.db\"\nconnection-pool-size = 0").unwrap();
        assert!(Config::try_from(raw).is_err());
    }

    #[test]
    fn fall_back_to_defaults_if_the_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::try_load_from_file_or_default(Some(dir.path().join("missing.toml")));
        assert!(cfg.is_ok());
    }
}
