use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use mythmap_core::{entities::Role, usecases::NewUser};
use mythmap_db_sqlite::Connections;
use mythmap_gateways::FileSystemMediaStore;

mod config;

use config::Config;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const MEDIA_BASE_URL: &str = "/media/";

#[derive(Debug, Parser)]
#[command(name = "mythmap", about = "Map of myths, legends and haunted places", version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,
    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,
    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve,
    /// Create a new user account, e.g. the first admin
    CreateUser {
        username: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "MYTHMAP_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "user")]
        role: Role,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Args {
        config_file,
        db_url,
        enable_cors,
        command,
    } = Args::parse();

    let mut cfg = Config::try_load_from_file_or_default(config_file)?;
    if let Some(db_url) = db_url {
        cfg.db.conn_sqlite = db_url;
    }
    if enable_cors {
        cfg.webserver.enable_cors = true;
    }

    info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite, cfg.db.conn_pool_size
    );
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;
    mythmap_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;

    match command.unwrap_or(Command::Serve) {
        Command::Serve => serve(connections, cfg),
        Command::CreateUser {
            username,
            email,
            password,
            role,
        } => {
            let new_user = NewUser {
                username,
                email,
                password,
                role,
            };
            let user = mythmap_application::prelude::create_user(&connections, new_user)?;
            info!("Created user '{}' with role {}", user.username, user.role);
            Ok(())
        }
    }
}

fn serve(connections: Connections, cfg: Config) -> Result<()> {
    let Config {
        media, webserver, ..
    } = cfg;
    let media_store = FileSystemMediaStore::try_new(&media.dir, MEDIA_BASE_URL)?;
    let web_cfg = mythmap_webserver::Cfg {
        media_dir: media.dir,
        max_image_size: media.max_image_size,
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(mythmap_webserver::run(
        connections,
        Box::new(media_store),
        webserver.enable_cors,
        web_cfg,
        VERSION,
    ));
    Ok(())
}
