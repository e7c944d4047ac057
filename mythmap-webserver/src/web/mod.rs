use std::path::PathBuf;

use crate::core::prelude::*;

use rocket::{config::Config as RocketCfg, fs::FileServer, Rocket, Route};

pub mod api;
mod guards;
mod sqlite;


#[derive(Debug, Clone)]
pub struct Cfg {
    /// Directory of the uploaded media files, served under `/media`
    pub media_dir: PathBuf,
    /// Max. size of an uploaded image in bytes
    pub max_image_size: u64,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
    media: Box<dyn MediaStore + Send + Sync>,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let media_files = FileServer::from(&cfg.media_dir);
    info!("Serving media files from {}", cfg.media_dir.display());

    let mut instance = r
        .manage(db)
        .manage(guards::Media(media))
        .manage(guards::Version(version))
        .manage(cfg)
        .register("/", api::catchers())
        .mount("/media", media_files);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(
    db: sqlite::Connections,
    media: Box<dyn MediaStore + Send + Sync>,
    enable_cors: bool,
    cfg: Cfg,
    version: &'static str,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let instance = rocket_instance(options, db, media);
    let server_task = if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance.attach(cors).launch(),
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        }
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
    }
}
