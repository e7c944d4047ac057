#![allow(proc_macro_derive_resolution_fallback)]
#![recursion_limit = "128"]

#[macro_use]
extern crate log;

use mythmap_core::gateways::MediaStore;
use mythmap_db_sqlite::Connections;

mod adapters;
mod core;
mod web;

pub use web::Cfg;

pub async fn run(
    connections: Connections,
    media: Box<dyn MediaStore + Send + Sync>,
    enable_cors: bool,
    cfg: Cfg,
    version: &'static str,
) {
    web::run(connections.into(), media, enable_cors, cfg, version).await;
}
