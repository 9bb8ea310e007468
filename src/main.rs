mod api;
mod config;
mod db;
mod import;
mod logging;
mod models;
mod review;
mod run;
mod ui;
mod worker;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let interactive = args.len() == 1;
    let config = config::Config::from_env(interactive)?;
    logging::init(&config)?;

    let db = db::Database::open(&config.db_path)?;
    log::info!("Opened store at {}", config.db_path.display());

    if interactive {
        let api = api::LocalApi::new(db, config.page_size, config.latency);
        let worker = worker::Worker::spawn(api::CachedApi::new(api))?;
        run::as_tui(worker)
    } else {
        run::as_cli(&args, db, &config)
    }
}
