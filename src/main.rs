mod calendar;
mod config;
mod export;
mod ledger;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;

use config::Config;
use store::Store;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::parse(&args)?;
    let _logger = config.init_logging()?;

    let store = Store::open(&config.data_file())?;
    log::info!("Using data file {}", store.path().display());

    if config.is_tui() {
        run::as_tui(&store)
    } else {
        run::as_cli(&config.args, &store)
    }
}
