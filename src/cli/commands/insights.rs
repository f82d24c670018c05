use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::insights::Insights;
use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut store = open_store(cfg)?;
    let records = store.read_all()?;
    if records.is_empty() {
        warning("No data available for insights.");
        return Ok(());
    }

    header("Insights");
    print!("{}", Insights::compute(records)?.render(&cfg.separator_char));
    Ok(())
}
