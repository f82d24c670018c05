use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::{apply_filters, parse_filters};
use crate::db::store::RecordStore;
use crate::errors::AppResult;
use crate::export::export_records;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filter,
        force,
    } = cmd
    {
        let filters = parse_filters(filter)?;
        let mut store = open_store(cfg)?;
        let records = store.read_all()?;
        let selected = apply_filters(records, &filters);

        if selected.is_empty() {
            warning("No entries match: the export only holds the header.");
        }
        export_records(&selected, *format, file, *force)?;
    }
    Ok(())
}
