use crate::cli::parser::Commands;
use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let store = open_store(cfg)?;
        let lines = LogLogic::format_log(store.conn())?;

        header("Internal log");
        if lines.is_empty() {
            info("The log is empty.");
        }
        for line in lines {
            println!("{line}");
        }
    }

    Ok(())
}
