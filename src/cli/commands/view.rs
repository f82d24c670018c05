use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::{
    apply_filters, parse_filters, quantity_summary, render_counts, render_records, value_counts,
};
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::job_card::canonical_column;
use crate::ui::messages::{header, info, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::View {
        filter,
        column,
        refresh,
    } = cmd
    {
        let filters = parse_filters(filter)?;
        let mut store = open_store(cfg)?;
        if *refresh {
            store.invalidate();
        }

        let records = store.read_all()?;
        if records.is_empty() {
            warning("No entries in the register yet.");
            return Ok(());
        }

        let selected = apply_filters(records, &filters);
        header("Job Card Register");
        if selected.is_empty() {
            info("No entries match the given filters.");
            return Ok(());
        }
        print!("{}", render_records(&selected, &cfg.separator_char));
        println!("{} of {} entries shown.", selected.len(), records.len());

        if let Some(col) = column {
            let col = canonical_column(col)
                .ok_or_else(|| AppError::Validation(format!("unknown column '{col}'")))?;

            header(format!("Analysis of {col}"));
            if col == "Task_Q" {
                if let Some(s) = quantity_summary(selected.iter().copied()) {
                    println!(
                        "count {}  total {}  min {}  max {}  mean {:.2}",
                        s.count, s.total, s.min, s.max, s.mean
                    );
                    for (i, n) in s.buckets.iter().enumerate() {
                        let upper = if i == 9 { 100 } else { i * 10 + 9 };
                        println!("{:>3}-{:<3} | {}", i * 10, upper, "#".repeat(*n));
                    }
                }
            } else {
                let counts = value_counts(selected.iter().copied(), col)?;
                print!("{}", render_counts(col, &counts, &cfg.separator_char));
            }
        }
    }
    Ok(())
}
