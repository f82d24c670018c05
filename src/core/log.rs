use crate::db::queries::load_log;
use crate::errors::AppResult;
use crate::utils::table::visible_width;
use ansi_term::Colour;
use rusqlite::Connection;

/// ANSI colour for each audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "create" => Colour::Green,
        "update" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Lines of the audit log, one per entry, oldest first.
    pub fn format_log(conn: &Connection) -> AppResult<Vec<String>> {
        let entries = load_log(conn)?;

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|(_, d, ..)| d.len()).max().unwrap_or(10);

        let mut lines = Vec::with_capacity(entries.len());
        for (id, raw_date, operation, target, message) in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            let op = color_for_operation(&operation).paint(operation.as_str());
            let op_target = if target.is_empty() {
                op.to_string()
            } else {
                format!("{} ({})", op, truncate(&target, 48))
            };
            let padding = " ".repeat(60usize.saturating_sub(visible_width(&op_target)));

            lines.push(format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id, date, op_target, padding, message
            ));
        }
        Ok(lines)
    }
}
