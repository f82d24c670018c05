//! Browsing the register: column filters and per-column analysis.

use crate::errors::{AppError, AppResult};
use crate::models::JobCardRecord;
use crate::models::job_card::{COLUMNS, canonical_column};
use crate::utils::colors::{RESET, color_for_status};
use crate::utils::table::{Column, Table};

/// `COLUMN=needle`: keep rows whose column contains `needle`, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: &'static str,
    pub needle: String,
}

impl ColumnFilter {
    pub fn parse(spec: &str) -> AppResult<Self> {
        let (col, needle) = spec.split_once('=').ok_or_else(|| {
            AppError::Validation(format!("filter '{spec}' must look like COLUMN=VALUE"))
        })?;
        let column = canonical_column(col)
            .ok_or_else(|| AppError::Validation(format!("unknown column '{}'", col.trim())))?;
        Ok(Self {
            column,
            needle: needle.trim().to_lowercase(),
        })
    }

    pub fn matches(&self, r: &JobCardRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        r.column_value(self.column)
            .is_some_and(|v| v.to_lowercase().contains(&self.needle))
    }
}

pub fn parse_filters(specs: &[String]) -> AppResult<Vec<ColumnFilter>> {
    specs.iter().map(|s| ColumnFilter::parse(s)).collect()
}

pub fn apply_filters<'a>(
    records: &'a [JobCardRecord],
    filters: &[ColumnFilter],
) -> Vec<&'a JobCardRecord> {
    records
        .iter()
        .filter(|r| filters.iter().all(|f| f.matches(r)))
        .collect()
}

/// Occurrences of each value of `column`, most frequent first.
pub fn value_counts<'a, I>(records: I, column: &str) -> AppResult<Vec<(String, usize)>>
where
    I: IntoIterator<Item = &'a JobCardRecord>,
{
    let column = canonical_column(column)
        .ok_or_else(|| AppError::Validation(format!("unknown column '{column}'")))?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    for r in records {
        let value = r.column_value(column).unwrap_or_default();
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    // stable: ties keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantitySummary {
    pub count: usize,
    pub total: u64,
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    /// Entries per bucket of ten: 0-9, 10-19, …, 90-100.
    pub buckets: [usize; 10],
}

/// Distribution of `Task_Q`; `None` when there are no rows.
pub fn quantity_summary<'a, I>(records: I) -> Option<QuantitySummary>
where
    I: IntoIterator<Item = &'a JobCardRecord>,
{
    let values: Vec<u8> = records.into_iter().map(|r| r.task_quantity).collect();
    if values.is_empty() {
        return None;
    }

    let mut buckets = [0usize; 10];
    for v in &values {
        buckets[usize::from(*v / 10).min(9)] += 1;
    }
    let total: u64 = values.iter().map(|v| u64::from(*v)).sum();

    Some(QuantitySummary {
        count: values.len(),
        total,
        min: values.iter().copied().min().unwrap_or(0),
        max: values.iter().copied().max().unwrap_or(0),
        mean: total as f64 / values.len() as f64,
        buckets,
    })
}

/// Full table of entries.
pub fn render_records(records: &[&JobCardRecord], separator: &str) -> String {
    let widths = [36, 19, 12, 10, 14, 18, 8, 14, 12, 14, 12, 14, 24, 6, 10, 11, 6, 30];
    let mut table = Table::new(
        COLUMNS
            .iter()
            .zip(widths)
            .map(|(h, w)| Column::new(h, w))
            .collect(),
    );
    for r in records {
        let mut row = r.to_row();
        let code = r.status.to_db_str();
        row[16] = format!("{}{}{}", color_for_status(code), code, RESET);
        table.add_row(row);
    }
    table.render(separator)
}

/// Two-column table of value counts.
pub fn render_counts(label: &str, counts: &[(String, usize)], separator: &str) -> String {
    let mut table = Table::new(vec![Column::new(label, 40), Column::new("Count", 8)]);
    for (value, n) in counts {
        let shown = if value.is_empty() { "(empty)" } else { value.as_str() };
        table.add_row(vec![shown.to_string(), n.to_string()]);
    }
    table.render(separator)
}
