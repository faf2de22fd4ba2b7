use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// A record with a fixed one-line table rendering.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Render a serializable response to a string in the requested format.
///
/// JSON formats serialize `value`; the table format renders `rows`.
pub fn render<T, R>(value: &T, rows: &[R], format: OutputFormat) -> anyhow::Result<String>
where
    T: Serialize,
    R: TableRow,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(rows)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T, R>(value: &T, rows: &[R], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize,
    R: TableRow,
{
    let rendered = render(value, rows, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<R: TableRow>(rows: &[R]) -> String {
    if rows.is_empty() {
        return String::from("(no rows)");
    }

    let prefs = ui::prefs();
    let options = table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    };
    let cells = rows.iter().map(TableRow::cells).collect::<Vec<_>>();
    table::render_entity_table(R::HEADERS, &cells, options)
}

/// Table cell for an optional measurement.
#[must_use]
pub fn number_cell(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| String::from("-"), |value| format!("{value:.decimals$}"))
}
