//! Plain aligned text tables.

/// Narrowest a column is ever squeezed to.
const MIN_COLUMN_WIDTH: usize = 6;

const SEPARATOR: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render rows under `headers`, numbers right-aligned, text left-aligned.
///
/// Columns shrink (widest first, never below the header) to fit `max_width`;
/// cells that no longer fit end in `…`.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&cell, *width, is_numeric(&cell));
                if options.color {
                    highlight(&padded, &cell)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line);
    }
    lines.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();
    let floor = |index: usize| headers[index].chars().count().max(MIN_COLUMN_WIDTH);

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > floor(*index))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | '%'))
        && trimmed != "-"
}

/// Colour yes/no flags; `padded` is the aligned form of `cell`.
fn highlight(padded: &str, cell: &str) -> String {
    let code = match cell {
        "yes" => "32",
        "no" => "33",
        _ => return padded.to_string(),
    };
    padded.replacen(cell, &format!("\u{1b}[{code}m{cell}\u{1b}[0m"), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(max_width: Option<usize>) -> TableOptions {
        TableOptions {
            max_width,
            color: false,
        }
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let headers = ["date", "notes"];
        let rows = vec![vec![
            "2024-05-01".to_string(),
            "a very long free-text annotation".to_string(),
        ]];

        let table = render_entity_table(&headers, &rows, plain(Some(30)));

        assert!(table.lines().all(|line| line.chars().count() <= 30));
        assert!(table.contains('…'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_entity_table(&["a", "b"], &[vec!["x".to_string()]], plain(None));
        let row = table.lines().nth(2).unwrap_or_default();
        assert!(row.trim_end().ends_with('-'));
    }

    #[test]
    fn colour_wraps_flags_without_breaking_alignment() {
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let table = render_entity_table(&["paired"], &[vec!["yes".to_string()]], options);
        let row = table.lines().nth(2).unwrap_or_default();
        assert!(row.starts_with("\u{1b}[32myes\u{1b}[0m"));
        assert!(row.ends_with("   "));
    }
}
