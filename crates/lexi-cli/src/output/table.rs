//! Plain aligned tables for `--format table`.

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const SEPARATOR: &str = "  ";

/// Render rows under headers, numbers right-aligned, long cells elided.
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
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(MIN_COLUMN)
                .max(MIN_COLUMN)
        })
        .collect();
    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&elide(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let mut lines = vec![header_line.clone(), "-".repeat(header_line.chars().count())];

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = elide(row.get(index).map_or("-", String::as_str), *width);
                let numeric = is_numeric(&cell);
                let padded = pad(&cell, *width, numeric);
                if options.color {
                    highlight(&cell, padded)
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

/// Narrow the widest column one step at a time until the row fits.
fn shrink_to(widths: &mut [usize], max_width: usize) {
    let total = |widths: &[usize]| {
        widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len().saturating_sub(1)
    };
    while total(widths) > max_width {
        let Some((index, _)) = widths
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > MIN_COLUMN)
            .max_by_key(|(_, w)| **w)
        else {
            break;
        };
        widths[index] -= 1;
    }
}

fn elide(value: &str, width: usize) -> String {
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
    !value.is_empty() && value.parse::<f64>().is_ok()
}

/// Colour well-known reply kinds and stages; padding stays outside the escape.
fn highlight(cell: &str, padded: String) -> String {
    let code = match cell {
        "learned" | "acknowledged" => "32",
        "batched" | "no_words_to_check" | "too_much_time_passed" => "33",
        "something_went_wrong" => "31",
        _ => return padded,
    };
    padded.replacen(cell, &format!("\u{1b}[{code}m{cell}\u{1b}[0m"), 1)
}
