//! Plain aligned tables for `--format table`.

/// Cells wider than this are cut even when the terminal width is unknown.
const MAX_CELL: usize = 60;
const MIN_CELL: usize = 4;
const GAP: &str = "  ";

/// Render `rows` under `headers`, squeezing the widest columns first when the
/// table would exceed `max_width`.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| display_width(first_line(cell)))
                .chain(std::iter::once(display_width(header)))
                .max()
                .unwrap_or(0)
                .clamp(MIN_CELL, MAX_CELL)
        })
        .collect();

    if let Some(max_width) = max_width {
        squeeze(&mut widths, max_width);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(GAP),
    );
    for row in rows {
        lines.push(line(
            (0..widths.len()).map(|col| row.get(col).map_or("-", |cell| first_line(cell))),
            &widths,
        ));
    }
    lines.join("\n")
}

fn squeeze(widths: &mut [usize], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|w| **w > MIN_CELL)
            .max_by_key(|w| **w)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad(&truncate(cell, *width), *width))
        .collect::<Vec<_>>()
        .join(GAP)
        .trim_end()
        .to_string()
}

/// Only the first line of multi-line cells is shown.
fn first_line(cell: &str) -> &str {
    cell.lines().next().unwrap_or("")
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(fill))
}
