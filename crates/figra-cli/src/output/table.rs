//! Plain aligned tables for `--format table`.

/// Narrowest a column is squeezed to when fitting the terminal.
const MIN_COLUMN: usize = 6;

/// Render `rows` under `headers`, two spaces between columns.
///
/// When `max_width` is set, the widest columns are shrunk (never below
/// their header or [`MIN_COLUMN`]) and overflowing cells end with `…`.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let Some(max_width) = max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = render_line(headers.iter().copied(), &widths);
    let divider = "-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let cells = (0..widths.len()).map(|i| row.get(i).map_or("-", String::as_str));
        lines.push(render_line(cells, &widths));
    }
    lines.join("\n")
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad(&truncate(cell, *width), *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(i, w)| **w > headers[*i].chars().count().max(MIN_COLUMN))
            .max_by_key(|(_, w)| **w)
            .map(|(i, _)| i);
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

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn aligns_columns() {
        let rows = vec![
            vec!["screen".to_string(), "1:2".to_string()],
            vec!["02_screen".to_string(), "10:20".to_string()],
        ];
        let out = render(&["safe_name", "node_id"], &rows, None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "safe_name  node_id");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "screen     1:2");
        assert_eq!(lines[3], "02_screen  10:20");
    }

    #[test]
    fn shrinks_wide_columns_with_ellipsis() {
        let rows = vec![vec!["a".repeat(40), "x".to_string()]];
        let out = render(&["raw_name", "id"], &rows, Some(20));
        let row = out.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 20);
        assert!(row.contains('…'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rows = vec![vec!["only".to_string()]];
        let out = render(&["a", "b"], &rows, None);
        assert!(out.lines().nth(2).unwrap().ends_with('-'));
    }
}
