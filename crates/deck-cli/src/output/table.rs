/// Render an aligned plain-text table. Columns shrink (widest first) until
/// the table fits `max_width`; cells that no longer fit end in `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    if let Some(max_width) = max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_line = join_cells(
        headers.iter().map(|h| (*h).to_string()).collect(),
        &widths,
        false,
    );
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        lines.push(join_cells(row.clone(), &widths, true));
    }
    lines.join("\n")
}

fn join_cells(cells: Vec<String>, widths: &[usize], align_numbers: bool) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let value = cells.get(index).map_or("-", String::as_str);
            let text = truncate(value, *width);
            let pad = width.saturating_sub(text.chars().count());
            if align_numbers && looks_numeric(&text) {
                format!("{}{text}", " ".repeat(pad))
            } else {
                format!("{text}{}", " ".repeat(pad))
            }
        })
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
            .filter(|(idx, width)| **width > headers[*idx].len().max(4))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_across_rows() {
        let rows = vec![
            vec!["1".to_string(), "short".to_string()],
            vec!["120".to_string(), "a much longer title".to_string()],
        ];
        let table = render_table(&["id", "title"], &rows, None);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        // numbers are right-aligned
        assert!(lines[2].starts_with("  1"));
        assert_eq!(lines[2].find("short"), lines[3].find("a much"));
    }

    #[test]
    fn wide_columns_are_truncated() {
        let rows = vec![vec!["x".repeat(80)]];
        let table = render_table(&["title"], &rows, Some(20));
        let last = table.lines().last().unwrap();
        assert_eq!(last.chars().count(), 20);
        assert!(last.ends_with('…'));
    }
}
