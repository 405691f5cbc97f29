//! Plain ASCII table rendering
//!
//! ```text
//! +Title----+-------+
//! | header  | other |
//! +---------+-------+
//! | cell    | 1     |
//! +---------+-------+
//! ```
//!
//! Widths are measured in chars so Cyrillic labels line up. The title is
//! embedded in the top border and dropped when it does not fit.

/// Render rows as an ASCII table with an optional title in the top border
pub fn render_table(title: Option<&str>, headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = widths[i].max(header.chars().count());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let border = border_line(&widths);
    let mut lines = Vec::with_capacity(rows.len() + 4);

    lines.push(match title {
        Some(title) => title_line(&border, title),
        None => border.clone(),
    });
    if !headers.is_empty() {
        let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        lines.push(row_line(&widths, &header_cells));
        lines.push(border.clone());
    }
    for row in rows {
        lines.push(row_line(&widths, row));
    }
    lines.push(border);

    lines.join("\n")
}

fn border_line(widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    format!("+{}+", segments.join("+"))
}

fn title_line(border: &str, title: &str) -> String {
    let title_len = title.chars().count();
    // Border is ASCII, so char and byte offsets agree
    if title_len + 2 > border.len() {
        return border.to_string();
    }
    format!("+{}{}", title, &border[1 + title_len..])
}

fn row_line(widths: &[usize], cells: &[String]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = width - cell.chars().count();
            format!(" {}{} ", cell, " ".repeat(padding))
        })
        .collect();
    format!("|{}|", padded.join("|"))
}
