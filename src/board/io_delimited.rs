// Primitives for reading the comma-separated exports of the sheets.
//
// The exports are not always valid RFC 4180: splitting is best effort and never
// fails. Doubled quotes inside a quoted cell are not unescaped.

/// Splits raw text into rows of cells. Rows are separated by `\n`, so a
/// trailing newline gives a final empty row.
pub fn parse_delimited(text: &str) -> Vec<Vec<String>> {
    text.split('\n').map(split_row).collect()
}

/// Splits one row on commas, keeping commas that sit inside a quoted span.
///
/// A cell is, in order of preference: a quoted span up to the next quote, a
/// run of non-comma characters, or an empty cell between two commas (or before
/// a leading comma). A comma after the last cell does not produce an empty
/// cell. One pair of surrounding quotes is removed from every cell.
pub fn split_row(line: &str) -> Vec<String> {
    let bytes = line.as_bytes();
    let mut cells: Vec<String> = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'"' {
            if let Some(end) = closing_quote(line, pos) {
                cells.push(strip_quotes(&line[pos..=end]));
                pos = end + 1;
                continue;
            }
        }
        if bytes[pos] != b',' {
            let end = line[pos..].find(',').map_or(bytes.len(), |i| pos + i);
            cells.push(strip_quotes(&line[pos..end]));
            pos = end;
            continue;
        }
        // On a comma: it opens an empty cell only at the start of the row or
        // right after another comma.
        if pos == 0 || bytes[pos - 1] == b',' {
            cells.push(String::new());
        }
        pos += 1;
    }
    cells
}

// Position of the quote closing the span opened at `start`. A span never
// crosses a line terminator.
fn closing_quote(line: &str, start: usize) -> Option<usize> {
    for (idx, c) in line[start + 1..].char_indices() {
        match c {
            '"' => return Some(start + 1 + idx),
            '\r' | '\u{2028}' | '\u{2029}' => return None,
            _ => {}
        }
    }
    None
}

fn strip_quotes(cell: &str) -> String {
    let inner_ok = cell.len() >= 2
        && cell.starts_with('"')
        && cell.ends_with('"')
        && !cell[1..cell.len() - 1].contains(['\r', '\u{2028}', '\u{2029}']);
    if inner_ok {
        cell[1..cell.len() - 1].to_string()
    } else {
        cell.to_string()
    }
}
