use super::{Line, Span, Tone};

/// One table cell: a run of spans measured by visible width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub spans: Vec<Span>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { spans: vec![Span::plain(text)] }
    }

    pub fn styled(text: impl Into<String>, tone: Tone) -> Self {
        Self { spans: vec![Span::styled(text, tone)] }
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }
}

/// Left-aligned text table: header, dashed rule, rows.
///
/// Cells hold toned spans rather than strings, which `comfy_table` cannot
/// carry through to a `LineSink`, so columns are padded here.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows:    Vec<Vec<Cell>>,
    indent:  usize,
}

const GUTTER: &str = "  ";

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows:    Vec::new(),
            indent:  2,
        }
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Rows shorter than the header are padded with empty cells.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::default());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }

    pub fn into_lines(self) -> Vec<Line> {
        let widths = self.widths();
        let pad = " ".repeat(self.indent);
        let last = widths.len().saturating_sub(1);
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let mut header = Line::plain(pad.clone());
        for (i, (h, w)) in self.headers.iter().zip(&widths).enumerate() {
            header.push(Span::styled(h.clone(), Tone::Bold));
            push_padding(&mut header, h.chars().count(), *w, i == last);
        }
        lines.push(header);

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        lines.push(Line::plain(format!("{}{}", pad, rule.join(GUTTER))));

        for row in self.rows {
            let mut line = Line::plain(pad.clone());
            for (i, (cell, w)) in row.into_iter().zip(&widths).enumerate() {
                let cw = cell.width();
                line.spans.extend(cell.spans);
                push_padding(&mut line, cw, *w, i == last);
            }
            lines.push(line);
        }
        lines
    }
}

fn push_padding(line: &mut Line, used: usize, width: usize, last: bool) {
    let mut fill = width.saturating_sub(used);
    if !last { fill += GUTTER.len(); }
    if fill > 0 {
        line.push(Span::plain(" ".repeat(fill)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_columns_align_on_visible_width() {
        let mut t = Table::new(["Pool", "State"]);
        t.push_row(vec![Cell::styled("0", Tone::Accent), Cell::styled("ok", Tone::Ok)]);
        t.push_row(vec![Cell::styled("12", Tone::Accent), Cell::styled("offline", Tone::Critical)]);
        let text: Vec<String> = t.into_lines().iter().map(Line::text).collect();
        assert_eq!(text, vec![
            "  Pool  State  ",
            "  ----  -------",
            "  0     ok     ",
            "  12    offline",
        ]);
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let t = Table::new(["Pool", "Erasure Set"]);
        assert!(t.is_empty());
        let lines = t.into_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text(), "  ----  -----------");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut t = Table::new(["A", "B", "C"]).indent(0);
        t.push_row(vec![Cell::plain("x")]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.into_lines()[2].text(), "x      ");
    }
}
