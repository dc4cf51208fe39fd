//! Aligned plain-text tables.

use std::io::Write;

use unicode_width::UnicodeWidthStr;

const GAP: &str = "   ";

#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Column widths always account for the header row, so dropping it with
    /// `no_headers` leaves every other line unchanged.
    pub fn write(&self, out: &mut dyn Write, no_headers: bool) -> std::io::Result<()> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for line in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }

        if !no_headers {
            write_line(out, &self.headers, &widths)?;
        }
        for row in &self.rows {
            write_line(out, row, &widths)?;
        }
        Ok(())
    }
}

fn display_width(cell: &str) -> usize {
    UnicodeWidthStr::width(cell)
}

fn write_line(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        let cell = cell.replace(['\n', '\r'], " ");
        if i > 0 {
            line.push_str(GAP);
        }
        line.push_str(&cell);
        let pad = width.saturating_sub(display_width(&cell));
        line.extend(std::iter::repeat_n(' ', pad));
    }
    writeln!(out, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &Table, no_headers: bool) -> String {
        let mut out = Vec::new();
        table.write(&mut out, no_headers).expect("write");
        String::from_utf8(out).expect("utf8")
    }

    fn sample() -> Table {
        let mut table = Table::new(["ID", "WORKSPACE", "STATUS"]);
        table.push(vec!["5".into(), "a.fmw".into(), "queued".into()]);
        table.push(vec!["12".into(), "longer-name.fmw".into(), "running".into()]);
        table
    }

    #[test]
    fn aligns_columns() {
        assert_eq!(
            render(&sample(), false),
            "ID   WORKSPACE         STATUS\n\
             5    a.fmw             queued\n\
             12   longer-name.fmw   running\n"
        );
    }

    #[test]
    fn no_headers_drops_only_the_first_line() {
        let with = render(&sample(), false);
        let without = render(&sample(), true);
        let tail: Vec<&str> = with.lines().skip(1).collect();
        assert_eq!(without.lines().collect::<Vec<_>>(), tail);
    }

    #[test]
    fn wide_characters_count_by_display_width() {
        let mut table = Table::new(["NAME", "X"]);
        table.push(vec!["数据".into(), "1".into()]);
        table.push(vec!["ab".into(), "2".into()]);
        assert_eq!(render(&table, false), "NAME   X\n数据   1\nab     2\n");
    }
}
