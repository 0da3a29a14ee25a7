//! Quoted CSV codec for dataset tables.
//!
//! Decoding is deliberately permissive: it never fails, an unterminated quote
//! is closed by the end of input, and any run of `\n`/`\r` outside quotes is a
//! single record boundary. Encoding always quotes every cell, so
//! `decode(encode(t)) == t` holds for any table whose rows each have a cell.

/// A single table row.
pub type Row = Vec<String>;

/// A decoded table. The first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// All rows, header first
    rows: Vec<Row>,
}

impl Table {
    #[must_use]
    pub const fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Header row, or an empty slice for a table without rows.
    #[must_use]
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Every row after the header.
    #[must_use]
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or_default()
    }

    pub fn data_rows_mut(&mut self) -> &mut [Row] {
        self.rows.get_mut(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// Decode CSV text into a [`Table`].
///
/// Empty input yields a single row holding a single empty cell. Input that
/// ends right after a record boundary does not produce a trailing empty row.
#[must_use]
pub fn decode(text: &str) -> Table {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Anything consumed since the last record boundary
    let mut pending = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                pending = true;
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                pending = true;
                row.push(std::mem::take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                while chars.next_if(|next| matches!(next, '\n' | '\r')).is_some() {}
                pending = false;
            }
            _ => {
                pending = true;
                field.push(c);
            }
        }
    }

    if pending || rows.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Table { rows }
}

/// Encode a [`Table`] as CSV text.
#[must_use]
pub fn encode(table: &Table) -> String {
    encode_rows(table.rows())
}

/// Encode rows as CSV text: every cell quoted, rows joined by `\n`.
#[must_use]
pub fn encode_rows(rows: &[Row]) -> String {
    rows.iter()
        .map(|row| row.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap a cell in double quotes, doubling any quote inside it.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
