//! In-memory sheet model.
//!
//! A sheet is a sparse grid addressed by zero-based (row, col). Builders
//! produce sheets without touching the filesystem; the writer serializes them.

use std::collections::BTreeMap;

/// One cell value. `Blank` cells are never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Blank,
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        if n.is_finite() {
            Cell::Number(n)
        } else {
            Cell::Blank
        }
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<Option<f64>> for Cell {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Cell::Blank, Cell::from)
    }
}

/// A named sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u16), Cell>,
    row_count: u32,
    header: bool,
}

impl Sheet {
    /// Sheet with no header row (cells placed explicitly).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
            row_count: 0,
            header: false,
        }
    }

    /// Sheet whose row 0 is a header.
    pub fn with_header<I, C>(name: impl Into<String>, header: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let mut sheet = Self::new(name);
        sheet.header = true;
        sheet.push_row(header);
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_header(&self) -> bool {
        self.header
    }

    /// Place a cell. Writing `Blank` clears the position.
    pub fn put(&mut self, row: u32, col: u16, cell: impl Into<Cell>) {
        let cell = cell.into();
        self.row_count = self.row_count.max(row + 1);
        if cell.is_blank() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), cell);
        }
    }

    /// Append a row starting at column 0.
    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let row = self.row_count;
        for (col, cell) in cells.into_iter().enumerate() {
            self.put(row, col as u16, cell);
        }
        self.row_count = row + 1;
    }

    pub fn get(&self, row: u32, col: u16) -> &Cell {
        self.cells.get(&(row, col)).unwrap_or(&Cell::Blank)
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Rows after the header.
    pub fn data_row_count(&self) -> u32 {
        if self.header {
            self.row_count.saturating_sub(1)
        } else {
            self.row_count
        }
    }

    /// Non-blank cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
