//! Fixed-column-width text records.
//!
//! SI3D reads its inputs with Fortran edit descriptors, so every numeric
//! field must land in exactly the columns the reader expects. A [`Column`]
//! is a printf-style `%W.Pf` descriptor; a [`Record`] is one output line
//! built from cells; a [`TextFile`] collects header lines and records into
//! a named file body ready for an [`OutputSink`](crate::OutputSink).

use smallvec::SmallVec;

/// A right-justified fixed-point field, equivalent to C's `%W.Pf`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// Minimum field width in characters.
    pub width: usize,
    /// Digits after the decimal point.
    pub precision: usize,
}

impl Column {
    /// `%5.0f`, used by the bathymetry grid.
    pub const F5_0: Self = Self::new(5, 0);
    /// `%10.2f`, used for depths and layer indices.
    pub const F10_2: Self = Self::new(10, 2);
    /// `%10.3f`, used for pressures given in pascals.
    pub const F10_3: Self = Self::new(10, 3);
    /// `%10.4f`, the default forcing and temperature column.
    pub const F10_4: Self = Self::new(10, 4);
    /// `%11.4f`, used for tracer concentrations.
    pub const F11_4: Self = Self::new(11, 4);

    /// Create a descriptor with the given width and precision.
    pub const fn new(width: usize, precision: usize) -> Self {
        Self { width, precision }
    }

    /// Render `value` into a new string.
    pub fn render(self, value: f64) -> String {
        let mut out = String::with_capacity(self.width);
        self.push(&mut out, value);
        out
    }

    /// Append `value` to `out`.
    pub fn push(self, out: &mut String, value: f64) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{value:>width$.precision$}",
            width = self.width,
            precision = self.precision
        );
    }
}

/// One formatted value and whether a single space follows it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    /// Field descriptor.
    pub column: Column,
    /// Value to print.
    pub value: f64,
    /// Emit a space after the field.
    pub spaced: bool,
}

impl Cell {
    /// A cell followed by one space (`"%10.4f "`).
    pub fn spaced(column: Column, value: f64) -> Self {
        Self {
            column,
            value,
            spaced: true,
        }
    }

    /// A cell followed directly by the next field (`"%11.4f"`).
    pub fn packed(column: Column, value: f64) -> Self {
        Self {
            column,
            value,
            spaced: false,
        }
    }
}

/// A single output line made of fixed-width cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    cells: SmallVec<[Cell; 10]>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record where every cell uses `column` and is followed by a space.
    ///
    /// This is the `"%10.4f %10.4f ... %10.4f \n"` layout shared by the
    /// layer, initial-condition, and surface boundary files.
    pub fn spaced(column: Column, values: &[f64]) -> Self {
        values
            .iter()
            .map(|&v| Cell::spaced(column, v))
            .collect::<SmallVec<[Cell; 10]>>()
            .into()
    }

    /// Append a cell.
    pub fn push(&mut self, cell: Cell) -> &mut Self {
        self.cells.push(cell);
        self
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    /// The cells in output order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Append the rendered line, including the trailing newline, to `out`.
    pub fn render_into(&self, out: &mut String) {
        for cell in &self.cells {
            cell.column.push(out, cell.value);
            if cell.spaced {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    /// Render the line, including the trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

impl From<SmallVec<[Cell; 10]>> for Record {
    fn from(cells: SmallVec<[Cell; 10]>) -> Self {
        Self { cells }
    }
}

impl FromIterator<Cell> for Record {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// A named text file rendered fully in memory before it is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFile {
    name: String,
    body: String,
}

impl TextFile {
    /// Start an empty file with the given name (no directory component).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: String::new(),
        }
    }

    /// Append `text` followed by a newline.
    pub fn line(&mut self, text: &str) -> &mut Self {
        self.body.push_str(text);
        self.body.push('\n');
        self
    }

    /// Append raw text with no newline.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.body.push_str(text);
        self
    }

    /// Append a rendered record.
    pub fn record(&mut self, record: &Record) -> &mut Self {
        record.render_into(&mut self.body);
        self
    }

    /// File name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendered contents.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Number of lines in the body.
    pub fn line_count(&self) -> usize {
        self.body.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn column_matches_printf() {
        assert_eq!(Column::F10_2.render(-0.5), "     -0.50");
        assert_eq!(Column::F10_4.render(15.0), "   15.0000");
        assert_eq!(Column::F10_3.render(101325.0), "101325.000");
        assert_eq!(Column::F11_4.render(0.25), "     0.2500");
        assert_eq!(Column::F5_0.render(-99.0), "  -99");
    }

    #[test]
    fn wide_values_overflow_rather_than_truncate() {
        assert_eq!(Column::F10_4.render(101325.0), "101325.0000");
    }

    #[test]
    fn spaced_record_has_trailing_space() {
        let r = Record::spaced(Column::F10_4, &[1.0, 2.0]);
        assert_eq!(r.render(), "    1.0000     2.0000 \n");
    }

    #[test]
    fn mixed_record() {
        let r = Record::new()
            .with(Cell::spaced(Column::F10_2, -0.5))
            .with(Cell::packed(Column::F10_4, 12.0))
            .with(Cell::packed(Column::F11_4, 3.0));
        assert_eq!(r.render(), "     -0.50    12.0000     3.0000\n");
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn text_file_collects_lines() {
        let mut f = TextFile::new("out.txt");
        f.line("header").record(&Record::spaced(Column::F10_2, &[1.0]));
        assert_eq!(f.name(), "out.txt");
        assert_eq!(f.body(), "header\n      1.00 \n");
        assert_eq!(f.line_count(), 2);
    }

    proptest! {
        #[test]
        fn rendered_width_is_at_least_column_width(v in -9999.0f64..9999.0) {
            for col in [Column::F10_2, Column::F10_3, Column::F10_4, Column::F11_4] {
                prop_assert_eq!(col.render(v).len(), col.width);
            }
        }
    }
}
