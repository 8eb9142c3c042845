//! Bathymetry file (`h`) for a measured basin.
//!
//! The caller supplies the horizontal grid as rows of surface elevations
//! (0 at the free surface, negative down, `NaN` on land). SI3D wants depths
//! in decimeters as `%5.0f` integers, land flagged with -99, and the rows
//! listed from the last input row to the first.

use lakeprep_core::{Cell, Column, ConfigError, DomainError, OutputSink, PrepError, Record, TextFile};

/// Required length of the label at the start of the bathymetry header.
pub const HEADER_LENGTH: usize = 27;

/// Value written for land cells.
pub const LAND: f64 = -99.0;

/// A rectangular grid of surface elevations in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthGrid {
    rows: usize,
    cols: usize,
    elevations: Vec<f64>,
}

impl DepthGrid {
    /// Build a grid from row-major elevations.
    pub fn new(rows: usize, cols: usize, elevations: Vec<f64>) -> Result<Self, DomainError> {
        if rows == 0 || cols == 0 {
            return Err(DomainError::Empty {
                name: "bathymetry grid",
            });
        }
        if elevations.len() != rows * cols {
            return Err(DomainError::LengthMismatch {
                name: "bathymetry elevations",
                expected: rows * cols,
                found: elevations.len(),
            });
        }
        if let Some(index) = elevations.iter().position(|z| z.is_infinite()) {
            return Err(DomainError::NonFinite {
                name: "bathymetry elevations",
                index,
            });
        }
        Ok(Self {
            rows,
            cols,
            elevations,
        })
    }

    /// Build a grid from a slice of equally long rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, DomainError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != cols) {
            return Err(DomainError::LengthMismatch {
                name: "bathymetry row",
                expected: cols,
                found: bad.len(),
            });
        }
        Self::new(rows.len(), cols, rows.concat())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Elevation at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elevations[row * self.cols + col]
    }
}

/// Encoded cell values in file order.
#[derive(Clone, Debug, PartialEq)]
pub struct Bathymetry {
    /// Number of rows (`jmx`).
    pub rows: usize,
    /// Number of columns (`imx`).
    pub cols: usize,
    /// Row-major encoded values: decimeters of depth, or [`LAND`].
    pub cells: Vec<f64>,
}

impl Bathymetry {
    /// Encoded value at `(row, col)` in file order.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }
}

/// Header label and grid spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct BathymetryConfig {
    /// Simulation name; together with the spacing it must render to a
    /// [`HEADER_LENGTH`]-character label.
    pub sim_name: String,
    /// Horizontal grid spacing in meters.
    pub dx: f64,
}

impl BathymetryConfig {
    /// The fixed-length label, `"{sim_name} (dx= {dx}),"`.
    pub fn label(&self) -> String {
        format!("{} (dx= {}),", self.sim_name, self.dx)
    }

    /// File name, `h{dx}m_lake` with `dx` truncated to whole meters.
    pub fn file_name(&self) -> String {
        format!("h{}m_lake", self.dx.trunc() as i64)
    }

    /// Check the spacing and the label length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dx.is_finite() || self.dx <= 0.0 {
            return Err(ConfigError::InvalidField {
                field: "dx",
                reason: format!("grid spacing must be positive, got {}", self.dx),
            });
        }
        let label = self.label();
        let found = label.chars().count();
        if found != HEADER_LENGTH {
            return Err(ConfigError::HeaderLength {
                header: label,
                found,
                expected: HEADER_LENGTH,
            });
        }
        Ok(())
    }
}

/// Flip rows, clip emerged cells to the surface, and encode depths.
pub fn encode_bathymetry(grid: &DepthGrid) -> Bathymetry {
    let mut cells = Vec::with_capacity(grid.rows * grid.cols);
    for row in (0..grid.rows).rev() {
        for col in 0..grid.cols {
            let z = grid.get(row, col);
            cells.push(if z.is_nan() { LAND } else { z.min(0.0) * -10.0 });
        }
    }
    Bathymetry {
        rows: grid.rows,
        cols: grid.cols,
        cells,
    }
}

/// Render the bathymetry file.
pub fn render_bathymetry(config: &BathymetryConfig, bathy: &Bathymetry) -> TextFile {
    let (nx, ny) = (bathy.cols, bathy.rows);
    let mut file = TextFile::new(config.file_name());
    file.line(&format!(
        "{}   imx =  {nx},jmx =  {ny},ncols = {nx}",
        config.label()
    ));
    file.line(&format!("HV       V{}", "   V".repeat(nx.saturating_sub(1))));

    let mut index_header = Record::new();
    for i in 2..=nx + 1 {
        index_header.push(Cell::packed(Column::F5_0, i as f64));
    }
    file.raw("     ").record(&index_header);

    for r in 0..ny {
        let mut row = Record::new().with(Cell::packed(Column::F5_0, (ny - r + 1) as f64));
        for c in 0..nx {
            row.push(Cell::packed(Column::F5_0, bathy.get(r, c)));
        }
        file.record(&row);
    }
    file
}

/// Validate the header, encode `grid`, and write the file through `sink`.
pub fn write_bathymetry(
    config: &BathymetryConfig,
    grid: &DepthGrid,
    sink: &mut dyn OutputSink,
) -> Result<Bathymetry, PrepError> {
    config.validate()?;
    let bathy = encode_bathymetry(grid);
    sink.write_file(&render_bathymetry(config, &bathy))?;
    Ok(bathy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lakeprep_core::MemorySink;

    fn config() -> BathymetryConfig {
        // "Lake Tahoe sim 01" (17) + " (dx= 50)," (10) = 27
        BathymetryConfig {
            sim_name: "Lake Tahoe sim 01".into(),
            dx: 50.0,
        }
    }

    #[test]
    fn label_length_enforced() {
        assert!(config().validate().is_ok());
        let short = BathymetryConfig {
            sim_name: "Tahoe".into(),
            dx: 50.0,
        };
        assert!(matches!(
            short.validate(),
            Err(ConfigError::HeaderLength { found: 15, .. })
        ));
    }

    #[test]
    fn encoding_flips_and_clips() {
        let grid = DepthGrid::from_rows(&[vec![f64::NAN, -1.5], vec![0.3, -12.0]]).unwrap();
        let b = encode_bathymetry(&grid);
        // Second input row comes first.
        assert_eq!(b.get(0, 0), 0.0);
        assert_eq!(b.get(0, 1), 120.0);
        assert_eq!(b.get(1, 0), LAND);
        assert_eq!(b.get(1, 1), 15.0);
    }

    #[test]
    fn file_layout() {
        let grid = DepthGrid::from_rows(&[vec![f64::NAN, -1.5, -2.0], vec![-0.5, -12.0, f64::NAN]])
            .unwrap();
        let mut sink = MemorySink::new();
        write_bathymetry(&config(), &grid, &mut sink).unwrap();
        let body = sink.get("h50m_lake").unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(
            lines[0],
            "Lake Tahoe sim 01 (dx= 50),   imx =  3,jmx =  2,ncols = 3"
        );
        assert_eq!(lines[1], "HV       V   V   V");
        assert_eq!(lines[2], "         2    3    4");
        assert_eq!(lines[3], "    3    5  120  -99");
        assert_eq!(lines[4], "    2  -99   15   20");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn bad_label_writes_nothing() {
        let grid = DepthGrid::from_rows(&[vec![-1.0]]).unwrap();
        let mut sink = MemorySink::new();
        let cfg = BathymetryConfig {
            sim_name: "x".into(),
            dx: 10.0,
        };
        assert!(write_bathymetry(&cfg, &grid, &mut sink).unwrap_err().is_config());
        assert!(sink.is_empty());
    }

    #[test]
    fn ragged_rows_rejected() {
        assert!(matches!(
            DepthGrid::from_rows(&[vec![-1.0, -2.0], vec![-1.0]]),
            Err(DomainError::LengthMismatch { .. })
        ));
    }
}
