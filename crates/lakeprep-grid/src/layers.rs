//! Layer grid construction and the `si3d_layer.txt` file.

use lakeprep_core::{
    BasinDepth, Cell, Column, OutputSink, PrepError, Record, TextFile, SENTINEL_DEPTH,
};

use crate::spacing::{SpacingMethod, SpacingPolicy};

/// Name of the layer file read by SI3D when `ibathyf < 0`.
pub const LAYER_FILE_NAME: &str = "si3d_layer.txt";

/// Number of above-surface sentinel rows preceding the physical layers.
pub const SENTINEL_ROWS: usize = 2;

/// A vertical grid of layers.
///
/// `tops` holds the two sentinel rows followed by the cumulative depth of
/// every layer, which is the sequence SI3D reads from the layer file.
/// `midpoints` holds the center of each layer, negative down, computed from
/// the physical interfaces `[0, tops[2], tops[3], ...]`.
///
/// # Examples
///
/// ```
/// use lakeprep_core::BasinDepth;
/// use lakeprep_grid::{LayerGrid, SpacingPolicy};
///
/// let grid = LayerGrid::from_policy(
///     BasinDepth::new(10.0).unwrap(),
///     &SpacingPolicy::Uniform { thickness: 1.0 },
/// )
/// .unwrap();
/// assert_eq!(grid.layer_count(), 10);
/// assert_eq!(grid.midpoints()[0], -0.5);
/// assert_eq!(grid.physical_tops()[10], 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayerGrid {
    method: SpacingMethod,
    depth: BasinDepth,
    tops: Vec<f64>,
    midpoints: Vec<f64>,
}

impl LayerGrid {
    /// Generate the grid without writing anything.
    pub fn from_policy(depth: BasinDepth, policy: &SpacingPolicy) -> Result<Self, PrepError> {
        let levels = policy.layer_depths(depth)?;
        let mut tops = Vec::with_capacity(levels.len() + SENTINEL_ROWS);
        tops.extend([SENTINEL_DEPTH; SENTINEL_ROWS]);
        tops.extend_from_slice(&levels);

        let mut interfaces = Vec::with_capacity(levels.len() + 1);
        interfaces.push(0.0);
        interfaces.extend_from_slice(&levels);
        let midpoints = interfaces
            .windows(2)
            .map(|w| -(w[0] + w[1]) / 2.0)
            .collect();

        log::debug!(
            "{} grid: {} layers over {depth}, bottom at {}",
            policy.method(),
            levels.len(),
            levels.last().copied().unwrap_or(0.0),
        );
        Ok(Self {
            method: policy.method(),
            depth,
            tops,
            midpoints,
        })
    }

    /// Policy the grid was generated from.
    pub fn method(&self) -> SpacingMethod {
        self.method
    }

    /// Basin depth the grid was generated for.
    pub fn depth(&self) -> BasinDepth {
        self.depth
    }

    /// Sentinel rows followed by the cumulative layer depths.
    pub fn tops(&self) -> &[f64] {
        &self.tops
    }

    /// Cumulative layer depths without the sentinel rows.
    pub fn levels(&self) -> &[f64] {
        &self.tops[SENTINEL_ROWS..]
    }

    /// Layer interfaces starting at the surface: `[0, levels...]`.
    pub fn physical_tops(&self) -> Vec<f64> {
        std::iter::once(0.0).chain(self.levels().iter().copied()).collect()
    }

    /// Layer centers, negative down.
    pub fn midpoints(&self) -> &[f64] {
        &self.midpoints
    }

    /// Number of physical layers.
    pub fn layer_count(&self) -> usize {
        self.midpoints.len()
    }

    /// Number of rows in the layer file, sentinels included (`km1`).
    pub fn row_count(&self) -> usize {
        self.tops.len()
    }

    /// Deepest interface of the grid.
    pub fn bottom(&self) -> f64 {
        self.tops[self.tops.len() - 1]
    }

    /// Render `si3d_layer.txt`.
    pub fn to_layer_file(&self) -> TextFile {
        let mut file = TextFile::new(LAYER_FILE_NAME);
        file.line("Depths to top of layers in Si3D Grid            ")
            .line("** used if ibathyf in si3d_inp.txt is set to < 0       ")
            .line("------------------------------------------------------ ")
            .line(&format!("   km1   =        {}", self.row_count()));
        for (i, &z) in self.tops.iter().enumerate() {
            let index = (i + 1) as f64;
            file.record(
                &Record::new()
                    .with(Cell::spaced(Column::F10_2, index))
                    .with(Cell::spaced(Column::F10_4, z)),
            );
        }
        file
    }
}

/// Build a layer grid and write its layer file through `sink`.
///
/// Nothing is written if the policy is invalid for `depth`.
pub fn build_layer_grid(
    depth: BasinDepth,
    policy: &SpacingPolicy,
    sink: &mut dyn OutputSink,
) -> Result<LayerGrid, PrepError> {
    let grid = LayerGrid::from_policy(depth, policy)?;
    sink.write_file(&grid.to_layer_file())?;
    Ok(grid)
}
