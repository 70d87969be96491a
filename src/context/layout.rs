//! YAML layout documents: a grid config plus the regions to place on it.
//!
//! ```yaml
//! grid:
//!   columns: 3
//!   rows: 2
//!   container_height: 320px
//!   item_width: auto
//! regions:
//!   - { start_row: 1, end_row: 1, start_col: 1, end_col: 2 }
//!   - { start_row: 2, end_row: 2, start_col: 1, end_col: 1 }
//! ```
//!
//! Regions are placed in document order, so they are numbered `div-1`,
//! `div-2`, ... exactly as if they had been dragged in that order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::GridConfig;
use super::model::{GridModel, OverlapError, PlaceError};
use super::region::CellRange;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("invalid layout: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("region #{index} ({range}) has a start after its end or a zero index")]
    InvertedRange { index: usize, range: CellRange },
    #[error("region #{index} ({range}) lies outside the {columns}x{rows} grid")]
    OutOfBounds {
        index: usize,
        range: CellRange,
        columns: u32,
        rows: u32,
    },
    #[error("region #{index}: {source}")]
    Overlap {
        index: usize,
        #[source]
        source: OverlapError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    #[serde(default, rename = "grid")]
    pub config: GridConfig,
    #[serde(default)]
    pub regions: Vec<CellRange>,
}

impl Layout {
    pub fn parse(content: &str) -> Result<Self, LayoutError> {
        Ok(serde_yaml::from_str::<Option<Layout>>(content)?.unwrap_or_default())
    }

    pub fn to_yaml(&self) -> Result<String, LayoutError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Snapshot a model as a document.
    pub fn from_model(model: &GridModel) -> Self {
        Self {
            config: model.config().clone(),
            regions: model.regions().iter().map(|r| r.range).collect(),
        }
    }

    /// Build a model, placing every region in order.
    ///
    /// The config is clamped like form input; regions are not. A region
    /// that is inverted, out of bounds or overlapping fails the whole load.
    pub fn into_model(self) -> Result<GridModel, LayoutError> {
        let mut model = GridModel::with_config(self.config);

        for (i, range) in self.regions.into_iter().enumerate() {
            let index = i + 1;
            if !range.is_normalized() {
                return Err(LayoutError::InvertedRange { index, range });
            }
            model.add_region(range).map_err(|err| match err {
                PlaceError::Overlap(source) => LayoutError::Overlap { index, source },
                PlaceError::OutOfBounds {
                    candidate,
                    columns,
                    rows,
                } => LayoutError::OutOfBounds {
                    index,
                    range: candidate,
                    columns,
                    rows,
                },
            })?;
        }

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::config::ItemSize;

    #[test]
    fn test_parse_layout() {
        let content = r#"
grid:
  columns: 3
  rows: 2
  item_width: auto
regions:
  - { start_row: 1, end_row: 1, start_col: 1, end_col: 2 }
  - start_row: 2
    end_row: 2
    start_col: 1
    end_col: 1
"#;
        let model = Layout::parse(content).unwrap().into_model().unwrap();
        assert_eq!(model.config().columns, 3);
        assert_eq!(model.config().rows, 2);
        assert_eq!(model.config().item_width, ItemSize::Auto);
        assert_eq!(model.len(), 2);
        assert_eq!(model.regions()[0].id, "div-1");
        assert_eq!(model.regions()[0].range, CellRange::new(1, 1, 1, 2));
        assert_eq!(model.regions()[1].id, "div-2");
    }

    #[test]
    fn test_empty_document_is_default_grid() {
        let model = Layout::parse("").unwrap().into_model().unwrap();
        assert_eq!(model, GridModel::new());
    }

    #[test]
    fn test_config_is_clamped() {
        let model = Layout::parse("grid:\n  columns: 0\n  rows: 0\n")
            .unwrap()
            .into_model()
            .unwrap();
        assert_eq!(model.config().columns, 1);
        assert_eq!(model.config().rows, 1);
    }

    #[test]
    fn test_overlapping_regions_fail() {
        let content = r#"
regions:
  - { start_row: 1, end_row: 2, start_col: 1, end_col: 2 }
  - { start_row: 2, end_row: 3, start_col: 2, end_col: 3 }
"#;
        let err = Layout::parse(content).unwrap().into_model().unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Overlap { index: 2, ref source } if source.existing == "div-1"
        ));
    }

    #[test]
    fn test_out_of_bounds_region_fails() {
        let content = r#"
grid:
  columns: 2
regions:
  - { start_row: 1, end_row: 1, start_col: 1, end_col: 3 }
"#;
        let err = Layout::parse(content).unwrap().into_model().unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { index: 1, columns: 2, rows: 5, .. }));
    }

    #[test]
    fn test_inverted_region_fails() {
        let content = "regions:\n  - { start_row: 3, end_row: 1, start_col: 1, end_col: 1 }\n";
        let err = Layout::parse(content).unwrap().into_model().unwrap_err();
        assert!(matches!(err, LayoutError::InvertedRange { index: 1, .. }));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(matches!(Layout::parse("colour: red\n"), Err(LayoutError::Parse(_))));
    }

    #[test]
    fn test_yaml_roundtrip_preserves_model() {
        let mut model = GridModel::new();
        model.add_region(CellRange::new(1, 2, 1, 3)).unwrap();
        model.add_region(CellRange::new(4, 5, 4, 5)).unwrap();

        let yaml = Layout::from_model(&model).to_yaml().unwrap();
        let restored = Layout::parse(&yaml).unwrap().into_model().unwrap();

        assert_eq!(restored, model);
    }
}
