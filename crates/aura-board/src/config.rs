//! Canvas configuration

use aura_domain::CanvasPosition;
use serde::{Deserialize, Serialize};

/// Default layout for tasks that have never been placed on the canvas
///
/// Column index picks the horizontal offset and the task's index within its
/// column picks the vertical offset, so first-time nodes never overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// X of the first column
    pub origin_x: f64,
    /// Y of the first task in a column
    pub origin_y: f64,
    /// Horizontal distance between columns
    pub column_spacing: f64,
    /// Vertical distance between tasks of one column
    pub row_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 100.0,
            origin_y: 100.0,
            column_spacing: 300.0,
            row_spacing: 150.0,
        }
    }
}

/// Canvas settings, read from the `[canvas]` table of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Node box width, used for anchor coordinates
    pub node_width: f64,

    /// Node box height, used for anchor coordinates
    pub node_height: f64,

    /// Round dragged positions to this grid (disabled when `None`)
    pub snap_grid: Option<f64>,

    /// Draw a reciprocal pair as one edge instead of two
    pub dedupe_reciprocal_edges: bool,

    /// Fallback placement
    pub layout: LayoutConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            node_width: 240.0,
            node_height: 100.0,
            snap_grid: None,
            dedupe_reciprocal_edges: false,
            layout: LayoutConfig::default(),
        }
    }
}

impl CanvasConfig {
    /// Apply grid snapping to a dragged position
    pub fn snap(&self, position: CanvasPosition) -> CanvasPosition {
        match self.snap_grid {
            Some(grid) if grid > 0.0 => CanvasPosition::new(
                (position.x / grid).round() * grid,
                (position.y / grid).round() * grid,
            ),
            _ => position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!(config.layout.origin_x, 100.0);
        assert_eq!(config.layout.column_spacing, 300.0);
        assert_eq!(config.layout.row_spacing, 150.0);
        assert_eq!(config.node_width, 240.0);
        assert!(config.snap_grid.is_none());
        assert!(!config.dedupe_reciprocal_edges);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{ "snap_grid": 20.0, "layout": { "row_spacing": 200.0 } }"#).unwrap();
        assert_eq!(config.snap_grid, Some(20.0));
        assert_eq!(config.layout.row_spacing, 200.0);
        assert_eq!(config.layout.origin_y, 100.0);
        assert_eq!(config.node_height, 100.0);
    }

    #[test]
    fn test_snap() {
        let mut config = CanvasConfig::default();
        let position = CanvasPosition::new(113.0, 248.0);
        assert_eq!(config.snap(position), position);

        config.snap_grid = Some(20.0);
        assert_eq!(config.snap(position), CanvasPosition::new(120.0, 240.0));

        config.snap_grid = Some(0.0);
        assert_eq!(config.snap(position), position);
    }
}
