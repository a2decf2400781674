//! Per-tile diagnostics.

use crate::tile::Tile;
use std::time::Duration;
use thiserror::Error;

/// Recoverable conditions met while rendering a tile.
///
/// None of these stop the render; the affected tile is biased (usually
/// darker) but every pixel already written stays valid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    #[error("Ray pool capacity reached in tile ({x},{y})")]
    RayPoolOverflow { x: u32, y: u32 },

    #[error("Ambient request pool capacity reached in tile ({x},{y})")]
    AmbientPoolOverflow { x: u32, y: u32 },

    #[error("Iteration limit {limit} reached in tile ({x},{y}) with {pending} rays pending")]
    IterationLimitExceeded {
        x: u32,
        y: u32,
        limit: u32,
        pending: usize,
    },
}

/// Summary of one rendered tile.
#[derive(Debug, Clone)]
pub struct TileReport {
    pub tile: Tile,
    /// Wavefront passes run
    pub iterations: u32,
    /// Rays consumed across all passes, probes included
    pub rays_processed: u64,
    /// Ambient requests resolved
    pub ambient_requests: usize,
    pub elapsed: Duration,
    pub warnings: Vec<RenderWarning>,
}

impl TileReport {
    /// Whether the tile finished without any warning.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            RenderWarning::RayPoolOverflow { x: 16, y: 32 }.to_string(),
            "Ray pool capacity reached in tile (16,32)"
        );
        assert_eq!(
            RenderWarning::IterationLimitExceeded {
                x: 0,
                y: 0,
                limit: 100,
                pending: 3
            }
            .to_string(),
            "Iteration limit 100 reached in tile (0,0) with 3 rays pending"
        );
    }
}
