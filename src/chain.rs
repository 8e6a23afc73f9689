use crate::location::*;
use crate::tile::*;
use serde::{Deserialize, Serialize};

/// One tile of a found chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChainStep {
    pub tile: ConnectionTile,
    /// Placement origin of the tile.
    pub location: Point,
    /// Where the chain leaves this tile.
    pub exit: Point,
}

/// An ordered run of tiles from the start point to the destination.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionChain {
    pub steps: Vec<ChainStep>,
    /// Accumulated straight-line length through every exit.
    pub length: f32,
    /// Exit coordinates of the last tile, or the start point for an empty chain.
    pub end: Point,
}

impl ConnectionChain {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `(tile, placement)` pairs in placement order.
    pub fn placements(&self) -> impl Iterator<Item = (&ConnectionTile, Point)> {
        self.steps.iter().map(|step| (&step.tile, step.location))
    }

    /// Hand every step to `placer`, start first.
    pub fn apply<P: TilePlacer + ?Sized>(&self, placer: &mut P) {
        for step in &self.steps {
            placer.place(&step.tile, step.location);
        }
    }
}

/// Consumer of a chain, typically the editor command that writes tiles to the
/// map and records undo data.
pub trait TilePlacer {
    fn place(&mut self, tile: &ConnectionTile, location: Point);
}
