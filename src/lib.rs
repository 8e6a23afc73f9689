//! Automatic connector for cliff-style tile chains.
//!
//! Given a start point, a side and a destination, the search picks a sequence
//! of pre-authored connection tiles whose sockets chain from the start to the
//! destination. The result is a list of tile placements; writing them to a map
//! is left to the caller through [`TilePlacer`].

pub mod catalog;
pub mod chain;
pub mod constants;
pub mod direction;
pub mod error;
pub mod location;
pub mod node;
pub mod search;
pub mod socket;
pub mod tile;

pub use catalog::{ConnectionTileSet, LazyCatalog, TileCatalog};
pub use chain::*;
pub use direction::{ConnectionMask, Direction};
pub use error::*;
pub use location::Point;
pub use search::{
    search, search_with, PathSearch, SearchBudget, SearchSettings, SearchStats, SearchStatus,
};
pub use socket::{ConnectionSocket, Side};
pub use tile::ConnectionTile;
