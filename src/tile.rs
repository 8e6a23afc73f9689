use crate::location::*;
use crate::socket::*;
use serde::{Deserialize, Serialize};

/// A placeable connector piece from a tile-set.
///
/// Two-socket tiles are pass-through pieces. One-socket tiles are caps that
/// end a chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionTile {
    pub tile_set: String,
    pub index: u32,
    pub sockets: Vec<ConnectionSocket>,
}

impl ConnectionTile {
    pub fn new(tile_set: impl Into<String>, index: u32, sockets: Vec<ConnectionSocket>) -> Self {
        ConnectionTile {
            tile_set: tile_set.into(),
            index,
            sockets,
        }
    }

    /// The socket a path leaves through after entering at `entry_offset`.
    ///
    /// Returns the first socket whose offset differs from the entry. When
    /// there is no such socket (a cap, or both sockets share an offset) the
    /// first socket is returned.
    pub fn exit_for(&self, entry_offset: Point) -> Option<&ConnectionSocket> {
        self.sockets
            .iter()
            .find(|socket| socket.offset != entry_offset)
            .or_else(|| self.sockets.first())
    }

    pub fn is_cap(&self) -> bool {
        self.sockets.len() == 1
    }
}

impl std::fmt::Display for ConnectionTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.tile_set, self.index)
    }
}
