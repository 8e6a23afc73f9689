use crate::constants::*;
use crate::direction::*;
use crate::location::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which face of a cliff (or bank of a connected overlay) a socket sits on.
/// Sockets only join sockets on the same side.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

impl FromStr for Side {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("front") {
            Ok(Side::Front)
        } else if s.eq_ignore_ascii_case("back") {
            Ok(Side::Back)
        } else {
            Err(())
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attachment point on a connection tile.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct ConnectionSocket {
    /// Position relative to the tile's placement origin.
    pub offset: Point,
    /// Directions this socket can extend toward.
    pub connects_to: ConnectionMask,
    pub side: Side,
}

impl ConnectionSocket {
    pub fn new(offset: Point, connects_to: ConnectionMask, side: Side) -> Self {
        ConnectionSocket {
            offset,
            connects_to,
            side,
        }
    }

    /// The all-directions placeholder exit used to seed a search.
    pub fn open(side: Side) -> Self {
        ConnectionSocket::new(
            Point::ORIGIN,
            ConnectionMask::from_bits_retain(ALL_DIRECTIONS_MASK),
            side,
        )
    }

    /// `connects_to` with every direction flipped.
    #[inline]
    pub fn reversed_mask(&self) -> ConnectionMask {
        self.connects_to.reversed()
    }

    /// Directions in which a tile entering through `self` can attach to
    /// `exit`.
    ///
    /// The test is one-sided: the candidate contributes its reversed mask and
    /// the exit its forward mask.
    pub fn directions_from(&self, exit: &ConnectionSocket) -> ConnectionMask {
        if self.side != exit.side {
            return ConnectionMask::empty();
        }

        self.reversed_mask() & exit.connects_to
    }
}
