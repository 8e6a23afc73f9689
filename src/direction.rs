//! Compass directions and the connector bit-mask algebra.
//!
//! A connection mask stores one bit per direction, most significant bit first:
//! bit 7 is `North`, bit 0 is `NorthWest`. Because opposite directions sit
//! exactly four bits apart, swapping the two nibbles of a mask turns every
//! direction into its opposite. That swap is how an exit socket is compared
//! against the entry socket of a candidate tile.

use crate::constants::*;
use bitflags::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        Self::ALL[(self.index() + DIRECTION_COUNT / 2) % DIRECTION_COUNT]
    }

    /// Single-bit mask for this direction.
    #[inline]
    pub fn mask(self) -> ConnectionMask {
        ConnectionMask::from_bits_retain(1 << (DIRECTION_COUNT - 1 - self.index()))
    }

    /// Unit step in placement space. North is `-y`.
    pub fn unit_offset(self) -> (i32, i32) {
        DIRECTION_OFFSETS[self.index()]
    }
}

/// Unit offsets indexed by `Direction`, clockwise from north.
pub const DIRECTION_OFFSETS: [(i32, i32); DIRECTION_COUNT] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ConnectionMask: u8 {
        const NORTH = 0b1000_0000;
        const NORTH_EAST = 0b0100_0000;
        const EAST = 0b0010_0000;
        const SOUTH_EAST = 0b0001_0000;
        const SOUTH = 0b0000_1000;
        const SOUTH_WEST = 0b0000_0100;
        const WEST = 0b0000_0010;
        const NORTH_WEST = 0b0000_0001;
    }
}

impl ConnectionMask {
    /// Every direction flipped to its opposite.
    #[inline]
    pub fn reversed(self) -> ConnectionMask {
        ConnectionMask::from_bits_retain(reverse_nibbles(self.bits()))
    }

    pub fn directions(self) -> impl Iterator<Item = Direction> + Clone {
        mask_to_directions(self.bits())
    }

    /// Parse a mask string such as `"00100000"`: one `0`/`1` character per
    /// direction, starting with north.
    ///
    /// Returns `None` when the length is not [`DIRECTION_COUNT`] or any
    /// character is not a binary digit.
    pub fn parse(value: &str) -> Option<ConnectionMask> {
        if value.len() != DIRECTION_COUNT {
            return None;
        }

        value.chars().try_fold(0u8, |bits, c| match c {
            '0' => Some(bits << 1),
            '1' => Some((bits << 1) | 1),
            _ => None,
        })
        .map(ConnectionMask::from_bits_retain)
    }
}

impl std::fmt::Display for ConnectionMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08b}", self.bits())
    }
}

impl From<Direction> for ConnectionMask {
    fn from(direction: Direction) -> Self {
        direction.mask()
    }
}

impl Serialize for ConnectionMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConnectionMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u8::deserialize(deserializer).map(ConnectionMask::from_bits_retain)
    }
}

/// Swap the high and low nibble of a mask.
#[inline]
pub fn reverse_nibbles(mask: u8) -> u8 {
    (mask >> 4) | ((mask << 4) & 0xF0)
}

/// Decode the set bits of `mask` into directions, most significant bit first.
pub fn mask_to_directions(mask: u8) -> impl Iterator<Item = Direction> + Clone {
    Direction::ALL
        .into_iter()
        .filter(move |direction| mask & direction.mask().bits() != 0)
}
