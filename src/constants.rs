/// Number of compass directions a connector can face.
pub const DIRECTION_COUNT: usize = 8;

/// Connection tiles are pass-through pieces: one entry, one exit.
pub const MAX_CONNECTION_POINTS: usize = 2;

/// Mask with every direction open. Used by the synthetic start node.
pub const ALL_DIRECTIONS_MASK: u8 = 0xFF;

/// How much farther from the destination than the start a node's exit may
/// wander before it is discarded.
pub const DEFAULT_MAX_DETOUR: f32 = 24.0;

/// Configuration key prefix for connection points (`ConnectionPoint0`, ...).
pub const CONNECTION_POINT_KEY: &str = "ConnectionPoint";
pub const DIRECTIONS_KEY_SUFFIX: &str = ".Directions";
pub const SIDE_KEY_SUFFIX: &str = ".Side";
