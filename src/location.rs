use serde::*;

/// Signed grid coordinate in placement space.
///
/// `x` grows to the east and `y` grows to the south, matching the unit
/// offsets in [`crate::direction::Direction::unit_offset`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.y
    }

    /// Straight-line distance, used for every search score.
    pub fn distance_to(self, other: Self) -> f32 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;

        (dx * dx + dy * dy).sqrt() as f32
    }

    /// Whether `self` lies on the closed segment from `from` to `to`.
    ///
    /// A degenerate segment contains only its single point.
    pub fn is_on_segment(self, from: Point, to: Point) -> bool {
        let (sx, sy) = (to.x as i128 - from.x as i128, to.y as i128 - from.y as i128);
        let (rx, ry) = (self.x as i128 - from.x as i128, self.y as i128 - from.y as i128);

        if sx * ry - sy * rx != 0 {
            return false;
        }

        let dot = sx * rx + sy * ry;

        dot >= 0 && dot <= sx * sx + sy * sy
    }

    /// `self + other`, or `None` if either coordinate leaves the `i32` range.
    pub fn checked_add(self, other: Point) -> Option<Point> {
        Some(Point::new(
            self.x.checked_add(other.x)?,
            self.y.checked_add(other.y)?,
        ))
    }

    pub fn checked_sub(self, other: Point) -> Option<Point> {
        Some(Point::new(
            self.x.checked_sub(other.x)?,
            self.y.checked_sub(other.y)?,
        ))
    }
}

/// Unchecked addition. Expansion range-checks every placement with
/// `checked_add` before a node is built.
impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Serialize for Point {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.x, self.y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <(i32, i32)>::deserialize(deserializer).map(Point::from)
    }
}
