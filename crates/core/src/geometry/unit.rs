use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// A 2D point in pixel space. The origin is the top-left corner of the grid,
/// with `x` growing to the right and `y` growing down.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    Neg,
    Add,
    Sub,
    Mul,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale each axis independently
    pub fn scale(self, scale_x: f32, scale_y: f32) -> Self {
        Self::new(self.x * scale_x, self.y * scale_y)
    }

    /// Build a point from the `x` of one point and the `y` of another. Hexagon
    /// corners share coordinates with each other, so building them this way
    /// guarantees the shared values are bit-for-bit identical.
    pub fn combine(x_from: Self, y_from: Self) -> Self {
        Self::new(x_from.x, y_from.y)
    }

    /// Swap the two axes. Vertical grids are handled as transposed horizontal
    /// grids in a few places, so this lets us reuse the same math.
    pub fn transpose(self) -> Self {
        Self::new(self.y, self.x)
    }
}

/// Outside regions of a rectangle, as used by Cohen–Sutherland clipping. A
/// point can be outside on up to two sides at once (e.g. above and to the
/// left), so this is a bitmask. [Outcode::INSIDE] means the point is in the
/// rectangle, boundary included.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Outcode(u8);

impl Outcode {
    pub const INSIDE: Self = Self(0);
    pub const LEFT: Self = Self(0b0001);
    pub const TOP: Self = Self(0b0010);
    pub const RIGHT: Self = Self(0b0100);
    pub const BOTTOM: Self = Self(0b1000);

    /// Is every bit of `other` set in this code?
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn is_inside(self) -> bool {
        self.0 == 0
    }

    /// Do both codes share at least one outside region? If so, a segment
    /// between the two points can't possibly cross the rectangle.
    pub fn overlaps(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for Outcode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Outcode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// An axis-aligned rectangle in pixel space, defined by its top-left corner and
/// its size.
#[derive(
    Copy, Clone, Debug, Default, Display, PartialEq, Serialize, Deserialize,
)]
#[display(
    fmt = "[{}, {}; {}x{}]",
    "self.left",
    "self.top",
    "self.width",
    "self.height"
)]
pub struct Rect2D {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect2D {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build a rectangle that spans two corners
    pub fn from_corners(top_left: Point2D, bottom_right: Point2D) -> Self {
        Self::new(
            top_left.x,
            top_left.y,
            bottom_right.x - top_left.x,
            bottom_right.y - top_left.y,
        )
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn top_left(&self) -> Point2D {
        Point2D::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point2D {
        Point2D::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// A rectangle with no area (or negative size) contains nothing and
    /// intersects nothing
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Classify a point against this rectangle. Points on the boundary are
    /// inside.
    pub fn outcode(&self, x: f32, y: f32) -> Outcode {
        let mut code = Outcode::INSIDE;
        if x < self.left {
            code |= Outcode::LEFT;
        } else if x > self.right() {
            code |= Outcode::RIGHT;
        }
        if y < self.top {
            code |= Outcode::TOP;
        } else if y > self.bottom() {
            code |= Outcode::BOTTOM;
        }
        code
    }

    /// Do the two rectangles share any area? Rectangles that only touch along
    /// an edge don't count.
    pub fn intersects(&self, other: &Rect2D) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Shrink the rectangle by the given amount on each side
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }
}
