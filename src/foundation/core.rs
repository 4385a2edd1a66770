use std::ops::{Add, Mul, Neg, Sub};

use crate::foundation::error::{SubperspError, SubperspResult};

pub use kurbo::{Point, Rect, Vec2};

/// Numpad-style text alignment code (`\an1` .. `\an9`).
///
/// Column is `(code - 1) % 3` (left, center, right) and row is `(code - 1) / 3`
/// (bottom, middle, top).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Alignment(u8);

impl Alignment {
    /// Bottom center, the ASS default.
    pub const BOTTOM_CENTER: Self = Self(2);
    /// Top left.
    pub const TOP_LEFT: Self = Self(7);

    /// Build an alignment from its numpad code.
    pub fn new(code: u8) -> SubperspResult<Self> {
        if !(1..=9).contains(&code) {
            return Err(SubperspError::validation(format!(
                "alignment must be in 1..=9, got {code}"
            )));
        }
        Ok(Self(code))
    }

    /// The numpad code.
    pub fn code(self) -> u8 {
        self.0
    }

    /// 0 = left, 1 = center, 2 = right.
    pub fn column(self) -> u8 {
        (self.0 - 1) % 3
    }

    /// 0 = bottom, 1 = middle, 2 = top.
    pub fn row(self) -> u8 {
        (self.0 - 1) / 3
    }

    /// Position of the alignment point inside a unit box, with y growing downwards.
    pub fn anchor(self) -> Vec2 {
        Vec2::new(
            f64::from(self.column()) * 0.5,
            f64::from(2 - self.row()) * 0.5,
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::BOTTOM_CENTER
    }
}

impl TryFrom<u8> for Alignment {
    type Error = SubperspError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alignment> for u8 {
    fn from(value: Alignment) -> Self {
        value.0
    }
}

/// Point or direction in the renderer's 3D space.
///
/// Screen x grows right, y grows down and z grows away from the viewer. Rotation
/// helpers use the same sign conventions as the subtitle renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Lift a 2D vector to the given depth.
    pub fn from_xy(v: Vec2, z: f64) -> Self {
        Self::new(v.x, v.y, z)
    }

    pub fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn rotate_x(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x, self.y * c - self.z * s, self.y * s + self.z * c)
    }

    pub fn rotate_y(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.z * s, self.y, self.x * s + self.z * c)
    }

    pub fn rotate_z(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c, self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}
