use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::memory::ByteBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub(crate) fn from_buffer(buffer: &ByteBuffer, offset: u64) -> Self {
        Self::new(buffer.f32_at(offset), buffer.f32_at(offset.saturating_add(4)))
    }
}

/// World-space position. `y` is height; the ground plane is x/z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Distance on the ground plane, ignoring height
    pub fn distance_2d(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub(crate) fn from_buffer(buffer: &ByteBuffer, offset: u64) -> Self {
        Self::new(
            buffer.f32_at(offset),
            buffer.f32_at(offset.saturating_add(4)),
            buffer.f32_at(offset.saturating_add(8)),
        )
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Row-major 4x4 matrix as stored by the client
pub type Matrix4 = [f32; 16];

pub const IDENTITY: Matrix4 = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// `a * b` for row-major matrices
pub fn multiply_matrices(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = (0..4).map(|k| a[row * 4 + k] * b[k * 4 + col]).sum();
        }
    }
    out
}

/// Health an attacker must chew through once armor mitigation is applied.
///
/// Positive armor multiplies health by `1 + armor / 100`; negative armor
/// amplifies incoming damage by `2 - 100 / (100 - armor)`.
pub fn effective_hp(health: f32, armor: f32) -> f32 {
    if armor >= 0.0 {
        health * (1.0 + armor / 100.0)
    } else {
        health / (2.0 - 100.0 / (100.0 - armor))
    }
}
