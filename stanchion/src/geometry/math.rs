//! Point/vector arithmetic on [`Vec2`].
//!
//! Angles follow `atan2` orientation: positive rotation turns +x toward +y.

use std::f32::consts::TAU;
use std::ops::{Add, Mul, Neg, Sub};

use super::tolerance::{clamp01, EPS_LEN};
use crate::model::Vec2;

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Vec2 { Vec2 { x, y } }

    #[inline] pub fn dot(self, o: Vec2) -> f32 { self.x*o.x + self.y*o.y }
    #[inline] pub fn cross(self, o: Vec2) -> f32 { self.x*o.y - self.y*o.x }
    #[inline] pub fn len_sq(self) -> f32 { self.dot(self) }
    #[inline] pub fn len(self) -> f32 { self.len_sq().sqrt() }
    #[inline] pub fn dist(self, o: Vec2) -> f32 { (o - self).len() }

    /// Unit vector, or zero for vectors shorter than `EPS_LEN`.
    pub fn normalized(self) -> Vec2 {
        let l = self.len();
        if l > EPS_LEN { Vec2::new(self.x / l, self.y / l) } else { Vec2::ZERO }
    }

    /// Same direction, norm set to `len`.
    pub fn with_len(self, len: f32) -> Vec2 { self.normalized() * len }

    pub fn rotate(self, angle: f32) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Quarter turn in the positive direction.
    #[inline]
    pub fn perp(self) -> Vec2 { Vec2::new(-self.y, self.x) }

    #[inline]
    pub fn lerp(self, o: Vec2, t: f32) -> Vec2 {
        Vec2::new(self.x + (o.x - self.x) * t, self.y + (o.y - self.y) * t)
    }

    #[inline]
    pub fn midpoint(self, o: Vec2) -> Vec2 { self.lerp(o, 0.5) }

    /// Orthogonal projection of `self` on the line through `a` and `b`.
    /// Falls back to `a` when the line is degenerate.
    pub fn project_on_line(self, a: Vec2, b: Vec2) -> Vec2 {
        let ab = b - a;
        let ll = ab.len_sq();
        if ll <= EPS_LEN * EPS_LEN {
            return a;
        }
        a + ab * ((self - a).dot(ab) / ll)
    }
}

impl Add for Vec2 { type Output = Vec2; #[inline] fn add(self, o: Vec2) -> Vec2 { Vec2::new(self.x + o.x, self.y + o.y) } }
impl Sub for Vec2 { type Output = Vec2; #[inline] fn sub(self, o: Vec2) -> Vec2 { Vec2::new(self.x - o.x, self.y - o.y) } }
impl Mul<f32> for Vec2 { type Output = Vec2; #[inline] fn mul(self, k: f32) -> Vec2 { Vec2::new(self.x * k, self.y * k) } }
impl Neg for Vec2 { type Output = Vec2; #[inline] fn neg(self) -> Vec2 { Vec2::new(-self.x, -self.y) } }

/// Angle of `p` seen from `center`, in `[0, 2π)`.
pub fn angle_around(center: Vec2, p: Vec2) -> f32 {
    let d = p - center;
    let a = d.y.atan2(d.x);
    if a < 0.0 { a + TAU } else { a }
}

/// Counter-rotation needed to turn direction `a` onto direction `b`, in `(0, 2π]`.
/// Parallel directions give a full turn.
pub fn turn_angle(a: Vec2, b: Vec2) -> f32 {
    let t = a.cross(b).atan2(a.dot(b));
    if t <= super::tolerance::EPS_ANG { t + TAU } else { t }
}

pub fn seg_distance_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    let t = clamp01(if vv > 0.0 { (wx*vx + wy*vy) / vv } else { 0.0 });
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    let dx = px - projx; let dy = py - projy;
    (dx*dx + dy*dy, t)
}
