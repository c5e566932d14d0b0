// Centralized ingestion limits to harden against untrusted input (JSON snapshots, UI params)

// Scene size caps
pub const MAX_VERTICES: usize = 200_000;
pub const MAX_LINKS: usize = 300_000;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;
pub const WIDTH_MAX: f32 = 10_000.0;
pub const HEIGHT_MAX: f32 = 10_000.0;
pub const DURETE_MAX: f32 = 1_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_width_bounds(w: f32) -> bool { w.is_finite() && w > 0.0 && w <= WIDTH_MAX }
