//! Live overlay adjustments.
//!
//! [`OverlayTransform`] is pure geometry. Opacity belongs to the state store and is paired
//! with a transform only at composite time.

use crate::{
    config::OverlayConfig,
    foundation::{
        core::{Affine, Point, Vec2},
        math::snap_to_step,
    },
};

/// User-adjustable placement of the overlay inside its container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayTransform {
    /// Uniform scale factor.
    pub scale: f64,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
    /// Primary rotation in degrees (clockwise on screen).
    pub rotation_deg: i32,
    /// Secondary rotation in degrees, applied after the primary one.
    pub z_rotation_deg: i32,
    /// Mirror left to right.
    pub flip_h: bool,
    /// Mirror top to bottom.
    pub flip_v: bool,
}

impl OverlayTransform {
    /// No adjustment.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
        rotation_deg: 0,
        z_rotation_deg: 0,
        flip_h: false,
        flip_v: false,
    };

    /// Restore every field to identity in one update.
    pub fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    /// True when any field differs from identity.
    pub fn is_adjusted(&self) -> bool {
        *self != Self::IDENTITY
    }

    /// Transform in container-local coordinates, with the origin as the pivot.
    ///
    /// Applied to content in this order: horizontal flip, vertical flip, Z-rotation,
    /// rotation, scale, translate.
    pub fn local_affine(&self) -> Affine {
        let flip_v = if self.flip_v { -1.0 } else { 1.0 };
        let flip_h = if self.flip_h { -1.0 } else { 1.0 };
        Affine::translate(Vec2::new(self.offset_x, self.offset_y))
            * Affine::scale(self.scale)
            * Affine::rotate(f64::from(self.rotation_deg).to_radians())
            * Affine::rotate(f64::from(self.z_rotation_deg).to_radians())
            * Affine::scale_non_uniform(1.0, flip_v)
            * Affine::scale_non_uniform(flip_h, 1.0)
    }

    /// Transform pivoting about `anchor` (the container centre).
    pub fn affine_about(&self, anchor: Point) -> Affine {
        let c = anchor.to_vec2();
        Affine::translate(c) * self.local_affine() * Affine::translate(-c)
    }
}

impl Default for OverlayTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Direction of an offset nudge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nudge {
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
}

/// Parse free-text rotation entry the way `parseInt` does.
///
/// Leading whitespace and one sign are accepted, then as many digits as follow (a `0x`
/// prefix switches to hex). Anything unparseable yields 0. Values are not clamped to a
/// degree range; only i32 overflow saturates.
pub fn parse_rotation_input(input: &str) -> i32 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        any = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d));
    }
    if !any {
        return 0;
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Step-and-range rules for the overlay controls.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayControls {
    cfg: OverlayConfig,
}

impl OverlayControls {
    /// Controls following `cfg`.
    pub fn new(cfg: OverlayConfig) -> Self {
        Self { cfg }
    }

    /// Underlying ranges and steps.
    pub fn config(&self) -> &OverlayConfig {
        &self.cfg
    }

    /// Slider write: snap onto the scale grid and clamp.
    pub fn set_scale(&self, t: &mut OverlayTransform, scale: f64) {
        t.scale = snap_to_step(scale, self.cfg.scale_min, self.cfg.scale_max, self.cfg.scale_step);
    }

    /// One step larger.
    pub fn zoom_in(&self, t: &mut OverlayTransform) {
        self.set_scale(t, t.scale + self.cfg.scale_step);
    }

    /// One step smaller.
    pub fn zoom_out(&self, t: &mut OverlayTransform) {
        self.set_scale(t, t.scale - self.cfg.scale_step);
    }

    /// Move the overlay one offset step. Offsets are unbounded.
    pub fn nudge(&self, t: &mut OverlayTransform, dir: Nudge) {
        let step = self.cfg.offset_step_px;
        match dir {
            Nudge::Up => t.offset_y -= step,
            Nudge::Down => t.offset_y += step,
            Nudge::Left => t.offset_x -= step,
            Nudge::Right => t.offset_x += step,
        }
    }

    /// Turn the primary rotation one step; returns the new value.
    pub fn rotate_step(&self, t: &mut OverlayTransform, clockwise: bool) -> i32 {
        t.rotation_deg = self.stepped(t.rotation_deg, clockwise);
        t.rotation_deg
    }

    /// Turn the Z-rotation one step; returns the new value.
    pub fn rotate_z_step(&self, t: &mut OverlayTransform, clockwise: bool) -> i32 {
        t.z_rotation_deg = self.stepped(t.z_rotation_deg, clockwise);
        t.z_rotation_deg
    }

    /// Snap and clamp an opacity slider value.
    pub fn clamp_opacity(&self, opacity: f64) -> f64 {
        snap_to_step(
            opacity,
            self.cfg.opacity_min,
            self.cfg.opacity_max,
            self.cfg.opacity_step,
        )
    }

    fn stepped(&self, deg: i32, clockwise: bool) -> i32 {
        let step = self.cfg.rotation_step_deg;
        if clockwise {
            deg.saturating_add(step)
        } else {
            deg.saturating_sub(step)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/transform.rs"]
mod tests;
