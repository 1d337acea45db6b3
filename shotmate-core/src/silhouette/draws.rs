//! Named random fields consumed by the skeleton layout.
//!
//! The generator is a single mutable stream, so the position of every draw is part of the
//! output contract. All draws are taken here, in declaration order, before any geometry is
//! computed; the layout code only reads the resulting fields.

use std::f64::consts::PI;

use crate::silhouette::seed::RandomSource;

/// Which way a side-facing skeleton looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Facing {
    /// Facing towards negative x.
    Left,
    /// Facing towards positive x.
    Right,
}

impl Facing {
    /// Signed x direction: `+1` for right, `-1` for left.
    pub fn direction(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Skeleton layout mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    /// Symmetric, facing the camera.
    Front,
    /// Profile view.
    Side(Facing),
}

/// Jittered body proportions shared by both layouts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaseMeasurements {
    /// Head circle radius.
    pub head_radius: f64,
    /// Shoulder line to hip line.
    pub body_height: f64,
    /// Shoulder span in the front view.
    pub shoulder_width: f64,
    /// Hip span in the front view.
    pub hip_width: f64,
    /// Distance the head sits above the body centre.
    pub head_offset_y: f64,
    /// Body centre x.
    pub center_x: f64,
    /// Body centre y.
    pub center_y: f64,
}

/// Draws specific to the front-facing layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrontDraws {
    /// Left arm angle in radians, `[0.6π, 1.4π]`.
    pub left_arm_angle: f64,
    /// Right arm angle in radians, `[1.6π, 2.4π]`.
    pub right_arm_angle: f64,
    /// Shared leg spread factor, `[0, 0.2]`.
    pub leg_spread: f64,
}

/// Draws specific to the side-facing layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideDraws {
    /// Visible arm angle in radians, `[0.8π, 1.2π]`.
    pub arm_angle: f64,
    /// Front leg bend, `[0, 0.3]`.
    pub front_leg_bend: f64,
    /// Back leg bend, `[0, 0.2]`.
    pub back_leg_bend: f64,
}

/// Layout-specific draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PoseDraws {
    /// Front-facing limbs.
    Front(FrontDraws),
    /// Side-facing limbs.
    Side {
        /// Direction the profile faces.
        facing: Facing,
        /// Limb draws.
        limbs: SideDraws,
    },
}

/// Every random decision the layout needs, drawn in a fixed order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkeletonDraws {
    /// Proportions.
    pub base: BaseMeasurements,
    /// Orientation-specific draws.
    pub pose: PoseDraws,
}

impl SkeletonDraws {
    /// Probability threshold: a first draw above this is front-facing.
    pub const FRONT_THRESHOLD: f64 = 0.4;

    /// Consume draws from `rng` in the documented order.
    ///
    /// 1. orientation, 2. facing (side only), 3. head radius, 4. body height,
    /// 5. shoulder width, 6. hip width, 7. head offset, 8. centre x, 9. centre y,
    /// then the layout-specific draws.
    pub fn draw<R: RandomSource + ?Sized>(width: f64, height: f64, rng: &mut R) -> Self {
        let front = rng.next_f64() > Self::FRONT_THRESHOLD;
        let facing = if front {
            None
        } else if rng.next_f64() > 0.5 {
            Some(Facing::Right)
        } else {
            Some(Facing::Left)
        };

        let head_radius = width.min(height) * (0.06 + rng.next_f64() * 0.01);
        let body_height = height * (0.4 + rng.next_f64() * 0.05);
        let shoulder_width = width * (0.25 + rng.next_f64() * 0.05);
        let hip_width = shoulder_width * (0.7 + rng.next_f64() * 0.1);
        let head_offset_y = height * (0.2 + rng.next_f64() * 0.05);
        let center_x = width / 2.0 + (rng.next_f64() * width * 0.1 - width * 0.05);
        let center_y = height / 2.0 + (rng.next_f64() * height * 0.1 - height * 0.05);

        let base = BaseMeasurements {
            head_radius,
            body_height,
            shoulder_width,
            hip_width,
            head_offset_y,
            center_x,
            center_y,
        };

        let pose = match facing {
            None => {
                let left_arm_angle = PI * (0.6 + rng.next_f64() * 0.8);
                let right_arm_angle = PI * (1.6 + rng.next_f64() * 0.8);
                let leg_spread = rng.next_f64() * 0.2;
                PoseDraws::Front(FrontDraws {
                    left_arm_angle,
                    right_arm_angle,
                    leg_spread,
                })
            }
            Some(facing) => {
                let arm_angle = PI * (0.8 + rng.next_f64() * 0.4);
                let front_leg_bend = rng.next_f64() * 0.3;
                let back_leg_bend = rng.next_f64() * 0.2;
                PoseDraws::Side {
                    facing,
                    limbs: SideDraws {
                        arm_angle,
                        front_leg_bend,
                        back_leg_bend,
                    },
                }
            }
        };

        Self { base, pose }
    }

    /// Orientation implied by the draws.
    pub fn orientation(&self) -> Orientation {
        match self.pose {
            PoseDraws::Front(_) => Orientation::Front,
            PoseDraws::Side { facing, .. } => Orientation::Side(facing),
        }
    }

    /// Number of draws consumed for this orientation.
    pub fn draw_count(orientation: Orientation) -> usize {
        match orientation {
            Orientation::Front => 1 + 7 + 3,
            Orientation::Side(_) => 2 + 7 + 3,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/draws.rs"]
mod tests;
