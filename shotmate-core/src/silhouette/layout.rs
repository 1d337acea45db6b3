use crate::{
    foundation::core::Point,
    silhouette::{
        data::{JointMarker, SilhouetteData, circle_path, quad_path, segment_path},
        draws::{BaseMeasurements, FrontDraws, PoseDraws, SideDraws, SkeletonDraws},
        seed::{Lcg, RandomSource, derive_seed},
    },
};

/// Radius of shoulder and hip markers.
pub const TORSO_JOINT_RADIUS: f64 = 5.0;
/// Radius of elbow, wrist, knee and ankle markers.
pub const LIMB_JOINT_RADIUS: f64 = 4.0;

/// Generate a skeleton for a `width` x `height` canvas from a stream of draws.
///
/// Total for every input: zero or negative sizes give degenerate but finite coordinates.
#[tracing::instrument(level = "debug", skip(rng))]
pub fn generate_silhouette<R: RandomSource + ?Sized>(
    width: f64,
    height: f64,
    rng: &mut R,
) -> SilhouetteData {
    let draws = SkeletonDraws::draw(width, height, rng);
    let mut out = SkeletonBuilder::default();
    match draws.pose {
        PoseDraws::Front(limbs) => front_layout(&mut out, &draws.base, &limbs),
        PoseDraws::Side { facing, limbs } => {
            side_layout(&mut out, &draws.base, &limbs, width, facing.direction())
        }
    }
    tracing::debug!(
        orientation = ?draws.orientation(),
        paths = out.data.paths.len(),
        joints = out.data.joints.len(),
        "generated silhouette"
    );
    out.data
}

/// Seed the generator from `uri` and generate a skeleton.
///
/// The same `uri` and size always produce the same data, so callers never need to cache it
/// for correctness.
pub fn silhouette_for_uri(uri: &str, width: f64, height: f64) -> SilhouetteData {
    let mut rng = Lcg::new(u64::from(derive_seed(uri)));
    generate_silhouette(width, height, &mut rng)
}

#[derive(Default)]
struct SkeletonBuilder {
    data: SilhouetteData,
}

impl SkeletonBuilder {
    fn joint(&mut self, p: Point, radius: f64) {
        self.data.joints.push(JointMarker::at(p, radius));
    }

    fn head(&mut self, center: Point, radius: f64) {
        self.joint(center, radius);
        self.data.paths.push(circle_path(center, radius));
    }

    fn torso(&mut self, corners: [Point; 4]) {
        self.data.paths.push(quad_path(corners));
    }

    fn limb(&mut self, root: Point, mid: Point, tip: Point) {
        self.joint(mid, LIMB_JOINT_RADIUS);
        self.joint(tip, LIMB_JOINT_RADIUS);
        self.data.paths.push(segment_path(root, mid));
        self.data.paths.push(segment_path(mid, tip));
    }
}

fn front_layout(out: &mut SkeletonBuilder, m: &BaseMeasurements, limbs: &FrontDraws) {
    let head = Point::new(m.center_x, m.center_y - m.head_offset_y);
    out.head(head, m.head_radius);

    let shoulder_y = head.y + m.head_radius * 1.2;
    let l_shoulder = Point::new(m.center_x - m.shoulder_width / 2.0, shoulder_y);
    let r_shoulder = Point::new(m.center_x + m.shoulder_width / 2.0, shoulder_y);
    out.joint(l_shoulder, TORSO_JOINT_RADIUS);
    out.joint(r_shoulder, TORSO_JOINT_RADIUS);

    let hip_y = shoulder_y + m.body_height;
    let l_hip = Point::new(m.center_x - m.hip_width / 2.0, hip_y);
    let r_hip = Point::new(m.center_x + m.hip_width / 2.0, hip_y);
    out.joint(l_hip, TORSO_JOINT_RADIUS);
    out.joint(r_hip, TORSO_JOINT_RADIUS);

    out.torso([l_shoulder, r_shoulder, r_hip, l_hip]);

    // left arm mirrors x so both angle ranges read as "down and outward"
    let (l_elbow, l_wrist) = arm(l_shoulder, limbs.left_arm_angle, -1.0, m.shoulder_width);
    out.limb(l_shoulder, l_elbow, l_wrist);
    let (r_elbow, r_wrist) = arm(r_shoulder, limbs.right_arm_angle, 1.0, m.shoulder_width);
    out.limb(r_shoulder, r_elbow, r_wrist);

    let step = m.hip_width * limbs.leg_spread;
    let knee_y = hip_y + m.body_height * 0.35;
    let ankle_y = hip_y + m.body_height * 0.7;

    let l_knee = Point::new(l_hip.x - step, knee_y);
    let l_ankle = Point::new(l_knee.x - step, ankle_y);
    out.limb(l_hip, l_knee, l_ankle);

    let r_knee = Point::new(r_hip.x + step, knee_y);
    let r_ankle = Point::new(r_knee.x + step, ankle_y);
    out.limb(r_hip, r_knee, r_ankle);
}

fn side_layout(
    out: &mut SkeletonBuilder,
    m: &BaseMeasurements,
    limbs: &SideDraws,
    width: f64,
    direction: f64,
) {
    let head = Point::new(
        m.center_x + direction * width * 0.02,
        m.center_y - m.head_offset_y,
    );
    out.head(head, m.head_radius);

    let half_body = m.shoulder_width * 0.4 / 2.0;
    let front_x = head.x + direction * half_body;
    let back_x = head.x - direction * half_body;

    let shoulder_y = head.y + m.head_radius * 1.2;
    let front_shoulder = Point::new(front_x, shoulder_y);
    let back_shoulder = Point::new(back_x, shoulder_y);
    out.joint(front_shoulder, TORSO_JOINT_RADIUS);
    out.joint(back_shoulder, TORSO_JOINT_RADIUS);

    let hip_y = shoulder_y + m.body_height;
    let front_hip = Point::new(front_x, hip_y);
    let back_hip = Point::new(back_x, hip_y);
    out.joint(front_hip, TORSO_JOINT_RADIUS);
    out.joint(back_hip, TORSO_JOINT_RADIUS);

    out.torso([back_shoulder, front_shoulder, front_hip, back_hip]);

    let (elbow, wrist) = arm(front_shoulder, limbs.arm_angle, -direction, m.shoulder_width);
    out.limb(front_shoulder, elbow, wrist);

    let knee_y = hip_y + m.body_height * 0.35;
    let ankle_y = hip_y + m.body_height * 0.7;

    let front_knee = Point::new(
        front_hip.x + direction * m.hip_width * (0.05 + limbs.front_leg_bend),
        knee_y,
    );
    let front_ankle = Point::new(
        front_knee.x + direction * m.hip_width * (0.15 + limbs.front_leg_bend),
        ankle_y,
    );
    out.limb(front_hip, front_knee, front_ankle);

    // back leg trails opposite the facing direction
    let back_knee = Point::new(
        back_hip.x - direction * m.hip_width * limbs.back_leg_bend,
        knee_y,
    );
    let back_ankle = Point::new(
        back_knee.x - direction * m.hip_width * (0.1 + limbs.back_leg_bend),
        ankle_y,
    );
    out.limb(back_hip, back_knee, back_ankle);
}

/// Elbow at 40% of shoulder width along `angle`, wrist a further 50%.
fn arm(shoulder: Point, angle: f64, x_sign: f64, shoulder_width: f64) -> (Point, Point) {
    let dir_x = x_sign * angle.cos();
    let dir_y = angle.sin();
    let elbow = Point::new(
        shoulder.x + dir_x * shoulder_width * 0.4,
        shoulder.y + dir_y * shoulder_width * 0.4,
    );
    let wrist = Point::new(
        elbow.x + dir_x * shoulder_width * 0.5,
        elbow.y + dir_y * shoulder_width * 0.5,
    );
    (elbow, wrist)
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/layout.rs"]
mod tests;
