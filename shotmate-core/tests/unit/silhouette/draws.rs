use super::*;
use crate::silhouette::seed::Lcg;

struct Scripted {
    values: Vec<f64>,
    used: usize,
}

impl Scripted {
    fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            used: 0,
        }
    }
}

impl RandomSource for Scripted {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.used];
        self.used += 1;
        v
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn front_draws_map_to_named_fields_in_order() {
    // orientation, head, body, shoulder, hip, head_y, cx, cy, left arm, right arm, spread
    let mut rng = Scripted::new(&[0.9, 0.5, 0.0, 1.0, 0.5, 0.0, 0.5, 0.5, 0.0, 0.5, 0.5]);
    let d = SkeletonDraws::draw(300.0, 400.0, &mut rng);
    assert_eq!(rng.used, SkeletonDraws::draw_count(Orientation::Front));
    assert_eq!(d.orientation(), Orientation::Front);

    let b = d.base;
    assert!(close(b.head_radius, 300.0 * 0.065));
    assert!(close(b.body_height, 400.0 * 0.4));
    assert!(close(b.shoulder_width, 300.0 * 0.3));
    assert!(close(b.hip_width, 300.0 * 0.3 * 0.75));
    assert!(close(b.head_offset_y, 400.0 * 0.2));
    assert!(close(b.center_x, 150.0));
    assert!(close(b.center_y, 200.0));

    let PoseDraws::Front(f) = d.pose else {
        panic!("expected front draws");
    };
    assert!(close(f.left_arm_angle, PI * 0.6));
    assert!(close(f.right_arm_angle, PI * 2.0));
    assert!(close(f.leg_spread, 0.1));
}

#[test]
fn side_draws_take_facing_before_measurements() {
    // orientation (side), facing (right), 7 measurements, arm, front bend, back bend
    let mut rng = Scripted::new(&[
        0.1, 0.75, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 1.0 / 3.0, 0.5,
    ]);
    let d = SkeletonDraws::draw(300.0, 400.0, &mut rng);
    assert_eq!(rng.used, SkeletonDraws::draw_count(Orientation::Side(Facing::Right)));
    assert_eq!(d.orientation(), Orientation::Side(Facing::Right));
    assert!(close(d.base.head_radius, 18.0));

    let PoseDraws::Side { facing, limbs } = d.pose else {
        panic!("expected side draws");
    };
    assert_eq!(facing.direction(), 1.0);
    assert!(close(limbs.arm_angle, PI));
    assert!(close(limbs.front_leg_bend, 0.1));
    assert!(close(limbs.back_leg_bend, 0.1));
}

#[test]
fn threshold_boundary_is_side_facing() {
    let mut rng = Scripted::new(&[0.4, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let d = SkeletonDraws::draw(100.0, 100.0, &mut rng);
    assert_eq!(d.orientation(), Orientation::Side(Facing::Left));
}

#[test]
fn measurements_stay_within_jitter_bands() {
    for seed in 0..500u64 {
        let mut rng = Lcg::new(seed);
        let b = SkeletonDraws::draw(300.0, 400.0, &mut rng).base;
        assert!((18.0..=21.0).contains(&b.head_radius));
        assert!((160.0..=180.0).contains(&b.body_height));
        assert!((75.0..=90.0).contains(&b.shoulder_width));
        assert!(b.hip_width >= b.shoulder_width * 0.7 && b.hip_width <= b.shoulder_width * 0.8);
        assert!((80.0..=100.0).contains(&b.head_offset_y));
        assert!((135.0..=165.0).contains(&b.center_x));
        assert!((180.0..=220.0).contains(&b.center_y));
    }
}

#[test]
fn orientation_split_is_near_sixty_percent() {
    let front = (0..10_000u64)
        .filter(|&seed| {
            let mut rng = Lcg::new(seed);
            SkeletonDraws::draw(300.0, 400.0, &mut rng).orientation() == Orientation::Front
        })
        .count();
    let ratio = front as f64 / 10_000.0;
    // binomial sd at n=10k is ~0.005
    assert!((0.57..=0.63).contains(&ratio), "front ratio {ratio}");
}
