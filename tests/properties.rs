//! Property tests for tube topology and lane-gated collision

use proptest::prelude::*;
use tube_tempest::sim::{
    Enemy, EnemyKind, Entity, GameRng, Projectile, Tube, TubeDimensions, TubeShape, collides,
};

fn closed_shapes() -> impl Strategy<Value = TubeShape> {
    prop::sample::select(
        TubeShape::ALL
            .iter()
            .copied()
            .filter(|s| !s.is_open())
            .collect::<Vec<_>>(),
    )
}

fn build(shape: TubeShape) -> Tube {
    shape
        .build(&TubeDimensions::default())
        .expect("default dimensions are valid")
}

proptest! {
    #[test]
    fn adjacent_is_reversible_on_closed_tubes(
        shape in closed_shapes(),
        index in 0usize..64,
        direction in prop::sample::select(vec![-1i32, 1]),
    ) {
        let tube = build(shape);
        let n = tube.segment_count();
        let i = index % n;

        let next = tube.adjacent(i, direction);
        prop_assert!(next < n);
        prop_assert_eq!(tube.adjacent(next, -direction), i);
    }

    #[test]
    fn open_tube_clamps_instead_of_wrapping(index in 0usize..64, steps in 1i32..4) {
        let tube = build(TubeShape::FlatV);
        let n = tube.segment_count();
        prop_assert!(tube.is_open());
        prop_assert_eq!(tube.adjacent(0, -steps), 0);
        prop_assert_eq!(tube.adjacent(n - 1, steps), n - 1);

        let i = index % n;
        prop_assert!(tube.adjacent(i, 1) < n);
        prop_assert!(tube.adjacent(i, -1) < n);
    }

    #[test]
    fn collides_is_symmetric(
        seg_a in 0usize..16,
        seg_b in 0usize..16,
        depth_a in 0.0f32..=1.0,
        depth_b in 0.0f32..=1.0,
        threshold in 1.0f32..60.0,
    ) {
        let tube = build(TubeShape::Circle);
        let mut rng = GameRng::new(0);
        let enemy = Enemy::spawn(EnemyKind::Tanker, seg_a, depth_a, &mut rng);
        let mut shot = Projectile::player_shot(seg_b);
        shot.body.depth = depth_b;

        let ab = collides(&enemy, &shot, &tube, threshold);
        prop_assert_eq!(ab, collides(&shot, &enemy, &tube, threshold));
        if enemy.segment() != shot.segment() {
            prop_assert!(!ab);
        }
    }

    #[test]
    fn point_at_depth_stays_between_boundaries(index in 0usize..16, depth in -1.0f32..2.0) {
        let tube = build(TubeShape::Circle);
        let segment = tube.segment(index);
        let center = segment.center_at_depth(depth);
        let radius = center.distance(tube.center());
        prop_assert!(radius <= tube.outer_radius() + 1e-3);
        prop_assert!(radius >= segment.inner_center().distance(tube.center()) - 1e-3);
    }
}
