//! Property-based invariant tests for the synthesis pipeline.
//!
//! 1. Gradient lookups always yield channels in [0, 1], whatever the input.
//! 2. Values below the domain map to the same color as the domain minimum.
//! 3. A generated grid has exactly `resolution_u × resolution_v` vertices.
//! 4. Particle count is fixed at initialization and never changes.
//! 5. The field is exactly `strength` at a control point's center.

use holoface::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn gradient_choice() -> impl Strategy<Value = GradientChoice> {
    prop_oneof![
        Just(GradientChoice::Default),
        Just(GradientChoice::RedEmphasis),
        Just(GradientChoice::BlueEmphasis),
    ]
}

proptest! {
    #[test]
    fn color_channels_stay_normalized(
        value in -1.0e6f32..1.0e6,
        min in -100.0f32..100.0,
        span in 0.001f32..50.0,
        choice in gradient_choice(),
    ) {
        let color = color_for(value, min, min + span, &choice.gradient(), 1.0).unwrap();
        prop_assert!(color.rgb().is_normalized(), "{:?}", color);
    }
}

proptest! {
    #[test]
    fn below_domain_clamps_to_minimum(
        below in 0.0f32..1.0e4,
        min in -10.0f32..10.0,
        span in 0.01f32..10.0,
    ) {
        let g = GradientChoice::Default.gradient();
        prop_assert_eq!(
            color_for(min - below, min, min + span, &g, 0.7).unwrap(),
            color_for(min, min, min + span, &g, 0.7).unwrap()
        );
    }
}

proptest! {
    #[test]
    fn grid_vertex_count_is_exact(res_u in 2usize..40, res_v in 2usize..40) {
        let spec = SurfaceSpec {
            resolution_u: res_u,
            resolution_v: res_v,
            ..Default::default()
        };
        let surface = spec.build().unwrap();
        prop_assert_eq!(surface.vertex_count(), res_u * res_v);
        prop_assert_eq!(surface.grid().map(|g| (g.rows, g.cols)), Some((res_u, res_v)));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn particle_count_is_invariant(
        count in 1usize..300,
        shell_fraction in 0.0f32..=1.0,
        steps in 0usize..50,
        seed in any::<u64>(),
    ) {
        let surface = default_primitive();
        let settings = ParticleSettings { shell_fraction, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut system = ParticleSystem::initialize(&surface, count, &settings, &mut rng).unwrap();
        prop_assert_eq!(system.len(), count);
        for _ in 0..steps {
            system.step(&mut rng);
        }
        prop_assert_eq!(system.len(), count);
        prop_assert!(system.particles().iter().all(|p| p.position.is_finite()));
    }
}

proptest! {
    #[test]
    fn field_peaks_at_center(
        x in -5.0f32..5.0,
        y in -5.0f32..5.0,
        z in -5.0f32..5.0,
        strength in -2.0f32..2.0,
        width in 0.001f32..3.0,
    ) {
        let center = Point3::new(x, y, z);
        let field = FeatureField::new(vec![ControlPoint::new(center, strength, width).unwrap()]).unwrap();
        prop_assert_eq!(field.evaluate(&center), strength);
    }
}
