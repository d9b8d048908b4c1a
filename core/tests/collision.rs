use maze_chase_core::{collide, Disc, DVec2};
use proptest::prelude::*;

fn disc() -> impl Strategy<Value = Disc> {
    (-500.0f64..500.0, -500.0f64..500.0, 0.0f64..20.0)
        .prop_map(|(x, y, radius)| Disc::new(DVec2::new(x, y), radius))
}

proptest! {
    #[test]
    fn collision_is_symmetric(a in disc(), b in disc()) {
        prop_assert_eq!(collide(&a, &b), collide(&b, &a));
    }

    #[test]
    fn circle_always_collides_with_itself(a in disc()) {
        prop_assert!(collide(&a, &a));
    }

    #[test]
    fn far_apart_circles_never_collide(a in disc(), gap in 0.01f64..100.0) {
        let offset = a.radius * 2.0 + gap;
        let b = Disc::new(a.centre + DVec2::new(offset, 0.0), a.radius);
        prop_assert!(!collide(&a, &b));
    }
}
