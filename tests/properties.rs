use incbeta::special::{beta_inc, classify, Regime};
use proptest::prelude::*;

fn pair(a: f64, b: f64, x: f64) -> (f64, f64) {
    beta_inc(a, b, x, 1.0 - x).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn result_is_a_probability_pair(a in 0.1f64..100.0, b in 0.1f64..100.0, x in 0.0f64..=1.0) {
        let (w, w1) = pair(a, b, x);
        prop_assert!((0.0..=1.0).contains(&w), "w={w} a={a} b={b} x={x}");
        prop_assert!((0.0..=1.0).contains(&w1), "w1={w1} a={a} b={b} x={x}");
        prop_assert!((w + w1 - 1.0).abs() < 1e-14, "w={w} w1={w1} a={a} b={b} x={x}");
    }

    #[test]
    fn exchanging_parameters_mirrors_the_pair(a in 0.1f64..100.0, b in 0.1f64..100.0, x in 0.0f64..=1.0) {
        let y = 1.0 - x;
        let (w, w1) = beta_inc(a, b, x, y).unwrap();
        let (v, v1) = beta_inc(b, a, y, x).unwrap();
        prop_assert!((w - v1).abs() < 1e-12, "w={w} v1={v1} a={a} b={b} x={x}");
        prop_assert!((w1 - v).abs() < 1e-12, "w1={w1} v={v} a={a} b={b} x={x}");
    }

    #[test]
    fn increasing_in_x(a in 0.1f64..100.0, b in 0.1f64..100.0, x1 in 0.0f64..=1.0, x2 in 0.0f64..=1.0) {
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (w_lo, _) = pair(a, b, lo);
        let (w_hi, _) = pair(a, b, hi);
        prop_assert!(w_lo <= w_hi + 1e-12, "I({lo})={w_lo} > I({hi})={w_hi} a={a} b={b}");
    }

    #[test]
    fn unit_b_is_a_power(a in 0.1f64..50.0, x in 0.01f64..0.99) {
        let (w, _) = pair(a, 1.0, x);
        prop_assert!((w - x.powf(a)).abs() < 1e-12, "w={w} a={a} x={x}");
    }

    #[test]
    fn negligible_parameters_split_the_mass(a in 1e-30f64..1e-20, b in 1e-30f64..1e-20, x in 0.01f64..0.99) {
        let c = classify(a, b, x, 1.0 - x, f64::EPSILON).unwrap();
        prop_assert_eq!(c.regime, Regime::Degenerate);
        let (w, w1) = pair(a, b, x);
        prop_assert!((w - b / (a + b)).abs() < 1e-15);
        prop_assert!((w1 - a / (a + b)).abs() < 1e-15);
    }

    #[test]
    fn boundaries_are_exact(a in 0.1f64..100.0, b in 0.1f64..100.0) {
        prop_assert_eq!(pair(a, b, 0.0), (0.0, 1.0));
        prop_assert_eq!(pair(a, b, 1.0), (1.0, 0.0));
    }

    #[test]
    fn boundaries_win_over_a_vanishing_parameter(p in 0.1f64..100.0) {
        prop_assert_eq!(pair(p, 0.0, 1.0), (1.0, 0.0));
        prop_assert_eq!(pair(p, 0.0, 0.0), (0.0, 1.0));
        prop_assert_eq!(pair(0.0, p, 0.0), (0.0, 1.0));
        prop_assert_eq!(pair(0.0, p, 1.0), (1.0, 0.0));
    }
}
