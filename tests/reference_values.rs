use incbeta::special::{beta_inc, betainc, classify, Regime};

/// Tabulated (a, b, x, Ix(a, b)) triples, seven significant digits.
const TABLE: [(f64, f64, f64, f64); 30] = [
    (0.5, 0.5, 0.01, 0.0637686),
    (0.5, 0.5, 0.1, 0.2048328),
    (0.5, 0.5, 1.0, 1.0),
    (1.0, 0.5, 0.0, 0.0),
    (1.0, 0.5, 0.01, 0.0050126),
    (1.0, 0.5, 0.1, 0.0513167),
    (1.0, 0.5, 0.5, 0.2928932),
    (1.0, 1.0, 0.5, 0.5),
    (2.0, 2.0, 0.1, 0.028),
    (2.0, 2.0, 0.2, 0.104),
    (2.0, 2.0, 0.3, 0.216),
    (2.0, 2.0, 0.4, 0.352),
    (2.0, 2.0, 0.5, 0.5),
    (2.0, 2.0, 0.6, 0.648),
    (2.0, 2.0, 0.7, 0.784),
    (2.0, 2.0, 0.8, 0.896),
    (2.0, 2.0, 0.9, 0.972),
    (5.5, 5.0, 0.5, 0.4361909),
    (10.0, 0.5, 0.9, 0.1516409),
    (10.0, 5.0, 0.5, 0.0897827),
    (10.0, 5.0, 1.0, 1.0),
    (10.0, 10.0, 0.5, 0.5),
    (20.0, 5.0, 0.8, 0.4598773),
    (20.0, 10.0, 0.6, 0.2146816),
    (20.0, 10.0, 0.8, 0.9507365),
    (20.0, 20.0, 0.5, 0.5),
    (20.0, 20.0, 0.6, 0.8979414),
    (30.0, 10.0, 0.7, 0.2241297),
    (30.0, 10.0, 0.8, 0.7586405),
    (40.0, 20.0, 0.7, 0.7001783),
];

#[test]
fn tabulated_values() {
    for &(a, b, x, expected) in TABLE.iter() {
        let (w, w1) = beta_inc(a, b, x, 1.0 - x).unwrap();
        assert!(
            (w - expected).abs() < 1e-7,
            "I_{x}({a}, {b}) = {w}, expected {expected}"
        );
        assert!((w + w1 - 1.0).abs() < 1e-15);
    }
}

#[test]
fn tabulated_values_f32() {
    for &(a, b, x, expected) in TABLE.iter() {
        let w = betainc(a as f32, b as f32, x as f32).unwrap();
        assert!(
            (w as f64 - expected).abs() < 2e-5,
            "I_{x}({a}, {b}) = {w}, expected {expected}"
        );
    }
}

#[test]
fn table_exercises_several_regimes() {
    let mut seen = Vec::new();
    for &(a, b, x, _) in TABLE.iter() {
        let regime = classify(a, b, x, 1.0 - x, f64::EPSILON).unwrap().regime;
        if !seen.contains(&regime) {
            seen.push(regime);
        }
    }
    for regime in [
        Regime::Exact,
        Regime::PowerSeries,
        Regime::ShiftedAsymptotic,
        Regime::IntegerShift,
        Regime::ContinuedFraction,
    ] {
        assert!(seen.contains(&regime), "{regime:?} not covered");
    }
}

#[test]
fn closed_form_scenarios() {
    // I_{0.5}(10, 5) = 1471/16384
    let (w, _) = beta_inc(10.0_f64, 5.0, 0.5, 0.5).unwrap();
    assert!((w - 1471.0 / 16384.0).abs() < 1e-15);

    // I_{0.5}(1, 0.5) = 1 − √0.5
    let (w, _) = beta_inc(1.0_f64, 0.5, 0.5, 0.5).unwrap();
    assert!((w - (1.0 - 0.5_f64.sqrt())).abs() < 1e-15);

    // I_x(2, 2) = 3x² − 2x³
    for &x in &[0.1_f64, 0.25, 0.5, 0.75, 0.9] {
        let (w, _) = beta_inc(2.0_f64, 2.0, x, 1.0 - x).unwrap();
        assert!((w - (3.0 * x * x - 2.0 * x * x * x)).abs() < 1e-15, "x={x}");
    }
}
