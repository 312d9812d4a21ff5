//! Common test utilities shared across integration tests.

use weierstrass_ecc::{Curve, Parameters, Point};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Only logs from this crate are shown. Subsequent calls are ignored.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("weierstrass_ecc=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// `y^2 = x^3 - 3x + 1 mod 1217`, a curve of prime order 1259.
#[allow(dead_code)]
pub fn demo_curve() -> Curve {
    Curve::new(-3, 1, 1217u32).expect("demo curve is valid")
}

/// Base point `(1202, 825)` on [`demo_curve`].
#[allow(dead_code)]
pub fn demo_base(curve: &Curve) -> Point {
    curve.point(1202, 825).expect("base point lies on the demo curve")
}

/// Signature parameters over the demo base point.
#[allow(dead_code)]
pub fn demo_parameters() -> Parameters {
    let curve = demo_curve();
    Parameters::new(demo_base(&curve), 1259u32.into()).expect("demo parameters are valid")
}
