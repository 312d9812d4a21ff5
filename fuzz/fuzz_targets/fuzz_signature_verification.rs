#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;
use weierstrass_ecc::{Curve, Parameters, Signature, VerifyingKey};

fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let Ok(curve) = Curve::new(-3, 1, 1217u32) else {
        return;
    };
    let Ok(base) = curve.point(1202, 825) else {
        return;
    };
    let Ok(params) = Parameters::new(base.clone(), 1259u32.into()) else {
        return;
    };

    let secret = u16::from_le_bytes([data[0], data[1]]);
    let public = base.scalar_mul(&BigUint::from(secret));
    let x = BigUint::from(u16::from_le_bytes([data[2], data[3]]));
    let y = BigUint::from(u16::from_le_bytes([data[4], data[5]]));

    let verifying_key = VerifyingKey::new(params, public);
    let _ = verifying_key.verify_message(&data[6..], &Signature::new(x, y));
});
