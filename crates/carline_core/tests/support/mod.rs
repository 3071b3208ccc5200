#![allow(dead_code)]

use carline_core::contract::RideRequest;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const PROPERTY_CASES: u64 = 200;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random lane snapshot with deliberately narrow timestamp ranges so that
/// ties on one or both keys show up often.
pub fn random_requests(rng: &mut StdRng) -> Vec<RideRequest> {
    let len = rng.gen_range(0..40);
    (0..len)
        .map(|index| {
            // Some ids repeat to cover duplicate handling.
            let id = if rng.gen_bool(0.1) {
                "dup".to_string()
            } else {
                format!("ride-{index}")
            };
            RideRequest::new(id, rng.gen_range(0..6), rng.gen_range(0..4))
        })
        .collect()
}

/// Identifier drawn from a mix of ASCII and non-ASCII characters, never
/// containing the placard delimiter.
pub fn random_identifier(rng: &mut StdRng) -> String {
    const ALPHABET: &[char] = &['A', 'z', '0', '9', '-', '_', ' ', 'é', '車', '#'];
    let len = rng.gen_range(1..12);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}
