//! Estimation arithmetic over register arrays.
//!
//! Cardinality uses the LogLog-Beta form of the HyperLogLog estimator: a
//! bias-corrected harmonic mean of `2^-lz` register contributions whose
//! small-range correction is a continuous polynomial in the number of
//! still-zero registers. Similarity counts exact register collisions
//! between two arrays and subtracts the collisions two unrelated streams
//! of the same cardinalities would produce by accident, per the
//! HyperMinHash analysis (Yu & Weber, <https://arxiv.org/abs/1710.08436>).

use std::mem;

use crate::registers::{M, P, Q, R};

/// Harmonic-mean bias constant for `M` registers.
const ALPHA: f64 = 0.7213 / (1.0 + 1.079 / M as f64);

/// Leading constant of the closed-form expected-collision approximation.
const COLLISION_C: f64 = 0.169_919_487_159_739_1;

/// LogLog-Beta correction for `M = 2^14`, evaluated at the number of
/// zero-valued registers. Continuous, so the estimate has no step at the
/// small-range boundary.
fn beta(zeros: f64) -> f64 {
    let zl = (zeros + 1.0).ln();
    -0.370393911 * zeros
        + 0.070471823 * zl
        + 0.17393686 * zl.powi(2)
        + 0.16339839 * zl.powi(3)
        - 0.09237745 * zl.powi(4)
        + 0.03738027 * zl.powi(5)
        - 0.005384159 * zl.powi(6)
        + 0.00042419 * zl.powi(7)
}

/// Estimated number of distinct items folded into `cells`. Never negative;
/// exactly zero for an untouched array.
pub(crate) fn cardinality(cells: &[u16]) -> f64 {
    let mut sum = 0.0;
    let mut zeros = 0.0;
    for &cell in cells {
        let lz = (cell >> R) as i32;
        if lz == 0 {
            zeros += 1.0;
        }
        sum += 2f64.powi(-lz);
    }
    let m = M as f64;
    (ALPHA * m * (m - zeros) / (beta(zeros) + sum)).max(0.0)
}

/// Jaccard similarity estimate between two register arrays. Clamped to
/// `[0, 1]`; defined as `0.0` when there are no collisions at all, which
/// covers the two-empty-sketches case.
pub(crate) fn similarity(a: &[u16], b: &[u16]) -> f64 {
    let mut collisions = 0u64;
    let mut occupied = 0u64;
    for (&x, &y) in a.iter().zip(b) {
        if x != 0 && x == y {
            collisions += 1;
        }
        if x != 0 || y != 0 {
            occupied += 1;
        }
    }
    if collisions == 0 {
        return 0.0;
    }
    let expected = expected_collisions(cardinality(a), cardinality(b));
    if (collisions as f64) < expected {
        return 0.0;
    }
    (collisions as f64 - expected) / occupied as f64
}

/// Register collisions two unrelated streams of cardinalities `n` and `m`
/// would produce by accident. Closed-form approximation once the larger
/// stream exceeds `2^(P+5)`; the exact per-slot sum below that.
fn expected_collisions(mut n: f64, mut m: f64) -> f64 {
    if n < m {
        mem::swap(&mut n, &mut m);
    }
    if n > 2f64.powi((1 << Q) + R as i32) {
        // Beyond what the register format can represent; force the
        // caller's collision count under the expectation.
        return u64::MAX as f64;
    }
    if n > 2f64.powi(P as i32 + 5) {
        let d = (4.0 * n / m) / (1.0 + n / m).powi(2);
        return COLLISION_C * 2f64.powi(P as i32 - R as i32) * d + 0.5;
    }
    exact_expected_collisions(n, m)
}

// Sums, over every representable (lz, rbits) slot, the probability that
// two independent streams leave the same slot in one fixed register, then
// scales by the register count.
fn exact_expected_collisions(n: f64, m: f64) -> f64 {
    let _2q: u32 = 1 << Q;
    let _2r: u32 = 1 << R;
    let mut x = 0.0;
    for i in 1..=_2q {
        for j in 1..=_2r {
            let (b1, b2) = if i != _2q {
                let den = 2f64.powi((P + R + i) as i32);
                ((_2r + j) as f64 / den, (_2r + j + 1) as f64 / den)
            } else {
                let den = 2f64.powi((P + R + i - 1) as i32);
                (j as f64 / den, (j + 1) as f64 / den)
            };
            let prx = (1.0 - b1).powf(n) - (1.0 - b2).powf(n);
            let pry = (1.0 - b1).powf(m) - (1.0 - b2).powf(m);
            x += prx * pry;
        }
    }
    x * M as f64
}
