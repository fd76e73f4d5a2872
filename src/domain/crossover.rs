//! Crossover detection between two aligned indicator series.

use super::indicator::IndicatorSeries;

/// Direction of a single crossing: +1 when `a` moves from at-or-below `b`
/// to above it, -1 for the opposite transition, 0 otherwise.
pub fn cross_direction(prev_a: f64, prev_b: f64, a: f64, b: f64) -> i8 {
    if prev_a <= prev_b && a > b {
        1
    } else if prev_a >= prev_b && a < b {
        -1
    } else {
        0
    }
}

/// Scan two aligned series and mark every crossing.
///
/// Output is aligned to the shorter input. A non-zero value at index i
/// requires both series valid at i and i-1; anything inside either
/// warm-up window yields 0.
pub fn crossovers(a: &IndicatorSeries, b: &IndicatorSeries) -> Vec<i8> {
    let len = a.len().min(b.len());
    let mut out = vec![0i8; len];

    for i in 1..len {
        let (Some(pa), Some(pb), Some(ca), Some(cb)) = (
            a.value_at(i - 1),
            b.value_at(i - 1),
            a.value_at(i),
            b.value_at(i),
        ) else {
            continue;
        };
        out[i] = cross_direction(pa, pb, ca, cb);
    }

    out
}
