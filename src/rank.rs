use std::cmp::Ordering;

use ndarray::{Array1, ArrayBase, Data, DataMut, Ix1};

/// Natural ranks of `data`, ties averaged, NaN kept as NaN.
pub fn rank_data<S>(data: &ArrayBase<S, Ix1>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    let mut ranks = Array1::from_elem(data.len(), f64::NAN);
    let mut order = Vec::with_capacity(data.len());
    rank_into(data, &mut ranks, &mut order);
    ranks
}

pub fn rank_slice(data: &[f64]) -> Vec<f64> {
    rank_data(&ndarray::aview1(data)).to_vec()
}

/// Ranks `input` into `output` without allocating, using `order` as scratch.
///
/// Non-NaN values are sorted ascending (stable, so equal values keep their
/// original order) and every maximal run of equal values occupying 1-based
/// sorted positions `lo..=hi` receives `(lo + hi) / 2`. NaN values are left
/// out of the pool and come out as NaN, so they never shift other ranks.
///
/// Panics if `input` and `output` differ in length.
pub fn rank_into<S, T>(input: &ArrayBase<S, Ix1>, output: &mut ArrayBase<T, Ix1>, order: &mut Vec<usize>)
where
    S: Data<Elem = f64>,
    T: DataMut<Elem = f64>,
{
    assert_eq!(
        input.len(),
        output.len(),
        "rank output lane must match input length"
    );

    order.clear();
    for (i, &v) in input.iter().enumerate() {
        if v.is_nan() {
            output[i] = f64::NAN;
        } else {
            order.push(i);
        }
    }
    // NaN was filtered out above, so partial_cmp is total here
    order.sort_by(|&a, &b| input[a].partial_cmp(&input[b]).unwrap_or(Ordering::Equal));

    let mut lo = 0;
    while lo < order.len() {
        let value = input[order[lo]];
        let mut hi = lo + 1;
        while hi < order.len() && input[order[hi]] == value {
            hi += 1;
        }
        let rank = (lo + 1 + hi) as f64 / 2.0;
        for &idx in &order[lo..hi] {
            output[idx] = rank;
        }
        lo = hi;
    }
}
