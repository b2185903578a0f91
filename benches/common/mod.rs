#![allow(dead_code)]

use criterion::PlotConfiguration;
use rand::distributions::{Distribution, Uniform};
use rand::prelude::ThreadRng;
use rand::Rng;

pub const SIZES: [usize; 8] = [
    1 << 8,
    1 << 10,
    1 << 12,
    1 << 14,
    1 << 16,
    1 << 18,
    1 << 20,
    1 << 22,
];

pub fn fill_random_vec(rng: &mut ThreadRng, len: usize) -> Vec<i64> {
    let sample = Uniform::new(i64::MIN, i64::MAX);

    let mut vec = Vec::with_capacity(len);
    for _ in 0..len {
        vec.push(sample.sample(rng));
    }

    vec
}

/// Returns a random inclusive range within `0..len`.
pub fn random_range(rng: &mut ThreadRng, len: usize) -> (usize, usize) {
    let begin = rng.gen_range(0..len);
    let end = begin + rng.gen_range(0..len - begin);
    (begin, end)
}

pub fn plot_config() -> PlotConfiguration {
    PlotConfiguration::default().summary_scale(criterion::AxisScale::Logarithmic)
}
