#![allow(missing_docs)]
use crate::Point2;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SEED: &[u8; 32] = b"Qn7vKc2LmXw9RzT4pHy6JdB1sFg8NaEu";
pub const SEED2: &[u8; 32] = b"c3WqZr5VhM0xLkP8tYbN2oGu7AiDe4Sf";

/// Uniformly distributed points in the square `[-range, range)²`.
pub fn random_points_in_range(range: f64, size: usize, seed: &[u8; 32]) -> Vec<Point2<f64>> {
    let mut rng = StdRng::from_seed(*seed);
    let range = Uniform::new(-range, range);
    (0..size)
        .map(|_| Point2::new(range.sample(&mut rng), range.sample(&mut rng)))
        .collect()
}

pub fn random_points_with_seed(size: usize, seed: &[u8; 32]) -> Vec<Point2<f64>> {
    random_points_in_range(1.0, size, seed)
}

pub fn random_points_f32(size: usize, seed: &[u8; 32]) -> Vec<Point2<f32>> {
    random_points_with_seed(size, seed)
        .into_iter()
        .map(|point| Point2::new(point.x as f32, point.y as f32))
        .collect()
}

/// All integer points of the square `[-half_size, half_size]²`, row by row.
pub fn grid_points(half_size: i32) -> Vec<Point2<f64>> {
    (-half_size..=half_size)
        .flat_map(|x| (-half_size..=half_size).map(move |y| Point2::new(x as f64, y as f64)))
        .collect()
}
