//! Synthetic graphs for tests and benchmarks

use rand::Rng;

/// Sample every unordered pair `i < j` independently with probability `density`.
///
/// This is the upper triangle of a random symmetric 0/1 matrix with an empty
/// diagonal.
pub fn random_graph(rng: &mut impl Rng, n: usize, density: f64) -> Vec<(usize, usize)> {
    let density = density.clamp(0.0, 1.0);
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(density) {
                edges.push((i, j));
            }
        }
    }
    edges
}

/// K_n: every pair of distinct vertices is connected
pub fn complete_graph(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect()
}

/// 0 - 1 - ... - (n-1)
pub fn path_graph(n: usize) -> Vec<(usize, usize)> {
    (1..n).map(|v| (v - 1, v)).collect()
}

/// A path closed back onto vertex 0; a triangle when `n == 3`
pub fn cycle_graph(n: usize) -> Vec<(usize, usize)> {
    let mut edges = path_graph(n);
    if n >= 3 {
        edges.push((n - 1, 0));
    }
    edges
}
