//! Pairwise collision detection and elastic response
//!
//! Direct O(n^2) check over every unordered pair, no broad phase. Response
//! reflects each velocity through the center-of-mass velocity, the 1D
//! perfectly elastic solution applied to whole 2D vectors (head-on idealisation).

use log::trace;

use super::states::Body;

/// Index pairs `(i, j)`, `i < j`, whose centers are closer than the sum of their radii
pub fn colliding_pairs(bodies: &[Body]) -> Vec<(usize, usize)> {
    let n = bodies.len();
    let mut pairs = Vec::new();

    for i in 0..n {
        let bi = &bodies[i];
        for j in (i + 1)..n {
            let bj = &bodies[j];
            let reach = bi.collision_radius + bj.collision_radius;
            if bi.distance_squared(bj) < reach * reach {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// v' = 2 v_cm - v for both bodies
///
/// Conserves momentum always, kinetic energy for equal masses.
pub fn resolve_elastic(a: &mut Body, b: &mut Body) {
    let (ma, mb) = (a.mass(), b.mass());
    let v_cm = (ma * a.velocity + mb * b.velocity) / (ma + mb);

    a.velocity = 2.0 * v_cm - a.velocity;
    b.velocity = 2.0 * v_cm - b.velocity;
}

/// Detect, then resolve every pair in enumeration order; returns the pair count
///
/// A body in several pairs gets each resolution applied in turn, so impulse
/// can be double counted within one pass.
pub fn apply_collisions(bodies: &mut [Body]) -> usize {
    let pairs = colliding_pairs(bodies);
    for &(i, j) in &pairs {
        // i < j, so body i is in the head and body j starts the tail
        let (head, tail) = bodies.split_at_mut(j);
        resolve_elastic(&mut head[i], &mut tail[0]);
    }
    if !pairs.is_empty() {
        trace!("resolved {} collision pair(s)", pairs.len());
    }
    pairs.len()
}
