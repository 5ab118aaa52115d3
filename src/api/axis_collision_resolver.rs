use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::error::{AxisError, AxisResult};

use super::{AxisAppearance, TickLayout};

/// Minimum center-to-center distance between horizontal tick labels.
pub const COLLISION_MIN_SEPARATION_PX: f64 = 22.0;
pub const COLLISION_ITERATIONS: usize = 100;
/// Ticks whose settled position is within this distance of their ideal
/// position keep their original geometry.
pub const COLLISION_SETTLE_EPSILON_PX: f64 = 0.01;

/// Parameters of the 1D relaxation used to pull overlapping labels apart.
///
/// Each particle is pulled to its ideal position with `strength * alpha`
/// and pushed away from its neighbors when closer than
/// `min_separation_px`. `alpha` cools from 1 towards 0 so that it reaches
/// `alpha_min` after 300 iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationParams {
    pub iterations: usize,
    pub min_separation_px: f64,
    pub strength: f64,
    pub velocity_decay: f64,
    pub alpha_min: f64,
}

impl Default for RelaxationParams {
    fn default() -> Self {
        Self {
            iterations: COLLISION_ITERATIONS,
            min_separation_px: COLLISION_MIN_SEPARATION_PX,
            strength: 1.0,
            velocity_decay: 0.4,
            alpha_min: 0.001,
        }
    }
}

impl RelaxationParams {
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_min_separation_px(mut self, min_separation_px: f64) -> Self {
        self.min_separation_px = min_separation_px;
        self
    }

    pub fn validate(self) -> AxisResult<()> {
        if !self.min_separation_px.is_finite() || self.min_separation_px < 0.0 {
            return Err(AxisError::InvalidConfig(
                "collision separation must be finite and >= 0".to_owned(),
            ));
        }
        if !self.strength.is_finite() || !(0.0..=1.0).contains(&self.strength) {
            return Err(AxisError::InvalidConfig(
                "collision strength must be in [0, 1]".to_owned(),
            ));
        }
        if !self.velocity_decay.is_finite() || !(0.0..=1.0).contains(&self.velocity_decay) {
            return Err(AxisError::InvalidConfig(
                "collision velocity decay must be in [0, 1]".to_owned(),
            ));
        }
        if !self.alpha_min.is_finite() || self.alpha_min <= 0.0 || self.alpha_min >= 1.0 {
            return Err(AxisError::InvalidConfig(
                "collision alpha_min must be in (0, 1)".to_owned(),
            ));
        }
        Ok(())
    }

    fn alpha_decay(self) -> f64 {
        1.0 - self.alpha_min.powf(1.0 / 300.0)
    }
}

/// Relaxation only runs for horizontal axes that draw ticks with flexible
/// tick placement.
#[must_use]
pub fn collision_resolution_applies(appearance: &AxisAppearance) -> bool {
    appearance.orientation.is_horizontal() && appearance.show_ticks && appearance.flex_ticks
}

/// Settles `ideal` positions so that neighbors are at least
/// `params.min_separation_px` apart while staying close to their ideal.
///
/// The result does not depend on input order beyond which of two equal
/// ideal positions ends up first. Fewer than two positions, non-finite
/// input and invalid params return the input unchanged.
#[must_use]
pub fn relax_positions(ideal: &[f64], params: RelaxationParams) -> Vec<f64> {
    if ideal.len() < 2
        || ideal.iter().any(|value| !value.is_finite())
        || params.validate().is_err()
    {
        return ideal.to_vec();
    }

    let count = ideal.len();
    let separation = params.min_separation_px;
    let alpha_decay = params.alpha_decay();
    let mut positions = ideal.to_vec();
    let mut velocities = vec![0.0; count];
    let mut pushes = vec![0.0; count];
    let mut order: Vec<usize> = (0..count).collect();
    let mut alpha = 1.0_f64;

    for _ in 0..params.iterations {
        alpha -= alpha * alpha_decay;

        for index in 0..count {
            velocities[index] += (ideal[index] - positions[index]) * params.strength * alpha;
        }

        // Collisions are resolved on predicted positions, all pairs at once.
        let predicted: Vec<f64> = positions
            .iter()
            .zip(&velocities)
            .map(|(x, v)| x + v)
            .collect();
        sort_by_position(&mut order, &predicted, ideal);
        pushes.fill(0.0);
        for pair in order.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let gap = predicted[right] - predicted[left];
            if gap < separation {
                let half = (separation - gap) / 2.0;
                pushes[left] -= half;
                pushes[right] += half;
            }
        }

        for index in 0..count {
            velocities[index] = (velocities[index] + pushes[index]) * (1.0 - params.velocity_decay);
            positions[index] += velocities[index];
        }
    }

    sort_by_position(&mut order, &positions, ideal);
    enforce_min_separation(&mut positions, &order, separation);
    positions
}

/// Moves overlapping ticks of `layout` apart and returns how many moved.
///
/// A moved tick adopts the settled x for its outer end and label anchor;
/// `x1` keeps marking the true value on the domain line.
pub fn resolve_tick_collisions(layout: &mut TickLayout, params: RelaxationParams) -> usize {
    if layout.ticks.len() < 2 {
        return 0;
    }

    let ideal: Vec<f64> = layout.ticks.iter().map(|tick| tick.x1).collect();
    let settled = relax_positions(&ideal, params);

    let mut moved = 0;
    for (tick, x) in layout.ticks.iter_mut().zip(settled) {
        if (x - tick.x1).abs() > COLLISION_SETTLE_EPSILON_PX {
            trace!(value = tick.value, from = tick.x1, to = x, "tick label nudged");
            tick.x2 = x;
            tick.label_x = x;
            moved += 1;
        }
    }

    if moved > 0 {
        debug!(
            moved,
            ticks = layout.ticks.len(),
            separation = params.min_separation_px,
            "resolved tick label collisions"
        );
    }
    moved
}

fn sort_by_position(order: &mut [usize], positions: &[f64], ideal: &[f64]) {
    order.sort_by(|&a, &b| {
        positions[a]
            .partial_cmp(&positions[b])
            .unwrap_or(Ordering::Equal)
            .then_with(|| ideal[a].partial_cmp(&ideal[b]).unwrap_or(Ordering::Equal))
            .then_with(|| a.cmp(&b))
    });
}

/// Least-squares projection onto `x[order[k+1]] - x[order[k]] >= separation`
/// (pool-adjacent-violators on `x - k * separation`). No-op when the
/// constraint already holds.
fn enforce_min_separation(positions: &mut [f64], order: &[usize], separation: f64) {
    let violated = order
        .windows(2)
        .any(|pair| positions[pair[1]] - positions[pair[0]] < separation);
    if !violated {
        return;
    }

    // (mean, weight) blocks of the shifted sequence.
    let mut blocks: Vec<(f64, usize)> = Vec::with_capacity(order.len());
    for (rank, &index) in order.iter().enumerate() {
        let mut block = (positions[index] - rank as f64 * separation, 1_usize);
        while let Some(&(mean, weight)) = blocks.last() {
            if mean < block.0 {
                break;
            }
            blocks.pop();
            let total = weight + block.1;
            block = (
                (mean * weight as f64 + block.0 * block.1 as f64) / total as f64,
                total,
            );
        }
        blocks.push(block);
    }

    let mut rank = 0;
    for (mean, weight) in blocks {
        for _ in 0..weight {
            positions[order[rank]] = mean + rank as f64 * separation;
            rank += 1;
        }
    }
}
