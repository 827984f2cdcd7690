use log::trace;

use super::stress::StressModel;
use crate::{
    core::{link::Link, point::PointMass},
    utils::allocator::{Arena, LinkId, PointId},
};

/// Counters gathered over one call to [`RelaxationSolver::relax`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RelaxationMetrics {
    pub passes: u32,
    pub corrections: usize,
    /// Link visits skipped because the endpoints coincide.
    pub degenerate_skips: usize,
    /// Link visits skipped because an endpoint is missing from the store.
    pub missing_endpoints: usize,
    /// Links that crossed the failure boundary, in the order they broke.
    pub broken: Vec<LinkId>,
    pub max_stress: f32,
}

/// Gauss-Seidel relaxation of distance constraints.
///
/// Each pass walks the intact links in insertion order and moves both
/// endpoints halfway towards the rest length. Repeated passes converge towards
/// a configuration satisfying all links at once.
#[derive(Debug, Clone, Copy)]
pub struct RelaxationSolver {
    pub iterations: u32,
}

impl RelaxationSolver {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Runs every relaxation pass. When a stress model is given it is evaluated
    /// on the final pass only, before that pass's correction is applied.
    pub fn relax(
        &self,
        points: &mut Arena<PointId, PointMass>,
        links: &mut Arena<LinkId, Link>,
        stress: Option<&StressModel>,
    ) -> RelaxationMetrics {
        let mut metrics = RelaxationMetrics::default();

        for pass in 0..self.iterations {
            let final_pass = pass + 1 == self.iterations;
            links.for_each_mut(|link_id, link| {
                if link.is_broken() {
                    return;
                }

                let Some((a, b)) = points.get2_mut(link.a, link.b) else {
                    metrics.missing_endpoints += 1;
                    return;
                };

                let distance = a.distance(b);

                if final_pass {
                    if let Some(model) = stress {
                        if model.evaluate(link, distance) {
                            trace!("{link_id} broke at stress {:.3}", link.stress);
                            metrics.broken.push(link_id);
                        }
                        metrics.max_stress = metrics.max_stress.max(link.stress);
                    }
                }

                if Self::solve_link(a, b, link.rest_length, distance) {
                    metrics.corrections += 1;
                } else {
                    metrics.degenerate_skips += 1;
                }
            });
            metrics.passes += 1;
        }

        metrics
    }

    /// Splits the length error evenly between the endpoints along the link
    /// axis. A fixed endpoint absorbs none of it. Returns `false` when the
    /// endpoints coincide and no axis exists.
    pub fn solve_link(a: &mut PointMass, b: &mut PointMass, rest_length: f32, distance: f32) -> bool {
        if distance == 0.0 {
            return false;
        }

        let error = distance - rest_length;
        let offset = (a.position - b.position) * (error / distance / 2.0);
        a.nudge(-offset);
        b.nudge(offset);
        true
    }
}
