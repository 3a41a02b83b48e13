//! Iterative beam search (IBS, §4.6): a layered, per-depth beam with a
//! growing per-layer cap. The most intricate core component: layers are
//! retired as the search descends and re-created lazily as children target
//! deeper (or, rarely, shallower) slots.

use std::rc::Rc;
use std::time::Instant;

use crate::algorithms::{is_pruned, should_stop};
use crate::error::Result;
use crate::open_set::Frontier;
use crate::params::{grow, validate_growth, CommonParameters};
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::StreamingBranchingScheme;

pub struct IterativeBeamSearchParameters<'cb, S: StreamingBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
    pub minimum_size_of_the_queue: i64,
    pub maximum_size_of_the_queue: i64,
    pub growth_factor: f64,
}

impl<S: StreamingBranchingScheme> Default for IterativeBeamSearchParameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
            minimum_size_of_the_queue: 1,
            maximum_size_of_the_queue: 100_000_000,
            growth_factor: 2.0,
        }
    }
}

impl<S: StreamingBranchingScheme> IterativeBeamSearchParameters<'_, S> {
    fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_growth(
            "minimum_size_of_the_queue",
            self.minimum_size_of_the_queue,
            "maximum_size_of_the_queue",
            self.maximum_size_of_the_queue,
            self.growth_factor,
        )
    }
}

/// Runs iterative beam search (§4.6).
pub fn iterative_beam_search<'s, S: StreamingBranchingScheme>(
    scheme: &'s S,
    mut parameters: IterativeBeamSearchParameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.validate()?;

    let span = tracing::info_span!("iterative_beam_search");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut width = parameters.minimum_size_of_the_queue.max(1);

    'outer: loop {
        if width > parameters.maximum_size_of_the_queue {
            break;
        }
        output.counters.number_of_iterations += 1;

        let base_depth = {
            let d = scheme.depth(&root);
            if d >= 0 {
                d
            } else {
                0
            }
        };
        let mut layers: Vec<Frontier<'s, S>> = vec![Frontier::with_capacity(scheme, width as usize)];
        layers[0].seed(root.clone());

        let mut idx: usize = 0;
        while idx < layers.len() {
            let mut current: Option<Rc<S::Node>> = None;

            loop {
                if should_stop(
                    scheme,
                    &parameters.common,
                    start,
                    output.counters.number_of_nodes,
                    output.solution_pool.best(),
                ) {
                    break 'outer;
                }

                if current.is_none() {
                    current = layers[idx].pop_min();
                }
                let node = match current.take() {
                    Some(node) => node,
                    None => break,
                };

                output.counters.number_of_nodes += 1;

                if is_pruned(scheme, &parameters.common, &node, output.solution_pool.worst()) {
                    continue;
                }

                if let Some(child) = scheme.next_child(&node) {
                    output.counters.number_of_nodes_processed += 1;

                    if scheme.better(&child, output.solution_pool.worst()) {
                        let outcome = output.solution_pool.add(child.clone());
                        if outcome.was_added() {
                            output.counters.number_of_nodes_added_to_the_solution_pool += 1;
                        }
                        if outcome.is_new_best() {
                            output.record_new_best(
                                scheme,
                                start.elapsed(),
                                &mut parameters.common.new_solution_callback,
                            );
                        }
                    }

                    if !scheme.leaf(&child)
                        && !is_pruned(scheme, &parameters.common, &child, output.solution_pool.worst())
                    {
                        let current_depth = base_depth + idx as i64;
                        let reported = scheme.depth(&child);
                        // A child at or before the current depth stays in the
                        // active layer rather than being lost to an already
                        // retired slot (§4.6 edge case).
                        let target_depth = if reported >= 0 { reported } else { current_depth + 1 }
                            .max(current_depth);
                        let target_idx = (target_depth - base_depth) as usize;
                        while layers.len() <= target_idx {
                            layers.push(Frontier::with_capacity(scheme, width as usize));
                        }
                        if layers[target_idx].insert(child) {
                            output.counters.number_of_nodes_expanded += 1;
                        }
                    }
                }

                if scheme.infertile(&node) {
                    current = None;
                } else {
                    let should_requeue = layers[idx]
                        .peek_min()
                        .map(|min| scheme.lt(min, &node))
                        .unwrap_or(false);
                    if should_requeue {
                        layers[idx].requeue(node);
                        current = None;
                    } else {
                        current = Some(node);
                    }
                }

                let total: i64 = layers.iter().map(|l| l.len() as i64).sum();
                output.counters.maximum_size_of_the_queue = output.counters.maximum_size_of_the_queue.max(total);
            }

            // Retire the layer: its content is exhausted, but we keep its
            // `not_exhaustive` flag for the overflow check below.
            layers[idx].clear();
            idx += 1;
        }

        let overflowed = layers.iter().any(|layer| layer.not_exhaustive());
        if !overflowed {
            output.exhaustive = true;
            break;
        }

        width = grow(width, parameters.growth_factor);
    }

    output.elapsed = start.elapsed();
    Ok(output)
}
