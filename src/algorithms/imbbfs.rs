//! Iterative memory-bounded best-first search (IMBBFS, §4.5): BFS\* with a
//! hard cap on queue size, restarting with a growing cap until an iteration
//! completes without evicting anything.

use std::rc::Rc;
use std::time::Instant;

use crate::algorithms::{is_pruned, should_stop};
use crate::error::Result;
use crate::open_set::Frontier;
use crate::params::{grow, validate_growth, CommonParameters};
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::StreamingBranchingScheme;

pub struct ImbbfsParameters<'cb, S: StreamingBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
    /// Queue cap attempted on the first iteration.
    pub minimum_size_of_the_queue: i64,
    /// Queue cap above which the outer loop gives up growing further.
    pub maximum_size_of_the_queue: i64,
    /// Multiplicative growth applied to the cap between iterations.
    pub growth_factor: f64,
}

impl<S: StreamingBranchingScheme> Default for ImbbfsParameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
            minimum_size_of_the_queue: 1,
            maximum_size_of_the_queue: 100_000_000,
            growth_factor: 1.5,
        }
    }
}

impl<S: StreamingBranchingScheme> ImbbfsParameters<'_, S> {
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

/// Runs IMBBFS (§4.5).
pub fn iterative_memory_bounded_best_first_search<'s, S: StreamingBranchingScheme>(
    scheme: &'s S,
    mut parameters: ImbbfsParameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.validate()?;

    let span = tracing::info_span!("iterative_memory_bounded_best_first_search");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut cap = parameters.minimum_size_of_the_queue;

    'outer: loop {
        if cap > parameters.maximum_size_of_the_queue {
            break;
        }
        output.counters.number_of_iterations += 1;

        let mut frontier = Frontier::with_capacity(scheme, cap.max(1) as usize);
        frontier.seed(root.clone());
        let mut current: Option<Rc<S::Node>> = None;
        let mut exhausted_this_iteration = true;

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
                current = frontier.pop_min();
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
                    if frontier.insert(child) {
                        output.counters.number_of_nodes_expanded += 1;
                    }
                }
            }

            if scheme.infertile(&node) {
                current = None;
            } else {
                let should_requeue = frontier
                    .peek_min()
                    .map(|min| scheme.lt(min, &node))
                    .unwrap_or(false);
                if should_requeue {
                    frontier.requeue(node);
                    current = None;
                } else {
                    current = Some(node);
                }
            }

            output.counters.maximum_size_of_the_queue =
                output.counters.maximum_size_of_the_queue.max(frontier.len() as i64);
        }

        if frontier.not_exhaustive() {
            exhausted_this_iteration = false;
        }

        if exhausted_this_iteration {
            output.exhaustive = true;
            break;
        }

        cap = grow(cap, parameters.growth_factor);
    }

    output.elapsed = start.elapsed();
    Ok(output)
}
