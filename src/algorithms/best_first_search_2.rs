//! Batch best-first search (BFS\*, §4.1/§4.4 batch variant): identical to
//! [`crate::algorithms::best_first_search`] except that a popped node yields
//! *all* of its children in one call to [`BatchBranchingScheme::children`]
//! instead of one child per pop, so there is no cursor/requeue dance — a node
//! is either pruned on pop or fully expanded and discarded. Grounded on
//! `best_first_search_2.hpp` in the reference implementation, the batch
//! counterpart to the streaming `best_first_search.hpp`.

use std::time::Instant;

use crate::algorithms::{is_pruned, should_stop};
use crate::error::Result;
use crate::open_set::Frontier;
use crate::params::CommonParameters;
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::BatchBranchingScheme;

pub struct BestFirstSearch2Parameters<'cb, S: BatchBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
}

impl<S: BatchBranchingScheme> Default for BestFirstSearch2Parameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
        }
    }
}

/// Runs batch best-first search to completion, a budget, or a goal.
pub fn best_first_search_2<'s, S: BatchBranchingScheme>(
    scheme: &'s S,
    mut parameters: BestFirstSearch2Parameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.common.validate()?;

    let span = tracing::info_span!("best_first_search_2");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut frontier = Frontier::new(scheme);
    frontier.seed(root);

    while !frontier.is_empty() {
        if should_stop(
            scheme,
            &parameters.common,
            start,
            output.counters.number_of_nodes,
            output.solution_pool.best(),
        ) {
            break;
        }

        let node = frontier.pop_min().expect("frontier is non-empty");
        output.counters.number_of_nodes += 1;

        if is_pruned(scheme, &parameters.common, &node, output.solution_pool.worst()) {
            continue;
        }

        for child in scheme.children(&node) {
            output.counters.number_of_nodes_processed += 1;

            if scheme.better(&child, output.solution_pool.worst()) {
                let outcome = output.solution_pool.add(child.clone());
                if outcome.was_added() {
                    output.counters.number_of_nodes_added_to_the_solution_pool += 1;
                }
                if outcome.is_new_best() {
                    output.record_new_best(scheme, start.elapsed(), &mut parameters.common.new_solution_callback);
                }
            }

            if !scheme.leaf(&child) && !is_pruned(scheme, &parameters.common, &child, output.solution_pool.worst()) {
                if frontier.insert(child) {
                    output.counters.number_of_nodes_expanded += 1;
                }
            }
        }

        output.counters.maximum_size_of_the_queue =
            output.counters.maximum_size_of_the_queue.max(frontier.len() as i64);
    }

    output.exhaustive = frontier.is_empty();
    output.elapsed = start.elapsed();
    Ok(output)
}
