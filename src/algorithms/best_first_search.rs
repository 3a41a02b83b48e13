//! Best-first search (BFS\*, §4.4): a single global open set, no capacity
//! bound, pruned by the solution pool's current worst.

use std::rc::Rc;
use std::time::Instant;

use crate::algorithms::{is_pruned, should_stop};
use crate::error::Result;
use crate::open_set::Frontier;
use crate::params::CommonParameters;
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::StreamingBranchingScheme;

pub struct BestFirstSearchParameters<'cb, S: StreamingBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
}

impl<S: StreamingBranchingScheme> Default for BestFirstSearchParameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
        }
    }
}

/// Runs best-first search to completion, a budget, or a goal (§4.4).
pub fn best_first_search<'s, S: StreamingBranchingScheme>(
    scheme: &'s S,
    mut parameters: BestFirstSearchParameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.common.validate()?;

    let span = tracing::info_span!("best_first_search");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut frontier = Frontier::new(scheme);
    frontier.seed(root);
    let mut current: Option<Rc<S::Node>> = None;

    loop {
        if should_stop(
            scheme,
            &parameters.common,
            start,
            output.counters.number_of_nodes,
            output.solution_pool.best(),
        ) {
            break;
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
                    output.record_new_best(scheme, start.elapsed(), &mut parameters.common.new_solution_callback);
                }
            }

            if !scheme.leaf(&child) && !is_pruned(scheme, &parameters.common, &child, output.solution_pool.worst()) {
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

    output.exhaustive = frontier.is_empty() && current.is_none();
    output.elapsed = start.elapsed();
    Ok(output)
}
