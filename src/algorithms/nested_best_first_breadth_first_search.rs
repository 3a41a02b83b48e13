//! Nested best-first/breadth-first search (§4.8): pop a promising subtree
//! root from a dominance-aware outer open set, then sweep it breadth-first
//! up to [`NESTED_BFS_SWEEP_LIMIT`] nodes, feeding newly admitted children
//! back into both the local sweep and the outer open set.

use std::collections::VecDeque;
use std::time::Instant;

use crate::algorithms::NESTED_BFS_SWEEP_LIMIT;
use crate::error::Result;
use crate::open_set::Frontier;
use crate::params::CommonParameters;
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::StreamingBranchingScheme;

pub struct NestedBestFirstBreadthFirstSearchParameters<'cb, S: StreamingBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
}

impl<S: StreamingBranchingScheme> Default for NestedBestFirstBreadthFirstSearchParameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
        }
    }
}

/// Runs nested best-first/breadth-first search (§4.8).
pub fn nested_best_first_breadth_first_search<'s, S: StreamingBranchingScheme>(
    scheme: &'s S,
    mut parameters: NestedBestFirstBreadthFirstSearchParameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.common.validate()?;

    let span = tracing::info_span!("nested_best_first_breadth_first_search");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut frontier = Frontier::new(scheme);
    frontier.seed(root);

    while !frontier.is_empty() {
        if start.elapsed() >= parameters.common.time_limit {
            break;
        }
        if parameters.common.maximum_number_of_nodes != -1
            && output.counters.number_of_nodes > parameters.common.maximum_number_of_nodes
        {
            break;
        }
        if let Some(goal) = &parameters.common.goal {
            if !scheme.better(goal, output.solution_pool.best()) {
                break;
            }
        }

        let current_node = match frontier.pop_min() {
            Some(node) => node,
            None => break,
        };

        if scheme.bound(&current_node, output.solution_pool.worst()) {
            continue;
        }

        let mut sweep: VecDeque<_> = VecDeque::new();
        sweep.push_back(current_node);
        let mut sweep_size: i64 = 0;

        while let Some(sweep_node) = sweep.pop_front() {
            output.counters.number_of_nodes += 1;
            sweep_size += 1;
            if sweep_size > NESTED_BFS_SWEEP_LIMIT {
                break;
            }

            let mut node = sweep_node;
            while !scheme.infertile(&node) {
                let child = match scheme.next_child(&node) {
                    Some(child) => child,
                    None => continue,
                };
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

                if scheme.leaf(&child) {
                    continue;
                }
                if scheme.bound(&child, output.solution_pool.worst()) {
                    continue;
                }

                if frontier.insert(child.clone()) {
                    output.counters.number_of_nodes_expanded += 1;
                    sweep.push_back(child);
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
