//! Depth-first search (§4.8): a LIFO stack, no open-set/history bookkeeping.
//! All children of a node are expanded before any of them is queued, sorted
//! ascending by `lt` and pushed in that order, so the *least* promising child
//! ends up on top of the stack and is popped first — matching the reference
//! `depth_first_search.hpp`'s sort-then-`push_back` order exactly, rather
//! than visiting the most promising child first.

use std::rc::Rc;
use std::time::Instant;

use crate::error::Result;
use crate::params::CommonParameters;
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::StreamingBranchingScheme;

pub struct DepthFirstSearchParameters<'cb, S: StreamingBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
}

impl<S: StreamingBranchingScheme> Default for DepthFirstSearchParameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
        }
    }
}

/// Runs depth-first search (§4.8).
pub fn depth_first_search<'s, S: StreamingBranchingScheme>(
    scheme: &'s S,
    mut parameters: DepthFirstSearchParameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.common.validate()?;

    let span = tracing::info_span!("depth_first_search");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut stack: Vec<Rc<S::Node>> = vec![root];

    while let Some(current) = stack.pop() {
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

        let mut children: Vec<Rc<S::Node>> = Vec::new();
        let mut node = current;
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
            if let Some(cutoff) = &parameters.common.cutoff {
                if scheme.bound(&child, cutoff) {
                    continue;
                }
            }

            children.push(child);
        }

        children.sort_by(|a, b| {
            if scheme.lt(a, b) {
                std::cmp::Ordering::Less
            } else if scheme.lt(b, a) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        });
        stack.extend(children.into_iter().map(|child| {
            output.counters.number_of_nodes_expanded += 1;
            child
        }));

        output.counters.number_of_nodes += 1;
        output.counters.maximum_size_of_the_queue =
            output.counters.maximum_size_of_the_queue.max(stack.len() as i64);
    }

    output.exhaustive = stack.is_empty();
    output.elapsed = start.elapsed();
    Ok(output)
}
