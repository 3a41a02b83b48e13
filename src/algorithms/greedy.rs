//! Greedy descent (§4.8): follow the single best child at each step down to
//! a leaf, recording every new-best solution found along the way.

use std::time::Instant;

use crate::error::Result;
use crate::params::CommonParameters;
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::StreamingBranchingScheme;

pub struct GreedyParameters<'cb, S: StreamingBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
}

impl<S: StreamingBranchingScheme> Default for GreedyParameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
        }
    }
}

/// Runs a single greedy descent (§4.8).
pub fn greedy<'s, S: StreamingBranchingScheme>(
    scheme: &'s S,
    mut parameters: GreedyParameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.common.validate()?;

    let span = tracing::info_span!("greedy");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut current_node = root;
    output.counters.number_of_nodes = 1;
    loop {
        let mut best_child = None;
        while !scheme.infertile(&current_node) {
            if let Some(best) = &best_child {
                if scheme.lt(best, &current_node) {
                    break;
                }
            }
            let child = match scheme.next_child(&current_node) {
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

            let replace = match &best_child {
                None => true,
                Some(best) => scheme.lt(&child, best),
            };
            if replace {
                best_child = Some(child);
            }
        }

        match best_child {
            Some(child) => {
                current_node = child;
                output.counters.number_of_nodes += 1;
                output.counters.number_of_nodes_expanded += 1;
            }
            None => break,
        }
    }

    // A single root-to-leaf descent never proves optimality over the whole
    // tree; the original `greedy.hpp` sets no such flag either.
    output.exhaustive = false;
    output.elapsed = start.elapsed();
    Ok(output)
}
