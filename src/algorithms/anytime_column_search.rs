//! Anytime column search (ACS, §4.7): like IBS, but the per-depth layers
//! persist across iterations and only the per-depth child quota grows. An
//! iteration that generates no new node at all ends the search.

use std::rc::Rc;
use std::time::Instant;

use crate::algorithms::should_stop;
use crate::error::Result;
use crate::open_set::Frontier;
use crate::params::CommonParameters;
use crate::pool::SolutionPool;
use crate::report::Output;
use crate::scheme::StreamingBranchingScheme;

pub struct AnytimeColumnSearchParameters<'cb, S: StreamingBranchingScheme> {
    pub common: CommonParameters<'cb, S>,
    /// Number of children generated per depth on the first iteration.
    pub initial_column_size: f64,
    /// Multiplicative growth applied to the column size between iterations.
    pub column_size_growth_factor: f64,
    /// Maximum number of iterations, or -1 for unbounded.
    pub maximum_number_of_iterations: i64,
}

impl<S: StreamingBranchingScheme> Default for AnytimeColumnSearchParameters<'_, S> {
    fn default() -> Self {
        Self {
            common: CommonParameters::default(),
            initial_column_size: 1.0,
            column_size_growth_factor: 1.5,
            maximum_number_of_iterations: -1,
        }
    }
}

/// Runs anytime column search (§4.7).
pub fn anytime_column_search<'s, S: StreamingBranchingScheme>(
    scheme: &'s S,
    mut parameters: AnytimeColumnSearchParameters<'_, S>,
) -> Result<Output<'s, S>> {
    parameters.common.validate()?;
    if parameters.column_size_growth_factor <= 1.0 {
        return Err(crate::error::Error::InvalidParameter {
            field: "column_size_growth_factor",
            message: "must be greater than 1.0".to_string(),
        });
    }

    let span = tracing::info_span!("anytime_column_search");
    let _guard = span.enter();
    let start = Instant::now();

    let root = scheme.root();
    let pool = SolutionPool::new(scheme, parameters.common.maximum_size_of_the_solution_pool, root.clone());
    let mut output = Output::new(pool);

    let mut layers: Vec<Frontier<'s, S>> = vec![Frontier::new(scheme)];
    layers[0].seed(root);

    let mut column_size = parameters.initial_column_size;

    'outer: loop {
        if parameters.maximum_number_of_iterations != -1
            && output.counters.number_of_iterations > parameters.maximum_number_of_iterations
        {
            break;
        }
        output.counters.number_of_iterations += 1;

        let nodes_before = output.counters.number_of_nodes;
        let quota = column_size as i64;

        let mut current_depth = 0usize;
        while current_depth < layers.len() {
            let mut number_of_children: i64 = 0;
            let mut current: Option<Rc<S::Node>> = None;

            while (current.is_some() || !layers[current_depth].is_empty()) && number_of_children < quota {
                if current.is_none() {
                    let candidate = match layers[current_depth].pop_min() {
                        Some(node) => node,
                        None => break,
                    };
                    if scheme.bound(&candidate, output.solution_pool.worst()) {
                        continue;
                    }
                    current = Some(candidate);
                }
                let node = current.as_ref().unwrap().clone();

                if let Some(child) = scheme.next_child(&node) {
                    output.counters.number_of_nodes += 1;
                    output.counters.number_of_nodes_processed += 1;

                    if should_stop(
                        scheme,
                        &parameters.common,
                        start,
                        output.counters.number_of_nodes,
                        output.solution_pool.best(),
                    ) {
                        break 'outer;
                    }

                    let child_depth = {
                        let d = scheme.depth(&child);
                        if d >= 0 {
                            d as usize
                        } else {
                            current_depth + 1
                        }
                    };

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

                    if !scheme.leaf(&child) && !scheme.bound(&child, output.solution_pool.worst()) {
                        number_of_children += 1;
                        while layers.len() <= child_depth {
                            layers.push(Frontier::new(scheme));
                        }
                        if layers[child_depth].insert(child) {
                            output.counters.number_of_nodes_expanded += 1;
                        }
                    }
                }

                if scheme.infertile(&node) {
                    current = None;
                } else {
                    let should_requeue = layers[current_depth]
                        .peek_min()
                        .map(|min| scheme.lt(min, &node))
                        .unwrap_or(false);
                    if should_requeue {
                        layers[current_depth].requeue(node);
                        current = None;
                    }
                }
            }

            if let Some(node) = current.take() {
                layers[current_depth].requeue(node);
            }

            let total: i64 = layers.iter().map(|l| l.len() as i64).sum();
            output.counters.maximum_size_of_the_queue = output.counters.maximum_size_of_the_queue.max(total);

            current_depth += 1;
        }

        if output.counters.number_of_nodes == nodes_before {
            output.exhaustive = true;
            break;
        }

        column_size *= parameters.column_size_growth_factor;
    }

    output.elapsed = start.elapsed();
    Ok(output)
}
