//! Algorithm reporting (§4.9, §6): anytime callbacks and the structured,
//! serializable output produced at the end of a search.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pool::SolutionPool;
use crate::scheme::BranchingScheme;

/// Algorithm-specific counters accumulated over a search. Not every
/// algorithm fills in every field (e.g. `number_of_iterations` is only
/// meaningful for the iterative algorithms); unused fields stay at zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Counters {
    pub number_of_nodes: i64,
    pub number_of_nodes_added_to_the_solution_pool: i64,
    pub number_of_nodes_processed: i64,
    pub number_of_nodes_expanded: i64,
    pub maximum_size_of_the_queue: i64,
    pub number_of_iterations: i64,
}

/// A single "new best" event, appended every time [`crate::pool::SolutionPool::add`]
/// returns [`crate::pool::AddOutcome::AddedNewBest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntermediateOutput {
    pub value: String,
    pub time_seconds: f64,
    pub counters: Counters,
}

/// The final summary record (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputSummary {
    pub value: String,
    pub time_seconds: f64,
    pub counters: Counters,
    /// True if the search is proven exhaustive over the explored region
    /// (queue emptied without hitting a budget, and for iterative algorithms,
    /// without any capacity eviction).
    pub exhaustive: bool,
}

/// The top-level structured report (§6): `Parameters`, `IntermediaryOutputs`,
/// `Output`, matching the JSON shape the CLI writes with `--output`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report<P> {
    pub parameters: P,
    pub intermediary_outputs: Vec<IntermediateOutput>,
    pub output: OutputSummary,
}

/// The callback invoked synchronously, on the search thread, every time the
/// pool's best strictly improves (§4.9, §5). Must not assume it's cheap.
pub type NewSolutionCallback<'cb> = Box<dyn FnMut(&IntermediateOutput) + 'cb>;

/// The live result of a search: the solution pool plus bookkeeping. Distinct
/// from [`Report`], which is the serializable snapshot produced by
/// [`Output::summary`] for JSON export.
pub struct Output<'s, S: BranchingScheme> {
    pub solution_pool: SolutionPool<'s, S>,
    pub counters: Counters,
    pub elapsed: Duration,
    pub exhaustive: bool,
    pub intermediary_outputs: Vec<IntermediateOutput>,
}

impl<'s, S: BranchingScheme> Output<'s, S> {
    pub fn new(solution_pool: SolutionPool<'s, S>) -> Self {
        Self {
            solution_pool,
            counters: Counters::default(),
            elapsed: Duration::ZERO,
            exhaustive: false,
            intermediary_outputs: Vec::new(),
        }
    }

    /// Records a new-best event: pushes an [`IntermediateOutput`] and, if
    /// present, invokes the user callback.
    pub fn record_new_best(
        &mut self,
        scheme: &S,
        elapsed: Duration,
        callback: &mut Option<NewSolutionCallback<'_>>,
    ) {
        let record = IntermediateOutput {
            value: scheme.display(self.solution_pool.best()),
            time_seconds: elapsed.as_secs_f64(),
            counters: self.counters,
        };
        tracing::info!(
            value = %record.value,
            time_seconds = record.time_seconds,
            nodes = self.counters.number_of_nodes,
            "new best solution"
        );
        if let Some(cb) = callback.as_mut() {
            cb(&record);
        }
        self.intermediary_outputs.push(record);
    }

    /// Builds the serializable final summary.
    pub fn summary(&self, scheme: &S) -> OutputSummary {
        OutputSummary {
            value: scheme.display(self.solution_pool.best()),
            time_seconds: self.elapsed.as_secs_f64(),
            counters: self.counters,
            exhaustive: self.exhaustive,
        }
    }

    /// Builds the full top-level report for JSON export (§6).
    pub fn report<P>(&self, scheme: &S, parameters: P) -> Report<P> {
        Report {
            parameters,
            intermediary_outputs: self.intermediary_outputs.clone(),
            output: self.summary(scheme),
        }
    }
}
