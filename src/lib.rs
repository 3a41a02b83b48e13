//! A generic, anytime tree-search framework for combinatorial optimization.
//!
//! Tree search here means branch-and-bound in the broad sense: an
//! optimization problem is explored as a tree of partial solutions (nodes),
//! where each node can be branched into children, bounded against the best
//! solution found so far, and, for feasible leaves, turned into a candidate
//! solution. Unlike a textbook branch-and-bound routine that only returns
//! when it's done, every algorithm in this crate is *anytime*: it maintains
//! a running [`pool::SolutionPool`] of the best solutions seen so far and can
//! be interrupted (by a time limit, a node limit, or a goal bound) at any
//! point and still hand back a usable answer.
//!
//! To use the crate, implement [`scheme::BranchingScheme`] (plus either
//! [`scheme::StreamingBranchingScheme`] or [`scheme::BatchBranchingScheme`])
//! for your problem, then run one of the search drivers in [`algorithms`]:
//! best-first search (streaming or batch), iterative memory-bounded
//! best-first search, iterative beam search, anytime column search,
//! depth-first search, greedy descent, or nested best-first/breadth-first
//! search.

pub mod algorithms;
pub mod error;
pub mod open_set;
pub mod params;
pub mod pool;
pub mod report;
pub mod scheme;
pub mod schemes;

pub use error::{Error, Result};
pub use params::CommonParameters;
pub use pool::{AddOutcome, SolutionPool};
pub use report::{Counters, IntermediateOutput, Output, OutputSummary, Report};
pub use scheme::{BatchBranchingScheme, BranchingScheme, StreamingBranchingScheme};

pub use algorithms::anytime_column_search::{anytime_column_search, AnytimeColumnSearchParameters};
pub use algorithms::best_first_search::{best_first_search, BestFirstSearchParameters};
pub use algorithms::best_first_search_2::{best_first_search_2, BestFirstSearch2Parameters};
pub use algorithms::depth_first_search::{depth_first_search, DepthFirstSearchParameters};
pub use algorithms::greedy::{greedy, GreedyParameters};
pub use algorithms::imbbfs::{iterative_memory_bounded_best_first_search, ImbbfsParameters};
pub use algorithms::iterative_beam_search::{iterative_beam_search, IterativeBeamSearchParameters};
pub use algorithms::nested_best_first_breadth_first_search::{
    nested_best_first_breadth_first_search, NestedBestFirstBreadthFirstSearchParameters,
};
