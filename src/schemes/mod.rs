//! Example branching schemes. Not part of the core framework: these exist to
//! exercise the algorithms in [`crate::algorithms`] and to back the
//! `tree_search_cli` binary and the end-to-end tests.

pub mod permutation_tsp;
