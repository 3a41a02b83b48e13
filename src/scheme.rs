//! The branching-scheme contract.
//!
//! A branching scheme defines, abstractly, the search tree for some
//! combinatorial problem. The framework never inspects a node's internal
//! state; it only calls back into the scheme through this trait.
//!
//! Nodes are shared between the framework and the scheme through [`Rc`], per
//! the ownership model: the open set, the dominance history, the solution
//! pool and the caller's own ancestry chain may all hold a handle to the same
//! node at once.

use std::cmp::Ordering;
use std::hash::Hash;
use std::path::Path;
use std::rc::Rc;

use crate::error::Result;

/// The core contract every branching scheme must implement.
///
/// `Node` is opaque to the framework: it is whatever the scheme needs to
/// represent a partial or complete solution. `DominanceKey` groups nodes into
/// signature classes for dominance pruning (§4.3); schemes that don't use
/// dominance pruning can use `()` and always answer `false` from
/// [`BranchingScheme::comparable`].
pub trait BranchingScheme {
    /// A vertex of the search tree. Owned by the scheme; the framework only
    /// ever holds `Rc<Self::Node>` handles to it.
    type Node;

    /// The equality+hash class used to group comparable nodes for dominance
    /// pruning (the "signature").
    type DominanceKey: Eq + Hash + Clone;

    /// Returns the initial node (the empty partial solution). Must never fail.
    fn root(&self) -> Rc<Self::Node>;

    /// True when `next_child`/`children` will never produce another child of
    /// `node` (the branching slots are exhausted).
    fn infertile(&self, node: &Rc<Self::Node>) -> bool;

    /// True when `node` represents a complete, feasible solution.
    fn leaf(&self, node: &Rc<Self::Node>) -> bool;

    /// True when `a`'s optimistic bound is already no better than `b`'s
    /// achieved value, i.e. `a`'s subtree can be pruned against incumbent `b`.
    fn bound(&self, a: &Rc<Self::Node>, b: &Rc<Self::Node>) -> bool;

    /// Strict improvement predicate used to order the solution pool.
    fn better(&self, a: &Rc<Self::Node>, b: &Rc<Self::Node>) -> bool;

    /// Solution-identity predicate. May always return `false` if identity is
    /// not meaningful for this scheme.
    fn equals(&self, a: &Rc<Self::Node>, b: &Rc<Self::Node>) -> bool;

    /// Strict weak ordering used to order the open set (expansion order).
    /// `a.lt(b)` true means `a` is expanded before `b`.
    fn lt(&self, a: &Rc<Self::Node>, b: &Rc<Self::Node>) -> bool;

    /// Whether dominance-based pruning applies to `node`.
    fn comparable(&self, node: &Rc<Self::Node>) -> bool;

    /// True when `a` strictly dominates `b` (same signature class, `a` is at
    /// least as good as `b` on every axis and strictly better on at least
    /// one). A scheme that always returns `true` here disables dominance
    /// pruning in effect, but the open set / history bookkeeping must still
    /// run unconditionally (§9 open questions).
    fn dominates(&self, a: &Rc<Self::Node>, b: &Rc<Self::Node>) -> bool;

    /// The signature class used to bucket `node` in the dominance history.
    fn dominance_key(&self, node: &Rc<Self::Node>) -> Self::DominanceKey;

    /// A human-readable one-line rendering of `node`, used by the reporting
    /// layer (§4.9) and the CLI.
    fn display(&self, node: &Rc<Self::Node>) -> String;

    /// The depth of `node` in the search tree. Defaults to `-1` (unknown);
    /// algorithms that are depth-layered (IBS, ACS) require schemes to
    /// override this whenever children may land at a depth other than
    /// `parent_depth + 1` (e.g. bidirectional branching).
    fn depth(&self, _node: &Rc<Self::Node>) -> i64 {
        -1
    }

    /// Synthesizes a sentinel node carrying `value` as its objective, used
    /// for goal-based early termination. `None` means the scheme does not
    /// support goal synthesis.
    fn goal_node(&self, _value: f64) -> Option<Rc<Self::Node>> {
        None
    }

    /// Persists a complete solution to `path`. The default implementation
    /// does nothing; schemes that support certificate export should override
    /// this and propagate I/O failures as [`crate::Error::CertificateWrite`].
    fn solution_write(&self, _node: &Rc<Self::Node>, _path: &Path) -> Result<()> {
        Ok(())
    }

    /// Total order used by the solution pool and the open set once `lt`/
    /// `better`/`equals` leave a tie: compares two node handles by address so
    /// that otherwise-equal nodes can still coexist in ordered containers.
    /// Mirrors the original's `node_1.get() < node_2.get()` pointer tiebreak.
    fn identity_cmp(&self, a: &Rc<Self::Node>, b: &Rc<Self::Node>) -> Ordering {
        (Rc::as_ptr(a) as usize).cmp(&(Rc::as_ptr(b) as usize))
    }
}

/// Branching schemes that expose children one at a time through a mutable
/// cursor stored on the parent node (streaming style, §4.1).
///
/// `next_child` advances the parent's internal cursor (interior mutability,
/// guarded by the framework's single-threaded invariant) and returns the next
/// child, or `None` to mean "this branching slot is pruned, keep asking".
/// The framework keeps calling `next_child` until [`BranchingScheme::infertile`]
/// becomes true.
pub trait StreamingBranchingScheme: BranchingScheme {
    fn next_child(&self, parent: &Rc<Self::Node>) -> Option<Rc<Self::Node>>;
}

/// Branching schemes that compute all children of a node at once (batch
/// style, §4.1).
pub trait BatchBranchingScheme: BranchingScheme {
    fn children(&self, parent: &Rc<Self::Node>) -> Vec<Rc<Self::Node>>;
}
