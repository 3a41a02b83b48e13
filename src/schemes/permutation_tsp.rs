//! Forward-branching permutation TSP: a tour is grown one vertex at a time,
//! bounded by its prefix length. A simplified version of the "outgoing"
//! branching scheme — the dominance, bound, and ordering logic match it
//! one-for-one, but children are generated in vertex-index order rather than
//! by a sorted-on-demand nearest-neighbor array.

use std::cell::Cell;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::scheme::{BatchBranchingScheme, BranchingScheme, StreamingBranchingScheme};

/// A node in the permutation-TSP search tree: a partial tour ending at
/// `vertex`, with `visited` tracking which vertices have been placed.
pub struct Node {
    father: Option<Rc<Node>>,
    visited: Vec<bool>,
    vertex: usize,
    number_of_vertices: usize,
    length: f64,
    next_child_pos: Cell<usize>,
}

/// A symmetric or asymmetric distance matrix, tours always starting and
/// ending at vertex 0.
pub struct PermutationTsp {
    distances: Vec<Vec<f64>>,
}

impl PermutationTsp {
    pub fn new(distances: Vec<Vec<f64>>) -> Self {
        assert!(!distances.is_empty(), "distance matrix must be non-empty");
        for row in &distances {
            assert_eq!(row.len(), distances.len(), "distance matrix must be square");
        }
        Self { distances }
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from][to]
    }

    fn number_of_vertices(&self) -> usize {
        self.distances.len()
    }

    fn completed_length(&self, node: &Node) -> f64 {
        node.length + self.distance(node.vertex, 0)
    }
}

impl BranchingScheme for PermutationTsp {
    type Node = Node;
    type DominanceKey = (usize, Vec<bool>);

    fn root(&self) -> Rc<Self::Node> {
        let n = self.number_of_vertices();
        let mut visited = vec![false; n];
        visited[0] = true;
        Rc::new(Node {
            father: None,
            visited,
            vertex: 0,
            number_of_vertices: 1,
            length: 0.0,
            next_child_pos: Cell::new(0),
        })
    }

    fn infertile(&self, node: &Rc<Self::Node>) -> bool {
        node.next_child_pos.get() >= self.number_of_vertices()
    }

    fn leaf(&self, node: &Rc<Self::Node>) -> bool {
        node.number_of_vertices == self.number_of_vertices()
    }

    fn bound(&self, node_1: &Rc<Self::Node>, node_2: &Rc<Self::Node>) -> bool {
        if node_2.number_of_vertices != self.number_of_vertices() {
            return false;
        }
        node_1.length >= self.completed_length(node_2)
    }

    fn better(&self, node_1: &Rc<Self::Node>, node_2: &Rc<Self::Node>) -> bool {
        let n = self.number_of_vertices();
        if node_1.number_of_vertices < n {
            return false;
        }
        if node_2.number_of_vertices < n {
            return true;
        }
        self.completed_length(node_1) < self.completed_length(node_2)
    }

    fn equals(&self, _node_1: &Rc<Self::Node>, _node_2: &Rc<Self::Node>) -> bool {
        false
    }

    fn lt(&self, node_1: &Rc<Self::Node>, node_2: &Rc<Self::Node>) -> bool {
        node_1.length < node_2.length
    }

    fn comparable(&self, _node: &Rc<Self::Node>) -> bool {
        true
    }

    fn dominates(&self, node_1: &Rc<Self::Node>, node_2: &Rc<Self::Node>) -> bool {
        node_1.length <= node_2.length
    }

    fn dominance_key(&self, node: &Rc<Self::Node>) -> Self::DominanceKey {
        (node.vertex, node.visited.clone())
    }

    fn depth(&self, node: &Rc<Self::Node>) -> i64 {
        node.number_of_vertices as i64
    }

    fn display(&self, node: &Rc<Self::Node>) -> String {
        if node.number_of_vertices != self.number_of_vertices() {
            return String::new();
        }
        format!("{}", self.completed_length(node))
    }

    fn solution_write(&self, node: &Rc<Self::Node>, path: &Path) -> Result<()> {
        let mut vertices = Vec::new();
        let mut current = Some(node.clone());
        while let Some(n) = current {
            vertices.push(n.vertex);
            current = n.father.clone();
        }
        vertices.reverse();

        let tour = vertices.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        let mut file = fs::File::create(path).map_err(|source| Error::CertificateWrite {
            path: path.to_path_buf(),
            source,
        })?;
        writeln!(file, "{tour}").map_err(|source| Error::CertificateWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl StreamingBranchingScheme for PermutationTsp {
    fn next_child(&self, parent: &Rc<Self::Node>) -> Option<Rc<Self::Node>> {
        let n = self.number_of_vertices();
        loop {
            let pos = parent.next_child_pos.get();
            if pos >= n {
                return None;
            }
            parent.next_child_pos.set(pos + 1);
            if parent.visited[pos] {
                continue;
            }

            let mut visited = parent.visited.clone();
            visited[pos] = true;
            return Some(Rc::new(Node {
                father: Some(parent.clone()),
                visited,
                vertex: pos,
                number_of_vertices: parent.number_of_vertices + 1,
                length: parent.length + self.distance(parent.vertex, pos),
                next_child_pos: Cell::new(0),
            }));
        }
    }
}

impl BatchBranchingScheme for PermutationTsp {
    /// Generates every unvisited-vertex child at once, independent of
    /// `next_child_pos` (the batch and streaming styles are alternative,
    /// unrelated ways of exploring the same tree, per `best_first_search_2`).
    fn children(&self, parent: &Rc<Self::Node>) -> Vec<Rc<Self::Node>> {
        let n = self.number_of_vertices();
        (0..n)
            .filter(|&vertex| !parent.visited[vertex])
            .map(|vertex| {
                let mut visited = parent.visited.clone();
                visited[vertex] = true;
                Rc::new(Node {
                    father: Some(parent.clone()),
                    visited,
                    vertex,
                    number_of_vertices: parent.number_of_vertices + 1,
                    length: parent.length + self.distance(parent.vertex, vertex),
                    next_child_pos: Cell::new(0),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_instance() -> PermutationTsp {
        // A 4-city square; the optimal tour has length 4.
        PermutationTsp::new(vec![
            vec![0.0, 1.0, 2.0, 1.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 2.0, 1.0, 0.0],
        ])
    }

    #[test]
    fn root_starts_at_vertex_zero_with_one_visited() {
        let scheme = square_instance();
        let root = scheme.root();
        assert_eq!(root.vertex, 0);
        assert_eq!(root.number_of_vertices, 1);
        assert!(root.visited[0]);
        assert!(!scheme.leaf(&root));
        assert!(!scheme.infertile(&root));
    }

    #[test]
    fn next_child_skips_already_visited_vertices() {
        let scheme = square_instance();
        let root = scheme.root();
        let child = scheme.next_child(&root).unwrap();
        assert_ne!(child.vertex, 0);
        assert!(child.visited[child.vertex]);
    }

    #[test]
    fn becomes_infertile_after_exhausting_children() {
        let scheme = square_instance();
        let root = scheme.root();
        while !scheme.infertile(&root) {
            scheme.next_child(&root);
        }
        assert!(scheme.next_child(&root).is_none());
    }

    #[test]
    fn batch_children_enumerates_every_unvisited_vertex() {
        let scheme = square_instance();
        let root = scheme.root();
        let children = scheme.children(&root);
        assert_eq!(children.len(), 3);
        let mut vertices: Vec<usize> = children.iter().map(|child| child.vertex).collect();
        vertices.sort_unstable();
        assert_eq!(vertices, vec![1, 2, 3]);
        assert!(children.iter().all(|child| child.number_of_vertices == 2));
    }
}
