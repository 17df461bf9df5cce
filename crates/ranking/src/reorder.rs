//! Shuffle-then-visit reordering of a ranked id list.
//!
//! ## Algorithm
//! 1. Shuffle a copy of the input with the caller's random source
//! 2. Walk the shuffled ids; each unvisited id is pushed onto the frontier
//!    and the frontier is drained, emitting every node the first time it
//!    is popped
//!
//! The ids carry no edges, so every outer step drains a one-element
//! frontier. Depth-first (stack) and breadth-first (queue) therefore emit
//! the same sequence for the same shuffle: the distinct ids in the order
//! they first appear after shuffling. Callers rely on that equivalence;
//! adding neighbour expansion here would change observable output.

use data_loader::MovieId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Visitation discipline for a reorder pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Traversal {
    DepthFirst,
    BreadthFirst,
}

impl Traversal {
    /// Short label used in headers ("DFS" / "BFS")
    pub fn label(&self) -> &'static str {
        match self {
            Traversal::DepthFirst => "DFS",
            Traversal::BreadthFirst => "BFS",
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown traversal mode '{0}' (expected dfs or bfs)")]
pub struct UnknownTraversal(pub String);

impl FromStr for Traversal {
    type Err = UnknownTraversal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Traversal::DepthFirst),
            "bfs" | "breadth-first" => Ok(Traversal::BreadthFirst),
            _ => Err(UnknownTraversal(s.to_string())),
        }
    }
}

/// Container of nodes waiting to be visited
pub trait Frontier {
    fn push(&mut self, id: MovieId);
    fn pop(&mut self) -> Option<MovieId>;
}

/// Last in, first out
impl Frontier for Vec<MovieId> {
    fn push(&mut self, id: MovieId) {
        Vec::push(self, id);
    }

    fn pop(&mut self) -> Option<MovieId> {
        Vec::pop(self)
    }
}

/// First in, first out
impl Frontier for VecDeque<MovieId> {
    fn push(&mut self, id: MovieId) {
        self.push_back(id);
    }

    fn pop(&mut self) -> Option<MovieId> {
        self.pop_front()
    }
}

/// Shuffle `ids` and emit each distinct id once using the given traversal.
///
/// The output is always a permutation of the distinct input ids; an empty
/// input gives an empty output.
pub fn reorder<R>(ids: &[MovieId], mode: Traversal, rng: &mut R) -> Vec<MovieId>
where
    R: Rng + ?Sized,
{
    let mut shuffled = ids.to_vec();
    shuffled.shuffle(rng);

    let output = match mode {
        Traversal::DepthFirst => visit(&shuffled, Vec::new()),
        Traversal::BreadthFirst => visit(&shuffled, VecDeque::new()),
    };

    debug!(
        "Reordered {} ids into {} distinct ({})",
        ids.len(),
        output.len(),
        mode
    );
    output
}

fn visit<F: Frontier>(order: &[MovieId], mut frontier: F) -> Vec<MovieId> {
    let mut visited: HashSet<MovieId> = HashSet::with_capacity(order.len());
    let mut output = Vec::with_capacity(order.len());

    for &id in order {
        if visited.contains(&id) {
            continue;
        }
        frontier.push(id);
        while let Some(current) = frontier.pop() {
            if visited.insert(current) {
                output.push(current);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_duplicates_collapse() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = reorder(&[7, 7, 3, 3, 9], Traversal::DepthFirst, &mut rng);

        assert_eq!(out.len(), 3);
        out.sort();
        assert_eq!(out, vec![3, 7, 9]);
    }

    #[test]
    fn test_empty_input() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(reorder(&[], Traversal::BreadthFirst, &mut rng).is_empty());
    }

    #[test]
    fn test_visit_keeps_first_occurrence_order() {
        assert_eq!(visit(&[4, 1, 4, 2, 1], Vec::new()), vec![4, 1, 2]);
        assert_eq!(visit(&[4, 1, 4, 2, 1], VecDeque::new()), vec![4, 1, 2]);
    }

    #[test]
    fn test_same_seed_same_output_for_both_modes() {
        let ids: Vec<MovieId> = (1..=20).collect();
        let dfs = reorder(&ids, Traversal::DepthFirst, &mut StdRng::seed_from_u64(42));
        let bfs = reorder(&ids, Traversal::BreadthFirst, &mut StdRng::seed_from_u64(42));
        assert_eq!(dfs, bfs);
    }

    #[test]
    fn test_frontier_disciplines() {
        let mut stack: Vec<MovieId> = Vec::new();
        Frontier::push(&mut stack, 1);
        Frontier::push(&mut stack, 2);
        assert_eq!(Frontier::pop(&mut stack), Some(2));

        let mut queue: VecDeque<MovieId> = VecDeque::new();
        Frontier::push(&mut queue, 1);
        Frontier::push(&mut queue, 2);
        assert_eq!(Frontier::pop(&mut queue), Some(1));
    }

    #[test]
    fn test_parse_traversal() {
        assert_eq!("dfs".parse::<Traversal>().unwrap(), Traversal::DepthFirst);
        assert_eq!("BFS".parse::<Traversal>().unwrap(), Traversal::BreadthFirst);
        assert_eq!(
            "breadth-first".parse::<Traversal>().unwrap(),
            Traversal::BreadthFirst
        );
        assert!("sideways".parse::<Traversal>().is_err());
        assert_eq!(Traversal::DepthFirst.to_string(), "DFS");
    }
}
