use std::fmt::Display;

use itertools::Itertools;
use petgraph::graph::NodeIndex;
use serde::{Serialize, Serializer};

/// A duplicate free set of NFA states.
///
/// The states are kept sorted, so two sets holding the same states are equal
/// and hash the same no matter in which order the states were added. This is
/// what lets subset construction look up already discovered sets in a hash
/// map instead of comparing against every one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet {
    states: Vec<NodeIndex>,
}

impl StateSet {
    pub fn new() -> Self {
        StateSet { states: vec![] }
    }

    pub fn singleton(state: NodeIndex) -> Self {
        StateSet {
            states: vec![state],
        }
    }

    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        indices.into_iter().map(NodeIndex::new).collect()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: NodeIndex) -> bool {
        self.states.binary_search(&state).is_ok()
    }

    /// Inserts a state, returning whether it was newly added.
    pub fn insert(&mut self, state: NodeIndex) -> bool {
        match self.states.binary_search(&state) {
            Ok(_) => false,
            Err(position) => {
                self.states.insert(position, state);
                true
            }
        }
    }

    pub fn union(&self, other: &StateSet) -> StateSet {
        StateSet {
            states: self
                .states
                .iter()
                .merge(other.states.iter())
                .dedup()
                .copied()
                .collect(),
        }
    }

    pub fn is_subset_of(&self, other: &StateSet) -> bool {
        self.states.iter().all(|s| other.contains(*s))
    }

    /// Returns true if any state satisfies `predicate`.
    pub fn any(&self, predicate: impl Fn(NodeIndex) -> bool) -> bool {
        self.states.iter().any(|s| predicate(*s))
    }

    /// States in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.states.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeIndex] {
        &self.states
    }

    pub fn indices(&self) -> Vec<usize> {
        self.states.iter().map(|s| s.index()).collect()
    }
}

impl FromIterator<NodeIndex> for StateSet {
    fn from_iter<T: IntoIterator<Item = NodeIndex>>(iter: T) -> Self {
        let mut states = iter.into_iter().collect_vec();
        states.sort_unstable();
        states.dedup();

        StateSet { states }
    }
}

impl Extend<NodeIndex> for StateSet {
    fn extend<T: IntoIterator<Item = NodeIndex>>(&mut self, iter: T) {
        self.states.extend(iter);
        self.states.sort_unstable();
        self.states.dedup();
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = NodeIndex;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeIndex>>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter().copied()
    }
}

impl Serialize for StateSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.states.iter().map(|s| s.index()))
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.states.iter().map(|s| s.index()).join(", ")
        )
    }
}
