use petgraph::graph::NodeIndex;

use crate::{
    automaton::alphabet::{Alphabet, Symbol},
    error::{AutomatonError, AutomatonResult},
};

pub mod alphabet;
pub mod closure;
pub mod dfa;
pub mod nfa;
pub mod node;
pub mod state_set;
pub mod utils;

/// The start state of every automaton. States are numbered in the order they
/// are added, so the first state added is the start state.
pub fn start_index() -> NodeIndex {
    NodeIndex::new(0)
}

/// Common read access shared by [dfa::DFA] and [nfa::NFA].
pub trait Automaton {
    fn alphabet(&self) -> &Alphabet;

    /// Returns the number of states. Valid state indices are
    /// `0..state_count()`.
    fn state_count(&self) -> usize;

    /// Returns true if the passed in state is accepting. States that do not
    /// exist are never accepting.
    fn is_accepting(&self, state: NodeIndex) -> bool;

    /// Returns the start state, or [None] if the automaton has no states yet.
    fn start(&self) -> Option<NodeIndex> {
        (self.state_count() > 0).then(start_index)
    }

    /// Returns an iterator over all state indices.
    fn iter_states(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.state_count()).map(NodeIndex::new)
    }

    fn accepting_states(&self) -> impl Iterator<Item = NodeIndex> {
        self.iter_states().filter(|s| self.is_accepting(*s))
    }

    /// Fails with [AutomatonError::MalformedAutomaton] if `state` is not a
    /// state of this automaton.
    fn check_state(&self, state: NodeIndex) -> AutomatonResult<NodeIndex> {
        if state.index() < self.state_count() {
            Ok(state)
        } else {
            Err(AutomatonError::MalformedAutomaton {
                state: state.index(),
                state_count: self.state_count(),
            })
        }
    }

    /// Fails with [AutomatonError::InvalidSymbol] if `symbol` is outside of
    /// the alphabet.
    fn check_symbol(&self, symbol: Symbol) -> AutomatonResult<Symbol> {
        self.alphabet().check(symbol)
    }
}

/// The basic trait for anything that decides membership of words over its
/// alphabet.
pub trait Language: Automaton {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool;
}
