use std::{collections::BTreeMap, fmt::Debug};

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::Bfs,
};

use crate::{
    automaton::{
        Automaton,
        alphabet::{Alphabet, Symbol},
        node::StateNode,
        utils::{self, symbol_ranges_label},
    },
    error::{AutomatonError, AutomatonResult},
};

pub mod run;

/// A deterministic finite automaton with a partial transition function.
///
/// States live in a graph arena and are referenced by index; state 0 is the
/// start state. Every `(state, symbol)` pair has at most one destination and
/// a missing entry means the automaton is stuck, it is not a self loop.
#[derive(Clone)]
pub struct DFA {
    alphabet: Alphabet,
    graph: DiGraph<StateNode, Symbol>,
    transitions: HashMap<(NodeIndex, Symbol), NodeIndex>,
}

impl DFA {
    pub fn new(alphabet: Alphabet) -> Self {
        DFA {
            alphabet,
            graph: DiGraph::new(),
            transitions: HashMap::new(),
        }
    }

    /// Creates a DFA with `state_count` states, marking the given states as
    /// accepting.
    pub fn with_states(
        alphabet: Alphabet,
        state_count: usize,
        accepting: impl IntoIterator<Item = usize>,
    ) -> AutomatonResult<Self> {
        let mut dfa = DFA::new(alphabet);
        for _ in 0..state_count {
            dfa.add_state(false);
        }

        for state in accepting {
            dfa.set_accepting(NodeIndex::new(state))?;
        }

        Ok(dfa)
    }

    pub fn add_state(&mut self, accepting: bool) -> NodeIndex {
        self.graph.add_node(StateNode::new(accepting))
    }

    pub fn set_accepting(&mut self, state: NodeIndex) -> AutomatonResult<()> {
        self.check_state(state)?;
        self.graph[state].accepting = true;

        Ok(())
    }

    /// Adds the move `from --symbol--> to`.
    ///
    /// Adding a move that already exists does nothing. Adding a second,
    /// different destination for the same `(from, symbol)` pair fails with
    /// [AutomatonError::TransitionConflict].
    pub fn add_transition(
        &mut self,
        from: NodeIndex,
        symbol: Symbol,
        to: NodeIndex,
    ) -> AutomatonResult<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        self.check_symbol(symbol)?;

        match self.transitions.get(&(from, symbol)) {
            Some(&existing) if existing == to => Ok(()),
            Some(&existing) => Err(AutomatonError::TransitionConflict {
                from: from.index(),
                symbol,
                existing: existing.index(),
                new: to.index(),
            }),
            None => {
                self.graph.add_edge(from, to, symbol);
                self.transitions.insert((from, symbol), to);
                Ok(())
            }
        }
    }

    /// Adds `from --s--> to` for every `s` in `symbols`.
    pub fn add_transitions(
        &mut self,
        from: NodeIndex,
        symbols: impl IntoIterator<Item = Symbol>,
        to: NodeIndex,
    ) -> AutomatonResult<()> {
        for symbol in symbols {
            self.add_transition(from, symbol, to)?;
        }

        Ok(())
    }

    /// The destination of `state` on `symbol`, [None] if there is no move.
    pub fn transition(&self, state: NodeIndex, symbol: Symbol) -> Option<NodeIndex> {
        self.transitions.get(&(state, symbol)).copied()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn graph(&self) -> &DiGraph<StateNode, Symbol> {
        &self.graph
    }

    /// Whether every state has a move for every symbol of the alphabet.
    pub fn is_complete(&self) -> bool {
        self.transitions.len() == self.state_count() * self.alphabet.len()
    }

    /// States reachable from the start state, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<NodeIndex> {
        let Some(start) = self.start() else {
            return vec![];
        };

        let mut bfs = Bfs::new(&self.graph, start);
        let mut reachable = vec![];
        while let Some(state) = bfs.next(&self.graph) {
            reachable.push(state);
        }

        reachable
    }

    /// Iterates over all moves as `(from, symbol, to)`, ordered by state and
    /// then symbol.
    pub fn iter_transitions(
        &self,
    ) -> impl Iterator<Item = (NodeIndex, Symbol, NodeIndex)> + '_ {
        self.iter_states().flat_map(move |state| {
            self.alphabet.iter().filter_map(move |symbol| {
                self.transition(state, symbol).map(|to| (state, symbol, to))
            })
        })
    }

    pub fn to_graphviz(&self) -> String {
        let mut edges: BTreeMap<(NodeIndex, NodeIndex), Vec<Symbol>> = BTreeMap::new();
        for (from, symbol, to) in self.iter_transitions() {
            edges.entry((from, to)).or_default().push(symbol);
        }

        let labels: BTreeMap<_, _> = edges
            .into_iter()
            .map(|(pair, symbols)| (pair, vec![symbol_ranges_label(&symbols)]))
            .collect();

        utils::to_graphviz(self.start(), self.accepting_states(), &labels)
    }
}

impl Automaton for DFA {
    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph
            .node_weight(state)
            .is_some_and(|node| node.accepting)
    }
}

impl Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.state_count())
            .field("initial_state", &self.start())
            .field("final_states", &self.accepting_states().collect_vec())
            .field("transition_count", &self.transition_count())
            .finish()
    }
}
