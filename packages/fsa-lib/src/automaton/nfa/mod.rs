use std::{collections::BTreeMap, fmt::Debug};

use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{
        Automaton,
        alphabet::{Alphabet, Symbol},
        node::StateNode,
        state_set::StateSet,
        utils::{self, symbol_ranges_label},
    },
    error::AutomatonResult,
};

pub mod determinize;
pub mod run;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NfaEdge {
    Symbol(Symbol),
    Epsilon,
}

impl NfaEdge {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, NfaEdge::Epsilon)
    }

    pub fn matches(&self, symbol: Symbol) -> bool {
        *self == NfaEdge::Symbol(symbol)
    }
}

impl From<Option<Symbol>> for NfaEdge {
    fn from(value: Option<Symbol>) -> Self {
        match value {
            Some(s) => NfaEdge::Symbol(s),
            None => NfaEdge::Epsilon,
        }
    }
}

/// A nondeterministic finite automaton with epsilon moves.
///
/// A `(state, symbol)` pair may lead to any number of states, including none.
/// There are no implicit self loops.
#[derive(Clone)]
pub struct NFA {
    alphabet: Alphabet,
    graph: DiGraph<StateNode, NfaEdge>,
}

impl NFA {
    pub fn new(alphabet: Alphabet) -> Self {
        NFA {
            alphabet,
            graph: DiGraph::new(),
        }
    }

    /// Creates an NFA with `state_count` states, marking the given states as
    /// accepting.
    pub fn with_states(
        alphabet: Alphabet,
        state_count: usize,
        accepting: impl IntoIterator<Item = usize>,
    ) -> AutomatonResult<Self> {
        let mut nfa = NFA::new(alphabet);
        for _ in 0..state_count {
            nfa.add_state(false);
        }

        for state in accepting {
            nfa.set_accepting(NodeIndex::new(state))?;
        }

        Ok(nfa)
    }

    pub fn add_state(&mut self, accepting: bool) -> NodeIndex {
        self.graph.add_node(StateNode::new(accepting))
    }

    pub fn set_accepting(&mut self, state: NodeIndex) -> AutomatonResult<()> {
        self.check_state(state)?;
        self.graph[state].accepting = true;

        Ok(())
    }

    /// Adds `to` to the destinations of `from` on `symbol`. Adding the same
    /// move twice has no effect.
    pub fn add_transition(
        &mut self,
        from: NodeIndex,
        symbol: Symbol,
        to: NodeIndex,
    ) -> AutomatonResult<()> {
        self.check_symbol(symbol)?;
        self.add_edge(from, NfaEdge::Symbol(symbol), to)
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

    pub fn add_epsilon_transition(&mut self, from: NodeIndex, to: NodeIndex) -> AutomatonResult<()> {
        self.add_edge(from, NfaEdge::Epsilon, to)
    }

    fn add_edge(&mut self, from: NodeIndex, edge: NfaEdge, to: NodeIndex) -> AutomatonResult<()> {
        self.check_state(from)?;
        self.check_state(to)?;

        let exists = self
            .graph
            .edges_connecting(from, to)
            .any(|e| *e.weight() == edge);
        if !exists {
            self.graph.add_edge(from, to, edge);
        }

        Ok(())
    }

    /// All states `state` moves to on `symbol`.
    pub fn destinations(&self, state: NodeIndex, symbol: Symbol) -> StateSet {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .filter(|e| e.weight().matches(symbol))
            .map(|e| e.target())
            .collect()
    }

    /// All states `state` reaches with a single epsilon move.
    pub fn epsilon_destinations(&self, state: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .filter(|e| e.weight().is_epsilon())
            .map(|e| e.target())
    }

    /// The union of the destinations of every state in `states` on `symbol`.
    /// Epsilon moves are not followed.
    pub fn step(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        states
            .iter()
            .flat_map(|state| {
                self.graph
                    .edges_directed(state, Direction::Outgoing)
                    .filter(move |e| e.weight().matches(symbol))
                    .map(|e| e.target())
            })
            .collect()
    }

    /// For every symbol that at least one state in `states` can move on, the
    /// union of the destinations on that symbol, ordered by symbol. Symbols
    /// without any move are left out.
    pub fn moves_by_symbol(&self, states: &StateSet) -> BTreeMap<Symbol, StateSet> {
        let mut moves: BTreeMap<Symbol, StateSet> = BTreeMap::new();

        for state in states {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if let NfaEdge::Symbol(symbol) = *edge.weight() {
                    moves.entry(symbol).or_default().insert(edge.target());
                }
            }
        }

        moves
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &StateSet) -> bool {
        states.any(|s| self.is_accepting(s))
    }

    pub fn has_epsilon_transitions(&self) -> bool {
        self.graph.edge_weights().any(|e| e.is_epsilon())
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &DiGraph<StateNode, NfaEdge> {
        &self.graph
    }

    pub fn to_graphviz(&self) -> String {
        let mut edges: BTreeMap<(NodeIndex, NodeIndex), Vec<NfaEdge>> = BTreeMap::new();
        for edge in self.graph.edge_references() {
            edges
                .entry((edge.source(), edge.target()))
                .or_default()
                .push(*edge.weight());
        }

        let labels: BTreeMap<_, _> = edges
            .into_iter()
            .map(|(pair, mut weights)| {
                weights.sort();
                let symbols = weights
                    .iter()
                    .filter_map(|w| match w {
                        NfaEdge::Symbol(s) => Some(*s),
                        NfaEdge::Epsilon => None,
                    })
                    .collect_vec();

                let mut label = vec![];
                if !symbols.is_empty() {
                    label.push(symbol_ranges_label(&symbols));
                }
                if weights.contains(&NfaEdge::Epsilon) {
                    label.push("ε".to_string());
                }
                (pair, label)
            })
            .collect();

        utils::to_graphviz(self.start(), self.accepting_states(), &labels)
    }
}

impl Automaton for NFA {
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

impl Debug for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.state_count())
            .field("initial_state", &self.start())
            .field("final_states", &self.accepting_states().collect_vec())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}
