use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::{
    automaton::{
        Automaton, Language,
        alphabet::{Symbol, symbol_label},
        dfa::DFA,
    },
    logger::Logger,
};

/// The result of running a [DFA] on a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DfaRun {
    pub accepted: bool,
    /// The state the run ended in. For a stuck run this is the state that had
    /// no move. Only [None] if the DFA has no states at all.
    pub state: Option<usize>,
    /// Number of symbols consumed before the run ended.
    pub consumed: usize,
    /// The symbol the run got stuck on, if any.
    pub stuck_on: Option<Symbol>,
}

impl DfaRun {
    pub fn is_stuck(&self) -> bool {
        self.stuck_on.is_some()
    }

    pub fn state_index(&self) -> Option<NodeIndex> {
        self.state.map(NodeIndex::new)
    }
}

impl DFA {
    pub fn run<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> DfaRun {
        self.run_with_logger(input, None)
    }

    /// Steps through `input` one symbol at a time, starting in the start
    /// state.
    ///
    /// A missing move rejects right away without consuming the rest of the
    /// input. Symbols outside of the alphabet never have a move, so they
    /// reject the same way.
    pub fn run_with_logger<'a>(
        &self,
        input: impl IntoIterator<Item = &'a Symbol>,
        logger: Option<&Logger>,
    ) -> DfaRun {
        let Some(mut current) = self.start() else {
            if let Some(l) = logger {
                l.warn("DFA has no states, rejecting");
            }
            return DfaRun {
                accepted: false,
                state: None,
                consumed: 0,
                stuck_on: None,
            };
        };

        if let Some(l) = logger {
            l.debug(&format!("Starting state: {}", current.index()));
        }

        let mut consumed = 0;
        for &symbol in input {
            match self.transition(current, symbol) {
                Some(next) => {
                    current = next;
                    consumed += 1;
                }
                None => {
                    if let Some(l) = logger {
                        if !self.alphabet().contains(symbol) {
                            l.debug(&format!(
                                "Symbol {} is not part of the alphabet {}",
                                symbol_label(symbol),
                                self.alphabet()
                            ));
                        }
                        l.info(&format!(
                            "No transition from state {} on {}, rejecting",
                            current.index(),
                            symbol_label(symbol)
                        ));
                    }

                    return DfaRun {
                        accepted: false,
                        state: Some(current.index()),
                        consumed,
                        stuck_on: Some(symbol),
                    };
                }
            }
        }

        let accepted = self.is_accepting(current);

        if let Some(l) = logger {
            l.info(&format!(
                "Final state {} is {}accepting",
                current.index(),
                if accepted { "" } else { "not " }
            ));
        }

        DfaRun {
            accepted,
            state: Some(current.index()),
            consumed,
            stuck_on: None,
        }
    }
}

impl Language for DFA {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool {
        self.run(input).accepted
    }
}
