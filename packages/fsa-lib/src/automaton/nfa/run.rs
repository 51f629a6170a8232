use serde::Serialize;

use crate::{
    automaton::{
        Automaton, Language,
        alphabet::{Symbol, symbol_label},
        nfa::NFA,
        state_set::StateSet,
    },
    logger::Logger,
};

/// The result of running an [NFA] on a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NfaRun {
    pub accepted: bool,
    /// The states that were active once the run ended.
    pub active: StateSet,
    /// Number of symbols read. Reading stops early once no branch is left.
    pub consumed: usize,
}

impl NFA {
    pub fn run<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> NfaRun {
        self.run_with_logger(input, None)
    }

    /// Simulates all branches of the NFA at once by tracking the set of
    /// active states.
    ///
    /// The active set is epsilon closed before the first symbol and after
    /// every step, which makes the result agree with running the DFA built by
    /// subset construction. A branch without a move on the next symbol dies;
    /// once every branch is dead the run rejects without reading further.
    pub fn run_with_logger<'a>(
        &self,
        input: impl IntoIterator<Item = &'a Symbol>,
        logger: Option<&Logger>,
    ) -> NfaRun {
        let mut active = match self.start() {
            Some(start) => self.epsilon_closure(&StateSet::singleton(start)),
            None => StateSet::new(),
        };

        if let Some(l) = logger {
            l.debug(&format!("Starting states: {}", active));
        }

        let mut consumed = 0;
        for &symbol in input {
            if active.is_empty() {
                break;
            }

            active = self.epsilon_closure(&self.step(&active, symbol));
            consumed += 1;

            if let Some(l) = logger {
                l.debug(&format!(
                    "After {}: active states {}",
                    symbol_label(symbol),
                    active
                ));
            }
        }

        let accepted = self.is_accepting_set(&active);

        if let Some(l) = logger {
            if active.is_empty() {
                l.info("No branch left, rejecting");
            } else if accepted {
                l.info(&format!("Accepted: {} contains an accepting state", active));
            } else {
                l.info(&format!("Rejected: {} has no accepting state", active));
            }
        }

        NfaRun {
            accepted,
            active,
            consumed,
        }
    }
}

impl Language for NFA {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Symbol>) -> bool {
        self.run(input).accepted
    }
}
