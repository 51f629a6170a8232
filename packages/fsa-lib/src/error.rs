use crate::automaton::alphabet::{Alphabet, Symbol};

pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Errors raised while defining an automaton or determinizing one.
///
/// A run that has no move for the next symbol is not an error, it simply
/// rejects. The same holds for symbols outside of the alphabet that only show
/// up in the input of a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("symbol {symbol:#04x} is not part of the alphabet {alphabet}")]
    InvalidSymbol { symbol: Symbol, alphabet: Alphabet },

    #[error("state {state} does not exist, the automaton only has {state_count} states")]
    MalformedAutomaton { state: usize, state_count: usize },

    #[error(
        "state {from} already moves to {existing} on symbol {symbol:#04x}, refusing to add a second move to {new}"
    )]
    TransitionConflict {
        from: usize,
        symbol: Symbol,
        existing: usize,
        new: usize,
    },

    #[error("subset construction needs more than {limit} states")]
    StateExplosion { limit: usize },

    #[error("could not open log file: {0}")]
    LogFile(String),
}

impl AutomatonError {
    pub fn is_state_explosion(&self) -> bool {
        matches!(self, AutomatonError::StateExplosion { .. })
    }
}
