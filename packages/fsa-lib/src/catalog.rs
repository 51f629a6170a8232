//! Ready made sample automata.
//!
//! Unless noted otherwise they work over the ASCII alphabet and absorb
//! symbols they do not care about with explicit self loops or resets.

use std::{fmt::Display, str::FromStr};

use petgraph::graph::NodeIndex;

use crate::{
    automaton::{
        Automaton, Language,
        alphabet::{Alphabet, Symbol},
        dfa::DFA,
        nfa::NFA,
    },
    error::AutomatonResult,
};

fn q(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

fn all_except(alphabet: Alphabet, except: &[Symbol]) -> impl Iterator<Item = Symbol> {
    let except = except.to_vec();
    alphabet.iter().filter(move |s| !except.contains(s))
}

/// Accepts every string containing `xyzzy`.
pub fn contains_xyzzy() -> AutomatonResult<DFA> {
    let alphabet = Alphabet::ascii();
    let mut dfa = DFA::with_states(alphabet, 6, [5])?;

    for (state, expected) in b"xyzzy".iter().enumerate() {
        dfa.add_transition(q(state), *expected, q(state + 1))?;

        for symbol in all_except(alphabet, &[*expected]) {
            // an `x` may always start a new match
            let target = if symbol == b'x' { q(1) } else { q(0) };
            dfa.add_transition(q(state), symbol, target)?;
        }
    }

    dfa.add_transitions(q(5), alphabet.iter(), q(5))?;

    Ok(dfa)
}

/// Accepts every string containing `9`, `8` and `7` in this order, not
/// necessarily next to each other.
pub fn subsequence_987() -> AutomatonResult<DFA> {
    let alphabet = Alphabet::ascii();
    let mut dfa = DFA::with_states(alphabet, 4, [3])?;

    for (state, expected) in b"987".iter().enumerate() {
        dfa.add_transition(q(state), *expected, q(state + 1))?;
        dfa.add_transitions(q(state), all_except(alphabet, &[*expected]), q(state))?;
    }

    dfa.add_transitions(q(3), alphabet.iter(), q(3))?;

    Ok(dfa)
}

/// Accepts every string containing exactly two or three `4`s.
pub fn two_or_three_fours() -> AutomatonResult<DFA> {
    let alphabet = Alphabet::ascii();
    let mut dfa = DFA::with_states(alphabet, 5, [2, 3])?;

    for state in 0..4 {
        dfa.add_transition(q(state), b'4', q(state + 1))?;
        dfa.add_transitions(q(state), all_except(alphabet, b"4"), q(state))?;
    }

    // four or more, never accepting again
    dfa.add_transitions(q(4), alphabet.iter(), q(4))?;

    Ok(dfa)
}

/// Tracks the parity of zeros and ones over the binary alphabet and accepts
/// strings with an odd number of both.
///
/// | state | zeros | ones |
/// |-------|-------|------|
/// | 0     | even  | even |
/// | 1     | odd   | even |
/// | 2     | even  | odd  |
/// | 3     | odd   | odd  |
pub fn binary_parity() -> AutomatonResult<DFA> {
    let mut dfa = DFA::with_states(Alphabet::binary(), 4, [3])?;

    dfa.add_transition(q(0), b'0', q(1))?;
    dfa.add_transition(q(1), b'0', q(0))?;
    dfa.add_transition(q(2), b'0', q(3))?;
    dfa.add_transition(q(3), b'0', q(2))?;

    dfa.add_transition(q(0), b'1', q(2))?;
    dfa.add_transition(q(1), b'1', q(3))?;
    dfa.add_transition(q(2), b'1', q(0))?;
    dfa.add_transition(q(3), b'1', q(1))?;

    Ok(dfa)
}

/// Three states: 0 start, 1 after `g`, 2 after `gh` (accepting). Every symbol
/// that does not continue the match falls back to state 0, except that state
/// 2 goes back to state 1 on `g`. State 1 falls back to 0 on a second `g` as
/// well, so a repeated `g` resets the match and `ggh` is rejected.
///
/// Fails with [crate::error::AutomatonError::InvalidSymbol] if `g` or `h` are
/// not part of `alphabet`.
pub fn ends_in_gh(alphabet: Alphabet) -> AutomatonResult<NFA> {
    let mut nfa = NFA::with_states(alphabet, 3, [2])?;

    nfa.add_transition(q(0), b'g', q(1))?;
    nfa.add_transition(q(1), b'h', q(2))?;
    nfa.add_transition(q(2), b'g', q(1))?;

    nfa.add_transitions(q(0), all_except(alphabet, b"g"), q(0))?;
    nfa.add_transitions(q(1), all_except(alphabet, b"h"), q(0))?;
    nfa.add_transitions(q(2), all_except(alphabet, b"g"), q(0))?;

    Ok(nfa)
}

/// Accepts every string containing `moo`. State 0 keeps guessing where the
/// match starts, so the NFA is truly nondeterministic.
pub fn contains_moo() -> AutomatonResult<NFA> {
    let alphabet = Alphabet::ascii();
    let mut nfa = NFA::with_states(alphabet, 4, [3])?;

    for (state, expected) in b"moo".iter().enumerate() {
        nfa.add_transitions(q(state), alphabet.iter(), q(0))?;
        nfa.add_transition(q(state), *expected, q(state + 1))?;
    }

    nfa.add_transitions(q(3), alphabet.iter(), q(3))?;

    Ok(nfa)
}

/// Accepts strings with at least two `a`s, or two `i`s, or three `y`s, or
/// four `c`s, or four `l`s. Each condition is a separate counting branch
/// leaving the start state, and every state loops on every symbol.
pub fn special_string() -> AutomatonResult<NFA> {
    let alphabet = Alphabet::ascii();
    let mut nfa = NFA::new(alphabet);
    let start = nfa.add_state(false);

    for (symbol, count) in [(b'a', 2), (b'i', 2), (b'y', 3), (b'c', 4), (b'l', 4)] {
        let mut previous = start;
        for seen in 1..=count {
            let next = nfa.add_state(seen == count);
            nfa.add_transition(previous, symbol, next)?;
            previous = next;
        }
    }

    for state in nfa.iter_states().collect::<Vec<_>>() {
        nfa.add_transitions(state, alphabet.iter(), state)?;
    }

    Ok(nfa)
}

/// A catalog automaton, either kind.
#[derive(Debug, Clone)]
pub enum Sample {
    Dfa(DFA),
    Nfa(NFA),
}

impl Sample {
    pub fn is_nfa(&self) -> bool {
        matches!(self, Sample::Nfa(_))
    }

    pub fn alphabet(&self) -> &Alphabet {
        match self {
            Sample::Dfa(dfa) => dfa.alphabet(),
            Sample::Nfa(nfa) => nfa.alphabet(),
        }
    }

    pub fn accepts(&self, input: &[Symbol]) -> bool {
        match self {
            Sample::Dfa(dfa) => dfa.accepts(input),
            Sample::Nfa(nfa) => nfa.accepts(input),
        }
    }

    pub fn to_graphviz(&self) -> String {
        match self {
            Sample::Dfa(dfa) => dfa.to_graphviz(),
            Sample::Nfa(nfa) => nfa.to_graphviz(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogEntry {
    ContainsXyzzy,
    Subsequence987,
    TwoOrThreeFours,
    BinaryParity,
    EndsInGh,
    ContainsMoo,
    SpecialString,
}

impl CatalogEntry {
    pub const ALL: [CatalogEntry; 7] = [
        CatalogEntry::ContainsXyzzy,
        CatalogEntry::Subsequence987,
        CatalogEntry::TwoOrThreeFours,
        CatalogEntry::BinaryParity,
        CatalogEntry::EndsInGh,
        CatalogEntry::ContainsMoo,
        CatalogEntry::SpecialString,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CatalogEntry::ContainsXyzzy => "xyzzy",
            CatalogEntry::Subsequence987 => "987",
            CatalogEntry::TwoOrThreeFours => "fours",
            CatalogEntry::BinaryParity => "parity",
            CatalogEntry::EndsInGh => "gh",
            CatalogEntry::ContainsMoo => "moo",
            CatalogEntry::SpecialString => "special",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CatalogEntry::ContainsXyzzy => "DFA for strings containing 'xyzzy'",
            CatalogEntry::Subsequence987 => "DFA for strings containing the subsequence '987'",
            CatalogEntry::TwoOrThreeFours => "DFA for strings containing two or three '4's",
            CatalogEntry::BinaryParity => {
                "DFA for binary strings with an odd number of zeros and of ones"
            }
            CatalogEntry::EndsInGh => {
                "NFA for strings ending in 'gh' (a repeated 'g' resets the match)"
            }
            CatalogEntry::ContainsMoo => "NFA for strings containing 'moo'",
            CatalogEntry::SpecialString => {
                "NFA for strings with >1 'a' or 'i', >2 'y', or >3 'c' or 'l'"
            }
        }
    }

    pub fn build(&self) -> AutomatonResult<Sample> {
        Ok(match self {
            CatalogEntry::ContainsXyzzy => Sample::Dfa(contains_xyzzy()?),
            CatalogEntry::Subsequence987 => Sample::Dfa(subsequence_987()?),
            CatalogEntry::TwoOrThreeFours => Sample::Dfa(two_or_three_fours()?),
            CatalogEntry::BinaryParity => Sample::Dfa(binary_parity()?),
            CatalogEntry::EndsInGh => Sample::Nfa(ends_in_gh(Alphabet::ascii())?),
            CatalogEntry::ContainsMoo => Sample::Nfa(contains_moo()?),
            CatalogEntry::SpecialString => Sample::Nfa(special_string()?),
        })
    }
}

impl FromStr for CatalogEntry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogEntry::ALL
            .into_iter()
            .find(|entry| entry.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown automaton: {} (expected one of {})",
                    s,
                    CatalogEntry::ALL.map(|e| e.name()).join(", ")
                )
            })
    }
}

impl Display for CatalogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
