use itertools::{Itertools, repeat_n};

use crate::automaton::{
    Language,
    alphabet::{Symbol, symbol_label},
};

fn word_label(word: &[Symbol]) -> String {
    format!("\"{}\"", word.iter().map(|s| symbol_label(*s)).join(""))
}

/// All words over `symbols` of length `0..max_word_length`, shortest first.
fn words(symbols: &[Symbol], max_word_length: usize) -> impl Iterator<Item = Vec<Symbol>> + '_ {
    (0..max_word_length).flat_map(move |i| {
        repeat_n(symbols.iter().copied(), i).multi_cartesian_product()
    })
}

fn check_alphabets(a: &impl Language, b: &impl Language) {
    if a.alphabet() != b.alphabet() {
        panic!(
            "Alphabets are not the same: {} and {}",
            a.alphabet(),
            b.alphabet()
        );
    }
}

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking if
/// the automata accept the same words up to a certain length.
pub fn same_language(a: &impl Language, b: &impl Language, max_word_length: usize) -> bool {
    if a.alphabet() != b.alphabet() {
        return false;
    }

    let symbols = a.alphabet().iter().collect_vec();
    same_language_on(a, b, &symbols, max_word_length)
}

/// Like [same_language], but only enumerates words built from `symbols`.
/// Useful for large alphabets where only a handful of symbols matter.
pub fn same_language_on(
    a: &impl Language,
    b: &impl Language,
    symbols: &[Symbol],
    max_word_length: usize,
) -> bool {
    for word in words(symbols, max_word_length) {
        if a.accepts(&word) != b.accepts(&word) {
            tracing::debug!("languages differ on {}", word_label(&word));
            return false;
        }
    }

    true
}

pub fn assert_same_language(a: &impl Language, b: &impl Language, max_word_length: usize) {
    check_alphabets(a, b);

    let symbols = a.alphabet().iter().collect_vec();
    assert_same_language_on(a, b, &symbols, max_word_length);
}

pub fn assert_same_language_on(
    a: &impl Language,
    b: &impl Language,
    symbols: &[Symbol],
    max_word_length: usize,
) {
    check_alphabets(a, b);

    for word in words(symbols, max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, false) => {
                panic!(
                    "{} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word_label(&word)
                );
            }
            (false, true) => {
                panic!(
                    "{} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word_label(&word)
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language_on(
    a: &impl Language,
    b: &impl Language,
    symbols: &[Symbol],
    max_word_length: usize,
) {
    check_alphabets(a, b);

    for word in words(symbols, max_word_length) {
        match (a.accepts(&word), b.accepts(&word)) {
            (true, true) => {
                panic!(
                    "{} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word_label(&word)
                );
            }
            (false, false) => {
                panic!(
                    "{} is accepted by neither automaton `a` nor automaton `b`. Thus their languages are not inverse.",
                    word_label(&word)
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use petgraph::graph::NodeIndex;

    use super::*;
    use crate::automaton::{alphabet::Alphabet, dfa::DFA};

    /// Tracks whether a binary word ends in `last`. State 1 means it does.
    fn tracker(last: Symbol, accepting: usize) -> DFA {
        let mut dfa = DFA::with_states(Alphabet::binary(), 2, [accepting]).unwrap();
        for state in [0, 1] {
            for symbol in [b'0', b'1'] {
                let to = if symbol == last { 1 } else { 0 };
                dfa.add_transition(NodeIndex::new(state), symbol, NodeIndex::new(to))
                    .unwrap();
            }
        }
        dfa
    }

    fn ends_in(last: Symbol) -> DFA {
        tracker(last, 1)
    }

    #[test]
    fn test_words_are_enumerated_shortest_first() {
        let all = words(b"ab", 3).collect_vec();
        assert_eq!(all.len(), 1 + 2 + 4);
        assert!(all[0].is_empty());
        assert_eq!(all[1], b"a".to_vec());
        assert_eq!(all[6], b"bb".to_vec());
    }

    #[test]
    fn test_same_language() {
        assert!(same_language(&ends_in(b'1'), &ends_in(b'1'), 6));
        assert!(!same_language(&ends_in(b'1'), &ends_in(b'0'), 6));
    }

    #[test]
    #[should_panic]
    fn test_assert_same_language_panics_on_difference() {
        assert_same_language(&ends_in(b'1'), &ends_in(b'0'), 3);
    }

    #[test]
    fn test_inverse_language() {
        assert_inverse_language_on(&ends_in(b'1'), &tracker(b'1', 0), b"01", 6);
    }

    #[test]
    #[should_panic]
    fn test_inverse_language_panics_on_shared_word() {
        // the empty word is accepted by neither
        assert_inverse_language_on(&ends_in(b'1'), &ends_in(b'0'), b"01", 3);
    }
}
