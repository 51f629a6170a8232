use crate::automaton::Language;

pub mod same_language;

/// Asserts that `automaton` accepts every word in `accepted` and rejects every
/// word in `rejected`.
pub fn assert_decides(automaton: &impl Language, accepted: &[&str], rejected: &[&str]) {
    for word in accepted {
        assert!(
            automaton.accepts(word.as_bytes()),
            "expected {:?} to be accepted",
            word
        );
    }

    for word in rejected {
        assert!(
            !automaton.accepts(word.as_bytes()),
            "expected {:?} to be rejected",
            word
        );
    }
}
