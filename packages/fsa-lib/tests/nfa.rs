use fsa_lib::{
    automaton::{Language, alphabet::Alphabet, nfa::NFA, state_set::StateSet},
    catalog,
    error::AutomatonError,
    validation::{assert_decides, same_language::assert_same_language},
};
use petgraph::graph::NodeIndex;

fn q(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Words over `{a, b}` whose second to last symbol is `a`.
fn second_to_last_a() -> NFA {
    let mut nfa = NFA::with_states(Alphabet::new(b'a'..=b'b'), 3, [2]).unwrap();
    nfa.add_transitions(q(0), *b"ab", q(0)).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();
    nfa.add_transitions(q(1), *b"ab", q(2)).unwrap();
    nfa
}

#[test]
fn test_nfa() {
    let nfa = second_to_last_a();

    assert!(nfa.accepts(b"ab"));
    assert!(nfa.accepts(b"bbaa"));
    assert!(!nfa.accepts(b"abb"));
    assert!(!nfa.accepts(b"a"));
}

#[test]
fn test_run_tracks_all_branches() {
    let nfa = second_to_last_a();
    let run = nfa.run(b"aa");

    assert!(run.accepted);
    assert_eq!(run.active, StateSet::from_indices([0, 1, 2]));
    assert_eq!(run.consumed, 2);
}

#[test]
fn test_dead_branches_stop_the_run() {
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 2, [1]).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();

    let run = nfa.run(b"abab");
    assert!(!run.accepted);
    assert!(run.active.is_empty());
    assert_eq!(run.consumed, 2);
}

#[test]
fn test_no_implicit_self_loops() {
    // accepting state without a self loop does not absorb trailing input
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 2, [1]).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();

    assert!(nfa.accepts(b"a"));
    assert!(!nfa.accepts(b"aa"));

    nfa.add_transitions(q(1), Alphabet::lowercase().iter(), q(1))
        .unwrap();
    assert!(nfa.accepts(b"aa"));
}

#[test]
fn test_empty_input() {
    let nfa = second_to_last_a();
    let run = nfa.run(b"");
    assert!(!run.accepted);
    assert_eq!(run.active, StateSet::from_indices([0]));

    let empty = NFA::new(Alphabet::lowercase());
    assert!(!empty.accepts(b""));
}

#[test]
fn test_start_state_is_epsilon_closed() {
    // 0 -ε-> 1 (accepting), 1 -a-> 1
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 2, [1]).unwrap();
    nfa.add_epsilon_transition(q(0), q(1)).unwrap();
    nfa.add_transition(q(1), b'a', q(1)).unwrap();

    assert!(nfa.accepts(b""));
    assert!(nfa.accepts(b"aaa"));
    assert!(!nfa.accepts(b"b"));

    let dfa = nfa.determinize().unwrap();
    assert_same_language(&nfa, &dfa, 4);
}

#[test]
fn test_epsilon_moves_after_steps() {
    // 0 -a-> 1 -ε-> 2 -ε-> 3 (accepting)
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 4, [3]).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();
    nfa.add_epsilon_transition(q(1), q(2)).unwrap();
    nfa.add_epsilon_transition(q(2), q(3)).unwrap();

    let run = nfa.run(b"a");
    assert!(run.accepted);
    assert_eq!(run.active, StateSet::from_indices([1, 2, 3]));
    assert!(nfa.has_epsilon_transitions());
}

#[test]
fn test_transitions_are_a_set() {
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 2, [1]).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();
    nfa.add_epsilon_transition(q(0), q(1)).unwrap();
    nfa.add_epsilon_transition(q(0), q(1)).unwrap();

    assert_eq!(nfa.edge_count(), 2);
    assert_eq!(nfa.destinations(q(0), b'a'), StateSet::from_indices([1]));
}

#[test]
fn test_definition_errors() {
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 2, [1]).unwrap();

    assert!(matches!(
        nfa.add_transition(q(0), b'A', q(1)),
        Err(AutomatonError::InvalidSymbol { symbol: b'A', .. })
    ));
    assert!(matches!(
        nfa.add_transition(q(3), b'a', q(1)),
        Err(AutomatonError::MalformedAutomaton { state: 3, .. })
    ));
    assert!(matches!(
        nfa.add_epsilon_transition(q(0), q(2)),
        Err(AutomatonError::MalformedAutomaton { state: 2, .. })
    ));
    assert_eq!(nfa.edge_count(), 0);
}

#[test]
fn test_ends_in_gh() {
    let nfa = catalog::ends_in_gh(Alphabet::lowercase()).unwrap();

    assert!(nfa.accepts(b"xgh"));
    // space is not part of the alphabet and kills every branch
    assert!(!nfa.accepts(b"gh g"));
    assert!(!nfa.accepts(b"ghx"));
    assert!(nfa.accepts(b"ghgh"));
    assert!(!nfa.accepts(b"ggh"));
    assert!(!nfa.accepts(b"xggh"));
}

#[test]
fn test_ends_in_gh_needs_g_and_h() {
    let result = catalog::ends_in_gh(Alphabet::binary());
    assert!(matches!(
        result,
        Err(AutomatonError::InvalidSymbol { symbol: b'g', .. })
    ));
}

#[test]
fn test_catalog_nfas() {
    assert_decides(
        &catalog::ends_in_gh(Alphabet::ascii()).unwrap(),
        &["gh", "laugh", "gh gh", "ghgh"],
        &["", "g", "ghost", "gh g", "h", "ggh"],
    );

    assert_decides(
        &catalog::contains_moo().unwrap(),
        &["moo", "the cow says moo", "mmoo", "moooo", "moomoo"],
        &["", "mo", "mom", "m o o", "oom"],
    );

    assert_decides(
        &catalog::special_string().unwrap(),
        &["aa", "banana", "icicle", "yyy", "cccc", "llll", "hello world, lol"],
        &["", "a", "ai", "yy", "ccc", "lll", "acyl", "xyz"],
    );
}

#[test]
fn test_graphviz_marks_epsilon_edges() {
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 2, [1]).unwrap();
    nfa.add_epsilon_transition(q(0), q(1)).unwrap();
    nfa.add_transitions(q(0), *b"abc", q(1)).unwrap();

    let dot = nfa.to_graphviz();
    assert!(dot.contains("0 -> 1 [ label=\"a-c,ε\" ];"));
}
