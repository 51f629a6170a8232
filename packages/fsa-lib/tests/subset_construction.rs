use fsa_lib::{
    automaton::{
        Automaton, Language,
        alphabet::Alphabet,
        nfa::{
            NFA,
            determinize::{SubsetConstruction, build, build_with_subsets, configured_logger},
        },
        state_set::StateSet,
    },
    catalog,
    config::{DeterminizeConfig, LoggerConfig},
    error::AutomatonError,
    logger::{LogLevel, Logger},
    validation::same_language::assert_same_language,
};
use petgraph::graph::NodeIndex;

fn q(index: usize) -> NodeIndex {
    NodeIndex::new(index)
}

/// Words over `{a, b}` whose `k`-th symbol from the end is `a`. The smallest
/// DFA for this language needs `2^k` states.
fn kth_from_last_a(k: usize) -> NFA {
    let mut nfa = NFA::with_states(Alphabet::new(b'a'..=b'b'), k + 1, [k]).unwrap();
    nfa.add_transitions(q(0), *b"ab", q(0)).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();
    for state in 1..k {
        nfa.add_transitions(q(state), *b"ab", q(state + 1)).unwrap();
    }
    nfa
}

/// `(a|b)*abb` with epsilon moves in the style of a Thompson construction.
fn ends_in_abb() -> NFA {
    let mut nfa = NFA::with_states(Alphabet::new(b'a'..=b'b'), 11, [10]).unwrap();
    for (from, to) in [(0, 1), (0, 7), (1, 2), (1, 4), (3, 6), (5, 6), (6, 1), (6, 7)] {
        nfa.add_epsilon_transition(q(from), q(to)).unwrap();
    }
    nfa.add_transition(q(2), b'a', q(3)).unwrap();
    nfa.add_transition(q(4), b'b', q(5)).unwrap();
    nfa.add_transition(q(7), b'a', q(8)).unwrap();
    nfa.add_transition(q(8), b'b', q(9)).unwrap();
    nfa.add_transition(q(9), b'b', q(10)).unwrap();
    nfa
}

#[test]
fn test_ends_in_gh() {
    let nfa = catalog::ends_in_gh(Alphabet::lowercase()).unwrap();
    let determinized = build_with_subsets(&nfa).unwrap();
    let dfa = &determinized.dfa;

    assert_eq!(dfa.state_count(), 3);
    assert_eq!(dfa.reachable_states().len(), 3);
    assert!(dfa.accepts(b"xgh"));
    assert!(!dfa.accepts(b"gh g"));
    assert!(dfa.is_complete());

    assert_eq!(
        determinized.subsets,
        vec![
            StateSet::from_indices([0]),
            StateSet::from_indices([1]),
            StateSet::from_indices([2]),
        ]
    );

    assert_same_language(&nfa, dfa, 4);
}

#[test]
fn test_states_are_numbered_breadth_first() {
    let nfa = kth_from_last_a(2);
    let determinized = build_with_subsets(&nfa).unwrap();

    assert_eq!(
        determinized.subsets,
        vec![
            StateSet::from_indices([0]),
            StateSet::from_indices([0, 1]),
            StateSet::from_indices([0, 1, 2]),
            StateSet::from_indices([0, 2]),
        ]
    );

    let dfa = &determinized.dfa;
    assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec![q(2), q(3)]);
    assert_eq!(dfa.transition(q(0), b'a'), Some(q(1)));
    assert_eq!(dfa.transition(q(0), b'b'), Some(q(0)));
    assert_eq!(dfa.transition(q(1), b'b'), Some(q(3)));
    assert_eq!(dfa.transition(q(3), b'a'), Some(q(1)));
    assert_eq!(determinized.subset(q(3)), Some(&StateSet::from_indices([0, 2])));
    assert_eq!(determinized.subset(q(4)), None);
}

#[test]
fn test_building_twice_gives_the_same_dfa() {
    let nfa = ends_in_abb();
    let first = build_with_subsets(&nfa).unwrap();
    let second = build_with_subsets(&nfa).unwrap();

    assert_eq!(first.subsets, second.subsets);
    assert_eq!(
        first.dfa.iter_transitions().collect::<Vec<_>>(),
        second.dfa.iter_transitions().collect::<Vec<_>>()
    );
}

#[test]
fn test_epsilon_moves() {
    let nfa = ends_in_abb();
    let determinized = build_with_subsets(&nfa).unwrap();

    assert_eq!(
        determinized.subsets[0],
        nfa.epsilon_closure(&StateSet::singleton(q(0)))
    );
    // the textbook result for this NFA
    assert_eq!(determinized.dfa.state_count(), 5);
    assert!(determinized.dfa.accepts(b"babb"));
    assert!(!determinized.dfa.accepts(b"abba"));

    assert_same_language(&nfa, &determinized.dfa, 8);
}

#[test]
fn test_symbols_without_moves_get_no_transition() {
    let mut nfa = NFA::with_states(Alphabet::lowercase(), 2, [1]).unwrap();
    nfa.add_transition(q(0), b'a', q(1)).unwrap();

    let dfa = build(&nfa).unwrap();
    assert_eq!(dfa.state_count(), 2);
    assert_eq!(dfa.transition_count(), 1);
    assert_eq!(dfa.transition(q(0), b'b'), None);
    assert!(!dfa.is_complete());
}

#[test]
fn test_empty_nfa() {
    let nfa = NFA::new(Alphabet::lowercase());
    let dfa = nfa.determinize().unwrap();

    assert_eq!(dfa.state_count(), 0);
    assert!(!dfa.accepts(b""));
}

#[test]
fn test_state_explosion() {
    let nfa = kth_from_last_a(6);

    let result = nfa.determinize_with(DeterminizeConfig::default().with_max_states(10));
    let Err(error) = result else {
        panic!("expected subset construction to give up");
    };
    assert!(error.is_state_explosion());
    assert_eq!(error, AutomatonError::StateExplosion { limit: 10 });

    // 2^6 sets are enough
    let dfa = nfa
        .determinize_with(DeterminizeConfig::default().with_max_states(64))
        .unwrap();
    assert_eq!(dfa.state_count(), 64);
}

#[test]
fn test_budget_is_inclusive() {
    let nfa = kth_from_last_a(2);

    let dfa = nfa
        .determinize_with(DeterminizeConfig::default().with_max_states(4))
        .unwrap();
    assert_eq!(dfa.state_count(), 4);

    assert!(
        nfa.determinize_with(DeterminizeConfig::default().with_max_states(3))
            .is_err()
    );
}

#[test]
fn test_statistics_and_logger() {
    let nfa = kth_from_last_a(3);
    let logger = Logger::new(LogLevel::Debug, "subset construction");

    let determinized = SubsetConstruction::new(&nfa, DeterminizeConfig::default(), Some(&logger))
        .run()
        .unwrap();

    assert_eq!(determinized.statistics.discovered_sets, 8);
    assert_eq!(determinized.statistics.transition_count, 16);
    assert_eq!(determinized.subsets.len(), determinized.dfa.state_count());
}

#[test]
fn test_config_decides_logging() {
    assert!(configured_logger(&DeterminizeConfig::default()).unwrap().is_none());

    let config = DeterminizeConfig::default().with_logger(
        LoggerConfig::default()
            .with_enabled(true)
            .with_log_level(LogLevel::Debug),
    );
    let logger = configured_logger(&config).unwrap().unwrap();
    assert_eq!(logger.level(), LogLevel::Debug);

    let nfa = kth_from_last_a(2);
    let dfa = nfa.determinize_with(config).unwrap();
    assert_eq!(dfa.state_count(), 4);
}

#[test]
fn test_progress_reaches_log_file() {
    let path = std::env::temp_dir().join(format!(
        "fsa_subset_construction_{}.txt",
        std::process::id()
    ));
    let logger = Logger::new(LogLevel::Error, "subset construction")
        .with_log_file(&path)
        .unwrap();

    let nfa = kth_from_last_a(2);
    SubsetConstruction::new(&nfa, DeterminizeConfig::default(), Some(&logger))
        .run()
        .unwrap();
    drop(logger);

    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(content.contains("Processed DFA state 4 of 4 discovered"));
    assert!(content.contains("SubsetConstruction {"));
    assert!(content.contains("dfa_states: 4"));
}

#[test]
fn test_build_leaves_nfa_untouched() {
    let nfa = ends_in_abb();
    let edges = nfa.edge_count();
    let states = nfa.state_count();

    build(&nfa).unwrap();

    assert_eq!(nfa.edge_count(), edges);
    assert_eq!(nfa.state_count(), states);
}
