use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use crate::{
    automaton::{Automaton, dfa::DFA, nfa::NFA, state_set::StateSet},
    config::{DeterminizeConfig, GeneralConfig},
    error::{AutomatonError, AutomatonResult},
    logger::{LogLevel, Logger},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetConstructionStatistics {
    pub discovered_sets: usize,
    pub transition_count: usize,
    pub time: Duration,
}

/// The output of subset construction.
#[derive(Debug, Clone)]
pub struct Determinized {
    pub dfa: DFA,
    /// The set of NFA states each DFA state stands for, indexed by DFA state.
    pub subsets: Vec<StateSet>,
    pub statistics: SubsetConstructionStatistics,
}

impl Determinized {
    pub fn subset(&self, state: NodeIndex) -> Option<&StateSet> {
        self.subsets.get(state.index())
    }
}

/// Bookkeeping of the sets found so far. Sets are numbered in the order they
/// are found and handed out for processing in that same order.
struct Discovered {
    subsets: Vec<StateSet>,
    index: HashMap<StateSet, NodeIndex>,
    queue: VecDeque<NodeIndex>,
    limit: usize,
}

impl Discovered {
    fn new(limit: usize) -> Self {
        Discovered {
            subsets: vec![],
            index: HashMap::new(),
            queue: VecDeque::new(),
            limit,
        }
    }

    /// Returns the DFA state standing for `set`, adding a new one to `dfa` if
    /// the set has not been seen before.
    fn state_for(&mut self, set: StateSet, nfa: &NFA, dfa: &mut DFA) -> AutomatonResult<NodeIndex> {
        if let Some(&state) = self.index.get(&set) {
            return Ok(state);
        }

        if self.subsets.len() >= self.limit {
            return Err(AutomatonError::StateExplosion { limit: self.limit });
        }

        let state = dfa.add_state(nfa.is_accepting_set(&set));
        tracing::debug!("discovered DFA state {} = {}", state.index(), set);

        self.index.insert(set.clone(), state);
        self.subsets.push(set);
        self.queue.push_back(state);

        Ok(state)
    }
}

/// Turns an NFA into an equivalent DFA using the powerset construction.
///
/// DFA state 0 is the epsilon closure of the NFA start state. Discovered sets
/// are processed breadth first and symbols in ascending order, so building
/// the same NFA twice numbers the DFA states identically. A symbol on which
/// none of the states of a set can move gets no DFA transition.
///
/// The number of DFA states is bounded by the `max_states` setting. Hitting
/// the bound fails with [AutomatonError::StateExplosion] and no DFA is
/// returned.
///
/// Progress goes to the logger passed to [SubsetConstruction::new]. Without
/// one, the logger section of the config decides.
pub struct SubsetConstruction<'a> {
    nfa: &'a NFA,
    config: DeterminizeConfig,
    logger: Option<&'a Logger>,
}

impl<'a> SubsetConstruction<'a> {
    pub fn new(nfa: &'a NFA, config: DeterminizeConfig, logger: Option<&'a Logger>) -> Self {
        SubsetConstruction {
            nfa,
            config,
            logger,
        }
    }

    pub fn run(&self) -> AutomatonResult<Determinized> {
        let configured = match self.logger {
            Some(_) => None,
            None => configured_logger(&self.config)?,
        };

        self.run_with(self.logger.or(configured.as_ref()))
    }

    fn run_with(&self, logger: Option<&Logger>) -> AutomatonResult<Determinized> {
        let _span = tracing::debug_span!("SubsetConstruction::run").entered();
        let start_time = Instant::now();

        let nfa = self.nfa;
        let mut dfa = DFA::new(*nfa.alphabet());
        let mut discovered = Discovered::new(*self.config.get_max_states());

        if let Some(start) = nfa.start() {
            let initial = nfa.epsilon_closure(&StateSet::singleton(start));
            discovered.state_for(initial, nfa, &mut dfa)?;
        }

        while let Some(current) = discovered.queue.pop_front() {
            // the moves own their sets, so the borrow of `subsets` ends here
            let moves = nfa.moves_by_symbol(&discovered.subsets[current.index()]);

            for (symbol, targets) in moves {
                let target = discovered.state_for(nfa.epsilon_closure(&targets), nfa, &mut dfa)?;
                dfa.add_transition(current, symbol, target)?;
            }

            if let Some(l) = logger {
                l.debug(&format!(
                    "Processed DFA state {} of {} discovered",
                    current.index() + 1,
                    discovered.subsets.len()
                ));
            }
        }

        let statistics = SubsetConstructionStatistics {
            discovered_sets: discovered.subsets.len(),
            transition_count: dfa.transition_count(),
            time: start_time.elapsed(),
        };

        if let Some(l) = logger {
            l.object("SubsetConstruction")
                .add_field("nfa_states", nfa.state_count())
                .add_field("dfa_states", statistics.discovered_sets)
                .add_field("dfa_transitions", statistics.transition_count)
                .add_field("time", format!("{:?}", statistics.time))
                .log(LogLevel::Info);
        }

        Ok(Determinized {
            dfa,
            subsets: discovered.subsets,
            statistics,
        })
    }
}

/// The logger described by the logger section of `config`, [None] if that
/// section has logging disabled.
pub fn configured_logger(config: &DeterminizeConfig) -> AutomatonResult<Option<Logger>> {
    Logger::from_config(config.logger(), "Subset Construction")
        .map_err(|e| AutomatonError::LogFile(e.to_string()))
}

/// Determinizes `nfa` with the default configuration.
pub fn build(nfa: &NFA) -> AutomatonResult<DFA> {
    nfa.determinize()
}

/// Like [build], but also returns the NFA states behind every DFA state and
/// the construction statistics.
pub fn build_with_subsets(nfa: &NFA) -> AutomatonResult<Determinized> {
    SubsetConstruction::new(nfa, DeterminizeConfig::default(), None).run()
}

impl NFA {
    /// Determinizes this NFA with the default configuration.
    pub fn determinize(&self) -> AutomatonResult<DFA> {
        self.determinize_with(DeterminizeConfig::default())
    }

    pub fn determinize_with(&self, config: DeterminizeConfig) -> AutomatonResult<DFA> {
        SubsetConstruction::new(self, config, None)
            .run()
            .map(|determinized| determinized.dfa)
    }
}
