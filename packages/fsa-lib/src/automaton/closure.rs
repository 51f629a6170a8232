use crate::automaton::{nfa::NFA, state_set::StateSet};

impl NFA {
    /// Calculates the epsilon closure of a set of states: every state
    /// reachable from `states` using only epsilon moves, including `states`
    /// itself.
    ///
    /// The closure only ever grows and the state space is finite, so this
    /// always terminates. Applying it twice gives the same set as applying it
    /// once.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack = states.iter().collect::<Vec<_>>();

        while let Some(state) = stack.pop() {
            for target in self.epsilon_destinations(state) {
                if closure.insert(target) {
                    stack.push(target);
                }
            }
        }

        tracing::trace!("epsilon closure of {} is {}", states, closure);

        closure
    }
}

/// Free-standing form of [NFA::epsilon_closure].
pub fn epsilon_closure(nfa: &NFA, states: &StateSet) -> StateSet {
    nfa.epsilon_closure(states)
}
