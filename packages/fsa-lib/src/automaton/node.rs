/// A state of a DFA or NFA. Transitions live on the graph edges, so the only
/// thing a state knows about itself is whether it accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub accepting: bool,
}

impl StateNode {
    pub fn new(accepting: bool) -> Self {
        StateNode { accepting }
    }

    pub fn accepting() -> Self {
        StateNode::new(true)
    }

    pub fn non_accepting() -> Self {
        StateNode::new(false)
    }
}
