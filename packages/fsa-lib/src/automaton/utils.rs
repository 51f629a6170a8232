use std::collections::BTreeMap;

use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::automaton::alphabet::{Symbol, symbol_label};

/// Compresses a sorted list of symbols into a short label, turning runs of
/// consecutive symbols into ranges, e.g. `a-f,x`.
pub fn symbol_ranges_label(symbols: &[Symbol]) -> String {
    let runs = symbols
        .iter()
        .enumerate()
        .chunk_by(|(i, s)| **s as isize - *i as isize);

    let label = (&runs)
        .into_iter()
        .map(|(_, run)| {
            let run = run.map(|(_, s)| *s).collect_vec();
            match (run.first(), run.last()) {
                (Some(first), Some(last)) if first != last => {
                    format!("{}-{}", symbol_label(*first), symbol_label(*last))
                }
                (Some(first), _) => symbol_label(*first),
                _ => String::new(),
            }
        })
        .join(",");

    label
}

/// Renders an automaton in graphviz DOT format.
///
/// `edges` maps a `(source, target)` pair to the labels of all edges between
/// them, so parallel edges end up as a single arrow.
pub fn to_graphviz(
    start: Option<NodeIndex>,
    accepting: impl Iterator<Item = NodeIndex>,
    edges: &BTreeMap<(NodeIndex, NodeIndex), Vec<String>>,
) -> String {
    let mut dot = String::new();
    dot.push_str("digraph finite_state_machine {\n");
    dot.push_str("fontname=\"Helvetica,Arial,sans-serif\"\n");
    dot.push_str("node [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("edge [fontname=\"Helvetica,Arial,sans-serif\"]\n");
    dot.push_str("rankdir=LR;\n");
    dot.push_str("node [shape=point,label=\"\"]START\n");

    dot.push_str(&format!(
        "node [shape = doublecircle]; {};\n",
        accepting.map(|node| node.index().to_string()).join(" ")
    ));
    dot.push_str("node [shape = circle];\n");

    if let Some(start) = start {
        dot.push_str(&format!("START -> {};\n", start.index()));
    }

    for ((source, target), labels) in edges {
        dot.push_str(&format!(
            "{} -> {} [ label=\"{}\" ];\n",
            source.index(),
            target.index(),
            labels.join(",")
        ));
    }

    dot.push_str("}\n");

    dot
}
