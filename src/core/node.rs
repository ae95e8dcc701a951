use std::fmt;

use crate::core::{Leaf, Report, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Report,
    Section,
    Leaf,
}

/// Which candidates a container takes: reports hold sections, sections hold leaves.
pub const fn accepts(container: NodeKind, candidate: NodeKind) -> bool {
    matches!(
        (container, candidate),
        (NodeKind::Report, NodeKind::Section) | (NodeKind::Section, NodeKind::Leaf)
    )
}

/// Anything that can be offered to a container's `add`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Report(Report),
    Section(Section),
    Leaf(Leaf),
}

impl Node {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Node::Report(_) => NodeKind::Report,
            Node::Section(_) => NodeKind::Section,
            Node::Leaf(_) => NodeKind::Leaf,
        }
    }
}

impl From<Report> for Node {
    fn from(report: Report) -> Self {
        Node::Report(report)
    }
}

impl From<Section> for Node {
    fn from(section: Section) -> Self {
        Node::Section(section)
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Report(report) => fmt::Display::fmt(report, f),
            Node::Section(section) => fmt::Display::fmt(section, f),
            Node::Leaf(leaf) => f.write_str(&leaf.payload().to_string()),
        }
    }
}

/// Tally of one `add_tracked` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOutcome {
    pub accepted: usize,
    pub rejected: usize,
}
