use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::core::node::{AddOutcome, Node, NodeKind, accepts};
use crate::core::Category;

/// Payloads of one section, grouped by category in insertion order.
pub type SectionData = BTreeMap<Category, Vec<Value>>;

/// A named container of leaf payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    name: String,
    data: SectionData,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: SectionData::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &SectionData {
        &self.data
    }

    pub fn into_parts(self) -> (String, SectionData) {
        (self.name, self.data)
    }

    /// Appends every leaf among `nodes`; other kinds are dropped without notice.
    pub fn add<I, N>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let _ = self.add_tracked(nodes);
    }

    /// Same effect as [`Section::add`], reporting how many nodes were dropped.
    pub fn add_tracked<I, N>(&mut self, nodes: I) -> AddOutcome
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let mut outcome = AddOutcome::default();
        for node in nodes {
            let node: Node = node.into();
            if !accepts(NodeKind::Section, node.kind()) {
                outcome.rejected += 1;
                continue;
            }
            let Node::Leaf(leaf) = node else {
                outcome.rejected += 1;
                continue;
            };
            self.data
                .entry(leaf.category())
                .or_default()
                .push(leaf.into_payload());
            outcome.accepted += 1;
        }
        outcome
    }

    pub fn entries(&self, category: Category) -> Option<&[Value]> {
        self.data.get(&category).map(Vec::as_slice)
    }

    pub fn entry_count(&self) -> usize {
        self.data.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(&self.data).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}
