use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::node::{AddOutcome, Node, NodeKind, accepts};
use crate::core::SectionData;

/// Root of a report index: section name to section payloads.
///
/// Serializes as exactly `{section: {category: [payload, ...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    data: BTreeMap<String, SectionData>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &BTreeMap<String, SectionData> {
        &self.data
    }

    /// Stores every section among `nodes` under its name, replacing any
    /// section already stored under that name. Other kinds are dropped
    /// without notice.
    pub fn add<I, N>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let _ = self.add_tracked(nodes);
    }

    /// Same effect as [`Report::add`], reporting how many nodes were dropped.
    pub fn add_tracked<I, N>(&mut self, nodes: I) -> AddOutcome
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let mut outcome = AddOutcome::default();
        for node in nodes {
            let node: Node = node.into();
            if !accepts(NodeKind::Report, node.kind()) {
                outcome.rejected += 1;
                continue;
            }
            let Node::Section(section) = node else {
                outcome.rejected += 1;
                continue;
            };
            let (name, data) = section.into_parts();
            self.data.insert(name, data);
            outcome.accepted += 1;
        }
        outcome
    }

    pub fn section(&self, name: &str) -> Option<&SectionData> {
        self.data.get(name)
    }

    /// Sections in ascending name order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &SectionData)> {
        self.data.iter().map(|(name, data)| (name.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.data
            .values()
            .flat_map(|section| section.values())
            .map(Vec::len)
            .sum()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(&self.data).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}
