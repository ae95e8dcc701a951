use serde_json::{Value, json};

use crate::core::Category;

/// A single recorded fact. Leaves attach to sections only.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Command {
        name: String,
        return_code: i64,
        href: String,
    },
    CopiedFile {
        name: String,
        href: String,
    },
    CreatedFile {
        name: String,
    },
    /// Opaque content, stored as given.
    Alert(Value),
    /// Opaque content, stored as given.
    Note(Value),
}

impl Leaf {
    pub fn command(name: impl Into<String>, return_code: i64, href: impl Into<String>) -> Self {
        Self::Command {
            name: name.into(),
            return_code,
            href: href.into(),
        }
    }

    pub fn copied_file(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self::CopiedFile {
            name: name.into(),
            href: href.into(),
        }
    }

    pub fn created_file(name: impl Into<String>) -> Self {
        Self::CreatedFile { name: name.into() }
    }

    pub fn alert(content: impl Into<Value>) -> Self {
        Self::Alert(content.into())
    }

    pub fn note(content: impl Into<Value>) -> Self {
        Self::Note(content.into())
    }

    pub const fn category(&self) -> Category {
        match self {
            Leaf::Command { .. } => Category::Commands,
            Leaf::CopiedFile { .. } => Category::CopiedFiles,
            Leaf::CreatedFile { .. } => Category::CreatedFiles,
            Leaf::Alert(_) => Category::Alerts,
            Leaf::Note(_) => Category::Notes,
        }
    }

    pub fn payload(&self) -> Value {
        self.clone().into_payload()
    }

    pub fn into_payload(self) -> Value {
        match self {
            Leaf::Command {
                name,
                return_code,
                href,
            } => json!({
                "name": name,
                "return_code": return_code,
                "href": href,
            }),
            Leaf::CopiedFile { name, href } => json!({
                "name": name,
                "href": href,
            }),
            Leaf::CreatedFile { name } => json!({ "name": name }),
            Leaf::Alert(content) | Leaf::Note(content) => content,
        }
    }
}
