//! Section manifests: a declarative description of a report index that the
//! `build` command turns into a [`Report`] through the public `add` API.
//!
//! ```toml
//! [[sections]]
//! name = "plugin1"
//! commands = [{ name = "ls /", return_code = 0, href = "plugin1/ls" }]
//! alerts = ["something bad"]
//! notes = ["fyi"]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::core::{Leaf, Report, Section};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub sections: Vec<ManifestSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestSection {
    pub name: Option<String>,
    #[serde(default)]
    pub commands: Vec<ManifestCommand>,
    #[serde(default)]
    pub copied_files: Vec<ManifestCopiedFile>,
    #[serde(default)]
    pub created_files: Vec<ManifestCreatedFile>,
    #[serde(default)]
    pub alerts: Vec<Value>,
    #[serde(default)]
    pub notes: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestCommand {
    pub name: String,
    pub return_code: i64,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestCopiedFile {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestCreatedFile {
    pub name: String,
}

impl Manifest {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to parse manifest (TOML)")
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("failed to parse manifest (JSON)")
    }

    /// Reads a manifest, choosing JSON for `.json` files and TOML otherwise.
    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&s)
        } else {
            Self::from_toml_str(&s)
        }
    }

    /// Builds the report. Sections sharing a name replace earlier ones.
    pub fn into_report(self) -> Result<Report> {
        let mut report = Report::new();

        for (idx, mut raw) in self.sections.into_iter().enumerate() {
            let name = raw
                .name
                .take()
                .filter(|name| !name.trim().is_empty())
                .ok_or_else(|| {
                    crate::exit::invalid_args(format!("manifest section #{} has no name", idx + 1))
                })?;

            let mut section = Section::new(name);
            section.add(raw.into_leaves());
            report.add([section]);
        }

        Ok(report)
    }
}

impl ManifestSection {
    fn into_leaves(self) -> Vec<Leaf> {
        let mut leaves = Vec::new();
        leaves.extend(
            self.commands
                .into_iter()
                .map(|c| Leaf::command(c.name, c.return_code, c.href)),
        );
        leaves.extend(
            self.copied_files
                .into_iter()
                .map(|f| Leaf::copied_file(f.name, f.href)),
        );
        leaves.extend(
            self.created_files
                .into_iter()
                .map(|f| Leaf::created_file(f.name)),
        );
        leaves.extend(self.alerts.into_iter().map(Leaf::Alert));
        leaves.extend(self.notes.into_iter().map(Leaf::Note));
        leaves
    }
}
