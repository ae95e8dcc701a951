//! Restricted document model for a diagnostic collection index, and its
//! plain-text rendering.
//!
//! A [`core::Report`] holds named [`core::Section`]s; a section holds
//! [`core::Leaf`] records grouped by [`core::Category`]. Nodes of the wrong
//! kind offered to `add` are dropped without error.
//!
//! ```
//! use sosindex::core::{Leaf, Report, Section};
//!
//! let mut section = Section::new("plugin1");
//! section.add([Leaf::command("ls /", 0, "plugin1/ls"), Leaf::note("fyi")]);
//! let mut report = Report::new();
//! report.add([section]);
//!
//! let text = sosindex::render::plain_text(&report);
//! assert!(text.starts_with("plugin1\n===="));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod exit;
pub mod logs;
pub mod manifest;
pub mod render;
pub mod ui;
