//! Output rendering for report indexes

pub mod json;
pub mod text;

pub use text::{PlainTextReport, plain_text};
