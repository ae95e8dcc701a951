//! Structural (JSON) encoding of a report index

use serde_json::Value;

use crate::core::Report;

pub fn to_value(report: &Report) -> serde_json::Result<Value> {
    serde_json::to_value(report)
}

pub fn to_string_pretty(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn to_string_compact(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

pub fn from_str(s: &str) -> serde_json::Result<Report> {
    serde_json::from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Leaf, Section};

    #[test]
    fn pretty_output_parses_back_to_the_same_report() {
        let mut section = Section::new("networking");
        section.add([Leaf::command("ip a", 0, "networking/ip_a"), Leaf::alert("no route")]);
        let mut report = Report::new();
        report.add([section]);

        let parsed = from_str(&to_string_pretty(&report).expect("encode")).expect("decode");
        assert_eq!(parsed, report);
        assert_eq!(to_string_compact(&parsed).expect("encode"), report.to_string());
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(from_str("[1, 2]").is_err());
        assert!(from_str(r#"{"s": {"notes": "not-a-list"}}"#).is_err());
    }
}
