use pretty_assertions::assert_eq;
use sosindex::core::{Leaf, Report, Section};
use sosindex::manifest::Manifest;
use sosindex::render::{PlainTextReport, plain_text};

fn golden_text(raw: &str) -> &str {
    raw.strip_suffix('\n').unwrap_or(raw)
}

fn plugin1_report() -> Report {
    let mut section = Section::new("plugin1");
    section.add([
        Leaf::command("ls /", 0, "plugin1/ls"),
        Leaf::alert("something bad"),
        Leaf::note("fyi"),
    ]);
    let mut report = Report::new();
    report.add([section]);
    report
}

#[test]
fn plugin1_structural_data_matches_golden() {
    let actual = sosindex::render::json::to_value(&plugin1_report()).expect("serialize report");
    let expected: serde_json::Value =
        serde_json::from_str(include_str!("golden/plugin1.json")).expect("parse golden json");
    assert_eq!(actual, expected);
}

#[test]
fn plugin1_text_matches_golden() {
    assert_eq!(
        plain_text(&plugin1_report()),
        golden_text(include_str!("golden/plugin1.txt"))
    );
}

#[test]
fn golden_json_renders_to_golden_text() {
    let report = sosindex::render::json::from_str(include_str!("golden/plugin1.json"))
        .expect("parse golden json");
    assert_eq!(
        PlainTextReport::new(&report).render(),
        golden_text(include_str!("golden/plugin1.txt"))
    );
}

#[test]
fn manifest_with_several_sections_matches_golden() {
    let manifest =
        Manifest::from_toml_str(include_str!("golden/multi.toml")).expect("parse manifest");
    let report = manifest.into_report().expect("build report");

    let renderer = PlainTextReport::new(&report);
    let first = renderer.render();
    assert_eq!(first, golden_text(include_str!("golden/multi.txt")));
    assert_eq!(renderer.render(), first);
}

#[test]
fn insertion_order_of_sections_does_not_affect_output() {
    let build = |names: &[&str]| {
        let mut report = Report::new();
        for name in names {
            let mut section = Section::new(*name);
            section.add([Leaf::created_file(format!("{name}/out"))]);
            report.add([section]);
        }
        plain_text(&report)
    };
    let forward = build(&["a", "b", "c"]);
    assert_eq!(forward, build(&["c", "a", "b"]));
    let a = forward.find("a\n=").expect("a block");
    let b = forward.find("b\n=").expect("b block");
    assert!(a < b, "text={forward}");
}
