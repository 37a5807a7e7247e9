//! Property-based tests for parsing
//!
//! - Parsing is deterministic, whatever the input.
//! - The Markup View reproduces any input built from well-formed, non-nested markup.
//! - Rendering never panics; it either succeeds or reports a structural conflict.

use editml_parser::{parse, render_clean_view, render_markup_view};
use proptest::prelude::*;

/// Plain text: no braces, backslashes or percent signs
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,;!?\n]{0,12}"
}

fn content_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,]{0,10}"
}

fn editor_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,5}"]
}

fn tag_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,3}"
}

/// One well-formed markup construct
fn markup_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (content_strategy(), editor_strategy()).prop_map(|(c, id)| format!("{{+{c}+{id}}}")),
        (content_strategy(), editor_strategy()).prop_map(|(c, id)| format!("{{-{c}-{id}}}")),
        (content_strategy(), editor_strategy()).prop_map(|(c, id)| format!("{{>{c}<{id}}}")),
        (content_strategy(), editor_strategy()).prop_map(|(c, id)| format!("{{={c}={id}}}")),
        (
            prop_oneof![Just("move"), Just("mv"), Just("copy"), Just("cp")],
            content_strategy(),
            tag_strategy()
        )
            .prop_map(|(kw, c, tag)| format!("{{{kw}~{c}~{tag}}}")),
        (
            prop_oneof![Just("move"), Just("m"), Just("copy"), Just("c")],
            tag_strategy()
        )
            .prop_map(|(kw, tag)| format!("{{{kw}:{tag}}}")),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((text_strategy(), markup_strategy()), 0..8),
        text_strategy(),
    )
        .prop_map(|(pieces, tail)| {
            let mut doc: String = pieces.iter().map(|(t, m)| format!("{t}{m}")).collect();
            doc.push_str(&tail);
            doc
        })
}

/// Arbitrary input dense in markup characters
fn noisy_strategy() -> impl Strategy<Value = String> {
    "[a-c{}+<>=~:% \n\\\\-]{0,60}"
}

proptest! {
    #[test]
    fn markup_view_round_trips(doc in document_strategy()) {
        let (nodes, issues) = parse(&doc);
        prop_assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
        prop_assert_eq!(render_markup_view(&nodes), doc);
    }

    #[test]
    fn parsing_is_deterministic(input in noisy_strategy()) {
        prop_assert_eq!(parse(&input), parse(&input));
    }

    #[test]
    fn rendering_never_panics(input in noisy_strategy()) {
        let (nodes, _) = parse(&input);
        match render_clean_view(&nodes) {
            Ok(rendered) => prop_assert!(rendered.issues.iter().all(|i| i.line.is_some())),
            Err(err) => prop_assert!(err.to_issue().is_error()),
        }
    }
}
