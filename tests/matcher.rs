use typeblock::index::{InvalidBlockPolicy, OptionIndex};
use typeblock::matcher::{DEFAULT_MAX_MATCHES, Matcher};
use typeblock::model::{BlockDescriptor, BlockKind};

fn method(id: &str, inst: &str, name: &str) -> BlockDescriptor {
    BlockDescriptor::new(
        id,
        "component_method",
        BlockKind::MethodCall {
            instance_name: inst.into(),
            method_name: name.into(),
        },
    )
}

fn event(id: &str, inst: &str, name: &str) -> BlockDescriptor {
    BlockDescriptor::new(
        id,
        "component_event",
        BlockKind::EventHandler {
            instance_name: inst.into(),
            event_name: name.into(),
        },
    )
}

fn matcher_for(labels: &[&str], use_similar: bool) -> Matcher {
    let mut rows: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
    rows.sort();
    Matcher::new(rows, use_similar)
}

#[test]
fn prefix_matches_rank_before_anything_else() {
    let m = matcher_for(&["call Button1.Click", "when Button1.Click", "callback"], true);
    let got = m.request_matching_rows("call", DEFAULT_MAX_MATCHES);
    assert_eq!(got, ["call Button1.Click", "callback"]);
}

#[test]
fn text_token_forces_text_first() {
    let m = matcher_for(&["Text", "text join", "text length"], true);
    for token in ["text", "Text"] {
        let got = m.request_matching_rows(token, DEFAULT_MAX_MATCHES);
        assert_eq!(got[0], "Text", "token {token:?}");
        assert_eq!(got.iter().filter(|s| *s == "Text").count(), 1);
    }
    let got = m.request_matching_rows("text", DEFAULT_MAX_MATCHES);
    assert_eq!(got, ["Text", "text join", "text length"]);
}

#[test]
fn numeric_literal_appended_after_prefix_matches() {
    let m = matcher_for(&["4 squared", "call Button1.Click"], true);
    let got = m.request_matching_rows("4", DEFAULT_MAX_MATCHES);
    assert_eq!(got, ["4 squared", "4"]);

    for token in ["42", "-3.5", "0"] {
        let got = m.request_matching_rows(token, DEFAULT_MAX_MATCHES);
        assert_eq!(got.last().map(String::as_str), Some(token));
    }
}

#[test]
fn quoted_token_becomes_string_literal() {
    let m = matcher_for(&["call Button1.Click"], true);
    assert_eq!(m.request_matching_rows("\"hello", DEFAULT_MAX_MATCHES), ["\"hello"]);
    assert_eq!(m.request_matching_rows("'x y'", DEFAULT_MAX_MATCHES), ["'x y'"]);
}

#[test]
fn similarity_fallback_is_non_empty_when_rows_exist() {
    let m = matcher_for(&["call Button1.Click", "when Button1.Click", "set Label1.Text"], true);
    let got = m.request_matching_rows("click", DEFAULT_MAX_MATCHES);
    assert_eq!(got.len(), 3);
    assert!(got[..2].contains(&"call Button1.Click".to_string()));
    assert!(got[..2].contains(&"when Button1.Click".to_string()));

    let got = m.request_matching_rows("qqq", DEFAULT_MAX_MATCHES);
    assert!(!got.is_empty());
}

#[test]
fn similarity_disabled_yields_nothing() {
    let m = matcher_for(&["call Button1.Click"], false);
    assert!(m.request_matching_rows("click", DEFAULT_MAX_MATCHES).is_empty());
}

#[test]
fn similarity_respects_max() {
    let m = matcher_for(&["alpha", "beta", "gamma", "delta"], true);
    assert_eq!(m.request_matching_rows("zzz", 2).len(), 2);
}

#[test]
fn numeric_literal_scenario_with_three_entry_index() {
    let number = BlockDescriptor::new("3", "math_number", BlockKind::Generic).with_fields(["42"]);
    let blocks = vec![
        method("1", "Button1", "Click"),
        event("2", "Button1", "Click"),
        number,
    ];
    let build = OptionIndex::from_blocks(&blocks, InvalidBlockPolicy::Abort).unwrap();
    assert_eq!(build.index.len(), 3);

    let m = Matcher::new(build.index.labels().to_vec(), true);
    assert_eq!(m.request_matching_rows("42", DEFAULT_MAX_MATCHES), ["42"]);
}

#[test]
fn call_prefix_scenario_returns_lexical_order() {
    let blocks = vec![
        method("2", "Label1", "SetText"),
        method("1", "Button1", "Click"),
    ];
    let build = OptionIndex::from_blocks(&blocks, InvalidBlockPolicy::Abort).unwrap();
    let m = Matcher::new(build.index.labels().to_vec(), true);
    assert_eq!(
        m.request_matching_rows("call", DEFAULT_MAX_MATCHES),
        ["call Button1.Click", "call Label1.SetText"]
    );
}
