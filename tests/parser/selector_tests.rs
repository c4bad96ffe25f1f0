// Vector selector test cases covering:
// - Simple metric names
// - Label matchers (=, !=, =~, !~)
// - Metric names inside braces
// - Empty selector validation
// - @ and offset modifiers

/// Valid vector selector test cases
/// Format: input query string
pub const VALID_VECTOR_SELECTORS: &[&str] = &[
    // Simple metric names
    "foo",
    "bar",
    "some_metric",
    "http_requests_total",
    // With colons (recording rules)
    "foo:bar",
    // With label matchers
    r#"foo{a="b"}"#,
    r#"foo{bar="baz"}"#,
    r#"foo{job="test"}"#,
    // Multiple label matchers
    r#"foo{a="b", foo!="bar", test=~"test", bar!~"baz"}"#,
    // Trailing comma allowed
    r#"foo{a="b", foo!="bar", test=~"test", bar!~"baz",}"#,
    // Metric name with colon and labels
    r#"foo:bar{a="bc"}"#,
    // Label with special values
    r#"foo{bar='}'}"#,  // Closing brace in value
    r#"foo{NaN='bc'}"#, // NaN as label name
    // Empty braces after a name
    "foo{}",
    // Metric name inside braces (quoted)
    r#"{"foo"}"#,
    r#"{"foo", a="bc"}"#,
    // Metric name in middle of selector list
    r#"{a="b", foo!="bar", "foo", test=~"test", bar!~"baz"}"#,
    // Multiple __name__ matchers
    r#"{__name__=~"bar", __name__!~"baz"}"#,
    r#"{__name__="bar", __name__="baz"}"#,
    r#"{"bar", __name__="baz"}"#,
    // Quoted label names
    r#"{"service.name"="api"}"#,
    r#"foo{"http.status"=~"5.."}"#,
    // Single-quoted and backtick strings
    r#"{foo='bar'}"#,
    "{`foo`}",
    // Keywords as label names
    r#"foo{and="x", by="y", offset="z"}"#,
    // start and end are ordinary metric and label names
    r#"start{end="foo"}"#,
    r#"end{start="foo"}"#,
    // Regex matcher that matches the empty string next to a non-empty one
    r#"{job=~".*", instance="a"}"#,
];

/// Label matcher operator test cases
/// Format: (input, expected_op)
pub const LABEL_MATCHER_OPS: &[(&str, &str)] = &[
    (r#"foo{a="b"}"#, "="),
    (r#"foo{a!="b"}"#, "!="),
    (r#"foo{a=~"b"}"#, "=~"),
    (r#"foo{a!~"b"}"#, "!~"),
];

/// Selectors rejected by the parser
/// Format: (input, error_contains)
pub const INVALID_VECTOR_SELECTORS: &[(&str, &str)] = &[
    // Label name starting with a digit
    ("{0a='a'}", "bad number or duration syntax"),
    ("foo{1}", "unexpected number \"1\" in label matching"),
    // Missing value
    ("some_metric{a=b}", "unexpected identifier \"b\" in label matching, expected string"),
    // Colon in label name
    (r#"some_metric{a:b="b"}"#, "invalid label name \"a:b\" in label matching"),
    // Invalid operator
    (r#"foo{a*"b"}"#, "unexpected \"*\" in label matching"),
    (r#"foo{a>="b"}"#, "unexpected \">=\" in label matching"),
    (r#"foo{__name__ == "bar"}"#, "unexpected \"==\" in label matching"),
    // Label without operator
    ("foo{gibberish}", "unexpected \"}\" in label matching"),
    // Unclosed brace
    ("{", "unexpected end of input in label matching"),
    ("some{", "unexpected end of input in label matching"),
    (r#"foo{a="b""#, "unexpected end of input in label matching, expected \",\" or \"}\""),
    // Extra closing brace
    ("}", "unexpected \"}\" in expression"),
    ("some}", "unexpected \"}\" in expression"),
    // Leading comma
    ("foo{,}", "unexpected \",\" in label matching"),
    // Junk after value
    (r#"foo{__name__="bar" lol}"#, "unexpected identifier \"lol\" in label matching"),
    // Missing value after operator
    (r#"foo{"a"=}"#, "unexpected \"}\" in label matching"),
    (r#"foo{__name__= =}"#, "unexpected \"=\" in label matching"),
    // Characters outside the language
    ("foo{a=\"b\"; c=\"d\"}", "unexpected character ';'"),
];

/// Selectors that parse but fail the type check
/// Format: (input, error_contains)
pub const SELECTOR_TYPE_ERRORS: &[(&str, &str)] = &[
    // Empty braces
    ("{}", "vector selector must contain at least one non-empty matcher"),
    // Only matchers that match the empty string
    (r#"{x=""}"#, "at least one non-empty matcher"),
    (r#"{x=~".*"}"#, "at least one non-empty matcher"),
    (r#"{x!~".+"}"#, "at least one non-empty matcher"),
    (r#"{x!="a"}"#, "at least one non-empty matcher"),
    (r#"{x=~"a|"}"#, "at least one non-empty matcher"),
    // Metric name both inside and outside braces
    (r#"foo{__name__="bar"}"#, "metric name must not be set twice: \"foo\" or \"bar\""),
    (r#"foo{"bar"}"#, "metric name must not be set twice"),
    // Invalid regular expressions
    (r#"foo{a=~"("}"#, "invalid regular expression \"(\" in label matcher for \"a\""),
    (r#"{a!~"[z-a]"}"#, "invalid regular expression"),
];

/// Vector selector with offset modifier test cases
/// Format: (input, offset_ms)
pub const SELECTOR_WITH_OFFSET: &[(&str, i64)] = &[
    ("foo offset 5m", 300_000),
    ("foo offset -7m", -420_000),
    ("foo offset 1h30m", 5_400_000),
    ("foo offset 1m30ms", 60_030),
    (r#"foo{job="x"} offset 1d"#, 86_400_000),
];

/// Vector selector with @ modifier test cases
/// Format: (input, timestamp_ms)
pub const SELECTOR_WITH_AT: &[(&str, i64)] = &[
    ("foo @ 1603774568", 1_603_774_568_000),
    ("foo @ -100", -100_000),
    ("foo @ +100", 100_000),
    ("foo @ .3", 300),
    ("foo @ 3.", 3_000),
    ("foo @ 3.33", 3_330),
    ("foo @ 3.3333", 3_333),
    ("foo @ 3e2", 300_000),
    ("foo @ 3e-1", 300),
    ("foo @ 0xA", 10_000),
    ("foo @ -3.3e1", -33_000),
];

/// Vector selector with @ start()/end() preprocessors
pub const SELECTOR_WITH_AT_PREPROCESSOR: &[(&str, &str)] = &[
    ("foo @ start()", "start"),
    ("foo @ end()", "end"),
    ("foo @ start( )", "start"),
];

/// Selectors carrying both modifiers, in either order
/// Format: (input, timestamp_ms, offset_ms)
pub const SELECTOR_WITH_BOTH_MODIFIERS: &[(&str, i64, i64)] = &[
    ("foo @ 100 offset 1m", 100_000, 60_000),
    ("foo offset 1m @ 100", 100_000, 60_000),
    ("foo offset -1m @ -100", -100_000, -60_000),
];

/// Invalid @ and offset modifier test cases
pub const INVALID_MODIFIERS: &[(&str, &str)] = &[
    ("foo @ +Inf", "timestamp out of bounds for @ modifier"),
    ("foo @ -Inf", "timestamp out of bounds for @ modifier"),
    ("foo @ NaN", "timestamp out of bounds for @ modifier"),
    ("foo @ bar", "unexpected identifier \"bar\" in @ modifier"),
    ("foo @ start", "unexpected end of input in @ modifier"),
    ("foo @ start(1)", "unexpected number \"1\" in @ modifier"),
    ("foo @", "unexpected end of input in @ modifier"),
    ("foo @ 5m", "unexpected duration \"5m\" in @ modifier"),
    ("1 offset 1d", "offset modifier must be preceded by an instant vector selector"),
    ("1 @ 100", "@ modifier must be preceded by an instant vector selector"),
    ("foo offset 1s offset 2s", "offset may not be set multiple times"),
    ("foo @ 1 @ 2", "@ <timestamp> may not be set multiple times"),
    ("foo @ start() @ end()", "@ <timestamp> may not be set multiple times"),
    ("foo offset 5", "unexpected number \"5\" in offset modifier"),
    ("foo offset - 5", "unexpected number \"5\" in offset modifier"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use promql_ast::{AtModifier, Expr, LabelMatchOp, ValueType, VectorSelector, check, parse};
    use pretty_assertions::assert_eq;

    fn selector(input: &str) -> VectorSelector {
        match parse(input) {
            Ok(Expr::VectorSelector(v)) => v,
            other => panic!("expected vector selector for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_valid_vector_selectors() {
        for input in VALID_VECTOR_SELECTORS {
            let sel = selector(input);
            assert!(
                sel.name.is_some() || !sel.matchers.is_empty(),
                "Selector should have a name or matchers: {}",
                input
            );
            assert_eq!(
                check(&Expr::VectorSelector(sel)),
                Ok(ValueType::InstantVector),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_label_matcher_operators() {
        for (input, expected_op) in LABEL_MATCHER_OPS {
            let sel = selector(input);
            assert_eq!(sel.matchers.len(), 1, "Expected one matcher for {}", input);
            assert_eq!(sel.matchers[0].op.as_str(), *expected_op, "input: {}", input);
        }
    }

    #[test]
    fn test_invalid_selectors() {
        for (input, fragment) in INVALID_VECTOR_SELECTORS {
            let err = parse(input).expect_err(input);
            assert!(
                err.message().contains(fragment),
                "{:?}: expected {:?} in {:?}",
                input,
                fragment,
                err.message()
            );
        }
    }

    #[test]
    fn test_selector_type_errors() {
        for (input, fragment) in SELECTOR_TYPE_ERRORS {
            let expr = parse(input).unwrap_or_else(|e| panic!("{:?} should parse: {}", input, e));
            let err = check(&expr).expect_err(input);
            assert!(
                err.message().contains(fragment),
                "{:?}: expected {:?} in {:?}",
                input,
                fragment,
                err.message()
            );
        }
    }

    #[test]
    fn test_offset_modifier() {
        for (input, expected_ms) in SELECTOR_WITH_OFFSET {
            let sel = selector(input);
            let offset = sel.offset.unwrap_or_else(|| panic!("no offset for {}", input));
            assert_eq!(offset.as_millis(), *expected_ms, "input: {}", input);
            assert_eq!(sel.at, None);
        }
    }

    #[test]
    fn test_at_modifier() {
        for (input, expected_ms) in SELECTOR_WITH_AT {
            let sel = selector(input);
            assert_eq!(sel.at, Some(AtModifier::Timestamp(*expected_ms)), "input: {}", input);
            assert_eq!(sel.offset, None);
        }
    }

    #[test]
    fn test_at_preprocessors() {
        for (input, which) in SELECTOR_WITH_AT_PREPROCESSOR {
            let expected = if *which == "start" {
                AtModifier::Start
            } else {
                AtModifier::End
            };
            assert_eq!(selector(input).at, Some(expected), "input: {}", input);
        }
    }

    #[test]
    fn test_both_modifiers() {
        for (input, at_ms, offset_ms) in SELECTOR_WITH_BOTH_MODIFIERS {
            let sel = selector(input);
            assert_eq!(sel.at, Some(AtModifier::Timestamp(*at_ms)), "input: {}", input);
            assert_eq!(sel.offset.map(|d| d.as_millis()), Some(*offset_ms), "input: {}", input);
        }
    }

    #[test]
    fn test_invalid_modifiers() {
        for (input, fragment) in INVALID_MODIFIERS {
            let err = parse(input).expect_err(input);
            assert!(
                err.message().contains(fragment),
                "{:?}: expected {:?} in {:?}",
                input,
                fragment,
                err.message()
            );
        }
    }

    #[test]
    fn test_metric_with_multiple_labels() {
        let sel = selector(r#"hello{world="jupiter",type="gas"}"#);
        assert_eq!(sel.name, Some("hello".to_string()));
        assert_eq!(sel.matchers.len(), 2);
        assert_eq!(sel.matchers[0].name, "world");
        assert_eq!(sel.matchers[0].value, "jupiter");
        assert_eq!(sel.matchers[1].name, "type");
        assert_eq!(sel.matchers[1].value, "gas");
    }

    #[test]
    fn test_quoted_metric_name_becomes_name_matcher() {
        let sel = selector(r#"{a="b", "foo"}"#);
        assert_eq!(sel.name, None);
        assert_eq!(sel.matchers.len(), 2);
        assert_eq!(sel.matchers[1].name, "__name__");
        assert_eq!(sel.matchers[1].op, LabelMatchOp::Equal);
        assert_eq!(sel.matchers[1].value, "foo");
    }

    #[test]
    fn test_all_matchers_includes_name() {
        let sel = selector(r#"foo{job="api"}"#);
        let all = sel.all_matchers();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|m| m.name == "__name__" && m.value == "foo"));
    }

    #[test]
    fn test_selector_span() {
        let sel = selector(r#"  foo{a="b"} offset 5m"#);
        assert_eq!((sel.span.start, sel.span.end), (2, 22));
    }
}
