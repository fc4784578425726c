use gridjson::{Formatter, GridJsonError};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Player {
    active: bool,
    name: String,
    scores: Vec<i32>,
}

#[test]
fn serializable_types_format_directly() {
    let player = Player {
        active: true,
        name: "Alice".into(),
        scores: vec![95, 87, 92],
    };
    let out = Formatter::new().serialize(&player, 0, 100).unwrap();
    assert_eq!(
        out,
        "{ \"active\": true, \"name\": \"Alice\", \"scores\": [95, 87, 92] }\n"
    );
}

#[test]
fn parsed_values_format_directly() {
    let value = json!({"b": [1, 2], "a": 3});
    let out = Formatter::new().format_value(&value, 0).unwrap();
    assert_eq!(out, "{ \"a\": 3, \"b\": [1, 2] }\n");
}

#[test]
fn recursion_limit_guards_serialization() {
    let deep = vec![vec![vec![vec![1]]]];
    let err = Formatter::new().serialize(&deep, 0, 3).unwrap_err();
    assert!(matches!(err, GridJsonError::DepthLimit));
    assert!(Formatter::new().serialize(&deep, 0, 10).is_ok());
}

#[derive(Serialize)]
struct Unit {
    hp: u32,
    name: String,
}

#[test]
fn serialized_rows_align_like_any_other_table() {
    let units = vec![
        Unit { hp: 400, name: "turret".into() },
        Unit { hp: 80, name: "assassin".into() },
    ];
    let mut formatter = Formatter::new();
    formatter.options.max_inline_complexity = 1;
    let out = formatter.serialize(&units, 0, 100).unwrap();
    let expected = "\
[
    {\"hp\": 400, \"name\": \"turret\"  },
    {\"hp\":  80, \"name\": \"assassin\"}
]
";
    assert_eq!(out, expected);
}

#[test]
fn custom_width_measure_accounts_for_wide_glyphs() {
    let input = r#"[{"s":"漢字","n":1},{"s":"ab","n":2}]"#;

    // Char counting sees "漢字" and "ab" as the same width.
    let mut formatter = Formatter::new();
    formatter.options.max_inline_complexity = 1;
    let out = formatter.reformat(input, 0).unwrap();
    let expected = "\
[
    {\"s\": \"漢字\", \"n\": 1},
    {\"s\": \"ab\", \"n\": 2}
]
";
    assert_eq!(out, expected);

    // A display-width measure pads the narrow string two extra cells.
    formatter.set_string_width(|s| unicode_width::UnicodeWidthStr::width(s));
    let out = formatter.reformat(input, 0).unwrap();
    let expected = "\
[
    {\"s\": \"漢字\", \"n\": 1},
    {\"s\": \"ab\",   \"n\": 2}
]
";
    assert_eq!(out, expected);
}
