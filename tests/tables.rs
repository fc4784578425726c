use gridjson::{CommaPlacement, CommentPolicy, Formatter, NumberAlignment};

fn table_formatter() -> Formatter {
    let mut formatter = Formatter::new();
    formatter.options.max_inline_complexity = 1;
    formatter
}

#[test]
fn sibling_objects_align_with_normalized_numbers() {
    let formatter = table_formatter();
    let out = formatter
        .reformat(r#"[{"x":1,"y":2.50},{"x":10,"y":3}]"#, 0)
        .unwrap();
    let expected = "\
[
    {\"x\":  1, \"y\": 2.50},
    {\"x\": 10, \"y\": 3.00}
]
";
    assert_eq!(out, expected);
}

#[test]
fn decimal_alignment_keeps_source_literals() {
    let mut formatter = table_formatter();
    formatter.options.number_alignment = NumberAlignment::Decimal;
    let out = formatter
        .reformat(r#"[{"x":1,"y":2.50},{"x":10,"y":3}]"#, 0)
        .unwrap();
    let expected = "\
[
    {\"x\":  1, \"y\": 2.50},
    {\"x\": 10, \"y\": 3   }
]
";
    assert_eq!(out, expected);
}

#[test]
fn missing_columns_leave_blank_cells() {
    let formatter = table_formatter();
    let out = formatter
        .reformat(r#"[{"a":1,"b":2},{"a":3}]"#, 0)
        .unwrap();
    let expected = "\
[
    {\"a\": 1, \"b\": 2},
    {\"a\": 3        }
]
";
    assert_eq!(out, expected);
}

#[test]
fn disabling_tables_gives_plain_expanded_rows() {
    let mut formatter = table_formatter();
    formatter.options.max_table_row_complexity = -1;
    let out = formatter
        .reformat(r#"[{"x":1,"y":2.50},{"x":10,"y":3}]"#, 0)
        .unwrap();
    let expected = "\
[
    {\"x\": 1, \"y\": 2.50},
    {\"x\": 10, \"y\": 3}
]
";
    assert_eq!(out, expected);
}

#[test]
fn nested_structures_get_sub_columns() {
    let formatter = Formatter::new();
    let input = r#"[{"n":"a","loc":{"x":1,"y":22.5}},{"n":"bb","loc":{"x":10,"y":3}}]"#;
    let expected = "\
[
    {\"n\": \"a\",  \"loc\": {\"x\":  1, \"y\": 22.5}},
    {\"n\": \"bb\", \"loc\": {\"x\": 10, \"y\":  3.0}}
]
";
    assert_eq!(formatter.reformat(input, 0).unwrap(), expected);
}

#[test]
fn sub_columns_are_abandoned_when_the_line_is_too_narrow() {
    let mut formatter = Formatter::new();
    formatter.options.max_total_line_length = 45;
    let input = r#"[{"n":"a","loc":{"x":1,"y":22.5}},{"n":"bb","loc":{"x":10,"y":3}}]"#;
    let expected = "\
[
    {\"n\": \"a\",  \"loc\": {\"x\": 1, \"y\": 22.5}},
    {\"n\": \"bb\", \"loc\": {\"x\": 10, \"y\": 3}  }
]
";
    assert_eq!(formatter.reformat(input, 0).unwrap(), expected);
}

#[test]
fn comma_placement_in_padded_cells() {
    let input = r#"[{"s":"abc","n":1},{"s":"a","n":2}]"#;

    let formatter = table_formatter();
    let expected = "\
[
    {\"s\": \"abc\", \"n\": 1},
    {\"s\": \"a\",   \"n\": 2}
]
";
    assert_eq!(formatter.reformat(input, 0).unwrap(), expected);

    let mut formatter = table_formatter();
    formatter.options.table_comma_placement = CommaPlacement::AfterPadding;
    let expected = "\
[
    {\"s\": \"abc\", \"n\": 1},
    {\"s\": \"a\"  , \"n\": 2}
]
";
    assert_eq!(formatter.reformat(input, 0).unwrap(), expected);
}

#[test]
fn null_rows_are_allowed_in_tables() {
    let formatter = table_formatter();
    let out = formatter.reformat(r#"[{"x":1},null,{"x":3}]"#, 0).unwrap();
    let expected = "\
[
    {\"x\": 1},
    null,
    {\"x\": 3}
]
";
    assert_eq!(out, expected);
}

#[test]
fn rows_holding_standalone_comments_keep_them_and_skip_alignment() {
    let mut formatter = table_formatter();
    formatter.options.comment_policy = CommentPolicy::Preserve;
    let out = formatter
        .reformat("[[/*a*/ /*b*/ 1, 2], [3, 4]]", 0)
        .unwrap();
    let expected = "\
[
    [/*a*/ /*b*/ 1, 2],
    [3, 4]
]
";
    assert_eq!(out, expected);
}

#[test]
fn rows_may_carry_line_comments() {
    let mut formatter = table_formatter();
    formatter.options.comment_policy = CommentPolicy::Preserve;
    let out = formatter
        .reformat("[{\"x\":1}, // first\n{\"x\":2}]", 0)
        .unwrap();
    let expected = "\
[
    {\"x\": 1}, // first
    {\"x\": 2}
]
";
    assert_eq!(out, expected);
}
