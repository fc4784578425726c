use gridjson::{CommentPolicy, Formatter};

fn preserving() -> Formatter {
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;
    formatter
}

const DECORATED: &str = "{ /*1*/ \"a\": [true, true], \"b\": [false, false] /*2*/, \
/*3*/ \"c\": [false, true] /*4*/ }";

#[test]
fn attached_comments_survive_inline_layout() {
    let formatter = preserving();
    let out = formatter.reformat(DECORATED, 0).unwrap();
    assert_eq!(out, format!("{DECORATED}\n"));
}

#[test]
fn attached_comments_get_their_own_columns_in_tables() {
    let mut formatter = preserving();
    formatter.options.max_inline_complexity = 1;
    let out = formatter.reformat(DECORATED, 0).unwrap();
    let expected = "\
{
    /*1*/ \"a\": [true,  true ],
          \"b\": [false, false], /*2*/
    /*3*/ \"c\": [false, true ] /*4*/
}
";
    assert_eq!(out, expected);
}

#[test]
fn attached_comments_follow_their_elements_when_expanded() {
    let mut formatter = preserving();
    formatter.options.max_inline_complexity = 0;
    formatter.options.max_compact_array_complexity = 0;
    formatter.options.max_table_row_complexity = 0;
    let out = formatter.reformat(DECORATED, 0).unwrap();
    let expected = "\
{
    /*1*/ \"a\": [
        true,
        true
    ],
    \"b\": [
        false,
        false
    ] /*2*/,
    /*3*/ \"c\": [
        false,
        true
    ] /*4*/
}
";
    assert_eq!(out, expected);
}

#[test]
fn middle_block_comment_can_stay_inline() {
    let formatter = preserving();
    let out = formatter.reformat("{\"a\": /*m*/ [1, 2]}", 0).unwrap();
    assert_eq!(out, "{ \"a\": /*m*/ [1, 2] }\n");
}

#[test]
fn middle_line_comment_forces_a_three_line_split() {
    let formatter = preserving();
    let out = formatter.reformat("{\"a\": //c\n1}", 0).unwrap();
    assert_eq!(out, "{\n    \"a\":\n        //c\n        1\n}\n");
}

#[test]
fn line_comment_postfix_ends_its_line() {
    let formatter = preserving();
    let out = formatter.reformat("[1, 2 // tail\n]", 0).unwrap();
    assert_eq!(out, "[\n    1,\n    2 // tail\n]\n");
}

#[test]
fn comment_after_comma_on_the_same_line_binds_to_the_previous_element() {
    let formatter = preserving();
    let out = formatter
        .reformat("{\"a\": 1, // note\n\"b\": 2}", 0)
        .unwrap();
    assert_eq!(out, "{\n    \"a\": 1, // note\n    \"b\": 2\n}\n");
}

#[test]
fn standalone_comments_get_their_own_lines() {
    let formatter = preserving();
    let out = formatter.reformat("[\n// note\n1,\n2\n]", 0).unwrap();
    assert_eq!(out, "[\n    // note\n    1,\n    2\n]\n");
}

#[test]
fn multiline_block_comments_are_reindented() {
    let formatter = preserving();
    let input = "[\n    1,\n    /* one\n       two */\n    2\n]";
    let out = formatter.reformat(input, 0).unwrap();
    assert_eq!(out, "[\n    1,\n    /* one\n       two */\n    2\n]\n");
}

#[test]
fn remove_policy_drops_comments() {
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Remove;
    let out = formatter.reformat("[1, /*c*/ 2] // done", 0).unwrap();
    assert_eq!(out, "[1, 2]\n");
}
