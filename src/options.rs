/// Line terminator used for the formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\r\n`
    Crlf,
    /// `\n`
    Lf,
}

/// What to do when the input contains `//` or `/* */` comments.
///
/// Comments are not standard JSON, but JSONC-style inputs are common in
/// config files. The default rejects them so strict JSON stays strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPolicy {
    /// Fail with a syntax error on the first comment.
    TreatAsError,
    /// Drop comments from the output.
    Remove,
    /// Keep comments, attached to the values they decorate.
    Preserve,
}

/// How numbers are justified within an aligned table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberAlignment {
    /// Left-justified source literals.
    Left,
    /// Right-justified source literals.
    Right,
    /// Source literals padded so the decimal points line up, without
    /// rewriting any digits.
    Decimal,
    /// Numbers re-rendered to a common precision (the maximum number of
    /// fractional digits in the column) and right-justified, so `2.5` and
    /// `3` become `2.50` and `3.00` in a column with `0.25`.
    Normalize,
}

/// Where the comma lands relative to column padding in table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommaPlacement {
    /// `"ab",   ` — comma hugs the value.
    BeforePadding,
    /// `"ab"   ,` — comma at the end of the padded cell.
    AfterPadding,
    /// Comma hugs most values, but follows the padding for number columns
    /// so justified digits and their commas both stay columnar.
    BeforePaddingExceptNumbers,
}

/// All the knobs controlling output shape.
///
/// Start from [`Default::default()`] and adjust fields; the struct is plain
/// data and is cloned into each format operation, so one configuration can
/// drive any number of concurrent formatters.
///
/// # Example
///
/// ```rust
/// use gridjson::{FormatOptions, CommentPolicy};
///
/// let mut options = FormatOptions::default();
/// options.max_total_line_length = 80;
/// options.indent_spaces = 2;
/// options.comment_policy = CommentPolicy::Preserve;
/// ```
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Line terminator. Default: [`LineEnding::Lf`].
    pub line_ending: LineEnding,

    /// Width budget per output line, counting indentation and any prefix.
    /// A single token longer than this is emitted as-is. Default: 120.
    pub max_total_line_length: usize,

    /// Deepest nesting a container may have and still be written on one
    /// line. 0 restricts inlining to empty containers and scalars; -1
    /// disables the inline tier entirely. Default: 2.
    pub max_inline_complexity: isize,

    /// Deepest nesting an array may have and still use compact wrapping
    /// (several elements per line). -1 disables the tier. Default: 2.
    pub max_compact_array_complexity: isize,

    /// Deepest nesting a table *row* may have. The container holding the
    /// rows may be one level deeper. -1 disables tables. Default: 2.
    pub max_table_row_complexity: isize,

    /// Minimum elements per line for compact wrapping to be worthwhile;
    /// below this the array falls through to expanded layout. Default: 3.
    pub min_compact_array_row_items: usize,

    /// Containers at this depth or shallower always expand, never inline;
    /// 0 keeps the root expanded while deeper values may still pack.
    /// -1 disables the rule. Default: -1.
    pub always_expand_depth: isize,

    /// Pad inside brackets of containers holding other containers:
    /// `[ [1, 2] ]` vs `[[1, 2]]`. Default: true.
    pub nested_bracket_padding: bool,

    /// Pad inside brackets of containers holding only scalars:
    /// `[ 1, 2 ]` vs `[1, 2]`. Default: false.
    pub simple_bracket_padding: bool,

    /// Space after object colons. Default: true.
    pub colon_padding: bool,

    /// Space after commas. Default: true.
    pub comma_padding: bool,

    /// Space between a value and an attached comment. Default: true.
    pub comment_padding: bool,

    /// Number justification in table columns.
    /// Default: [`NumberAlignment::Normalize`].
    pub number_alignment: NumberAlignment,

    /// Comma position in table cells.
    /// Default: [`CommaPlacement::BeforePaddingExceptNumbers`].
    pub table_comma_placement: CommaPlacement,

    /// In table name cells, put the colon right after the name and pad
    /// afterwards (`"a":   1`) instead of padding the name first
    /// (`"a"  : 1`). Default: false.
    pub colon_before_prop_name_padding: bool,

    /// Spaces per indent level, ignored when `use_tab_to_indent`.
    /// Default: 4.
    pub indent_spaces: usize,

    /// Indent with one tab per level instead of spaces. Default: false.
    pub use_tab_to_indent: bool,

    /// Text prepended to every output line, for embedding formatted JSON
    /// inside other documents. Counts against the width budget.
    /// Default: empty.
    pub prefix_string: String,

    /// Comment handling. Default: [`CommentPolicy::TreatAsError`].
    pub comment_policy: CommentPolicy,

    /// Keep blank lines from the input. A preserved blank line forces its
    /// container into expanded layout. Default: false.
    pub preserve_blank_lines: bool,

    /// Accept trailing commas in the input. Default: false.
    pub allow_trailing_commas: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            max_total_line_length: 120,
            max_inline_complexity: 2,
            max_compact_array_complexity: 2,
            max_table_row_complexity: 2,
            min_compact_array_row_items: 3,
            always_expand_depth: -1,
            nested_bracket_padding: true,
            simple_bracket_padding: false,
            colon_padding: true,
            comma_padding: true,
            comment_padding: true,
            number_alignment: NumberAlignment::Normalize,
            table_comma_placement: CommaPlacement::BeforePaddingExceptNumbers,
            colon_before_prop_name_padding: false,
            indent_spaces: 4,
            use_tab_to_indent: false,
            prefix_string: String::new(),
            comment_policy: CommentPolicy::TreatAsError,
            preserve_blank_lines: false,
            allow_trailing_commas: false,
        }
    }
}
