use std::collections::HashSet;

use crate::dom::{JsonNode, NodeKind};
use crate::options::NumberAlignment;
use crate::writer::{BracketPad, LineBuffer, PadSet};

/// What every row holds at one column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    /// Nothing measured yet, or only nulls so far.
    Unknown,
    /// Strings and booleans, or structures demoted to plain text.
    Scalar,
    Number,
    Array,
    Object,
    /// Incompatible kinds; the column renders values at natural width.
    Mixed,
}

/// Measured layout of one table column, possibly with sub-columns.
///
/// A template is built by measuring every row of a prospective table, then
/// repeatedly pruned from the deepest level up until the whole table fits
/// the width budget (or alignment is abandoned entirely).
#[derive(Debug, Clone)]
pub(crate) struct ColumnTemplate {
    /// Property key this column matches in object rows; `None` for the
    /// root template and for positional (array) columns.
    pub key: Option<String>,
    pub kind: ColumnKind,
    pub row_count: usize,
    pub name_w: usize,
    pub value_w: usize,
    pub prefix_w: usize,
    pub middle_w: usize,
    pub postfix_w: usize,
    pub pad_type: BracketPad,
    pub needs_own_lines: bool,
    /// Width of the value area: aligned digits for number columns, nested
    /// sub-columns plus brackets for structural ones, else `value_w`.
    pub composite_w: usize,
    /// Full cell width: prefix + name + middle + value + postfix.
    pub total_w: usize,
    pub contains_null: bool,
    pub children: Vec<ColumnTemplate>,
    alignment: NumberAlignment,
    int_digits: usize,
    frac_digits: usize,
}

impl ColumnTemplate {
    pub fn new(alignment: NumberAlignment) -> Self {
        Self {
            key: None,
            kind: ColumnKind::Unknown,
            row_count: 0,
            name_w: 0,
            value_w: 0,
            prefix_w: 0,
            middle_w: 0,
            postfix_w: 0,
            pad_type: BracketPad::Simple,
            needs_own_lines: false,
            composite_w: 0,
            total_w: 0,
            contains_null: false,
            children: Vec::new(),
            alignment,
            int_digits: 0,
            frac_digits: 0,
        }
    }

    /// Measures every row of a prospective table and computes widths with
    /// full sub-column alignment. Comments and blank lines among the rows
    /// are ignored here; the caller decides whether they rule a table out.
    pub fn measure_rows(&mut self, rows: &[JsonNode], pads: &PadSet) {
        for row in rows {
            self.measure_segment(row, pads);
        }
        self.prune_and_recompute(usize::MAX, pads);
    }

    /// Shrinks the template until it fits `budget`, dropping the deepest
    /// level of sub-column alignment each attempt. False means even the
    /// flattest alignment is too wide.
    pub fn try_to_fit(&mut self, budget: usize, pads: &PadSet) -> bool {
        let mut depth = self.depth();
        loop {
            if self.total_w <= budget {
                return true;
            }
            if depth == 0 {
                return false;
            }
            depth -= 1;
            self.prune_and_recompute(depth, pads);
        }
    }

    /// Writes one number (or null) cell, justified per the column's
    /// alignment. `comma` is embedded where the alignment dictates: right
    /// after the digits for left-justified columns, after the padding for
    /// right-justified ones.
    pub fn write_number(&self, buf: &mut LineBuffer<'_>, node: &JsonNode, comma: &str) {
        match self.alignment {
            NumberAlignment::Left => {
                buf.add(&node.text)
                    .add(comma)
                    .spaces(self.value_w.saturating_sub(node.text_width));
                return;
            }
            NumberAlignment::Right => {
                buf.spaces(self.value_w.saturating_sub(node.text_width))
                    .add(&node.text)
                    .add(comma);
                return;
            }
            _ => {}
        }

        if node.kind == NodeKind::Null {
            buf.spaces(self.int_digits.saturating_sub(node.text_width))
                .add(&node.text)
                .add(comma)
                .spaces(self.composite_w.saturating_sub(self.int_digits));
            return;
        }

        if self.alignment == NumberAlignment::Normalize {
            let parsed: f64 = node.text.parse().unwrap_or(f64::NAN);
            let rendered = format!("{:.*}", self.frac_digits, parsed);
            buf.spaces(self.composite_w.saturating_sub(rendered.len()))
                .add(&rendered)
                .add(comma);
            return;
        }

        // Decimal: pad the original literal so the dots line up.
        let (left_pad, right_pad) = match dot_or_exp_index(&node.text) {
            Some(dot) => {
                let left = self.int_digits.saturating_sub(dot);
                let right = self
                    .composite_w
                    .saturating_sub(left + node.text_width);
                (left, right)
            }
            None => {
                let left = self.int_digits.saturating_sub(node.text_width);
                let right = self.composite_w.saturating_sub(self.int_digits);
                (left, right)
            }
        };
        buf.spaces(left_pad).add(&node.text).add(comma).spaces(right_pad);
    }

    fn measure_segment(&mut self, row: &JsonNode, pads: &PadSet) {
        if row.is_decoration() {
            return;
        }

        let row_kind = match row.kind {
            NodeKind::Null => ColumnKind::Unknown,
            NodeKind::Number => ColumnKind::Number,
            NodeKind::Array => ColumnKind::Array,
            NodeKind::Object => ColumnKind::Object,
            _ => ColumnKind::Scalar,
        };
        if self.kind == ColumnKind::Unknown {
            self.kind = row_kind;
        } else if row_kind != ColumnKind::Unknown && self.kind != row_kind {
            self.kind = ColumnKind::Mixed;
        }

        if row.kind == NodeKind::Null {
            self.int_digits = self.int_digits.max(pads.null_w);
            self.contains_null = true;
        }

        if row.needs_own_lines {
            self.needs_own_lines = true;
            self.kind = ColumnKind::Mixed;
        }

        self.row_count += 1;
        self.name_w = self.name_w.max(row.name_width);
        self.value_w = self.value_w.max(row.text_width);
        self.prefix_w = self.prefix_w.max(row.prefix_width);
        self.middle_w = self.middle_w.max(row.middle_width);
        self.postfix_w = self.postfix_w.max(row.postfix_width);

        if row.complexity >= 2 {
            self.pad_type = BracketPad::Complex;
        }

        if self.needs_own_lines || row.kind == NodeKind::Null {
            return;
        }

        // A container holding standalone comments or blanks can't split
        // into sub-columns without dropping them; its cells render inline.
        if row.is_container() && row.children.iter().any(JsonNode::is_decoration) {
            self.kind = ColumnKind::Scalar;
            return;
        }

        if self.kind == ColumnKind::Array {
            for (i, child) in row.children.iter().enumerate() {
                if self.children.len() <= i {
                    self.children.push(ColumnTemplate::new(self.alignment));
                }
                self.children[i].measure_segment(child, pads);
            }
        } else if self.kind == ColumnKind::Object {
            if contains_duplicate_keys(&row.children) {
                self.kind = ColumnKind::Scalar;
                return;
            }
            for row_child in &row.children {
                let found = self
                    .children
                    .iter_mut()
                    .find(|col| col.key.as_deref() == Some(row_child.name.as_str()));
                match found {
                    Some(column) => column.measure_segment(row_child, pads),
                    None => {
                        let mut column = ColumnTemplate::new(self.alignment);
                        column.key = Some(row_child.name.clone());
                        column.measure_segment(row_child, pads);
                        self.children.push(column);
                    }
                }
            }
        }

        let skip_digits = self.kind != ColumnKind::Number
            || matches!(self.alignment, NumberAlignment::Left | NumberAlignment::Right);
        if skip_digits {
            return;
        }

        if self.alignment == NumberAlignment::Normalize {
            let parsed: f64 = row.text.parse().unwrap_or(f64::NAN);
            let can_normalize = parsed.is_finite()
                && !row.text.contains(['e', 'E'])
                && row.text.len() <= 16
                && (parsed != 0.0 || is_truly_zero(&row.text));
            if !can_normalize {
                // Exotic literals are left as written; the whole column
                // gives up digit rewriting rather than change one value.
                self.alignment = NumberAlignment::Left;
                return;
            }
        }

        let dot = dot_or_exp_index(&row.text);
        let before = dot.unwrap_or(row.text.len());
        let after = match dot {
            Some(idx) => row.text.len().saturating_sub(idx + 1),
            None => 0,
        };
        self.int_digits = self.int_digits.max(before);
        self.frac_digits = self.frac_digits.max(after);
    }

    fn prune_and_recompute(&mut self, allowed_depth: usize, pads: &PadSet) {
        let clear = allowed_depth == 0
            || !matches!(self.kind, ColumnKind::Array | ColumnKind::Object)
            || self.row_count < 2;
        if clear {
            self.children.clear();
        }
        for child in &mut self.children {
            child.prune_and_recompute(allowed_depth.saturating_sub(1), pads);
        }

        if self.kind == ColumnKind::Number {
            self.composite_w = self.number_field_width();
        } else if !self.children.is_empty() {
            let bracket = if self.kind == ColumnKind::Object {
                NodeKind::Object
            } else {
                NodeKind::Array
            };
            let child_total: usize = self.children.iter().map(|c| c.total_w).sum();
            self.composite_w = child_total
                + pads.comma_w * (self.children.len() - 1)
                + pads.open_w(bracket, self.pad_type)
                + pads.close_w(bracket, self.pad_type);
            // A null row must still fit in the cell.
            if self.contains_null && self.composite_w < pads.null_w {
                self.composite_w = pads.null_w;
            }
        } else {
            self.composite_w = self.value_w;
        }

        self.total_w = opt_w(self.prefix_w, pads.cpad_w)
            + opt_w(self.name_w, pads.colon_w)
            + opt_w(self.middle_w, pads.cpad_w)
            + self.composite_w
            + opt_w(self.postfix_w, pads.cpad_w);
    }

    fn depth(&self) -> usize {
        match self.children.iter().map(ColumnTemplate::depth).max() {
            Some(deepest) => 1 + deepest,
            None => 0,
        }
    }

    fn number_field_width(&self) -> usize {
        match self.alignment {
            NumberAlignment::Normalize | NumberAlignment::Decimal => {
                let dot_w = if self.frac_digits > 0 { 1 } else { 0 };
                self.int_digits + dot_w + self.frac_digits
            }
            _ => self.value_w,
        }
    }
}

fn opt_w(field_w: usize, separator_w: usize) -> usize {
    if field_w > 0 { field_w + separator_w } else { 0 }
}

fn dot_or_exp_index(value: &str) -> Option<usize> {
    value.find(['.', 'e', 'E'])
}

/// True when the literal is a spelled-out zero like `0.000` or `-0`,
/// as opposed to a tiny value that merely rounds to zero.
fn is_truly_zero(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let mut saw_any = false;
    for ch in digits.chars() {
        if ch == 'e' || ch == 'E' {
            return saw_any;
        }
        if ch != '0' && ch != '.' {
            return false;
        }
        saw_any = true;
    }
    saw_any
}

fn contains_duplicate_keys(children: &[JsonNode]) -> bool {
    let mut seen = HashSet::new();
    children
        .iter()
        .filter(|ch| !ch.is_decoration())
        .any(|ch| !seen.insert(ch.name.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FormatOptions;
    use crate::writer::StringSink;

    fn width(s: &str) -> usize {
        s.chars().count()
    }

    fn number(text: &str) -> JsonNode {
        JsonNode {
            kind: NodeKind::Number,
            text: text.to_string(),
            text_width: width(text),
            ..JsonNode::default()
        }
    }

    fn null() -> JsonNode {
        JsonNode {
            kind: NodeKind::Null,
            text: "null".to_string(),
            text_width: 4,
            ..JsonNode::default()
        }
    }

    fn pads() -> PadSet {
        PadSet::new(&FormatOptions::default(), &|s| s.chars().count())
    }

    fn render_cells(template: &ColumnTemplate, rows: &[JsonNode]) -> Vec<String> {
        rows.iter()
            .map(|row| {
                let mut sink = StringSink::default();
                {
                    let mut buf = LineBuffer::new(&mut sink);
                    template.write_number(&mut buf, row, "");
                    buf.add("|");
                    buf.finish().unwrap();
                }
                sink.into_string()
            })
            .collect()
    }

    #[test]
    fn normalize_pads_to_the_widest_source_precision() {
        let rows = vec![number("2.5"), number("3"), number("0.25")];
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&rows, &pads);

        assert_eq!(template.kind, ColumnKind::Number);
        assert_eq!(template.composite_w, 4); // d.dd
        assert_eq!(
            render_cells(&template, &rows),
            vec!["2.50|", "3.00|", "0.25|"]
        );
    }

    #[test]
    fn integer_only_columns_stay_integers() {
        let rows = vec![number("7"), number("1234")];
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&rows, &pads);
        assert_eq!(render_cells(&template, &rows), vec!["   7|", "1234|"]);
    }

    #[test]
    fn null_widens_a_number_column_and_left_aligns_in_it() {
        let rows = vec![number("1.5"), null()];
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&rows, &pads);

        assert_eq!(template.composite_w, 6); // "null" forces 4 integer digits
        assert_eq!(render_cells(&template, &rows), vec!["   1.5|", "null  |"]);
    }

    #[test]
    fn exponents_demote_normalization_to_left_justified_literals() {
        let rows = vec![number("1e3"), number("22.5")];
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&rows, &pads);
        assert_eq!(render_cells(&template, &rows), vec!["1e3 |", "22.5|"]);
    }

    #[test]
    fn tiny_values_that_round_to_zero_are_not_rewritten() {
        let rows = vec![number("1e-300"), number("2.0")];
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&rows, &pads);
        // 1e-300 parses fine but has an exponent, so the column demotes.
        assert_eq!(render_cells(&template, &rows)[0], "1e-300|");
    }

    #[test]
    fn decimal_alignment_lines_up_dots_without_rewriting() {
        let rows = vec![number("12.5"), number("3.25"), number("700")];
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Decimal);
        template.measure_rows(&rows, &pads);
        assert_eq!(
            render_cells(&template, &rows),
            vec![" 12.5 |", "  3.25|", "700   |"]
        );
    }

    #[test]
    fn object_rows_with_duplicate_keys_lose_sub_columns() {
        let prop = |name: &str, value: JsonNode| JsonNode {
            name: name.to_string(),
            name_width: width(name),
            ..value
        };
        let row = JsonNode {
            kind: NodeKind::Object,
            children: vec![prop("\"a\"", number("1")), prop("\"a\"", number("2"))],
            ..JsonNode::default()
        };
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&[row], &pads);
        assert_eq!(template.kind, ColumnKind::Scalar);
        assert!(template.children.is_empty());
    }

    #[test]
    fn rows_with_standalone_comments_lose_sub_columns() {
        let mut row = JsonNode {
            kind: NodeKind::Array,
            children: vec![
                JsonNode {
                    kind: NodeKind::BlockComment,
                    text: "/*a*/".to_string(),
                    text_width: 5,
                    ..JsonNode::default()
                },
                number("1"),
                number("2"),
            ],
            ..JsonNode::default()
        };
        row.annotate_complexity();
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&[row], &pads);
        // The cell renders inline, comment included, instead of splitting
        // into positional columns that have no place for it.
        assert_eq!(template.kind, ColumnKind::Scalar);
        assert!(template.children.is_empty());
    }

    #[test]
    fn fitting_drops_the_deepest_alignment_level_first() {
        let obj = |x: &str, text: &str| {
            let mut node = JsonNode {
                kind: NodeKind::Object,
                children: vec![JsonNode {
                    kind: NodeKind::String,
                    name: x.to_string(),
                    name_width: width(x),
                    text: text.to_string(),
                    text_width: width(text),
                    ..JsonNode::default()
                }],
                ..JsonNode::default()
            };
            node.annotate_complexity();
            node
        };
        let rows = vec![obj("\"k\"", "\"aaaaaaaa\""), obj("\"k\"", "\"b\"")];
        let pads = pads();
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&rows, &pads);
        assert_eq!(template.children.len(), 1);
        let aligned = template.total_w;

        assert!(template.try_to_fit(aligned, &pads));
        assert!(!template.children.is_empty());

        // Too narrow for sub-columns: alignment is abandoned level by
        // level until nothing aligned remains.
        let mut template = ColumnTemplate::new(NumberAlignment::Normalize);
        template.measure_rows(&rows, &pads);
        assert!(template.try_to_fit(3, &pads));
        assert!(template.children.is_empty());
    }
}
