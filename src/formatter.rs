use std::io;

use crate::convert::value_to_node;
use crate::dom::{JsonNode, NodeKind};
use crate::error::GridJsonError;
use crate::options::{CommaPlacement, FormatOptions};
use crate::parser::Parser;
use crate::table::{ColumnKind, ColumnTemplate};
use crate::writer::{BracketPad, LineBuffer, LineSink, PadSet, StringSink, WriteSink};

/// The formatter. Holds the options plus an optional custom string-width
/// measure, and runs one complete format operation per call.
///
/// ```rust
/// use gridjson::Formatter;
///
/// let mut formatter = Formatter::new();
/// formatter.options.max_total_line_length = 80;
/// let output = formatter.reformat(r#"{"a":[1,2],"b":[3,4]}"#, 0).unwrap();
/// assert_eq!(output, "{ \"a\": [1, 2], \"b\": [3, 4] }\n");
/// ```
pub struct Formatter {
    pub options: FormatOptions,
    string_width: Box<dyn Fn(&str) -> usize>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            options: FormatOptions::default(),
            string_width: Box::new(|s| s.chars().count()),
        }
    }

    /// Replaces the function used to measure the on-screen width of text.
    /// The default counts chars; pass something smarter (e.g. based on
    /// Unicode width tables) when the output is viewed in a terminal with
    /// wide CJK glyphs.
    pub fn set_string_width(&mut self, width: impl Fn(&str) -> usize + 'static) {
        self.string_width = Box::new(width);
    }

    /// Reformats JSON(-with-comments) text. `starting_depth` shifts the
    /// whole output right by that many indent levels, for splicing into an
    /// enclosing document.
    pub fn reformat(&self, input: &str, starting_depth: usize) -> Result<String, GridJsonError> {
        let mut sink = StringSink::default();
        self.run(input, starting_depth, &mut sink)?;
        Ok(sink.into_string())
    }

    /// Like [`reformat`](Self::reformat), but streams lines straight to a
    /// writer instead of building a `String`.
    pub fn reformat_to<W: io::Write>(
        &self,
        input: &str,
        starting_depth: usize,
        out: W,
    ) -> Result<(), GridJsonError> {
        let mut sink = WriteSink::new(out);
        self.run(input, starting_depth, &mut sink)
    }

    /// Rewrites the input with all inter-token whitespace removed.
    /// Comments and blank lines are dropped, whatever the policy says
    /// about preserving them.
    pub fn minify(&self, input: &str) -> Result<String, GridJsonError> {
        let nodes = Parser::new(&self.options).parse_top_level(input, true)?;
        let mut out = String::new();
        for node in &nodes {
            if !node.is_decoration() {
                minify_node(node, &mut out);
            }
        }
        Ok(out)
    }

    /// Formats an already-parsed [`serde_json::Value`].
    pub fn format_value(
        &self,
        value: &serde_json::Value,
        starting_depth: usize,
    ) -> Result<String, GridJsonError> {
        let node = value_to_node(value, None, usize::MAX)?;
        self.format_nodes(vec![node], starting_depth)
    }

    /// Serializes any [`serde::Serialize`] type and formats the result.
    /// `recursion_limit` bounds nesting depth to catch cyclic structures.
    pub fn serialize<T: serde::Serialize>(
        &self,
        value: &T,
        starting_depth: usize,
        recursion_limit: usize,
    ) -> Result<String, GridJsonError> {
        let json = serde_json::to_value(value)
            .map_err(|e| GridJsonError::Malformed(e.to_string()))?;
        let node = value_to_node(&json, None, recursion_limit)?;
        self.format_nodes(vec![node], starting_depth)
    }

    fn run(
        &self,
        input: &str,
        starting_depth: usize,
        sink: &mut dyn LineSink,
    ) -> Result<(), GridJsonError> {
        let nodes = Parser::new(&self.options).parse_top_level(input, true)?;
        self.write_nodes(nodes, starting_depth, sink)
    }

    fn format_nodes(
        &self,
        nodes: Vec<JsonNode>,
        starting_depth: usize,
    ) -> Result<String, GridJsonError> {
        let mut sink = StringSink::default();
        self.write_nodes(nodes, starting_depth, &mut sink)?;
        Ok(sink.into_string())
    }

    fn write_nodes(
        &self,
        mut nodes: Vec<JsonNode>,
        depth: usize,
        sink: &mut dyn LineSink,
    ) -> Result<(), GridJsonError> {
        let width: &dyn Fn(&str) -> usize = &*self.string_width;
        let mut engine = Engine {
            opts: &self.options,
            width,
            pads: PadSet::new(&self.options, width),
            buf: LineBuffer::new(sink),
        };
        for node in &mut nodes {
            node.annotate_complexity();
            engine.measure(node);
        }
        for node in &nodes {
            engine.write_item(node, depth, false)?;
        }
        engine.buf.finish()?;
        Ok(())
    }
}

/// Per-operation layout state: the option-derived pad strings and the
/// line accumulator. The document tree itself is read-only from here on.
struct Engine<'a> {
    opts: &'a FormatOptions,
    width: &'a dyn Fn(&str) -> usize,
    pads: PadSet,
    buf: LineBuffer<'a>,
}

impl<'a> Engine<'a> {
    /// Measures every node bottom-up: attachment widths, the width the
    /// node would occupy rendered inline, and whether anything in the
    /// subtree rules single-line rendering out.
    fn measure(&self, node: &mut JsonNode) {
        for child in &mut node.children {
            self.measure(child);
        }
        let width = self.width;
        node.name_width = width(&node.name);
        node.prefix_width = width(&node.prefix_comment);
        node.middle_width = width(&node.middle_comment);
        node.postfix_width = width(&node.postfix_comment);
        node.text_width = if node.is_container() {
            self.inline_value_width(node)
        } else {
            width(&node.text)
        };
        node.needs_own_lines = forces_own_lines(node);

        let mut total = node.text_width;
        if node.prefix_width > 0 {
            total += node.prefix_width + self.pads.cpad_w;
        }
        if !node.name.is_empty() {
            total += node.name_width + self.pads.colon_w;
        }
        if node.middle_width > 0 {
            total += node.middle_width + self.pads.cpad_w;
        }
        if node.postfix_width > 0 {
            total += self.pads.cpad_w + node.postfix_width;
        }
        node.min_width = total;
    }

    /// Width of a container's value part rendered inline: brackets,
    /// children, separators. Mirrors `write_inline_value` exactly.
    fn inline_value_width(&self, node: &JsonNode) -> usize {
        let pad = bracket_pad(node);
        let mut total = self.pads.open_w(node.kind, pad) + self.pads.close_w(node.kind, pad);
        let count = node.children.len();
        let mut remaining_values = value_count(node);
        for (i, child) in node.children.iter().enumerate() {
            total += child.min_width;
            if child.is_comment() {
                if i + 1 < count {
                    total += self.pads.cpad_w;
                }
            } else {
                remaining_values -= 1;
                if remaining_values > 0 {
                    total += self.pads.comma_w;
                } else if i + 1 < count {
                    total += self.pads.cpad_w;
                }
            }
        }
        total
    }

    fn available(&self, depth: usize) -> usize {
        self.opts
            .max_total_line_length
            .saturating_sub(self.pads.prefix_w + self.pads.indent_unit_w * depth)
    }

    fn begin_line(&mut self, depth: usize) {
        let Engine { pads, buf, .. } = self;
        buf.add(&pads.prefix);
        buf.add(pads.indent(depth));
    }

    fn end_line(&mut self) -> io::Result<()> {
        let Engine { pads, buf, .. } = self;
        buf.end_line(&pads.eol)
    }

    /// Renders one child (or a top-level element). `comma` says whether
    /// another element follows in the parent.
    fn write_item(&mut self, node: &JsonNode, depth: usize, comma: bool) -> io::Result<()> {
        match node.kind {
            NodeKind::BlankLine => self.write_blank(),
            NodeKind::LineComment | NodeKind::BlockComment => {
                self.write_standalone_comment(node, depth)
            }
            _ if node.middle_break => self.write_split_property(node, depth, comma),
            NodeKind::Object | NodeKind::Array => self.write_container(node, depth, comma),
            _ => self.write_single_line(node, depth, comma),
        }
    }

    /// The tier ladder: inline, table, compact, expanded.
    fn write_container(&mut self, node: &JsonNode, depth: usize, comma: bool) -> io::Result<()> {
        // Empty containers are always [] / {} regardless of settings.
        if node.children.is_empty() {
            return self.write_single_line(node, depth, comma);
        }
        if self.opts.always_expand_depth >= 0 && (depth as isize) <= self.opts.always_expand_depth
        {
            return self.write_expanded(node, depth, comma);
        }

        let inline_ok = self.opts.max_inline_complexity >= node.complexity as isize
            && !node.needs_own_lines
            && node.min_width + usize::from(comma) <= self.available(depth);
        if inline_ok {
            return self.write_single_line(node, depth, comma);
        }

        if let Some(template) = self.plan_table(node, depth) {
            return self.write_table(node, &template, depth, comma);
        }

        if self.plan_compact(node, depth) {
            return self.write_compact(node, depth, comma);
        }

        self.write_expanded(node, depth, comma)
    }

    fn write_blank(&mut self) -> io::Result<()> {
        let Engine { pads, buf, .. } = self;
        buf.add(&pads.prefix);
        buf.end_line(&pads.eol)
    }

    /// A comment that is a child in its own right: one or more full lines
    /// at the current indent. Multi-line block comments are re-indented by
    /// stripping the whitespace they carried at their original column.
    fn write_standalone_comment(&mut self, node: &JsonNode, depth: usize) -> io::Result<()> {
        if !node.text.contains('\n') {
            self.begin_line(depth);
            self.buf.add(&node.text);
            return self.end_line();
        }
        for (i, raw) in node.text.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            self.begin_line(depth);
            if i == 0 {
                self.buf.add(line);
            } else {
                self.buf.add(strip_indent(line, node.pos.column));
            }
            self.end_line()?;
        }
        Ok(())
    }

    /// One element on one line, with everything attached. The caller has
    /// verified the width (or accepts the overflow for an atomic token).
    fn write_single_line(&mut self, node: &JsonNode, depth: usize, comma: bool) -> io::Result<()> {
        self.begin_line(depth);
        self.write_inline_element(node);
        self.finish_element_line(node, comma)
    }

    /// Trailing comma and any line-style postfix comment, then ends the line.
    fn finish_element_line(&mut self, node: &JsonNode, comma: bool) -> io::Result<()> {
        if comma {
            self.buf.add(",");
        }
        if node.postfix_is_line && node.postfix_width > 0 {
            self.buf.add(&self.pads.cpad).add(&node.postfix_comment);
        }
        self.end_line()
    }

    /// prefix, name, middle comment, value, block-style postfix — no comma.
    fn write_inline_element(&mut self, node: &JsonNode) {
        if node.prefix_width > 0 {
            self.buf.add(&node.prefix_comment).add(&self.pads.cpad);
        }
        if !node.name.is_empty() {
            self.buf.add(&node.name).add(&self.pads.colon);
        }
        if node.middle_width > 0 && !node.middle_break {
            self.buf.add(&node.middle_comment).add(&self.pads.cpad);
        }
        if node.is_container() {
            self.write_inline_value(node);
        } else {
            self.buf.add(&node.text);
        }
        if node.postfix_width > 0 && !node.postfix_is_line {
            self.buf.add(&self.pads.cpad).add(&node.postfix_comment);
        }
    }

    fn write_inline_value(&mut self, node: &JsonNode) {
        let pad = bracket_pad(node);
        self.buf.add(self.pads.open(node.kind, pad));
        let count = node.children.len();
        let mut remaining_values = value_count(node);
        for (i, child) in node.children.iter().enumerate() {
            if child.is_comment() {
                self.buf.add(&child.text);
                if i + 1 < count {
                    self.buf.add(&self.pads.cpad);
                }
            } else {
                self.write_inline_element(child);
                remaining_values -= 1;
                if remaining_values > 0 {
                    self.buf.add(&self.pads.comma);
                } else if i + 1 < count {
                    self.buf.add(&self.pads.cpad);
                }
            }
        }
        self.buf.add(self.pads.close(node.kind, pad));
    }

    /// `"key":` on its own line, middle comment line(s) one level deeper,
    /// then the value laid out on its own starting one level deeper.
    fn write_split_property(
        &mut self,
        node: &JsonNode,
        depth: usize,
        comma: bool,
    ) -> io::Result<()> {
        self.begin_line(depth);
        if node.prefix_width > 0 {
            self.buf.add(&node.prefix_comment).add(&self.pads.cpad);
        }
        self.buf.add(&node.name).add(&self.pads.colon);
        self.end_line()?;

        if node.middle_width > 0 {
            for line in node.middle_comment.split('\n') {
                self.begin_line(depth + 1);
                self.buf.add(line);
                self.end_line()?;
            }
        }

        let mut bare = node.clone();
        bare.name.clear();
        bare.name_width = 0;
        bare.prefix_comment.clear();
        bare.prefix_width = 0;
        bare.middle_comment.clear();
        bare.middle_width = 0;
        bare.middle_break = false;
        bare.min_width = bare.text_width
            + if bare.postfix_width > 0 {
                self.pads.cpad_w + bare.postfix_width
            } else {
                0
            };
        bare.needs_own_lines = forces_own_lines(&bare);
        self.write_item(&bare, depth + 1, comma)
    }

    /// Opening line of a multi-line container: attachments plus the bare
    /// bracket, nothing after it.
    fn write_open_line(&mut self, node: &JsonNode, depth: usize) -> io::Result<()> {
        self.begin_line(depth);
        if node.prefix_width > 0 {
            self.buf.add(&node.prefix_comment).add(&self.pads.cpad);
        }
        if !node.name.is_empty() {
            self.buf.add(&node.name).add(&self.pads.colon);
        }
        if node.middle_width > 0 && !node.middle_break {
            self.buf.add(&node.middle_comment).add(&self.pads.cpad);
        }
        self.buf
            .add(if node.kind == NodeKind::Array { "[" } else { "{" });
        self.end_line()
    }

    fn write_close_line(&mut self, node: &JsonNode, depth: usize, comma: bool) -> io::Result<()> {
        self.begin_line(depth);
        self.buf
            .add(if node.kind == NodeKind::Array { "]" } else { "}" });
        if node.postfix_width > 0 && !node.postfix_is_line {
            self.buf.add(&self.pads.cpad).add(&node.postfix_comment);
        }
        self.finish_element_line(node, comma)
    }

    fn write_expanded(&mut self, node: &JsonNode, depth: usize, comma: bool) -> io::Result<()> {
        self.write_open_line(node, depth)?;
        let mut remaining_values = value_count(node);
        for child in &node.children {
            if child.is_decoration() {
                match child.kind {
                    NodeKind::BlankLine => self.write_blank()?,
                    _ => self.write_standalone_comment(child, depth + 1)?,
                }
            } else {
                remaining_values -= 1;
                self.write_item(child, depth + 1, remaining_values > 0)?;
            }
        }
        self.write_close_line(node, depth, comma)
    }

    // ----- compact arrays -----

    /// Compact wrapping applies to arrays of simple elements, and only
    /// when enough of them fit per line to beat expanded layout.
    fn plan_compact(&self, node: &JsonNode, depth: usize) -> bool {
        if node.kind != NodeKind::Array {
            return false;
        }
        let max = self.opts.max_compact_array_complexity;
        if max < 0 {
            return false;
        }
        let simple_enough = node.children.iter().all(|ch| {
            !ch.is_decoration() && !ch.needs_own_lines && (ch.complexity as isize) <= max
        });
        if !simple_enough {
            return false;
        }

        let avail = self.available(depth + 1);
        let mut used = 0usize;
        let mut fits_on_first = 0usize;
        for child in &node.children {
            let w = child.min_width + self.pads.comma_w;
            if fits_on_first > 0 && used + w > avail {
                break;
            }
            used += w;
            fits_on_first += 1;
        }
        fits_on_first >= self.opts.min_compact_array_row_items
    }

    fn write_compact(&mut self, node: &JsonNode, depth: usize, comma: bool) -> io::Result<()> {
        self.write_open_line(node, depth)?;
        let avail = self.available(depth + 1);
        let count = node.children.len();
        let mut used = 0usize;
        let mut line_open = false;
        for (i, child) in node.children.iter().enumerate() {
            let is_last = i + 1 == count;
            let w = child.min_width + if is_last { 0 } else { self.pads.comma_w };
            if line_open && used + w > avail {
                self.end_line()?;
                line_open = false;
            }
            if !line_open {
                self.begin_line(depth + 1);
                line_open = true;
                used = 0;
            }
            self.write_inline_element(child);
            if !is_last {
                self.buf.add(&self.pads.comma);
            }
            used += w;
        }
        if line_open {
            self.end_line()?;
        }
        self.write_close_line(node, depth, comma)
    }

    // ----- tables -----

    /// Decides whether this container can be a table, and if so returns
    /// the fitted column template.
    fn plan_table(&self, node: &JsonNode, depth: usize) -> Option<ColumnTemplate> {
        let max = self.opts.max_table_row_complexity;
        if max < 0 || (node.complexity as isize) > max + 1 {
            return None;
        }
        if node.children.iter().any(|ch| ch.kind == NodeKind::BlankLine) {
            return None;
        }
        let rows: Vec<&JsonNode> = node
            .children
            .iter()
            .filter(|ch| !ch.is_decoration())
            .collect();
        if rows.len() < 2 {
            return None;
        }
        let rows_qualify = rows.iter().all(|row| {
            !row.needs_own_lines
                && (row.complexity as isize) <= max
                && (row.is_container() || row.kind == NodeKind::Null)
        });
        if !rows_qualify {
            return None;
        }

        let mut template = ColumnTemplate::new(self.opts.number_alignment);
        template.measure_rows(&node.children, &self.pads);
        if template.children.is_empty() {
            return None;
        }
        let budget = self.available(depth + 1).saturating_sub(self.pads.comma_w);
        if !template.try_to_fit(budget, &self.pads) || template.children.is_empty() {
            return None;
        }
        Some(template)
    }

    fn write_table(
        &mut self,
        node: &JsonNode,
        template: &ColumnTemplate,
        depth: usize,
        comma: bool,
    ) -> io::Result<()> {
        self.write_open_line(node, depth)?;
        let mut remaining_values = value_count(node);
        for child in &node.children {
            if child.is_comment() {
                self.write_standalone_comment(child, depth + 1)?;
            } else {
                remaining_values -= 1;
                let comma = if remaining_values > 0 {
                    CellComma::EndOfRow
                } else {
                    CellComma::None
                };
                self.begin_line(depth + 1);
                self.write_row_segment(child, template, comma);
                self.end_line()?;
            }
        }
        self.write_close_line(node, depth, comma)
    }

    /// One table cell group: prefix, name, middle, value, postfix, each
    /// padded to the template's width so all rows line up. `comma` embeds
    /// the separator at the spot the comma-placement option dictates.
    fn write_row_segment(&mut self, node: &JsonNode, t: &ColumnTemplate, comma: CellComma) {
        if t.prefix_w > 0 {
            let Engine { pads, buf, .. } = self;
            if node.prefix_width > 0 {
                buf.add(&node.prefix_comment);
            }
            buf.spaces(t.prefix_w - node.prefix_width).add(&pads.cpad);
        }
        if t.name_w > 0 {
            let Engine { pads, buf, opts, .. } = self;
            if opts.colon_before_prop_name_padding {
                buf.add(&node.name)
                    .add(&pads.colon)
                    .spaces(t.name_w - node.name_width);
            } else {
                buf.add(&node.name)
                    .spaces(t.name_w - node.name_width)
                    .add(&pads.colon);
            }
        }
        if t.middle_w > 0 {
            let Engine { pads, buf, .. } = self;
            if node.middle_width > 0 {
                buf.add(&node.middle_comment);
            }
            buf.spaces(t.middle_w - node.middle_width).add(&pads.cpad);
        }

        if t.kind == ColumnKind::Number {
            let Engine { pads, buf, .. } = self;
            t.write_number(buf, node, comma.text(pads));
        } else {
            let written = self.write_cell_value(node, t);
            let Engine { pads, buf, opts, .. } = self;
            let comma_str = comma.text(pads);
            match opts.table_comma_placement {
                CommaPlacement::AfterPadding => {
                    buf.spaces(t.composite_w.saturating_sub(written)).add(comma_str);
                }
                _ => {
                    buf.add(comma_str).spaces(t.composite_w.saturating_sub(written));
                }
            }
        }

        if t.postfix_w > 0 {
            let Engine { pads, buf, .. } = self;
            if node.postfix_width > 0 {
                buf.add(&pads.cpad).add(&node.postfix_comment);
            } else {
                buf.spaces(pads.cpad_w);
            }
            buf.spaces(t.postfix_w - node.postfix_width);
        }
    }

    /// The value area of a cell. Returns the width actually written; the
    /// caller pads out to the column's composite width.
    fn write_cell_value(&mut self, node: &JsonNode, t: &ColumnTemplate) -> usize {
        if t.children.is_empty() || !node.is_container() {
            // Plain text, a pruned structure rendered inline, or a null
            // standing in for a structural row.
            if node.is_container() {
                self.write_inline_value(node);
            } else {
                self.buf.add(&node.text);
            }
            return node.text_width;
        }

        self.buf.add(self.pads.open(node.kind, t.pad_type));
        let slots: Vec<Option<&JsonNode>> = if t.kind == ColumnKind::Array {
            (0..t.children.len()).map(|i| node.children.get(i)).collect()
        } else {
            t.children
                .iter()
                .map(|col| {
                    node.children
                        .iter()
                        .find(|c| Some(c.name.as_str()) == col.key.as_deref())
                })
                .collect()
        };
        let last_present = slots.iter().rposition(Option::is_some);
        for (i, (col, slot)) in t.children.iter().zip(&slots).enumerate() {
            let not_last_col = i + 1 < t.children.len();
            match slot {
                Some(child) => {
                    let more = last_present.map_or(false, |lp| lp > i);
                    let comma = if more {
                        CellComma::BetweenCells
                    } else {
                        CellComma::None
                    };
                    self.write_row_segment(child, col, comma);
                    if not_last_col && !more {
                        self.buf.spaces(self.pads.comma_w);
                    }
                }
                None => {
                    let extra = if not_last_col { self.pads.comma_w } else { 0 };
                    self.buf.spaces(col.total_w + extra);
                }
            }
        }
        self.buf.add(self.pads.close(node.kind, t.pad_type));

        self.pads.open_w(node.kind, t.pad_type)
            + self.pads.close_w(node.kind, t.pad_type)
            + t.children.iter().map(|c| c.total_w).sum::<usize>()
            + self.pads.comma_w * (t.children.len() - 1)
    }
}

/// Where a table cell sits relative to the separator that follows it. A
/// comma at the end of a row is bare (the line ends anyway); one between
/// cells carries the configured padding.
#[derive(Clone, Copy)]
enum CellComma {
    None,
    EndOfRow,
    BetweenCells,
}

impl CellComma {
    fn text(self, pads: &PadSet) -> &str {
        match self {
            CellComma::None => "",
            CellComma::EndOfRow => ",",
            CellComma::BetweenCells => &pads.comma,
        }
    }
}

/// True when the subtree cannot legally share a line with anything else.
fn forces_own_lines(node: &JsonNode) -> bool {
    matches!(node.kind, NodeKind::BlankLine | NodeKind::LineComment)
        || node.middle_break
        || node.text.contains('\n')
        || node.prefix_comment.contains('\n')
        || node.middle_comment.contains('\n')
        || node.postfix_comment.contains('\n')
        || node
            .children
            .iter()
            .any(|ch| ch.needs_own_lines || ch.postfix_is_line)
}

fn bracket_pad(node: &JsonNode) -> BracketPad {
    if node.children.is_empty() {
        BracketPad::Empty
    } else if node.complexity >= 2 {
        BracketPad::Complex
    } else {
        BracketPad::Simple
    }
}

fn value_count(node: &JsonNode) -> usize {
    node.children.iter().filter(|ch| !ch.is_decoration()).count()
}

fn strip_indent(line: &str, limit: usize) -> &str {
    let mut rest = line;
    let mut removed = 0;
    while removed < limit {
        match rest.strip_prefix([' ', '\t']) {
            Some(r) => {
                rest = r;
                removed += 1;
            }
            None => break,
        }
    }
    rest
}

fn minify_node(node: &JsonNode, out: &mut String) {
    if !node.name.is_empty() {
        out.push_str(&node.name);
        out.push(':');
    }
    match node.kind {
        NodeKind::Object | NodeKind::Array => {
            out.push(if node.kind == NodeKind::Array { '[' } else { '{' });
            let mut first = true;
            for child in &node.children {
                if child.is_decoration() {
                    continue;
                }
                if !first {
                    out.push(',');
                }
                first = false;
                minify_node(child, out);
            }
            out.push(if node.kind == NodeKind::Array { ']' } else { '}' });
        }
        _ => out.push_str(&node.text),
    }
}
