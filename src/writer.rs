use std::io::{self, Write};

use crate::dom::NodeKind;
use crate::options::{FormatOptions, LineEnding};

/// Destination for completed output lines.
///
/// The layout engine never writes to a sink directly; it goes through a
/// [`LineBuffer`], which hands over one whole line at a time with the line
/// terminator already appended. Errors from a sink abort the whole format
/// operation.
pub trait LineSink {
    fn push_line(&mut self, line: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Collects output into an owned `String`. Never fails.
#[derive(Debug, Default)]
pub struct StringSink {
    text: String,
}

impl StringSink {
    pub fn into_string(self) -> String {
        self.text
    }
}

impl LineSink for StringSink {
    fn push_line(&mut self, line: &str) -> io::Result<()> {
        self.text.push_str(line);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Forwards completed lines to any [`io::Write`], e.g. a file or socket.
pub struct WriteSink<W: Write> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> LineSink for WriteSink<W> {
    fn push_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_all(line.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Accumulates one output line at a time in a single reused buffer.
///
/// On line completion, trailing spaces and tabs are trimmed (mid-line
/// whitespace is untouched) and the line plus terminator goes to the sink.
/// `finish` completes a partial trailing line so no content is ever lost.
pub(crate) struct LineBuffer<'a> {
    line: String,
    sink: &'a mut dyn LineSink,
}

impl<'a> LineBuffer<'a> {
    pub fn new(sink: &'a mut dyn LineSink) -> Self {
        Self { line: String::new(), sink }
    }

    pub fn add(&mut self, text: &str) -> &mut Self {
        self.line.push_str(text);
        self
    }

    pub fn spaces(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.line.push(' ');
        }
        self
    }

    pub fn end_line(&mut self, eol: &str) -> io::Result<()> {
        if self.line.is_empty() && eol.is_empty() {
            return Ok(());
        }
        let kept = self.line.trim_end_matches([' ', '\t']).len();
        self.line.truncate(kept);
        self.line.push_str(eol);
        self.sink.push_line(&self.line)?;
        self.line.clear();
        Ok(())
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.end_line("")?;
        self.sink.flush()
    }
}

/// Bracket padding tier for a container, based on what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BracketPad {
    Empty = 0,
    Simple = 1,
    Complex = 2,
}

/// Every separator and bracket string the current options imply, with
/// widths precomputed once per format operation so the layout engine can
/// do width math without re-measuring constants.
pub(crate) struct PadSet {
    pub comma: String,
    pub comma_w: usize,
    pub colon: String,
    pub colon_w: usize,
    pub cpad: String,
    pub cpad_w: usize,
    pub eol: String,
    pub null_w: usize,
    pub true_w: usize,
    pub false_w: usize,
    pub prefix: String,
    pub prefix_w: usize,
    opens: [[String; 3]; 2],
    closes: [[String; 3]; 2],
    open_ws: [[usize; 3]; 2],
    close_ws: [[usize; 3]; 2],
    indents: Vec<String>,
    pub indent_unit_w: usize,
}

impl PadSet {
    pub fn new(opts: &FormatOptions, width: &dyn Fn(&str) -> usize) -> Self {
        let pad_for = |bracket: &str, padded: bool| {
            if padded { format!("{bracket} ") } else { bracket.to_string() }
        };
        let simple = opts.simple_bracket_padding;
        let nested = opts.nested_bracket_padding;

        let opens = [
            ["{".to_string(), pad_for("{", simple), pad_for("{", nested)],
            ["[".to_string(), pad_for("[", simple), pad_for("[", nested)],
        ];
        let closes = [
            ["}".to_string(), rpad_for("}", simple), rpad_for("}", nested)],
            ["]".to_string(), rpad_for("]", simple), rpad_for("]", nested)],
        ];
        let open_ws = measure_all(&opens, width);
        let close_ws = measure_all(&closes, width);

        let comma = if opts.comma_padding { ", " } else { "," }.to_string();
        let colon = if opts.colon_padding { ": " } else { ":" }.to_string();
        let cpad = if opts.comment_padding { " " } else { "" }.to_string();
        let eol = match opts.line_ending {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
        .to_string();

        let indent_unit = if opts.use_tab_to_indent {
            "\t".to_string()
        } else {
            " ".repeat(opts.indent_spaces)
        };
        let indent_unit_w = width(&indent_unit);

        Self {
            comma_w: width(&comma),
            colon_w: width(&colon),
            cpad_w: width(&cpad),
            null_w: width("null"),
            true_w: width("true"),
            false_w: width("false"),
            prefix_w: width(&opts.prefix_string),
            prefix: opts.prefix_string.clone(),
            comma,
            colon,
            cpad,
            eol,
            opens,
            closes,
            open_ws,
            close_ws,
            indents: vec![String::new(), indent_unit],
            indent_unit_w,
        }
    }

    pub fn open(&self, kind: NodeKind, pad: BracketPad) -> &str {
        &self.opens[(kind == NodeKind::Array) as usize][pad as usize]
    }

    pub fn close(&self, kind: NodeKind, pad: BracketPad) -> &str {
        &self.closes[(kind == NodeKind::Array) as usize][pad as usize]
    }

    pub fn open_w(&self, kind: NodeKind, pad: BracketPad) -> usize {
        self.open_ws[(kind == NodeKind::Array) as usize][pad as usize]
    }

    pub fn close_w(&self, kind: NodeKind, pad: BracketPad) -> usize {
        self.close_ws[(kind == NodeKind::Array) as usize][pad as usize]
    }

    pub fn indent(&mut self, level: usize) -> &str {
        while self.indents.len() <= level {
            let next = format!("{}{}", self.indents[self.indents.len() - 1], self.indents[1]);
            self.indents.push(next);
        }
        &self.indents[level]
    }
}

fn rpad_for(bracket: &str, padded: bool) -> String {
    if padded { format!(" {bracket}") } else { bracket.to_string() }
}

fn measure_all(set: &[[String; 3]; 2], width: &dyn Fn(&str) -> usize) -> [[usize; 3]; 2] {
    let mut out = [[0usize; 3]; 2];
    for (i, row) in set.iter().enumerate() {
        for (j, s) in row.iter().enumerate() {
            out[i][j] = width(s);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_spaces_and_tabs_are_trimmed_on_line_end() {
        let mut sink = StringSink::default();
        let mut buf = LineBuffer::new(&mut sink);
        buf.add("x, \t").add("  ");
        buf.end_line("\n").unwrap();
        assert_eq!(sink.into_string(), "x,\n");
    }

    #[test]
    fn mid_line_whitespace_survives() {
        let mut sink = StringSink::default();
        let mut buf = LineBuffer::new(&mut sink);
        buf.add("a  b");
        buf.end_line("\n").unwrap();
        assert_eq!(sink.into_string(), "a  b\n");
    }

    #[test]
    fn finish_completes_a_partial_line() {
        let mut sink = StringSink::default();
        let mut buf = LineBuffer::new(&mut sink);
        buf.add("tail");
        buf.finish().unwrap();
        assert_eq!(sink.into_string(), "tail");
    }

    #[test]
    fn empty_line_with_terminator_is_emitted() {
        let mut sink = StringSink::default();
        let mut buf = LineBuffer::new(&mut sink);
        buf.end_line("\n").unwrap();
        buf.finish().unwrap();
        assert_eq!(sink.into_string(), "\n");
    }

    #[test]
    fn write_sink_forwards_lines() {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut sink = WriteSink::new(&mut out);
            let mut buf = LineBuffer::new(&mut sink);
            buf.add("[]");
            buf.end_line("\n").unwrap();
            buf.finish().unwrap();
        }
        assert_eq!(out, b"[]\n");
    }

    #[test]
    fn indent_cache_grows_on_demand() {
        let opts = FormatOptions::default();
        let width = |s: &str| s.chars().count();
        let mut pads = PadSet::new(&opts, &width);
        assert_eq!(pads.indent(3), "            ");
        assert_eq!(pads.indent(1), "    ");
    }
}
