//! # GridJson
//!
//! A JSON formatter that produces human-readable output with smart line
//! breaks, table-like alignment of repeated structures, and optional
//! comment support.
//!
//! GridJson packs values onto as few lines as possible without exceeding a
//! configured width:
//!
//! - Arrays and objects are written on single lines when they're short and simple enough
//! - When sibling elements share a structure, their fields are aligned like a table,
//!   with numbers justified to a common precision
//! - Long arrays of simple values are written with multiple items per line
//! - Comments and blank lines (non-standard JSON) can be preserved if enabled
//!
//! ## Command-Line Tool
//!
//! This crate includes the `gridjson` CLI tool for formatting JSON from the
//! terminal:
//!
//! ```sh
//! # Install
//! cargo install gridjson
//!
//! # Format JSON from stdin
//! echo '{"a":1,"b":2}' | gridjson
//!
//! # Format a file
//! gridjson input.json -o output.json
//!
//! # Minify
//! gridjson --compact < input.json
//! ```
//!
//! Run `gridjson --help` for all options.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridjson::Formatter;
//!
//! let input = r#"{"name":"Alice","scores":[95,87,92],"active":true}"#;
//!
//! let formatter = Formatter::new();
//! let output = formatter.reformat(input, 0).unwrap();
//!
//! println!("{}", output);
//! ```
//!
//! ## Serializing Rust Types
//!
//! Any type implementing [`serde::Serialize`] can be formatted directly:
//!
//! ```rust
//! use gridjson::Formatter;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Player {
//!     name: String,
//!     scores: Vec<i32>,
//! }
//!
//! let player = Player {
//!     name: "Alice".into(),
//!     scores: vec![95, 87, 92],
//! };
//!
//! let formatter = Formatter::new();
//! let output = formatter.serialize(&player, 0, 100).unwrap();
//! ```
//!
//! ## Configuration
//!
//! Customize formatting behavior through [`FormatOptions`]:
//!
//! ```rust
//! use gridjson::{Formatter, LineEnding, NumberAlignment};
//!
//! let mut formatter = Formatter::new();
//! formatter.options.max_total_line_length = 80;
//! formatter.options.indent_spaces = 2;
//! formatter.options.line_ending = LineEnding::Lf;
//! formatter.options.number_alignment = NumberAlignment::Decimal;
//!
//! let output = formatter.reformat(r#"{"values":[1,2,3]}"#, 0).unwrap();
//! ```
//!
//! ## Comment Support
//!
//! GridJson can handle JSON with comments (non-standard) when enabled:
//!
//! ```rust
//! use gridjson::{Formatter, CommentPolicy};
//!
//! let input = r#"{
//!     // This is a comment
//!     "name": "Alice"
//! }"#;
//!
//! let mut formatter = Formatter::new();
//! formatter.options.comment_policy = CommentPolicy::Preserve;
//!
//! let output = formatter.reformat(input, 0).unwrap();
//! ```
//!
//! ## Example Output
//!
//! Given appropriate input, GridJson produces output like:
//!
//! ```json
//! {
//!     "SimilarObjects": [
//!         {"type": "turret",    "hp": 400, "loc": {"x": 47, "y": -4}},
//!         {"type": "assassin",  "hp":  80, "loc": {"x": 12, "y":  6}},
//!         {"type": "berserker", "hp": 150, "loc": {"x":  0, "y":  0}}
//!     ]
//! }
//! ```
//!
//! Notice how:
//! - Similar objects are aligned in a table format
//! - Numbers are right-aligned within their columns
//! - The structure remains compact while being highly readable

mod convert;
mod dom;
mod error;
mod formatter;
mod lexer;
mod options;
mod parser;
mod table;
mod writer;

pub use crate::dom::Position;
pub use crate::error::GridJsonError;
pub use crate::formatter::Formatter;
pub use crate::options::{
    CommaPlacement, CommentPolicy, FormatOptions, LineEnding, NumberAlignment,
};
