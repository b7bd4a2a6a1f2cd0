//! Code generation context and state.
//!
//! The `CodegenContext` holds everything the emitter threads through a
//! compilation: the buffered output lines, indentation, label counters, the
//! break/continue target stacks, the final-node flag, and the linear memory
//! cursor for constant data.

use std::fmt::Write as _;

use quill_ir::{SymbolId, SymbolTable};
use rustc_hash::FxHashMap;

use crate::CodegenOptions;

/// One buffered line of output.
#[derive(Clone, Debug, PartialEq, Eq)]
struct WatLine {
    indent: usize,
    code: String,
    comment: String,
}

/// Code generation context.
///
/// Output is buffered as lines and only turned into text by [`render`], so a
/// failed compilation never produces partial output.
///
/// [`render`]: CodegenContext::render
pub struct CodegenContext<'a> {
    /// Symbols for variable names and types.
    pub symbols: &'a SymbolTable,
    options: CodegenOptions,
    lines: Vec<WatLine>,
    /// Current indentation, in spaces.
    indent: usize,
    /// Is the node being emitted the last one of its function body?
    final_node: bool,
    /// Next free byte of linear memory.
    mem_pos: u32,
    break_labels: Vec<String>,
    continue_labels: Vec<String>,
    /// Last number handed out per label base.
    label_ids: FxHashMap<String, u32>,
}

impl<'a> CodegenContext<'a> {
    pub fn new(symbols: &'a SymbolTable, options: CodegenOptions) -> Self {
        CodegenContext {
            symbols,
            options,
            lines: Vec::with_capacity(256),
            indent: 0,
            final_node: false,
            mem_pos: 0,
            break_labels: Vec::new(),
            continue_labels: Vec::new(),
            label_ids: FxHashMap::default(),
        }
    }

    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Append a line of code at the current indentation.
    pub fn code(&mut self, code: impl Into<String>) -> &mut Self {
        self.lines.push(WatLine {
            indent: self.indent,
            code: code.into(),
            comment: String::new(),
        });
        self
    }

    /// Attach a trailing comment to the most recent line.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        if self.options.emit_comments {
            if let Some(line) = self.lines.last_mut() {
                line.comment = text.into();
            }
        }
        self
    }

    /// Add a line holding only a comment, indented with the code.
    pub fn comment_line(&mut self, text: impl Into<String>) -> &mut Self {
        if self.options.emit_comments {
            self.code("");
            self.comment(text);
        }
        self
    }

    /// Indent following lines by `by` more spaces.
    pub fn indent(&mut self, by: usize) -> &mut Self {
        self.indent += by;
        self
    }

    pub fn dedent(&mut self, by: usize) -> &mut Self {
        debug_assert!(self.indent >= by, "dedent below zero");
        self.indent = self.indent.saturating_sub(by);
        self
    }

    /// Discard the value on top of the stack.
    ///
    /// A trailing `local.get` has no side effects, so it is removed outright
    /// instead of being followed by `(drop)`.
    pub fn drop_value(&mut self) -> &mut Self {
        if self
            .lines
            .last()
            .is_some_and(|line| line.code.starts_with("(local.get"))
        {
            self.lines.pop();
        } else {
            self.code("(drop)").comment("Remove unneeded value from stack.");
        }
        self
    }

    /// A label unique within this compilation: `base` plus a per-base counter
    /// starting at 1.
    pub fn make_label(&mut self, base: &str) -> String {
        let id = self.label_ids.entry(base.to_owned()).or_insert(0);
        *id += 1;
        format!("{base}{id}")
    }

    /// Enter a loop: `break` targets `break_label`, `continue` targets
    /// `continue_label`.
    pub fn push_loop(&mut self, break_label: String, continue_label: String) {
        self.break_labels.push(break_label);
        self.continue_labels.push(continue_label);
    }

    pub fn pop_loop(&mut self) {
        self.break_labels.pop();
        self.continue_labels.pop();
    }

    /// Innermost `break` target, or `None` outside any loop.
    pub fn break_label(&self) -> Option<&str> {
        self.break_labels.last().map(String::as_str)
    }

    /// Innermost `continue` target, or `None` outside any loop.
    pub fn continue_label(&self) -> Option<&str> {
        self.continue_labels.last().map(String::as_str)
    }

    #[inline]
    pub fn is_final_node(&self) -> bool {
        self.final_node
    }

    #[inline]
    pub fn set_final_node(&mut self, final_node: bool) {
        self.final_node = final_node;
    }

    /// Current end of constant data; the heap starts here.
    pub fn mem_pos(&self) -> u32 {
        self.mem_pos
    }

    /// Place a NUL-terminated constant in linear memory and return its offset.
    pub fn alloc_data(&mut self, bytes: &[u8]) -> u32 {
        let offset = self.mem_pos;
        let mut escaped = String::with_capacity(bytes.len() + 3);
        for &byte in bytes {
            match byte {
                b'"' | b'\\' => {
                    escaped.push('\\');
                    escaped.push(char::from(byte));
                }
                0x20..=0x7e => escaped.push(char::from(byte)),
                _ => {
                    let _ = write!(escaped, "\\{byte:02x}");
                }
            }
        }
        self.code(format!("(data (i32.const {offset}) \"{escaped}\\00\")"));

        #[expect(
            clippy::cast_possible_truncation,
            reason = "constant data is bounded by source size"
        )]
        let len = bytes.len() as u32;
        self.mem_pos += len + 1;
        offset
    }

    /// WAT name of a variable.
    pub fn var_name(id: SymbolId) -> String {
        format!("$var{id}")
    }

    /// Produce the final text.
    ///
    /// Trailing comments line up two columns past the widest line that
    /// carries one.
    pub fn render(&self) -> String {
        let width = self
            .lines
            .iter()
            .filter(|line| !line.comment.is_empty() && !line.code.is_empty())
            .map(|line| line.indent + line.code.len())
            .max()
            .unwrap_or(0);

        let mut out = String::with_capacity(self.lines.len() * 48);
        for line in &self.lines {
            if line.code.is_empty() && line.comment.is_empty() {
                out.push('\n');
                continue;
            }
            out.extend(std::iter::repeat(' ').take(line.indent));
            out.push_str(&line.code);
            if !line.comment.is_empty() {
                if !line.code.is_empty() {
                    let gap = width - (line.indent + line.code.len()) + 2;
                    out.extend(std::iter::repeat(' ').take(gap));
                }
                out.push_str(";; ");
                out.push_str(&line.comment);
            }
            out.push('\n');
        }
        out
    }
}
