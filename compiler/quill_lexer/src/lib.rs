//! Lexer for Quill using logos.
//!
//! Produces a `Vec<Token>` with 1-based line/column positions, always
//! terminated by a single `Eof` token. `Eof` sits at the last real token's
//! position so errors at end of input point at something the user wrote.

mod escape;
mod raw_token;

use logos::Logos;
use quill_diagnostic::{Diagnostic, ErrorCode};
use quill_ir::{SourcePos, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

pub use escape::char_value;
use raw_token::RawToken;

/// Lexical errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unknown token '{text}'")]
    UnknownToken { text: String, pos: SourcePos },

    #[error("Malformed character literal {text}")]
    MalformedChar { text: String, pos: SourcePos },
}

impl LexError {
    pub fn pos(&self) -> SourcePos {
        match self {
            LexError::UnknownToken { pos, .. } | LexError::MalformedChar { pos, .. } => *pos,
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        let code = match &err {
            LexError::UnknownToken { .. } => ErrorCode::E0002,
            LexError::MalformedChar { .. } => ErrorCode::E0001,
        };
        Diagnostic::error(code)
            .at(err.pos())
            .with_message(err.to_string())
    }
}

/// Byte offset to line/column mapping.
struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineIndex {
            source,
            line_starts,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "line and column counts fit in u32 for any realistic source"
    )]
    fn pos(&self, offset: usize) -> SourcePos {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let col = self.source[line_start..offset].chars().count() + 1;
        SourcePos::new(line as u32 + 1, col as u32)
    }
}

/// Tokenize a whole source file.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let pos = index.pos(span.start);
        match result {
            Ok(RawToken::Char) if char_value(text).is_none() => {
                return Err(LexError::MalformedChar {
                    text: text.to_owned(),
                    pos,
                });
            }
            Ok(raw) => tokens.push(Token::new(raw.kind(), text, pos)),
            Err(()) => {
                if text.starts_with('\'') {
                    return Err(LexError::MalformedChar {
                        text: text.to_owned(),
                        pos,
                    });
                }
                return Err(LexError::UnknownToken {
                    text: text.to_owned(),
                    pos,
                });
            }
        }
    }

    let eof_pos = tokens.last().map_or(SourcePos::START, |t| t.pos);
    tokens.push(Token::new(TokenKind::Eof, "", eof_pos));
    debug!(count = tokens.len(), "lexed");
    Ok(tokens)
}
