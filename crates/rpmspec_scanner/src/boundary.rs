//! Statement-boundary disambiguation for the embedded shell dialect.
//!
//! Scriptlet bodies are tokenized by a line-oriented shell sub-tokenizer.
//! Left alone, it treats a newline followed by more text as argument
//! continuation, so a macro statement on the next line gets absorbed into
//! the previous command:
//!
//! ```text
//! make install
//! %find_lang %{name}     <- must start a new statement
//! ```
//!
//! [`StatementBoundary`] wraps the sub-tokenizer and intercepts exactly one
//! token kind, the statement terminator, forcing it out before lines that
//! begin a macro statement. Everything else is delegated unchanged.

use rpmspec_lexer_core::Lexer;

use crate::keywords::{is_identifier_char, is_identifier_start};

bitflags::bitflags! {
    /// Token kinds the shell grammar will accept at the current position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShellValidity: u32 {
        const STATEMENT_TERMINATOR = 1 << 0;
        const WORD = 1 << 1;
        const RAW_TEXT = 1 << 2;
    }
}

/// Token produced by a shell tokenizer.
///
/// Only the terminator is meaningful to the wrapper; sub-tokenizer kinds
/// pass through as their own indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellToken {
    StatementTerminator,
    Sub(u16),
}

/// A shell tokenizer: one `scan` attempt per call.
///
/// Same contract as the macro-side scanner: commit fixes the token span via
/// the lexer marks, decline returns `None`. Cursor reset on decline is the
/// caller's job (see [`scan_shell`]), so implementations are free to consume
/// while probing.
pub trait ShellTokenize {
    fn scan(&mut self, lexer: &mut Lexer<'_>, valid: ShellValidity) -> Option<ShellToken>;
}

/// Wrapper that forces a statement terminator before macro statements.
///
/// When the terminator kind is valid and the lookahead is a newline, the
/// wrapper consumes the newline, peeks across any blank run, and checks for
/// `%` plus an identifier of at least two characters. Single-character forms
/// (`%1`, `%*`, `%S`) are argument references, not statement starters, so
/// they do not force a boundary.
///
/// On a failed probe the wrapper declines instead of delegating: the cursor
/// has already moved past the newline, and the sub-tokenizer must only ever
/// start from the true original position. The caller's decline-reset makes
/// the retry reach the sub-tokenizer cleanly.
#[derive(Debug)]
pub struct StatementBoundary<T> {
    inner: T,
}

impl<T> StatementBoundary<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: ShellTokenize> ShellTokenize for StatementBoundary<T> {
    fn scan(&mut self, lexer: &mut Lexer<'_>, valid: ShellValidity) -> Option<ShellToken> {
        if !valid.contains(ShellValidity::STATEMENT_TERMINATOR) || lexer.lookahead() != b'\n' {
            return self.inner.scan(lexer, valid);
        }

        // The terminator spans only this newline; everything after is
        // lookahead past the mark.
        lexer.advance();
        lexer.mark_end();

        while matches!(lexer.lookahead(), b'\n' | b'\r' | b' ' | b'\t') {
            lexer.advance();
        }

        if lexer.lookahead() != b'%' {
            return None;
        }
        lexer.advance();

        if !is_identifier_start(lexer.lookahead()) {
            return None;
        }
        lexer.advance();
        if !is_identifier_char(lexer.lookahead()) {
            return None;
        }

        Some(ShellToken::StatementTerminator)
    }
}

/// Run one scan attempt with the decline-reset contract applied.
///
/// Mirrors the macro-side entry point: checkpoint at entry, rewind on
/// decline, snap the cursor to the committed token end on success.
pub fn scan_shell<T: ShellTokenize>(
    tokenizer: &mut T,
    lexer: &mut Lexer<'_>,
    valid: ShellValidity,
) -> Option<ShellToken> {
    let entry = lexer.checkpoint();
    match tokenizer.scan(lexer, valid) {
        Some(token) => {
            lexer.finish_token();
            Some(token)
        }
        None => {
            lexer.restore(entry);
            None
        }
    }
}
