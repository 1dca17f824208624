//! Balanced-delimiter scanning of raw macro bodies.
//!
//! Two structurally identical scanners swallow opaque text verbatim while
//! leaving nested macro syntax for the grammar:
//!
//! - [`scan_expand_content`]: text inside `%{expand:...}`, tracking brace
//!   depth. Handles content like `return {0:0, 11:+1}[c]`.
//! - [`scan_shell_content`]: text inside `%(...)`, tracking parenthesis
//!   depth. Handles content like `test $(echo hi) = hi && echo ok`.
//!
//! The closing delimiter at depth zero ends the scan *without* being
//! consumed; the grammar owns it as a separate terminal. A `%` ends the
//! scan too, so nested macros are re-offered to the grammar, except for the
//! escape forms inside an expand body (`%%`, `%#`, `%*`, `%<digits>`) which
//! are consumed as content: they only mean something after a later expansion
//! pass and must not be parsed as macros here.
//!
//! Both return whether any content was consumed, distinguishing an empty
//! body from a non-match.

use rpmspec_lexer_core::Lexer;

/// Scan raw content inside `%{expand:...}` up to the closing brace at depth
/// zero or a nested macro introducer.
pub(crate) fn scan_expand_content(lexer: &mut Lexer<'_>) -> bool {
    let mut brace_depth: u32 = 0;
    let mut has_content = false;

    while !lexer.is_eof() {
        match lexer.lookahead() {
            b'%' => {
                // Mark before the % so the token can stop here if a real
                // macro follows.
                lexer.mark_end();
                lexer.advance();
                if lexer.is_eof() {
                    // Trailing % at EOF is content.
                    lexer.mark_end();
                    return true;
                }
                match lexer.lookahead() {
                    // Escape forms: consumed as content, re-evaluated after
                    // expansion rather than parsed as macros here.
                    b'%' | b'#' | b'*' => {
                        lexer.advance();
                        lexer.mark_end();
                        has_content = true;
                    }
                    // Real macro expansion: stop BEFORE the % (the mark set
                    // above already excludes it).
                    b'{' => return has_content,
                    // Positional argument: consume the digit run as content.
                    b'0'..=b'9' => {
                        while lexer.lookahead().is_ascii_digit() {
                            lexer.advance();
                        }
                        lexer.mark_end();
                        has_content = true;
                    }
                    // Any other % sequence: keep the % as content.
                    _ => {
                        lexer.mark_end();
                        has_content = true;
                    }
                }
            }
            b'{' => {
                brace_depth += 1;
                has_content = true;
                lexer.advance();
                lexer.mark_end();
            }
            b'}' => {
                if brace_depth == 0 {
                    // Closing brace of %{expand:...}; the grammar consumes it.
                    return has_content;
                }
                brace_depth -= 1;
                has_content = true;
                lexer.advance();
                lexer.mark_end();
            }
            _ => {
                has_content = true;
                lexer.advance();
                lexer.mark_end();
            }
        }
    }

    has_content
}

/// Scan raw content inside `%(...)` up to the closing paren at depth zero
/// or a macro introducer.
pub(crate) fn scan_shell_content(lexer: &mut Lexer<'_>) -> bool {
    let mut paren_depth: u32 = 0;
    let mut has_content = false;

    while !lexer.is_eof() {
        match lexer.lookahead() {
            // Potential macro start; the grammar handles it.
            b'%' => break,
            b'(' => {
                paren_depth += 1;
                has_content = true;
                lexer.advance();
                lexer.mark_end();
            }
            b')' => {
                if paren_depth == 0 {
                    // Closing paren of %(...); the grammar consumes it.
                    break;
                }
                paren_depth -= 1;
                has_content = true;
                lexer.advance();
                lexer.mark_end();
            }
            _ => {
                has_content = true;
                lexer.advance();
                lexer.mark_end();
            }
        }
    }

    has_content
}
