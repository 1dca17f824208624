//! Macro token classification after the `%` introducer.
//!
//! The grammar matches the `%` prefix itself, then calls the scanner with
//! the cursor positioned immediately after it:
//!
//! - `%`  (a second one)  ⇒ [`TokenKind::EscapedPercent`]
//! - `!name`              ⇒ [`TokenKind::NegatedMacro`]
//! - `*`, `**`, `#`, digit run, `nil` ⇒ [`TokenKind::SpecialMacro`]
//! - `name`               ⇒ [`TokenKind::SimpleMacro`]
//!
//! Reserved keywords, section names, and the legacy numbered `patchN` form
//! decline so the grammar's dedicated rules match instead.

use rpmspec_lexer_core::Lexer;

use crate::keywords::{is_identifier_char, is_identifier_start, is_keyword, is_nil, is_patch_legacy};
use crate::token::{TokenKind, ValiditySet};

/// Fixed identifier buffer capacity.
///
/// Identifiers longer than this are still fully consumed (token boundaries
/// stay correct) but classified on the truncated prefix only. No keyword is
/// anywhere near this long, so an overflowing identifier can only classify
/// as a simple macro.
const IDENT_CAPACITY: usize = 64;

/// Classify the macro content following a `%` introducer.
///
/// Returns `None` ("not my token") when nothing matches or when the matching
/// kind is not in `valid`. The caller's checkpoint undoes any advancement on
/// decline.
pub(crate) fn scan_macro(lexer: &mut Lexer<'_>, valid: ValiditySet) -> Option<TokenKind> {
    lexer.mark_end();

    match lexer.lookahead() {
        // Second % for escaped percent (%%)
        b'%' => {
            if !valid.contains(ValiditySet::ESCAPED_PERCENT) {
                return None;
            }
            lexer.advance();
            lexer.mark_end();
            Some(TokenKind::EscapedPercent)
        }

        // !name for negated macro
        b'!' => {
            if !valid.contains(ValiditySet::NEGATED_MACRO) {
                return None;
            }
            lexer.advance();
            // %{!?name} conditional interpolation belongs to the grammar
            if lexer.lookahead() == b'?' {
                return None;
            }
            if !is_identifier_start(lexer.lookahead()) {
                return None;
            }
            while is_identifier_char(lexer.lookahead()) {
                lexer.advance();
            }
            lexer.mark_end();
            Some(TokenKind::NegatedMacro)
        }

        // * or ** for the argument vector
        b'*' => {
            if !valid.contains(ValiditySet::SPECIAL_MACRO) {
                return None;
            }
            lexer.advance();
            if lexer.lookahead() == b'*' {
                lexer.advance();
            }
            lexer.mark_end();
            Some(TokenKind::SpecialMacro)
        }

        // # for the argument count
        b'#' => {
            if !valid.contains(ValiditySet::SPECIAL_MACRO) {
                return None;
            }
            lexer.advance();
            lexer.mark_end();
            Some(TokenKind::SpecialMacro)
        }

        // Digit run for positional arguments
        b'0'..=b'9' => {
            if !valid.contains(ValiditySet::SPECIAL_MACRO) {
                return None;
            }
            while lexer.lookahead().is_ascii_digit() {
                lexer.advance();
            }
            lexer.mark_end();
            Some(TokenKind::SpecialMacro)
        }

        c if is_identifier_start(c) => {
            if !valid.contains(ValiditySet::SIMPLE_MACRO) {
                return None;
            }

            let mut buf = [0u8; IDENT_CAPACITY];
            let mut len = 0usize;
            while is_identifier_char(lexer.lookahead()) {
                if len < IDENT_CAPACITY {
                    buf[len] = lexer.lookahead();
                    len += 1;
                }
                // Bytes past capacity are consumed but not classified.
                lexer.advance();
            }
            let ident = &buf[..len];

            // Keywords and the legacy patchN form have dedicated grammar rules.
            if is_keyword(ident) || is_patch_legacy(ident) {
                return None;
            }

            if is_nil(ident) {
                if !valid.contains(ValiditySet::SPECIAL_MACRO) {
                    return None;
                }
                lexer.mark_end();
                return Some(TokenKind::SpecialMacro);
            }

            lexer.mark_end();
            Some(TokenKind::SimpleMacro)
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rpmspec_lexer_core::SourceBuffer;

    /// Run the classifier over `source` (the text *after* the `%`).
    /// Returns the matched kind and the committed token end.
    fn scan(source: &str, valid: ValiditySet) -> (Option<TokenKind>, u32) {
        let buf = SourceBuffer::new(source);
        let mut lexer = Lexer::new(buf.cursor());
        let kind = scan_macro(&mut lexer, valid);
        (kind, lexer.token_end())
    }

    fn all_macro() -> ValiditySet {
        ValiditySet::ANY_MACRO
    }

    // === Escaped percent ===

    #[test]
    fn double_percent_is_escape() {
        let (kind, end) = scan("% rest", all_macro());
        assert_eq!(kind, Some(TokenKind::EscapedPercent));
        assert_eq!(end, 1);
    }

    #[test]
    fn escape_declines_when_invalid() {
        let (kind, _) = scan("%", ValiditySet::SIMPLE_MACRO);
        assert_eq!(kind, None);
    }

    // === Negated macro ===

    #[test]
    fn negated_macro_consumes_identifier() {
        let (kind, end) = scan("!with_tests rest", all_macro());
        assert_eq!(kind, Some(TokenKind::NegatedMacro));
        assert_eq!(end, 11);
    }

    #[test]
    fn negated_conditional_interpolation_declines() {
        // %{!?name} is handled by the grammar, not the scanner
        let (kind, _) = scan("!?name", all_macro());
        assert_eq!(kind, None);
    }

    #[test]
    fn bang_without_identifier_declines() {
        assert_eq!(scan("!1", all_macro()).0, None);
        assert_eq!(scan("!", all_macro()).0, None);
    }

    // === Special macros ===

    #[test]
    fn star_forms() {
        let (kind, end) = scan("* args", all_macro());
        assert_eq!(kind, Some(TokenKind::SpecialMacro));
        assert_eq!(end, 1);

        let (kind, end) = scan("** args", all_macro());
        assert_eq!(kind, Some(TokenKind::SpecialMacro));
        assert_eq!(end, 2);
    }

    #[test]
    fn hash_form() {
        let (kind, end) = scan("#", all_macro());
        assert_eq!(kind, Some(TokenKind::SpecialMacro));
        assert_eq!(end, 1);
    }

    #[test]
    fn positional_digit_runs() {
        let (kind, end) = scan("1 foo", all_macro());
        assert_eq!(kind, Some(TokenKind::SpecialMacro));
        assert_eq!(end, 1);

        let (kind, end) = scan("12", all_macro());
        assert_eq!(kind, Some(TokenKind::SpecialMacro));
        assert_eq!(end, 2);
    }

    #[test]
    fn nil_is_special_macro() {
        let (kind, end) = scan("nil rest", all_macro());
        assert_eq!(kind, Some(TokenKind::SpecialMacro));
        assert_eq!(end, 3);
    }

    #[test]
    fn nil_declines_when_special_invalid() {
        let (kind, _) = scan("nil", ValiditySet::SIMPLE_MACRO);
        assert_eq!(kind, None);
    }

    #[test]
    fn special_forms_decline_when_invalid() {
        let only_simple = ValiditySet::SIMPLE_MACRO;
        assert_eq!(scan("*", only_simple).0, None);
        assert_eq!(scan("#", only_simple).0, None);
        assert_eq!(scan("7", only_simple).0, None);
    }

    // === Simple macros ===

    #[test]
    fn ordinary_identifier_is_simple_macro() {
        let (kind, end) = scan("version}", all_macro());
        assert_eq!(kind, Some(TokenKind::SimpleMacro));
        assert_eq!(end, 7);
    }

    #[test]
    fn underscore_identifiers_match() {
        let (kind, end) = scan("_prefix/bin", all_macro());
        assert_eq!(kind, Some(TokenKind::SimpleMacro));
        assert_eq!(end, 7);
    }

    #[test]
    fn keywords_never_classify_as_simple_macro() {
        for kw in ["if", "files", "build", "define", "endif", "expand"] {
            let (kind, _) = scan(kw, all_macro());
            assert_eq!(kind, None, "{kw}");
        }
    }

    #[test]
    fn patch_legacy_declines() {
        assert_eq!(scan("patch0", all_macro()).0, None);
        assert_eq!(scan("patch123", all_macro()).0, None);
        // but patch followed by non-digit is a keyword anyway, and
        // patchfoo is an ordinary macro name
        assert_eq!(scan("patchfoo", all_macro()).0, Some(TokenKind::SimpleMacro));
    }

    #[test]
    fn identifier_declines_when_simple_invalid() {
        let (kind, _) = scan("name", ValiditySet::SPECIAL_MACRO);
        assert_eq!(kind, None);
    }

    #[test]
    fn overlong_identifier_consumes_fully() {
        let name = "x".repeat(IDENT_CAPACITY + 16);
        let source = format!("{name} rest");
        let (kind, end) = scan(&source, all_macro());
        assert_eq!(kind, Some(TokenKind::SimpleMacro));
        // The whole identifier is consumed even though classification
        // only saw the truncated prefix.
        assert_eq!(end as usize, name.len());
    }

    // === Non-matches ===

    #[test]
    fn non_macro_characters_decline() {
        assert_eq!(scan("{expand}", all_macro()).0, None);
        assert_eq!(scan("(sh)", all_macro()).0, None);
        assert_eq!(scan(" name", all_macro()).0, None);
        assert_eq!(scan("", all_macro()).0, None);
    }
}
