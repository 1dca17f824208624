//! Context-aware classification of conditional directives.
//!
//! Each of the five directive families (`%if`, `%ifarch`, `%ifnarch`,
//! `%ifos`, `%ifnos`) has up to three role variants. Which one to emit
//! depends on parser context, which the grammar communicates through the
//! validity set:
//!
//! - Only the top-level role valid ⇒ we are at top level.
//! - Only the scriptlet role valid ⇒ we are inside a scriptlet.
//! - The files role valid ⇒ we are inside a `%files` section; the files
//!   production tolerates nested section markers itself, so the files role
//!   wins whenever its bit is set.
//! - Top-level *and* scriptlet both valid ⇒ ambiguous. A conditional inside
//!   a scriptlet is scriptlet-level only if its body stays inside the
//!   scriptlet; if the body opens a new section (`%files`, `%build`, a
//!   trigger hook), later content depends on parsing it with top-level
//!   rules. Resolved by bounded lookahead over the body.
//!
//! The lookahead verdict is memoized in [`ScanState`] so nested conditionals
//! do not rescan the same body once per nesting level.

use rpmspec_lexer_core::Lexer;
use tracing::trace;

use crate::keywords::{is_identifier_char, is_section};
use crate::state::ScanState;
use crate::token::{TokenKind, ValiditySet};

/// Maximum lines the lookahead scans before giving up.
///
/// Bounds the cost on pathological inputs; real-world conditional bodies fit
/// well within this. Exceeding the cap silently resolves to "no section
/// keyword found" (scriptlet role), trading a rare misclassification for
/// guaranteed termination.
const MAX_LOOKAHEAD_LINES: u32 = 2000;

/// One conditional-directive family and its role variants.
struct Family {
    name: &'static [u8],
    top: TokenKind,
    scriptlet: TokenKind,
    files: TokenKind,
}

const FAMILIES: [Family; 5] = [
    Family {
        name: b"if",
        top: TokenKind::TopLevelIf,
        scriptlet: TokenKind::ScriptletIf,
        files: TokenKind::FilesIf,
    },
    Family {
        name: b"ifarch",
        top: TokenKind::TopLevelIfArch,
        scriptlet: TokenKind::ScriptletIfArch,
        files: TokenKind::FilesIfArch,
    },
    Family {
        name: b"ifnarch",
        top: TokenKind::TopLevelIfNarch,
        scriptlet: TokenKind::ScriptletIfNarch,
        files: TokenKind::FilesIfNarch,
    },
    Family {
        name: b"ifos",
        top: TokenKind::TopLevelIfOs,
        scriptlet: TokenKind::ScriptletIfOs,
        files: TokenKind::FilesIfOs,
    },
    Family {
        name: b"ifnos",
        top: TokenKind::TopLevelIfNos,
        scriptlet: TokenKind::ScriptletIfNos,
        files: TokenKind::FilesIfNos,
    },
];

/// Is this identifier one of the five introducing directives?
///
/// Nesting tracking in the lookahead is family-agnostic: any conditional
/// opens a level that its `%endif` closes.
fn is_conditional_directive(ident: &[u8]) -> bool {
    FAMILIES.iter().any(|family| family.name == ident)
}

/// Keyword buffer capacity for the directive after `%`.
/// The longest family name is `ifnarch` (7 bytes).
const DIRECTIVE_CAPACITY: usize = 15;

/// Classify a conditional directive, resolving its syntactic role.
///
/// Declines without observable side effects when no conditional kind is
/// valid, when the input is not `%` + a family name, or when none of the
/// matched family's roles is valid. The token spans `%` plus the keyword.
pub(crate) fn scan_conditional(
    state: &mut ScanState,
    lexer: &mut Lexer<'_>,
    valid: ValiditySet,
) -> Option<TokenKind> {
    // Fast path: nothing conditional is acceptable here.
    if !valid.intersects(ValiditySet::ANY_CONDITIONAL) {
        return None;
    }

    // Leading whitespace (including newlines) is insignificant.
    while lexer.lookahead().is_ascii_whitespace() {
        lexer.skip();
    }

    if lexer.lookahead() != b'%' {
        return None;
    }

    lexer.mark_end();
    lexer.advance();

    let mut buf = [0u8; DIRECTIVE_CAPACITY];
    let mut len = 0usize;
    while is_identifier_char(lexer.lookahead()) && len < DIRECTIVE_CAPACITY {
        buf[len] = lexer.lookahead();
        len += 1;
        lexer.advance();
    }
    if len == 0 {
        return None;
    }

    let family = FAMILIES.iter().find(|family| family.name == &buf[..len])?;

    let top_valid = valid.contains_kind(family.top);
    let scriptlet_valid = valid.contains_kind(family.scriptlet);
    let files_valid = valid.contains_kind(family.files);
    if !top_valid && !scriptlet_valid && !files_valid {
        return None;
    }

    lexer.mark_end();

    // Files context wins whenever its bit is set: the files production
    // handles nested section markers itself, so switching to top-level is
    // unnecessary and would mis-nest file entries before a nested section.
    if files_valid {
        return Some(family.files);
    }

    // Exactly one of top/scriptlet valid: the context is unambiguous, and
    // any cached verdict belongs to a previous ambiguity.
    if top_valid && !scriptlet_valid {
        state.invalidate();
        return Some(family.top);
    }
    if scriptlet_valid && !top_valid {
        state.invalidate();
        return Some(family.scriptlet);
    }

    // Both top and scriptlet valid: lookahead decides.
    let has_section = match state.cached_section() {
        Some(cached) => cached,
        None => {
            let computed = finds_section_keyword(lexer);
            state.store_section(computed);
            computed
        }
    };
    trace!(
        directive = %String::from_utf8_lossy(family.name),
        has_section,
        "ambiguous conditional resolved"
    );
    Some(if has_section {
        family.top
    } else {
        family.scriptlet
    })
}

/// Identifier buffer capacity in the lookahead.
const LOOKAHEAD_IDENT_CAPACITY: usize = 31;

/// Scan forward for a section keyword before the matching `%endif`.
///
/// Starts immediately after the directive keyword, tracking conditional
/// nesting (depth starts at 1 for the directive being classified) and a line
/// count capped at [`MAX_LOOKAHEAD_LINES`]. Only `%identifier` at a line
/// start is significant; the rest of each line is skipped in one `memchr`
/// step. The cursor is *not* restored here; a decline discards all
/// advancement at the entry point, and a commit ends at the mark set before
/// the lookahead began.
fn finds_section_keyword(lexer: &mut Lexer<'_>) -> bool {
    let mut nesting: u32 = 1;
    let mut lines_scanned: u32 = 0;
    let mut at_line_start = true;

    while !lexer.is_eof() && lines_scanned < MAX_LOOKAHEAD_LINES {
        match lexer.lookahead() {
            b'\r' => {
                lexer.advance();
                if lexer.lookahead() == b'\n' {
                    lexer.advance();
                }
                at_line_start = true;
                lines_scanned += 1;
            }
            b'\n' => {
                lexer.advance();
                at_line_start = true;
                lines_scanned += 1;
            }
            // Horizontal whitespace keeps the line-start property.
            b' ' | b'\t' => lexer.advance(),
            b'%' if at_line_start => {
                lexer.advance();

                let mut buf = [0u8; LOOKAHEAD_IDENT_CAPACITY];
                let mut len = 0usize;
                while is_identifier_char(lexer.lookahead()) && len < LOOKAHEAD_IDENT_CAPACITY {
                    buf[len] = lexer.lookahead();
                    len += 1;
                    lexer.advance();
                }
                let ident = &buf[..len];

                if len > 0 {
                    if ident == b"endif" {
                        nesting -= 1;
                        if nesting == 0 {
                            // Matching end of the directive being classified:
                            // stop here, never look past it.
                            return false;
                        }
                    } else if is_conditional_directive(ident) {
                        nesting += 1;
                    } else if is_section(ident) {
                        return true;
                    }
                }
                at_line_start = false;
            }
            _ => {
                // Nothing else on this line can matter; skip to its end.
                at_line_start = false;
                lexer.advance_to_line_break();
            }
        }
    }

    // EOF or line cap reached without finding a section keyword.
    false
}
