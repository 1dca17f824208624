//! Scanner entry point and dispatch pipeline.

use rpmspec_lexer_core::Lexer;
use tracing::trace;

use crate::balanced::{scan_expand_content, scan_shell_content};
use crate::conditional::scan_conditional;
use crate::macro_token::scan_macro;
use crate::state::ScanState;
use crate::token::{TokenKind, ValiditySet};

/// Stateful context-sensitive classifier driven by a host grammar.
///
/// The host calls [`Scanner::scan`] whenever one of the context-dependent
/// kinds is acceptable at the current position, passing the set of valid
/// kinds. On a commit the lexer's token span holds the recognized text; on
/// a decline the cursor and marks are exactly as they were at entry.
///
/// The only state carried between calls is the memoized section-lookahead
/// verdict, exposed through [`serialize`](Scanner::serialize) and
/// [`deserialize`](Scanner::deserialize) so the host can snapshot and
/// restore it alongside its own parse state.
#[derive(Debug, Default, Clone)]
pub struct Scanner {
    state: ScanState,
}

impl Scanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the scanner state into `buffer`, returning the bytes written.
    ///
    /// Returns `0` if `buffer` is shorter than [`crate::MAX_SERIALIZED_LEN`], which
    /// a later [`deserialize`](Scanner::deserialize) treats as a reset.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        self.state.serialize(buffer)
    }

    /// Restore scanner state from a [`serialize`](Scanner::serialize) image.
    ///
    /// An empty or truncated image resets to the default state.
    pub fn deserialize(&mut self, image: &[u8]) {
        self.state.deserialize(image);
    }

    /// Attempt to recognize one token at the lexer's position.
    ///
    /// Sub-scanners are tried in a fixed order: balanced-content kinds
    /// first (they accept almost anything, so the host only sets them in
    /// positions where nothing else applies), then conditional directives,
    /// then the percent-introduced macro kinds. `None` means no valid kind
    /// matches; the lexer is rewound to where it was at entry.
    pub fn scan(&mut self, lexer: &mut Lexer<'_>, valid: ValiditySet) -> Option<TokenKind> {
        let entry = lexer.checkpoint();

        if let Some(kind) = self.dispatch(lexer, valid) {
            trace!(?kind, start = lexer.token_start(), end = lexer.token_end(), "commit");
            lexer.finish_token();
            return Some(kind);
        }

        lexer.restore(entry);
        None
    }

    fn dispatch(&mut self, lexer: &mut Lexer<'_>, valid: ValiditySet) -> Option<TokenKind> {
        if valid.contains(ValiditySet::EXPAND_CODE) && scan_expand_content(lexer) {
            return Some(TokenKind::ExpandCode);
        }
        if valid.contains(ValiditySet::SHELL_CODE) && scan_shell_content(lexer) {
            return Some(TokenKind::ShellCode);
        }
        if let Some(kind) = scan_conditional(&mut self.state, lexer, valid) {
            return Some(kind);
        }
        if valid.intersects(ValiditySet::ANY_MACRO) {
            return scan_macro(lexer, valid);
        }
        None
    }
}
