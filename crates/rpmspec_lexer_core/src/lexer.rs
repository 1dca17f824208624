//! Host lexer facade consumed by the external scanner.
//!
//! Mirrors the contract a parsing runtime gives its external scanners: one
//! byte of lookahead, two flavors of advancement (consume into the token vs.
//! skip without including), a tentative token-end mark where the last call
//! before a successful return wins, and the guarantee that a declined scan
//! discards all advancement.
//!
//! That last guarantee is implemented by [`checkpoint`](Lexer::checkpoint) /
//! [`restore`](Lexer::restore): the scanner's entry point snapshots the lexer
//! before dispatching and restores it on decline. Classification code below
//! the entry point never rolls back manually and may consume freely while
//! looking ahead.

use crate::Cursor;

/// Snapshot of a [`Lexer`]'s position and token marks.
///
/// Opaque to the scanner; produced by [`Lexer::checkpoint`] and consumed by
/// [`Lexer::restore`].
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    pos: u32,
    token_start: u32,
    token_end: u32,
}

/// Host lexer: a [`Cursor`] plus token boundary tracking.
#[derive(Debug)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    /// First byte of the token under construction (skipped bytes excluded).
    token_start: u32,
    /// Tentative token end, set by [`mark_end`](Self::mark_end).
    token_end: u32,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `cursor`, with both token marks at its position.
    pub fn new(cursor: Cursor<'a>) -> Self {
        let pos = cursor.pos();
        Self {
            cursor,
            token_start: pos,
            token_end: pos,
        }
    }

    /// The byte at the current position (`0` at EOF).
    #[inline]
    pub fn lookahead(&self) -> u8 {
        self.cursor.current()
    }

    /// The byte one past the current position.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.cursor.peek()
    }

    /// Returns `true` when the cursor has consumed the entire source.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Advance one byte, consuming it into the token under construction.
    #[inline]
    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Advance one byte without including it in the token.
    ///
    /// Moves the token start forward along with the cursor. Only meaningful
    /// before the first consumed byte of a token (leading whitespace); the
    /// scanner never skips mid-token.
    #[inline]
    pub fn skip(&mut self) {
        self.cursor.advance();
        self.token_start = self.cursor.pos();
        self.token_end = self.cursor.pos();
    }

    /// Mark the current position as the tentative token end.
    ///
    /// May be called any number of times; the last call before a successful
    /// scan return wins. Bytes consumed past the mark (speculative lookahead)
    /// are not part of the committed token.
    #[inline]
    pub fn mark_end(&mut self) {
        self.token_end = self.cursor.pos();
    }

    /// Start position of the token under construction.
    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start
    }

    /// Position of the last [`mark_end`](Self::mark_end) call.
    #[inline]
    pub fn token_end(&self) -> u32 {
        self.token_end
    }

    /// Current cursor position (may be past the token end during lookahead).
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Snapshot the lexer for a later [`restore`](Self::restore).
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.cursor.pos(),
            token_start: self.token_start,
            token_end: self.token_end,
        }
    }

    /// Restore a snapshot taken by [`checkpoint`](Self::checkpoint).
    ///
    /// This is the host side of the decline contract: after a restore the
    /// lexer is byte-for-byte as it was, regardless of how far a declined
    /// scan advanced.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor.set_pos(checkpoint.pos);
        self.token_start = checkpoint.token_start;
        self.token_end = checkpoint.token_end;
    }

    /// Commit the current token: snap the cursor back to the marked end.
    ///
    /// Called by the host after a successful scan so the next scan starts
    /// right after the committed token rather than wherever speculative
    /// lookahead left the cursor.
    pub fn finish_token(&mut self) {
        self.cursor.set_pos(self.token_end);
        self.token_start = self.token_end;
    }

    /// Skip horizontal whitespace (spaces and tabs) without including it.
    pub fn skip_horizontal_whitespace(&mut self) {
        self.cursor.eat_horizontal_whitespace();
        self.token_start = self.cursor.pos();
        self.token_end = self.cursor.pos();
    }

    /// Consume to the next `\n`/`\r` (or EOF) as speculative lookahead.
    pub fn advance_to_line_break(&mut self) {
        self.cursor.eat_until_line_break();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceBuffer;
    use pretty_assertions::assert_eq;

    fn lexer(buf: &SourceBuffer) -> Lexer<'_> {
        Lexer::new(buf.cursor())
    }

    #[test]
    fn advance_consumes_into_token() {
        let buf = SourceBuffer::new("abc");
        let mut lx = lexer(&buf);
        lx.advance();
        lx.advance();
        lx.mark_end();
        assert_eq!(lx.token_start(), 0);
        assert_eq!(lx.token_end(), 2);
    }

    #[test]
    fn skip_excludes_leading_bytes() {
        let buf = SourceBuffer::new("  %if");
        let mut lx = lexer(&buf);
        lx.skip();
        lx.skip();
        lx.advance();
        lx.mark_end();
        assert_eq!(lx.token_start(), 2);
        assert_eq!(lx.token_end(), 3);
    }

    #[test]
    fn mark_end_last_call_wins() {
        let buf = SourceBuffer::new("abcdef");
        let mut lx = lexer(&buf);
        lx.advance();
        lx.mark_end();
        lx.advance();
        lx.advance();
        lx.mark_end();
        assert_eq!(lx.token_end(), 3);
    }

    #[test]
    fn lookahead_past_mark_is_not_committed() {
        let buf = SourceBuffer::new("abcdef");
        let mut lx = lexer(&buf);
        lx.advance();
        lx.mark_end();
        lx.advance();
        lx.advance();
        assert_eq!(lx.token_end(), 1);
        assert_eq!(lx.pos(), 3);
        lx.finish_token();
        assert_eq!(lx.pos(), 1);
    }

    #[test]
    fn restore_resets_everything() {
        let buf = SourceBuffer::new("  abc");
        let mut lx = lexer(&buf);
        let cp = lx.checkpoint();
        lx.skip();
        lx.skip();
        lx.advance();
        lx.mark_end();
        lx.restore(cp);
        assert_eq!(lx.pos(), 0);
        assert_eq!(lx.token_start(), 0);
        assert_eq!(lx.token_end(), 0);
    }

    #[test]
    fn skip_horizontal_whitespace_stops_at_newline() {
        let buf = SourceBuffer::new(" \t\n%");
        let mut lx = lexer(&buf);
        lx.skip_horizontal_whitespace();
        assert_eq!(lx.lookahead(), b'\n');
        assert_eq!(lx.token_start(), 2);
    }

    mod proptest_restore {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any interleaving of advances, skips, and marks is fully
            /// undone by checkpoint/restore.
            #[test]
            fn restore_is_exact(source in "[a-z %{}()\n]{0,64}", ops in proptest::collection::vec(0u8..3, 0..32)) {
                let buf = SourceBuffer::new(&source);
                let mut lx = Lexer::new(buf.cursor());
                let cp = lx.checkpoint();
                for op in ops {
                    if lx.is_eof() {
                        break;
                    }
                    match op {
                        0 => lx.advance(),
                        1 => lx.skip(),
                        _ => lx.mark_end(),
                    }
                }
                lx.restore(cp);
                prop_assert_eq!(lx.pos(), 0);
                prop_assert_eq!(lx.token_start(), 0);
                prop_assert_eq!(lx.token_end(), 0);
            }
        }
    }
}
