//! Zero-cost cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. EOF is detected
//! when the current byte equals the sentinel (`0x00`) and the position has
//! reached or exceeded the source length; an interior null at an earlier
//! position is ordinary content. The cursor is `Copy`, which is what makes
//! cheap checkpoint/restore possible one layer up in [`Lexer`].
//!
//! [`Lexer`]: crate::Lexer

/// Zero-cost cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00`. Guaranteed by `SourceBuffer`
/// construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` at EOF (the sentinel). Interior null bytes also return
    /// `0x00`; use [`is_eof()`](Self::is_eof) to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe at any position: the sentinel and padding guarantee valid reads
    /// past the end of the source content.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached EOF.
    ///
    /// EOF is the sentinel byte at or past the source length. A null byte
    /// at an earlier position is interior content, not EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Reposition the cursor to an absolute byte offset.
    ///
    /// `pos` must not exceed a position previously observed via
    /// [`pos()`](Self::pos); used by the lexer layer for checkpoint restore.
    #[inline]
    pub fn set_pos(&mut self, pos: u32) {
        debug_assert!((pos as usize) < self.buf.len());
        self.pos = pos;
    }

    /// Advance past horizontal whitespace (spaces and tabs).
    ///
    /// The sentinel byte naturally terminates scanning since it is neither
    /// space nor tab.
    #[inline]
    pub fn eat_horizontal_whitespace(&mut self) {
        loop {
            let b = self.buf[self.pos as usize];
            if b == b' ' || b == b'\t' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Advance to the next line break (`\n` or `\r`) or EOF.
    ///
    /// SIMD-accelerated via `memchr2`. Used by the conditional lookahead to
    /// skip the uninteresting remainder of a line in one step. The cursor is
    /// left *at* the line-break byte, or at EOF if none is found.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_line_break(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr2(b'\n', b'\r', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }
}
