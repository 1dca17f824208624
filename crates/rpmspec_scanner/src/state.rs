//! Persistent scanner state: the memoized lookahead verdict.
//!
//! Resolving an ambiguous conditional requires scanning ahead to its matching
//! `%endif`. Nested conditionals would repeat that scan once per nesting
//! level over the same body, so the verdict is cached. The cache is only
//! meaningful for the immediately following scan at the *same* ambiguity;
//! resolving a conditional in an unambiguous context invalidates it.
//!
//! The host suspends and resumes incremental reparses across scan calls, so
//! the state must round-trip through a small byte buffer. Serialization
//! degrades rather than failing: a too-small buffer gets nothing written, and
//! malformed or truncated input deserializes to the empty default.

/// Maximum number of bytes [`ScanState::serialize`] will write.
pub const MAX_SERIALIZED_LEN: usize = 2;

/// Scanner-owned state surviving across scan calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScanState {
    /// Whether `has_section` holds a memoized verdict.
    cache_valid: bool,
    /// Cached lookahead verdict: did the body contain a section keyword?
    has_section: bool,
}

impl ScanState {
    /// The memoized verdict, if one is cached.
    pub(crate) fn cached_section(&self) -> Option<bool> {
        self.cache_valid.then_some(self.has_section)
    }

    /// Memoize a freshly computed lookahead verdict.
    pub(crate) fn store_section(&mut self, has_section: bool) {
        self.cache_valid = true;
        self.has_section = has_section;
    }

    /// Drop the cached verdict. Called when the ambiguity context changes.
    pub(crate) fn invalidate(&mut self) {
        self.cache_valid = false;
        self.has_section = false;
    }

    /// Write the state into `buffer`, returning the byte count.
    ///
    /// Writes nothing (returns 0) when the buffer cannot hold the full
    /// encoding; the host then resumes from the empty default, which is
    /// always safe.
    pub(crate) fn serialize(&self, buffer: &mut [u8]) -> usize {
        if buffer.len() < MAX_SERIALIZED_LEN {
            return 0;
        }
        buffer[0] = u8::from(self.cache_valid);
        buffer[1] = u8::from(self.has_section);
        MAX_SERIALIZED_LEN
    }

    /// Restore state previously written by [`serialize`](Self::serialize).
    ///
    /// Truncated or malformed input restores the empty default; persisted
    /// state is a cache, so "no information" is always a valid answer.
    pub(crate) fn deserialize(&mut self, buffer: &[u8]) {
        *self = Self::default();
        if buffer.len() < MAX_SERIALIZED_LEN {
            return;
        }
        self.cache_valid = buffer[0] != 0;
        self.has_section = buffer[1] != 0;
    }
}
