//! Host lexer primitives for the rpmspec external scanner.
//!
//! The scanner crate (`rpmspec_scanner`) is a context-sensitive classifier
//! that makes one token decision per call. This crate supplies the character
//! stream it consumes:
//!
//! - [`SourceBuffer`]: sentinel-terminated byte buffer over the source text.
//! - [`Cursor`]: zero-cost, `Copy` byte cursor over that buffer.
//! - [`Lexer`]: the host facade with the primitives the classifier is written
//!   against: one-byte lookahead, advance-and-consume vs. advance-and-skip,
//!   tentative token-end marking, EOF detection, and checkpoint/restore.
//!
//! The checkpoint/restore pair is the load-bearing contract: a scan that
//! declines must leave the cursor exactly where it started, and that reset is
//! provided *here*, by the host layer, so classification code never performs
//! manual rollback and is free to consume during speculative lookahead.

mod cursor;
mod lexer;
mod source_buffer;

pub use cursor::Cursor;
pub use lexer::{Checkpoint, Lexer};
pub use source_buffer::SourceBuffer;
