//! Context-sensitive token classifier for RPM spec macro syntax.
//!
//! Classifies the token kinds a context-free grammar cannot: macro forms
//! after `%`, the three syntactic roles of conditional directives, raw
//! bodies of `%{expand:...}` and `%(...)`, and forced statement boundaries
//! in embedded shell. The host grammar drives it through [`Scanner::scan`]
//! with a [`ValiditySet`] of acceptable kinds per call.
//!
//! [`TokenKind`]'s declared order is a contract with the host grammar and
//! must never be reordered independently of it.

mod balanced;
mod boundary;
mod conditional;
mod keywords;
mod macro_token;
mod scanner;
mod state;
mod token;

pub use boundary::{scan_shell, ShellToken, ShellTokenize, ShellValidity, StatementBoundary};
pub use scanner::Scanner;
pub use state::MAX_SERIALIZED_LEN;
pub use token::{TokenKind, ValiditySet};
