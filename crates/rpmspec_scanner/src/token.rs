//! External token kinds and the per-call validity set.
//!
//! # Ordering contract
//!
//! The declared order of [`TokenKind`] is a versioned contract with the
//! grammar compiler: the host maps integer positions to external-token names,
//! so variants must never be reordered or renumbered without regenerating the
//! grammar.

use bitflags::bitflags;

/// Token kinds the scanner can emit.
///
/// The grammar matches the `%` introducer for macro tokens itself and hands
/// the scanner the position immediately after it; conditional tokens span
/// `%` plus the directive keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Simple macro expansion: `%name`.
    SimpleMacro,
    /// Negated macro expansion: `%!name`.
    NegatedMacro,
    /// Special macro variables: `%*`, `%**`, `%#`, `%0`-`%9`, `%nil`.
    SpecialMacro,
    /// Escaped percent sign: `%%`.
    EscapedPercent,
    /// `%if` at top level or with section keywords in its body.
    TopLevelIf,
    /// `%if` inside a scriptlet, body free of section keywords.
    ScriptletIf,
    /// `%ifarch` at top level.
    TopLevelIfArch,
    /// `%ifarch` inside a scriptlet.
    ScriptletIfArch,
    /// `%ifnarch` at top level.
    TopLevelIfNarch,
    /// `%ifnarch` inside a scriptlet.
    ScriptletIfNarch,
    /// `%ifos` at top level.
    TopLevelIfOs,
    /// `%ifos` inside a scriptlet.
    ScriptletIfOs,
    /// `%ifnos` at top level.
    TopLevelIfNos,
    /// `%ifnos` inside a scriptlet.
    ScriptletIfNos,
    /// `%if` inside a `%files` section.
    FilesIf,
    /// `%ifarch` inside a `%files` section.
    FilesIfArch,
    /// `%ifnarch` inside a `%files` section.
    FilesIfNarch,
    /// `%ifos` inside a `%files` section.
    FilesIfOs,
    /// `%ifnos` inside a `%files` section.
    FilesIfNos,
    /// Raw text inside `%{expand:...}` with balanced braces.
    ExpandCode,
    /// Raw text inside `%(...)` with balanced parentheses.
    ShellCode,
}

impl TokenKind {
    /// Position of this kind in the grammar's external-token table.
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }
}

bitflags! {
    /// Host-supplied bitmap of token kinds acceptable at the current parse
    /// position, one bit per [`TokenKind`] at the kind's table index.
    ///
    /// The scanner must never emit a kind whose bit is clear.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct ValiditySet: u32 {
        const SIMPLE_MACRO = 1 << 0;
        const NEGATED_MACRO = 1 << 1;
        const SPECIAL_MACRO = 1 << 2;
        const ESCAPED_PERCENT = 1 << 3;
        const TOP_LEVEL_IF = 1 << 4;
        const SCRIPTLET_IF = 1 << 5;
        const TOP_LEVEL_IFARCH = 1 << 6;
        const SCRIPTLET_IFARCH = 1 << 7;
        const TOP_LEVEL_IFNARCH = 1 << 8;
        const SCRIPTLET_IFNARCH = 1 << 9;
        const TOP_LEVEL_IFOS = 1 << 10;
        const SCRIPTLET_IFOS = 1 << 11;
        const TOP_LEVEL_IFNOS = 1 << 12;
        const SCRIPTLET_IFNOS = 1 << 13;
        const FILES_IF = 1 << 14;
        const FILES_IFARCH = 1 << 15;
        const FILES_IFNARCH = 1 << 16;
        const FILES_IFOS = 1 << 17;
        const FILES_IFNOS = 1 << 18;
        const EXPAND_CODE = 1 << 19;
        const SHELL_CODE = 1 << 20;

        // === Aggregates ===

        /// The four macro kinds handled by the macro classifier.
        const ANY_MACRO = Self::SIMPLE_MACRO.bits()
            | Self::NEGATED_MACRO.bits()
            | Self::SPECIAL_MACRO.bits()
            | Self::ESCAPED_PERCENT.bits();

        /// Every conditional-directive kind, all families and roles.
        const ANY_CONDITIONAL = Self::TOP_LEVEL_IF.bits()
            | Self::SCRIPTLET_IF.bits()
            | Self::TOP_LEVEL_IFARCH.bits()
            | Self::SCRIPTLET_IFARCH.bits()
            | Self::TOP_LEVEL_IFNARCH.bits()
            | Self::SCRIPTLET_IFNARCH.bits()
            | Self::TOP_LEVEL_IFOS.bits()
            | Self::SCRIPTLET_IFOS.bits()
            | Self::TOP_LEVEL_IFNOS.bits()
            | Self::SCRIPTLET_IFNOS.bits()
            | Self::FILES_IF.bits()
            | Self::FILES_IFARCH.bits()
            | Self::FILES_IFNARCH.bits()
            | Self::FILES_IFOS.bits()
            | Self::FILES_IFNOS.bits();
    }
}

impl ValiditySet {
    /// Validity set with only `kind`'s bit set.
    #[inline]
    pub fn single(kind: TokenKind) -> Self {
        Self::from_bits_truncate(1 << kind.index())
    }

    /// Build a set from an explicit list of kinds.
    pub fn from_kinds(kinds: &[TokenKind]) -> Self {
        kinds
            .iter()
            .fold(Self::empty(), |set, &kind| set | Self::single(kind))
    }

    /// Whether `kind`'s bit is set.
    #[inline]
    pub fn contains_kind(self, kind: TokenKind) -> bool {
        self.contains(Self::single(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// The grammar maps external tokens by table position; this pins the
    /// contract so an accidental reorder fails loudly.
    #[test]
    fn token_order_is_fixed() {
        let expected: [(TokenKind, u32); 21] = [
            (TokenKind::SimpleMacro, 0),
            (TokenKind::NegatedMacro, 1),
            (TokenKind::SpecialMacro, 2),
            (TokenKind::EscapedPercent, 3),
            (TokenKind::TopLevelIf, 4),
            (TokenKind::ScriptletIf, 5),
            (TokenKind::TopLevelIfArch, 6),
            (TokenKind::ScriptletIfArch, 7),
            (TokenKind::TopLevelIfNarch, 8),
            (TokenKind::ScriptletIfNarch, 9),
            (TokenKind::TopLevelIfOs, 10),
            (TokenKind::ScriptletIfOs, 11),
            (TokenKind::TopLevelIfNos, 12),
            (TokenKind::ScriptletIfNos, 13),
            (TokenKind::FilesIf, 14),
            (TokenKind::FilesIfArch, 15),
            (TokenKind::FilesIfNarch, 16),
            (TokenKind::FilesIfOs, 17),
            (TokenKind::FilesIfNos, 18),
            (TokenKind::ExpandCode, 19),
            (TokenKind::ShellCode, 20),
        ];
        for (kind, index) in expected {
            assert_eq!(kind.index(), index, "{kind:?}");
        }
    }

    /// Each named flag sits at its kind's table index.
    #[test]
    fn validity_bits_match_token_indices() {
        let kinds = [
            TokenKind::SimpleMacro,
            TokenKind::NegatedMacro,
            TokenKind::SpecialMacro,
            TokenKind::EscapedPercent,
            TokenKind::TopLevelIf,
            TokenKind::ScriptletIf,
            TokenKind::TopLevelIfArch,
            TokenKind::ScriptletIfArch,
            TokenKind::TopLevelIfNarch,
            TokenKind::ScriptletIfNarch,
            TokenKind::TopLevelIfOs,
            TokenKind::ScriptletIfOs,
            TokenKind::TopLevelIfNos,
            TokenKind::ScriptletIfNos,
            TokenKind::FilesIf,
            TokenKind::FilesIfArch,
            TokenKind::FilesIfNarch,
            TokenKind::FilesIfOs,
            TokenKind::FilesIfNos,
            TokenKind::ExpandCode,
            TokenKind::ShellCode,
        ];
        for kind in kinds {
            let set = ValiditySet::single(kind);
            assert_eq!(set.bits(), 1 << kind.index(), "{kind:?}");
            assert!(set.contains_kind(kind));
        }
    }

    #[test]
    fn aggregates_cover_their_kinds() {
        assert!(ValiditySet::ANY_MACRO.contains_kind(TokenKind::SimpleMacro));
        assert!(ValiditySet::ANY_MACRO.contains_kind(TokenKind::EscapedPercent));
        assert!(!ValiditySet::ANY_MACRO.contains_kind(TokenKind::TopLevelIf));
        assert!(ValiditySet::ANY_CONDITIONAL.contains_kind(TokenKind::FilesIfNos));
        assert!(!ValiditySet::ANY_CONDITIONAL.contains_kind(TokenKind::ExpandCode));
    }

    #[test]
    fn from_kinds_builds_union() {
        let set = ValiditySet::from_kinds(&[TokenKind::TopLevelIf, TokenKind::ScriptletIf]);
        assert!(set.contains_kind(TokenKind::TopLevelIf));
        assert!(set.contains_kind(TokenKind::ScriptletIf));
        assert!(!set.contains_kind(TokenKind::FilesIf));
    }
}
