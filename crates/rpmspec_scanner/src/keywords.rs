//! Static keyword tables for the rpmspec grammar.
//!
//! Two immutable sets:
//! 1. **Reserved keywords**: directives and builtins the grammar has its own
//!    rules for. The macro classifier must *decline* these so the grammar
//!    rule matches instead of a `SimpleMacro` token.
//! 2. **Section keywords**: names that open a top-level block (`%files`,
//!    `%build`, scriptlet hooks, trigger hooks). These double as the markers
//!    the conditional lookahead searches for.
//!
//! Lookups are length-bucketed `match` expressions: the identifier's length
//! rejects most candidates before any byte comparison, and the buckets
//! compile to jump tables. Inputs are raw identifier bytes; callers buffer
//! `[A-Za-z_][A-Za-z0-9_]*` runs and pass them here.

/// Is `c` a valid identifier start (letter or underscore)?
#[inline]
pub(crate) fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Is `c` a valid identifier continuation (letter, digit, or underscore)?
#[inline]
pub(crate) fn is_identifier_char(c: u8) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

/// Reserved directive and builtin names.
///
/// Covers conditionals, definitions, the grammar-handled `setup`/`patch`
/// macros, file directives, and the builtin macro families (string, path,
/// URL, multi-arg, standalone). `autosetup` and `autopatch` are deliberately
/// absent; they lex as ordinary parametric macros.
pub(crate) fn is_reserved(ident: &[u8]) -> bool {
    match ident.len() {
        2 => ident == b"if",
        3 => matches!(ident, b"doc" | b"dir" | b"len" | b"u2p" | b"sub" | b"rep" | b"dnl" | b"lua"),
        4 => matches!(
            ident,
            b"elif" | b"else" | b"ifos" | b"attr" | b"echo" | b"warn" | b"load" | b"gsub"
                | b"dump" | b"expr"
        ),
        5 => matches!(
            ident,
            b"endif" | b"ifnos" | b"setup" | b"patch" | b"ghost" | b"error" | b"lower"
                | b"quote" | b"upper" | b"trace"
        ),
        6 => matches!(
            ident,
            b"ifarch" | b"elifos" | b"define" | b"global" | b"config" | b"docdir" | b"verify"
                | b"expand" | b"getenv" | b"shrink" | b"exists" | b"suffix"
        ),
        7 => matches!(
            ident,
            b"ifnarch" | b"defattr" | b"license" | b"exclude" | b"reverse" | b"verbose"
                | b"dirname"
        ),
        8 => matches!(
            ident,
            b"elifarch" | b"undefine" | b"getncpus" | b"shescape" | b"basename" | b"url2path"
        ),
        9 => ident == b"macrobody",
        10 => matches!(ident, b"uncompress" | b"rpmversion"),
        _ => false,
    }
}

/// Section keywords that open a top-level block.
///
/// A conditional whose body contains one of these must be parsed with
/// top-level grammar rules rather than scriptlet rules.
pub(crate) fn is_section(ident: &[u8]) -> bool {
    match ident.len() {
        3 => ident == b"pre",
        4 => matches!(ident, b"prep" | b"post"),
        5 => matches!(ident, b"build" | b"check" | b"clean" | b"files" | b"preun"),
        6 => ident == b"postun",
        7 => matches!(ident, b"install" | b"package"),
        8 => ident == b"pretrans",
        9 => matches!(
            ident,
            b"changelog" | b"posttrans" | b"triggerin" | b"triggerun"
        ),
        10 => ident == b"preuntrans",
        11 => matches!(ident, b"description" | b"postuntrans"),
        12 => ident == b"triggerprein",
        13 => matches!(ident, b"triggerpostun" | b"filetriggerin" | b"filetriggerun"),
        17 => ident == b"filetriggerpostun",
        18 => matches!(ident, b"transfiletriggerin" | b"transfiletriggerun"),
        22 => ident == b"transfiletriggerpostun",
        _ => false,
    }
}

/// Reserved or section keyword; either way, not a simple macro.
#[inline]
pub(crate) fn is_keyword(ident: &[u8]) -> bool {
    is_reserved(ident) || is_section(ident)
}

/// Legacy numbered patch form: `patch` followed by one or more digits.
///
/// Handled by a dedicated grammar rule, so the classifier declines it.
pub(crate) fn is_patch_legacy(ident: &[u8]) -> bool {
    match ident.strip_prefix(b"patch") {
        Some(digits) => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        None => false,
    }
}

/// Is the identifier the `nil` special macro?
#[inline]
pub(crate) fn is_nil(ident: &[u8]) -> bool {
    ident == b"nil"
}
