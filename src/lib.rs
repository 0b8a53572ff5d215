//! A small regular expression engine built on Thompson's NFA construction.
//!
//! Patterns are compiled into a nondeterministic finite automaton and matched
//! by simulating every live NFA node in parallel, one input code point at a
//! time. This keeps matching linear in `pattern size * input length` with no
//! backtracking.
//!
//! Matching is whole-string: the automaton must consume the entire input to
//! accept. Supported syntax is deliberately small: literal code points, `.`,
//! the postfix quantifiers `?`, `+` and `*`, alternation with `|`, grouping
//! with `(` `)` (no captures), and `\` escaping the metacharacters
//! `? * + ( ) |`.
//!
//! ```
//! let re = regexp_nfa::must_compile("(ab)+a");
//! assert!(re.is_match("ababa"));
//! assert!(!re.is_match("ab"));
//! ```

#[cfg(feature = "logging")]
macro_rules! trace {
    ($($tt:tt)*) => { log::trace!($($tt)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

pub mod matcher;
pub mod nfa;
pub mod parser;
pub mod scanner;

use crate::matcher::Matcher;
use crate::nfa::{Nfa, NodeId};

/// The result of compiling a pattern.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur during compilation.
///
/// Every error is a deterministic function of the pattern text and carries
/// the byte offset (and offending character, where there is one) for
/// diagnostics. Matching itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A quantifier with no term in front of it, e.g. `*a` or `a**`.
    #[error("quantifier {ch:?} at offset {pos} has nothing to repeat")]
    LeadingQuantifier { pos: usize, ch: char },
    /// A `|` with an empty operand, e.g. `|a`, `a||b` or `a|`.
    #[error("empty operand for '|' at offset {pos}")]
    EmptyAlternation { pos: usize },
    /// A `\` followed by anything other than `? * + ( ) |`.
    #[error("unknown escape sequence \\{ch} at offset {pos}")]
    UnknownEscape { pos: usize, ch: char },
    /// A `(` that is never closed.
    #[error("unterminated group opened at offset {pos}")]
    UnterminatedGroup { pos: usize },
    /// A character that cannot start a construct at this position, such as a
    /// stray `)` after a complete top-level clause.
    #[error("illegal {ch:?} at offset {pos}")]
    Illegal { pos: usize, ch: char },
    /// The pattern ended in the middle of a construct, e.g. a trailing `\`.
    #[error("unexpected end of pattern at offset {pos}")]
    UnexpectedEnd { pos: usize },
}

/// A compiled regular expression.
///
/// The node graph is built once by [`compile`] and never mutated afterwards,
/// so a `Regexp` can be shared freely across threads; each [`is_match`] call
/// allocates its own simulation state.
///
/// [`is_match`]: Regexp::is_match
#[derive(Debug, Clone)]
pub struct Regexp {
    nfa: Nfa,
    start: NodeId,
    term: NodeId,
    pattern: String,
}

impl Regexp {
    /// Returns true if `input`, in its entirety, matches the pattern.
    pub fn is_match(&self, input: &str) -> bool {
        Matcher::new(&self.nfa, self.start, self.term).is_match(input)
    }

    /// The original pattern text.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl std::fmt::Display for Regexp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Compiles a pattern into a [`Regexp`].
pub fn compile(pattern: &str) -> CompileResult<Regexp> {
    let (nfa, start, term) = parser::parse(pattern)?;
    trace!("compiled {:?} into {} nfa nodes", pattern, nfa.len());
    Ok(Regexp {
        nfa,
        start,
        term,
        pattern: pattern.to_owned(),
    })
}

/// Like [`compile`], but panics on an invalid pattern.
///
/// Intended for patterns that are compile-time constants known to be valid.
pub fn must_compile(pattern: &str) -> Regexp {
    match compile(pattern) {
        Ok(re) => re,
        Err(err) => panic!("must_compile({:?}): {}", pattern, err),
    }
}
