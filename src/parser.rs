//! Recursive descent parser that assembles NFA fragments via Thompson's
//! construction.
//!
//! Grammar:
//!
//! ```text
//! clause := (term | '|' clause)*
//! term   := atom quantifier?
//! atom   := literal | '.' | '(' clause ')' | '\' escapable
//! quantifier := '?' | '+' | '*'
//! ```
//!
//! Alternation binds the whole remaining clause, so `ab|cd` is
//! `(ab)|(cd)`, not `a(b|c)d`.

use crate::nfa::{Nfa, NodeId, NodeKind};
use crate::scanner::Scanner;
use crate::{CompileError, CompileResult};

/// A partially built subgraph with one open entry and one open exit. Only
/// used during parsing; the arena ids stay valid, the pair is discarded.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: NodeId,
    end: NodeId,
}

impl Fragment {
    fn single(n: NodeId) -> Fragment {
        Fragment { start: n, end: n }
    }
}

/// Parses `pattern` into an NFA, returning the arena together with the entry
/// node and the unique terminal (accepting) node.
pub fn parse(pattern: &str) -> CompileResult<(Nfa, NodeId, NodeId)> {
    let mut p = Parser {
        scanner: Scanner::new(pattern),
        nfa: Nfa::new(),
    };
    let clause = p.parse_clause()?;
    if let Some(ch) = p.scanner.peek() {
        // The outermost clause stops at ')' without consuming it; anything
        // left over here cannot start a construct.
        return Err(CompileError::Illegal {
            pos: p.scanner.pos(),
            ch,
        });
    }
    let term = p.nfa.add(NodeKind::Terminal);
    let e = p.concat_opt(clause, Fragment::single(term));
    Ok((p.nfa, e.start, term))
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    nfa: Nfa,
}

impl<'a> Parser<'a> {
    /// Parses a sequence of terms connected by concatenation or `|`.
    /// `None` means the clause was empty (e.g. `""` or `()`).
    fn parse_clause(&mut self) -> CompileResult<Option<Fragment>> {
        let mut e: Option<Fragment> = None;
        loop {
            match self.scanner.peek() {
                None | Some(')') => return Ok(e),
                Some('|') => e = Some(self.parse_pipe(e)?),
                Some(_) => {
                    let next = self.parse_term()?;
                    e = Some(self.concat_opt(e, next));
                }
            }
        }
    }

    /// Fuses the clause parsed so far with the rest of the clause into an
    /// alternation. Both operands must be non-empty.
    fn parse_pipe(&mut self, lhs: Option<Fragment>) -> CompileResult<Fragment> {
        let pos = self.scanner.pos();
        self.scanner.advance();
        let lhs = lhs.ok_or(CompileError::EmptyAlternation { pos })?;
        let rhs = self
            .parse_clause()?
            .ok_or(CompileError::EmptyAlternation { pos })?;
        // The rhs entry doubles as the combined entry: an epsilon edge from
        // it keeps the lhs branch reachable, and a Pipe node joins the exits.
        self.nfa.add_epsilon(rhs.start, lhs.start);
        let pipe = self.nfa.add(NodeKind::Pipe);
        let e = self.concat_node(rhs, pipe);
        self.concat_node(lhs, pipe);
        Ok(e)
    }

    /// Parses one atom plus an optional postfix quantifier.
    fn parse_term(&mut self) -> CompileResult<Fragment> {
        let pos = self.scanner.pos();
        let e = match self.scanner.peek() {
            None => return Err(CompileError::UnexpectedEnd { pos }),
            Some(ch @ ('?' | '+' | '*')) => {
                return Err(CompileError::LeadingQuantifier { pos, ch })
            }
            Some('(') => self.parse_subexp()?,
            Some('\\') => self.parse_escape()?,
            Some('.') => {
                self.scanner.advance();
                Fragment::single(self.nfa.add(NodeKind::AnyChar { next: None }))
            }
            Some(ch) => {
                self.scanner.advance();
                Fragment::single(self.nfa.add(NodeKind::Literal { ch, next: None }))
            }
        };
        // Quantifiers do not stack: `a**` applies `*` once, then trips over
        // the second `*` as the start of a new term.
        match self.scanner.peek() {
            Some(mc @ ('?' | '+' | '*')) => {
                self.scanner.advance();
                Ok(self.quantify(mc, e))
            }
            _ => Ok(e),
        }
    }

    /// `\` followed by one of `? * + ( ) |` yields that character literally.
    fn parse_escape(&mut self) -> CompileResult<Fragment> {
        let pos = self.scanner.pos();
        self.scanner.advance();
        match self.scanner.advance() {
            Some(ch @ ('?' | '*' | '+' | '(' | ')' | '|')) => {
                Ok(Fragment::single(self.nfa.add(NodeKind::Literal {
                    ch,
                    next: None,
                })))
            }
            Some(ch) => Err(CompileError::UnknownEscape { pos, ch }),
            None => Err(CompileError::UnexpectedEnd {
                pos: self.scanner.pos(),
            }),
        }
    }

    /// `(` clause `)`, wrapped between GroupOpen/GroupClose pass-through
    /// nodes. Groups exist only for precedence; they do not capture.
    fn parse_subexp(&mut self) -> CompileResult<Fragment> {
        let open = self.scanner.pos();
        self.scanner.advance();
        let inner = self.parse_clause()?;
        if self.scanner.advance() != Some(')') {
            return Err(CompileError::UnterminatedGroup { pos: open });
        }
        // GroupOpen leads into the inner fragment (if any), GroupClose hangs
        // off its exit. An empty group is GroupOpen wired straight through.
        let lp = self.nfa.add(NodeKind::GroupOpen);
        let rp = self.nfa.add(NodeKind::GroupClose);
        let e = match inner {
            Some(inner) => self.concat(Fragment::single(lp), inner),
            None => Fragment::single(lp),
        };
        Ok(self.concat_node(e, rp))
    }

    /// Applies one of the three Thompson quantifier gadgets to `term`.
    fn quantify(&mut self, mc: char, term: Fragment) -> Fragment {
        let junction = match mc {
            '+' => {
                // One-or-more: the loop is entered only after one match.
                let n = self.nfa.add(NodeKind::Plus);
                self.nfa.add_epsilon(n, term.start);
                n
            }
            '*' => {
                // Zero-or-more: loop back, plus a forward skip edge.
                let n = self.nfa.add(NodeKind::Star);
                self.nfa.add_epsilon(n, term.start);
                self.nfa.add_epsilon(term.start, n);
                n
            }
            '?' => {
                // Optional: a forward bypass only.
                let n = self.nfa.add(NodeKind::Qmark);
                self.nfa.add_epsilon(term.start, n);
                n
            }
            _ => unreachable!("quantify on {:?}", mc),
        };
        self.concat_node(term, junction)
    }

    /// Wires `next` after `e`: a match-node exit gets its consuming
    /// successor, an epsilon-only exit gets an epsilon edge.
    fn concat(&mut self, e: Fragment, next: Fragment) -> Fragment {
        if self.nfa.is_match_node(e.end) {
            self.nfa.set_next(e.end, next.start);
        } else {
            self.nfa.add_epsilon(e.end, next.start);
        }
        Fragment {
            start: e.start,
            end: next.end,
        }
    }

    fn concat_node(&mut self, e: Fragment, n: NodeId) -> Fragment {
        self.concat(e, Fragment::single(n))
    }

    fn concat_opt(&mut self, e: Option<Fragment>, next: Fragment) -> Fragment {
        match e {
            Some(e) => self.concat(e, next),
            None => next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(pattern: &str) -> CompileError {
        match parse(pattern) {
            Ok(_) => panic!("expected {:?} to fail", pattern),
            Err(e) => e,
        }
    }

    #[test]
    fn leading_quantifier() {
        assert_eq!(err("*a"), CompileError::LeadingQuantifier { pos: 0, ch: '*' });
        assert_eq!(err("+."), CompileError::LeadingQuantifier { pos: 0, ch: '+' });
        assert_eq!(err("?"), CompileError::LeadingQuantifier { pos: 0, ch: '?' });
    }

    #[test]
    fn quantifiers_do_not_stack() {
        assert_eq!(err("a**"), CompileError::LeadingQuantifier { pos: 2, ch: '*' });
        assert_eq!(err("a+?"), CompileError::LeadingQuantifier { pos: 2, ch: '?' });
    }

    #[test]
    fn empty_alternation_operand() {
        assert_eq!(err("|"), CompileError::EmptyAlternation { pos: 0 });
        assert_eq!(err("|a"), CompileError::EmptyAlternation { pos: 0 });
        assert_eq!(err("a|"), CompileError::EmptyAlternation { pos: 1 });
        assert_eq!(err("a||b"), CompileError::EmptyAlternation { pos: 2 });
        assert_eq!(err("(a|)"), CompileError::EmptyAlternation { pos: 2 });
        assert_eq!(err("()||"), CompileError::EmptyAlternation { pos: 3 });
    }

    #[test]
    fn unknown_escape() {
        assert_eq!(err("\\y"), CompileError::UnknownEscape { pos: 0, ch: 'y' });
        // Only the six metacharacters are escapable.
        assert_eq!(err("\\."), CompileError::UnknownEscape { pos: 0, ch: '.' });
        assert_eq!(err("ab\\cd"), CompileError::UnknownEscape { pos: 2, ch: 'c' });
    }

    #[test]
    fn trailing_backslash() {
        assert_eq!(err("ab\\"), CompileError::UnexpectedEnd { pos: 3 });
    }

    #[test]
    fn unterminated_group() {
        assert_eq!(err("(a"), CompileError::UnterminatedGroup { pos: 0 });
        assert_eq!(err("(a(as)())("), CompileError::UnterminatedGroup { pos: 9 });
    }

    #[test]
    fn stray_close_paren() {
        assert_eq!(err(")"), CompileError::Illegal { pos: 0, ch: ')' });
        assert_eq!(err("as)"), CompileError::Illegal { pos: 2, ch: ')' });
    }

    #[test]
    fn empty_pattern_is_just_the_terminal() {
        let (nfa, start, term) = parse("").unwrap();
        assert_eq!(nfa.len(), 1);
        assert_eq!(start, term);
    }

    #[test]
    fn literal_chain_wires_consuming_successors() {
        let (nfa, start, term) = parse("ab").unwrap();
        // literal 'a' -> literal 'b' -> terminal
        assert_eq!(nfa.len(), 3);
        let b = nfa.step(start, 'a').unwrap();
        assert_eq!(nfa.step(b, 'b'), Some(term));
        assert_eq!(nfa.step(start, 'b'), None);
    }

    #[test]
    fn escaped_metachars_are_literals() {
        let (nfa, start, _) = parse("\\*").unwrap();
        assert!(nfa.step(start, '*').is_some());
        assert_eq!(nfa.step(start, 'a'), None);
    }
}
