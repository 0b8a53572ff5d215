//! Parallel NFA simulation ("powerset on the fly").
//!
//! The entire run-time state is two sets of live node ids, each closed under
//! epsilon reachability. The frontier is bounded by the node count, so
//! matching is `O(pattern size * input length)` with no backtracking.

use std::collections::HashSet;

use crate::nfa::{Nfa, NodeId};

/// Runs a compiled NFA against one input string.
pub struct Matcher<'a> {
    nfa: &'a Nfa,
    start: NodeId,
    term: NodeId,
}

impl<'a> Matcher<'a> {
    pub fn new(nfa: &'a Nfa, start: NodeId, term: NodeId) -> Matcher<'a> {
        Matcher { nfa, start, term }
    }

    /// Whole-string match: true iff consuming all of `input` can leave the
    /// automaton on the terminal node.
    pub fn is_match(&self, input: &str) -> bool {
        let mut cur: HashSet<NodeId> = HashSet::new();
        let mut next: HashSet<NodeId> = HashSet::new();
        self.nfa.add_closure(&mut cur, self.start);

        for ch in input.chars() {
            for &id in &cur {
                if let Some(succ) = self.nfa.step(id, ch) {
                    self.nfa.add_closure(&mut next, succ);
                }
            }
            if next.is_empty() {
                // No live node accepted this code point; no suffix can
                // rescue the match.
                trace!("dead after {:?}, rejecting early", ch);
                return false;
            }
            cur.clear();
            std::mem::swap(&mut cur, &mut next);
        }

        let matched = cur.contains(&self.term);
        trace!("{} live nodes at end of input, matched={}", cur.len(), matched);
        matched
    }
}
