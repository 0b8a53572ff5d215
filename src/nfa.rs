//! The NFA node graph: an arena of vertices with epsilon edges and
//! single-code-point consuming edges.

use std::collections::HashSet;

/// Index of a node in the [`Nfa`] arena. Node identity is the index; two
/// `Literal` nodes for the same character are distinct vertices.
pub type NodeId = usize;

/// The variant of an NFA node.
///
/// `Literal` and `AnyChar` are match nodes: they consume one code point and
/// move to their single consuming successor. Everything else transitions only
/// via epsilon edges. `Star` and `Plus` junctions close the loops that make
/// the graph cyclic; `Terminal` is the unique accepting sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Accepts exactly one specific code point.
    Literal { ch: char, next: Option<NodeId> },
    /// Accepts any single code point (`.`).
    AnyChar { next: Option<NodeId> },
    /// Zero-or-more junction; loops back to the quantified term's entry.
    Star,
    /// One-or-more junction; entered only after one match of the term.
    Plus,
    /// Optional-bypass junction.
    Qmark,
    /// Alternation join point.
    Pipe,
    /// Pass-through marker from `(`.
    GroupOpen,
    /// Pass-through marker from `)`.
    GroupClose,
    /// The accepting sink, one per compiled pattern.
    Terminal,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    epsilons: Vec<NodeId>,
}

/// The arena owning every node of a compiled pattern.
///
/// Edges are `NodeId` indices into the arena, so the cycles introduced by
/// `*` and `+` need no shared ownership; the arena drops as a unit. Wiring
/// (epsilon edges and consuming successors) happens exactly once per node
/// during parsing, and the graph is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Nfa {
    nodes: Vec<Node>,
}

impl Nfa {
    pub fn new() -> Nfa {
        Nfa { nodes: Vec::new() }
    }

    /// Adds a node and returns its id.
    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            epsilons: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Adds an epsilon edge `from -> to`.
    pub fn add_epsilon(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from].epsilons.push(to);
    }

    /// Sets the consuming successor of a match node. Must be called at most
    /// once per node, and only on match nodes.
    pub fn set_next(&mut self, id: NodeId, to: NodeId) {
        match &mut self.nodes[id].kind {
            NodeKind::Literal { next, .. } | NodeKind::AnyChar { next } => {
                debug_assert!(next.is_none(), "consuming successor wired twice");
                *next = Some(to);
            }
            kind => debug_assert!(false, "set_next on epsilon-only node {:?}", kind),
        }
    }

    /// True for nodes that consume input (`Literal`, `AnyChar`).
    pub fn is_match_node(&self, id: NodeId) -> bool {
        matches!(
            self.nodes[id].kind,
            NodeKind::Literal { .. } | NodeKind::AnyChar { .. }
        )
    }

    /// If node `id` is a match node that accepts `ch`, returns its consuming
    /// successor; otherwise `None`.
    pub fn step(&self, id: NodeId, ch: char) -> Option<NodeId> {
        match self.nodes[id].kind {
            NodeKind::Literal { ch: want, next } if want == ch => next,
            NodeKind::AnyChar { next } => next,
            _ => None,
        }
    }

    /// Inserts `id` and everything reachable from it over epsilon edges into
    /// `set`. Idempotent, and safe on cyclic graphs.
    pub fn add_closure(&self, set: &mut HashSet<NodeId>, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if !set.insert(id) {
                continue;
            }
            stack.extend(self.nodes[id].epsilons.iter().copied());
        }
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Nfa {
    fn default() -> Nfa {
        Nfa::new()
    }
}
