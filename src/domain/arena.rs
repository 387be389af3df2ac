//! Arena-backed expression trees.
//!
//! Nodes are stored in a generational arena and addressed by [`Index`].
//! Combining two subtrees hands both child indices to the new parent; a child
//! that already has a parent cannot be combined again, so every node has at
//! most one owner. The children's rendered labels move into the parent's, so
//! only unowned nodes carry text. The whole arena is released when the tree is
//! dropped.
//!
//! Every walk over a tree uses an explicit stack: a left-deep chain of
//! operators is as deep as the input is long.

use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::error::{ConversionResult, MalformedExpression, MalformedReason};
use crate::domain::token::{Notation, Operator};

/// Levels shown by [`ExpressionTree::to_termtree`].
pub const MAX_DISPLAY_DEPTH: usize = 32;

/// Shape of a node: a single operand or an operator over exactly two children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(char),
    Internal {
        operator: Operator,
        left: Index,
        right: Index,
    },
}

/// A (sub)expression with its fully parenthesized rendering.
#[derive(Debug)]
pub struct ExprNode {
    /// Rendered text; empty once the node has been combined into a parent
    pub label: String,
    pub kind: NodeKind,
    parent: Option<Index>,
}

impl ExprNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn is_internal(&self) -> bool {
        !self.is_leaf()
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    fn symbol(&self) -> char {
        match self.kind {
            NodeKind::Leaf(c) => c,
            NodeKind::Internal { operator, .. } => operator.symbol(),
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Node storage for one conversion.
#[derive(Debug, Default)]
pub struct ExpressionArena {
    arena: Arena<ExprNode>,
}

impl ExpressionArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn leaf(&mut self, operand: char) -> Index {
        self.arena.insert(ExprNode {
            label: operand.to_string(),
            kind: NodeKind::Leaf(operand),
            parent: None,
        })
    }

    /// Build `(left op right)` and make it the sole owner of both children.
    #[instrument(level = "trace", skip(self))]
    pub fn combine(&mut self, operator: Operator, left: Index, right: Index) -> ConversionResult<Index> {
        if left == right {
            return Err(internal("a node cannot be both operands"));
        }
        self.unowned(left)?;
        self.unowned(right)?;
        let l = self.take_label(left);
        let r = self.take_label(right);
        let mut label = String::with_capacity(l.len() + r.len() + 5);
        label.push('(');
        label.push_str(&l);
        label.push(' ');
        label.push(operator.symbol());
        label.push(' ');
        label.push_str(&r);
        label.push(')');

        let parent = self.arena.insert(ExprNode {
            label,
            kind: NodeKind::Internal {
                operator,
                left,
                right,
            },
            parent: None,
        });
        for child in [left, right] {
            if let Some(node) = self.arena.get_mut(child) {
                node.parent = Some(parent);
            }
        }
        Ok(parent)
    }

    pub fn get(&self, idx: Index) -> Option<&ExprNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Freeze the arena into a tree rooted at `root`.
    pub fn into_tree(self, root: Index) -> ConversionResult<ExpressionTree> {
        match self.arena.get(root) {
            Some(node) if node.parent.is_none() => Ok(ExpressionTree { arena: self, root }),
            Some(_) => Err(internal("root node is owned by another node")),
            None => Err(internal("root node does not exist")),
        }
    }

    fn take_label(&mut self, idx: Index) -> String {
        self.arena
            .get_mut(idx)
            .map(|node| std::mem::take(&mut node.label))
            .unwrap_or_default()
    }

    fn unowned(&self, idx: Index) -> ConversionResult<&ExprNode> {
        let node = self
            .arena
            .get(idx)
            .ok_or_else(|| internal("child node does not exist"))?;
        if node.parent.is_some() {
            return Err(internal("child node already has a parent"));
        }
        Ok(node)
    }
}

fn internal(message: &str) -> MalformedExpression {
    MalformedExpression::new(
        Notation::Postfix,
        MalformedReason::Internal(message.to_string()),
    )
}

/// A complete expression tree built from postfix input.
#[derive(Debug)]
pub struct ExpressionTree {
    arena: ExpressionArena,
    root: Index,
}

impl ExpressionTree {
    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &ExprNode {
        // root presence is checked in ExpressionArena::into_tree
        &self.arena.arena[self.root]
    }

    pub fn get_node(&self, idx: Index) -> Option<&ExprNode> {
        self.arena.get(idx)
    }

    /// Fully parenthesized infix rendering.
    pub fn label(&self) -> &str {
        &self.root_node().label
    }

    pub fn into_label(mut self) -> String {
        self.arena
            .arena
            .remove(self.root)
            .map(|node| node.label)
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = vec![(self.root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            match self.get_node(idx).map(|node| node.kind) {
                Some(NodeKind::Internal { left, right, .. }) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                Some(NodeKind::Leaf(_)) => deepest = deepest.max(depth),
                None => {}
            }
        }
        deepest
    }

    pub fn operand_count(&self) -> usize {
        self.iter_postorder().filter(|(_, node)| node.is_leaf()).count()
    }

    pub fn operator_count(&self) -> usize {
        self.iter_postorder()
            .filter(|(_, node)| node.is_internal())
            .count()
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Re-linearize the tree as compact postfix text.
    pub fn to_postfix(&self) -> String {
        self.iter_postorder().map(|(_, node)| node.symbol()).collect()
    }

    /// Tree view for display, cut off below [`MAX_DISPLAY_DEPTH`] levels.
    pub fn to_termtree(&self) -> Tree<String> {
        self.to_termtree_with_depth(MAX_DISPLAY_DEPTH)
    }

    /// Tree view built bottom-up; operators at `max_depth` stand in for their
    /// whole subtree and are shown as `op …`.
    pub fn to_termtree_with_depth(&self, max_depth: usize) -> Tree<String> {
        let mut finished: Vec<Tree<String>> = Vec::new();
        let mut stack: Vec<(Index, usize, bool)> = vec![(self.root, 1, false)];

        while let Some((idx, depth, expanded)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                finished.push(Tree::new("?".to_string()));
                continue;
            };
            match node.kind {
                NodeKind::Leaf(c) => finished.push(Tree::new(c.to_string())),
                NodeKind::Internal { operator, .. } if depth >= max_depth => {
                    finished.push(Tree::new(format!("{} …", operator)));
                }
                NodeKind::Internal {
                    operator,
                    left,
                    right,
                } => {
                    if expanded {
                        let r = finished.pop();
                        let l = finished.pop();
                        let subtree = Tree::new(operator.to_string()).with_leaves(l.into_iter().chain(r));
                        finished.push(subtree);
                    } else {
                        stack.push((idx, depth, true));
                        stack.push((right, depth + 1, false));
                        stack.push((left, depth + 1, false));
                    }
                }
            }
        }

        finished.pop().unwrap_or_else(|| Tree::new(String::new()))
    }
}

/// Left, right, then parent.
pub struct PostOrderIterator<'a> {
    tree: &'a ExpressionTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a ExpressionTree) -> Self {
        Self {
            tree,
            stack: vec![(tree.root, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a ExprNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(idx) {
                match (visited, node.kind) {
                    (false, NodeKind::Internal { left, right, .. }) => {
                        self.stack.push((idx, true));
                        self.stack.push((right, false));
                        self.stack.push((left, false));
                    }
                    _ => return Some((idx, node)),
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExpressionTree {
        // (a + b) * c
        let mut arena = ExpressionArena::new();
        let a = arena.leaf('a');
        let b = arena.leaf('b');
        let sum = arena.combine(Operator::Add, a, b).unwrap();
        let c = arena.leaf('c');
        let root = arena.combine(Operator::Multiply, sum, c).unwrap();
        arena.into_tree(root).unwrap()
    }

    #[test]
    fn given_two_leaves_when_combine_then_label_is_parenthesized() {
        let mut arena = ExpressionArena::new();
        let a = arena.leaf('a');
        let b = arena.leaf('b');
        let root = arena.combine(Operator::Subtract, a, b).unwrap();

        let node = arena.get(root).unwrap();
        assert_eq!(node.label, "(a - b)");
        assert!(node.is_internal());
        assert_eq!(arena.get(a).unwrap().parent(), Some(root));
        assert_eq!(arena.get(b).unwrap().parent(), Some(root));
    }

    #[test]
    fn given_owned_child_when_combine_again_then_rejected() {
        let mut arena = ExpressionArena::new();
        let a = arena.leaf('a');
        let b = arena.leaf('b');
        let c = arena.leaf('c');
        arena.combine(Operator::Add, a, b).unwrap();

        let result = arena.combine(Operator::Add, a, c);
        assert!(matches!(
            result,
            Err(MalformedExpression {
                reason: MalformedReason::Internal(_),
                ..
            })
        ));
    }

    #[test]
    fn given_same_node_twice_when_combine_then_rejected() {
        let mut arena = ExpressionArena::new();
        let a = arena.leaf('a');
        assert!(arena.combine(Operator::Add, a, a).is_err());
    }

    #[test]
    fn given_owned_node_when_into_tree_then_rejected() {
        let mut arena = ExpressionArena::new();
        let a = arena.leaf('a');
        let b = arena.leaf('b');
        arena.combine(Operator::Add, a, b).unwrap();
        assert!(arena.into_tree(a).is_err());
    }

    #[test]
    fn given_tree_when_inspecting_then_reports_shape() {
        let tree = sample();
        assert_eq!(tree.label(), "((a + b) * c)");
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.operand_count(), 3);
        assert_eq!(tree.operator_count(), 2);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn given_tree_when_to_postfix_then_visits_children_first() {
        assert_eq!(sample().to_postfix(), "ab+c*");
    }

    #[test]
    fn given_tree_when_to_termtree_then_operators_are_inner_nodes() {
        let rendered = sample().to_termtree().to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "*");
        assert!(lines[1].ends_with('+'));
        assert!(rendered.contains('a'));
        assert!(lines.last().unwrap().ends_with('c'));
    }

    fn left_chain(operators: usize) -> ExpressionTree {
        let mut arena = ExpressionArena::new();
        let mut root = arena.leaf('a');
        for _ in 0..operators {
            let b = arena.leaf('b');
            root = arena.combine(Operator::Add, root, b).unwrap();
        }
        arena.into_tree(root).unwrap()
    }

    #[test]
    fn given_combined_children_when_inspecting_then_label_moved_to_parent() {
        let tree = sample();
        let NodeKind::Internal { left, right, .. } = tree.root_node().kind else {
            panic!("root must be internal");
        };
        assert_eq!(tree.label(), "((a + b) * c)");
        assert!(tree.get_node(left).unwrap().label.is_empty());
        assert!(tree.get_node(right).unwrap().label.is_empty());
    }

    #[test]
    fn given_deep_chain_when_walking_then_no_recursion_limit() {
        let tree = left_chain(20_000);
        assert_eq!(tree.depth(), 20_001);
        assert_eq!(tree.operator_count(), 20_000);
        assert_eq!(tree.to_postfix().len(), 40_001);
    }

    #[test]
    fn given_deep_chain_when_to_termtree_then_cut_at_display_depth() {
        let rendered = left_chain(10_000).to_termtree().to_string();
        let lines: Vec<_> = rendered.lines().collect();
        // each expanded operator level shows the operator and its right `b`
        assert_eq!(lines.len(), 2 * (MAX_DISPLAY_DEPTH - 1) + 1);
        assert!(lines.iter().any(|line| line.ends_with("+ …")));
    }

    #[test]
    fn given_shallow_limit_when_to_termtree_then_subtrees_elided() {
        let rendered = sample().to_termtree_with_depth(2).to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "*");
        assert!(lines[1].ends_with("+ …"));
        assert!(lines[2].ends_with('c'));
    }

    #[test]
    fn given_tree_when_into_label_then_returns_root_label() {
        assert_eq!(sample().into_label(), "((a + b) * c)");
    }
}
