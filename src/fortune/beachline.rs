//! The beach line: an arena-backed binary tree of arcs and breakpoints.
//!
//! Leaves are parabolic arcs, one per site currently shaping the sweep
//! front; internal nodes are breakpoints where two adjacent parabolas cross,
//! each tied to the Voronoi edge growing along that crossing. Nodes live in
//! a `Vec` and link by index. Parent links exist for upward traversal only;
//! all structural edits go through the driver via [`Beachline::replace`].

use super::edge::EdgeBuilder;
use crate::primitives::Point2;
use num_traits::Float;

pub(crate) type NodeId = usize;

#[derive(Debug, Clone)]
pub(crate) struct Node<F> {
    pub parent: Option<NodeId>,
    pub kind: NodeKind<F>,
}

#[derive(Debug, Clone)]
pub(crate) enum NodeKind<F> {
    Arc(ArcNode<F>),
    Breakpoint(BreakpointNode<F>),
}

/// A leaf: one parabola focused on one site.
#[derive(Debug, Clone)]
pub(crate) struct ArcNode<F> {
    pub site: Point2<F>,
}

/// An internal node: the crossing of its left and right neighboring arcs.
///
/// Sites are stored in beach-line order (the left arc's site first), which
/// is the order the closed-form intersection expects. The inner and outer
/// breakpoints of a three-way split see the same edge with their site pairs
/// reversed; they trace its two ends.
#[derive(Debug, Clone)]
pub(crate) struct BreakpointNode<F> {
    pub left_site: Point2<F>,
    pub right_site: Point2<F>,
    pub edge: usize,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone)]
pub(crate) struct Beachline<F> {
    nodes: Vec<Node<F>>,
    pub root: Option<NodeId>,
}

impl<F: Float> Beachline<F> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<F> {
        &self.nodes[id]
    }

    /// Returns the breakpoint data of an internal node.
    ///
    /// # Panics
    ///
    /// Panics if `id` names an arc leaf.
    pub(crate) fn breakpoint(&self, id: NodeId) -> &BreakpointNode<F> {
        match &self.nodes[id].kind {
            NodeKind::Breakpoint(bp) => bp,
            NodeKind::Arc(_) => panic!("expected a breakpoint node"),
        }
    }

    pub(crate) fn breakpoint_mut(&mut self, id: NodeId) -> &mut BreakpointNode<F> {
        match &mut self.nodes[id].kind {
            NodeKind::Breakpoint(bp) => bp,
            NodeKind::Arc(_) => panic!("expected a breakpoint node"),
        }
    }

    /// Returns the site of an arc leaf.
    ///
    /// # Panics
    ///
    /// Panics if `id` names a breakpoint; callers only hold arc ids here.
    pub(crate) fn site_of(&self, id: NodeId) -> Point2<F> {
        match &self.nodes[id].kind {
            NodeKind::Arc(arc) => arc.site,
            NodeKind::Breakpoint(_) => panic!("expected an arc node"),
        }
    }

    /// Allocates a detached arc leaf.
    pub(crate) fn new_arc(&mut self, site: Point2<F>) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Arc(ArcNode { site }),
        });
        self.nodes.len() - 1
    }

    /// Allocates a breakpoint and wires both children's parent links to it.
    pub(crate) fn new_breakpoint(
        &mut self,
        left_site: Point2<F>,
        right_site: Point2<F>,
        edge: usize,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            kind: NodeKind::Breakpoint(BreakpointNode {
                left_site,
                right_site,
                edge,
                left,
                right,
            }),
        });
        let id = self.nodes.len() - 1;
        self.nodes[left].parent = Some(id);
        self.nodes[right].parent = Some(id);
        id
    }

    /// Installs `arc` as the sole root of an empty tree.
    pub(crate) fn set_root(&mut self, arc: NodeId) {
        debug_assert!(self.root.is_none());
        self.nodes[arc].parent = None;
        self.root = Some(arc);
    }

    /// Descends from the root to the arc directly below `x` at the given
    /// sweep position.
    ///
    /// # Panics
    ///
    /// Panics if the tree is empty; the driver checks emptiness first.
    pub(crate) fn find(&self, x: F, sweep: F) -> NodeId {
        let mut current = self.root.expect("find on an empty beach line");
        loop {
            match &self.nodes[current].kind {
                NodeKind::Arc(_) => return current,
                NodeKind::Breakpoint(bp) => {
                    let crossing = intersect_x(bp.left_site, bp.right_site, sweep);
                    current = if x < crossing { bp.left } else { bp.right };
                }
            }
        }
    }

    /// Walks to the leftmost arc of the subtree rooted at `id`.
    pub(crate) fn leftmost_descendant(&self, mut id: NodeId) -> NodeId {
        loop {
            match &self.nodes[id].kind {
                NodeKind::Arc(_) => return id,
                NodeKind::Breakpoint(bp) => id = bp.left,
            }
        }
    }

    /// Walks to the rightmost arc of the subtree rooted at `id`.
    pub(crate) fn rightmost_descendant(&self, mut id: NodeId) -> NodeId {
        loop {
            match &self.nodes[id].kind {
                NodeKind::Arc(_) => return id,
                NodeKind::Breakpoint(bp) => id = bp.right,
            }
        }
    }

    /// Finds the arc immediately left of `arc` on the beach line, together
    /// with the breakpoint ancestor separating the two.
    ///
    /// Returns `None` for the leftmost arc, and for nodes no longer attached
    /// to the tree (a stale circle event may still name a replaced arc).
    pub(crate) fn left_neighbor(&self, arc: NodeId) -> Option<(NodeId, NodeId)> {
        let mut current = arc;
        loop {
            let parent = self.nodes[current].parent?;
            match &self.nodes[parent].kind {
                NodeKind::Breakpoint(bp) => {
                    if bp.right == current {
                        return Some((self.rightmost_descendant(bp.left), parent));
                    } else if bp.left == current {
                        current = parent;
                    } else {
                        return None;
                    }
                }
                NodeKind::Arc(_) => panic!("arc node used as a parent"),
            }
        }
    }

    /// Finds the arc immediately right of `arc` on the beach line, together
    /// with the breakpoint ancestor separating the two.
    pub(crate) fn right_neighbor(&self, arc: NodeId) -> Option<(NodeId, NodeId)> {
        let mut current = arc;
        loop {
            let parent = self.nodes[current].parent?;
            match &self.nodes[parent].kind {
                NodeKind::Breakpoint(bp) => {
                    if bp.left == current {
                        return Some((self.leftmost_descendant(bp.right), parent));
                    } else if bp.right == current {
                        current = parent;
                    } else {
                        return None;
                    }
                }
                NodeKind::Arc(_) => panic!("arc node used as a parent"),
            }
        }
    }

    /// Swaps `new` into the tree position currently held by `old`.
    ///
    /// The replaced subtree keeps its stale parent link and simply becomes
    /// unreachable from the root.
    ///
    /// # Panics
    ///
    /// Panics if `old` is not attached where its parent link claims; that
    /// is a bug in the driver, not a recoverable condition.
    pub(crate) fn replace(&mut self, old: NodeId, new: NodeId) {
        self.replace_in(self.nodes[old].parent, old, new);
    }

    /// Like [`Beachline::replace`], with the parent slot given explicitly.
    ///
    /// Arc splits reuse the split arc as a child of the replacement subtree,
    /// which overwrites its parent link before the swap, so the caller
    /// captures the parent up front.
    pub(crate) fn replace_in(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => {
                if self.root != Some(old) {
                    panic!("replace: node has no parent and is not the root");
                }
                self.root = Some(new);
                self.nodes[new].parent = None;
            }
            Some(parent) => {
                match &mut self.nodes[parent].kind {
                    NodeKind::Breakpoint(bp) => {
                        if bp.left == old {
                            bp.left = new;
                        } else if bp.right == old {
                            bp.right = new;
                        } else {
                            panic!("replace: node is not a child of its parent");
                        }
                    }
                    NodeKind::Arc(_) => panic!("arc node used as a parent"),
                }
                self.nodes[new].parent = Some(parent);
            }
        }
    }

    /// Reports the open growth direction of every breakpoint still alive at
    /// sweep termination to its edge, so `EdgeBuilder::finish` can orient
    /// unbounded ends.
    pub(crate) fn finish(&self, edges: &mut [EdgeBuilder<F>]) {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let NodeKind::Breakpoint(bp) = &self.nodes[id].kind {
                let growth = (bp.right_site - bp.left_site).perpendicular();
                if let Some(direction) = growth.normalize() {
                    edges[bp.edge].extend(direction);
                }
                stack.push(bp.left);
                stack.push(bp.right);
            }
        }
    }
}

/// Computes the x coordinate where the parabolas focused at `left` and
/// `right` cross, with the sweep line as directrix, picking the crossing
/// that has the `left` site's arc on the left.
///
/// A focus lying exactly on the sweep line degenerates its parabola to a
/// vertical ray; those cases substitute directly instead of solving the
/// quadratic, which would divide by zero.
pub(crate) fn intersect_x<F: Float>(left: Point2<F>, right: Point2<F>, sweep: F) -> F {
    let two = F::from(2.0).unwrap();

    if left.y == right.y {
        return (left.x + right.x) / two;
    }
    if left.y == sweep {
        return left.x;
    }
    if right.y == sweep {
        return right.x;
    }

    // Equate the two parabolas y = (x - fx)^2 / (2(fy - sweep)) + (fy + sweep)/2
    // and solve the resulting quadratic. With coefficients built in
    // (left, right) order, the sign of `a` flips exactly when the ordering
    // flips, so the smaller-root formula always yields the crossing with the
    // left site's arc on the left.
    let da = two * (left.y - sweep);
    let db = two * (right.y - sweep);

    let a = da.recip() - db.recip();
    let b = -two * (left.x / da - right.x / db);
    let c = left.x * left.x / da - right.x * right.x / db + (left.y - right.y) / two;

    let disc = (b * b - two * two * a * c).max(F::zero());
    (-b - disc.sqrt()) / (two * a)
}
