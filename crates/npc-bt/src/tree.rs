use core::fmt;

use npc_core::{Policy, TickContext};
use tracing::trace;

use crate::node::{Composite, Node, NodeKind};
use crate::{BuildError, Status};

/// Index of a node inside a [`BehaviorTree`]. The root is always `NodeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot<A> {
    name: String,
    status: Status,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind<A>,
}

/// Read-only view of one node.
pub struct NodeRef<'a, A> {
    pub id: NodeId,
    pub name: &'a str,
    pub status: Status,
    pub parent: Option<NodeId>,
    pub children: &'a [NodeId],
    pub kind: &'a NodeKind<A>,
}

/// A frozen behavior tree: nodes flattened in preorder into an arena.
///
/// The shape never changes after [`BehaviorTree::new`]. Parent links are plain ids.
pub struct BehaviorTree<A> {
    nodes: Vec<Slot<A>>,
}

impl<A> BehaviorTree<A> {
    pub fn new(root: Node<A>) -> Result<Self, BuildError> {
        let mut nodes = Vec::new();
        flatten(&mut nodes, root, None)?;
        Ok(Self { nodes })
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, A>> {
        self.nodes.get(id.0).map(|slot| NodeRef {
            id,
            name: &slot.name,
            status: slot.status,
            parent: slot.parent,
            children: &slot.children,
            kind: &slot.kind,
        })
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|s| s.name.as_str())
    }

    pub fn status(&self, id: NodeId) -> Option<Status> {
        self.nodes.get(id.0).map(|s| s.status)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|s| s.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    /// The child that ended the selector's last scan, if `id` is a selector.
    pub fn selector_last_index(&self, id: NodeId) -> Option<usize> {
        match self.nodes.get(id.0)?.kind {
            NodeKind::Composite(Composite::Selector { last_index }) => last_index,
            _ => None,
        }
    }

    /// First node with `name`, in preorder.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|s| s.name == name).map(NodeId)
    }

    /// Status returned by the root on the last tick.
    pub fn last_status(&self) -> Status {
        self.nodes.first().map(|s| s.status).unwrap_or_default()
    }

    /// Ticks the root once and returns its status.
    pub fn tick(&mut self, ctx: &TickContext, agent: &mut A) -> Status {
        self.tick_node(self.root(), ctx, agent)
    }

    /// Returns every node to its freshly built state: statuses `Inactive`, cursors and latches
    /// cleared. Effects are not invoked.
    pub fn reset(&mut self) {
        for slot in &mut self.nodes {
            slot.status = Status::Inactive;
            match &mut slot.kind {
                NodeKind::Composite(Composite::Selector { last_index }) => *last_index = None,
                NodeKind::Composite(Composite::Sequence { cursor }) => *cursor = 0,
                NodeKind::Action(action) => action.reset(),
                NodeKind::Condition(_) => {}
                NodeKind::MoveTo(move_to) => move_to.reset(),
            }
        }
    }

    fn tick_node(&mut self, id: NodeId, ctx: &TickContext, agent: &mut A) -> Status {
        let status = match self.nodes[id.0].kind {
            NodeKind::Composite(Composite::Selector { .. }) => self.tick_selector(id, ctx, agent),
            NodeKind::Composite(Composite::Sequence { cursor }) => {
                self.tick_sequence(id, cursor, ctx, agent)
            }
            _ => self.tick_leaf(id, ctx, agent),
        };

        let slot = &mut self.nodes[id.0];
        slot.status = status;
        trace!(tick = ctx.tick, node = %slot.name, %status, "node ticked");
        status
    }

    fn tick_leaf(&mut self, id: NodeId, ctx: &TickContext, agent: &mut A) -> Status {
        let Slot { name, kind, .. } = &mut self.nodes[id.0];
        match kind {
            NodeKind::Action(action) => action.tick(name, ctx, agent),
            NodeKind::Condition(condition) => condition.evaluate(agent),
            NodeKind::MoveTo(move_to) => move_to.tick(name, agent),
            NodeKind::Composite(_) => Status::Failure,
        }
    }

    fn tick_selector(&mut self, id: NodeId, ctx: &TickContext, agent: &mut A) -> Status {
        let count = self.nodes[id.0].children.len();
        for i in 0..count {
            let child = self.nodes[id.0].children[i];
            self.set_composite(id, Composite::Selector { last_index: Some(i) });
            let status = self.tick_node(child, ctx, agent);
            if status != Status::Failure {
                return status;
            }
        }
        self.set_composite(id, Composite::Selector { last_index: None });
        Status::Failure
    }

    fn tick_sequence(
        &mut self,
        id: NodeId,
        mut cursor: usize,
        ctx: &TickContext,
        agent: &mut A,
    ) -> Status {
        let count = self.nodes[id.0].children.len();
        while cursor < count {
            let child = self.nodes[id.0].children[cursor];
            match self.tick_node(child, ctx, agent) {
                Status::Running => {
                    self.set_composite(id, Composite::Sequence { cursor });
                    return Status::Running;
                }
                Status::Failure => {
                    self.set_composite(id, Composite::Sequence { cursor: 0 });
                    return Status::Failure;
                }
                _ => cursor += 1,
            }
        }
        self.set_composite(id, Composite::Sequence { cursor: 0 });
        Status::Success
    }

    fn set_composite(&mut self, id: NodeId, composite: Composite) {
        self.nodes[id.0].kind = NodeKind::Composite(composite);
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let slot = &self.nodes[id.0];
        write!(f, "{:indent$}{}", "", slot.name, indent = depth * 2)?;

        let current_child = self
            .selector_last_index(id)
            .and_then(|i| slot.children.get(i))
            .map(|child| self.nodes[child.0].name.as_str());
        match (current_child, slot.status) {
            (Some(child), _) => write!(f, " -> {child}")?,
            (None, Status::Running | Status::Success) => write!(f, " [{}]", slot.status)?,
            _ => {}
        }
        writeln!(f)?;

        for &child in &slot.children {
            self.write_outline(f, child, depth + 1)?;
        }
        Ok(())
    }
}

fn flatten<A>(
    nodes: &mut Vec<Slot<A>>,
    node: Node<A>,
    parent: Option<NodeId>,
) -> Result<NodeId, BuildError> {
    let id = NodeId(nodes.len());
    let (name, kind, children) = match node {
        Node::Selector { name, children } => (
            name,
            NodeKind::Composite(Composite::Selector { last_index: None }),
            children,
        ),
        Node::Sequence { name, children } => (
            name,
            NodeKind::Composite(Composite::Sequence { cursor: 0 }),
            children,
        ),
        Node::Action { name, action } => {
            let duration = action.duration();
            if !duration.is_finite() || duration < 0.0 {
                return Err(BuildError::InvalidDuration { name, duration });
            }
            (name, NodeKind::Action(action), Vec::new())
        }
        Node::Condition { name, condition } => (name, NodeKind::Condition(condition), Vec::new()),
        Node::MoveTo { name, move_to } => (name, NodeKind::MoveTo(move_to), Vec::new()),
    };

    if !kind.is_leaf() && children.is_empty() {
        return Err(BuildError::EmptyComposite { name });
    }

    nodes.push(Slot {
        name,
        status: Status::Inactive,
        parent,
        children: Vec::with_capacity(children.len()),
        kind,
    });

    for child in children {
        let child_id = flatten(nodes, child, Some(id))?;
        nodes[id.0].children.push(child_id);
    }
    Ok(id)
}

impl<A> fmt::Display for BehaviorTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            return Ok(());
        }
        self.write_outline(f, self.root(), 0)
    }
}

impl<A> fmt::Debug for BehaviorTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("nodes", &self.nodes.len())
            .field("last_status", &self.last_status())
            .finish()
    }
}

impl<A> Policy<A> for BehaviorTree<A>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A) {
        BehaviorTree::tick(self, ctx, agent);
    }
}
