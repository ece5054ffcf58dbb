//! The AST node model.
//!
//! All nodes of one compilation unit live in a [`Tree`], an arena indexed by
//! generation-checked [`NodeId`] handles. Child lists are the owning edges of
//! the tree. Parent pointers, links, variables and labels are plain handles
//! that are validated whenever they are read: a handle whose node has been
//! released resolves to nothing instead of dangling.
//!
//! Every operation that can violate the node contract returns
//! [`NodeResult`]. Such errors describe a bug in the caller, never a problem
//! in the parsed source.

mod attribute;
mod convert;
mod display;
mod error;
mod flag;
mod link;
mod node_type;
mod value;

pub use attribute::{Attribute, AttributeGroup, AttributeSet};
pub(crate) use convert::format_float64;
pub use display::TreeDisplay;
pub use error::NodeError;
pub use flag::{Flag, FlagSet};
pub use link::Link;
pub use node_type::NodeType;
pub use value::Value;

use std::fmt;

use as2js_core::{Diagnostic, ErrorCode, Position};
use log::{debug, warn};
use rustc_hash::FxHashMap;

pub type NodeResult<T> = Result<T, NodeError>;

/// Handle to a node inside a [`Tree`].
///
/// A handle stays valid until its node is released. After that, every
/// lookup through it fails with [`NodeError::StaleHandle`] even if the slot
/// has been reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// One node of the tree.
///
/// Nodes are only reachable through a [`Tree`]; the accessors here are the
/// read-only half of the contract, mutation goes through the tree so that
/// parent and child edges stay consistent.
#[derive(Debug, Clone)]
pub struct Node {
    node_type: NodeType,
    position: Position,
    value: Value,
    flags: FlagSet,
    attributes: AttributeSet,
    switch_operator: NodeType,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    links: [Option<NodeId>; Link::COUNT],
    variables: Vec<NodeId>,
    labels: FxHashMap<String, NodeId>,
    lock: u32,
}

impl Node {
    fn new(node_type: NodeType, position: Position) -> Self {
        Self {
            node_type,
            position,
            value: Value::None,
            flags: FlagSet::empty(),
            attributes: AttributeSet::empty(),
            switch_operator: NodeType::Unknown,
            children: Vec::new(),
            parent: None,
            links: [None; Link::COUNT],
            variables: Vec::new(),
            labels: FxHashMap::default(),
            lock: 0,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    pub fn attributes(&self) -> AttributeSet {
        self.attributes
    }

    pub fn is_locked(&self) -> bool {
        self.lock > 0
    }

    pub fn int64(&self) -> NodeResult<i64> {
        self.expect_value(NodeType::Int64 == self.node_type, "int64")?;
        Ok(self.value.as_int64().unwrap_or(0))
    }

    pub fn float64(&self) -> NodeResult<f64> {
        self.expect_value(NodeType::Float64 == self.node_type, "float64")?;
        Ok(self.value.as_float64().unwrap_or(0.0))
    }

    pub fn string(&self) -> NodeResult<&str> {
        self.expect_value(self.node_type.has_string_value(), "string")?;
        Ok(self.value.as_str().unwrap_or(""))
    }

    pub fn flag(&self, flag: Flag) -> NodeResult<bool> {
        self.check_flag(flag)?;
        Ok(self.flags.contains(flag.bit()))
    }

    pub fn attribute(&self, attribute: Attribute) -> NodeResult<bool> {
        self.check_attribute(attribute)?;
        Ok(self.attributes.contains(attribute.bit()))
    }

    /// The comparison operator of a `switch ... with (op)` statement.
    pub fn switch_operator(&self) -> NodeResult<NodeType> {
        self.expect_type(NodeType::Switch)?;
        Ok(self.switch_operator)
    }

    // =========================================
    // Literal predicates
    // =========================================

    pub fn is_int64(&self) -> bool {
        self.node_type == NodeType::Int64
    }

    pub fn is_float64(&self) -> bool {
        self.node_type == NodeType::Float64
    }

    pub fn is_number(&self) -> bool {
        matches!(self.node_type, NodeType::Int64 | NodeType::Float64)
    }

    pub fn is_nan(&self) -> bool {
        self.node_type == NodeType::Float64 && self.value.as_float64().is_some_and(f64::is_nan)
    }

    pub fn is_true(&self) -> bool {
        self.node_type == NodeType::True
    }

    pub fn is_false(&self) -> bool {
        self.node_type == NodeType::False
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.node_type, NodeType::True | NodeType::False)
    }

    pub fn is_string(&self) -> bool {
        self.node_type == NodeType::String
    }

    pub fn is_null(&self) -> bool {
        self.node_type == NodeType::Null
    }

    pub fn is_undefined(&self) -> bool {
        self.node_type == NodeType::Undefined
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self.node_type, NodeType::Identifier | NodeType::Videntifier)
    }

    pub fn is_literal(&self) -> bool {
        self.node_type.is_literal()
    }

    fn expect_type(&self, expected: NodeType) -> NodeResult<()> {
        if self.node_type == expected {
            Ok(())
        } else {
            Err(NodeError::UnexpectedType {
                expected,
                actual: self.node_type,
            })
        }
    }

    fn expect_value(&self, allowed: bool, expected: &'static str) -> NodeResult<()> {
        if allowed {
            Ok(())
        } else {
            Err(NodeError::ValueNotAllowed {
                node_type: self.node_type,
                expected,
            })
        }
    }

    fn check_flag(&self, flag: Flag) -> NodeResult<()> {
        if flag.is_allowed_on(self.node_type) {
            Ok(())
        } else {
            Err(NodeError::FlagNotAllowed {
                flag,
                node_type: self.node_type,
            })
        }
    }

    fn check_attribute(&self, attribute: Attribute) -> NodeResult<()> {
        if attribute.is_allowed_on(self.node_type) {
            Ok(())
        } else {
            Err(NodeError::AttributeNotAllowed {
                attribute,
                node_type: self.node_type,
            })
        }
    }

    fn check_unlocked(&self) -> NodeResult<()> {
        if self.lock > 0 {
            Err(NodeError::Locked {
                node_type: self.node_type,
            })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena owning every node of one or more compilation units.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    messages: Vec<Diagnostic>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocate a detached node.
    pub fn create(&mut self, node_type: NodeType, position: Position) -> NodeId {
        self.insert_node(Node::new(node_type, position))
    }

    fn insert_node(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Allocate a detached node of another type at the position of `id`.
    pub fn create_replacement(&mut self, id: NodeId, node_type: NodeType) -> NodeResult<NodeId> {
        let position = self.node(id)?.position.clone();
        Ok(self.create(node_type, position))
    }

    /// Copy a literal node: type, position, value, flags and attributes.
    ///
    /// Structural nodes cannot be cloned.
    pub fn clone_basic_node(&mut self, id: NodeId) -> NodeResult<NodeId> {
        let source = self.node(id)?;
        if !source.node_type.is_literal() {
            return Err(NodeError::NotLiteral {
                node_type: source.node_type,
            });
        }
        let mut copy = Node::new(source.node_type, source.position.clone());
        copy.value = source.value.clone();
        copy.flags = source.flags;
        copy.attributes = source.attributes;
        Ok(self.insert_node(copy))
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node(&self, id: NodeId) -> NodeResult<&Node> {
        self.get(id).ok_or(NodeError::StaleHandle(id))
    }

    fn node_mut(&mut self, id: NodeId) -> NodeResult<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(NodeError::StaleHandle(id))
    }

    fn node_unlocked(&mut self, id: NodeId) -> NodeResult<&mut Node> {
        let node = self.node_mut(id)?;
        node.check_unlocked()?;
        Ok(node)
    }

    pub fn node_type(&self, id: NodeId) -> NodeResult<NodeType> {
        Ok(self.node(id)?.node_type)
    }

    pub fn position(&self, id: NodeId) -> NodeResult<&Position> {
        Ok(&self.node(id)?.position)
    }

    /// Drain the messages recorded by the tree itself, such as refused
    /// attribute combinations.
    pub fn take_messages(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.messages)
    }

    // =========================================
    // Values
    // =========================================

    pub fn int64(&self, id: NodeId) -> NodeResult<i64> {
        self.node(id)?.int64()
    }

    pub fn float64(&self, id: NodeId) -> NodeResult<f64> {
        self.node(id)?.float64()
    }

    pub fn string(&self, id: NodeId) -> NodeResult<&str> {
        self.node(id)?.string()
    }

    pub fn set_int64(&mut self, id: NodeId, value: i64) -> NodeResult<()> {
        let node = self.node_mut(id)?;
        node.expect_value(node.node_type == NodeType::Int64, "int64")?;
        node.value = Value::Int64(value);
        Ok(())
    }

    pub fn set_float64(&mut self, id: NodeId, value: f64) -> NodeResult<()> {
        let node = self.node_mut(id)?;
        node.expect_value(node.node_type == NodeType::Float64, "float64")?;
        node.value = Value::Float64(value);
        Ok(())
    }

    pub fn set_string(&mut self, id: NodeId, value: impl Into<String>) -> NodeResult<()> {
        let node = self.node_mut(id)?;
        node.expect_value(node.node_type.has_string_value(), "string")?;
        node.value = Value::String(value.into());
        Ok(())
    }

    // =========================================
    // Flags and attributes
    // =========================================

    pub fn flag(&self, id: NodeId, flag: Flag) -> NodeResult<bool> {
        self.node(id)?.flag(flag)
    }

    pub fn set_flag(&mut self, id: NodeId, flag: Flag, value: bool) -> NodeResult<()> {
        let node = self.node_mut(id)?;
        node.check_flag(flag)?;
        node.flags.set(flag.bit(), value);
        Ok(())
    }

    pub fn attribute(&self, id: NodeId, attribute: Attribute) -> NodeResult<bool> {
        self.node(id)?.attribute(attribute)
    }

    /// Set or clear an attribute.
    ///
    /// Setting an attribute while another member of its exclusion group is
    /// already set is refused: an error message is recorded, the node keeps
    /// its current attributes, and `Ok(false)` is returned.
    pub fn set_attribute(&mut self, id: NodeId, attribute: Attribute, value: bool) -> NodeResult<bool> {
        let node = self.node_mut(id)?;
        node.check_attribute(attribute)?;
        if value {
            if let Some(group) = attribute.group() {
                let others = group.members() - attribute.bit();
                if node.attributes.intersects(others) {
                    let diagnostic = Diagnostic::error(
                        ErrorCode::InvalidAttributes,
                        node.position.clone(),
                        format!(
                            "the attributes {} are mutually exclusive; only one of them can be used",
                            group.description()
                        ),
                    );
                    warn!("{}", diagnostic);
                    self.messages.push(diagnostic);
                    return Ok(false);
                }
            }
        }
        node.attributes.set(attribute.bit(), value);
        Ok(true)
    }

    pub fn switch_operator(&self, id: NodeId) -> NodeResult<NodeType> {
        self.node(id)?.switch_operator()
    }

    pub fn set_switch_operator(&mut self, id: NodeId, operator: NodeType) -> NodeResult<()> {
        let node = self.node_mut(id)?;
        node.expect_type(NodeType::Switch)?;
        node.switch_operator = operator;
        Ok(())
    }

    // =========================================
    // Tree structure
    // =========================================

    /// Current parent of `id`, or `None` for a root.
    pub fn parent(&self, id: NodeId) -> NodeResult<Option<NodeId>> {
        Ok(self.node(id)?.parent.filter(|parent| self.contains(*parent)))
    }

    pub fn children(&self, id: NodeId) -> NodeResult<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn children_count(&self, id: NodeId) -> NodeResult<usize> {
        Ok(self.node(id)?.children.len())
    }

    pub fn child(&self, id: NodeId, index: usize) -> NodeResult<NodeId> {
        let children = &self.node(id)?.children;
        children
            .get(index)
            .copied()
            .ok_or(NodeError::IndexOutOfRange {
                index,
                len: children.len(),
            })
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> NodeResult<()> {
        self.attach(parent, None, child)
    }

    /// Insert `child` so that it ends up at `index` in the child list of
    /// `parent`. Indices count children after `child` left its old parent.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> NodeResult<()> {
        self.attach(parent, Some(index), child)
    }

    /// Replace the child at `index`; the previous child is released.
    pub fn set_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> NodeResult<()> {
        let old = self.child(parent, index)?;
        if old == child {
            return Ok(());
        }
        self.check_subtree_unlocked(old)?;
        self.remove_child(parent, index)?;
        if let Err(err) = self.insert_child(parent, index, child) {
            // put the previous child back in place
            self.node_mut(parent)?.children.insert(index, old);
            self.node_mut(old)?.parent = Some(parent);
            return Err(err);
        }
        self.release(old)
    }

    /// Detach the child at `index` and return it, still allocated.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> NodeResult<NodeId> {
        let node = self.node_unlocked(parent)?;
        let len = node.children.len();
        if index >= len {
            return Err(NodeError::IndexOutOfRange { index, len });
        }
        let child = node.children.remove(index);
        if let Ok(child_node) = self.node_mut(child) {
            child_node.parent = None;
        }
        Ok(child)
    }

    /// Detach the child at `index` and release its whole subtree.
    pub fn delete_child(&mut self, parent: NodeId, index: usize) -> NodeResult<()> {
        let child = self.child(parent, index)?;
        self.check_subtree_unlocked(child)?;
        self.remove_child(parent, index)?;
        self.release(child)
    }

    /// Put `replacement` where `id` stands in its parent.
    ///
    /// The parent may be locked: the child count does not change. `id` is
    /// detached but stays allocated so the caller can keep using it.
    pub fn replace_with(&mut self, id: NodeId, replacement: NodeId) -> NodeResult<()> {
        let parent = self.parent(id)?.ok_or(NodeError::NoParent {
            node_type: self.node_type(id)?,
        })?;
        let offset = self.get_offset(id)?;
        let replacement_node = self.node(replacement)?;
        if !replacement_node.node_type.can_be_child() {
            return Err(NodeError::InvalidChild {
                node_type: replacement_node.node_type,
            });
        }
        if self.parent(replacement)?.is_some() {
            return Err(NodeError::StillAttached {
                node_type: replacement_node.node_type,
            });
        }
        self.check_no_cycle(parent, replacement)?;

        self.node_mut(parent)?.children[offset] = replacement;
        self.node_mut(replacement)?.parent = Some(parent);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Index of `id` in its parent's child list.
    pub fn get_offset(&self, id: NodeId) -> NodeResult<usize> {
        let node_type = self.node_type(id)?;
        let parent = self.parent(id)?.ok_or(NodeError::NoParent { node_type })?;
        self.node(parent)?
            .children
            .iter()
            .position(|child| *child == id)
            .ok_or(NodeError::NoParent { node_type })
    }

    pub fn find_first_child(&self, id: NodeId, node_type: NodeType) -> NodeResult<Option<NodeId>> {
        self.find_child_from(id, 0, node_type)
    }

    /// The next child of type `node_type` after the child `after`.
    pub fn find_next_child(
        &self,
        id: NodeId,
        after: NodeId,
        node_type: NodeType,
    ) -> NodeResult<Option<NodeId>> {
        let start = self
            .node(id)?
            .children
            .iter()
            .position(|child| *child == after)
            .map_or(0, |offset| offset + 1);
        self.find_child_from(id, start, node_type)
    }

    fn find_child_from(&self, id: NodeId, start: usize, node_type: NodeType) -> NodeResult<Option<NodeId>> {
        Ok(self.node(id)?.children[start..]
            .iter()
            .copied()
            .find(|child| self.get(*child).is_some_and(|n| n.node_type == node_type)))
    }

    /// The single reparenting primitive behind every insertion.
    fn attach(&mut self, parent: NodeId, index: Option<usize>, child: NodeId) -> NodeResult<()> {
        let parent_node = self.node(parent)?;
        parent_node.check_unlocked()?;
        if !parent_node.node_type.can_be_parent() {
            return Err(NodeError::InvalidParent {
                node_type: parent_node.node_type,
            });
        }
        let mut len = parent_node.children.len();

        let child_node = self.node(child)?;
        if !child_node.node_type.can_be_child() {
            return Err(NodeError::InvalidChild {
                node_type: child_node.node_type,
            });
        }
        self.check_no_cycle(parent, child)?;

        let old_parent = self.parent(child)?;
        let mut old_offset = None;
        if let Some(old_parent) = old_parent {
            let old_node = self.node(old_parent)?;
            old_node.check_unlocked()?;
            old_offset = old_node.children.iter().position(|c| *c == child);
            if old_parent == parent {
                len -= 1;
            }
        }
        let index = index.unwrap_or(len);
        if index > len {
            return Err(NodeError::IndexOutOfRange { index, len });
        }

        if let (Some(old_parent), Some(offset)) = (old_parent, old_offset) {
            self.node_mut(old_parent)?.children.remove(offset);
        }
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Fails if `child` is `parent` or one of its ancestors.
    fn check_no_cycle(&self, parent: NodeId, child: NodeId) -> NodeResult<()> {
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(NodeError::Cycle {
                    node_type: self.node_type(child)?,
                });
            }
            cursor = self.parent(id)?;
        }
        Ok(())
    }

    // =========================================
    // Links, variables and labels
    // =========================================

    pub fn link(&self, id: NodeId, link: Link) -> NodeResult<Option<NodeId>> {
        Ok(self.node(id)?.links[link.index()].filter(|target| self.contains(*target)))
    }

    /// Set a link. A link that is already set must be cleared first.
    pub fn set_link(&mut self, id: NodeId, link: Link, target: NodeId) -> NodeResult<()> {
        self.node(target)?;
        if self.link(id, link)?.is_some() {
            return Err(NodeError::LinkAlreadySet {
                link,
                node_type: self.node_type(id)?,
            });
        }
        self.node_mut(id)?.links[link.index()] = Some(target);
        Ok(())
    }

    pub fn clear_link(&mut self, id: NodeId, link: Link) -> NodeResult<()> {
        self.node_mut(id)?.links[link.index()] = None;
        Ok(())
    }

    pub fn add_variable(&mut self, id: NodeId, variable: NodeId) -> NodeResult<()> {
        let actual = self.node_type(variable)?;
        if actual != NodeType::Variable {
            return Err(NodeError::UnexpectedType {
                expected: NodeType::Variable,
                actual,
            });
        }
        self.node_mut(id)?.variables.push(variable);
        Ok(())
    }

    pub fn variable_count(&self, id: NodeId) -> NodeResult<usize> {
        Ok(self.node(id)?.variables.len())
    }

    pub fn variable(&self, id: NodeId, index: usize) -> NodeResult<NodeId> {
        let variables = &self.node(id)?.variables;
        let variable = *variables.get(index).ok_or(NodeError::IndexOutOfRange {
            index,
            len: variables.len(),
        })?;
        self.node(variable)?;
        Ok(variable)
    }

    /// Register `label` with the function that contains it, keyed by name.
    pub fn add_label(&mut self, function: NodeId, label: NodeId) -> NodeResult<()> {
        self.node(function)?.expect_type(NodeType::Function)?;
        let label_node = self.node(label)?;
        label_node.expect_type(NodeType::Label)?;
        let name = label_node.string()?.to_string();
        self.node_mut(function)?.labels.insert(name, label);
        Ok(())
    }

    pub fn find_label(&self, function: NodeId, name: &str) -> NodeResult<Option<NodeId>> {
        let node = self.node(function)?;
        node.expect_type(NodeType::Function)?;
        Ok(node
            .labels
            .get(name)
            .copied()
            .filter(|label| self.contains(*label)))
    }

    // =========================================
    // Locking
    // =========================================

    pub fn lock(&mut self, id: NodeId) -> NodeResult<()> {
        self.node_mut(id)?.lock += 1;
        Ok(())
    }

    pub fn unlock(&mut self, id: NodeId) -> NodeResult<()> {
        let node = self.node_mut(id)?;
        if node.lock == 0 {
            return Err(NodeError::NotLocked {
                node_type: node.node_type,
            });
        }
        node.lock -= 1;
        Ok(())
    }

    pub fn is_locked(&self, id: NodeId) -> NodeResult<bool> {
        Ok(self.node(id)?.is_locked())
    }

    /// Run `f` with `id` locked against structural changes.
    pub fn with_lock<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Tree) -> R) -> NodeResult<R> {
        self.lock(id)?;
        let result = f(self);
        self.unlock(id)?;
        Ok(result)
    }

    fn check_subtree_unlocked(&self, id: NodeId) -> NodeResult<()> {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current)?;
            node.check_unlocked()?;
            stack.extend(node.children.iter().copied());
        }
        Ok(())
    }

    // =========================================
    // Release
    // =========================================

    /// Free a detached node and its whole subtree.
    pub fn release(&mut self, id: NodeId) -> NodeResult<()> {
        if self.parent(id)?.is_some() {
            return Err(NodeError::StillAttached {
                node_type: self.node_type(id)?,
            });
        }
        self.check_subtree_unlocked(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.free_slot(current) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    /// Free every node not reachable from `roots`.
    ///
    /// Reachability follows children, links, variables and labels. Locked
    /// nodes are always kept. Returns the number of nodes freed.
    pub fn collect_garbage(&mut self, roots: &[NodeId]) -> usize {
        let mut marked = vec![false; self.slots.len()];
        let mut stack: Vec<NodeId> = roots.iter().copied().filter(|id| self.contains(*id)).collect();
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.node.as_ref().is_some_and(Node::is_locked) {
                stack.push(NodeId {
                    index: index as u32,
                    generation: slot.generation,
                });
            }
        }

        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            if std::mem::replace(&mut marked[id.index()], true) {
                continue;
            }
            stack.extend(node.children.iter().copied());
            stack.extend(node.links.iter().flatten().copied());
            stack.extend(node.variables.iter().copied());
            stack.extend(node.labels.values().copied());
        }

        let mut freed = 0;
        for (index, is_marked) in marked.iter().enumerate() {
            if !is_marked && self.slots[index].node.is_some() {
                let id = NodeId {
                    index: index as u32,
                    generation: self.slots[index].generation,
                };
                self.free_slot(id);
                freed += 1;
            }
        }

        // kept nodes whose parent was collected become roots
        let orphans: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let parent = slot.node.as_ref()?.parent?;
                (!self.contains(parent)).then_some(index)
            })
            .collect();
        for index in orphans {
            if let Some(node) = self.slots[index].node.as_mut() {
                node.parent = None;
            }
        }
        debug!("collected {} nodes, {} live", freed, self.live);
        freed
    }

    fn free_slot(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }

    // =========================================
    // Analysis
    // =========================================

    /// Whether evaluating the expression rooted at `id` may change state.
    pub fn has_side_effects(&self, id: NodeId) -> NodeResult<bool> {
        let node = self.node(id)?;
        match node.node_type {
            t if t.is_assignment() => Ok(true),
            NodeType::Call
            | NodeType::Decrement
            | NodeType::Delete
            | NodeType::Increment
            | NodeType::New
            | NodeType::PostDecrement
            | NodeType::PostIncrement => Ok(true),
            NodeType::Function => Ok(false),
            _ => {
                for child in &node.children {
                    if self.has_side_effects(*child)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// An indented dump of the subtree rooted at `id`.
    pub fn display(&self, id: NodeId) -> TreeDisplay<'_> {
        TreeDisplay::new(self, id)
    }
}
