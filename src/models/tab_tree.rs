//! Tab containment tree: top-level containers, groups and items.

use slotmap::{new_key_type, SlotMap};
use std::fmt;

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    PinnedRegion,
    TabStrip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    InvalidNodeId,
    NotAContainer,
    NotAnItem,
    NotAGroup,
    MoveIntoDescendant,
    Detached,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::InvalidNodeId => write!(f, "invalid node id"),
            TreeError::NotAContainer => write!(f, "node cannot hold children"),
            TreeError::NotAnItem => write!(f, "node is not an item"),
            TreeError::NotAGroup => write!(f, "node is not a group"),
            TreeError::MoveIntoDescendant => write!(f, "cannot move node into its own subtree"),
            TreeError::Detached => write!(f, "node is not attached to a container"),
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug, Clone, Default)]
pub struct Item {
    pub name: String,
    pub pinned: bool,
    pub selected: bool,
    pub multiselected: bool,
    pub pinned_changed: bool,
    pub had_pinned_changed: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, pinned: bool) -> Self {
        Self {
            name: name.into(),
            pinned,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Plain,
    Folder { nesting_level: u32 },
}

#[derive(Debug, Clone)]
pub struct Group {
    pub id: String,
    pub label: String,
    pub pinned: bool,
    pub kind: GroupKind,
}

impl Group {
    pub fn plain(id: impl Into<String>, label: impl Into<String>, pinned: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            pinned,
            kind: GroupKind::Plain,
        }
    }

    pub fn folder(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            pinned: true,
            kind: GroupKind::Folder { nesting_level: 0 },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, GroupKind::Folder { .. })
    }

    pub fn nesting_level(&self) -> Option<u32> {
        match self.kind {
            GroupKind::Folder { nesting_level } => Some(nesting_level),
            GroupKind::Plain => None,
        }
    }
}

#[derive(Debug, Clone)]
enum NodeData {
    Container(ContainerKind),
    Separator,
    Group(Group),
    Item(Item),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    fn holds_children(&self) -> bool {
        matches!(self.data, NodeData::Container(_) | NodeData::Group(_))
    }
}

pub struct TabTree {
    arena: SlotMap<NodeId, Node>,
    tab_strip: NodeId,
    pinned_region: Option<NodeId>,
    separator: Option<NodeId>,
    focused: Option<NodeId>,
}

impl TabTree {
    /// Tree with only the standard tab strip.
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let tab_strip = arena.insert(Node::new(NodeData::Container(ContainerKind::TabStrip)));
        Self {
            arena,
            tab_strip,
            pinned_region: None,
            separator: None,
            focused: None,
        }
    }

    /// Tree with a pinned region (ending in a separator) ahead of the tab strip.
    pub fn with_pinned_region() -> Self {
        let mut tree = Self::new();
        let region = tree
            .arena
            .insert(Node::new(NodeData::Container(ContainerKind::PinnedRegion)));
        let separator = tree.arena.insert(Node::new(NodeData::Separator));
        tree.link_last(region, separator);
        tree.pinned_region = Some(region);
        tree.separator = Some(separator);
        tree
    }

    pub fn tab_strip(&self) -> NodeId {
        self.tab_strip
    }

    pub fn pinned_region(&self) -> Option<NodeId> {
        self.pinned_region.filter(|id| self.arena.contains_key(*id))
    }

    /// Separator marker, only while it still sits inside the pinned region.
    pub fn separator(&self) -> Option<NodeId> {
        let region = self.pinned_region()?;
        self.separator
            .filter(|id| self.arena.get(*id).is_some_and(|n| n.parent == Some(region)))
    }

    pub fn remove_separator(&mut self) {
        if let Some(separator) = self.separator.take() {
            self.unlink(separator);
            self.arena.remove(separator);
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn item(&self, id: NodeId) -> Option<&Item> {
        match &self.arena.get(id)?.data {
            NodeData::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn item_mut(&mut self, id: NodeId) -> Option<&mut Item> {
        match &mut self.arena.get_mut(id)?.data {
            NodeData::Item(item) => Some(item),
            _ => None,
        }
    }

    pub fn group(&self, id: NodeId) -> Option<&Group> {
        match &self.arena.get(id)?.data {
            NodeData::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut Group> {
        match &mut self.arena.get_mut(id)?.data {
            NodeData::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_folder(&self, id: NodeId) -> bool {
        self.group(id).is_some_and(Group::is_folder)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate parent when it is a group.
    pub fn parent_group(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.group(*p).is_some())
    }

    /// Nearest strict ancestor that is a folder.
    pub fn enclosing_folder(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(node) = current {
            if self.is_folder(node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Nesting level a folder placed at `id` should carry.
    pub fn folder_depth(&self, id: NodeId) -> u32 {
        self.enclosing_folder(id)
            .and_then(|f| self.group(f))
            .and_then(Group::nesting_level)
            .map_or(0, |level| level + 1)
    }

    /// Whether the ancestor chain reaches a top-level container.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(node) = self.arena.get(current) {
            match node.parent {
                Some(parent) => current = parent,
                None => return matches!(node.data, NodeData::Container(_)),
            }
        }
        false
    }

    /// Items anywhere below `id`, in document order.
    pub fn descendant_items(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.item(node).is_some() {
                result.push(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        result
    }

    /// Folders in the subtree rooted at `id`, `id` included.
    pub fn subtree_folders(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if self.is_folder(node) {
                result.push(node);
            }
            stack.extend(self.children(node).iter().copied());
        }
        result
    }

    pub fn item_count(&self, id: NodeId) -> usize {
        self.descendant_items(id).len()
    }

    /// Every item in the tree, in document order (pinned region first).
    pub fn items(&self) -> Vec<NodeId> {
        let mut all = Vec::new();
        if let Some(region) = self.pinned_region() {
            all.extend(self.descendant_items(region));
        }
        all.extend(self.descendant_items(self.tab_strip));
        all
    }

    pub fn find_group(&self, group_id: &str) -> Option<NodeId> {
        self.arena.iter().find_map(|(id, node)| match &node.data {
            NodeData::Group(group) if group.id == group_id => Some(id),
            _ => None,
        })
    }

    pub fn find_item(&self, name: &str) -> Option<NodeId> {
        self.arena.iter().find_map(|(id, node)| match &node.data {
            NodeData::Item(item) if item.name == name => Some(id),
            _ => None,
        })
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|id| self.item(*id).is_some())
    }

    pub fn set_focused(&mut self, id: Option<NodeId>) {
        if let Some(prev) = self.focused {
            if let Some(item) = self.item_mut(prev) {
                item.selected = false;
            }
        }
        self.focused = id;
        if let Some(item) = id.and_then(|i| self.item_mut(i)) {
            item.selected = true;
        }
    }

    /// Creates a detached item.
    pub fn create_item(&mut self, item: Item) -> NodeId {
        self.arena.insert(Node::new(NodeData::Item(item)))
    }

    /// Creates a detached group.
    pub fn create_group(&mut self, group: Group) -> NodeId {
        self.arena.insert(Node::new(NodeData::Group(group)))
    }

    /// Moves `id` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, id: NodeId) -> Result<(), TreeError> {
        self.check_move(parent, id)?;
        self.unlink(id);
        self.link_last(parent, id);
        Ok(())
    }

    /// Moves `id` right before `anchor` under the anchor's parent.
    pub fn insert_before(&mut self, anchor: NodeId, id: NodeId) -> Result<(), TreeError> {
        let parent = self.parent(anchor).ok_or(TreeError::Detached)?;
        self.check_move(parent, id)?;
        if anchor == id {
            return Ok(());
        }
        self.unlink(id);
        let index = self.arena[parent]
            .children
            .iter()
            .position(|c| *c == anchor)
            .ok_or(TreeError::InvalidNodeId)?;
        self.arena[parent].children.insert(index, id);
        self.arena[id].parent = Some(parent);
        Ok(())
    }

    /// Unlinks `id` from its parent; the subtree stays in the arena.
    pub fn detach(&mut self, id: NodeId) -> Result<(), TreeError> {
        if !self.arena.contains_key(id) {
            return Err(TreeError::InvalidNodeId);
        }
        self.unlink(id);
        Ok(())
    }

    /// Unlinks `id` and frees its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.arena.get(id).ok_or(TreeError::InvalidNodeId)?;
        if matches!(node.data, NodeData::Container(_)) {
            return Err(TreeError::NotAGroup);
        }
        self.unlink(id);
        self.recursive_remove(id);
        Ok(())
    }

    fn recursive_remove(&mut self, id: NodeId) {
        if let Some(node) = self.arena.remove(id) {
            if self.focused == Some(id) {
                self.focused = None;
            }
            for child in node.children {
                self.recursive_remove(child);
            }
        }
    }

    /// Sets nesting levels of every folder in the subtree rooted at `id`.
    pub fn renumber_folders(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if self.is_folder(node) {
                let level = self.folder_depth(node);
                if let Some(group) = self.group_mut(node) {
                    group.kind = GroupKind::Folder {
                        nesting_level: level,
                    };
                }
            }
            stack.extend(self.children(node).iter().copied());
        }
    }

    fn check_move(&self, parent: NodeId, id: NodeId) -> Result<(), TreeError> {
        let parent_node = self.arena.get(parent).ok_or(TreeError::InvalidNodeId)?;
        if !parent_node.holds_children() {
            return Err(TreeError::NotAContainer);
        }
        if !self.arena.contains_key(id) {
            return Err(TreeError::InvalidNodeId);
        }
        if parent == id || self.is_ancestor(id, parent) {
            return Err(TreeError::MoveIntoDescendant);
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: NodeId, mut descendant: NodeId) -> bool {
        while let Some(node) = self.arena.get(descendant) {
            if let Some(parent) = node.parent {
                if parent == ancestor {
                    return true;
                }
                descendant = parent;
            } else {
                break;
            }
        }
        false
    }

    fn unlink(&mut self, id: NodeId) {
        let Some(parent) = self.arena.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.retain(|c| *c != id);
        }
    }

    fn link_last(&mut self, parent: NodeId, id: NodeId) {
        self.arena[parent].children.push(id);
        self.arena[id].parent = Some(parent);
    }
}

impl Default for TabTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub text: String,
}

impl TabTree {
    /// Indented outline of the attached tree, containers included.
    pub fn flatten_for_view(&self) -> Vec<TabTreeRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> = Vec::new();
        stack.push((self.tab_strip, 0));
        if let Some(region) = self.pinned_region() {
            stack.push((region, 0));
        }

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            let text = match &node.data {
                NodeData::Container(ContainerKind::PinnedRegion) => "[pinned]".to_string(),
                NodeData::Container(ContainerKind::TabStrip) => "[tabs]".to_string(),
                NodeData::Separator => "----".to_string(),
                NodeData::Group(group) => match group.kind {
                    GroupKind::Folder { nesting_level } => format!(
                        "folder {} \"{}\" level={} pinned={}",
                        group.id, group.label, nesting_level, group.pinned
                    ),
                    GroupKind::Plain => format!(
                        "group {} \"{}\" pinned={}",
                        group.id, group.label, group.pinned
                    ),
                },
                NodeData::Item(item) => format!(
                    "{}{}{}",
                    item.name,
                    if item.pinned { " (pinned)" } else { "" },
                    if item.selected { " *" } else { "" }
                ),
            };
            result.push(TabTreeRow { id, depth, text });
            for child in node.children.iter().rev() {
                stack.push((*child, depth + 1));
            }
        }

        result
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/tab_tree.rs"]
mod tests;
