//! In-memory tab host: owns the tree and raises lifecycle events on the bus
//! the way a browser window would.

use crate::kernel::bus::EventBusSender;
use crate::kernel::event::LifecycleEvent;
use crate::kernel::services::ports::{HostError, TabHost};
use crate::models::{Group, Item, NodeId, TabTree, TreeError};

pub struct LocalTabHost {
    tree: TabTree,
    events: EventBusSender,
    next_group_seq: u64,
}

impl LocalTabHost {
    pub fn new(tree: TabTree, events: EventBusSender) -> Self {
        Self {
            tree,
            events,
            next_group_seq: 0,
        }
    }

    /// Opens an item at the end of the tab strip, or of the pinned region
    /// (ahead of its separator) when `pinned`.
    pub fn open_item(&mut self, name: &str, pinned: bool) -> NodeId {
        let id = self.tree.create_item(Item::new(name, pinned));
        let placed = match (pinned, self.tree.separator(), self.tree.pinned_region()) {
            (true, Some(separator), _) => self.tree.insert_before(separator, id),
            (true, None, Some(region)) => self.tree.append_child(region, id),
            _ => {
                let strip = self.tree.tab_strip();
                self.tree.append_child(strip, id)
            }
        };
        if let Err(e) = placed {
            tracing::warn!(name, error = %e, "failed to place new item");
        }
        id
    }

    pub fn close_item(&mut self, item: NodeId) -> Result<(), HostError> {
        if self.tree.item(item).is_none() {
            return Err(TreeError::NotAnItem.into());
        }
        let group = self.tree.parent_group(item);
        self.tree.remove(item)?;
        if group.is_some() {
            self.events.emit(LifecycleEvent::ItemUngrouped { item, group });
        }
        Ok(())
    }

    pub fn set_multiselected(&mut self, items: &[NodeId]) {
        for id in self.tree.items() {
            if let Some(item) = self.tree.item_mut(id) {
                item.multiselected = items.contains(&id);
            }
        }
    }

    pub fn focus(&mut self, item: NodeId) {
        self.tree.set_focused(Some(item));
    }

    /// Creates a plain group around `items`, placed where the first item was.
    pub fn create_group(
        &mut self,
        label: &str,
        pinned: bool,
        items: &[NodeId],
    ) -> Result<NodeId, HostError> {
        let first = *items.first().ok_or(HostError::Rejected("empty group".into()))?;
        self.next_group_seq += 1;
        let group_id = format!("tabgroup-{}", self.next_group_seq);
        let group = self.tree.create_group(Group::plain(group_id, label, pinned));
        if let Err(e) = self.tree.insert_before(first, group) {
            self.tree.remove(group)?;
            return Err(e.into());
        }
        self.events.emit(LifecycleEvent::GroupCreated { group });
        for &item in items {
            self.add_to_group(item, group)?;
        }
        Ok(group)
    }

    pub fn add_to_group(&mut self, item: NodeId, group: NodeId) -> Result<(), HostError> {
        if self.tree.item(item).is_none() {
            return Err(TreeError::NotAnItem.into());
        }
        if self.tree.group(group).is_none() {
            return Err(TreeError::NotAGroup.into());
        }
        let previous = self.tree.parent_group(item);
        self.tree.append_child(group, item)?;
        if previous.is_some_and(|p| p != group) {
            self.events.emit(LifecycleEvent::ItemUngrouped {
                item,
                group: previous,
            });
        }
        self.events.emit(LifecycleEvent::ItemGrouped {
            item,
            group: Some(group),
        });
        Ok(())
    }

    /// Host-side group removal: the group leaves the tree with its contents.
    pub fn remove_group(&mut self, group: NodeId) -> Result<(), HostError> {
        if self.tree.group(group).is_none() {
            return Err(TreeError::NotAGroup.into());
        }
        self.tree.detach(group)?;
        self.events.emit(LifecycleEvent::GroupRemoved { group });
        Ok(())
    }

    fn set_pinned(&mut self, item: NodeId, pinned: bool) -> Result<bool, HostError> {
        let item = self.tree.item_mut(item).ok_or(TreeError::NotAnItem)?;
        if item.pinned == pinned {
            return Ok(false);
        }
        item.had_pinned_changed |= item.pinned_changed;
        item.pinned_changed = true;
        item.pinned = pinned;
        Ok(true)
    }
}

impl TabHost for LocalTabHost {
    fn tree(&self) -> &TabTree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut TabTree {
        &mut self.tree
    }

    fn pin(&mut self, item: NodeId) -> Result<(), HostError> {
        if self.set_pinned(item, true)? {
            self.events.emit(LifecycleEvent::ItemPinned { item });
        }
        Ok(())
    }

    fn unpin(&mut self, item: NodeId) -> Result<(), HostError> {
        if self.set_pinned(item, false)? {
            self.events.emit(LifecycleEvent::ItemUnpinned { item });
        }
        Ok(())
    }

    /// Moves the item out of its group to just before the group.
    fn ungroup_single(&mut self, item: NodeId) -> Result<(), HostError> {
        if self.tree.item(item).is_none() {
            return Err(TreeError::NotAnItem.into());
        }
        let group = self
            .tree
            .parent_group(item)
            .ok_or_else(|| HostError::Rejected("item is not grouped".into()))?;
        self.tree.insert_before(group, item)?;
        self.events.emit(LifecycleEvent::ItemUngrouped {
            item,
            group: Some(group),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/local_host.rs"]
mod tests;
