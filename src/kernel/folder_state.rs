//! Lifecycle handlers that keep folder membership, pin state and nesting in sync.
//!
//! Every handler tolerates stale ids: lifecycle events may trail host-side
//! mutation, so a missing node is logged and the handler does nothing.

use super::engine::FolderEngine;
use super::services::ports::TabHost;
use crate::models::{GroupKind, NodeId};

impl FolderEngine {
    pub(super) fn on_item_grouped(
        &mut self,
        host: &mut dyn TabHost,
        item: NodeId,
        group: Option<NodeId>,
    ) -> bool {
        let tree = host.tree_mut();
        let Some(group) = group.filter(|g| tree.group(*g).is_some()) else {
            tracing::warn!(?item, "no group found for grouped item");
            return false;
        };
        let Some(pinned) = tree.item(item).map(|i| i.pinned) else {
            tracing::warn!(?item, "grouped item no longer exists");
            return false;
        };
        if let Some(g) = tree.group_mut(group) {
            g.pinned = pinned;
        }
        tracing::debug!(?item, ?group, pinned, "item grouped");
        if host.tree().is_folder(group) {
            self.check_folder_emptiness(host, Some(group));
        }
        true
    }

    pub(super) fn on_item_ungrouped(
        &mut self,
        host: &mut dyn TabHost,
        item: NodeId,
        group: Option<NodeId>,
    ) -> bool {
        let Some(group) = group.filter(|g| host.tree().is_folder(*g)) else {
            return false;
        };
        tracing::debug!(?item, ?group, "item left folder");
        self.check_folder_emptiness(host, Some(group));
        true
    }

    pub(super) fn on_group_created(&mut self, host: &mut dyn TabHost, group: NodeId) -> bool {
        let tree = host.tree_mut();
        let Some(pinned) = tree.group(group).map(|g| g.pinned) else {
            tracing::warn!(?group, "created group no longer exists");
            return false;
        };
        if !pinned {
            return false;
        }

        let nesting_level = tree.folder_depth(group);
        if let Some(g) = tree.group_mut(group) {
            g.kind = GroupKind::Folder { nesting_level };
        }
        tracing::debug!(?group, nesting_level, "pinned group promoted to folder");

        if self.settings.intercept_auto_folders {
            self.intercepts.install(group);
        }
        self.check_folder_emptiness(host, Some(group));
        true
    }

    pub(super) fn on_group_removed(&mut self, host: &mut dyn TabHost, group: NodeId) -> bool {
        let tree = host.tree_mut();
        for folder in tree.subtree_folders(group) {
            self.intercepts.remove(folder);
        }
        if !tree.is_folder(group) {
            return false;
        }
        for item in tree.descendant_items(group) {
            if let Some(item) = tree.item_mut(item) {
                item.had_pinned_changed = false;
                item.pinned_changed = false;
            }
        }
        tracing::debug!(?group, "folder removed, transient markers cleared");
        true
    }

    pub(super) fn on_item_pin_changed(
        &mut self,
        host: &mut dyn TabHost,
        item: NodeId,
        pinned: bool,
    ) -> bool {
        let tree = host.tree_mut();
        let Some(group) = tree.parent_group(item).filter(|g| tree.is_folder(*g)) else {
            return false;
        };
        if let Some(g) = tree.group_mut(group) {
            g.pinned = pinned;
        }
        tracing::debug!(?item, ?group, pinned, "folder pin state updated");
        true
    }

    /// Destroys `group` when it is a folder without items. Returns whether it
    /// was destroyed. Must run after every membership-reducing operation.
    pub fn check_folder_emptiness(
        &mut self,
        host: &mut dyn TabHost,
        group: Option<NodeId>,
    ) -> bool {
        let tree = host.tree();
        let Some(group) = group.filter(|g| tree.group(*g).is_some()) else {
            tracing::warn!(?group, "invalid group for folder state update");
            return false;
        };
        if !tree.is_folder(group) {
            tracing::warn!(?group, "not a folder, skipping emptiness check");
            return false;
        }
        if tree.item_count(group) > 0 {
            return false;
        }
        self.destroy_folder(host, group);
        true
    }

    fn destroy_folder(&mut self, host: &mut dyn TabHost, group: NodeId) {
        let tree = host.tree_mut();
        let enclosing = tree.enclosing_folder(group);
        if let Err(e) = tree.remove(group) {
            tracing::warn!(?group, error = %e, "failed to remove empty folder");
            return;
        }
        self.intercepts.remove(group);
        tracing::debug!(?group, "empty folder removed");

        if let Some(parent) = enclosing {
            self.check_folder_emptiness(host, Some(parent));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/folder_state.rs"]
mod tests;
