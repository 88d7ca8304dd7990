//! Redirects the host's generic ungroup on folders so nesting unwinds one
//! level at a time.

use rustc_hash::FxHashMap;

use super::engine::FolderEngine;
use super::event::{CommandEvent, HostCommand};
use super::services::ports::TabHost;
use crate::models::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterceptId(u64);

/// Ungroup intercepts keyed by folder, one per folder.
#[derive(Debug, Default)]
pub struct InterceptTable {
    by_group: FxHashMap<NodeId, InterceptId>,
    next_id: u64,
}

impl InterceptTable {
    /// Installs an intercept for `group`, detaching any previous one.
    pub fn install(&mut self, group: NodeId) -> InterceptId {
        self.next_id += 1;
        let id = InterceptId(self.next_id);
        if let Some(prev) = self.by_group.insert(group, id) {
            tracing::debug!(?group, ?prev, "replaced ungroup intercept");
        }
        id
    }

    pub fn remove(&mut self, group: NodeId) -> Option<InterceptId> {
        self.by_group.remove(&group)
    }

    pub fn get(&self, group: NodeId) -> Option<InterceptId> {
        self.by_group.get(&group).copied()
    }

    pub fn contains(&self, group: NodeId) -> bool {
        self.by_group.contains_key(&group)
    }

    /// The folder whose intercept claims this command, if any.
    pub fn matching(&self, event: &CommandEvent) -> Option<NodeId> {
        if event.command != HostCommand::UngroupTabs {
            return None;
        }
        event.group.filter(|g| self.contains(*g))
    }

    pub fn clear(&mut self) {
        self.by_group.clear();
    }

    pub fn len(&self) -> usize {
        self.by_group.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_group.is_empty()
    }
}

impl FolderEngine {
    /// Disbands a folder. Nested folders hand their members to the enclosing
    /// folder; top-level folders ungroup each item through the host.
    pub fn safe_ungroup_nested_folder(
        &mut self,
        host: &mut dyn TabHost,
        group: Option<NodeId>,
    ) {
        let Some(group) = group.filter(|g| host.tree().is_folder(*g)) else {
            return;
        };

        let tree = host.tree();
        if tree.item_count(group) == 0 {
            return;
        }
        // Snapshot: membership changes under us while members move out.
        let members: Vec<NodeId> = tree.children(group).to_vec();
        let parent_folder = tree.enclosing_folder(group);

        match parent_folder {
            Some(parent) => self.promote_members(host, group, parent, &members),
            None => self.ungroup_top_level(host, group, &members),
        }
    }

    fn promote_members(
        &mut self,
        host: &mut dyn TabHost,
        group: NodeId,
        parent: NodeId,
        members: &[NodeId],
    ) {
        tracing::debug!(
            ?group,
            ?parent,
            members = members.len(),
            "promoting folder members"
        );
        let tree = host.tree_mut();
        for &member in members {
            if tree.parent(member) != Some(group) {
                continue;
            }
            if let Err(e) = tree.append_child(parent, member) {
                tracing::warn!(?member, error = %e, "failed to promote member");
                continue;
            }
            if tree.group(member).is_some() {
                tree.renumber_folders(member);
            }
        }
        self.check_folder_emptiness(host, Some(group));
    }

    fn ungroup_top_level(&mut self, host: &mut dyn TabHost, group: NodeId, members: &[NodeId]) {
        tracing::debug!(?group, members = members.len(), "ungrouping top-level folder");
        for &member in members {
            let tree = host.tree();
            if tree.item(member).is_none() || tree.parent(member) != Some(group) {
                continue;
            }
            if let Err(e) = host.ungroup_single(member) {
                tracing::warn!(item = ?member, error = %e, "failed to ungroup item");
            }
            self.pump(host);
        }

        // Child folders take the disbanded folder's place.
        for &member in members {
            let tree = host.tree_mut();
            if tree.group(member).is_none() || tree.parent(member) != Some(group) {
                continue;
            }
            match tree.insert_before(group, member) {
                Ok(()) => tree.renumber_folders(member),
                Err(e) => tracing::warn!(?member, error = %e, "failed to hoist child folder"),
            }
        }

        if host.tree().contains(group) {
            self.check_folder_emptiness(host, Some(group));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/ungroup.rs"]
mod tests;
