//! "New Folder" from the current selection.

use rustc_hash::FxHashSet;

use super::deferred::DeferredTask;
use super::engine::FolderEngine;
use super::services::ports::{SelectionProvider, TabHost};
use crate::models::{Group, GroupKind, NodeId, TabTree};

/// Multiselected items, or the focused item when nothing is multiselected,
/// keeping only items that currently sit in a container.
pub fn effective_selection(tree: &TabTree) -> Vec<NodeId> {
    let multiselected = tree.multiselected();
    let using_multiselection = !multiselected.is_empty();
    let candidates: Vec<NodeId> = if using_multiselection {
        multiselected
    } else {
        tree.focused().into_iter().collect()
    };
    tracing::debug!(
        candidates = candidates.len(),
        using_multiselection,
        "selection state"
    );

    let mut seen = FxHashSet::default();
    candidates
        .into_iter()
        .filter(|id| tree.item(*id).is_some() && tree.is_attached(*id))
        .filter(|id| seen.insert(*id))
        .collect()
}

impl FolderEngine {
    /// Builds a folder holding the current selection. Returns the new folder,
    /// or `None` when nothing was created.
    pub fn create_folder_from_selection(&mut self, host: &mut dyn TabHost) -> Option<NodeId> {
        let items = effective_selection(host.tree());
        if items.is_empty() {
            tracing::warn!("no valid items selected for new folder");
            return None;
        }

        // The first selected item decides where the folder nests.
        let parent = host.tree().enclosing_folder(items[0]);
        tracing::debug!(?parent, items = items.len(), "creating new folder");

        let label = self.settings.default_label.clone();
        let id = self.next_group_id(host.tree());
        let group = host.tree_mut().create_group(Group::folder(id, label.clone()));

        // Pin before the folder is placed so no unpinned item shows inside it.
        for &item in &items {
            if host.tree().item(item).is_some_and(|i| !i.pinned) {
                if let Err(e) = host.pin(item) {
                    tracing::warn!(?item, error = %e, "failed to pin item for folder");
                }
            }
        }
        self.pump(host);

        if !self.place_folder(host, group, parent) {
            if let Err(e) = host.tree_mut().remove(group) {
                tracing::warn!(?group, error = %e, "failed to discard unplaced folder");
            }
            return None;
        }

        let mut former_folders = Vec::new();
        for &item in &items {
            let former = host.tree().parent_group(item);
            match host.tree_mut().append_child(group, item) {
                Ok(()) => {
                    if let Some(former) = former.filter(|f| *f != group) {
                        if !former_folders.contains(&former) {
                            former_folders.push(former);
                        }
                    }
                }
                Err(e) => tracing::warn!(?item, error = %e, "failed to move item into folder"),
            }
        }

        for former in former_folders {
            if host.tree().is_folder(former) {
                self.check_folder_emptiness(host, Some(former));
            }
        }
        if self.check_folder_emptiness(host, Some(group)) {
            tracing::warn!("new folder ended up empty");
            return None;
        }

        let at = self.label_reassert_deadline();
        self.deferred
            .schedule(at, DeferredTask::ReassertLabel { group, label });
        self.intercepts.install(group);

        if let Some(g) = host.tree().group(group) {
            tracing::debug!(
                id = %g.id,
                items = host.tree().item_count(group),
                nested = parent.is_some(),
                nesting_level = ?g.nesting_level(),
                "new folder created"
            );
        }
        Some(group)
    }

    /// Nested placement inside `parent`, falling back to the top level.
    fn place_folder(
        &mut self,
        host: &mut dyn TabHost,
        group: NodeId,
        parent: Option<NodeId>,
    ) -> bool {
        if let Some(parent) = parent {
            let nesting_level = host
                .tree()
                .group(parent)
                .and_then(Group::nesting_level)
                .map_or(0, |level| level + 1);
            if let Some(g) = host.tree_mut().group_mut(group) {
                g.kind = GroupKind::Folder { nesting_level };
            }
            match host.append_to_group(parent, group) {
                Ok(()) => return true,
                Err(e) => {
                    tracing::error!(?parent, error = %e, "failed to create nested folder");
                }
            }
        }

        match self.insert_top_level(host, group) {
            Ok(()) => {
                host.tree_mut().renumber_folders(group);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/constructor.rs"]
mod tests;
