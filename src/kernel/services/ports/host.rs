//! Host collaborator contracts consumed by the folder engine.

use crate::models::{NodeId, TabTree, TreeError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    Tree(TreeError),
    Rejected(String),
    Unavailable(&'static str),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Tree(e) => write!(f, "tree operation failed: {}", e),
            HostError::Rejected(reason) => write!(f, "host rejected operation: {}", reason),
            HostError::Unavailable(what) => write!(f, "host facility unavailable: {}", what),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Tree(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TreeError> for HostError {
    fn from(e: TreeError) -> Self {
        HostError::Tree(e)
    }
}

pub trait SelectionProvider {
    fn multiselected(&self) -> Vec<NodeId>;
    fn focused(&self) -> Option<NodeId>;
}

impl SelectionProvider for TabTree {
    fn multiselected(&self) -> Vec<NodeId> {
        self.items()
            .into_iter()
            .filter(|id| self.item(*id).is_some_and(|item| item.multiselected))
            .collect()
    }

    fn focused(&self) -> Option<NodeId> {
        TabTree::focused(self)
    }
}

/// Tab host primitives. Implementations raise the matching lifecycle events
/// (`ItemPinned`, `ItemUngrouped`, ...) on the engine's event bus.
pub trait TabHost {
    fn tree(&self) -> &TabTree;
    fn tree_mut(&mut self) -> &mut TabTree;

    fn pin(&mut self, item: NodeId) -> Result<(), HostError>;
    fn unpin(&mut self, item: NodeId) -> Result<(), HostError>;

    /// Takes one item out of its group.
    fn ungroup_single(&mut self, item: NodeId) -> Result<(), HostError>;

    /// Nests a detached group at the end of `parent`.
    fn append_to_group(&mut self, parent: NodeId, group: NodeId) -> Result<(), HostError> {
        self.tree_mut().append_child(parent, group)?;
        Ok(())
    }

    /// Places a detached group at the preferred top-level anchor: before the
    /// pinned-region separator, else at the end of the pinned region, else at
    /// the end of the tab strip.
    fn insert_top_level(&mut self, group: NodeId) -> Result<(), HostError> {
        let tree = self.tree_mut();
        if let Some(separator) = tree.separator() {
            tracing::debug!("inserting group before pinned separator");
            tree.insert_before(separator, group)?;
        } else if let Some(region) = tree.pinned_region() {
            tracing::debug!("appending group to pinned region");
            tree.append_child(region, group)?;
        } else {
            tracing::debug!("appending group to tab strip");
            let strip = tree.tab_strip();
            tree.append_child(strip, group)?;
        }
        Ok(())
    }

    /// Last-resort placement used when `insert_top_level` fails.
    fn append_to_tab_strip(&mut self, group: NodeId) -> Result<(), HostError> {
        let tree = self.tree_mut();
        let strip = tree.tab_strip();
        tree.append_child(strip, group)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub id: String,
    pub text: String,
}

/// Window chrome the engine contributes to.
pub trait HostShell {
    fn add_menu_item(&mut self, item: MenuItem) -> Result<(), HostError>;
    fn remove_menu_item(&mut self, id: &str) -> Result<(), HostError>;
    fn add_style_sheet(&mut self, sheet: StyleSheet) -> Result<(), HostError>;
    fn remove_style_sheet(&mut self, id: &str) -> Result<(), HostError>;
}
