use crate::models::NodeId;

/// Lifecycle events raised by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    ItemGrouped { item: NodeId, group: Option<NodeId> },
    ItemUngrouped { item: NodeId, group: Option<NodeId> },
    GroupCreated { group: NodeId },
    GroupRemoved { group: NodeId },
    ItemPinned { item: NodeId },
    ItemUnpinned { item: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ItemGrouped,
    ItemUngrouped,
    GroupCreated,
    GroupRemoved,
    ItemPinned,
    ItemUnpinned,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::ItemGrouped,
        EventKind::ItemUngrouped,
        EventKind::GroupRemoved,
        EventKind::GroupCreated,
        EventKind::ItemPinned,
        EventKind::ItemUnpinned,
    ];
}

impl LifecycleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LifecycleEvent::ItemGrouped { .. } => EventKind::ItemGrouped,
            LifecycleEvent::ItemUngrouped { .. } => EventKind::ItemUngrouped,
            LifecycleEvent::GroupCreated { .. } => EventKind::GroupCreated,
            LifecycleEvent::GroupRemoved { .. } => EventKind::GroupRemoved,
            LifecycleEvent::ItemPinned { .. } => EventKind::ItemPinned,
            LifecycleEvent::ItemUnpinned { .. } => EventKind::ItemUnpinned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostCommand {
    /// The "New Folder" context menu entry.
    NewFolder,
    /// The host's generic ungroup action from the group editor.
    UngroupTabs,
    Other(String),
}

impl HostCommand {
    pub fn from_name(name: &str) -> Self {
        match name {
            "tab-folder-context-new" | "newFolder" => HostCommand::NewFolder,
            "tabGroupEditor_ungroupTabs" | "ungroupTabs" => HostCommand::UngroupTabs,
            other => HostCommand::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub command: HostCommand,
    pub group: Option<NodeId>,
}

impl CommandEvent {
    pub fn new(command: HostCommand, group: Option<NodeId>) -> Self {
        Self { command, group }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandDisposition {
    /// Default prevented and propagation stopped.
    Handled,
    /// The host should run its default behavior.
    Default,
}
