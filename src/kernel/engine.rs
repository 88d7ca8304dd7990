use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use super::bus::EventBusReceiver;
use super::deferred::{DeferredQueue, DeferredTask};
use super::event::{CommandDisposition, CommandEvent, EventKind, HostCommand, LifecycleEvent};
use super::services::ports::{
    FolderSettings, HostError, HostShell, MenuItem, StyleSheet, TabHost,
};
use super::ungroup::InterceptTable;
use crate::models::{NodeId, TabTree};

type EventHandler = fn(&mut FolderEngine, &mut dyn TabHost, LifecycleEvent) -> bool;

/// Event kind -> handler, registered and dropped as a unit.
#[derive(Default)]
struct Subscriptions {
    table: FxHashMap<EventKind, EventHandler>,
}

impl Subscriptions {
    fn subscribe(&mut self, kind: EventKind, handler: EventHandler) {
        if self.table.insert(kind, handler).is_some() {
            tracing::debug!(?kind, "replaced existing subscription");
        }
    }

    fn get(&self, kind: EventKind) -> Option<EventHandler> {
        self.table.get(&kind).copied()
    }

    fn clear(&mut self) -> usize {
        let n = self.table.len();
        self.table.clear();
        n
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}

fn handler_for(kind: EventKind) -> EventHandler {
    match kind {
        EventKind::ItemGrouped => handle_item_grouped,
        EventKind::ItemUngrouped => handle_item_ungrouped,
        EventKind::GroupCreated => handle_group_created,
        EventKind::GroupRemoved => handle_group_removed,
        EventKind::ItemPinned | EventKind::ItemUnpinned => handle_pin_changed,
    }
}

fn handle_item_grouped(
    engine: &mut FolderEngine,
    host: &mut dyn TabHost,
    event: LifecycleEvent,
) -> bool {
    match event {
        LifecycleEvent::ItemGrouped { item, group } => engine.on_item_grouped(host, item, group),
        _ => false,
    }
}

fn handle_item_ungrouped(
    engine: &mut FolderEngine,
    host: &mut dyn TabHost,
    event: LifecycleEvent,
) -> bool {
    match event {
        LifecycleEvent::ItemUngrouped { item, group } => {
            engine.on_item_ungrouped(host, item, group)
        }
        _ => false,
    }
}

fn handle_group_created(
    engine: &mut FolderEngine,
    host: &mut dyn TabHost,
    event: LifecycleEvent,
) -> bool {
    match event {
        LifecycleEvent::GroupCreated { group } => engine.on_group_created(host, group),
        _ => false,
    }
}

fn handle_group_removed(
    engine: &mut FolderEngine,
    host: &mut dyn TabHost,
    event: LifecycleEvent,
) -> bool {
    match event {
        LifecycleEvent::GroupRemoved { group } => engine.on_group_removed(host, group),
        _ => false,
    }
}

fn handle_pin_changed(
    engine: &mut FolderEngine,
    host: &mut dyn TabHost,
    event: LifecycleEvent,
) -> bool {
    match event {
        LifecycleEvent::ItemPinned { item } => engine.on_item_pin_changed(host, item, true),
        LifecycleEvent::ItemUnpinned { item } => engine.on_item_pin_changed(host, item, false),
        _ => false,
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct ShellContributions {
    menu: bool,
    style: bool,
}

/// Folder overlay service for one host window.
pub struct FolderEngine {
    pub(super) settings: FolderSettings,
    events: EventBusReceiver,
    subscriptions: Subscriptions,
    pub(super) intercepts: InterceptTable,
    pub(super) deferred: DeferredQueue,
    next_group_seq: u64,
    contributions: ShellContributions,
    started: bool,
    /// Latest instant seen by `tick`; deferred deadlines are measured from it.
    clock: Instant,
}

impl FolderEngine {
    pub fn new(settings: FolderSettings, events: EventBusReceiver) -> Self {
        Self {
            settings,
            events,
            subscriptions: Subscriptions::default(),
            intercepts: InterceptTable::default(),
            deferred: DeferredQueue::default(),
            next_group_seq: 0,
            contributions: ShellContributions::default(),
            started: false,
            clock: Instant::now(),
        }
    }

    pub fn settings(&self) -> &FolderSettings {
        &self.settings
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn has_intercept(&self, group: NodeId) -> bool {
        self.intercepts.contains(group)
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    /// Registers the menu entry, the style sheet and the event subscriptions.
    /// A failing contribution is logged and leaves the rest running.
    pub fn start(&mut self, shell: &mut dyn HostShell) {
        if self.started {
            tracing::debug!("folder engine already started");
            return;
        }
        tracing::info!("folder engine starting");

        let menu = MenuItem {
            id: self.settings.menu_item_id.clone(),
            label: self.settings.default_label.clone(),
        };
        match shell.add_menu_item(menu) {
            Ok(()) => self.contributions.menu = true,
            Err(e) => tracing::error!(error = %e, "context menu initialization failed"),
        }

        let sheet = StyleSheet {
            id: self.settings.style_sheet_id.clone(),
            text: self.settings.indent_rule(),
        };
        match shell.add_style_sheet(sheet) {
            Ok(()) => self.contributions.style = true,
            Err(e) => tracing::error!(error = %e, "failed to add folder styles"),
        }

        for kind in EventKind::ALL {
            self.subscriptions.subscribe(kind, handler_for(kind));
        }

        self.started = true;
        tracing::info!(
            subscriptions = self.subscriptions.len(),
            menu = self.contributions.menu,
            style = self.contributions.style,
            "folder engine started"
        );
    }

    /// Undoes everything `start` registered.
    pub fn stop(&mut self, shell: &mut dyn HostShell) {
        if !self.started {
            return;
        }
        tracing::info!("folder engine stopping");

        let removed = self.subscriptions.clear();
        tracing::debug!(removed, "subscriptions removed");

        if self.contributions.style {
            if let Err(e) = shell.remove_style_sheet(&self.settings.style_sheet_id) {
                tracing::warn!(error = %e, "failed to remove style sheet");
            }
            self.contributions.style = false;
        }
        if self.contributions.menu {
            if let Err(e) = shell.remove_menu_item(&self.settings.menu_item_id) {
                tracing::warn!(error = %e, "failed to remove menu item");
            }
            self.contributions.menu = false;
        }

        let intercepts = self.intercepts.len();
        self.intercepts.clear();
        tracing::debug!(intercepts, "ungroup intercepts removed");
        while self.events.try_recv().is_ok() {}
        self.started = false;
        tracing::info!("folder engine stopped");
    }

    /// Drains the event bus, running the subscribed handler for each event.
    pub fn pump(&mut self, host: &mut dyn TabHost) -> usize {
        let mut handled = 0;
        loop {
            let event = match self.events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::trace!("event bus disconnected");
                    break;
                }
            };
            if self.dispatch_event(host, event) {
                handled += 1;
            }
        }
        handled
    }

    /// Returns whether a subscribed handler ran.
    pub fn dispatch_event(&mut self, host: &mut dyn TabHost, event: LifecycleEvent) -> bool {
        let Some(handler) = self.subscriptions.get(event.kind()) else {
            tracing::trace!(?event, "no subscription for event");
            return false;
        };
        handler(self, host, event);
        true
    }

    /// Routes a host command. `Handled` means the host must not run its default.
    pub fn dispatch_command(
        &mut self,
        host: &mut dyn TabHost,
        event: CommandEvent,
    ) -> CommandDisposition {
        if !self.started {
            return CommandDisposition::Default;
        }
        match event.command {
            HostCommand::NewFolder if self.contributions.menu => {
                self.create_folder_from_selection(host);
                CommandDisposition::Handled
            }
            HostCommand::UngroupTabs => match self.intercepts.matching(&event) {
                Some(group) => {
                    tracing::debug!(?group, "intercepted ungroup on folder");
                    self.safe_ungroup_nested_folder(host, Some(group));
                    CommandDisposition::Handled
                }
                None => CommandDisposition::Default,
            },
            _ => CommandDisposition::Default,
        }
    }

    /// Runs deferred work that is due at `now`.
    pub fn tick(&mut self, host: &mut dyn TabHost, now: Instant) -> usize {
        self.clock = self.clock.max(now);
        if self.deferred.is_empty() {
            return 0;
        }
        let due = self.deferred.take_due(now);
        let n = due.len();
        for task in due {
            match task {
                DeferredTask::ReassertLabel { group, label } => {
                    let tree = host.tree_mut();
                    if tree.parent(group).is_none() {
                        tracing::trace!(?group, "label reassert skipped for detached group");
                        continue;
                    }
                    if let Some(g) = tree.group_mut(group) {
                        g.label = label;
                    }
                }
            }
        }
        n
    }

    /// Deadline for the label reassert, on the clock `tick` is driven by.
    pub(super) fn label_reassert_deadline(&self) -> Instant {
        self.clock + Duration::from_millis(self.settings.label_reassert_delay_ms)
    }

    pub(super) fn next_group_id(&mut self, tree: &TabTree) -> String {
        loop {
            self.next_group_seq += 1;
            let id = format!("{}{}", self.settings.group_id_prefix, self.next_group_seq);
            if tree.find_group(&id).is_none() {
                return id;
            }
        }
    }

    /// Inserts at the preferred top-level anchor, then the tab strip as a last resort.
    pub(super) fn insert_top_level(
        &mut self,
        host: &mut dyn TabHost,
        group: NodeId,
    ) -> Result<(), HostError> {
        match host.insert_top_level(group) {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(error = %e, "failed to insert group into container");
                host.append_to_tab_strip(group).inspect_err(|e| {
                    tracing::error!(error = %e, "all insertion methods failed");
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/engine.rs"]
mod tests;
