use super::*;
use crate::kernel::bus::event_bus;
use crate::kernel::services::adapters::{LocalTabHost, RecordingShell};
use crate::models::Group;

struct Fixture {
    engine: FolderEngine,
    host: LocalTabHost,
    shell: RecordingShell,
}

fn fixture_with(shell: RecordingShell) -> Fixture {
    let (tx, rx) = event_bus();
    let mut shell = shell;
    let mut engine = FolderEngine::new(FolderSettings::default(), rx);
    engine.start(&mut shell);
    Fixture {
        engine,
        host: LocalTabHost::new(TabTree::with_pinned_region(), tx),
        shell,
    }
}

fn fixture() -> Fixture {
    fixture_with(RecordingShell::new())
}

fn new_folder() -> CommandEvent {
    CommandEvent::new(HostCommand::NewFolder, None)
}

#[test]
fn test_start_registers_contributions() {
    let f = fixture();
    assert!(f.engine.is_started());
    assert_eq!(f.engine.subscription_count(), EventKind::ALL.len());
    assert_eq!(f.shell.menu_items().len(), 1);
    assert_eq!(f.shell.menu_items()[0].id, "tab-folder-context-new");
    assert_eq!(f.shell.menu_items()[0].label, "New Folder");
    assert_eq!(f.shell.style_sheets().len(), 1);
    assert!(f.shell.style_sheets()[0]
        .text
        .contains("var(--nested-indent, 10px)"));
}

#[test]
fn test_start_twice_is_noop() {
    let mut f = fixture();
    f.engine.start(&mut f.shell);
    assert_eq!(f.shell.menu_items().len(), 1);
    assert_eq!(f.engine.subscription_count(), EventKind::ALL.len());
}

#[test]
fn test_missing_context_menu_keeps_engine_running() {
    let mut f = fixture_with(RecordingShell::without_context_menu());
    assert!(f.engine.is_started());
    assert!(f.shell.menu_items().is_empty());
    assert_eq!(f.shell.style_sheets().len(), 1);

    let a = f.host.open_item("a", false);
    f.host.focus(a);
    assert_eq!(
        f.engine.dispatch_command(&mut f.host, new_folder()),
        CommandDisposition::Default
    );
    assert!(f.host.tree().find_group("folder-1").is_none());
}

#[test]
fn test_stop_removes_everything() {
    let mut f = fixture();
    let a = f.host.open_item("a", false);
    f.host.focus(a);
    f.engine.dispatch_command(&mut f.host, new_folder());
    let folder = f.host.tree().find_group("folder-1").unwrap();
    assert!(f.engine.has_intercept(folder));

    f.engine.stop(&mut f.shell);

    assert!(!f.engine.is_started());
    assert_eq!(f.engine.subscription_count(), 0);
    assert!(f.shell.menu_items().is_empty());
    assert!(f.shell.style_sheets().is_empty());
    assert!(!f.engine.has_intercept(folder));

    let ungroup = CommandEvent::new(HostCommand::UngroupTabs, Some(folder));
    assert_eq!(
        f.engine.dispatch_command(&mut f.host, ungroup),
        CommandDisposition::Default
    );
}

#[test]
fn test_events_after_stop_are_ignored() {
    let mut f = fixture();
    f.engine.stop(&mut f.shell);

    let a = f.host.open_item("a", true);
    f.host.create_group("Pinned", true, &[a]).unwrap();

    assert_eq!(f.engine.pump(&mut f.host), 0);
    let group = f.host.tree().find_group("tabgroup-1").unwrap();
    assert!(!f.host.tree().is_folder(group));
}

#[test]
fn test_pump_promotes_pinned_group() {
    let mut f = fixture();
    let a = f.host.open_item("a", true);
    let group = f.host.create_group("Pinned", true, &[a]).unwrap();

    assert_eq!(f.engine.pump(&mut f.host), 2);

    let g = f.host.tree().group(group).unwrap();
    assert_eq!(g.nesting_level(), Some(0));
    assert!(f.engine.has_intercept(group));
}

#[test]
fn test_unpinned_group_stays_plain() {
    let mut f = fixture();
    let a = f.host.open_item("a", false);
    let group = f.host.create_group("Work", false, &[a]).unwrap();
    f.engine.pump(&mut f.host);

    assert!(!f.host.tree().is_folder(group));
    assert!(!f.engine.has_intercept(group));
    let ungroup = CommandEvent::new(HostCommand::UngroupTabs, Some(group));
    assert_eq!(
        f.engine.dispatch_command(&mut f.host, ungroup),
        CommandDisposition::Default
    );
}

#[test]
fn test_unrelated_command_falls_through() {
    let mut f = fixture();
    let other = CommandEvent::new(HostCommand::from_name("closeTab"), None);
    assert_eq!(
        f.engine.dispatch_command(&mut f.host, other),
        CommandDisposition::Default
    );
}

#[test]
fn test_command_names() {
    assert_eq!(
        HostCommand::from_name("tab-folder-context-new"),
        HostCommand::NewFolder
    );
    assert_eq!(
        HostCommand::from_name("tabGroupEditor_ungroupTabs"),
        HostCommand::UngroupTabs
    );
    assert_eq!(
        HostCommand::from_name("reload"),
        HostCommand::Other("reload".to_string())
    );
}

#[test]
fn test_tick_reasserts_label() {
    let mut f = fixture();
    let a = f.host.open_item("a", false);
    f.host.focus(a);
    assert_eq!(
        f.engine.dispatch_command(&mut f.host, new_folder()),
        CommandDisposition::Handled
    );
    let folder = f.host.tree().find_group("folder-1").unwrap();
    assert_eq!(f.engine.pending_deferred(), 1);

    f.host.tree_mut().group_mut(folder).unwrap().label = String::new();
    assert_eq!(f.engine.tick(&mut f.host, Instant::now() + Duration::from_secs(1)), 1);

    assert_eq!(f.host.tree().group(folder).unwrap().label, "New Folder");
    assert_eq!(f.engine.pending_deferred(), 0);
}

#[test]
fn test_tick_skips_removed_folder() {
    let mut f = fixture();
    let a = f.host.open_item("a", false);
    f.host.focus(a);
    f.engine.dispatch_command(&mut f.host, new_folder());
    f.host.close_item(a).unwrap();
    f.engine.pump(&mut f.host);
    assert!(f.host.tree().find_group("folder-1").is_none());

    assert_eq!(f.engine.tick(&mut f.host, Instant::now() + Duration::from_secs(1)), 1);
}

#[test]
fn test_group_ids_skip_taken_ids() {
    let mut f = fixture();
    let taken = f
        .host
        .tree_mut()
        .create_group(Group::plain("folder-1", "Taken", false));
    let strip = f.host.tree().tab_strip();
    f.host.tree_mut().append_child(strip, taken).unwrap();

    assert_eq!(f.engine.next_group_id(f.host.tree()), "folder-2");
    assert_eq!(f.engine.next_group_id(f.host.tree()), "folder-3");
}
