use super::*;

fn folder_at(tree: &mut TabTree, parent: NodeId, id: &str) -> NodeId {
    let group = tree.create_group(Group::folder(id, "New Folder"));
    tree.append_child(parent, group).unwrap();
    tree.renumber_folders(group);
    group
}

fn item_at(tree: &mut TabTree, parent: NodeId, name: &str) -> NodeId {
    let item = tree.create_item(Item::new(name, true));
    tree.append_child(parent, item).unwrap();
    item
}

#[test]
fn test_new_tree() {
    let tree = TabTree::new();
    assert!(tree.pinned_region().is_none());
    assert!(tree.separator().is_none());
    assert!(tree.children(tree.tab_strip()).is_empty());
    assert!(tree.is_attached(tree.tab_strip()));
}

#[test]
fn test_pinned_region_has_separator() {
    let tree = TabTree::with_pinned_region();
    let region = tree.pinned_region().unwrap();
    let separator = tree.separator().unwrap();
    assert_eq!(tree.children(region), &[separator]);
}

#[test]
fn test_append_and_parent_group() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let group = tree.create_group(Group::plain("g", "Group", false));
    tree.append_child(strip, group).unwrap();
    let item = item_at(&mut tree, group, "tab1");

    assert_eq!(tree.parent(item), Some(group));
    assert_eq!(tree.parent_group(item), Some(group));
    assert_eq!(tree.parent_group(group), None);
    assert!(!tree.is_folder(group));
}

#[test]
fn test_insert_before_keeps_order() {
    let mut tree = TabTree::with_pinned_region();
    let region = tree.pinned_region().unwrap();
    let separator = tree.separator().unwrap();
    let a = tree.create_item(Item::new("a", true));
    let b = tree.create_item(Item::new("b", true));

    tree.insert_before(separator, a).unwrap();
    tree.insert_before(separator, b).unwrap();

    assert_eq!(tree.children(region), &[a, b, separator]);
}

#[test]
fn test_enclosing_folder_and_depth() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let outer = folder_at(&mut tree, strip, "outer");
    let plain = tree.create_group(Group::plain("plain", "Plain", false));
    tree.append_child(outer, plain).unwrap();
    let inner = folder_at(&mut tree, plain, "inner");
    let item = item_at(&mut tree, inner, "tab");

    assert_eq!(tree.enclosing_folder(item), Some(inner));
    assert_eq!(tree.enclosing_folder(inner), Some(outer));
    assert_eq!(tree.enclosing_folder(outer), None);
    assert_eq!(tree.group(outer).unwrap().nesting_level(), Some(0));
    assert_eq!(tree.group(inner).unwrap().nesting_level(), Some(1));
    assert_eq!(tree.folder_depth(item), 2);
}

#[test]
fn test_descendant_items_are_counted_through_nesting() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let outer = folder_at(&mut tree, strip, "outer");
    let a = item_at(&mut tree, outer, "a");
    let inner = folder_at(&mut tree, outer, "inner");
    let b = item_at(&mut tree, inner, "b");
    let c = item_at(&mut tree, outer, "c");

    assert_eq!(tree.descendant_items(outer), vec![a, b, c]);
    assert_eq!(tree.item_count(inner), 1);
    assert_eq!(tree.items(), vec![a, b, c]);
}

#[test]
fn test_move_into_descendant_rejected() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let outer = folder_at(&mut tree, strip, "outer");
    let inner = folder_at(&mut tree, outer, "inner");

    assert_eq!(
        tree.append_child(inner, outer),
        Err(TreeError::MoveIntoDescendant)
    );
    assert_eq!(tree.append_child(outer, outer), Err(TreeError::MoveIntoDescendant));
}

#[test]
fn test_items_cannot_hold_children() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let a = item_at(&mut tree, strip, "a");
    let b = tree.create_item(Item::new("b", false));

    assert_eq!(tree.append_child(a, b), Err(TreeError::NotAContainer));
}

#[test]
fn test_remove_frees_subtree() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let outer = folder_at(&mut tree, strip, "outer");
    let item = item_at(&mut tree, outer, "a");
    tree.set_focused(Some(item));

    tree.remove(outer).unwrap();

    assert!(!tree.contains(outer));
    assert!(!tree.contains(item));
    assert!(tree.focused().is_none());
    assert!(tree.children(strip).is_empty());
    assert_eq!(tree.remove(strip), Err(TreeError::NotAGroup));
}

#[test]
fn test_detach_keeps_node() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let outer = folder_at(&mut tree, strip, "outer");
    let item = item_at(&mut tree, outer, "a");

    tree.detach(outer).unwrap();

    assert!(tree.contains(outer));
    assert!(!tree.is_attached(item));
    assert_eq!(tree.item_count(outer), 1);
}

#[test]
fn test_renumber_after_move() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let a = folder_at(&mut tree, strip, "a");
    let b = folder_at(&mut tree, a, "b");
    let c = folder_at(&mut tree, b, "c");
    assert_eq!(tree.group(c).unwrap().nesting_level(), Some(2));

    tree.append_child(strip, b).unwrap();
    tree.renumber_folders(b);

    assert_eq!(tree.group(b).unwrap().nesting_level(), Some(0));
    assert_eq!(tree.group(c).unwrap().nesting_level(), Some(1));
}

#[test]
fn test_focus_tracks_selected_flag() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let a = item_at(&mut tree, strip, "a");
    let b = item_at(&mut tree, strip, "b");

    tree.set_focused(Some(a));
    tree.set_focused(Some(b));

    assert!(!tree.item(a).unwrap().selected);
    assert!(tree.item(b).unwrap().selected);
    assert_eq!(tree.focused(), Some(b));
}

#[test]
fn test_flatten_for_view() {
    let mut tree = TabTree::with_pinned_region();
    let region = tree.pinned_region().unwrap();
    let separator = tree.separator().unwrap();
    let folder = tree.create_group(Group::folder("folder-1", "New Folder"));
    tree.insert_before(separator, folder).unwrap();
    item_at(&mut tree, folder, "a");
    let strip = tree.tab_strip();
    let b = tree.create_item(Item::new("b", false));
    tree.append_child(strip, b).unwrap();

    let rows = tree.flatten_for_view();
    let texts: Vec<(u16, &str)> = rows.iter().map(|r| (r.depth, r.text.as_str())).collect();
    assert_eq!(
        texts,
        vec![
            (0, "[pinned]"),
            (1, "folder folder-1 \"New Folder\" level=0 pinned=true"),
            (2, "a (pinned)"),
            (1, "----"),
            (0, "[tabs]"),
            (1, "b"),
        ]
    );
    assert_eq!(rows[0].id, region);
}

#[test]
fn test_subtree_folders() {
    let mut tree = TabTree::new();
    let strip = tree.tab_strip();
    let outer = folder_at(&mut tree, strip, "outer");
    let plain = tree.create_group(Group::plain("plain", "Plain", false));
    tree.append_child(outer, plain).unwrap();
    let inner = folder_at(&mut tree, plain, "inner");
    item_at(&mut tree, inner, "a");

    let mut folders = tree.subtree_folders(outer);
    folders.sort();
    let mut expected = vec![outer, inner];
    expected.sort();
    assert_eq!(folders, expected);
    assert!(tree.subtree_folders(plain).contains(&inner));
    assert_eq!(tree.subtree_folders(strip).len(), 2);
}
