//! Data model layer

pub mod tab_tree;

pub use tab_tree::{
    ContainerKind, Group, GroupKind, Item, NodeId, TabTree, TabTreeRow, TreeError,
};
