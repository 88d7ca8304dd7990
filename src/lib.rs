//! tabfolders - folder overlay for grouped tabs
//!
//! Modules:
//! - models: containment tree (items, groups, top-level containers)
//! - kernel: folder engine (lifecycle handlers, folder construction, ungroup redirection)
//! - replay: scripted host session driving the engine

pub mod kernel;
pub mod models;
pub mod replay;
