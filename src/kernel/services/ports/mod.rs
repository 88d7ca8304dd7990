//! Service ports: traits + data contracts.

pub mod host;
pub mod settings;

pub use host::{HostError, HostShell, MenuItem, SelectionProvider, StyleSheet, TabHost};
pub use settings::FolderSettings;
