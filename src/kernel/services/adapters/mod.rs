//! Service adapters: in-memory host implementations and settings IO.

pub mod local_host;
pub mod settings;
pub mod shell;

pub use local_host::LocalTabHost;
pub use settings::{load_settings, load_settings_or_default, SettingsError};
pub use shell::RecordingShell;
