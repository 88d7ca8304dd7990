use crate::kernel::services::ports::{HostError, HostShell, MenuItem, StyleSheet};

/// Host shell that keeps contributions in memory.
#[derive(Debug, Default)]
pub struct RecordingShell {
    menu_items: Vec<MenuItem>,
    style_sheets: Vec<StyleSheet>,
    has_context_menu: bool,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self {
            has_context_menu: true,
            ..Self::default()
        }
    }

    /// Shell whose window has no tab context menu.
    pub fn without_context_menu() -> Self {
        Self::default()
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        &self.menu_items
    }

    pub fn style_sheets(&self) -> &[StyleSheet] {
        &self.style_sheets
    }
}

impl HostShell for RecordingShell {
    fn add_menu_item(&mut self, item: MenuItem) -> Result<(), HostError> {
        if !self.has_context_menu {
            return Err(HostError::Unavailable("tab context menu"));
        }
        self.menu_items.retain(|m| m.id != item.id);
        self.menu_items.push(item);
        Ok(())
    }

    fn remove_menu_item(&mut self, id: &str) -> Result<(), HostError> {
        self.menu_items.retain(|m| m.id != id);
        Ok(())
    }

    fn add_style_sheet(&mut self, sheet: StyleSheet) -> Result<(), HostError> {
        self.style_sheets.retain(|s| s.id != sheet.id);
        self.style_sheets.push(sheet);
        Ok(())
    }

    fn remove_style_sheet(&mut self, id: &str) -> Result<(), HostError> {
        self.style_sheets.retain(|s| s.id != id);
        Ok(())
    }
}
