use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderSettings {
    pub default_label: String,
    pub group_id_prefix: String,
    pub label_reassert_delay_ms: u64,
    pub nested_indent_px: u32,
    pub menu_item_id: String,
    pub style_sheet_id: String,
    pub intercept_auto_folders: bool,
}

impl Default for FolderSettings {
    fn default() -> Self {
        Self {
            default_label: "New Folder".to_string(),
            group_id_prefix: "folder-".to_string(),
            label_reassert_delay_ms: 50,
            nested_indent_px: 10,
            menu_item_id: "tab-folder-context-new".to_string(),
            style_sheet_id: "tabfolders-styles".to_string(),
            intercept_auto_folders: true,
        }
    }
}

impl FolderSettings {
    /// Indentation rule keyed off the nesting attribute.
    pub fn indent_rule(&self) -> String {
        format!(
            "tab-group[nested-level] {{\n    margin-left: var(--nested-indent, {}px) !important;\n}}\n",
            self.nested_indent_px
        )
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
