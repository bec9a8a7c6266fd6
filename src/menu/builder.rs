use serde::Serialize;

use crate::config::MenuConfig;
use crate::host::ViewerRef;
use crate::registry::{ToolsRegistry, segment_count, split_path};

use super::{Dispatcher, MenuCategory, MenuLeaf, MenuTree};

/// A registered path left out of the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub segments: usize,
}

#[derive(Debug, Clone)]
pub struct MenuBuild {
    pub tree: MenuTree,
    pub skipped: Vec<SkippedEntry>,
}

/// Builds the menu tree for one window. Malformed paths are skipped with a
/// warning; the registry is only read.
pub fn build_menu(registry: &ToolsRegistry, viewer: ViewerRef, config: &MenuConfig) -> MenuBuild {
    let mut tree = MenuTree::default();
    let mut skipped = Vec::new();

    for (path, entry) in registry.sorted_entries() {
        let Some((category, label)) = split_path(path) else {
            let segments = segment_count(path);
            tracing::warn!(
                path = %path,
                segments = segments,
                "menu entry ignored because it has the wrong number of levels, use 'Main menu>Sub menu'"
            );
            skipped.push(SkippedEntry {
                path: path.to_string(),
                segments,
            });
            continue;
        };

        let index = match tree
            .categories
            .iter()
            .position(|existing| existing.title == category)
        {
            Some(index) => index,
            None => {
                tree.categories.push(MenuCategory::new(category));
                tree.categories.len() - 1
            }
        };
        tree.categories[index].leaves.push(MenuLeaf {
            path: path.to_string(),
            title: label.to_string(),
            kind: entry.kind(),
            dispatcher: Dispatcher::new(label, entry.clone(), viewer.clone(), config),
        });
    }

    tracing::debug!(
        categories = tree.categories.len(),
        leaves = tree.leaf_count(),
        skipped = skipped.len(),
        "built tools menu"
    );
    MenuBuild { tree, skipped }
}
