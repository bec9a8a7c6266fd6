use std::rc::Rc;

use crate::config::MenuConfig;
use crate::host::Menu;
use crate::registry::{EntryKind, ToolsRegistry};

use super::Dispatcher;

#[derive(Debug, Clone)]
pub struct MenuLeaf {
    pub path: String,
    pub title: String,
    pub kind: EntryKind,
    pub dispatcher: Dispatcher,
}

#[derive(Debug, Clone)]
pub struct MenuCategory {
    pub title: String,
    pub leaves: Vec<MenuLeaf>,
}

impl MenuCategory {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            leaves: Vec::new(),
        }
    }

    pub fn leaf_titles(&self) -> Vec<&str> {
        self.leaves.iter().map(|leaf| leaf.title.as_str()).collect()
    }
}

/// Categories in first-seen order over the sorted paths.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    pub categories: Vec<MenuCategory>,
}

impl MenuTree {
    pub fn category_titles(&self) -> Vec<&str> {
        self.categories
            .iter()
            .map(|category| category.title.as_str())
            .collect()
    }

    pub fn category(&self, title: &str) -> Option<&MenuCategory> {
        self.categories
            .iter()
            .find(|category| category.title == title)
    }

    pub fn leaf(&self, category: &str, title: &str) -> Option<&MenuLeaf> {
        self.category(category)?
            .leaves
            .iter()
            .find(|leaf| leaf.title == title)
    }

    pub fn leaf_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.leaves.len())
            .sum()
    }

    /// Converts the tree into a host menu: one submenu per category, then a
    /// separator and the diagnostics leaf listing `registry`.
    pub fn into_menu(self, config: &MenuConfig, registry: ToolsRegistry) -> Menu {
        let mut menu = Menu::new(config.title.clone());
        for category in self.categories {
            let mut submenu = Menu::new(category.title);
            for leaf in category.leaves {
                let dispatcher = leaf.dispatcher;
                submenu.add_action(
                    leaf.title,
                    Rc::new(move || dispatcher.activate().map(|_| ())),
                );
            }
            menu.add_menu(submenu);
        }

        menu.add_separator();
        menu.add_action(
            config.info_label.clone(),
            Rc::new(move || {
                tracing::info!(entries = registry.len(), "listing registered tools");
                print!("{}", registry.listing_text());
                Ok(())
            }),
        );
        menu
    }
}
