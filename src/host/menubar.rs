use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::menu::DispatchError;

use super::HostError;

pub type Trigger = Rc<dyn Fn() -> Result<(), DispatchError>>;

#[derive(Clone)]
pub struct MenuAction {
    pub label: String,
    trigger: Trigger,
}

impl MenuAction {
    pub fn new(label: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            label: label.into(),
            trigger,
        }
    }

    pub fn trigger(&self) -> Result<(), DispatchError> {
        (self.trigger)()
    }
}

impl fmt::Debug for MenuAction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MenuAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum MenuItem {
    Submenu(Menu),
    Action(MenuAction),
    Separator,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutlineItem {
    Submenu {
        title: String,
        items: Vec<OutlineItem>,
    },
    Action {
        label: String,
    },
    Separator,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub title: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn add_menu(&mut self, menu: Menu) {
        self.items.push(MenuItem::Submenu(menu));
    }

    pub fn add_action(&mut self, label: impl Into<String>, trigger: Trigger) {
        self.items
            .push(MenuItem::Action(MenuAction::new(label, trigger)));
    }

    pub fn add_separator(&mut self) {
        self.items.push(MenuItem::Separator);
    }

    pub fn submenu(&self, title: &str) -> Option<&Menu> {
        self.items.iter().find_map(|item| match item {
            MenuItem::Submenu(menu) if menu.title == title => Some(menu),
            _ => None,
        })
    }

    pub fn action(&self, label: &str) -> Option<&MenuAction> {
        self.items.iter().find_map(|item| match item {
            MenuItem::Action(action) if action.label == label => Some(action),
            _ => None,
        })
    }

    /// Labels of direct children; separators show up as `"---"`.
    pub fn item_labels(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|item| match item {
                MenuItem::Submenu(menu) => menu.title.as_str(),
                MenuItem::Action(action) => action.label.as_str(),
                MenuItem::Separator => "---",
            })
            .collect()
    }

    pub fn outline(&self) -> OutlineItem {
        OutlineItem::Submenu {
            title: self.title.clone(),
            items: self
                .items
                .iter()
                .map(|item| match item {
                    MenuItem::Submenu(menu) => menu.outline(),
                    MenuItem::Action(action) => OutlineItem::Action {
                        label: action.label.clone(),
                    },
                    MenuItem::Separator => OutlineItem::Separator,
                })
                .collect(),
        }
    }

    fn find_action(&self, path: &[&str]) -> Option<&MenuAction> {
        match path {
            [] => None,
            [label] => self.action(label),
            [title, rest @ ..] => self.submenu(title)?.find_action(rest),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuBar {
    menus: Vec<Menu>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn titles(&self) -> Vec<&str> {
        self.menus.iter().map(|menu| menu.title.as_str()).collect()
    }

    pub fn menu(&self, title: &str) -> Option<&Menu> {
        self.menus.iter().find(|menu| menu.title == title)
    }

    pub fn add_menu(&mut self, menu: Menu) {
        self.menus.push(menu);
    }

    /// Inserts `menu` right before `reference`; appends it when `reference`
    /// is not in the bar. Returns whether the reference was found.
    pub fn insert_before(&mut self, reference: &str, menu: Menu) -> bool {
        match self.menus.iter().position(|existing| existing.title == reference) {
            Some(index) => {
                self.menus.insert(index, menu);
                true
            }
            None => {
                self.menus.push(menu);
                false
            }
        }
    }

    /// Runs the action at `path` (menu title, submenu titles, leaf label).
    pub fn activate(&self, path: &[&str]) -> Result<(), DispatchError> {
        let action = match path {
            [title, rest @ ..] => self.menu(title).and_then(|menu| menu.find_action(rest)),
            [] => None,
        };
        let action = action.ok_or_else(|| HostError::UnknownMenuItem(path.join(" > ")))?;
        action.trigger()
    }
}
