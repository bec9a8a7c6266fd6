use std::fmt;
use std::rc::Rc;

use super::{MenuBar, Result, ViewerHandle};

/// A viewer window during menu construction.
pub trait HostWindow {
    fn viewer(&self) -> ViewerHandle;

    fn menu_bar_mut(&mut self) -> &mut MenuBar;
}

/// Extension point run by the host after it built a window's own menus.
pub trait MenuContributor {
    fn contribute(&self, window: &mut dyn HostWindow) -> Result<()>;
}

/// Ordered contributors, each registered under a marker string.
#[derive(Default, Clone)]
pub struct MenuContributors {
    entries: Vec<(String, Rc<dyn MenuContributor>)>,
}

impl MenuContributors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, marker: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == marker)
    }

    pub fn push(&mut self, marker: impl Into<String>, contributor: Rc<dyn MenuContributor>) {
        self.entries.push((marker.into(), contributor));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<dyn MenuContributor>)> {
        self.entries
            .iter()
            .map(|(marker, contributor)| (marker.as_str(), contributor))
    }
}

impl fmt::Debug for MenuContributors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_list()
            .entries(self.entries.iter().map(|(marker, _)| marker))
            .finish()
    }
}

/// The host window type. `None` means the host offers no contribution
/// point and the tools menu cannot be attached.
pub trait MenuHost {
    fn menu_contributors(&mut self) -> Option<&mut MenuContributors>;
}
