use serde::{Deserialize, Serialize};

use crate::host::DockArea;

use super::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Title of the contributed top-level menu.
    pub title: String,
    /// Host menu the tools menu is inserted in front of.
    pub reference_menu: String,
    /// Label of the trailing diagnostics leaf.
    pub info_label: String,
    pub dock_area: DockArea,
    /// Point size of point results relative to the largest displayed dimension.
    pub point_size_fraction: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title: "Tools".to_string(),
            reference_menu: "Help".to_string(),
            info_label: "Tools Info".to_string(),
            dock_area: DockArea::Right,
            point_size_fraction: 0.01,
        }
    }
}

impl MenuConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("reference_menu", &self.reference_menu),
            ("info_label", &self.info_label),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("`{field}` must not be empty")));
            }
        }
        if !self.point_size_fraction.is_finite() || self.point_size_fraction <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "`point_size_fraction` must be a positive number, got {}",
                self.point_size_fraction
            )));
        }
        Ok(())
    }
}
