use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::config::MenuConfig;
use crate::form::{FormHandle, FunctionForm};
use crate::host::{DockedWidget, ViewerRef, WidgetContext, WidgetHandle};
use crate::registry::{EntryKind, EntryTarget, RegisteredEntry};

use super::Result;

pub enum Activation {
    Invoked,
    DockedForm(FormHandle),
    DockedWidget(WidgetHandle),
}

impl fmt::Debug for Activation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoked => formatter.write_str("Invoked"),
            Self::DockedForm(form) => formatter.debug_tuple("DockedForm").field(form).finish(),
            Self::DockedWidget(_) => formatter.write_str("DockedWidget(..)"),
        }
    }
}

/// Click handler bound to one menu leaf.
#[derive(Clone)]
pub struct Dispatcher {
    title: String,
    entry: RegisteredEntry,
    viewer: ViewerRef,
    config: MenuConfig,
}

impl Dispatcher {
    pub fn new(
        title: impl Into<String>,
        entry: RegisteredEntry,
        viewer: ViewerRef,
        config: &MenuConfig,
    ) -> Self {
        Self {
            title: title.into(),
            entry,
            viewer,
            config: config.clone(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> EntryKind {
        self.entry.kind()
    }

    /// Failures are returned to the caller untouched; nothing is retried.
    pub fn activate(&self) -> Result<Activation> {
        tracing::info!(entry = %self.title, kind = ?self.kind(), "tools menu entry activated");
        match &self.entry.target {
            EntryTarget::Action(target) => {
                self.viewer.with_mut(|viewer| target(viewer))?;
                Ok(Activation::Invoked)
            }
            EntryTarget::Function { target, spec } => {
                let form = FunctionForm::new(
                    self.title.clone(),
                    Arc::clone(spec),
                    Arc::clone(target),
                    self.viewer.clone(),
                    self.entry.args.clone(),
                    &self.config,
                )
                .into_handle();
                self.viewer
                    .with_mut(|viewer| -> crate::host::Result<()> {
                        viewer.add_dock_widget(
                            DockedWidget::Form(Rc::clone(&form)),
                            self.config.dock_area,
                            &self.title,
                        )?;
                        Ok(())
                    })??;
                // A docked form's own dismiss button does not work; the host
                // panel keeps its close control.
                form.borrow_mut().disable_dismiss();
                Ok(Activation::DockedForm(form))
            }
            EntryTarget::DockWidget { factory, spec } => {
                let context = WidgetContext {
                    viewer: spec.needs_viewer.then(|| self.viewer.clone()),
                };
                let widget: WidgetHandle = Rc::new(RefCell::new(factory(context)?));
                self.viewer.with_mut(|viewer| {
                    viewer
                        .add_dock_widget(
                            DockedWidget::Widget(Rc::clone(&widget)),
                            self.config.dock_area,
                            &self.title,
                        )
                        .map(|_| ())
                })??;
                Ok(Activation::DockedWidget(widget))
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Dispatcher")
            .field("title", &self.title)
            .field("kind", &self.kind())
            .field("viewer", &self.viewer)
            .finish()
    }
}
