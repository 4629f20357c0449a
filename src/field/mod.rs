//! The bridge between a terminal text input and a [`FieldRegistry`].
//!
//! A [`TextField`] owns three cells that never feed into each other:
//!
//! * the value cell, the single source of truth for submitted data. Every
//!   keystroke overwrites it and nothing else;
//! * the edit buffer, what the terminal shows;
//! * the presentation flags (`focused`, `filled`), which only move on focus,
//!   blur and programmatic clears.
//!
//! On mount the widget registers a [`FieldDescriptor`] whose accessors hold
//! weak references to those cells, so a descriptor that outlives its widget
//! degrades into a no-op instead of reaching a dead input.

mod editor;
mod props;
mod visual;

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{trace, warn};

use crate::registry::{FieldDescriptor, FieldRegistry, RegistrationId};

pub use editor::EditBuffer;
pub use props::{InputProps, KeyboardType, ReturnKey};
pub use visual::{InputVisual, Presentation, Tone};

use editor::{EditEffect, apply_key};

const MASK: char = '•';

#[derive(Debug, Default)]
struct FieldCells {
    value: RefCell<String>,
    native: RefCell<EditBuffer>,
    presentation: RefCell<Presentation>,
}

impl FieldCells {
    fn seeded(initial: &str) -> Self {
        Self {
            value: RefCell::new(initial.to_string()),
            native: RefCell::new(EditBuffer::with_text(initial)),
            presentation: RefCell::new(Presentation::default()),
        }
    }

    fn write(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
        self.native.borrow_mut().replace(value);
    }

    fn clear(&self) {
        self.value.borrow_mut().clear();
        self.native.borrow_mut().clear();
        self.presentation.borrow_mut().set_filled(false);
    }
}

/// Result of routing a key to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKeyOutcome {
    /// The text changed. The value cell already holds the new text.
    Edited,
    CursorMoved,
    /// Enter was pressed; the parent decides what the return key does.
    Return(ReturnKey),
    Ignored,
}

/// Narrow capability handed to a parent so it can move focus into the field.
#[derive(Debug, Clone)]
pub struct FieldHandle {
    cells: Weak<FieldCells>,
}

impl FieldHandle {
    /// Returns `false` once the field has been dropped.
    pub fn focus(&self) -> bool {
        match self.cells.upgrade() {
            Some(cells) => {
                cells.presentation.borrow_mut().set_focused(true);
                true
            }
            None => false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.cells.strong_count() > 0
    }
}

#[derive(Debug)]
pub struct TextField {
    name: String,
    icon: String,
    props: InputProps,
    cells: Rc<FieldCells>,
    registry: Option<FieldRegistry>,
    registration: Option<RegistrationId>,
}

impl TextField {
    /// Builds the field and registers it with `registry` under `name`.
    pub fn mount(
        registry: &FieldRegistry,
        name: impl Into<String>,
        icon: impl Into<String>,
        props: InputProps,
    ) -> Self {
        let mut field = Self::detached(name, icon, props);
        let registration = registry.register_field(field.descriptor());
        if registration.is_none() {
            warn!(field = %field.name, "field mounted without a registration");
        }
        field.registry = Some(registry.clone());
        field.registration = registration;
        field
    }

    /// A field with no enclosing form. Its value is never submitted.
    pub fn detached(name: impl Into<String>, icon: impl Into<String>, props: InputProps) -> Self {
        let initial = props.default_value.clone().unwrap_or_default();
        Self {
            name: name.into(),
            icon: icon.into(),
            cells: Rc::new(FieldCells::seeded(&initial)),
            props,
            registry: None,
            registration: None,
        }
    }

    fn descriptor(&self) -> FieldDescriptor {
        let read = Rc::downgrade(&self.cells);
        let write = Rc::downgrade(&self.cells);
        let clear = Rc::downgrade(&self.cells);
        FieldDescriptor::new(
            self.name.clone(),
            move || read.upgrade().map(|cells| cells.value.borrow().clone()),
            move |value| match write.upgrade() {
                Some(cells) => {
                    cells.write(value);
                    true
                }
                None => false,
            },
            move || match clear.upgrade() {
                Some(cells) => {
                    cells.clear();
                    true
                }
                None => false,
            },
        )
    }

    pub fn handle(&self) -> FieldHandle {
        FieldHandle {
            cells: Rc::downgrade(&self.cells),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn props(&self) -> &InputProps {
        &self.props
    }

    pub fn registration(&self) -> Option<RegistrationId> {
        self.registration
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FieldKeyOutcome {
        if key.code == KeyCode::Enter {
            return FieldKeyOutcome::Return(self.props.return_key);
        }
        let (effect, text) = {
            let mut native = self.cells.native.borrow_mut();
            let effect = apply_key(&mut native, &self.props, key);
            (effect, native.text().to_string())
        };
        match effect {
            EditEffect::Text => {
                self.change_text(text);
                FieldKeyOutcome::Edited
            }
            EditEffect::Cursor => FieldKeyOutcome::CursorMoved,
            EditEffect::None => FieldKeyOutcome::Ignored,
        }
    }

    /// Overwrites the value cell with the full text of the input. Presentation
    /// state is left alone.
    pub fn change_text(&self, text: impl Into<String>) {
        let text = text.into();
        trace!(field = %self.name, len = text.chars().count(), "text changed");
        *self.cells.value.borrow_mut() = text;
    }

    pub fn focus(&self) {
        self.cells.presentation.borrow_mut().set_focused(true);
    }

    pub fn blur(&self) {
        let filled = !self.cells.value.borrow().is_empty();
        let mut presentation = self.cells.presentation.borrow_mut();
        presentation.set_focused(false);
        presentation.set_filled(filled);
    }

    pub fn value(&self) -> String {
        self.cells.value.borrow().clone()
    }

    /// The text as drawn, masked for secure entry.
    pub fn display_text(&self) -> String {
        let native = self.cells.native.borrow();
        if self.props.secure_entry {
            native.text().chars().map(|_| MASK).collect()
        } else {
            native.text().to_string()
        }
    }

    pub fn cursor(&self) -> usize {
        self.cells.native.borrow().cursor()
    }

    pub fn presentation(&self) -> Presentation {
        *self.cells.presentation.borrow()
    }

    pub fn presentation_revision(&self) -> u64 {
        self.cells.presentation.borrow().revision()
    }

    pub fn is_focused(&self) -> bool {
        self.cells.presentation.borrow().focused()
    }

    pub fn is_filled(&self) -> bool {
        self.cells.presentation.borrow().filled()
    }

    /// `None` once another widget has taken over this name.
    pub fn error_message(&self) -> Option<String> {
        let registry = self.registry.as_ref()?;
        let current = registry.descriptor(&self.name).and_then(|d| d.id());
        if current.is_none() || current != self.registration {
            return None;
        }
        registry.error(&self.name)
    }

    pub fn is_errored(&self) -> bool {
        self.error_message().is_some()
    }

    pub fn visual(&self) -> InputVisual {
        InputVisual::resolve(&self.presentation(), self.is_errored())
    }
}

impl Drop for TextField {
    fn drop(&mut self) {
        if let (Some(registry), Some(id)) = (&self.registry, self.registration) {
            registry.release(&self.name, id);
        }
    }
}
