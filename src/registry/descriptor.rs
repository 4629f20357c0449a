use std::{cell::Cell, fmt, rc::Rc};

/// Identifies one registration of a field name. A widget keeps the id it was
/// given so that dropping it never removes a descriptor registered after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(pub(crate) u64);

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type ReadFn = dyn Fn() -> Option<String>;
type WriteFn = dyn Fn(&str) -> bool;
type ClearFn = dyn Fn() -> bool;

/// The record a widget hands to the registry. It carries direct accessors to
/// the widget's value cell; the registry never copies the value out of band.
///
/// Clones share an activation flag. Once the registry replaces or removes the
/// descriptor every clone turns into a no-op.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: String,
    id: Option<RegistrationId>,
    active: Rc<Cell<bool>>,
    read: Rc<ReadFn>,
    write: Rc<WriteFn>,
    clear: Rc<ClearFn>,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        read: impl Fn() -> Option<String> + 'static,
        write: impl Fn(&str) -> bool + 'static,
        clear: impl Fn() -> bool + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            id: None,
            active: Rc::new(Cell::new(true)),
            read: Rc::new(read),
            write: Rc::new(write),
            clear: Rc::new(clear),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` until the registry accepts the descriptor.
    pub fn id(&self) -> Option<RegistrationId> {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn value(&self) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        (self.read)()
    }

    /// Returns `false` when the descriptor is stale or its widget is gone.
    pub fn set_value(&self, value: &str) -> bool {
        self.is_active() && (self.write)(value)
    }

    pub fn clear_value(&self) -> bool {
        self.is_active() && (self.clear)()
    }

    pub(super) fn assign(&mut self, id: RegistrationId) {
        self.id = Some(id);
    }

    pub(super) fn deactivate(&self) {
        self.active.set(false);
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}
