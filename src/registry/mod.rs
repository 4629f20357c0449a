//! Per-form table of named fields.
//!
//! Widgets register a [`FieldDescriptor`] under their name and the registry
//! reaches their values only through it. The table also owns the form's
//! current error map, which widgets read back when they draw.

mod descriptor;
mod errors;

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub use descriptor::{FieldDescriptor, RegistrationId};
pub use errors::ErrorMap;

#[derive(Debug, Default)]
struct FieldTable {
    fields: IndexMap<String, FieldDescriptor>,
    errors: ErrorMap,
    next_id: u64,
}

/// Handle to one form's field table. Clones point at the same table.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    table: Rc<RefCell<FieldTable>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptor` under its name, replacing and deactivating any
    /// descriptor already registered under that name. Empty names are refused.
    pub fn register_field(&self, mut descriptor: FieldDescriptor) -> Option<RegistrationId> {
        if descriptor.name().is_empty() {
            warn!("refusing to register a field without a name");
            return None;
        }
        let mut table = self.table.borrow_mut();
        table.next_id += 1;
        let id = RegistrationId(table.next_id);
        descriptor.assign(id);
        let name = descriptor.name().to_string();
        if let Some(previous) = table.fields.insert(name.clone(), descriptor) {
            previous.deactivate();
            debug!(field = %name, previous = ?previous.id(), %id, "replaced field descriptor");
        } else {
            debug!(field = %name, %id, "registered field");
        }
        Some(id)
    }

    pub fn unregister_field(&self, name: &str) -> bool {
        let removed = self.table.borrow_mut().fields.shift_remove(name);
        match removed {
            Some(descriptor) => {
                descriptor.deactivate();
                debug!(field = %name, "unregistered field");
                true
            }
            None => false,
        }
    }

    /// Removes `name` only while it is still registered with `id`.
    pub fn release(&self, name: &str, id: RegistrationId) -> bool {
        let mut table = self.table.borrow_mut();
        let current = table.fields.get(name).and_then(FieldDescriptor::id);
        if current != Some(id) {
            debug!(field = %name, %id, "stale release ignored");
            return false;
        }
        if let Some(descriptor) = table.fields.shift_remove(name) {
            descriptor.deactivate();
        }
        debug!(field = %name, %id, "released field");
        true
    }

    pub fn descriptor(&self, name: &str) -> Option<FieldDescriptor> {
        self.table.borrow().fields.get(name).cloned()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.table.borrow().fields.contains_key(name)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.table.borrow().fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.table.borrow().fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().fields.is_empty()
    }

    pub fn field_value(&self, name: &str) -> Option<String> {
        self.descriptor(name)?.value()
    }

    pub fn set_field_value(&self, name: &str, value: &str) -> bool {
        self.descriptor(name)
            .is_some_and(|descriptor| descriptor.set_value(value))
    }

    pub fn clear_field(&self, name: &str) -> bool {
        self.descriptor(name)
            .is_some_and(|descriptor| descriptor.clear_value())
    }

    /// Reads every registered field, in registration order.
    pub fn collect_payload(&self) -> Value {
        let mut payload = Map::new();
        for descriptor in self.descriptors() {
            if let Some(value) = descriptor.value() {
                payload.insert(descriptor.name().to_string(), Value::String(value));
            }
        }
        Value::Object(payload)
    }

    pub fn set_errors(&self, errors: ErrorMap) {
        debug!(count = errors.len(), "replacing form errors");
        self.table.borrow_mut().errors = errors;
    }

    pub fn set_field_error(&self, name: &str, message: impl Into<String>) {
        self.table.borrow_mut().errors.insert(name, message);
    }

    pub fn clear_errors(&self) {
        self.table.borrow_mut().errors = ErrorMap::new();
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.table.borrow().errors.get(name).map(str::to_string)
    }

    pub fn errors(&self) -> ErrorMap {
        self.table.borrow().errors.clone()
    }

    pub fn error_count(&self) -> usize {
        self.table.borrow().errors.len()
    }

    /// Messages for names that no mounted widget can show.
    pub fn unclaimed_errors(&self) -> Vec<String> {
        let table = self.table.borrow();
        table
            .errors
            .iter()
            .filter(|(field, _)| !table.fields.contains_key(*field))
            .map(|(field, message)| format!("{field}: {message}"))
            .collect()
    }

    /// Empties every field and drops the error map.
    pub fn reset(&self) {
        for descriptor in self.descriptors() {
            descriptor.clear_value();
        }
        self.clear_errors();
    }

    // Accessors run outside the table borrow so a widget callback can never
    // trip over it.
    fn descriptors(&self) -> Vec<FieldDescriptor> {
        self.table.borrow().fields.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use serde_json::json;

    use super::*;

    fn cell_descriptor(name: &str, cell: &Rc<RefCell<String>>) -> FieldDescriptor {
        let read = Rc::clone(cell);
        let write = Rc::clone(cell);
        let clear = Rc::clone(cell);
        FieldDescriptor::new(
            name,
            move || Some(read.borrow().clone()),
            move |value| {
                *write.borrow_mut() = value.to_string();
                true
            },
            move || {
                clear.borrow_mut().clear();
                true
            },
        )
    }

    #[test]
    fn payload_follows_registration_order() {
        let registry = FieldRegistry::new();
        let email = Rc::new(RefCell::new("a@b.com".to_string()));
        let password = Rc::new(RefCell::new("secret".to_string()));
        registry.register_field(cell_descriptor("email", &email));
        registry.register_field(cell_descriptor("password", &password));

        assert_eq!(registry.field_names(), vec!["email", "password"]);
        assert_eq!(
            registry.collect_payload(),
            json!({"email": "a@b.com", "password": "secret"})
        );
    }

    #[test]
    fn replacement_deactivates_previous_descriptor() {
        let registry = FieldRegistry::new();
        let first = Rc::new(RefCell::new(String::new()));
        let second = Rc::new(RefCell::new(String::new()));
        let first_id = registry
            .register_field(cell_descriptor("email", &first))
            .expect("first id");
        let stale = registry.descriptor("email").expect("descriptor");
        let second_id = registry
            .register_field(cell_descriptor("email", &second))
            .expect("second id");

        assert_ne!(first_id, second_id);
        assert_eq!(registry.len(), 1);
        assert!(!stale.set_value("ghost"));
        assert_eq!(first.borrow().as_str(), "");
        assert!(registry.set_field_value("email", "live"));
        assert_eq!(second.borrow().as_str(), "live");
    }

    #[test]
    fn release_ignores_superseded_registration() {
        let registry = FieldRegistry::new();
        let cell = Rc::new(RefCell::new(String::new()));
        let old = registry
            .register_field(cell_descriptor("email", &cell))
            .expect("id");
        registry.register_field(cell_descriptor("email", &cell));

        assert!(!registry.release("email", old));
        assert!(registry.is_registered("email"));
    }

    #[test]
    fn empty_names_are_refused() {
        let registry = FieldRegistry::new();
        let cell = Rc::new(RefCell::new(String::new()));
        assert!(registry.register_field(cell_descriptor("", &cell)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn unclaimed_errors_name_their_field() {
        let registry = FieldRegistry::new();
        let cell = Rc::new(RefCell::new(String::new()));
        registry.register_field(cell_descriptor("email", &cell));
        registry.set_errors(ErrorMap::from_iter([
            ("email", "Digite seu email"),
            ("token", "expired"),
        ]));

        assert_eq!(registry.error_count(), 2);
        assert_eq!(registry.unclaimed_errors(), vec!["token: expired"]);
    }

    #[test]
    fn reset_clears_values_and_errors() {
        let registry = FieldRegistry::new();
        let cell = Rc::new(RefCell::new("x".to_string()));
        registry.register_field(cell_descriptor("email", &cell));
        registry.set_field_error("email", "bad");
        registry.reset();

        assert_eq!(registry.field_value("email").as_deref(), Some(""));
        assert!(registry.error("email").is_none());
    }
}
