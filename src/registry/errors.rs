use indexmap::IndexMap;

/// Field name to message, in the order the messages were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: IndexMap<String, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for a field.
    pub fn insert_first(&mut self, field: impl Into<String>, message: impl Into<String>) -> bool {
        let field = field.into();
        if self.entries.contains_key(&field) {
            return false;
        }
        self.entries.insert(field, message.into());
        true
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ErrorMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ErrorMap::new();
        for (field, message) in iter {
            map.insert(field, message);
        }
        map
    }
}
