use anyhow::{Context, Result};
use jsonschema::Validator;
use serde_json::Value;

use crate::registry::ErrorMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// JSON pointer into the payload, `""` for the payload itself.
    pub path: String,
    pub keyword: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        path: impl Into<String>,
        keyword: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    /// The top-level field the issue belongs to, if any.
    pub fn field(&self) -> Option<String> {
        field_of(&self.path)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One message per field; the earliest issue for a field wins. Issues on
    /// the payload root are keyed by `""`.
    pub fn to_error_map(&self) -> ErrorMap {
        let mut map = ErrorMap::new();
        for issue in &self.0 {
            let field = issue.field().unwrap_or_default();
            map.insert_first(field, issue.message.clone());
        }
        map
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation issue(s)", self.0.len())
    }
}

impl std::error::Error for ValidationErrors {}

pub trait FormValidator {
    fn validate(&self, payload: &Value) -> Result<(), ValidationErrors>;
}

impl<F> FormValidator for F
where
    F: Fn(&Value) -> Result<(), ValidationErrors>,
{
    fn validate(&self, payload: &Value) -> Result<(), ValidationErrors> {
        self(payload)
    }
}

/// User-facing messages keyed by field and schema keyword. Declaration order
/// doubles as priority when one field fails several keywords.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: Vec<(String, String, String)>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        field: impl Into<String>,
        keyword: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.entries
            .push((field.into(), keyword.into(), message.into()));
        self
    }

    fn lookup(&self, field: &str, keyword: &str) -> Option<(usize, &str)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, (f, k, _))| f == field && k == keyword)
            .map(|(rank, (_, _, message))| (rank, message.as_str()))
    }
}

/// A compiled JSON Schema with friendly messages layered on top.
#[derive(Debug)]
pub struct SchemaValidator {
    validator: Validator,
    catalog: MessageCatalog,
}

impl SchemaValidator {
    pub fn new(schema: &Value, catalog: MessageCatalog) -> Result<Self> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .context("failed to compile JSON schema")?;
        Ok(Self { validator, catalog })
    }
}

impl FormValidator for SchemaValidator {
    fn validate(&self, payload: &Value) -> Result<(), ValidationErrors> {
        if self.validator.is_valid(payload) {
            return Ok(());
        }
        let mut ranked = Vec::new();
        for error in self.validator.iter_errors(payload) {
            let path = error.instance_path.to_string();
            let keyword = keyword_of(&error.schema_path.to_string());
            let field = field_of(&path).unwrap_or_default();
            let (rank, message) = match self.catalog.lookup(&field, &keyword) {
                Some((rank, message)) => (rank, message.to_string()),
                None => (usize::MAX, error.to_string()),
            };
            ranked.push((rank, ValidationIssue::new(path, keyword, message)));
        }
        ranked.sort_by_key(|(rank, _)| *rank);
        Err(ValidationErrors(
            ranked.into_iter().map(|(_, issue)| issue).collect(),
        ))
    }
}

fn keyword_of(schema_path: &str) -> String {
    schema_path
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn field_of(path: &str) -> Option<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let segment = trimmed.split('/').next().unwrap_or_default();
    if segment.is_empty() {
        return None;
    }
    Some(segment.replace("~1", "/").replace("~0", "~"))
}
