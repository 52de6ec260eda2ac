//! Label and field selectors for list queries.
//!
//! `labelSelector` terms match `metadata.labels`; `fieldSelector` terms
//! match a dot path into the resource's JSON form. Every term must match.

use equipments_sdk::extension::Extension;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("invalid label selector \"{0}\"")]
    InvalidLabel(String),

    #[error("invalid field selector \"{0}\"")]
    InvalidField(String),
}

/// One `labelSelector` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelRequirement {
    Equals(String, String),
    NotEquals(String, String),
    Exists(String),
    NotExists(String),
}

/// One `fieldSelector` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRequirement {
    Equals(String, String),
    NotEquals(String, String),
}

/// Parsed selectors from a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    pub labels: Vec<LabelRequirement>,
    pub fields: Vec<FieldRequirement>,
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(|c| c.is_whitespace() || "=!".contains(c))
}

impl LabelRequirement {
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let term = raw.trim();
        let invalid = || SelectorError::InvalidLabel(raw.to_string());

        if let Some((key, value)) = term.split_once("!=") {
            let key = key.trim();
            if !is_valid_key(key) {
                return Err(invalid());
            }
            return Ok(Self::NotEquals(key.to_string(), value.trim().to_string()));
        }
        if let Some((key, value)) = term.split_once('=') {
            let key = key.trim();
            if !is_valid_key(key) {
                return Err(invalid());
            }
            return Ok(Self::Equals(key.to_string(), value.trim().to_string()));
        }
        if let Some(key) = term.strip_prefix('!') {
            let key = key.trim();
            if !is_valid_key(key) {
                return Err(invalid());
            }
            return Ok(Self::NotExists(key.to_string()));
        }
        if !is_valid_key(term) {
            return Err(invalid());
        }
        Ok(Self::Exists(term.to_string()))
    }

    fn matches(&self, labels: Option<&std::collections::BTreeMap<String, String>>) -> bool {
        let get = |key: &str| labels.and_then(|l| l.get(key));
        match self {
            Self::Equals(key, value) => get(key).is_some_and(|v| v == value),
            Self::NotEquals(key, value) => get(key).is_none_or(|v| v != value),
            Self::Exists(key) => get(key).is_some(),
            Self::NotExists(key) => get(key).is_none(),
        }
    }
}

impl FieldRequirement {
    pub fn parse(raw: &str) -> Result<Self, SelectorError> {
        let term = raw.trim();
        let invalid = || SelectorError::InvalidField(raw.to_string());

        let (path, value, negate) = if let Some((path, value)) = term.split_once("!=") {
            (path, value, true)
        } else if let Some((path, value)) = term.split_once('=') {
            (path, value, false)
        } else {
            return Err(invalid());
        };

        let path = path.trim();
        if !is_valid_key(path) || path.split('.').any(str::is_empty) {
            return Err(invalid());
        }

        let (path, value) = (path.to_string(), value.trim().to_string());
        Ok(if negate {
            Self::NotEquals(path, value)
        } else {
            Self::Equals(path, value)
        })
    }

    fn matches(&self, document: &Value) -> bool {
        match self {
            Self::Equals(path, value) => field_text(document, path).as_deref() == Some(value),
            Self::NotEquals(path, value) => field_text(document, path).as_deref() != Some(value),
        }
    }
}

/// Resolve a dot path to a comparable string. Null and missing are `None`.
fn field_text(document: &Value, path: &str) -> Option<String> {
    let value = path
        .split('.')
        .try_fold(document, |current, segment| current.get(segment))?;
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl Selectors {
    /// Parse raw `labelSelector` and `fieldSelector` values. Empty values
    /// are ignored.
    pub fn parse(labels: &[String], fields: &[String]) -> Result<Self, SelectorError> {
        let labels = labels
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| LabelRequirement::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let fields = fields
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| FieldRequirement::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { labels, fields })
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.fields.is_empty()
    }

    /// True if the resource satisfies every term.
    pub fn matches<T: Extension>(&self, resource: &T) -> bool {
        let labels = resource.metadata().labels.as_ref();
        if !self.labels.iter().all(|req| req.matches(labels)) {
            return false;
        }
        if self.fields.is_empty() {
            return true;
        }
        match serde_json::to_value(resource) {
            Ok(document) => self.fields.iter().all(|req| req.matches(&document)),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use equipments_sdk::equipment::{Equipment, EquipmentSpec};
    use std::collections::BTreeMap;

    fn camera() -> Equipment {
        let mut e = Equipment::new("camera", EquipmentSpec::new("Camera", "https://x", "photo"));
        e.metadata.labels = Some(BTreeMap::from([("tier".to_string(), "pro".to_string())]));
        e.spec.priority = Some(2);
        e
    }

    fn selectors(labels: &[&str], fields: &[&str]) -> Selectors {
        let labels: Vec<String> = labels.iter().map(|s| s.to_string()).collect();
        let fields: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
        Selectors::parse(&labels, &fields).unwrap()
    }

    #[test]
    fn parses_all_label_forms() {
        let parsed = selectors(&["a=b", "a!=b", "a", "!a"], &[]);
        assert_eq!(
            parsed.labels,
            vec![
                LabelRequirement::Equals("a".into(), "b".into()),
                LabelRequirement::NotEquals("a".into(), "b".into()),
                LabelRequirement::Exists("a".into()),
                LabelRequirement::NotExists("a".into()),
            ]
        );
    }

    #[test]
    fn rejects_malformed_terms() {
        assert!(LabelRequirement::parse("=b").is_err());
        assert!(LabelRequirement::parse("!").is_err());
        assert!(LabelRequirement::parse("a b").is_err());
        assert!(FieldRequirement::parse("spec.groupName").is_err());
        assert!(FieldRequirement::parse("spec..groupName=x").is_err());
        assert!(FieldRequirement::parse("=x").is_err());
    }

    #[test]
    fn blank_terms_are_ignored() {
        assert!(selectors(&["", "  "], &[""]).is_empty());
    }

    #[test]
    fn label_terms_match_metadata() {
        let e = camera();
        assert!(selectors(&["tier=pro"], &[]).matches(&e));
        assert!(!selectors(&["tier=basic"], &[]).matches(&e));
        assert!(selectors(&["tier!=basic"], &[]).matches(&e));
        assert!(selectors(&["missing!=x"], &[]).matches(&e));
        assert!(selectors(&["tier"], &[]).matches(&e));
        assert!(!selectors(&["!tier"], &[]).matches(&e));
    }

    #[test]
    fn field_terms_match_json_paths() {
        let e = camera();
        assert!(selectors(&[], &["spec.groupName=photo"]).matches(&e));
        assert!(selectors(&[], &["metadata.name=camera"]).matches(&e));
        assert!(selectors(&[], &["spec.priority=2"]).matches(&e));
        assert!(!selectors(&[], &["spec.groupName!=photo"]).matches(&e));
        assert!(!selectors(&[], &["spec.cover=x"]).matches(&e));
        assert!(selectors(&[], &["spec.cover!=x"]).matches(&e));
    }

    #[test]
    fn all_terms_must_match() {
        let e = camera();
        assert!(selectors(&["tier=pro"], &["spec.groupName=photo"]).matches(&e));
        assert!(!selectors(&["tier=pro"], &["spec.groupName=video"]).matches(&e));
    }
}
