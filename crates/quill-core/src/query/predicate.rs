//! Predicates over documents and the query object they compose into.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A document that the query pipeline can search and filter.
pub trait Document {
    /// Field matched by the keyword search.
    const SEARCH_FIELD: &'static str;

    /// Kind of a filterable field, `None` if the field is unknown.
    fn field_kind(name: &str) -> Option<FieldKind>;

    /// Whether a field holds a list. List fields only take equality filters.
    fn is_list(_name: &str) -> bool {
        false
    }

    /// Values stored under a field. List fields yield one value per element,
    /// unset optional fields yield nothing.
    fn field(&self, name: &str) -> Vec<FieldValue>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Uuid,
    Timestamp,
    Number,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Number(f64),
}

impl FieldValue {
    /// Coerce a raw parameter into a value of the given kind.
    ///
    /// Timestamps accept RFC 3339 or a plain `YYYY-MM-DD` date (midnight UTC).
    pub fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match kind {
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Uuid => Uuid::parse_str(raw).ok().map(FieldValue::Uuid),
            FieldKind::Number => raw.parse::<f64>().ok().map(FieldValue::Number),
            FieldKind::Timestamp => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                })
                .map(FieldValue::Timestamp),
        }
    }

    /// Ordering between values of the same kind; `None` across kinds.
    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CmpOp {
    /// Operator embedded in a parameter key, e.g. `gte` in `createdAt[gte]`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "gt" => Some(CmpOp::Gt),
            "gte" => Some(CmpOp::Gte),
            "lt" => Some(CmpOp::Lt),
            "lte" => Some(CmpOp::Lte),
            _ => None,
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Eq => ordering == Ordering::Equal,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Gte => ordering != Ordering::Less,
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Lte => ordering != Ordering::Greater,
        }
    }
}

/// A single condition on one field.
///
/// On multi-valued fields a condition holds when any stored value satisfies it.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Case-insensitive substring match on a text field.
    Contains { field: String, needle: String },
    Compare {
        field: String,
        op: CmpOp,
        value: FieldValue,
    },
    AnyOf {
        field: String,
        values: Vec<FieldValue>,
    },
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: FieldValue) -> Self {
        Condition::Compare {
            field: field.into(),
            op: CmpOp::Eq,
            value,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Condition::Contains { field, .. }
            | Condition::Compare { field, .. }
            | Condition::AnyOf { field, .. } => field,
        }
    }

    pub fn matches<D: Document>(&self, doc: &D) -> bool {
        let stored = doc.field(self.field());
        match self {
            Condition::Contains { needle, .. } => {
                let needle = needle.to_lowercase();
                stored.iter().any(|v| match v {
                    FieldValue::Text(text) => text.to_lowercase().contains(&needle),
                    _ => false,
                })
            }
            Condition::Compare { op, value, .. } => stored
                .iter()
                .any(|v| v.compare(value).is_some_and(|ord| op.holds(ord))),
            Condition::AnyOf { values, .. } => stored.iter().any(|v| values.contains(v)),
        }
    }
}

/// Conjunction of conditions. The empty predicate matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
        }
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches<D: Document>(&self, doc: &D) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }
}

/// Skip/limit window applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

/// A predicate plus an optional result window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub predicate: Predicate,
    pub window: Option<Window>,
}

impl DocumentQuery {
    pub fn matching(predicate: Predicate) -> Self {
        Self {
            predicate,
            window: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Book {
        title: String,
        pages: f64,
        labels: Vec<String>,
    }

    impl Document for Book {
        const SEARCH_FIELD: &'static str = "title";

        fn field_kind(name: &str) -> Option<FieldKind> {
            match name {
                "title" | "labels" => Some(FieldKind::Text),
                "pages" => Some(FieldKind::Number),
                _ => None,
            }
        }

        fn field(&self, name: &str) -> Vec<FieldValue> {
            match name {
                "title" => vec![FieldValue::Text(self.title.clone())],
                "pages" => vec![FieldValue::Number(self.pages)],
                "labels" => self
                    .labels
                    .iter()
                    .map(|l| FieldValue::Text(l.clone()))
                    .collect(),
                _ => vec![],
            }
        }
    }

    fn book() -> Book {
        Book {
            title: "Programming Rust".to_string(),
            pages: 720.0,
            labels: vec!["systems".to_string(), "language".to_string()],
        }
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let cond = Condition::Contains {
            field: "title".to_string(),
            needle: "RUST".to_string(),
        };
        assert!(cond.matches(&book()));
    }

    #[test]
    fn test_range_comparison() {
        let gte = Condition::Compare {
            field: "pages".to_string(),
            op: CmpOp::Gte,
            value: FieldValue::Number(720.0),
        };
        let lt = Condition::Compare {
            field: "pages".to_string(),
            op: CmpOp::Lt,
            value: FieldValue::Number(500.0),
        };
        assert!(gte.matches(&book()));
        assert!(!lt.matches(&book()));
    }

    #[test]
    fn test_list_field_matches_any_element() {
        let cond = Condition::eq("labels", FieldValue::Text("language".to_string()));
        assert!(cond.matches(&book()));
    }

    #[test]
    fn test_kind_mismatch_never_matches() {
        let cond = Condition::eq("pages", FieldValue::Text("720".to_string()));
        assert!(!cond.matches(&book()));
    }

    #[test]
    fn test_empty_predicate_matches_everything() {
        assert!(Predicate::default().matches(&book()));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(FieldValue::parse(FieldKind::Timestamp, "2024-03-01").is_some());
        assert!(FieldValue::parse(FieldKind::Timestamp, "2024-03-01T10:00:00Z").is_some());
        assert!(FieldValue::parse(FieldKind::Timestamp, "yesterday").is_none());
        assert!(FieldValue::parse(FieldKind::Uuid, "not-a-uuid").is_none());
    }
}
