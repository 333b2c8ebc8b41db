//! Entity reference resolution.
//!
//! Records point at students, teachers and courses in whatever shape the
//! serializer produced. [`resolve`] finds the referenced entity in a candidate
//! list the caller already holds, trying keys in a fixed precedence:
//!
//! ```text
//! object with id          → by id, and nothing else
//! object with business key → by business key, then by name
//! number / numeric text   → by id
//! business-key text       → by business key, then by name
//! name text / name field  → first candidate whose first+last name match
//! ```
//!
//! An unmatched reference is `None`. Nothing here fails.

use serde_json::{Map, Value};
use uni_core::EntityRef;
use uni_core::entities::{Course, Student, Teacher};
use uni_core::lenient::parse_id;

/// Which candidate fields identify an entity beyond its `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyFields {
    /// Human-readable unique code, e.g. `student_id`.
    pub business_key: Option<&'static str>,
    /// Prefix every business key starts with. When unset, any non-numeric
    /// text is tried as a business key.
    pub business_key_prefix: Option<&'static str>,
    /// Field of a nested reference object holding a display name.
    pub reference_name_field: Option<&'static str>,
    /// Candidate fields compared against a split `"First Last"` name.
    pub name_fields: Option<(&'static str, &'static str)>,
}

impl KeyFields {
    pub const STUDENT: Self = Self {
        business_key: Some("student_id"),
        business_key_prefix: Some("IT"),
        reference_name_field: Some("full_name"),
        name_fields: Some(("first_name", "last_name")),
    };

    pub const TEACHER: Self = Self {
        business_key: Some("teacher_id"),
        business_key_prefix: None,
        reference_name_field: Some("full_name"),
        name_fields: Some(("user_first_name", "user_last_name")),
    };

    pub const COURSE: Self = Self {
        business_key: Some("course_code"),
        business_key_prefix: None,
        reference_name_field: None,
        name_fields: None,
    };

    fn accepts_business_key(&self, text: &str) -> bool {
        self.business_key.is_some()
            && self
                .business_key_prefix
                .is_none_or(|prefix| text.starts_with(prefix))
    }
}

/// Something that can be matched by [`resolve`].
pub trait Identified {
    fn id(&self) -> Option<i64>;

    /// A text field by its backend name.
    fn text_field(&self, field: &str) -> Option<&str>;
}

impl Identified for Value {
    fn id(&self) -> Option<i64> {
        self.get("id").and_then(parse_id)
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

impl Identified for Student {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "student_id" => Some(&self.student_id),
            "first_name" => Some(&self.first_name),
            "last_name" => Some(&self.last_name),
            "email" => Some(&self.email),
            _ => None,
        }
    }
}

impl Identified for Teacher {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "teacher_id" => Some(&self.teacher_id),
            "user_first_name" => Some(&self.user_first_name),
            "user_last_name" => Some(&self.user_last_name),
            "user_email" => Some(&self.user_email),
            _ => None,
        }
    }
}

impl Identified for Course {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn text_field(&self, field: &str) -> Option<&str> {
        match field {
            "course_code" => Some(&self.course_code),
            "title" => Some(&self.title),
            _ => None,
        }
    }
}

/// Resolve `reference` against `candidates`.
#[must_use]
pub fn resolve<'c, C: Identified>(
    reference: &EntityRef,
    candidates: &'c [C],
    keys: &KeyFields,
) -> Option<&'c C> {
    if candidates.is_empty() {
        return None;
    }
    match reference {
        EntityRef::Id(id) => by_id(candidates, *id),
        EntityRef::Text(text) => resolve_text(text.trim(), candidates, keys),
        EntityRef::Object(map) => resolve_object(map, candidates, keys),
        EntityRef::Unrecognized => None,
    }
}

/// [`resolve`] for a raw JSON reference.
#[must_use]
pub fn resolve_value<'c, C: Identified>(
    reference: &Value,
    candidates: &'c [C],
    keys: &KeyFields,
) -> Option<&'c C> {
    resolve(&EntityRef::from(reference), candidates, keys)
}

fn resolve_object<'c, C: Identified>(
    map: &Map<String, Value>,
    candidates: &'c [C],
    keys: &KeyFields,
) -> Option<&'c C> {
    if let Some(id) = map.get("id").and_then(parse_id) {
        return by_id(candidates, id);
    }

    if let Some(field) = keys.business_key
        && let Some(code) = non_blank(map.get(field).and_then(Value::as_str))
        && let Some(found) = by_business_key(candidates, field, code)
    {
        return Some(found);
    }

    let name = non_blank(
        keys.reference_name_field
            .and_then(|field| map.get(field))
            .and_then(Value::as_str),
    )?;
    by_name(candidates, keys, name)
}

fn resolve_text<'c, C: Identified>(
    text: &str,
    candidates: &'c [C],
    keys: &KeyFields,
) -> Option<&'c C> {
    if let Ok(id) = text.parse::<i64>() {
        return by_id(candidates, id);
    }

    if keys.accepts_business_key(text)
        && let Some(field) = keys.business_key
        && let Some(found) = by_business_key(candidates, field, text)
    {
        return Some(found);
    }

    if text.split_whitespace().nth(1).is_some() {
        return by_name(candidates, keys, text);
    }
    None
}

fn by_id<C: Identified>(candidates: &[C], id: i64) -> Option<&C> {
    candidates.iter().find(|c| c.id() == Some(id))
}

fn by_business_key<'c, C: Identified>(candidates: &'c [C], field: &str, code: &str) -> Option<&'c C> {
    candidates
        .iter()
        .find(|c| c.text_field(field).is_some_and(|v| v.trim() == code))
}

/// First token is the first name, the rest (single-spaced) the last name.
/// Ties go to the first candidate in list order.
fn by_name<'c, C: Identified>(candidates: &'c [C], keys: &KeyFields, name: &str) -> Option<&'c C> {
    let (first_field, last_field) = keys.name_fields?;
    let mut tokens = name.split_whitespace();
    let first = tokens.next()?;
    let last = tokens.collect::<Vec<_>>().join(" ");
    if last.is_empty() {
        return None;
    }
    candidates.iter().find(|c| {
        c.text_field(first_field).is_some_and(|f| f.trim() == first)
            && c.text_field(last_field).is_some_and(|l| l.trim() == last)
    })
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
