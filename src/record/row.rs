use crate::record::value::FieldValue;
use crate::types::RecordId;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Flat, query-ready projection of one source record.
///
/// Field keys use the service's wire names (`movementDate`, `warehouseId`,
/// ...) so filter keys, sort keys, and transport query parameters line up.
/// Rows are immutable once projected; the projector is the only writer.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    id: RecordId,
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        let mut fields = BTreeMap::new();
        #[allow(clippy::cast_precision_loss)]
        fields.insert("id".to_string(), FieldValue::Num(id as f64));
        Self { id, fields }
    }

    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    pub(crate) fn set(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// The value used by the sort stage; a stored `Null` counts as missing.
    #[must_use]
    pub fn sort_key(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    /// Canonical text of a field, empty for absent or null fields.
    #[must_use]
    pub fn render(&self, field: &str) -> String {
        self.fields.get(field).map(FieldValue::render).unwrap_or_default()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_field_is_always_present() {
        let row = Row::new(42);
        assert_eq!(row.render("id"), "42");
        assert_eq!(row.id(), 42);
    }

    #[test]
    fn null_is_missing_for_sort() {
        let mut row = Row::new(1);
        row.set("note", FieldValue::Null);
        assert!(row.get("note").is_some());
        assert!(row.sort_key("note").is_none());
    }
}
