//! Record Projector: raw service records in, flat rows out.
//!
//! Projection is total for well-formed records. A missing nested object
//! becomes an empty string or a null field, never an error; an unparsable
//! timestamp becomes `Null` so the date-range stage can exclude the row
//! while a range is active.

use crate::record::dto::{MovementDto, ProductDto, StockDto, UserDto};
use crate::record::row::Row;
use crate::record::value::{FieldValue, parse_instant};

pub trait Project {
    fn project(&self) -> Row;
}

/// Project a whole fetched collection. Order is not significant here;
/// the query engine establishes it later.
#[must_use]
pub fn project_all<T: Project>(records: &[T]) -> Vec<Row> {
    records.iter().map(Project::project).collect()
}

fn time_or_null(raw: Option<&str>) -> FieldValue {
    raw.and_then(parse_instant).map_or(FieldValue::Null, FieldValue::Time)
}

fn text_or_empty(raw: Option<&str>) -> FieldValue {
    FieldValue::Str(raw.unwrap_or_default().to_string())
}

fn num_or_null(raw: Option<f64>) -> FieldValue {
    raw.map_or(FieldValue::Null, FieldValue::Num)
}

#[allow(clippy::cast_precision_loss)]
fn id_or_null(raw: Option<i64>) -> FieldValue {
    raw.map_or(FieldValue::Null, |id| FieldValue::Num(id as f64))
}

impl Project for MovementDto {
    fn project(&self) -> Row {
        let mut row = Row::new(self.id);
        row.set("movementDate", time_or_null(self.movement_date.as_deref()));
        row.set("movementType", text_or_empty(self.movement_type.as_deref()));
        row.set("productName", text_or_empty(self.product.as_ref().map(|p| p.name.as_str())));
        row.set("warehouseId", id_or_null(self.warehouse.as_ref().map(|w| w.id)));
        row.set("warehouseName", text_or_empty(self.warehouse.as_ref().map(|w| w.name.as_str())));
        row.set("quantity", num_or_null(self.quantity));
        row.set("unitPrice", num_or_null(self.unit_price));
        match &self.user {
            Some(u) => row.set("user", FieldValue::Str(u.username.clone())),
            None => row.set("user", FieldValue::Null),
        }
        match &self.note {
            Some(n) => row.set("note", FieldValue::Str(n.clone())),
            None => row.set("note", FieldValue::Null),
        }
        row
    }
}

impl Project for ProductDto {
    fn project(&self) -> Row {
        let mut row = Row::new(self.id);
        row.set("productCode", text_or_empty(self.product_code.as_deref()));
        row.set("name", text_or_empty(self.name.as_deref()));
        row.set("categoryId", id_or_null(self.category.as_ref().map(|c| c.id)));
        row.set("categoryName", text_or_empty(self.category.as_ref().map(|c| c.name.as_str())));
        row.set("unit", text_or_empty(self.unit.as_deref()));
        row.set("createdAt", time_or_null(self.created_at.as_deref()));
        row
    }
}

impl Project for StockDto {
    fn project(&self) -> Row {
        let mut row = Row::new(self.id);
        row.set("productId", id_or_null(self.product_id));
        row.set("productName", text_or_empty(self.product_name.as_deref()));
        row.set("warehouseId", id_or_null(self.warehouse_id));
        row.set("warehouseName", text_or_empty(self.warehouse_name.as_deref()));
        row.set("quantity", num_or_null(self.quantity));
        row.set("unit", text_or_empty(self.unit.as_deref()));
        row
    }
}

impl Project for UserDto {
    fn project(&self) -> Row {
        let mut row = Row::new(self.id);
        row.set("username", FieldValue::Str(self.username.clone()));
        // Normalized at the session boundary; the row carries the joined form.
        let joined = self.roles.as_ref().map(|r| r.normalize().joined()).unwrap_or_default();
        row.set("roles", FieldValue::Str(joined));
        match self.enabled {
            Some(b) => row.set("enabled", FieldValue::Bool(b)),
            None => row.set("enabled", FieldValue::Null),
        }
        row.set("createdAt", time_or_null(self.created_at.as_deref()));
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::dto::WarehouseRef;

    #[test]
    fn missing_nested_objects_do_not_fail() {
        let m = MovementDto {
            id: 5,
            movement_date: None,
            movement_type: None,
            product: None,
            warehouse: None,
            quantity: None,
            unit_price: None,
            user: None,
            note: None,
        };
        let row = m.project();
        assert_eq!(row.render("productName"), "");
        assert_eq!(row.render("warehouseName"), "");
        assert!(row.get("movementDate").is_some_and(FieldValue::is_null));
        assert!(row.sort_key("unitPrice").is_none());
    }

    #[test]
    fn projection_is_pure() {
        let m = MovementDto {
            id: 1,
            movement_date: Some("2026-02-01T09:00:00".into()),
            movement_type: Some("IN".into()),
            product: None,
            warehouse: Some(WarehouseRef { id: 7, name: "Merkez".into() }),
            quantity: Some(12.0),
            unit_price: Some(3.5),
            user: None,
            note: None,
        };
        assert_eq!(m.project(), m.project());
        assert_eq!(m.project().render("warehouseId"), "7");
    }
}
