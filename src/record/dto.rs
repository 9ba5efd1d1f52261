//! Raw record shapes as the remote service serves them.
//!
//! All fields beyond the identifier are optional so that a sparse or
//! half-migrated backend row deserializes instead of failing the whole
//! fetch; the projector turns whatever is present into a uniform `Row`.

use crate::session::RoleInput;
use crate::types::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseRef {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub id: RecordId,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: RecordId,
    pub name: String,
}

/// One stock movement, with nested references the service embeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDto {
    pub id: RecordId,
    #[serde(default)]
    pub movement_date: Option<String>,
    #[serde(default)]
    pub movement_type: Option<String>,
    #[serde(default)]
    pub product: Option<ProductRef>,
    #[serde(default)]
    pub warehouse: Option<WarehouseRef>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: RecordId,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One per-warehouse stock level; the service flattens these itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDto {
    pub id: RecordId,
    #[serde(default)]
    pub product_id: Option<RecordId>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub warehouse_id: Option<RecordId>,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// A console account. `roles` arrives either comma-joined
/// (`"ROLE_ADMIN,ROLE_USER"`) or as a native list; both decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: RecordId,
    pub username: String,
    #[serde(default)]
    pub roles: Option<RoleInput>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}
