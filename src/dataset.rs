use crate::errors::ConsoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The record collections the console works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Products,
    Stocks,
    Movements,
    Users,
}

impl DatasetKind {
    pub const ALL: [Self; 4] = [Self::Products, Self::Stocks, Self::Movements, Self::Users];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Stocks => "stocks",
            Self::Movements => "movements",
            Self::Users => "users",
        }
    }

    /// Service endpoint serving the full collection for this dataset.
    #[must_use]
    pub const fn service_path(self) -> &'static str {
        match self {
            Self::Products => "/api/products",
            Self::Stocks => "/api/stocks",
            Self::Movements => "/api/movements",
            Self::Users => "/api/users",
        }
    }

    #[must_use]
    pub const fn schema(self) -> &'static Schema {
        match self {
            Self::Products => &PRODUCTS,
            Self::Stocks => &STOCKS,
            Self::Movements => &MOVEMENTS,
            Self::Users => &USERS,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "products" => Ok(Self::Products),
            "stocks" => Ok(Self::Stocks),
            "movements" => Ok(Self::Movements),
            "users" => Ok(Self::Users),
            other => Err(ConsoleError::UnknownDataset(other.to_string())),
        }
    }
}

/// Per-dataset query surface: which field the date range applies to,
/// which text fields free-text search scans, and the export column order.
#[derive(Debug)]
pub struct Schema {
    pub date_field: Option<&'static str>,
    pub search_fields: &'static [&'static str],
    pub columns: &'static [&'static str],
    pub default_sort: &'static str,
}

static MOVEMENTS: Schema = Schema {
    date_field: Some("movementDate"),
    search_fields: &["productName", "warehouseName", "user", "note"],
    columns: &[
        "id",
        "movementDate",
        "movementType",
        "productName",
        "warehouseName",
        "quantity",
        "unitPrice",
        "user",
        "note",
    ],
    default_sort: "movementDate,desc",
};

static PRODUCTS: Schema = Schema {
    date_field: Some("createdAt"),
    search_fields: &["productCode", "name", "categoryName"],
    columns: &["id", "productCode", "name", "categoryName", "unit", "createdAt"],
    default_sort: "id,desc",
};

static STOCKS: Schema = Schema {
    date_field: None,
    search_fields: &["productName", "warehouseName"],
    columns: &["id", "productId", "productName", "warehouseId", "warehouseName", "quantity", "unit"],
    default_sort: "id,asc",
};

static USERS: Schema = Schema {
    date_field: None,
    search_fields: &["username", "roles"],
    columns: &["id", "username", "roles", "enabled", "createdAt"],
    default_sort: "id,asc",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_kind() {
        for kind in DatasetKind::ALL {
            assert_eq!(kind.as_str().parse::<DatasetKind>().unwrap(), kind);
        }
        assert!("warehouses".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn movements_schema_designates_date_field() {
        let schema = DatasetKind::Movements.schema();
        assert_eq!(schema.date_field, Some("movementDate"));
        assert!(schema.search_fields.contains(&"note"));
    }
}
