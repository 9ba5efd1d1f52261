// Submodules for separation of concerns
mod dto;
mod project;
mod row;
mod value;

pub use dto::{CategoryRef, MovementDto, ProductDto, ProductRef, StockDto, UserDto, UserRef, WarehouseRef};
pub use project::{Project, project_all};
pub use row::Row;
pub use value::{FieldValue, compare_values, parse_instant};
