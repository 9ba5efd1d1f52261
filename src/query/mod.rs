// Submodules for separation of concerns
mod eval;
mod exec;
mod types;

pub use eval::compare_rows;
pub use exec::evaluate;
pub use types::{DEFAULT_PAGE_SIZE, DateRange, Order, QuerySpec, ResultPage, SortSpec};
