//! Entity module - Record shapes delivered by the backend API.
//! Field names follow the JSON payloads so records deserialize directly.

pub mod budget;
pub mod category;
pub mod receipt;

pub use budget::{Budget, BudgetWithSpent};
pub use category::Category;
pub use receipt::Receipt;
