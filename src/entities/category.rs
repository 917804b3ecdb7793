//! Category entity - A spending classification defined server-side.

use serde::{Deserialize, Serialize};

/// Category record as returned by the categories endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category
    pub id: i64,
    /// Display name, unique per user in practice
    pub name: String,
    /// Display color, e.g. `"#2F584F"`
    #[serde(default)]
    pub color: String,
    /// Optional icon reference
    #[serde(default)]
    pub icon: Option<String>,
}
