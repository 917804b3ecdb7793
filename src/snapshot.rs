//! Exported backend payload.
//!
//! A snapshot is the JSON the dashboard would otherwise fetch piecemeal from
//! the backend. Every key is optional.

use crate::{
    core::{budget, category::CategoryDirectory},
    entities::{Budget, BudgetWithSpent, Category, Receipt},
    errors::Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Records read from a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// All categories
    pub categories: Vec<Category>,
    /// Receipts, newest first as served
    pub receipts: Vec<Receipt>,
    /// Raw budgets
    pub budgets: Vec<Budget>,
    /// Budget-vs-actual rows computed by the backend
    pub budget_comparisons: Vec<BudgetWithSpent>,
}

impl Snapshot {
    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    /// `Error::Json` when the text is not a valid snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    /// `Error::Io` when the file cannot be read, `Error::Json` when it cannot
    /// be parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading snapshot from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&text)?;
        info!(
            "Loaded snapshot: {} categories, {} receipts, {} budgets, {} comparisons",
            snapshot.categories.len(),
            snapshot.receipts.len(),
            snapshot.budgets.len(),
            snapshot.budget_comparisons.len()
        );
        Ok(snapshot)
    }

    /// Lookup over the snapshot's categories.
    #[must_use]
    pub fn directory(&self) -> CategoryDirectory {
        CategoryDirectory::new(&self.categories)
    }

    /// Budget-vs-actual rows for the snapshot.
    ///
    /// Uses the backend's comparison rows when present, otherwise projects the
    /// raw budgets against the receipts.
    #[must_use]
    pub fn budget_rows(&self, directory: &CategoryDirectory) -> Vec<BudgetWithSpent> {
        if self.budget_comparisons.is_empty() {
            budget::project_spending(&self.budgets, directory, &self.receipts)
        } else {
            self.budget_comparisons.clone()
        }
    }
}
