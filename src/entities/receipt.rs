//! Receipt entity - A single transaction parsed out of an email by the backend.
//!
//! Receipts arrive already extracted; the core never creates or deletes them.
//! The only field the dashboard changes is `category_id`, after the backend has
//! accepted a category update.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown when neither vendor nor sender is known.
pub const UNSPECIFIED: &str = "unspecified";

/// Receipt record as returned by the receipts endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique identifier for the receipt
    pub id: i64,
    /// Subject line of the email the receipt came from
    #[serde(default)]
    pub email_subject: Option<String>,
    /// Sender address of that email
    #[serde(default)]
    pub email_from: Option<String>,
    /// Merchant name extracted from the email body
    #[serde(default)]
    pub vendor_name: Option<String>,
    /// Category this receipt is filed under, None when uncategorized
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Date of the transaction (`YYYY-MM-DD`)
    pub receipt_date: NaiveDate,
    /// Transaction amount
    pub amount: f64,
    /// ISO currency code, e.g. `"THB"`
    pub currency: String,
    /// Merchant's receipt or order number
    #[serde(default)]
    pub receipt_number: Option<String>,
    /// Payment method as printed on the receipt
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
    /// When the backend ingested the receipt, as wall-clock time
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: NaiveDateTime,
}

impl Receipt {
    /// Name to show for the merchant: vendor, then sender, then [`UNSPECIFIED`].
    #[must_use]
    pub fn display_vendor(&self) -> &str {
        non_blank(self.vendor_name.as_deref())
            .or_else(|| non_blank(self.email_from.as_deref()))
            .unwrap_or(UNSPECIFIED)
    }

    /// Short description for expense lists: vendor, then subject, then [`UNSPECIFIED`].
    #[must_use]
    pub fn description(&self) -> &str {
        non_blank(self.vendor_name.as_deref())
            .or_else(|| non_blank(self.email_subject.as_deref()))
            .unwrap_or(UNSPECIFIED)
    }

    /// Headline for the receipt table: subject, then notes.
    #[must_use]
    pub fn headline(&self) -> Option<&str> {
        non_blank(self.email_subject.as_deref()).or_else(|| non_blank(self.notes.as_deref()))
    }

    /// True when any of subject, vendor or sender contains `needle`.
    ///
    /// `needle` must already be lowercased. Missing fields never match.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        [&self.email_subject, &self.vendor_name, &self.email_from]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Accepts RFC 3339 timestamps with an offset as well as naive ones.
///
/// An offset is dropped and the local wall-clock time kept.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let text = raw.trim();
    DateTime::parse_from_rfc3339(text)
        .map(|stamped| stamped.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {text:?}: {e}")))
}
