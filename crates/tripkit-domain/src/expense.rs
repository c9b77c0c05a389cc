//! Domain types for the shared-expense ledger.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

/// A shared payment recorded against a trip.
///
/// `payer` and `involved` reference trip members by display name. After a
/// member deletion the payer may be empty and `involved` may shrink to
/// nothing; ledger code treats such records as zero-weight rather than
/// rejecting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    /// Empty string when the paying member was deleted.
    #[serde(default)]
    pub payer: String,
    #[serde(default)]
    pub involved: Vec<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub note: String,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        payer: impl Into<String>,
        involved: Vec<String>,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            payer: payer.into(),
            involved,
            date,
            time,
            note: String::new(),
        }
    }

    /// Per-member share of the amount, `None` when nobody is involved.
    pub fn share(&self) -> Option<f64> {
        if self.involved.is_empty() || !self.amount.is_finite() {
            None
        } else {
            Some(self.amount / self.involved.len() as f64)
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} {:.0} by {}", self.title, self.amount, self.payer)
    }
}
