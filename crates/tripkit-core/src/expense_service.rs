//! Expense CRUD. This is the validation boundary for amounts and member
//! references; the ledger itself never validates (see `ledger`).

use uuid::Uuid;

use tripkit_domain::Expense;

use crate::{CoreError, CoreResult, TripStore};

pub struct ExpenseService;

impl ExpenseService {
    /// Inserts or replaces an expense.
    ///
    /// The amount must be a finite non-negative number. Every `involved`
    /// name must be a current member. A brand new expense must name a payer
    /// and involve at least one member; an empty payer is accepted only on
    /// existing records, where it marks a payer cleared by a member
    /// deletion.
    pub fn upsert(store: &mut TripStore, trip_id: Uuid, expense: Expense) -> CoreResult<()> {
        let record = store.require(trip_id)?;

        if !expense.amount.is_finite() || expense.amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "expense amount {} must be a non-negative number",
                expense.amount
            )));
        }
        if expense.title.trim().is_empty() {
            return Err(CoreError::Validation("expense title may not be blank".into()));
        }
        let is_new = !record.expenses.iter().any(|existing| existing.id == expense.id);
        if expense.payer.is_empty() {
            if is_new {
                return Err(CoreError::Validation(
                    "a new expense must name a payer".into(),
                ));
            }
        } else if !record.trip.has_member(&expense.payer) {
            return Err(CoreError::Validation(format!(
                "payer `{}` is not a trip member",
                expense.payer
            )));
        }
        for involved in &expense.involved {
            if !record.trip.has_member(involved) {
                return Err(CoreError::Validation(format!(
                    "involved member `{involved}` is not a trip member"
                )));
            }
        }
        if is_new && expense.involved.is_empty() {
            return Err(CoreError::Validation(
                "a new expense must involve at least one member".into(),
            ));
        }

        let record = store.require_mut(trip_id)?;
        match record.expenses.iter_mut().find(|existing| existing.id == expense.id) {
            Some(existing) => *existing = expense,
            None => record.expenses.push(expense),
        }
        record.trip.touch();
        Ok(())
    }

    pub fn delete(store: &mut TripStore, trip_id: Uuid, expense_id: Uuid) -> CoreResult<()> {
        let record = store.require_mut(trip_id)?;
        let before = record.expenses.len();
        record.expenses.retain(|expense| expense.id != expense_id);
        if record.expenses.len() == before {
            return Err(CoreError::NotFound(format!("expense {expense_id}")));
        }
        record.trip.touch();
        Ok(())
    }
}
