//! Shared-expense ledger: net balances, per-viewer settlement plans, and
//! member statistics.
//!
//! Every function here is pure and total: malformed history (non-finite or
//! negative amounts, empty `involved` sets, cleared payers) contributes zero
//! instead of raising an error, so the ledger stays computable over stale
//! data.

use serde::Serialize;

use tripkit_domain::Expense;

/// Treat balances within this band as settled; keeps float dust out of the
/// settlement plan.
const SETTLED_EPSILON: f64 = 1e-9;

/// Per-member net amounts in original member order. Positive means the
/// member is owed money, negative means they owe.
#[derive(Debug, Clone, PartialEq)]
pub struct Balances {
    entries: Vec<(String, f64)>,
}

impl Balances {
    pub fn get(&self, member: &str) -> f64 {
        self.entries
            .iter()
            .find(|(name, _)| name == member)
            .map(|(_, balance)| *balance)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, balance)| (name.as_str(), *balance))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, balance)| balance).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementDirection {
    Pay,
    Receive,
}

/// One suggested transfer in a member's settlement plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementEntry {
    pub direction: SettlementDirection,
    pub counterpart: String,
    pub amount: f64,
}

/// Totals for the per-member stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemberStats {
    pub total_paid: f64,
    pub total_share_owed: f64,
}

pub struct ExpenseLedger;

impl ExpenseLedger {
    /// Splits each expense evenly over its `involved` set: the payer is
    /// credited the full amount, each involved member debited one share.
    /// The share stays an exact division so the cross-member sum cancels to
    /// the payer's credit.
    pub fn compute_balances(members: &[String], expenses: &[Expense]) -> Balances {
        let mut entries: Vec<(String, f64)> =
            members.iter().map(|name| (name.clone(), 0.0)).collect();

        for expense in expenses {
            let share = match expense.share() {
                Some(share) if expense.amount >= 0.0 => share,
                _ => continue,
            };
            if let Some(entry) = entries.iter_mut().find(|(name, _)| *name == expense.payer) {
                entry.1 += expense.amount;
            }
            for involved in &expense.involved {
                if let Some(entry) = entries.iter_mut().find(|(name, _)| name == involved) {
                    entry.1 -= share;
                }
            }
        }

        Balances { entries }
    }

    /// Greedy per-viewer settlement plan.
    ///
    /// A debtor pays creditors in descending balance order; a creditor
    /// collects from debtors in ascending (most negative first) order. Ties
    /// keep the original member order. Each member's list is derived
    /// independently from the same global balances, so the same debt may
    /// appear split differently for different viewers; that is the intended
    /// behavior, not global minimum-transaction netting.
    pub fn settlement_for(balances: &Balances, member: &str) -> Vec<SettlementEntry> {
        let mut plan = Vec::new();
        let own = balances.get(member);

        if own < -SETTLED_EPSILON {
            let mut debt = -own;
            let mut creditors: Vec<(&str, f64)> = balances
                .iter()
                .filter(|(name, balance)| *name != member && *balance > SETTLED_EPSILON)
                .collect();
            // Stable sort keeps original member order between equal balances.
            creditors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

            for (creditor, can_receive) in creditors {
                if debt <= SETTLED_EPSILON {
                    break;
                }
                let pay = debt.min(can_receive);
                plan.push(SettlementEntry {
                    direction: SettlementDirection::Pay,
                    counterpart: creditor.to_string(),
                    amount: pay,
                });
                debt -= pay;
            }
        } else if own > SETTLED_EPSILON {
            let mut receivable = own;
            let mut debtors: Vec<(&str, f64)> = balances
                .iter()
                .filter(|(name, balance)| *name != member && *balance < -SETTLED_EPSILON)
                .collect();
            debtors.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

            for (debtor, balance) in debtors {
                if receivable <= SETTLED_EPSILON {
                    break;
                }
                let owed = -balance;
                let take = owed.min(receivable);
                plan.push(SettlementEntry {
                    direction: SettlementDirection::Receive,
                    counterpart: debtor.to_string(),
                    amount: take,
                });
                receivable -= take;
            }
        }

        plan
    }

    /// Sums what the member fronted and what their even shares add up to.
    pub fn member_stats(member: &str, expenses: &[Expense]) -> MemberStats {
        let mut stats = MemberStats::default();
        for expense in expenses {
            if !expense.amount.is_finite() || expense.amount < 0.0 {
                continue;
            }
            if expense.payer == member {
                stats.total_paid += expense.amount;
            }
            if expense.involved.iter().any(|name| name == member) {
                if let Some(share) = expense.share() {
                    stats.total_share_owed += share;
                }
            }
        }
        stats
    }
}
