//! Member CRUD and the cascade rules that keep expense references valid.
//!
//! Rename and delete validate up front and then apply every follow-on update
//! in one pass, so a failure never leaves a partially cascaded store.

use uuid::Uuid;

use tripkit_domain::{MemberDirectory, MemberProfile};

use crate::{CoreError, CoreResult, TripStore};

pub struct MemberService;

impl MemberService {
    /// Appends a member to the trip's ordered member set.
    pub fn add(
        store: &mut TripStore,
        trip_id: Uuid,
        name: impl Into<String>,
        directory: &mut MemberDirectory,
        profile: MemberProfile,
    ) -> CoreResult<()> {
        let name: String = name.into();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::Validation("member name may not be blank".into()));
        }
        let record = store.require(trip_id)?;
        if record.trip.has_member(&name) {
            return Err(CoreError::DuplicateMember(name));
        }
        let record = store.require_mut(trip_id)?;
        record.trip.members.push(name.clone());
        record.trip.touch();
        directory.upsert(name, profile);
        Ok(())
    }

    /// Renames a member and rewrites every `payer`/`involved` occurrence in
    /// the trip's expenses, plus the profile directory key, atomically.
    pub fn rename(
        store: &mut TripStore,
        trip_id: Uuid,
        old_name: &str,
        new_name: &str,
        directory: &mut MemberDirectory,
    ) -> CoreResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CoreError::Validation("member name may not be blank".into()));
        }
        let record = store.require(trip_id)?;
        if !record.trip.has_member(old_name) {
            return Err(CoreError::NotFound(format!("member {old_name}")));
        }
        if new_name != old_name && record.trip.has_member(new_name) {
            return Err(CoreError::DuplicateMember(new_name.to_string()));
        }
        if new_name == old_name {
            return Ok(());
        }

        let record = store.require_mut(trip_id)?;
        for member in record.trip.members.iter_mut() {
            if member == old_name {
                *member = new_name.to_string();
            }
        }
        for expense in record.expenses.iter_mut() {
            if expense.payer == old_name {
                expense.payer = new_name.to_string();
            }
            for involved in expense.involved.iter_mut() {
                if involved == old_name {
                    *involved = new_name.to_string();
                }
            }
        }
        record.trip.touch();
        directory.rename(old_name, new_name);
        tracing::debug!(trip = %trip_id, old = old_name, new = new_name, "member renamed");
        Ok(())
    }

    /// Removes a member. Expenses they paid keep the record with an empty
    /// payer; their name is pruned from every `involved` set. Expenses whose
    /// `involved` set becomes empty are retained but carry zero ledger
    /// weight.
    pub fn delete(
        store: &mut TripStore,
        trip_id: Uuid,
        name: &str,
        directory: &mut MemberDirectory,
    ) -> CoreResult<()> {
        let record = store.require(trip_id)?;
        if !record.trip.has_member(name) {
            return Err(CoreError::NotFound(format!("member {name}")));
        }

        let record = store.require_mut(trip_id)?;
        record.trip.members.retain(|member| member != name);
        for expense in record.expenses.iter_mut() {
            if expense.payer == name {
                expense.payer.clear();
            }
            expense.involved.retain(|involved| involved != name);
        }
        record.trip.touch();
        directory.remove(name);
        tracing::debug!(trip = %trip_id, member = name, "member deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tripkit_domain::Expense;

    fn store_with_members(names: &[&str]) -> (TripStore, Uuid, MemberDirectory) {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let mut directory = MemberDirectory::default();
        for name in names {
            MemberService::add(
                &mut store,
                trip_id,
                *name,
                &mut directory,
                MemberProfile::default(),
            )
            .unwrap();
        }
        (store, trip_id, directory)
    }

    fn push_expense(store: &mut TripStore, trip_id: Uuid, payer: &str, involved: &[&str]) -> Uuid {
        let expense = Expense::new(
            "Dinner",
            300.0,
            payer,
            involved.iter().map(|name| name.to_string()).collect(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        );
        let id = expense.id;
        crate::ExpenseService::upsert(store, trip_id, expense).unwrap();
        id
    }

    #[test]
    fn add_rejects_duplicate_names() {
        let (mut store, trip_id, mut directory) = store_with_members(&["A"]);
        assert!(matches!(
            MemberService::add(
                &mut store,
                trip_id,
                "A",
                &mut directory,
                MemberProfile::default()
            ),
            Err(CoreError::DuplicateMember(_))
        ));
    }

    #[test]
    fn add_trims_whitespace_before_duplicate_check() {
        let (mut store, trip_id, mut directory) = store_with_members(&["A"]);
        assert!(matches!(
            MemberService::add(
                &mut store,
                trip_id,
                " A ",
                &mut directory,
                MemberProfile::default()
            ),
            Err(CoreError::DuplicateMember(_))
        ));

        MemberService::add(&mut store, trip_id, " B ", &mut directory, MemberProfile::default())
            .unwrap();
        let record = store.record(trip_id).unwrap();
        assert_eq!(record.trip.members, vec!["A", "B"]);
        assert!(directory.profile("B").is_some());
    }

    #[test]
    fn rename_cascades_into_expenses() {
        let (mut store, trip_id, mut directory) = store_with_members(&["A", "B", "C"]);
        push_expense(&mut store, trip_id, "A", &["A", "B", "C"]);

        MemberService::rename(&mut store, trip_id, "A", "Alice", &mut directory).unwrap();
        let record = store.record(trip_id).unwrap();
        assert_eq!(record.trip.members, vec!["Alice", "B", "C"]);
        assert_eq!(record.expenses[0].payer, "Alice");
        assert!(record.expenses[0].involved.contains(&"Alice".to_string()));
        assert!(!record.expenses[0].involved.contains(&"A".to_string()));
    }

    #[test]
    fn rename_back_restores_original_references() {
        let (mut store, trip_id, mut directory) = store_with_members(&["A", "B"]);
        push_expense(&mut store, trip_id, "A", &["A", "B"]);
        let before = store.record(trip_id).unwrap().expenses.clone();

        MemberService::rename(&mut store, trip_id, "A", "B2", &mut directory).unwrap();
        MemberService::rename(&mut store, trip_id, "B2", "A", &mut directory).unwrap();

        let after = &store.record(trip_id).unwrap().expenses;
        assert_eq!(after[0].payer, before[0].payer);
        assert_eq!(after[0].involved, before[0].involved);
    }

    #[test]
    fn rename_collision_leaves_store_unchanged() {
        let (mut store, trip_id, mut directory) = store_with_members(&["A", "B"]);
        push_expense(&mut store, trip_id, "A", &["A", "B"]);
        assert!(matches!(
            MemberService::rename(&mut store, trip_id, "A", "B", &mut directory),
            Err(CoreError::DuplicateMember(_))
        ));
        let record = store.record(trip_id).unwrap();
        assert_eq!(record.trip.members, vec!["A", "B"]);
        assert_eq!(record.expenses[0].payer, "A");
    }

    #[test]
    fn delete_clears_payer_and_prunes_involved() {
        let (mut store, trip_id, mut directory) = store_with_members(&["A", "B", "C"]);
        push_expense(&mut store, trip_id, "B", &["A", "B", "C"]);

        MemberService::delete(&mut store, trip_id, "B", &mut directory).unwrap();
        let record = store.record(trip_id).unwrap();
        assert_eq!(record.trip.members, vec!["A", "C"]);
        assert_eq!(record.expenses[0].payer, "");
        assert_eq!(record.expenses[0].involved, vec!["A", "C"]);
    }

    #[test]
    fn delete_retains_expense_with_emptied_involved() {
        let (mut store, trip_id, mut directory) = store_with_members(&["Solo", "Other"]);
        push_expense(&mut store, trip_id, "Solo", &["Solo"]);

        MemberService::delete(&mut store, trip_id, "Solo", &mut directory).unwrap();
        let record = store.record(trip_id).unwrap();
        assert_eq!(record.expenses.len(), 1);
        assert!(record.expenses[0].involved.is_empty());
    }
}
