//! Packing checklist CRUD.

use uuid::Uuid;

use tripkit_domain::{PackingItem, Tag, GENERAL_TAG};

use crate::{CoreError, CoreResult, TripStore};

pub struct PackingService;

impl PackingService {
    /// Inserts or replaces a checklist item. Items with a blank tag fall
    /// back to the default tag; palette membership is not enforced here
    /// because tags are soft references (see `TagService`).
    pub fn upsert(
        store: &mut TripStore,
        trip_id: Uuid,
        mut item: PackingItem,
    ) -> CoreResult<()> {
        store.require(trip_id)?;
        if item.text.trim().is_empty() {
            return Err(CoreError::Validation(
                "packing item text may not be blank".into(),
            ));
        }
        if item.tag.trim().is_empty() {
            item.tag = GENERAL_TAG.to_string();
        }

        let record = store.require_mut(trip_id)?;
        match record.packing.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => record.packing.push(item),
        }
        record.trip.touch();
        Ok(())
    }

    pub fn delete(store: &mut TripStore, trip_id: Uuid, item_id: Uuid) -> CoreResult<()> {
        let record = store.require_mut(trip_id)?;
        let before = record.packing.len();
        record.packing.retain(|item| item.id != item_id);
        if record.packing.len() == before {
            return Err(CoreError::NotFound(format!("packing item {item_id}")));
        }
        record.trip.touch();
        Ok(())
    }

    pub fn set_checked(
        store: &mut TripStore,
        trip_id: Uuid,
        item_id: Uuid,
        checked: bool,
    ) -> CoreResult<()> {
        let record = store.require_mut(trip_id)?;
        let item = record
            .packing
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| CoreError::NotFound(format!("packing item {item_id}")))?;
        item.is_checked = checked;
        record.trip.touch();
        Ok(())
    }

    /// Items referencing `tag`, in checklist order.
    pub fn items_with_tag<'a>(items: &'a [PackingItem], tag: &Tag) -> Vec<&'a PackingItem> {
        items.iter().filter(|item| item.tag == tag.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tag_falls_back_to_general() {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let mut item = PackingItem::new("Socks");
        item.tag = "  ".into();
        PackingService::upsert(&mut store, trip_id, item).unwrap();
        assert_eq!(store.record(trip_id).unwrap().packing[0].tag, GENERAL_TAG);
    }

    #[test]
    fn set_checked_toggles_item() {
        let mut store = TripStore::new();
        let trip_id = store.active_trip_id();
        let item = PackingItem::new("Charger");
        let item_id = item.id;
        PackingService::upsert(&mut store, trip_id, item).unwrap();

        PackingService::set_checked(&mut store, trip_id, item_id, true).unwrap();
        assert!(store.record(trip_id).unwrap().packing[0].is_checked);
    }
}
