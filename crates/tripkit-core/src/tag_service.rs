//! Tag palette operations and the soft-reference cascade into packing
//! items. The palette is global; deleting a tag touches every trip.

use tripkit_domain::{Tag, GENERAL_TAG};

use crate::{CoreError, CoreResult, TripStore};

pub struct TagService;

impl TagService {
    /// A usable palette always contains the default tag; seed it if a
    /// persisted palette lost it.
    pub fn ensure_general(palette: &mut Vec<Tag>) {
        if !palette.iter().any(|tag| tag.name == GENERAL_TAG) {
            palette.insert(0, Tag::general());
        }
    }

    pub fn add(palette: &mut Vec<Tag>, tag: Tag) -> CoreResult<()> {
        if tag.name.trim().is_empty() {
            return Err(CoreError::Validation("tag name may not be blank".into()));
        }
        if palette.iter().any(|existing| existing.name == tag.name) {
            return Err(CoreError::Validation(format!(
                "tag `{}` already exists",
                tag.name
            )));
        }
        palette.push(tag);
        Ok(())
    }

    /// Renames a palette tag and rewrites the reference on every packing
    /// item across all trips.
    pub fn rename(
        palette: &mut [Tag],
        store: &mut TripStore,
        old_name: &str,
        new_name: &str,
    ) -> CoreResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(CoreError::Validation("tag name may not be blank".into()));
        }
        if old_name == GENERAL_TAG {
            return Err(CoreError::InvariantViolation(
                "the default tag cannot be renamed".into(),
            ));
        }
        if !palette.iter().any(|tag| tag.name == old_name) {
            return Err(CoreError::NotFound(format!("tag {old_name}")));
        }
        if new_name != old_name && palette.iter().any(|tag| tag.name == new_name) {
            return Err(CoreError::Validation(format!(
                "tag `{new_name}` already exists"
            )));
        }

        for tag in palette.iter_mut() {
            if tag.name == old_name {
                tag.name = new_name.to_string();
            }
        }
        Self::retag_items(store, old_name, new_name);
        Ok(())
    }

    /// Deletes a palette tag. Referencing items are reassigned to the
    /// default tag rather than left dangling. The default tag itself cannot
    /// be deleted.
    pub fn delete(palette: &mut Vec<Tag>, store: &mut TripStore, name: &str) -> CoreResult<()> {
        if name == GENERAL_TAG {
            return Err(CoreError::InvariantViolation(
                "the default tag cannot be deleted".into(),
            ));
        }
        let before = palette.len();
        palette.retain(|tag| tag.name != name);
        if palette.len() == before {
            return Err(CoreError::NotFound(format!("tag {name}")));
        }
        Self::retag_items(store, name, GENERAL_TAG);
        Ok(())
    }

    fn retag_items(store: &mut TripStore, from: &str, to: &str) {
        let trip_ids: Vec<_> = store.records().map(|record| record.trip.id).collect();
        for trip_id in trip_ids {
            if let Some(record) = store.record_mut(trip_id) {
                let mut changed = false;
                for item in record.packing.iter_mut() {
                    if item.tag == from {
                        item.tag = to.to_string();
                        changed = true;
                    }
                }
                if changed {
                    record.trip.touch();
                }
            }
        }
    }
}
