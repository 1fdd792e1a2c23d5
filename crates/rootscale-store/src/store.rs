// SPDX-License-Identifier: Apache-2.0

use crate::{decode_document, encode_records, DimensionBackend, StoreError};
use rootscale_model::{groups_in_order, sorted_groups, validate_permutation, DimensionRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Ordered dimension collection over a [`DimensionBackend`].
///
/// Every operation reloads the whole document, and every mutating one
/// writes it back in full. The writer lock spans the entire
/// load → mutate → save sequence, so concurrent callers in one process
/// never overwrite each other's changes.
pub struct DimensionStore {
    backend: Arc<dyn DimensionBackend>,
    writer: Mutex<()>,
}

impl DimensionStore {
    #[must_use]
    pub fn new(backend: Arc<dyn DimensionBackend>) -> Self {
        Self {
            backend,
            writer: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.backend.describe()
    }

    pub fn load(&self) -> Result<Vec<DimensionRecord>, StoreError> {
        Ok(self
            .backend
            .read_raw()?
            .map(|bytes| decode_document(&bytes))
            .unwrap_or_default())
    }

    pub fn save(&self, records: &[DimensionRecord]) -> Result<(), StoreError> {
        self.backend.write_raw(&encode_records(records)?)
    }

    /// Consistent read that waits for any in-flight mutation.
    pub fn snapshot(&self) -> Result<Vec<DimensionRecord>, StoreError> {
        let _guard = self.lock_writer()?;
        self.load()
    }

    pub fn add(&self, name: &str, value: f64, group: &str) -> Result<DimensionRecord, StoreError> {
        let rec = DimensionRecord::new(name, value, group);
        let stored = rec.clone();
        self.mutate(move |records| {
            records.push(rec);
            (stored, true)
        })
    }

    /// Removes the record at `index`. Out-of-range indices are ignored and
    /// nothing is written.
    pub fn delete(&self, index: usize) -> Result<Option<DimensionRecord>, StoreError> {
        self.mutate(|records| {
            if index < records.len() {
                (Some(records.remove(index)), true)
            } else {
                (None, false)
            }
        })
    }

    pub fn rename(&self, index: usize, new_name: &str) -> Result<bool, StoreError> {
        self.mutate(|records| match records.get_mut(index) {
            Some(rec) => {
                rec.name = new_name.to_string();
                (true, true)
            }
            None => (false, false),
        })
    }

    pub fn update_group(&self, index: usize, new_group: &str) -> Result<bool, StoreError> {
        self.mutate(|records| match records.get_mut(index) {
            Some(rec) => {
                rec.group = rootscale_model::normalize_group(new_group);
                (true, true)
            }
            None => (false, false),
        })
    }

    /// Rebuilds the collection as `[old[order[0]], old[order[1]], ...]`.
    /// `order` must be a permutation of every current position; otherwise
    /// the collection is left as is and `false` is returned.
    pub fn reorder_dimensions(&self, order: &[i64]) -> Result<bool, StoreError> {
        self.mutate(|records| {
            let positions = match validate_permutation(order, records.len()) {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "dimension reorder rejected");
                    return (false, false);
                }
            };
            let mut slots: Vec<Option<DimensionRecord>> =
                std::mem::take(records).into_iter().map(Some).collect();
            *records = positions
                .into_iter()
                .filter_map(|i| slots[i].take())
                .collect();
            (true, true)
        })
    }

    /// Moves whole groups. `order` indexes the groups in first-occurrence
    /// order; each group keeps its records' relative order.
    pub fn reorder_groups(&self, order: &[i64]) -> Result<bool, StoreError> {
        self.mutate(|records| {
            if records.is_empty() {
                return (false, false);
            }
            let groups = groups_in_order(records);
            let positions = match validate_permutation(order, groups.len()) {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "group reorder rejected");
                    return (false, false);
                }
            };
            let slot_of: HashMap<&str, usize> = groups
                .iter()
                .enumerate()
                .map(|(i, g)| (g.as_str(), i))
                .collect();
            let mut buckets: Vec<Vec<DimensionRecord>> = vec![Vec::new(); groups.len()];
            for rec in std::mem::take(records) {
                let slot = slot_of[rec.group.as_str()];
                buckets[slot].push(rec);
            }
            for pos in positions {
                records.append(&mut buckets[pos]);
            }
            (true, true)
        })
    }

    /// Alphabetical list of groups, as offered in group selectors.
    pub fn list_groups(&self) -> Result<Vec<String>, StoreError> {
        Ok(sorted_groups(&self.snapshot()?))
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.writer
            .lock()
            .map_err(|_| StoreError("dimension store writer lock poisoned".to_string()))
    }

    /// Runs `f` under the writer lock. `f` returns its result plus whether
    /// the collection changed and must be saved.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Vec<DimensionRecord>) -> (T, bool),
    ) -> Result<T, StoreError> {
        let _guard = self.lock_writer()?;
        let mut records = self.load()?;
        let (out, dirty) = f(&mut records);
        if dirty {
            self.save(&records)?;
            info!(
                backend = %self.backend.describe(),
                count = records.len(),
                "dimensions saved"
            );
        }
        Ok(out)
    }
}
