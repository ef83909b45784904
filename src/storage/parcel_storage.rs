// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Parcel storage: an ordered sequence of shared parcel handles.
//!
//! Every operation that takes parcels accepts anything convertible into
//! `Option<ParcelRef>`, so `None` can stand for an absent parcel. Inputs are
//! validated in full before the sequence is touched: a rejected call leaves
//! the storage exactly as it was.
//!
//! Membership (for removal) is reference identity, see [`ParcelRef::ptr_eq`].

use tracing::{debug, info, warn};

use crate::error::{Result, StorageError};
use crate::parcel::{Parcel, ParcelRef};

/// In-memory storage of the parcels currently at the office.
///
/// **Not** synchronised; mutation needs `&mut self`. Wrap it in a lock if
/// several threads must share one storage.
#[derive(Debug, Default)]
pub struct ParcelStorage {
    parcels: Vec<ParcelRef>,
}

impl ParcelStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a storage holding all of `parcels`, or fail without creating one
    /// if any element is absent.
    pub fn with_parcels<I, B>(parcels: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: Into<Option<ParcelRef>>,
    {
        let parcels = collect_present("ParcelStorage::with_parcels", parcels)?;
        debug!(count = parcels.len(), "Storage created");
        Ok(Self { parcels })
    }

    /// Append one parcel. Always returns `true` on success.
    pub fn accept_box(&mut self, parcel: impl Into<Option<ParcelRef>>) -> Result<bool> {
        let parcel: Option<ParcelRef> = parcel.into();
        let Some(parcel) = parcel else {
            warn!("Rejected absent parcel");
            return Err(StorageError::invalid("accept_box", "parcel is absent"));
        };
        self.parcels.push(parcel);
        debug!(stored = self.parcels.len(), "Parcel accepted");
        Ok(true)
    }

    /// Append every parcel, in order. Nothing is appended if any is absent.
    pub fn accept_all_boxes<I, B>(&mut self, parcels: I) -> Result<bool>
    where
        I: IntoIterator<Item = B>,
        B: Into<Option<ParcelRef>>,
    {
        let incoming = collect_present("accept_all_boxes", parcels)?;
        let count = incoming.len();
        self.parcels.extend(incoming);
        debug!(count, stored = self.parcels.len(), "Parcels accepted");
        Ok(true)
    }

    /// Remove every stored entry that is one of `parcels`.
    ///
    /// Returns whether anything was removed. Nothing is removed if any
    /// element of `parcels` is absent.
    pub fn carry_out_boxes<I, B>(&mut self, parcels: I) -> Result<bool>
    where
        I: IntoIterator<Item = B>,
        B: Into<Option<ParcelRef>>,
    {
        let targets = collect_present("carry_out_boxes", parcels)?;
        let removed = self.remove_members(&targets);
        info!(removed, stored = self.parcels.len(), "Parcels carried out");
        Ok(removed > 0)
    }

    /// Remove and return every entry matching `predicate`, in storage order.
    pub fn carry_out_where<P>(&mut self, predicate: P) -> Vec<ParcelRef>
    where
        P: FnMut(&Parcel) -> bool,
    {
        let matched = self.search_boxes(predicate);
        let removed = self.remove_members(&matched);
        info!(matched = matched.len(), removed, stored = self.parcels.len(), "Parcels carried out by predicate");
        matched
    }

    /// Every entry matching `predicate`, in storage order. Read-only.
    pub fn search_boxes<P>(&self, mut predicate: P) -> Vec<ParcelRef>
    where
        P: FnMut(&Parcel) -> bool,
    {
        let found: Vec<ParcelRef> = self
            .parcels
            .iter()
            .filter(|p| predicate(&*p.read()))
            .cloned()
            .collect();
        debug!(found = found.len(), stored = self.parcels.len(), "Search finished");
        found
    }

    /// Set the office number of every entry matching `predicate`.
    pub fn update_office_number<P>(&mut self, mut predicate: P, new_office_number: i32)
    where
        P: FnMut(&Parcel) -> bool,
    {
        let mut updated = 0usize;
        for parcel in &self.parcels {
            // Read guard must be dropped before taking the write lock.
            let hit = predicate(&*parcel.read());
            if hit {
                parcel.set_office_number(new_office_number);
                updated += 1;
            }
        }
        info!(updated, office = new_office_number, "Office number updated");
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }

    /// Handles in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParcelRef> {
        self.parcels.iter()
    }

    /// Copies of every stored parcel, in storage order.
    pub fn snapshot(&self) -> Vec<Parcel> {
        self.parcels.iter().map(ParcelRef::snapshot).collect()
    }

    fn remove_members(&mut self, targets: &[ParcelRef]) -> usize {
        if targets.is_empty() {
            return 0;
        }
        let before = self.parcels.len();
        self.parcels.retain(|p| !targets.iter().any(|t| t.ptr_eq(p)));
        before - self.parcels.len()
    }
}

impl<'a> IntoIterator for &'a ParcelStorage {
    type Item = &'a ParcelRef;
    type IntoIter = std::slice::Iter<'a, ParcelRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Unwrap every element, or report the position of the first absent one.
fn collect_present<I, B>(operation: &'static str, parcels: I) -> Result<Vec<ParcelRef>>
where
    I: IntoIterator<Item = B>,
    B: Into<Option<ParcelRef>>,
{
    parcels
        .into_iter()
        .enumerate()
        .map(|(position, parcel)| {
            let parcel: Option<ParcelRef> = parcel.into();
            parcel.ok_or_else(|| {
                warn!(operation, position, "Rejected collection with absent parcel");
                StorageError::invalid(operation, format!("parcel at position {position} is absent"))
            })
        })
        .collect()
}
