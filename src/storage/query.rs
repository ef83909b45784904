// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Attribute queries: weight, cost and volume thresholds over the storage.
//!
//! Thresholds are checked before any scan runs. Results keep storage order.

use tracing::warn;

use crate::error::{Result, StorageError};
use crate::parcel::{Cost, ParcelRef};
use crate::storage::ParcelStorage;

impl ParcelStorage {
    /// Parcels lighter than `weight`. `weight` must be positive.
    pub fn get_all_weight_less_than(&self, weight: f64) -> Result<Vec<ParcelRef>> {
        if weight.is_nan() || weight <= 0.0 {
            warn!(weight, "Rejected weight threshold");
            return Err(StorageError::invalid(
                "get_all_weight_less_than",
                format!("weight must be greater than zero, got {weight}"),
            ));
        }
        Ok(self.search_boxes(|p| p.weight() < weight))
    }

    /// Parcels costing strictly more than `cost`. `cost` must not be negative.
    pub fn get_all_cost_greater_than(&self, cost: Cost) -> Result<Vec<ParcelRef>> {
        if cost.is_negative() {
            warn!(%cost, "Rejected cost threshold");
            return Err(StorageError::invalid(
                "get_all_cost_greater_than",
                format!("cost must not be negative, got {cost}"),
            ));
        }
        Ok(self.search_boxes(|p| p.cost() > cost))
    }

    /// Parcels with volume of at least `volume`. `volume` must not be negative.
    pub fn get_all_volume_greater_or_equal(&self, volume: f64) -> Result<Vec<ParcelRef>> {
        if volume.is_nan() || volume < 0.0 {
            warn!(volume, "Rejected volume threshold");
            return Err(StorageError::invalid(
                "get_all_volume_greater_or_equal",
                format!("volume must not be negative, got {volume}"),
            ));
        }
        Ok(self.search_boxes(|p| p.volume() >= volume))
    }
}
