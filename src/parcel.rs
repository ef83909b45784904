// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Parcel record and the shared handle the storage keeps.
//!
//! A [`ParcelRef`] is what travels through the storage API. Cloning it does
//! not copy the parcel: every clone points at the same record, so an office
//! number set through one handle is seen by all of them.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

// ─────────────────────────────── Cost ────────────────────────────────────────

/// Fixed-point decimal with two fractional digits, stored as minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cost(i64);

const MINOR_PER_UNIT: i64 = 100;
const FRACTION_DIGITS: usize = 2;

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub const fn from_minor(minor: i64) -> Self {
        Cost(minor)
    }

    /// Whole currency units, no fractional part.
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(MINOR_PER_UNIT).map(Cost)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl FromStr for Cost {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || StorageError::InvalidCost(s.to_string());
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(bad());
        }
        if frac_part.len() > FRACTION_DIGITS
            || !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(bad());
        }

        let units: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| bad())?
        };
        let mut fraction: i64 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| bad())?
        };
        // "5.5" means fifty minor units
        for _ in frac_part.len()..FRACTION_DIGITS {
            fraction *= 10;
        }

        let minor = units
            .checked_mul(MINOR_PER_UNIT)
            .and_then(|m| m.checked_add(fraction))
            .ok_or_else(bad)?;
        Ok(Cost(if negative { -minor } else { minor }))
    }
}

impl TryFrom<String> for Cost {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cost> for String {
    fn from(cost: Cost) -> Self {
        cost.to_string()
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_unit = MINOR_PER_UNIT as u64;
        write!(f, "{sign}{}.{:02}", abs / per_unit, abs % per_unit)
    }
}

// ─────────────────────────────── Parcel ──────────────────────────────────────

/// A physical parcel waiting at the office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    weight: f64,
    cost: Cost,
    volume: f64,
    office_number: i32,
}

impl Parcel {
    pub fn new(weight: f64, cost: Cost, volume: f64, office_number: i32) -> Self {
        Self { weight, cost, volume, office_number }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn set_cost(&mut self, cost: Cost) {
        self.cost = cost;
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    pub fn office_number(&self) -> i32 {
        self.office_number
    }

    pub fn set_office_number(&mut self, office_number: i32) {
        self.office_number = office_number;
    }
}

// ─────────────────────────────── ParcelRef ───────────────────────────────────

/// Shared handle to a [`Parcel`]. Equality is identity, not field equality.
#[derive(Clone)]
pub struct ParcelRef(Arc<RwLock<Parcel>>);

impl ParcelRef {
    pub fn new(parcel: Parcel) -> Self {
        ParcelRef(Arc::new(RwLock::new(parcel)))
    }

    /// Lock for reading. Do not hold across a `write` on the same handle.
    pub fn read(&self) -> RwLockReadGuard<'_, Parcel> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Parcel> {
        self.0.write()
    }

    /// True when both handles point at the same parcel.
    pub fn ptr_eq(&self, other: &ParcelRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Point-in-time copy of the parcel.
    pub fn snapshot(&self) -> Parcel {
        self.0.read().clone()
    }

    pub fn weight(&self) -> f64 {
        self.read().weight()
    }

    pub fn cost(&self) -> Cost {
        self.read().cost()
    }

    pub fn volume(&self) -> f64 {
        self.read().volume()
    }

    pub fn office_number(&self) -> i32 {
        self.read().office_number()
    }

    pub fn set_office_number(&self, office_number: i32) {
        self.write().set_office_number(office_number);
    }
}

impl From<Parcel> for ParcelRef {
    fn from(parcel: Parcel) -> Self {
        ParcelRef::new(parcel)
    }
}

/// Lets callers pass `&Vec<ParcelRef>` where the storage expects parcels.
impl From<&ParcelRef> for Option<ParcelRef> {
    fn from(parcel: &ParcelRef) -> Self {
        Some(parcel.clone())
    }
}

impl PartialEq for ParcelRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ParcelRef {}

impl fmt::Debug for ParcelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParcelRef").field(&*self.read()).finish()
    }
}
