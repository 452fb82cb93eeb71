#![forbid(unsafe_code)]

//! Records and the index-addressed data list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry of the carousel's data list.
///
/// `id` is an opaque identity; it need not equal the record's position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    pub id: i64,
    pub display_name: String,
}

impl Record {
    /// Create a record.
    #[must_use]
    pub fn new(id: i64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Ordered, index-addressable list of records.
///
/// Indices are signed so callers can probe positions computed from a
/// window offset (`center + slot - radius`) without casting; negative and
/// past-the-end indices simply miss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DataList {
    records: Vec<Record>,
}

impl DataList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` generated records `{ id: i, display_name: "Item i" }`.
    #[must_use]
    pub fn sample(n: usize) -> Self {
        (0..n)
            .map(|i| Record::new(i as i64, format!("Item {i}")))
            .collect()
    }

    /// Number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the list is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `index` addresses a record.
    #[inline]
    #[must_use]
    pub fn contains_index(&self, index: i64) -> bool {
        index >= 0 && (index as u64) < self.records.len() as u64
    }

    /// Record at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: i64) -> Option<&Record> {
        if self.contains_index(index) {
            self.records.get(index as usize)
        } else {
            None
        }
    }

    /// Replace the record at `index`. Returns the previous record, or `None`
    /// (leaving the list untouched) when out of range.
    pub fn replace(&mut self, index: i64, record: Record) -> Option<Record> {
        if !self.contains_index(index) {
            return None;
        }
        let slot = self.records.get_mut(index as usize)?;
        Some(std::mem::replace(slot, record))
    }

    /// Position of the first record with `id` (linear scan).
    #[must_use]
    pub fn position_of_id(&self, id: i64) -> Option<i64> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .map(|i| i as i64)
    }

    /// Largest valid index, or `None` when empty.
    #[must_use]
    pub fn last_index(&self) -> Option<i64> {
        self.records.len().checked_sub(1).map(|i| i as i64)
    }

    /// Iterate records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Borrow the records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }
}

impl From<Vec<Record>> for DataList {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for DataList {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DataList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
