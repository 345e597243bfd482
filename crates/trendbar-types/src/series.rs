//! Two-level container keyed by instrument, then period.

use std::collections::HashMap;

use crate::{Instrument, Period};

type Slots<T> = [Option<T>; Period::COUNT];

/// A map from `(instrument, period)` to a value.
///
/// The first level is keyed by [`Instrument`]; the second is a fixed slot per
/// [`Period`]. An instrument row exists only while at least one of its slots
/// is occupied: removing the last value drops the row.
#[derive(Debug, Clone)]
pub struct SeriesMap<T> {
    rows: HashMap<Instrument, Slots<T>>,
    len: usize,
}

impl<T> Default for SeriesMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SeriesMap<T> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            len: 0,
        }
    }

    /// Number of occupied `(instrument, period)` slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is occupied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of instruments with at least one occupied slot.
    #[must_use]
    pub fn instrument_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the value for the key, if present.
    #[must_use]
    pub fn get(&self, instrument: &Instrument, period: Period) -> Option<&T> {
        self.rows.get(instrument)?[period.index()].as_ref()
    }

    /// Returns true if the key is occupied.
    #[must_use]
    pub fn contains(&self, instrument: &Instrument, period: Period) -> bool {
        self.get(instrument, period).is_some()
    }

    /// Stores a value, returning the previous one.
    pub fn insert(&mut self, instrument: Instrument, period: Period, value: T) -> Option<T> {
        let previous = self.row_mut(instrument)[period.index()].replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns the value for the key, inserting one built by `make` if absent.
    pub fn get_or_insert_with(
        &mut self,
        instrument: &Instrument,
        period: Period,
        make: impl FnOnce() -> T,
    ) -> &mut T {
        let len = &mut self.len;
        let row = self
            .rows
            .entry(instrument.clone())
            .or_insert_with(empty_slots);
        row[period.index()].get_or_insert_with(|| {
            *len += 1;
            make()
        })
    }

    /// Removes and returns the value for the key.
    ///
    /// Drops the instrument row once its last slot is emptied.
    pub fn remove(&mut self, instrument: &Instrument, period: Period) -> Option<T> {
        let row = self.rows.get_mut(instrument)?;
        let removed = row[period.index()].take()?;
        self.len -= 1;
        if row.iter().all(Option::is_none) {
            self.rows.remove(instrument);
        }
        Some(removed)
    }

    /// Removes every value for which `pred` returns true, returning them.
    ///
    /// Within an instrument, values are visited in [`Period::all`] order.
    pub fn extract_if(
        &mut self,
        mut pred: impl FnMut(&Instrument, Period, &T) -> bool,
    ) -> Vec<(Instrument, Period, T)> {
        let mut extracted = Vec::new();
        self.rows.retain(|instrument, row| {
            for &period in Period::all() {
                let slot = &mut row[period.index()];
                if let Some(value) = slot.take_if(|value| pred(instrument, period, value)) {
                    extracted.push((instrument.clone(), period, value));
                }
            }
            row.iter().any(Option::is_some)
        });
        self.len -= extracted.len();
        extracted
    }

    /// Iterates over all occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (&Instrument, Period, &T)> {
        self.rows.iter().flat_map(|(instrument, row)| {
            Period::all().iter().filter_map(move |&period| {
                row[period.index()]
                    .as_ref()
                    .map(|value| (instrument, period, value))
            })
        })
    }

    /// Iterates over the instruments that have at least one occupied slot.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.rows.keys()
    }

    fn row_mut(&mut self, instrument: Instrument) -> &mut Slots<T> {
        self.rows.entry(instrument).or_insert_with(empty_slots)
    }
}

fn empty_slots<T>() -> Slots<T> {
    std::array::from_fn(|_| None)
}
