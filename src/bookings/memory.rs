//! In-process booking store.
//!
//! Same ordering and id semantics as the Postgres store. Every call counts
//! as one statement, and the store can be told to fail so callers can
//! exercise their persistence-error paths.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::bookings::model::{Booking, BookingId, BookingInput};
use crate::bookings::store::{BookingStore, StoreError};

#[derive(Debug, Default)]
struct Table {
    next_id: BookingId,
    rows: BTreeMap<BookingId, Booking>,
}

#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    table: Mutex<Table>,
    statements: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of statements executed so far, failed ones included.
    pub fn statement_count(&self) -> usize {
        self.statements.load(Ordering::SeqCst)
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.lock_table().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every following statement fail with `message`; `None` clears it.
    pub fn fail_with(&self, message: Option<&str>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = message.map(str::to_string);
        }
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, Table>, StoreError> {
        self.statements.fetch_add(1, Ordering::SeqCst);

        let failure = self
            .failure
            .lock()
            .map_err(|_| StoreError::Unavailable("failure switch poisoned".into()))?
            .clone();
        if let Some(message) = failure {
            return Err(StoreError::Unavailable(message));
        }

        self.lock_table()
    }

    fn lock_table(&self) -> Result<std::sync::MutexGuard<'_, Table>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("booking table poisoned".into()))
    }
}

/// Chronological key, so `9:00` orders before `10:00` and `2024-5-9`
/// before `2024-05-10` as they would in a `date`/`time` column. Text that
/// does not parse sorts after every valid value in the descending list.
fn sort_key(booking: &Booking) -> (Option<NaiveDate>, Option<NaiveTime>) {
    let date = NaiveDate::parse_from_str(booking.date.trim(), "%Y-%m-%d").ok();
    let time = ["%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(booking.time.trim(), format).ok());
    (date, time)
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let table = self.begin()?;
        let mut rows: Vec<Booking> = table.rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            sort_key(b)
                .cmp(&sort_key(a))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn create(&self, input: BookingInput) -> Result<Booking, StoreError> {
        let mut table = self.begin()?;
        table.next_id += 1;
        let booking = input.into_booking(table.next_id);
        table.rows.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: BookingId) -> Result<Option<Booking>, StoreError> {
        let table = self.begin()?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn update(
        &self,
        id: BookingId,
        input: BookingInput,
    ) -> Result<Option<Booking>, StoreError> {
        let mut table = self.begin()?;
        Ok(table.rows.get_mut(&id).map(|row| {
            *row = input.into_booking(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: BookingId) -> Result<Option<Booking>, StoreError> {
        let mut table = self.begin()?;
        Ok(table.rows.remove(&id))
    }
}
