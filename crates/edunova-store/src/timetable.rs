//! CRUD operations for [`TimetableSlot`] records.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use edunova_shared::{Grade, RecordStatus, SlotId, Subject};

use crate::error::{Result, StoreError};
use crate::models::TimetableSlot;

/// The (grade, subject) pair a timetable belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClassKey {
    pub grade: Grade,
    pub subject: Subject,
}

/// One date of a class schedule with its slots ordered by start time.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub slots: Vec<TimetableSlot>,
}

/// The timetable registry: per (grade, subject), an insertion-ordered
/// list of slots.  Views group by date and sort by start time.
#[derive(Debug, Default, Clone)]
pub struct Timetable {
    classes: HashMap<ClassKey, Vec<TimetableSlot>>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Append a slot under the (grade, subject) key.  Rejects ranges
    /// that do not end after they start.
    pub fn add(
        &mut self,
        key: ClassKey,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<SlotId> {
        if end <= start {
            return Err(StoreError::InvalidTimeRange);
        }

        let slot = TimetableSlot {
            id: SlotId::new(),
            date,
            start,
            end,
            status: RecordStatus::Active,
            added_at: Utc::now(),
            deactivated_at: None,
        };
        let id = slot.id;
        info!(slot_id = %id, grade = %key.grade, subject = %key.subject, %date, "Timetable slot added");
        self.classes.entry(key).or_default().push(slot);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// The active schedule of one class, grouped by date (ascending)
    /// with each date's slots ordered by start time, regardless of
    /// insertion order.
    pub fn schedule(&self, key: ClassKey) -> Vec<DaySchedule> {
        let mut by_date: BTreeMap<NaiveDate, Vec<TimetableSlot>> = BTreeMap::new();
        for slot in self
            .classes
            .get(&key)
            .into_iter()
            .flatten()
            .filter(|s| s.status.is_active())
        {
            by_date.entry(slot.date).or_default().push(slot.clone());
        }
        by_date
            .into_iter()
            .map(|(date, mut slots)| {
                slots.sort_by_key(|s| s.start);
                DaySchedule { date, slots }
            })
            .collect()
    }

    /// All slots of one class, any status, in insertion order.
    pub fn iter(&self, key: ClassKey) -> impl Iterator<Item = &TimetableSlot> {
        self.classes.get(&key).into_iter().flatten()
    }

    /// Raw slot count for one class, including deactivated slots.
    pub fn len(&self, key: ClassKey) -> usize {
        self.classes.get(&key).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.values().all(Vec::is_empty)
    }

    // ------------------------------------------------------------------
    // Soft-delete
    // ------------------------------------------------------------------

    /// Mark one slot inactive.
    pub fn deactivate(&mut self, key: ClassKey, id: SlotId) -> Result<()> {
        let slot = self
            .classes
            .get_mut(&key)
            .and_then(|slots| slots.iter_mut().find(|s| s.id == id && s.status.is_active()))
            .ok_or(StoreError::NotFound)?;
        slot.status = RecordStatus::Inactive;
        slot.deactivated_at = Some(Utc::now());
        info!(slot_id = %id, "Timetable slot deactivated");
        Ok(())
    }

    /// Mark every active slot of one date inactive.  Returns how many
    /// slots were affected; zero means the date had none.
    pub fn deactivate_date(&mut self, key: ClassKey, date: NaiveDate) -> Result<usize> {
        let slots = self.classes.get_mut(&key).ok_or(StoreError::NotFound)?;
        let now = Utc::now();
        let mut affected = 0;
        for slot in slots
            .iter_mut()
            .filter(|s| s.date == date && s.status.is_active())
        {
            slot.status = RecordStatus::Inactive;
            slot.deactivated_at = Some(now);
            affected += 1;
        }
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        info!(grade = %key.grade, subject = %key.subject, %date, affected, "Timetable date cleared");
        Ok(affected)
    }
}
