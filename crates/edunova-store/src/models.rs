//! Domain model structs held by the in-memory stores.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a UI layer or dumped into an export snapshot.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use edunova_shared::{CourseId, FormLinkId, Grade, RecordStatus, SlotId, Subject, TeacherId};

// ---------------------------------------------------------------------------
// Teacher
// ---------------------------------------------------------------------------

/// A teacher roster record.  The natural key is the email address,
/// unique among active records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub subject: Subject,
    /// Normalized 10-digit contact number.
    pub contact: String,
    pub email: String,
    pub status: RecordStatus,
    pub added_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Course
// ---------------------------------------------------------------------------

/// A course catalog record: one Google Drive materials link per
/// (grade, subject), unique among active records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub grade: Grade,
    pub subject: Subject,
    pub drive_link: String,
    /// The link this record held before its last update, kept for audit
    /// display.
    pub previous_drive_link: Option<String>,
    pub status: RecordStatus,
    pub added_by: String,
    pub updated_by: Option<String>,
    pub added_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// FormLink
// ---------------------------------------------------------------------------

/// A student registration form link.  Append-only; the "current" link is
/// the most recent active entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormLink {
    pub id: FormLinkId,
    pub url: String,
    /// The URL this entry held before its last in-place update.
    pub previous_url: Option<String>,
    pub status: RecordStatus,
    pub added_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// TimetableSlot
// ---------------------------------------------------------------------------

/// One time range on a class timetable.  Slots are grouped per
/// (grade, subject) and, within a date, kept ordered by start time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimetableSlot {
    pub id: SlotId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub status: RecordStatus,
    pub added_at: DateTime<Utc>,
    pub deactivated_at: Option<DateTime<Utc>>,
}
