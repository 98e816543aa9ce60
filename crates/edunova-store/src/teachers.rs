//! CRUD operations for [`Teacher`] records.

use chrono::Utc;
use tracing::info;

use edunova_shared::{RecordStatus, Subject, TeacherId};

use crate::error::{Result, StoreError};
use crate::models::Teacher;

/// The in-memory teacher roster.  Records keep insertion order; deletion
/// is a soft-delete so the raw count never shrinks.
#[derive(Debug, Default, Clone)]
pub struct TeacherRoster {
    records: Vec<Teacher>,
}

impl TeacherRoster {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Add a teacher.  Fails if an active record already uses the email;
    /// on failure the roster is left untouched.
    pub fn add(
        &mut self,
        name: String,
        subject: Subject,
        contact: String,
        email: String,
    ) -> Result<TeacherId> {
        if self.find_active_by_email(&email).is_some() {
            return Err(StoreError::DuplicateTeacher { email });
        }

        let teacher = Teacher {
            id: TeacherId::new(),
            name,
            subject,
            contact,
            email,
            status: RecordStatus::Active,
            added_at: Utc::now(),
            updated_at: None,
            deactivated_at: None,
        };
        let id = teacher.id;
        info!(teacher_id = %id, email = %teacher.email, "Teacher added");
        self.records.push(teacher);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Active record with this email, if any.
    pub fn find_active_by_email(&self, email: &str) -> Option<&Teacher> {
        self.records
            .iter()
            .find(|t| t.status.is_active() && t.email == email)
    }

    /// All records, any status, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Teacher> {
        self.records.iter()
    }

    /// Active records only, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Teacher> {
        self.records.iter().filter(|t| t.status.is_active())
    }

    /// Raw record count, including deactivated records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Replace the mutable fields of the active record keyed by email.
    pub fn update_by_email(
        &mut self,
        email: &str,
        name: String,
        subject: Subject,
        contact: String,
    ) -> Result<TeacherId> {
        let teacher = self
            .records
            .iter_mut()
            .find(|t| t.status.is_active() && t.email == email)
            .ok_or(StoreError::NotFound)?;

        teacher.name = name;
        teacher.subject = subject;
        teacher.contact = contact;
        teacher.updated_at = Some(Utc::now());
        info!(teacher_id = %teacher.id, email = %email, "Teacher updated");
        Ok(teacher.id)
    }

    // ------------------------------------------------------------------
    // Soft-delete
    // ------------------------------------------------------------------

    /// Mark a record inactive.  Ordering of the remaining records is
    /// unaffected.
    pub fn deactivate(&mut self, id: TeacherId) -> Result<()> {
        let teacher = self
            .records
            .iter_mut()
            .find(|t| t.id == id && t.status.is_active())
            .ok_or(StoreError::NotFound)?;
        teacher.status = RecordStatus::Inactive;
        teacher.deactivated_at = Some(Utc::now());
        info!(teacher_id = %id, "Teacher deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with_one() -> (TeacherRoster, TeacherId) {
        let mut roster = TeacherRoster::new();
        let id = roster
            .add(
                "A. Perera".into(),
                Subject::Mathematics,
                "0712345678".into(),
                "perera@school.edu".into(),
            )
            .unwrap();
        (roster, id)
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (mut roster, _) = roster_with_one();
        let err = roster
            .add(
                "B. Perera".into(),
                Subject::Science,
                "0787654321".into(),
                "perera@school.edu".into(),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateTeacher { .. }));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_deactivate_hides_from_active_but_keeps_raw_count() {
        let (mut roster, id) = roster_with_one();
        roster
            .add(
                "C. Silva".into(),
                Subject::English,
                "0700000000".into(),
                "silva@school.edu".into(),
            )
            .unwrap();

        roster.deactivate(id).unwrap();

        assert_eq!(roster.active().count(), 1);
        assert_eq!(roster.len(), 2);
        // ordering of the survivors is unchanged
        assert_eq!(roster.iter().nth(1).unwrap().email, "silva@school.edu");
    }

    #[test]
    fn test_email_reusable_after_deactivation() {
        let (mut roster, id) = roster_with_one();
        roster.deactivate(id).unwrap();
        assert!(roster
            .add(
                "A. Perera".into(),
                Subject::Mathematics,
                "0712345678".into(),
                "perera@school.edu".into(),
            )
            .is_ok());
    }

    #[test]
    fn test_update_missing_email_not_found() {
        let (mut roster, _) = roster_with_one();
        let err = roster
            .update_by_email(
                "nobody@school.edu",
                "X".into(),
                Subject::Art,
                "0711111111".into(),
            )
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound);
    }

    #[test]
    fn test_update_sets_timestamp() {
        let (mut roster, _) = roster_with_one();
        roster
            .update_by_email(
                "perera@school.edu",
                "A. Perera".into(),
                Subject::Physics,
                "0712345678".into(),
            )
            .unwrap();
        let teacher = roster.find_active_by_email("perera@school.edu").unwrap();
        assert_eq!(teacher.subject, Subject::Physics);
        assert!(teacher.updated_at.is_some());
    }
}
