//! CRUD operations for [`Course`] records.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use edunova_shared::{CourseId, Grade, RecordStatus, Subject};

use crate::error::{Result, StoreError};
use crate::models::Course;

/// The in-memory course catalog.  At most one *active* record exists per
/// (grade, subject); deactivated records stay in place for audit.
#[derive(Debug, Default, Clone)]
pub struct CourseCatalog {
    records: Vec<Course>,
}

/// Aggregate counts over the catalog, for the dashboard/debug view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Active course count per grade slug.
    pub grade_distribution: HashMap<String, usize>,
    /// Active course count per subject slug.
    pub subject_distribution: HashMap<String, usize>,
}

impl CourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Add a course.  Fails if an active record already covers the
    /// (grade, subject) pair; on failure the catalog is left untouched.
    pub fn add(
        &mut self,
        grade: Grade,
        subject: Subject,
        drive_link: String,
        added_by: String,
    ) -> Result<CourseId> {
        if self.find(grade, subject).is_some() {
            return Err(StoreError::DuplicateCourse { grade, subject });
        }

        let course = Course {
            id: CourseId::new(),
            grade,
            subject,
            drive_link,
            previous_drive_link: None,
            status: RecordStatus::Active,
            added_by,
            updated_by: None,
            added_at: Utc::now(),
            updated_at: None,
            deactivated_at: None,
        };
        let id = course.id;
        info!(course_id = %id, %grade, %subject, "Course added");
        self.records.push(course);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// The active course for this (grade, subject), if any.
    pub fn find(&self, grade: Grade, subject: Subject) -> Option<&Course> {
        self.records
            .iter()
            .find(|c| c.status.is_active() && c.grade == grade && c.subject == subject)
    }

    /// All records, any status, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.records.iter()
    }

    /// Active records only, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Course> {
        self.records.iter().filter(|c| c.status.is_active())
    }

    /// Active courses for one grade.
    pub fn by_grade(&self, grade: Grade) -> impl Iterator<Item = &Course> {
        self.active().filter(move |c| c.grade == grade)
    }

    /// Active courses for one subject.
    pub fn by_subject(&self, subject: Subject) -> impl Iterator<Item = &Course> {
        self.active().filter(move |c| c.subject == subject)
    }

    /// Raw record count, including deactivated records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Aggregate counts and per-grade / per-subject distributions of
    /// active records.
    pub fn stats(&self) -> CatalogStats {
        let active = self.active().count();
        let mut grade_distribution = HashMap::new();
        let mut subject_distribution = HashMap::new();
        for course in self.active() {
            *grade_distribution.entry(course.grade.slug()).or_insert(0) += 1;
            *subject_distribution
                .entry(course.subject.slug().to_string())
                .or_insert(0) += 1;
        }
        CatalogStats {
            total: self.records.len(),
            active,
            inactive: self.records.len() - active,
            grade_distribution,
            subject_distribution,
        }
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Replace the drive link of the active (grade, subject) course in
    /// place, stashing the prior link for audit display.
    pub fn update(
        &mut self,
        grade: Grade,
        subject: Subject,
        drive_link: String,
        updated_by: String,
    ) -> Result<CourseId> {
        let course = self
            .records
            .iter_mut()
            .find(|c| c.status.is_active() && c.grade == grade && c.subject == subject)
            .ok_or(StoreError::NotFound)?;

        let previous = std::mem::replace(&mut course.drive_link, drive_link);
        course.previous_drive_link = Some(previous);
        course.updated_by = Some(updated_by);
        course.updated_at = Some(Utc::now());
        info!(course_id = %course.id, %grade, %subject, "Course updated");
        Ok(course.id)
    }

    // ------------------------------------------------------------------
    // Soft-delete
    // ------------------------------------------------------------------

    /// Mark a record inactive.  Ordering of the remaining records is
    /// unaffected.
    pub fn deactivate(&mut self, id: CourseId) -> Result<()> {
        let course = self
            .records
            .iter_mut()
            .find(|c| c.id == id && c.status.is_active())
            .ok_or(StoreError::NotFound)?;
        course.status = RecordStatus::Inactive;
        course.deactivated_at = Some(Utc::now());
        info!(course_id = %id, "Course deactivated");
        Ok(())
    }
}
