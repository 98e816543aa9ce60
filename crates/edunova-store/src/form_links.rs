//! CRUD operations for [`FormLink`] records.

use chrono::Utc;
use tracing::info;

use edunova_shared::{FormLinkId, RecordStatus};

use crate::error::{Result, StoreError};
use crate::models::FormLink;

/// The student registration form-link registry.  Append-only: new links
/// are pushed, and the "current" link is the most recent active entry.
#[derive(Debug, Default, Clone)]
pub struct FormLinkRegistry {
    records: Vec<FormLink>,
}

impl FormLinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Register a new form link.  An exact duplicate URL is rejected
    /// regardless of status; on failure the registry is left untouched.
    pub fn add(&mut self, url: String) -> Result<FormLinkId> {
        if self.records.iter().any(|l| l.url == url) {
            return Err(StoreError::DuplicateFormLink);
        }

        let link = FormLink {
            id: FormLinkId::new(),
            url,
            previous_url: None,
            status: RecordStatus::Active,
            added_at: Utc::now(),
            updated_at: None,
            deactivated_at: None,
        };
        let id = link.id;
        info!(link_id = %id, url = %link.url, "Form link added");
        self.records.push(link);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// The link students currently see: the most recent active entry.
    pub fn current(&self) -> Option<&FormLink> {
        self.records.iter().rev().find(|l| l.status.is_active())
    }

    /// All records, any status, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FormLink> {
        self.records.iter()
    }

    /// Active records only, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &FormLink> {
        self.records.iter().filter(|l| l.status.is_active())
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

    /// Rewrite the current link in place, stashing the prior URL.
    /// Fails when no active link exists or the URL is unchanged.
    pub fn update(&mut self, url: String) -> Result<FormLinkId> {
        let current = self
            .records
            .iter()
            .rev()
            .find(|l| l.status.is_active())
            .ok_or(StoreError::NotFound)?;
        if current.url == url {
            return Err(StoreError::UnchangedLink);
        }

        let id = current.id;
        let link = self
            .records
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound)?;
        let previous = std::mem::replace(&mut link.url, url);
        link.previous_url = Some(previous);
        link.updated_at = Some(Utc::now());
        info!(link_id = %id, url = %link.url, "Form link updated");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Soft-delete
    // ------------------------------------------------------------------

    /// Mark a link inactive.  Ordering of the remaining records is
    /// unaffected.
    pub fn deactivate(&mut self, id: FormLinkId) -> Result<()> {
        let link = self
            .records
            .iter_mut()
            .find(|l| l.id == id && l.status.is_active())
            .ok_or(StoreError::NotFound)?;
        link.status = RecordStatus::Inactive;
        link.deactivated_at = Some(Utc::now());
        info!(link_id = %id, "Form link deactivated");
        Ok(())
    }
}
