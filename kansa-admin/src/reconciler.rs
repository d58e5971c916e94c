//! Draft/baseline reconciliation
//!
//! The baseline is the record as the server last confirmed it; the draft is
//! the operator's copy. Only fields whose draft value differs from the
//! baseline are sent on commit, and `id` never is.

use kansa_client::MembershipApi;
use serde_json::Value;
use shared::{Record, merge_defaults};
use tracing::{debug, info, warn};

use crate::config::SubmitRelease;
use crate::error::AdminError;
use crate::validity::{is_valid_member, validate_member};

/// A commit that has passed the guard and is waiting for the transport
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pub id: i64,
    pub changes: Record,
}

#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    baseline: Option<Record>,
    draft: Record,
    submitting: bool,
    release: SubmitRelease,
}

impl Reconciler {
    pub fn new(release: SubmitRelease) -> Self {
        Self {
            release,
            ..Default::default()
        }
    }

    pub fn baseline(&self) -> Option<&Record> {
        self.baseline.as_ref()
    }

    pub fn draft(&self) -> &Record {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn release(&self) -> SubmitRelease {
        self.release
    }

    /// Replace the baseline if it differs structurally from the current one
    ///
    /// Returns whether the draft was reseeded. An equal baseline keeps the
    /// operator's edits.
    pub fn seed(&mut self, new_baseline: Record) -> bool {
        if self.baseline.as_ref() == Some(&new_baseline) {
            return false;
        }
        debug!(id = ?new_baseline.id(), "Reseeding draft from baseline");
        self.draft = merge_defaults(&new_baseline);
        self.baseline = Some(new_baseline);
        self.submitting = false;
        true
    }

    /// Write a value into the draft, e.g. `&["paper_pubs", "name"]`
    pub fn set_field(&mut self, path: &[&str], value: impl Into<Value>) {
        self.draft.set_in(path, value.into());
    }

    /// Draft fields that differ from the baseline
    ///
    /// Fields missing from the baseline compare as `""`.
    pub fn changes(&self) -> Record {
        let empty = Value::String(String::new());
        self.draft
            .iter()
            .filter(|(key, _)| key.as_str() != "id")
            .filter(|(key, value)| {
                let base = self
                    .baseline
                    .as_ref()
                    .and_then(|b| b.get(key))
                    .unwrap_or(&empty);
                *value != base
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.changes().is_empty()
    }

    pub fn is_valid(&self) -> bool {
        is_valid_member(&self.draft)
    }

    /// Form default for a field: the baseline value, `""` when absent
    pub fn baseline_value(&self, path: &[&str]) -> Value {
        self.baseline
            .as_ref()
            .and_then(|b| b.get_in(path))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()))
    }

    /// Form value for a field: the draft value, `None` when absent
    pub fn draft_value(&self, path: &[&str]) -> Option<&Value> {
        self.draft.get_in(path)
    }

    /// Take the commit guard and capture the delta to send
    pub fn begin_commit(&mut self) -> Result<PendingCommit, AdminError> {
        if self.submitting {
            return Err(AdminError::AlreadySubmitting);
        }
        let changes = self.changes();
        if changes.is_empty() {
            return Err(AdminError::NothingToCommit);
        }
        validate_member(&self.draft)?;
        let id = self
            .baseline
            .as_ref()
            .and_then(Record::id)
            .ok_or(AdminError::MissingId)?;

        self.submitting = true;
        Ok(PendingCommit { id, changes })
    }

    /// Record the transport outcome of a commit started with [`begin_commit`]
    ///
    /// [`begin_commit`]: Reconciler::begin_commit
    pub fn finish_commit(&mut self, succeeded: bool) {
        if !succeeded && self.release == SubmitRelease::OnFailure {
            self.submitting = false;
        }
    }

    /// Release the commit guard regardless of how the last commit ended
    pub fn reset_submitting(&mut self) {
        self.submitting = false;
    }

    /// Send the delta upstream; a second call while one is in flight is rejected
    pub async fn commit<A>(&mut self, api: &A) -> Result<Value, AdminError>
    where
        A: MembershipApi + ?Sized,
    {
        let pending = self.begin_commit()?;
        let fields: Vec<&str> = pending.changes.keys().map(String::as_str).collect();
        debug!(id = pending.id, ?fields, "Committing member changes");

        match api.update_person(pending.id, &pending.changes).await {
            Ok(response) => {
                self.finish_commit(true);
                info!(id = pending.id, "Member changes saved");
                Ok(response)
            }
            Err(e) => {
                self.finish_commit(false);
                warn!(id = pending.id, error = %e, "Member save failed");
                Err(e.into())
            }
        }
    }

    /// End the editing session
    pub fn discard(&mut self) {
        self.baseline = None;
        self.draft = Record::new();
        self.submitting = false;
    }
}
