//! Single edit cursor for a rendered tutorial table.

use std::{mem, sync::Arc};

use shared::domain::{TutorialId, TutorialRecord};
use tracing::{debug, info, warn};

use crate::{
    error::{EditError, RemoteFailure},
    store::TutorialStore,
};

/// At most one record is editable at a time; the draft only exists while
/// editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing {
        record: TutorialRecord,
        draft: String,
        original: String,
    },
}

/// Outcome of [`EditSession::save`]. The session is back in `Viewing`
/// whatever the two results say.
#[derive(Debug)]
pub struct SaveReport {
    pub tutorial_id: TutorialId,
    pub mutation: Result<(), RemoteFailure>,
    pub refresh: Result<Vec<TutorialRecord>, RemoteFailure>,
}

impl SaveReport {
    pub fn is_persisted(&self) -> bool {
        self.mutation.is_ok()
    }
}

pub struct EditSession {
    store: Arc<dyn TutorialStore>,
    uploader: Option<String>,
    state: EditState,
}

impl EditSession {
    /// `uploader` is the list filter used for the refresh after each save.
    pub fn new(store: Arc<dyn TutorialStore>, uploader: Option<String>) -> Self {
        Self {
            store,
            uploader,
            state: EditState::Viewing,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<TutorialId> {
        match &self.state {
            EditState::Editing { record, .. } => Some(record.id),
            EditState::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Viewing => None,
        }
    }

    pub fn original(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { original, .. } => Some(original),
            EditState::Viewing => None,
        }
    }

    /// Opens `record` for editing. Any record already open is closed first and
    /// its draft discarded; its id is returned.
    pub fn begin_edit(&mut self, record: &TutorialRecord) -> Option<TutorialId> {
        let discarded = self.cancel();
        self.state = EditState::Editing {
            record: record.clone(),
            draft: record.content.clone(),
            original: record.content.clone(),
        };
        debug!(tutorial_id = record.id.0, "editing tutorial");
        discarded
    }

    pub fn update_draft(&mut self, content: impl Into<String>) -> Result<(), EditError> {
        match &mut self.state {
            EditState::Editing { draft, .. } => {
                *draft = content.into();
                Ok(())
            }
            EditState::Viewing => Err(EditError::NotEditing),
        }
    }

    /// Drops the draft and returns to viewing. The record is untouched.
    pub fn cancel(&mut self) -> Option<TutorialId> {
        match mem::take(&mut self.state) {
            EditState::Editing { record, .. } => {
                debug!(tutorial_id = record.id.0, "discarded tutorial draft");
                Some(record.id)
            }
            EditState::Viewing => None,
        }
    }

    /// Sends the draft, then refetches the list, then reports both results.
    ///
    /// The session leaves edit mode before any request is made, so a failed
    /// mutation never keeps the record open.
    pub async fn save(&mut self) -> Result<SaveReport, EditError> {
        let EditState::Editing { record, draft, .. } = mem::take(&mut self.state) else {
            return Err(EditError::NotEditing);
        };

        let mutation = self.store.mutate_content(&record, &draft).await;
        match &mutation {
            Ok(()) => info!(tutorial_id = record.id.0, "saved tutorial edit"),
            Err(err) => warn!(tutorial_id = record.id.0, error = %err, "tutorial edit not saved"),
        }

        let refresh = self.store.list(self.uploader.as_deref()).await;
        if let Err(err) = &refresh {
            warn!(error = %err, "tutorial list refresh failed after save");
        }

        Ok(SaveReport {
            tutorial_id: record.id,
            mutation,
            refresh,
        })
    }
}

#[cfg(test)]
#[path = "tests/edit_session_tests.rs"]
mod tests;
