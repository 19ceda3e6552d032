use std::mem;

use crate::dashboard::refresh::RefreshNotifier;
use crate::domain::ticket::{
    Category, Classification, NewTicket, Priority, Suggestion, Ticket, TicketDraft,
};
use crate::error::{AppError, AppResult};
use crate::services::{TicketAssistant, TicketStore};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in Title and Description first.";

/// Where the draft is in the edit → review → submit cycle. Each step carries
/// exactly the data that is meaningful in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    Edit {
        draft: TicketDraft,
        /// Classification kept from an earlier review, if the user went back.
        retained: Option<Classification>,
    },
    Review {
        draft: TicketDraft,
        classification: Classification,
    },
}

impl Default for DraftState {
    fn default() -> Self {
        DraftState::Edit {
            draft: TicketDraft::default(),
            retained: None,
        }
    }
}

impl DraftState {
    pub fn draft(&self) -> &TicketDraft {
        match self {
            DraftState::Edit { draft, .. } | DraftState::Review { draft, .. } => draft,
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        match self {
            DraftState::Edit { retained, .. } => *retained,
            DraftState::Review { classification, .. } => Some(*classification),
        }
    }

    pub fn is_review(&self) -> bool {
        matches!(self, DraftState::Review { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftAction {
    Analyze,
    Submit,
}

impl DraftAction {
    fn label(&self) -> &'static str {
        match self {
            DraftAction::Analyze => "analysis",
            DraftAction::Submit => "submission",
        }
    }
}

/// What to send to the classifier for a pending analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub description: String,
}

pub struct DraftWorkflow {
    state: DraftState,
    pending: Option<DraftAction>,
    notifier: RefreshNotifier,
}

impl DraftWorkflow {
    pub fn new(notifier: RefreshNotifier) -> Self {
        Self {
            state: DraftState::default(),
            pending: None,
            notifier,
        }
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn pending(&self) -> Option<DraftAction> {
        self.pending
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> AppResult<()> {
        self.edit_draft(|draft| draft.title = title.into())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> AppResult<()> {
        self.edit_draft(|draft| draft.description = description.into())
    }

    pub fn set_category(&mut self, category: Category) -> AppResult<()> {
        self.edit_classification(|classification| classification.category = category)
    }

    pub fn set_priority(&mut self, priority: Priority) -> AppResult<()> {
        self.edit_classification(|classification| classification.priority = priority)
    }

    /// Starts classification of the current draft. Rejected without touching
    /// the network when a field is missing or another call is outstanding.
    pub fn begin_analyze(&mut self) -> AppResult<AnalyzeRequest> {
        self.ensure_idle()?;
        let DraftState::Edit { draft, .. } = &self.state else {
            return Err(AppError::InvalidState(
                "the draft is already under review".to_string(),
            ));
        };
        if !draft.is_complete() {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        self.pending = Some(DraftAction::Analyze);
        Ok(AnalyzeRequest {
            description: draft.description.clone(),
        })
    }

    /// Moves the draft into review. A failed classification is not an error
    /// for the user: the draft still advances, with `general`/`medium`. If the
    /// text was emptied while the call was out, the draft stays in edit with
    /// the classification retained.
    pub fn complete_analyze(&mut self, result: AppResult<Suggestion>) -> Classification {
        self.pending = None;
        let classification = match result {
            Ok(suggestion) => Classification::from_suggestion(&suggestion),
            Err(err) => {
                tracing::warn!(error = %err, "classification failed, using defaults");
                Classification::default()
            }
        };

        let draft = match mem::take(&mut self.state) {
            DraftState::Edit { draft, .. } | DraftState::Review { draft, .. } => draft,
        };
        self.state = if draft.is_complete() {
            DraftState::Review {
                draft,
                classification,
            }
        } else {
            DraftState::Edit {
                draft,
                retained: Some(classification),
            }
        };
        classification
    }

    pub async fn analyze(&mut self, assistant: &dyn TicketAssistant) -> AppResult<Classification> {
        let request = self.begin_analyze()?;
        let result = assistant.classify(&request.description).await;
        Ok(self.complete_analyze(result))
    }

    /// Leaves review for editing. Nothing is discarded.
    pub fn back(&mut self) -> AppResult<()> {
        match mem::take(&mut self.state) {
            DraftState::Review {
                draft,
                classification,
            } => {
                self.state = DraftState::Edit {
                    draft,
                    retained: Some(classification),
                };
                Ok(())
            }
            edit => {
                self.state = edit;
                Err(AppError::InvalidState("the draft is not under review".to_string()))
            }
        }
    }

    /// Returns to review with the classification kept by `back`, without
    /// asking the classifier again.
    pub fn resume_review(&mut self) -> AppResult<()> {
        self.ensure_idle()?;
        let DraftState::Edit {
            draft,
            retained: Some(classification),
        } = &self.state
        else {
            return Err(AppError::InvalidState(
                "no earlier classification to review".to_string(),
            ));
        };
        if !draft.is_complete() {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let review = DraftState::Review {
            draft: draft.clone(),
            classification: *classification,
        };
        self.state = review;
        Ok(())
    }

    /// Captures the reviewed ticket for submission.
    pub fn begin_submit(&mut self) -> AppResult<NewTicket> {
        self.ensure_idle()?;
        let DraftState::Review {
            draft,
            classification,
        } = &self.state
        else {
            return Err(AppError::InvalidState(
                "analyze the draft before submitting it".to_string(),
            ));
        };
        if !draft.is_complete() {
            return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        self.pending = Some(DraftAction::Submit);
        Ok(NewTicket::from_draft(draft, *classification))
    }

    /// On success the draft is cleared and listeners are told to refresh. On
    /// failure the draft is left exactly as it was so the user can retry.
    pub fn complete_submit(&mut self, result: AppResult<Ticket>) -> AppResult<Ticket> {
        self.pending = None;
        let ticket = result?;
        self.state = DraftState::default();
        self.notifier.notify();
        Ok(ticket)
    }

    pub async fn confirm(&mut self, store: &dyn TicketStore) -> AppResult<Ticket> {
        let new_ticket = self.begin_submit()?;
        let result = store.create_ticket(new_ticket).await;
        self.complete_submit(result)
    }

    fn ensure_idle(&self) -> AppResult<()> {
        match self.pending {
            Some(action) => Err(AppError::InFlight(action.label())),
            None => Ok(()),
        }
    }

    fn edit_draft(&mut self, apply: impl FnOnce(&mut TicketDraft)) -> AppResult<()> {
        match &mut self.state {
            DraftState::Edit { draft, .. } => {
                apply(draft);
                Ok(())
            }
            DraftState::Review { .. } => Err(AppError::InvalidState(
                "go back to edit the title or description".to_string(),
            )),
        }
    }

    fn edit_classification(&mut self, apply: impl FnOnce(&mut Classification)) -> AppResult<()> {
        match &mut self.state {
            DraftState::Review { classification, .. } => {
                apply(classification);
                Ok(())
            }
            DraftState::Edit { .. } => Err(AppError::InvalidState(
                "category and priority are chosen during review".to_string(),
            )),
        }
    }
}
