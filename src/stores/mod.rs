//! Entity stores: one state container per resource.
//!
//! Each store owns a [`StateCell`] whose value lives in a `tokio::sync::watch`
//! channel. Only the store's own confirmed-response handlers write to it;
//! everything else reads a [`StoreState`] snapshot or subscribes for changes.
//! Every operation carries at most one pending [`Notice`], and a newer outcome
//! overwrites an older one.

pub mod assessment_store;
pub mod candidate_store;
pub mod interview_store;
pub mod interviewer_store;

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;
use tracing::warn;

use crate::error::Error;
use crate::models::Identified;

pub use assessment_store::AssessmentStore;
pub use candidate_store::CandidateStore;
pub use interview_store::InterviewStore;
pub use interviewer_store::InterviewerStore;

/// Last operation outcome awaiting acknowledgement by a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Notice {
    #[default]
    None,
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(&self) -> Option<&str> {
        match self {
            Notice::Success(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Notice::Error(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Notice::None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    pub items: Vec<T>,
    /// Single-item slot; `None` means nothing has been loaded.
    pub selected: Option<T>,
    pub loading: bool,
    /// Set while any guarded submission is pending.
    pub submitting: bool,
    pub notice: Notice,
    pub total: Option<u64>,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: false,
            submitting: false,
            notice: Notice::None,
            total: None,
        }
    }
}

/// A failed store operation, reduced to the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Rejection {
    pub message: String,
}

impl From<&Error> for Rejection {
    fn from(err: &Error) -> Self {
        Self {
            message: err.user_message(),
        }
    }
}

impl From<Error> for Rejection {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

pub type StoreResult<T> = std::result::Result<T, Rejection>;

pub struct StateCell<T> {
    tx: watch::Sender<StoreState<T>>,
    pending: Mutex<HashSet<String>>,
}

/// Holds one submission key; dropping it (or the future that owns it)
/// releases the key.
pub(crate) struct SubmitGuard<'a, T> {
    cell: &'a StateCell<T>,
    key: String,
}

impl<T> Drop for SubmitGuard<'_, T> {
    fn drop(&mut self) {
        let mut pending = self
            .cell
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pending.remove(&self.key);
        let idle = pending.is_empty();
        self.cell.tx.send_modify(|state| {
            state.submitting = !idle;
            if idle {
                state.loading = false;
            }
        });
    }
}

impl<T> Default for StateCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StateCell<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StoreState::default());
        Self {
            tx,
            pending: Mutex::new(HashSet::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<T>> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> StoreState<T>
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    pub fn clear_notice(&self) {
        self.tx.send_if_modified(|state| {
            let changed = !state.notice.is_none();
            state.notice = Notice::None;
            changed
        });
    }

    pub fn clear_success(&self) {
        self.tx.send_if_modified(|state| {
            if matches!(state.notice, Notice::Success(_)) {
                state.notice = Notice::None;
                true
            } else {
                false
            }
        });
    }

    pub fn clear_error(&self) {
        self.tx.send_if_modified(|state| {
            if matches!(state.notice, Notice::Error(_)) {
                state.notice = Notice::None;
                true
            } else {
                false
            }
        });
    }

    pub fn reset_selected(&self) {
        self.tx.send_if_modified(|state| state.selected.take().is_some());
    }

    pub(crate) fn begin(&self) {
        self.tx.send_modify(|state| state.loading = true);
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Claims the submission slot for `key`; `None` if that key is already pending.
    pub(crate) fn try_begin_submit(&self, key: &str) -> Option<SubmitGuard<'_, T>> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.insert(key.to_string()) {
            return None;
        }
        self.tx.send_modify(|state| {
            state.submitting = true;
            state.loading = true;
        });
        Some(SubmitGuard {
            cell: self,
            key: key.to_string(),
        })
    }

    /// Applies a confirmed read. A successful fetch clears a stale error.
    pub(crate) fn fetched(&self, apply: impl FnOnce(&mut StoreState<T>)) {
        self.tx.send_modify(|state| {
            state.loading = false;
            if matches!(state.notice, Notice::Error(_)) {
                state.notice = Notice::None;
            }
            apply(state);
        });
    }

    /// Applies a confirmed mutation and records its success message.
    pub(crate) fn confirmed(
        &self,
        message: Option<String>,
        default_message: &str,
        apply: impl FnOnce(&mut StoreState<T>),
    ) -> String {
        let text = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message.to_string());
        self.tx.send_modify(|state| {
            state.loading = false;
            state.notice = Notice::Success(text.clone());
            apply(state);
        });
        text
    }

    /// Records a failure without touching the collection.
    pub(crate) fn rejected(&self, operation: &str, err: Error) -> Rejection {
        let rejection = Rejection::from(&err);
        warn!(operation, error = %err, "Store operation failed");
        self.tx.send_modify(|state| {
            state.loading = false;
            state.notice = Notice::Error(rejection.message.clone());
        });
        rejection
    }
}

pub(crate) fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &T::Id) {
    items.retain(|item| item.id() != id);
}

pub(crate) fn upsert<T: Identified>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}
