//! State behind the prompt: the current photo, the ledger and the reasons the
//! assign action is unavailable.

use std::fmt;

use pawpal_core::{
    email, AssignmentLedger, CoreError, DisableAggregator, KeyValueStore, PhotoRecord, Toggle,
};

/// Why assigning is currently refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssignBlock {
    /// No photo has arrived yet.
    NoPhoto,
    /// A replacement photo is being fetched.
    FetchInFlight,
    /// The last fetch failed; the shown photo was already assigned.
    FetchFailed,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for AssignBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoPhoto => "no photo loaded yet",
            Self::FetchInFlight => "next photo still loading",
            Self::FetchFailed => "photo fetch failed, type `next` to retry",
            Self::EmptyEmail => "email is empty",
            Self::InvalidEmail => "email is invalid",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot assign: {}", refusal_reason(.reasons, .warning))]
pub struct AssignRefused {
    /// Every active block, sorted.
    pub reasons: Vec<AssignBlock>,
    /// Email warning, when the address itself is the problem.
    pub warning: Option<String>,
}

fn refusal_reason(reasons: &[AssignBlock], warning: &Option<String>) -> String {
    match warning {
        Some(warning) => warning.clone(),
        None => reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub struct Session {
    ledger: AssignmentLedger,
    assign_control: DisableAggregator<AssignBlock, Toggle>,
    current: Option<PhotoRecord>,
    store: Box<dyn KeyValueStore + Send>,
}

impl Session {
    /// Start a session, loading any assignments persisted in `store`.
    ///
    /// Malformed persisted data is ignored; only store I/O errors fail.
    pub fn new(store: Box<dyn KeyValueStore + Send>) -> Result<Self, CoreError> {
        let mut ledger = AssignmentLedger::new();
        ledger.read_from_store(&*store)?;

        let mut assign_control = DisableAggregator::new(Toggle::new(false));
        assign_control.add_cause(AssignBlock::NoPhoto);

        Ok(Self {
            ledger,
            assign_control,
            current: None,
            store,
        })
    }

    pub fn ledger(&self) -> &AssignmentLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut AssignmentLedger {
        &mut self.ledger
    }

    pub fn current_photo(&self) -> Option<&PhotoRecord> {
        self.current.as_ref()
    }

    pub fn can_assign(&self) -> bool {
        !self.assign_control.is_disabled()
    }

    /// Active blocks in a stable order.
    pub fn blocked_by(&self) -> Vec<AssignBlock> {
        let mut blocks: Vec<AssignBlock> = self.assign_control.causes().copied().collect();
        blocks.sort();
        blocks
    }

    pub fn fetch_in_flight(&self) -> bool {
        self.assign_control.has_cause(&AssignBlock::FetchInFlight)
    }

    /// Mark a fetch as started. Returns false if one is already running.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_in_flight() {
            return false;
        }
        self.assign_control.remove_cause(&AssignBlock::FetchFailed);
        self.assign_control.add_cause(AssignBlock::FetchInFlight);
        true
    }

    /// A fetched photo replaces the current one and unblocks assigning.
    pub fn photo_arrived(&mut self, photo: PhotoRecord) -> &PhotoRecord {
        self.assign_control.remove_cause(&AssignBlock::FetchInFlight);
        self.assign_control.remove_cause(&AssignBlock::FetchFailed);
        self.assign_control.remove_cause(&AssignBlock::NoPhoto);
        self.current.insert(photo)
    }

    /// A failed fetch keeps the previous photo and leaves assigning blocked
    /// until a later fetch succeeds.
    pub fn fetch_failed(&mut self) {
        self.assign_control.remove_cause(&AssignBlock::FetchInFlight);
        self.assign_control.add_cause(AssignBlock::FetchFailed);
    }

    /// Evaluate `email` and update the email blocks. Returns the warning to
    /// show, if any.
    pub fn check_email(&mut self, email: &str) -> Option<String> {
        let warnings = email::check(email);
        self.assign_control
            .set_cause(AssignBlock::EmptyEmail, email.is_empty());
        self.assign_control
            .set_cause(AssignBlock::InvalidEmail, warnings.blocks_submission());
        if warnings.blocks_submission() {
            warnings.warning_message()
        } else {
            None
        }
    }

    /// Assign the current photo to `email` and persist the ledger.
    ///
    /// A failed write is logged; the in-memory assignment stands.
    pub fn assign(&mut self, email: &str) -> Result<(), AssignRefused> {
        let warning = self.check_email(email);
        let photo = match (&self.current, self.can_assign()) {
            (Some(photo), true) => photo.clone(),
            _ => {
                return Err(AssignRefused {
                    reasons: self.blocked_by(),
                    warning,
                })
            }
        };

        self.ledger.assign(email, photo);
        tracing::info!(email, photos = self.ledger.list_assignments(email).len(), "Photo assigned");

        if let Err(e) = self.ledger.write_to_store(&mut *self.store) {
            tracing::error!(error = %e, "Failed to persist assignments");
        }
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("ledger", &self.ledger)
            .field("blocked_by", &self.blocked_by())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
