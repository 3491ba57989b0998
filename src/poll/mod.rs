//! Poll creation: draft, validation, preview messages, fee estimation and
//! the submission state machine.

pub mod draft;
pub mod form;
pub mod issues;
pub mod messages;

pub use draft::{PollDraft, PollKind, parse_closing_time};
pub use form::{
    PollForm, PollFormData, PollHandle, PollPayload, PollServices, PollSubmissionService,
    SubmitPhase,
};
pub use issues::IssueSet;
pub use messages::{MAX_MESSAGE_BYTES, MAX_TITLE_BYTES, MessagePreview};
