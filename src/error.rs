use thiserror::Error;

/// Terminal outcomes of a poll submission attempt. Validation issues never
/// appear here; those stay in the [`IssueSet`](crate::poll::IssueSet) so
/// the view can show all of them at once.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("poll draft still has validation issues")]
    InvalidDraft,
    #[error("a poll submission is already in flight")]
    SubmissionInFlight,
    #[error("insufficient balance: fee is {fee} µXEM, balance is {balance} µXEM")]
    InsufficientBalance { fee: u64, balance: u64 },
    #[error("wallet password is invalid for this account")]
    InvalidCredential,
    #[error("poll submission failed: {0}")]
    SubmissionFailed(String),
}

/// Failures of the mosaic definition form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MosaicFormError {
    #[error("mosaic name is invalid")]
    InvalidName,
    #[error("mosaic description is too long")]
    DescriptionTooLong,
    #[error("a mosaic definition is already being sent")]
    SendInFlight,
    #[error("wallet password is invalid for this account")]
    InvalidCredential,
    #[error("mosaic definition failed: {0}")]
    SendFailed(String),
}
