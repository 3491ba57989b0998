//! Form engines for a NEM wallet: decentralized poll creation and mosaic
//! definition.
//!
//! Both forms are UI glue over SDK-backed services. They own the mutable
//! draft, re-validate it on every mutation and expose the complete issue
//! set plus a fee estimate; cryptography, transaction serialization and
//! broadcast stay behind the collaborator traits in [`nem`].
//!
//! A poll draft is measured by rebuilding the five plaintext messages its
//! submission will post to the chain (form data, description, options,
//! whitelist, poll header) and pricing each one through the message fee
//! schedule. The previews are never transmitted; the submission service
//! rebuilds the real ones with the accounts it generates.

pub mod error;
pub mod mosaic;
pub mod nem;
pub mod poll;

pub use error::{MosaicFormError, SubmitError};
pub use nem::Network;
pub use poll::{IssueSet, MessagePreview, PollDraft, PollForm, PollKind, PollServices};
