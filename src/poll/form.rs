//! The poll-creation form: owns the draft, recomputes the issue set,
//! previews and fee on every mutation, and drives the submission state
//! machine.

use std::sync::Arc;

use chrono::Utc;
use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::draft::{PollDraft, PollKind};
use super::issues::IssueSet;
use super::messages::MessagePreview;
use crate::error::SubmitError;
use crate::nem::{
    AddressValidator, CredentialResolver, FeeSchedule, MessageFeeSchedule, MessageSizer, Network,
    NetworkAddressValidator, PlainMessageSizer, PrivateKey, WalletAccount, WalletAlgorithm,
};

/// Where the form sits in its submission lifecycle. `Submitting` rejects
/// re-entrant submits; `Done` always returns to `Idle` with the post-state
/// the outcome dictates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    Submitting,
    Done,
}

/// Handle to a freshly created poll, reported back by the submission
/// service once the poll account exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollHandle {
    pub poll_address: String,
}

/// The `formData` block of a poll, as the submission service expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollFormData {
    pub title: String,
    /// Closing time, epoch milliseconds.
    pub doe: i64,
    pub multiple: bool,
    #[serde(rename = "type")]
    pub kind: u8,
    /// Present only for the reserved mosaic-gated kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mosaic: Option<String>,
}

/// Everything the submission service needs to post a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollPayload {
    #[serde(rename = "formData")]
    pub form_data: PollFormData,
    pub options: Vec<String>,
    pub description: String,
    pub whitelist: Vec<String>,
}

/// Posts a poll's messages to the chain. Implementations own account
/// generation, transaction serialization, signing and broadcast; the error
/// string travels verbatim into the user-visible notification.
pub trait PollSubmissionService: Send + Sync {
    fn submit<'a>(
        &'a self,
        payload: PollPayload,
        index_address: &'a str,
        credential: &'a PrivateKey,
    ) -> BoxFuture<'a, Result<PollHandle, String>>;
}

/// The collaborator bundle a poll form runs against.
#[derive(Clone)]
pub struct PollServices {
    pub addresses: Arc<dyn AddressValidator>,
    pub sizer: Arc<dyn MessageSizer>,
    pub fees: Arc<dyn FeeSchedule>,
    pub credentials: Arc<dyn CredentialResolver>,
    pub voting: Arc<dyn PollSubmissionService>,
}

impl PollServices {
    /// Structural validator, UTF-8 sizer and the NIS fee schedule;
    /// cryptography and broadcast still come from the caller.
    pub fn with_defaults(
        network: Network,
        credentials: Arc<dyn CredentialResolver>,
        voting: Arc<dyn PollSubmissionService>,
    ) -> Self {
        PollServices {
            addresses: Arc::new(NetworkAddressValidator::new(network)),
            sizer: Arc::new(PlainMessageSizer),
            fees: Arc::new(MessageFeeSchedule),
            credentials,
            voting,
        }
    }
}

pub struct PollForm {
    network: Network,
    services: PollServices,
    poll_index_address: String,
    draft: PollDraft,
    password: String,
    issues: IssueSet,
    invalid: bool,
    previews: MessagePreview,
    fee: u64,
    phase: SubmitPhase,
}

impl PollForm {
    pub fn new(network: Network, services: PollServices) -> Self {
        let mut form = PollForm {
            network,
            services,
            poll_index_address: network.poll_index_address().to_owned(),
            draft: PollDraft::default(),
            password: String::new(),
            issues: IssueSet::default(),
            invalid: true,
            previews: MessagePreview::default(),
            fee: 0,
            phase: SubmitPhase::Idle,
        };
        form.refresh();
        form
    }

    pub fn draft(&self) -> &PollDraft {
        &self.draft
    }

    pub fn issues(&self) -> &IssueSet {
        &self.issues
    }

    /// Aggregate validity flag the view gates its submit button on.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// Current fee estimate in µXEM.
    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn previews(&self) -> &MessagePreview {
        &self.previews
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn poll_index_address(&self) -> &str {
        &self.poll_index_address
    }

    // Draft mutators. Each one re-validates so the view never reads a
    // stale issue set.

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.refresh();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.refresh();
    }

    pub fn set_closing_time(&mut self, closes_at: impl Into<String>) {
        self.draft.closes_at = closes_at.into();
        self.refresh();
    }

    pub fn set_kind(&mut self, kind: PollKind) {
        self.draft.kind = kind;
        self.refresh();
    }

    pub fn set_multiple(&mut self, multiple: bool) {
        self.draft.multiple = multiple;
        self.refresh();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.refresh();
    }

    pub fn add_option(&mut self) {
        self.draft.options.push(String::new());
        self.refresh();
    }

    pub fn remove_option(&mut self) {
        self.draft.options.pop();
        self.refresh();
    }

    pub fn set_option(&mut self, index: usize, text: impl Into<String>) {
        if let Some(slot) = self.draft.options.get_mut(index) {
            *slot = text.into();
        }
        self.refresh();
    }

    pub fn add_whitelisted(&mut self) {
        self.draft.whitelist.push(String::new());
        self.refresh();
    }

    pub fn remove_whitelisted(&mut self) {
        self.draft.whitelist.pop();
        self.refresh();
    }

    pub fn set_whitelisted(&mut self, index: usize, address: impl Into<String>) {
        if let Some(slot) = self.draft.whitelist.get_mut(index) {
            *slot = address.into();
        }
        self.refresh();
    }

    /// Recomputes previews, issue set, aggregate flag and fee in one pass,
    /// all from the draft as it stands right now.
    pub fn refresh(&mut self) {
        self.previews = MessagePreview::build(&self.draft);
        self.issues = IssueSet::compute(
            &self.draft,
            &self.previews,
            !self.password.is_empty(),
            &self.poll_index_address,
            self.services.addresses.as_ref(),
            self.services.sizer.as_ref(),
            Utc::now(),
        );
        self.invalid = self.issues.is_invalid(self.draft.kind);
        self.fee = self.previews.fee(
            self.draft.kind,
            self.services.sizer.as_ref(),
            self.services.fees.as_ref(),
        );
        debug!("poll draft re-validated: invalid={} fee={}", self.invalid, self.fee);
    }

    fn reset(&mut self) {
        self.draft = PollDraft::default();
        self.password.clear();
        self.phase = SubmitPhase::Idle;
        self.refresh();
    }

    fn abort(&mut self, error: SubmitError) -> SubmitError {
        self.phase = SubmitPhase::Idle;
        error
    }

    /// Validates, checks the balance against the fee, resolves the wallet
    /// credential and hands the poll to the submission service. The draft
    /// does not survive a service outcome: success and service rejection
    /// both reset the form to defaults (inherited wallet behavior).
    pub async fn submit(
        &mut self,
        account: &WalletAccount,
        algorithm: WalletAlgorithm,
        balance: u64,
    ) -> Result<PollHandle, SubmitError> {
        if self.phase == SubmitPhase::Submitting {
            warn!("rejected re-entrant poll submission");
            return Err(SubmitError::SubmissionInFlight);
        }

        self.phase = SubmitPhase::Validating;
        self.refresh();
        if self.invalid {
            return Err(self.abort(SubmitError::InvalidDraft));
        }
        if balance < self.fee {
            return Err(self.abort(SubmitError::InsufficientBalance {
                fee: self.fee,
                balance,
            }));
        }
        let Some(doe) = self.draft.closing_timestamp() else {
            // Unreachable past a clean validation; kept as a guard.
            return Err(self.abort(SubmitError::InvalidDraft));
        };

        let credential = match self
            .services
            .credentials
            .resolve(&self.password, account, algorithm)
        {
            Some(key) => key,
            None => {
                self.password.clear();
                self.refresh();
                return Err(self.abort(SubmitError::InvalidCredential));
            }
        };
        if self.services.credentials.address_of(&credential, self.network) != account.address {
            self.password.clear();
            self.refresh();
            return Err(self.abort(SubmitError::InvalidCredential));
        }

        let payload = PollPayload {
            form_data: PollFormData {
                title: self.draft.title.clone(),
                doe,
                multiple: self.draft.multiple,
                kind: self.draft.kind.code(),
                mosaic: match self.draft.kind {
                    PollKind::MosaicGated => self.draft.mosaic.clone(),
                    _ => None,
                },
            },
            options: self.draft.options.clone(),
            description: self.draft.description.clone(),
            whitelist: self.draft.whitelist.clone(),
        };

        self.phase = SubmitPhase::Submitting;
        info!(
            "submitting poll '{}' to index {} (fee {} µXEM)",
            payload.form_data.title, self.poll_index_address, self.fee
        );
        let outcome = self
            .services
            .voting
            .submit(payload, &self.poll_index_address, &credential)
            .await;
        self.phase = SubmitPhase::Done;
        self.reset();

        match outcome {
            Ok(handle) => {
                info!("poll created at {}", handle.poll_address);
                Ok(handle)
            }
            Err(message) => {
                warn!("poll submission failed: {message}");
                Err(SubmitError::SubmissionFailed(message))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn force_phase(&mut self, phase: SubmitPhase) {
        self.phase = phase;
    }
}
