//! The mosaic-definition form: name and description rules, the live
//! character counter, and the guarded prepare/send flow. Transaction
//! preparation itself (fee computation included) belongs to the SDK-backed
//! [`MosaicDefinitionService`].

use std::sync::Arc;

use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::MosaicFormError;
use crate::nem::{CredentialResolver, Network, PrivateKey, WalletAccount, WalletAlgorithm};

/// NIS limit on a mosaic description.
pub const MAX_DESCRIPTION_CHARS: usize = 512;
/// NIS limit on a mosaic name.
pub const MAX_NAME_CHARS: usize = 32;

static NAME_CHARSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9\-_]*$").unwrap());

/// NIS mosaic-name rules: lower case, at most 32 characters drawn from
/// `[a-z0-9-_]`, not starting with a hyphen or underscore.
pub fn name_is_valid(name: &str) -> bool {
    name.len() <= MAX_NAME_CHARS
        && !name.starts_with(['-', '_'])
        && NAME_CHARSET.is_match(name)
}

pub fn description_is_valid(description: &str) -> bool {
    description.chars().count() <= MAX_DESCRIPTION_CHARS
}

/// An in-progress mosaic definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MosaicDefinitionDraft {
    #[serde(rename = "namespaceParent")]
    pub namespace_parent: String,
    #[serde(rename = "mosaicName")]
    pub mosaic_name: String,
    pub description: String,
    #[serde(rename = "initialSupply")]
    pub initial_supply: u64,
    pub divisibility: u8,
    #[serde(rename = "supplyMutable")]
    pub supply_mutable: bool,
    pub transferable: bool,
}

impl Default for MosaicDefinitionDraft {
    fn default() -> Self {
        MosaicDefinitionDraft {
            namespace_parent: String::new(),
            mosaic_name: String::new(),
            description: String::new(),
            initial_supply: 0,
            divisibility: 0,
            supply_mutable: true,
            transferable: true,
        }
    }
}

/// What the SDK reports for an unsigned, prepared definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedMosaicDefinition {
    /// Transaction fee in µXEM.
    pub fee: u64,
    /// Description length as it will ride on the wire.
    pub description_length: usize,
}

/// Builds and broadcasts mosaic-definition transactions.
pub trait MosaicDefinitionService: Send + Sync {
    /// Builds the unsigned transaction for fee display. Must not sign.
    fn prepare(&self, draft: &MosaicDefinitionDraft, network: Network) -> PreparedMosaicDefinition;

    /// Serializes, signs and broadcasts the definition.
    fn send<'a>(
        &'a self,
        draft: &'a MosaicDefinitionDraft,
        credential: &'a PrivateKey,
        network: Network,
    ) -> BoxFuture<'a, Result<(), String>>;
}

pub struct MosaicDefinitionForm {
    network: Network,
    service: Arc<dyn MosaicDefinitionService>,
    credentials: Arc<dyn CredentialResolver>,
    draft: MosaicDefinitionDraft,
    password: String,
    fee: u64,
    chars_left: usize,
    sending: bool,
}

impl MosaicDefinitionForm {
    pub fn new(
        network: Network,
        service: Arc<dyn MosaicDefinitionService>,
        credentials: Arc<dyn CredentialResolver>,
    ) -> Self {
        let mut form = MosaicDefinitionForm {
            network,
            service,
            credentials,
            draft: MosaicDefinitionDraft::default(),
            password: String::new(),
            fee: 0,
            chars_left: MAX_DESCRIPTION_CHARS,
            sending: false,
        };
        form.prepare();
        form
    }

    pub fn draft(&self) -> &MosaicDefinitionDraft {
        &self.draft
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// Description characters still available, for the counter next to the
    /// input field.
    pub fn chars_left(&self) -> usize {
        self.chars_left
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Lower-cases and stores the name, then re-prepares. The lowered name
    /// stays in the draft even when rejected, matching the input binding.
    pub fn set_name(&mut self, name: &str) -> Result<(), MosaicFormError> {
        self.draft.mosaic_name = name.to_lowercase();
        if !name_is_valid(&self.draft.mosaic_name) {
            return Err(MosaicFormError::InvalidName);
        }
        self.prepare();
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) -> Result<(), MosaicFormError> {
        if !description_is_valid(description) {
            return Err(MosaicFormError::DescriptionTooLong);
        }
        self.draft.description = description.to_owned();
        self.prepare();
        Ok(())
    }

    pub fn set_namespace_parent(&mut self, namespace: impl Into<String>) {
        self.draft.namespace_parent = namespace.into();
        self.prepare();
    }

    pub fn set_initial_supply(&mut self, supply: u64) {
        self.draft.initial_supply = supply;
        self.prepare();
    }

    pub fn set_divisibility(&mut self, divisibility: u8) {
        self.draft.divisibility = divisibility;
        self.prepare();
    }

    pub fn set_supply_mutable(&mut self, mutable: bool) {
        self.draft.supply_mutable = mutable;
        self.prepare();
    }

    pub fn set_transferable(&mut self, transferable: bool) {
        self.draft.transferable = transferable;
        self.prepare();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Re-prepares the unsigned transaction to refresh the displayed fee
    /// and the character counter.
    fn prepare(&mut self) {
        let prepared = self.service.prepare(&self.draft, self.network);
        self.fee = prepared.fee;
        self.chars_left = MAX_DESCRIPTION_CHARS.saturating_sub(prepared.description_length);
    }

    fn reset(&mut self) {
        self.draft = MosaicDefinitionDraft::default();
        self.password.clear();
        self.prepare();
    }

    /// Resolves the credential and broadcasts the definition. Success
    /// resets the form; a broadcast failure keeps the draft but drops the
    /// credential.
    pub async fn send(
        &mut self,
        account: &WalletAccount,
        algorithm: WalletAlgorithm,
    ) -> Result<(), MosaicFormError> {
        if self.sending {
            return Err(MosaicFormError::SendInFlight);
        }
        self.sending = true;

        let Some(credential) = self
            .credentials
            .resolve(&self.password, account, algorithm)
        else {
            self.password.clear();
            self.sending = false;
            return Err(MosaicFormError::InvalidCredential);
        };
        if self.credentials.address_of(&credential, self.network) != account.address {
            self.password.clear();
            self.sending = false;
            return Err(MosaicFormError::InvalidCredential);
        }

        info!(
            "sending mosaic definition {}:{} (fee {} µXEM)",
            self.draft.namespace_parent, self.draft.mosaic_name, self.fee
        );
        let outcome = self.service.send(&self.draft, &credential, self.network).await;
        self.sending = false;

        match outcome {
            Ok(()) => {
                self.reset();
                Ok(())
            }
            Err(message) => {
                warn!("mosaic definition failed: {message}");
                self.password.clear();
                Err(MosaicFormError::SendFailed(message))
            }
        }
    }
}
