//! Preview messages: the five plaintext messages a poll creation posts to
//! the chain, rebuilt from the draft purely to measure their wire size and
//! fee. The per-option accounts are only generated during submission, so a
//! fixed mock address stands in for every generated one.

use serde::Serialize;
use serde_json::{Map, Value};

use super::draft::{PollDraft, PollKind};
use crate::nem::{FeeSchedule, MOCK_ADDRESS, MessageSizer, address};

/// NIS limit on a plain transfer-message payload.
pub const MAX_MESSAGE_BYTES: usize = 1024;
/// Additional budget for the bare title inside the form-data message.
pub const MAX_TITLE_BYTES: usize = 420;

/// The five tagged preview strings. A pure function of the draft: two
/// builds of an unmodified draft are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagePreview {
    pub form_data: String,
    pub description: String,
    pub options: String,
    pub whitelist: String,
    pub poll: String,
}

// Field order matters: the byte ceilings were calibrated against the
// original wallet's serialization, so the previews reproduce it.
#[derive(Serialize)]
struct FormDataBody<'a> {
    title: &'a str,
    doe: Option<i64>,
    multiple: bool,
    #[serde(rename = "type")]
    kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    mosaic: Option<&'a str>,
}

#[derive(Serialize)]
struct OptionsBody<'a> {
    strings: &'a [String],
    addresses: Vec<&'a str>,
    link: Map<String, Value>,
}

#[derive(Serialize)]
struct PollHeaderBody<'a> {
    title: &'a str,
    #[serde(rename = "type")]
    kind: u8,
    doe: Option<i64>,
    address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    whitelist: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mosaic: Option<&'a str>,
}

impl MessagePreview {
    pub fn build(draft: &PollDraft) -> MessagePreview {
        let doe = draft.closing_timestamp();
        let gated_mosaic = match draft.kind {
            PollKind::MosaicGated => draft.mosaic.as_deref(),
            _ => None,
        };

        let form_data = FormDataBody {
            title: &draft.title,
            doe,
            multiple: draft.multiple,
            kind: draft.kind.code(),
            mosaic: gated_mosaic,
        };

        let mut link = Map::new();
        for option in &draft.options {
            link.insert(option.clone(), Value::from(MOCK_ADDRESS));
        }
        let options = OptionsBody {
            strings: &draft.options,
            addresses: draft.options.iter().map(|_| MOCK_ADDRESS).collect(),
            link,
        };

        let whitelist: Vec<String> = draft
            .whitelist
            .iter()
            .map(|addr| address::normalize(addr))
            .collect();

        let header = PollHeaderBody {
            title: &draft.title,
            kind: draft.kind.code(),
            doe,
            address: MOCK_ADDRESS,
            whitelist: match draft.kind {
                PollKind::WhiteList => Some(draft.whitelist.as_slice()),
                _ => None,
            },
            mosaic: gated_mosaic,
        };

        MessagePreview {
            form_data: format!("formData:{}", json(&form_data)),
            description: format!("description:{}", draft.description),
            options: format!("options:{}", json(&options)),
            whitelist: format!("whitelist:{}", json(&whitelist)),
            poll: format!("poll:{}", json(&header)),
        }
    }

    /// Total fee of the messages the submission will actually post: the
    /// whitelist message only rides along for whitelisted polls.
    pub fn fee(&self, kind: PollKind, sizer: &dyn MessageSizer, fees: &dyn FeeSchedule) -> u64 {
        let mut total = 0;
        total += fees.fee_for(sizer.byte_length(&self.form_data));
        total += fees.fee_for(sizer.byte_length(&self.description));
        total += fees.fee_for(sizer.byte_length(&self.options));
        total += fees.fee_for(sizer.byte_length(&self.poll));
        if kind == PollKind::WhiteList {
            total += fees.fee_for(sizer.byte_length(&self.whitelist));
        }
        total
    }
}

fn json<T: Serialize>(body: &T) -> String {
    // Plain structs of strings and integers; serialization cannot fail.
    serde_json::to_string(body).expect("preview serialization")
}
