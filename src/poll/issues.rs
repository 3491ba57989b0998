//! The issue set: every validation failure of a draft, computed in one
//! pass so the view can surface all of them simultaneously.

use chrono::{DateTime, Utc};

use super::draft::{PollDraft, PollKind};
use super::messages::{MAX_MESSAGE_BYTES, MAX_TITLE_BYTES, MessagePreview};
use crate::nem::{AddressValidator, MessageSizer};

/// Result of one validation pass. Recomputed wholesale on every call;
/// never patched in place, so it can never be partially stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IssueSet {
    pub blank_title: bool,
    /// Closing time fails the `YYYY-MM-DDTHH:MM` shape or names no real
    /// calendar instant.
    pub invalid_date: bool,
    /// Closing time parses but is not strictly in the future.
    pub past_date: bool,
    /// One flag per option, `true` where the option is blank.
    pub blank_options: Vec<bool>,
    /// One flag per whitelist entry; empty unless the poll is whitelisted.
    pub invalid_addresses: Vec<bool>,
    pub no_options: bool,
    pub no_whitelist: bool,
    pub missing_credential: bool,
    pub invalid_index_address: bool,
    /// Form-data message over 1024 bytes or bare title over 420.
    pub title_too_long: bool,
    pub description_too_long: bool,
    pub options_too_long: bool,
    pub whitelist_too_long: bool,
    pub poll_too_long: bool,
}

impl IssueSet {
    /// Runs every check independently; a failing check never short-circuits
    /// the rest.
    pub fn compute(
        draft: &PollDraft,
        preview: &MessagePreview,
        has_credential: bool,
        index_address: &str,
        addresses: &dyn AddressValidator,
        sizer: &dyn MessageSizer,
        now: DateTime<Utc>,
    ) -> IssueSet {
        let closing = draft.closing_time();
        IssueSet {
            blank_title: draft.title.is_empty(),
            invalid_date: closing.is_none(),
            past_date: closing.is_some_and(|time| time <= now),
            blank_options: draft.options.iter().map(|opt| opt.is_empty()).collect(),
            invalid_addresses: if draft.whitelisted() {
                draft
                    .whitelist
                    .iter()
                    .map(|addr| !addresses.is_valid(addr))
                    .collect()
            } else {
                Vec::new()
            },
            no_options: draft.options.is_empty(),
            no_whitelist: draft.whitelisted() && draft.whitelist.is_empty(),
            missing_credential: !has_credential,
            invalid_index_address: !addresses.is_valid(index_address),
            title_too_long: sizer.byte_length(&preview.form_data) > MAX_MESSAGE_BYTES
                || sizer.byte_length(&draft.title) > MAX_TITLE_BYTES,
            description_too_long: sizer.byte_length(&preview.description) > MAX_MESSAGE_BYTES,
            options_too_long: sizer.byte_length(&preview.options) > MAX_MESSAGE_BYTES,
            whitelist_too_long: sizer.byte_length(&preview.whitelist) > MAX_MESSAGE_BYTES,
            poll_too_long: sizer.byte_length(&preview.poll) > MAX_MESSAGE_BYTES,
        }
    }

    /// Aggregate validity: the OR of every flag, with whitelist issues
    /// counted only for whitelisted polls.
    pub fn is_invalid(&self, kind: PollKind) -> bool {
        let whitelist_issues = kind == PollKind::WhiteList
            && (self.no_whitelist
                || self.whitelist_too_long
                || self.invalid_addresses.iter().any(|&bad| bad));
        self.blank_title
            || self.invalid_date
            || self.past_date
            || self.blank_options.iter().any(|&blank| blank)
            || self.no_options
            || self.missing_credential
            || self.invalid_index_address
            || self.title_too_long
            || self.description_too_long
            || self.options_too_long
            || self.poll_too_long
            || whitelist_issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nem::{NetworkAddressValidator, Network, PlainMessageSizer};
    use chrono::TimeZone;

    fn check(draft: &PollDraft, has_credential: bool) -> IssueSet {
        let preview = MessagePreview::build(draft);
        IssueSet::compute(
            draft,
            &preview,
            has_credential,
            Network::Testnet.poll_index_address(),
            &NetworkAddressValidator::new(Network::Testnet),
            &PlainMessageSizer,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn valid_draft() -> PollDraft {
        PollDraft {
            title: "Best color?".to_owned(),
            closes_at: "2030-06-15T09:30".to_owned(),
            options: vec!["Red".to_owned(), "Blue".to_owned()],
            ..PollDraft::default()
        }
    }

    #[test]
    fn a_complete_draft_has_no_issues() {
        let issues = check(&valid_draft(), true);
        assert_eq!(issues, IssueSet {
            blank_options: vec![false, false],
            ..IssueSet::default()
        });
        assert!(!issues.is_invalid(PollKind::ProofOfImportance));
    }

    #[test]
    fn blank_title_is_flagged() {
        let mut draft = valid_draft();
        draft.title.clear();
        let issues = check(&draft, true);
        assert!(issues.blank_title);
        assert!(issues.is_invalid(draft.kind));
    }

    #[test]
    fn invalid_and_past_dates_are_distinct_flags() {
        let mut draft = valid_draft();
        draft.closes_at = "2021-02-30T10:00".to_owned();
        let issues = check(&draft, true);
        assert!(issues.invalid_date);
        assert!(!issues.past_date);

        draft.closes_at = "2020-01-01T00:00".to_owned();
        let issues = check(&draft, true);
        assert!(!issues.invalid_date);
        assert!(issues.past_date);
        assert!(issues.is_invalid(draft.kind));
    }

    #[test]
    fn closing_exactly_now_counts_as_past() {
        let mut draft = valid_draft();
        draft.closes_at = "2026-01-01T00:00".to_owned();
        let issues = check(&draft, true);
        assert!(issues.past_date);
    }

    #[test]
    fn blank_options_map_per_element() {
        let mut draft = valid_draft();
        draft.options = vec![String::new(), "yes".to_owned()];
        let issues = check(&draft, true);
        assert_eq!(issues.blank_options, [true, false]);
        assert!(issues.is_invalid(draft.kind));
    }

    #[test]
    fn no_options_is_flagged() {
        let mut draft = valid_draft();
        draft.options.clear();
        let issues = check(&draft, true);
        assert!(issues.no_options);
        assert!(issues.is_invalid(draft.kind));
    }

    #[test]
    fn whitelist_addresses_only_checked_when_whitelisted() {
        let mut draft = valid_draft();
        draft.whitelist = vec!["not-an-address".to_owned()];

        let issues = check(&draft, true);
        assert!(issues.invalid_addresses.is_empty());
        assert!(!issues.is_invalid(PollKind::ProofOfImportance));

        draft.kind = PollKind::WhiteList;
        let issues = check(&draft, true);
        assert_eq!(issues.invalid_addresses, [true]);
        assert!(issues.is_invalid(PollKind::WhiteList));
    }

    #[test]
    fn empty_whitelist_only_flagged_when_whitelisted() {
        let mut draft = valid_draft();
        draft.whitelist.clear();
        assert!(!check(&draft, true).no_whitelist);

        draft.kind = PollKind::WhiteList;
        let issues = check(&draft, true);
        assert!(issues.no_whitelist);
        assert!(issues.is_invalid(PollKind::WhiteList));
    }

    #[test]
    fn missing_credential_is_flagged() {
        let issues = check(&valid_draft(), false);
        assert!(issues.missing_credential);
        assert!(issues.is_invalid(PollKind::ProofOfImportance));
    }

    #[test]
    fn oversized_title_is_flagged() {
        let mut draft = valid_draft();
        draft.title = "x".repeat(421);
        let issues = check(&draft, true);
        assert!(issues.title_too_long);
        assert!(issues.is_invalid(draft.kind));
    }

    #[test]
    fn oversized_description_message_is_flagged() {
        let mut draft = valid_draft();
        draft.description = "d".repeat(1024);
        let issues = check(&draft, true);
        assert!(issues.description_too_long);
        assert!(issues.is_invalid(draft.kind));
    }

    #[test]
    fn oversized_whitelist_only_counts_when_whitelisted() {
        let mut draft = valid_draft();
        let address = Network::Testnet.poll_index_address().to_owned();
        draft.whitelist = vec![address; 30];
        let issues = check(&draft, true);
        assert!(issues.whitelist_too_long);
        assert!(!issues.is_invalid(PollKind::ProofOfImportance));
        assert!(issues.is_invalid(PollKind::WhiteList));
    }
}
