//! The mutable poll draft and its closing-time parsing.

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Vote-weighting kind of a poll. The wire code rides in every poll
/// message, so the discriminants are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollKind {
    /// Votes weighted by the voter account's importance score.
    ProofOfImportance,
    /// Only addresses on the poll's whitelist may vote.
    WhiteList,
    /// Reserved wire code 2: mosaic-gated polls existed in the message
    /// format but were never offered by the creation flow. Kept so the
    /// code stays decodable; no form behavior is attached to it.
    MosaicGated,
}

impl PollKind {
    pub fn code(self) -> u8 {
        match self {
            PollKind::ProofOfImportance => 0,
            PollKind::WhiteList => 1,
            PollKind::MosaicGated => 2,
        }
    }
}

// Exact input shape; the calendar itself is chrono's problem.
static CLOSING_TIME_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9]\d{3}-\d{2}-\d{2}T\d{2}:\d{2}$").unwrap());

/// Parses a closing time. `Some` only for strings shaped exactly
/// `YYYY-MM-DDTHH:MM` that name a real calendar instant; chrono rejects
/// overflowed days of month and non-leap February 29ths.
pub fn parse_closing_time(input: &str) -> Option<DateTime<Utc>> {
    if !CLOSING_TIME_SHAPE.is_match(input) {
        return None;
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

/// An in-progress poll definition. Owned by the form, mutated one field at
/// a time by the view bindings, reset to defaults after every terminal
/// submission outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub title: String,
    /// Raw `YYYY-MM-DDTHH:MM` closing-time input.
    pub closes_at: String,
    pub kind: PollKind,
    /// Whether voters may pick several options.
    pub multiple: bool,
    pub options: Vec<String>,
    pub whitelist: Vec<String>,
    pub description: String,
    /// Only meaningful under the reserved [`PollKind::MosaicGated`] kind.
    pub mosaic: Option<String>,
}

impl Default for PollDraft {
    fn default() -> Self {
        PollDraft {
            title: String::new(),
            closes_at: String::new(),
            kind: PollKind::ProofOfImportance,
            multiple: false,
            options: vec!["yes".to_owned(), "no".to_owned()],
            // The view seeds one blank whitelist row.
            whitelist: vec![String::new()],
            description: String::new(),
            mosaic: None,
        }
    }
}

impl PollDraft {
    pub fn whitelisted(&self) -> bool {
        self.kind == PollKind::WhiteList
    }

    pub fn closing_time(&self) -> Option<DateTime<Utc>> {
        parse_closing_time(&self.closes_at)
    }

    /// Closing time in epoch milliseconds, the unit carried in the poll
    /// messages.
    pub fn closing_timestamp(&self) -> Option<i64> {
        self.closing_time().map(|time| time.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_a_well_formed_closing_time() {
        let parsed = parse_closing_time("2030-06-15T09:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2030, 6, 15, 9, 30, 0).unwrap());
    }

    #[test]
    fn rejects_shape_mismatches() {
        for input in [
            "",
            "2030-6-15T09:30",
            "2030-06-15 09:30",
            "2030-06-15T09:30:00",
            "0999-06-15T09:30",
            "2030-06-15T09:30Z",
        ] {
            assert!(parse_closing_time(input).is_none(), "accepted {input:?}");
        }
    }

    #[test]
    fn rejects_non_calendar_dates() {
        assert!(parse_closing_time("2021-02-30T10:00").is_none());
        assert!(parse_closing_time("2030-04-31T10:00").is_none());
        assert!(parse_closing_time("2030-13-01T10:00").is_none());
        assert!(parse_closing_time("2030-06-15T24:00").is_none());
    }

    #[test]
    fn leap_year_february_29() {
        assert!(parse_closing_time("2024-02-29T10:00").is_some());
        assert!(parse_closing_time("2000-02-29T10:00").is_some());
        assert!(parse_closing_time("2023-02-29T10:00").is_none());
        assert!(parse_closing_time("2100-02-29T10:00").is_none());
    }

    #[test]
    fn default_draft_matches_the_blank_form() {
        let draft = PollDraft::default();
        assert_eq!(draft.options, ["yes", "no"]);
        assert_eq!(draft.whitelist, [""]);
        assert_eq!(draft.kind, PollKind::ProofOfImportance);
        assert!(draft.closing_time().is_none());
        assert!(!draft.whitelisted());
    }
}
