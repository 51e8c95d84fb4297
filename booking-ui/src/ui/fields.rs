use booking::wizard::BookingDraft;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unparsable text yields `None`, which leaves the date unset.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Text the user is editing, kept next to the draft because a half-typed
/// date has no draft value yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuffers {
    pub first_name: String,
    pub last_name: String,
    pub start_date: String,
    pub end_date: String,
}

impl FormBuffers {
    /// Pulls the draft into the buffers after the controller has applied
    /// this frame's actions, so a reset clears the form.
    pub fn sync(&mut self, draft: &BookingDraft) {
        if self.first_name != draft.first_name {
            self.first_name.clone_from(&draft.first_name);
        }
        if self.last_name != draft.last_name {
            self.last_name.clone_from(&draft.last_name);
        }
        sync_date(&mut self.start_date, draft.start_date);
        sync_date(&mut self.end_date, draft.end_date);
    }
}

fn sync_date(buffer: &mut String, value: Option<NaiveDate>) {
    match (parse_date(buffer), value) {
        (parsed, Some(date)) if parsed != Some(date) => {
            *buffer = date.format(DATE_FORMAT).to_string();
        }
        // Draft was cleared; partial text is left alone
        (Some(_), None) => buffer.clear(),
        _ => {}
    }
}
