//! The "Create Event" form: prefilled defaults and the five input fields.

use std::time::Duration;

use serde::Serialize;
use when_engine::ReferenceContext;

use crate::ids::ParentChannel;

/// Options given on the `/event` command before the form opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub title: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub shortname: Option<String>,
    pub parent: Option<ParentChannel>,
}

/// Values the form opens with. The member can edit all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventFormDefaults {
    pub title: String,
    pub shortname: String,
    /// Rendered with [`when_engine::format`] so it parses back unchanged.
    pub date: String,
    pub location: String,
    pub description: String,
}

impl EventFormDefaults {
    /// Prefill from command options. A date option that does not parse
    /// leaves the date field empty.
    pub fn from_options(options: &CommandOptions, ctx: &ReferenceContext) -> Self {
        let date = options
            .date
            .as_deref()
            .and_then(|text| when_engine::parse_standalone(text, ctx));
        if options.date.is_some() && date.is_none() {
            tracing::debug!(date = ?options.date, "date option did not parse; leaving field empty");
        }
        Self {
            title: options.title.clone().unwrap_or_default(),
            shortname: options.shortname.clone().unwrap_or_default(),
            date: when_engine::format(date.as_ref(), ctx),
            location: options.location.clone().unwrap_or_default(),
            description: String::new(),
        }
    }

    /// Prefill from a one-line description such as
    /// `"Team sync tomorrow at 2pm in the lounge"`: the first date phrase
    /// fills the date, the rest becomes the title and suggested channel name.
    pub fn from_prose(text: &str, ctx: &ReferenceContext) -> Self {
        let (title, date) = match when_engine::extract_from_prose(text, ctx) {
            Some(found) => (
                found.residual(text),
                when_engine::format(Some(&found.resolved), ctx),
            ),
            None => (text.split_whitespace().collect::<Vec<_>>().join(" "), String::new()),
        };
        Self {
            shortname: suggest_shortname(&title),
            title,
            date,
            ..Default::default()
        }
    }
}

/// Lowercase `title`, with every run of other characters replaced by one dash.
pub fn suggest_shortname(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStyle {
    Short,
    Paragraph,
}

/// One text input on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub style: FieldStyle,
    pub required: bool,
    pub value: String,
}

pub const FORM_TITLE: &str = "Create Event";

/// A form opened in response to one command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventForm {
    pub custom_id: String,
    pub defaults: EventFormDefaults,
    /// Seconds the form waits for its submission.
    pub timeout_secs: u64,
}

impl EventForm {
    /// `interaction_id` ties the submission back to the command that opened it.
    pub fn new(interaction_id: &str, defaults: EventFormDefaults, timeout: Duration) -> Self {
        Self {
            custom_id: format!("modal:{interaction_id}"),
            defaults,
            timeout_secs: timeout.as_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a submission with `custom_id`, arriving `waited` after the form
    /// opened, answers this one.
    pub fn accepts(&self, custom_id: &str, waited: Duration) -> bool {
        self.custom_id == custom_id && waited <= self.timeout()
    }

    pub fn fields(&self) -> Vec<FormField> {
        let d = &self.defaults;
        vec![
            FormField {
                id: "title",
                label: "Title",
                style: FieldStyle::Short,
                required: true,
                value: d.title.clone(),
            },
            FormField {
                id: "shortname",
                label: "Channel Name",
                style: FieldStyle::Short,
                required: true,
                value: d.shortname.clone(),
            },
            FormField {
                id: "date",
                label: "Date",
                style: FieldStyle::Short,
                required: true,
                value: d.date.clone(),
            },
            FormField {
                id: "location",
                label: "Location",
                style: FieldStyle::Short,
                required: true,
                value: d.location.clone(),
            },
            FormField {
                id: "description",
                label: "Description",
                style: FieldStyle::Paragraph,
                required: false,
                value: d.description.clone(),
            },
        ]
    }
}
