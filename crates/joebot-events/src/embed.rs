//! The summary card posted after an event is created.

use serde::Serialize;
use url::Url;

use crate::event::Event;

const GOOGLE_MAPS_SEARCH: &str = "https://www.google.com/maps/search/";
const APPLE_MAPS: &str = "http://maps.apple.com/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEmbed {
    pub title: String,
    pub fields: Vec<EmbedField>,
}

impl EventEmbed {
    pub fn for_event(event: &Event) -> Self {
        let mut fields = vec![
            EmbedField {
                name: "Date".into(),
                value: timestamp_markup(event.start.timestamp()),
                inline: true,
            },
            EmbedField {
                name: "Channel".into(),
                value: event.channel_id.mention(),
                inline: true,
            },
            EmbedField {
                name: "Location".into(),
                value: format!(
                    "{}\n[Google Maps]({}) | [Apple Maps]({})",
                    event.location,
                    google_maps_url(&event.location),
                    apple_maps_url(&event.location),
                ),
                inline: false,
            },
        ];
        if !event.description.trim().is_empty() {
            fields.push(EmbedField {
                name: "Description".into(),
                value: event.description.clone(),
                inline: false,
            });
        }
        Self {
            title: event.title.clone(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&EmbedField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Platform markup that each reader sees in their own timezone.
pub fn timestamp_markup(unix_seconds: i64) -> String {
    format!("<t:{unix_seconds}>")
}

pub fn google_maps_url(location: &str) -> String {
    with_query(GOOGLE_MAPS_SEARCH, &[("api", "1"), ("query", location)])
}

pub fn apple_maps_url(location: &str) -> String {
    with_query(APPLE_MAPS, &[("q", location)])
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.to_string(),
        // Unreachable for the constant bases above.
        Err(_) => base.to_string(),
    }
}
