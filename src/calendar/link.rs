use url::form_urlencoded;

use super::event::ValidatedEvent;
use super::provider::Provider;

pub const GOOGLE_BASE_URL: &str = "https://calendar.google.com/calendar/render";
pub const OUTLOOK_BASE_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

const GOOGLE_TIMESTAMP: &str = "%Y%m%dT%H%M%SZ";
const OUTLOOK_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";

type Query = form_urlencoded::Serializer<'static, String>;

/// A deep link built for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLink {
    pub provider: Provider,
    pub url: String,
}

impl GeneratedLink {
    pub fn build(provider: Provider, event: &ValidatedEvent) -> Self {
        Self {
            provider,
            url: build_url(provider, event),
        }
    }
}

/// Build the "add event" URL for `provider`.
pub fn build_url(provider: Provider, event: &ValidatedEvent) -> String {
    match provider {
        Provider::Google => google_url(event),
        Provider::Outlook => outlook_url(event),
    }
}

fn google_url(event: &ValidatedEvent) -> String {
    let dates = format!(
        "{}/{}",
        event.start().format(GOOGLE_TIMESTAMP),
        event.end().format(GOOGLE_TIMESTAMP)
    );

    let mut query = Query::new(String::new());
    query
        .append_pair("action", "TEMPLATE")
        .append_pair("text", event.title())
        .append_pair("dates", &dates);
    append_optional(&mut query, "details", event.description());
    append_optional(&mut query, "location", event.location());

    format!("{}?{}", GOOGLE_BASE_URL, query.finish())
}

fn outlook_url(event: &ValidatedEvent) -> String {
    let start = event.start().format(OUTLOOK_TIMESTAMP).to_string();
    let end = event.end().format(OUTLOOK_TIMESTAMP).to_string();

    let mut query = Query::new(String::new());
    query
        .append_pair("path", "/calendar/action/compose")
        .append_pair("rru", "addevent")
        .append_pair("startdt", &start)
        .append_pair("enddt", &end)
        .append_pair("subject", event.title());
    append_optional(&mut query, "body", event.description());
    append_optional(&mut query, "location", event.location());

    format!("{}?{}", OUTLOOK_BASE_URL, query.finish())
}

fn append_optional(query: &mut Query, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        query.append_pair(name, value);
    }
}
