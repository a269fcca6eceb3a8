use std::fmt;

use serde::Deserialize;

/// Web calendar that a generated link targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Google,
    Outlook,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Outlook];

    pub fn label(&self) -> &'static str {
        match self {
            Provider::Google => "Google Calendar",
            Provider::Outlook => "Outlook Calendar",
        }
    }

    /// Caveat shown next to the provider, if any.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            Provider::Google => None,
            Provider::Outlook => Some("Only works with Microsoft personal accounts"),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Provider::Google => 0,
            Provider::Outlook => 1,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Google => f.write_str("google"),
            Provider::Outlook => f.write_str("outlook"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(Provider::Google.next(), Provider::Outlook);
        assert_eq!(Provider::Outlook.next(), Provider::Google);
        assert_eq!(Provider::Google.prev(), Provider::Outlook);
        assert_eq!(Provider::Outlook.prev(), Provider::Google);
    }

    #[test]
    fn display_matches_config_spelling() {
        for provider in Provider::ALL {
            let parsed: Provider = toml::Value::String(provider.to_string())
                .try_into()
                .unwrap();
            assert_eq!(parsed, provider);
        }
    }

    #[test]
    fn only_outlook_carries_a_note() {
        assert!(Provider::Google.note().is_none());
        assert!(Provider::Outlook.note().is_some());
    }
}
