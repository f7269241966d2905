//! FILENAME: app/src/theme.rs
// PURPOSE: Light/dark theme preference, persisted under the `theme` key.

use serde::{Deserialize, Serialize};

use crate::settings::KEY_THEME;
use crate::{log_info, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

pub fn get_theme(state: &AppState) -> Result<Theme, String> {
    let settings = state.settings.lock().map_err(|e| e.to_string())?;
    Ok(settings.theme)
}

pub fn set_theme(state: &AppState, theme: Theme) -> Result<Theme, String> {
    {
        let mut settings = state.settings.lock().map_err(|e| e.to_string())?;
        settings.theme = theme;
    }
    state.with_store(|store| store.set(KEY_THEME, theme.as_str()))?;
    log_info!("SETTINGS", "theme set to {}", theme.as_str());
    Ok(theme)
}

pub fn toggle_theme(state: &AppState) -> Result<Theme, String> {
    let next = get_theme(state)?.toggled();
    set_theme(state, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!(Theme::parse(" Dark "), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}
