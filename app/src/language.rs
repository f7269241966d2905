//! FILENAME: app/src/language.rs
//! PURPOSE: UI language selection and string lookup.
//! CONTEXT: Two languages are shipped. The choice is persisted under the
//! `language` key; without one, the OS locale decides.

use serde::{Deserialize, Serialize};

use crate::settings::KEY_LANGUAGE;
use crate::{log_info, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    /// Parse a stored code or a full locale tag ("es", "es-MX", "en_US").
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code
            .trim()
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Language::English),
            "es" => Some(Language::Spanish),
            _ => None,
        }
    }

    /// Language for an OS locale tag: Spanish for `es*`, English otherwise.
    pub fn from_locale(locale: Option<&str>) -> Self {
        match locale.and_then(Language::from_code) {
            Some(Language::Spanish) => Language::Spanish,
            _ => Language::English,
        }
    }

    pub fn detect_system() -> Self {
        Language::from_locale(sys_locale::get_locale().as_deref())
    }
}

// ============================================================================
// STRINGS
// ============================================================================

/// (key, english, spanish)
const STRINGS: &[(&str, &str, &str)] = &[
    ("nav.dashboard", "Dashboard", "Panel"),
    ("nav.sales", "Sales", "Ventas"),
    ("nav.inventory", "Inventory", "Inventario"),
    ("nav.finance", "Finance", "Finanzas"),
    ("nav.pricing", "Pricing", "Precios"),
    ("nav.stores", "Stores", "Tiendas"),
    ("nav.settings", "Settings", "Configuración"),
    ("common.save", "Save", "Guardar"),
    ("common.cancel", "Cancel", "Cancelar"),
    ("common.delete", "Delete", "Eliminar"),
    ("common.loading", "Loading...", "Cargando..."),
    ("common.noData", "No data available", "No hay datos disponibles"),
    ("tour.next", "Next", "Siguiente"),
    ("tour.back", "Back", "Atrás"),
    ("tour.skip", "Skip tour", "Omitir recorrido"),
    ("tour.finish", "Finish", "Finalizar"),
    ("pricing.recommendedPrice", "Recommended price", "Precio recomendado"),
    ("pricing.profitMargin", "Profit margin", "Margen de ganancia"),
    ("pricing.allocatedExpense", "Allocated expense", "Gasto asignado"),
    ("health.excellent", "Excellent", "Excelente"),
    ("health.good", "Good", "Bueno"),
    ("health.fair", "Fair", "Regular"),
    ("health.poor", "Poor", "Deficiente"),
    ("settings.saved", "Settings saved", "Configuración guardada"),
    ("common.ok", "OK", ""),
];

/// Look up `key` in `language`, falling back to English and then to the key.
pub fn translate_in(language: Language, key: &str) -> String {
    let entry = STRINGS.iter().find(|(k, _, _)| *k == key);
    match entry {
        Some((_, en, es)) => {
            let text = match language {
                Language::English => *en,
                Language::Spanish => *es,
            };
            if text.is_empty() {
                en.to_string()
            } else {
                text.to_string()
            }
        }
        None => key.to_string(),
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn get_language(state: &AppState) -> Result<Language, String> {
    let settings = state.settings.lock().map_err(|e| e.to_string())?;
    Ok(settings.language)
}

pub fn set_language(state: &AppState, language: Language) -> Result<Language, String> {
    {
        let mut settings = state.settings.lock().map_err(|e| e.to_string())?;
        settings.language = language;
    }
    state.with_store(|store| store.set(KEY_LANGUAGE, language.code()))?;
    log_info!("SETTINGS", "language set to {}", language.code());
    Ok(language)
}

pub fn translate(state: &AppState, key: &str) -> Result<String, String> {
    Ok(translate_in(get_language(state)?, key))
}
