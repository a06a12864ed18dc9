// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::DEFAULT_LANG;

// Extrator de idioma: "pt-BR,pt;q=0.9" -> "pt"
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_header(
            parts
                .headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok()),
        ))
    }
}

impl Locale {
    pub fn from_header(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|header_str| {
                accept_language::parse(header_str).first().map(|tag| {
                    // "pt-BR" -> "pt", "en" -> "en"
                    tag.split('-').next().unwrap_or(tag).to_lowercase()
                })
            })
            .map(Locale)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_primary_language_of_first_tag() {
        assert_eq!(Locale::from_header(Some("pt-BR,pt;q=0.9,en;q=0.8")).0, "pt");
    }

    #[test]
    fn missing_header_uses_default() {
        assert_eq!(Locale::from_header(None).0, DEFAULT_LANG);
    }
}
