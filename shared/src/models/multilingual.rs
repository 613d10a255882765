//! Multilingual text

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text in the three languages the clients render (en / es / pt)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multilingual {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub es: String,
    #[serde(default)]
    pub pt: String,
}

impl Multilingual {
    /// English-only text
    pub fn en(text: impl Into<String>) -> Self {
        Self {
            en: text.into(),
            ..Default::default()
        }
    }
}

/// Localized text as stored: either a plain string or a language map
///
/// Older documents store plain strings, newer ones `{en, es, pt}` maps with
/// any subset of keys. Anything else is kept as-is and rendered empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Text(String),
    Map(HashMap<String, Option<String>>),
    Other(serde_json::Value),
}

impl From<Multilingual> for LocalizedText {
    fn from(m: Multilingual) -> Self {
        LocalizedText::Map(HashMap::from([
            ("en".to_string(), Some(m.en)),
            ("es".to_string(), Some(m.es)),
            ("pt".to_string(), Some(m.pt)),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_text_shapes() {
        let t: LocalizedText = serde_json::from_str(r#""Coffee""#).unwrap();
        assert_eq!(t, LocalizedText::Text("Coffee".into()));

        let t: LocalizedText = serde_json::from_str(r#"{"en":"Coffee","es":null}"#).unwrap();
        assert!(matches!(t, LocalizedText::Map(ref m) if m.len() == 2));

        let t: LocalizedText = serde_json::from_str("42").unwrap();
        assert!(matches!(t, LocalizedText::Other(_)));
    }

    #[test]
    fn test_multilingual_missing_keys() {
        let m: Multilingual = serde_json::from_str(r#"{"en":"Tea"}"#).unwrap();
        assert_eq!(m, Multilingual::en("Tea"));
    }
}
