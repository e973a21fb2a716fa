use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type FeatureDetailMap = HashMap<String, FeatureDetail>;

pub const MISSING_DETAIL_DESC: &str = "No description available.";

/// Descriptive metadata for a feature, loaded from the external JSON lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureDetail {
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Detail for a feature; a missing entry resolves to a placeholder
/// description and no link, never an error.
pub fn detail_for(details: &FeatureDetailMap, feature: &str) -> FeatureDetail {
    details.get(feature).cloned().unwrap_or(FeatureDetail {
        desc: MISSING_DETAIL_DESC.to_string(),
        link: None,
    })
}

pub fn parse_details(bytes: &[u8]) -> Result<FeatureDetailMap, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::{FeatureDetail, MISSING_DETAIL_DESC, detail_for, parse_details};

    #[test]
    fn parses_the_external_lookup_shape() {
        let payload = r#"{
            "Voiced Consonants": {
                "desc": "Retention of the Middle Chinese voiced obstruent series.",
                "link": "https://en.wikipedia.org/wiki/Voice_(phonetics)"
            },
            "Post-Verb Adv.": {"desc": "Adverbs may follow the verb."}
        }"#;

        let details = parse_details(payload.as_bytes()).expect("payload should parse");
        assert_eq!(details.len(), 2);
        assert_eq!(
            details["Voiced Consonants"].link.as_deref(),
            Some("https://en.wikipedia.org/wiki/Voice_(phonetics)")
        );
        assert!(details["Post-Verb Adv."].link.is_none());
    }

    #[test]
    fn tolerates_entries_with_no_fields() {
        let details = parse_details(br#"{"Reduced Diphthong": {}}"#).expect("should parse");
        assert_eq!(
            details["Reduced Diphthong"],
            FeatureDetail {
                desc: String::new(),
                link: None
            }
        );
    }

    #[test]
    fn missing_entry_resolves_to_placeholder() {
        let details = parse_details(b"{}").expect("empty object should parse");
        let detail = detail_for(&details, "No Audible Release");
        assert_eq!(detail.desc, MISSING_DETAIL_DESC);
        assert!(detail.link.is_none());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_details(b"not json").is_err());
    }
}
