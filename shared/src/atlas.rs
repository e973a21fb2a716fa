use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ProvinceSet = BTreeSet<String>;
pub type LanguageSet = BTreeSet<String>;
pub type LanguageMap = HashMap<String, Language>;
pub type FeatureMap = HashMap<String, LanguageSet>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub provinces: ProvinceSet,
    /// Speaker population in millions.
    pub population: u64,
}

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("feature {feature:?} references unknown language code {code:?}")]
    UnknownLanguage { feature: String, code: String },
}

/// Validated language/feature tables plus the derived province universe.
/// Built once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Atlas {
    languages: LanguageMap,
    features: FeatureMap,
    all_provinces: ProvinceSet,
}

impl Atlas {
    /// Every language code a feature references must exist in the language
    /// table; a mismatch is a configuration error, not a runtime condition.
    pub fn new(languages: LanguageMap, features: FeatureMap) -> Result<Self, AtlasError> {
        for (feature, codes) in &features {
            for code in codes {
                if !languages.contains_key(code) {
                    return Err(AtlasError::UnknownLanguage {
                        feature: feature.clone(),
                        code: code.clone(),
                    });
                }
            }
        }
        let all_provinces = languages
            .values()
            .flat_map(|language| language.provinces.iter().cloned())
            .collect();
        Ok(Self {
            languages,
            features,
            all_provinces,
        })
    }

    pub fn languages(&self) -> &LanguageMap {
        &self.languages
    }

    pub fn features(&self) -> &FeatureMap {
        &self.features
    }

    pub fn all_provinces(&self) -> &ProvinceSet {
        &self.all_provinces
    }

    pub fn language(&self, code: &str) -> Option<&Language> {
        self.languages.get(code)
    }

    pub fn feature_languages(&self, feature: &str) -> Option<&LanguageSet> {
        self.features.get(feature)
    }

    /// Display name for a code, falling back to the code itself.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.languages
            .get(code)
            .map(|language| language.name.as_str())
            .unwrap_or(code)
    }

    /// Language codes in stable sidebar order.
    pub fn sorted_language_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.languages.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Feature names in stable sidebar order.
    pub fn sorted_feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.features.keys().cloned().collect();
        names.sort();
        names
    }

    /// The eight Chinese topolect groups and seven areal features modeled by
    /// the viewer. Population estimates are in millions, after the Language
    /// Atlas of China (2nd ed., 2012).
    pub fn builtin() -> Self {
        let languages = builtin_languages();
        let features = builtin_features();
        let all_provinces = languages
            .values()
            .flat_map(|language| language.provinces.iter().cloned())
            .collect();
        Self {
            languages,
            features,
            all_provinces,
        }
    }
}

fn language(name: &str, population: u64, provinces: &[&str]) -> Language {
    Language {
        name: name.to_string(),
        provinces: provinces.iter().map(|p| p.to_string()).collect(),
        population,
    }
}

fn builtin_languages() -> LanguageMap {
    HashMap::from([
        (
            "CMN".to_string(),
            language(
                "Mandarin (官話)",
                990,
                &[
                    "Beijing",
                    "Hebei",
                    "Tianjin",
                    "Liaoning",
                    "Jilin",
                    "Heilongjiang",
                    "Shandong",
                    "Henan",
                    "Ningxia",
                    "Gansu",
                    "Xinjiang",
                    "Sichuan",
                    "Chongqing",
                    "Guizhou",
                    "Hubei",
                    "Jiangsu",
                    "Guangxi",
                    "Shaanxi",
                    "Anhui",
                ],
            ),
        ),
        (
            "WUU".to_string(),
            language(
                "Wu (吳語)",
                80,
                &["Shanghai", "Jiangsu", "Zhejiang", "Anhui", "Yunnan"],
            ),
        ),
        (
            "GAN".to_string(),
            language("Gan (贛語)", 23, &["Jiangxi", "Anhui"]),
        ),
        (
            "MIN".to_string(),
            language("Min (閩語)", 75, &["Fujian", "Guangdong", "Hainan"]),
        ),
        (
            "YUE".to_string(),
            language("Yue (Cantonese, 粵語)", 85, &["Guangdong", "Guangxi"]),
        ),
        (
            "HSN".to_string(),
            language("Xiang (湘語)", 38, &["Hunan"]),
        ),
        (
            "HAK".to_string(),
            language(
                "Hakka (客家話)",
                47,
                &["Guangdong", "Guangxi", "Fujian", "Jiangxi"],
            ),
        ),
        (
            "CJY".to_string(),
            language("Jin (晉語)", 48, &["Shanxi"]),
        ),
    ])
}

fn feature(codes: &[&str]) -> LanguageSet {
    codes.iter().map(|c| c.to_string()).collect()
}

fn builtin_features() -> FeatureMap {
    HashMap::from([
        (
            "No Audible Release".to_string(),
            feature(&["WUU", "YUE", "GAN", "MIN", "HAK"]),
        ),
        (
            "Voiced Consonants".to_string(),
            feature(&["MIN", "WUU", "HSN"]),
        ),
        (
            "Literary and colloquial readings".to_string(),
            feature(&["WUU", "YUE", "GAN", "MIN", "HSN", "HAK", "CJY"]),
        ),
        ("Reduced Diphthong".to_string(), feature(&["WUU"])),
        (
            "No-Palatalization".to_string(),
            feature(&["WUU", "MIN", "YUE", "HAK"]),
        ),
        ("Post-Verb Adv.".to_string(), feature(&["YUE"])),
        ("Post-Noun Adj.".to_string(), feature(&["YUE", "MIN"])),
    ])
}

#[cfg(test)]
mod tests {
    use super::{Atlas, AtlasError, builtin_features, builtin_languages, feature, language};
    use std::collections::HashMap;

    #[test]
    fn builtin_tables_pass_validation() {
        let atlas = Atlas::new(builtin_languages(), builtin_features())
            .expect("builtin tables should be consistent");
        assert_eq!(atlas.languages().len(), 8);
        assert_eq!(atlas.features().len(), 7);
    }

    #[test]
    fn builtin_province_universe_is_derived_from_languages() {
        let atlas = Atlas::builtin();
        assert!(atlas.all_provinces().contains("Guangdong"));
        assert!(atlas.all_provinces().contains("Shanxi"));
        // Provinces with no modeled topolect are base-map content only.
        assert!(!atlas.all_provinces().contains("Tibet"));
        assert!(!atlas.all_provinces().contains("Qinghai"));
        assert_eq!(atlas.all_provinces().len(), 28);
    }

    #[test]
    fn unknown_language_in_feature_is_a_config_error() {
        let languages = HashMap::from([("YUE".to_string(), language("Yue", 85, &["Guangdong"]))]);
        let features = HashMap::from([("Post-Verb Adv.".to_string(), feature(&["YUE", "ZZZ"]))]);

        match Atlas::new(languages, features) {
            Err(AtlasError::UnknownLanguage { feature, code }) => {
                assert_eq!(feature, "Post-Verb Adv.");
                assert_eq!(code, "ZZZ");
            }
            Ok(_) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn display_name_falls_back_to_code() {
        let atlas = Atlas::builtin();
        assert_eq!(atlas.display_name("HSN"), "Xiang (湘語)");
        assert_eq!(atlas.display_name("ZZZ"), "ZZZ");
    }

    #[test]
    fn sorted_codes_are_stable() {
        let atlas = Atlas::builtin();
        assert_eq!(
            atlas.sorted_language_codes(),
            vec!["CJY", "CMN", "GAN", "HAK", "HSN", "MIN", "WUU", "YUE"]
        );
    }
}
