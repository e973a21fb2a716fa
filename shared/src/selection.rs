use std::collections::HashMap;

use crate::atlas::{Atlas, FeatureMap, LanguageMap, LanguageSet, ProvinceSet};

/// Checkbox state for every language and feature. Transient UI state; the
/// presentation layer mutates it through the methods here and re-renders from
/// the resolver output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub languages: HashMap<String, bool>,
    pub features: HashMap<String, bool>,
}

impl SelectionState {
    /// Fresh state with every flag cleared.
    pub fn for_atlas(atlas: &Atlas) -> Self {
        Self {
            languages: atlas
                .languages()
                .keys()
                .map(|code| (code.clone(), false))
                .collect(),
            features: atlas
                .features()
                .keys()
                .map(|name| (name.clone(), false))
                .collect(),
        }
    }

    /// Flips a language flag. Unknown codes are ignored.
    pub fn set_language(&mut self, code: &str, checked: bool) {
        if let Some(flag) = self.languages.get_mut(code) {
            *flag = checked;
        }
    }

    /// Flips a feature flag. Unknown names are ignored. The caller must follow
    /// up with [`SelectionState::apply_feature_resolution`] so the language
    /// flags resynchronize.
    pub fn set_feature(&mut self, name: &str, checked: bool) {
        if let Some(flag) = self.features.get_mut(name) {
            *flag = checked;
        }
    }

    pub fn language_checked(&self, code: &str) -> bool {
        self.languages.get(code).copied().unwrap_or(false)
    }

    pub fn feature_checked(&self, name: &str) -> bool {
        self.features.get(name).copied().unwrap_or(false)
    }

    pub fn any_feature_checked(&self) -> bool {
        self.features.values().any(|checked| *checked)
    }

    /// Overwrites every language flag with the intersection of the checked
    /// features' language sets. Manual language picks are discarded, not
    /// merged; with no feature checked this clears every language.
    pub fn apply_feature_resolution(&mut self, features: &FeatureMap) {
        let resolved = resolve_languages_from_features(&self.features, features);
        for (code, flag) in self.languages.iter_mut() {
            *flag = resolved.contains(code);
        }
    }

    /// Zeroes every language and feature flag.
    pub fn deselect_all(&mut self) {
        for flag in self.languages.values_mut() {
            *flag = false;
        }
        for flag in self.features.values_mut() {
            *flag = false;
        }
    }
}

/// Union of the province sets of every checked language. Unknown codes in the
/// selection are skipped.
pub fn visible_provinces(
    selection: &HashMap<String, bool>,
    languages: &LanguageMap,
) -> ProvinceSet {
    let mut visible = ProvinceSet::new();
    for (code, checked) in selection {
        if !checked {
            continue;
        }
        if let Some(language) = languages.get(code) {
            visible.extend(language.provinces.iter().cloned());
        }
    }
    visible
}

/// Intersection across every checked feature's language set. No feature
/// checked yields the empty set; that empty result deliberately clears all
/// language selection rather than leaving it untouched. Unknown feature names
/// in the selection are skipped.
pub fn resolve_languages_from_features(
    selection: &HashMap<String, bool>,
    features: &FeatureMap,
) -> LanguageSet {
    let mut resolved: Option<LanguageSet> = None;
    for (name, checked) in selection {
        if !checked {
            continue;
        }
        let Some(langs) = features.get(name) else {
            continue;
        };
        match resolved.as_mut() {
            None => resolved = Some(langs.clone()),
            Some(acc) => {
                acc.retain(|code| langs.contains(code));
                if acc.is_empty() {
                    break;
                }
            }
        }
    }
    resolved.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{SelectionState, resolve_languages_from_features, visible_provinces};
    use crate::atlas::{Atlas, Language, LanguageMap};
    use std::collections::{BTreeSet, HashMap};

    fn two_language_table() -> LanguageMap {
        HashMap::from([
            (
                "YUE".to_string(),
                Language {
                    name: "Yue".to_string(),
                    provinces: ["Guangdong", "Guangxi"]
                        .iter()
                        .map(|p| p.to_string())
                        .collect(),
                    population: 85,
                },
            ),
            (
                "MIN".to_string(),
                Language {
                    name: "Min".to_string(),
                    provinces: ["Fujian", "Guangdong", "Hainan"]
                        .iter()
                        .map(|p| p.to_string())
                        .collect(),
                    population: 75,
                },
            ),
        ])
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn visible_provinces_is_union_with_duplicates_collapsed() {
        let languages = two_language_table();
        let selection = HashMap::from([("YUE".to_string(), true), ("MIN".to_string(), true)]);

        assert_eq!(
            visible_provinces(&selection, &languages),
            set(&["Fujian", "Guangdong", "Guangxi", "Hainan"])
        );
    }

    #[test]
    fn empty_selection_yields_empty_set() {
        let languages = two_language_table();
        assert!(visible_provinces(&HashMap::new(), &languages).is_empty());

        let all_off = HashMap::from([("YUE".to_string(), false), ("MIN".to_string(), false)]);
        assert!(visible_provinces(&all_off, &languages).is_empty());
    }

    #[test]
    fn unknown_codes_in_selection_are_ignored() {
        let languages = two_language_table();
        let selection = HashMap::from([("ZZZ".to_string(), true), ("YUE".to_string(), true)]);

        assert_eq!(
            visible_provinces(&selection, &languages),
            set(&["Guangdong", "Guangxi"])
        );
    }

    #[test]
    fn no_checked_feature_resolves_to_empty() {
        let atlas = Atlas::builtin();
        assert!(resolve_languages_from_features(&HashMap::new(), atlas.features()).is_empty());

        let all_off: HashMap<String, bool> = atlas
            .features()
            .keys()
            .map(|name| (name.clone(), false))
            .collect();
        assert!(resolve_languages_from_features(&all_off, atlas.features()).is_empty());
    }

    #[test]
    fn single_feature_resolves_to_its_language_set() {
        let atlas = Atlas::builtin();
        let selection = HashMap::from([("Reduced Diphthong".to_string(), true)]);

        let resolved = resolve_languages_from_features(&selection, atlas.features());
        assert_eq!(resolved, set(&["WUU"]));
    }

    #[test]
    fn two_features_resolve_to_their_intersection() {
        let atlas = Atlas::builtin();
        let selection = HashMap::from([
            ("No Audible Release".to_string(), true),
            ("Voiced Consonants".to_string(), true),
        ]);

        // {WUU,YUE,GAN,MIN,HAK} ∩ {MIN,WUU,HSN}
        let resolved = resolve_languages_from_features(&selection, atlas.features());
        assert_eq!(resolved, set(&["MIN", "WUU"]));
    }

    #[test]
    fn adding_features_only_shrinks_the_result() {
        let atlas = Atlas::builtin();
        let names = atlas.sorted_feature_names();

        let mut selection: HashMap<String, bool> = HashMap::new();
        let mut previous = None;
        for name in names {
            selection.insert(name, true);
            let resolved = resolve_languages_from_features(&selection, atlas.features());
            if let Some(previous) = previous {
                assert!(resolved.is_subset(&previous));
            }
            previous = Some(resolved);
        }
    }

    #[test]
    fn resolution_is_idempotent() {
        let atlas = Atlas::builtin();
        let mut state = SelectionState::for_atlas(&atlas);
        state.set_feature("Post-Noun Adj.", true);

        state.apply_feature_resolution(atlas.features());
        let first = state.clone();
        state.apply_feature_resolution(atlas.features());
        assert_eq!(state, first);

        let once = visible_provinces(&state.languages, atlas.languages());
        let twice = visible_provinces(&state.languages, atlas.languages());
        assert_eq!(once, twice);
    }

    #[test]
    fn post_noun_adj_selects_yue_and_min_provinces() {
        let atlas = Atlas::builtin();
        let mut state = SelectionState::for_atlas(&atlas);
        state.set_language("CMN", true); // manual pick, to be overwritten
        state.set_feature("Post-Noun Adj.", true);
        state.apply_feature_resolution(atlas.features());

        assert!(state.language_checked("YUE"));
        assert!(state.language_checked("MIN"));
        assert!(!state.language_checked("CMN"));

        assert_eq!(
            visible_provinces(&state.languages, atlas.languages()),
            set(&["Fujian", "Guangdong", "Guangxi", "Hainan"])
        );
    }

    #[test]
    fn reduced_diphthong_shows_exactly_the_wu_provinces() {
        let atlas = Atlas::builtin();
        let mut state = SelectionState::for_atlas(&atlas);
        state.set_feature("Reduced Diphthong", true);
        state.apply_feature_resolution(atlas.features());

        assert_eq!(
            visible_provinces(&state.languages, atlas.languages()),
            set(&["Anhui", "Jiangsu", "Shanghai", "Yunnan", "Zhejiang"])
        );
    }

    #[test]
    fn unchecking_the_last_feature_clears_all_languages() {
        let atlas = Atlas::builtin();
        let mut state = SelectionState::for_atlas(&atlas);
        state.set_feature("Post-Noun Adj.", true);
        state.apply_feature_resolution(atlas.features());
        assert!(state.language_checked("YUE"));

        state.set_feature("Post-Noun Adj.", false);
        state.apply_feature_resolution(atlas.features());
        assert!(state.languages.values().all(|checked| !checked));
        assert!(visible_provinces(&state.languages, atlas.languages()).is_empty());
    }

    #[test]
    fn deselect_all_zeroes_everything() {
        let atlas = Atlas::builtin();
        let mut state = SelectionState::for_atlas(&atlas);
        state.set_language("CMN", true);
        state.set_language("WUU", true);
        state.set_feature("Voiced Consonants", true);

        state.deselect_all();
        assert!(state.languages.values().all(|checked| !checked));
        assert!(state.features.values().all(|checked| !checked));
        assert!(visible_provinces(&state.languages, atlas.languages()).is_empty());
    }

    #[test]
    fn disjoint_features_resolve_to_nothing() {
        let atlas = Atlas::builtin();
        let selection = HashMap::from([
            ("Reduced Diphthong".to_string(), true), // {WUU}
            ("Post-Verb Adv.".to_string(), true),    // {YUE}
        ]);

        assert!(resolve_languages_from_features(&selection, atlas.features()).is_empty());
    }
}
