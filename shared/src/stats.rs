use crate::atlas::{LanguageMap, LanguageSet};

/// Speaker totals (in millions) on either side of a feature, for the
/// proportion display in the feature detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationSplit {
    pub with_feature: u64,
    pub without_feature: u64,
}

impl PopulationSplit {
    pub fn total(&self) -> u64 {
        self.with_feature + self.without_feature
    }

    /// Share of speakers whose language has the feature, as a percentage.
    pub fn percent_with(&self) -> f64 {
        self.with_feature as f64 / self.total() as f64 * 100.0
    }
}

/// Splits the population table across a feature's language set. Returns
/// `None` when the total is zero so callers render "no data" instead of
/// dividing by zero.
pub fn population_split(
    feature_languages: &LanguageSet,
    languages: &LanguageMap,
) -> Option<PopulationSplit> {
    let mut split = PopulationSplit {
        with_feature: 0,
        without_feature: 0,
    };
    for (code, language) in languages {
        if feature_languages.contains(code) {
            split.with_feature += language.population;
        } else {
            split.without_feature += language.population;
        }
    }
    (split.total() > 0).then_some(split)
}
