use {
    std::collections::{BTreeMap, BTreeSet},
    typed_builder::TypedBuilder,
    serde::{Serialize, Deserialize},
    chrono::NaiveDateTime,
};

/// Discrete sentiment class derived from the polarity score.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Polarity strictly above zero is positive, strictly below is negative,
    /// exactly zero is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Sentiment::Positive
        } else if polarity < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// One tweet plus the fields the pipeline stages annotate onto it.
///
/// `hash_tags` is derived from the raw `content`, never from
/// `processed_content`: normalization strips hashtag syntax, so extraction
/// has to happen first. `processed_content` is None for non-target-language
/// tweets, null content, and tweets whose text is empty once normalized.
#[derive(TypedBuilder, Serialize, Clone, Debug, PartialEq)]
pub struct Tweet {
    pub author: String,
    pub content: Option<String>,
    pub language: String,
    pub publish_date: NaiveDateTime,
    pub following: u64,
    pub followers: u64,
    pub account_category: String,

    #[builder(default)]
    pub hash_tags: Vec<String>,
    #[builder(default)]
    pub processed_content: Option<String>,
    #[builder(default)]
    pub sent_polarity: Option<f64>,
    #[builder(default)]
    pub sent_subjectivity: Option<f64>,
    #[builder(default)]
    pub class_sentiment: Option<Sentiment>,
}

/// Latest known standing of one (author, account_category) pair: the
/// follower/following counts recorded at the most recent publish date.
#[derive(TypedBuilder, Serialize, Clone, Debug, PartialEq)]
pub struct AuthorSnapshot {
    pub author: String,
    pub account_category: String,
    pub publish_date: NaiveDateTime,
    pub following: u64,
    pub followers: u64,
}

/// Distinct lowercase hashtags per account category plus a global set over
/// all records. Membership is case-insensitive: tags are folded on insert.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct HashtagUniverse {
    by_category: BTreeMap<String, BTreeSet<String>>,
    global: BTreeSet<String>,
}

impl HashtagUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category so it is present even if no tweet mentions a
    /// hashtag under it. An absent bucket is empty data, not an error.
    pub fn ensure_category(&mut self, category: &str) {
        self.by_category.entry(category.to_owned()).or_default();
    }

    /// Inserts a tag into the global set, and into the category set as well
    /// when a category is given.
    pub fn insert(&mut self, category: Option<&str>, tag: &str) {
        let tag = tag.to_lowercase();
        if let Some(category) = category {
            self.by_category.entry(category.to_owned()).or_default().insert(tag.clone());
        }
        self.global.insert(tag);
    }

    pub fn category(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.by_category.get(name)
    }

    pub fn global(&self) -> &BTreeSet<String> {
        &self.global
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.by_category.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_thresholds() {
        assert_eq!(Sentiment::from_polarity(0.3), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(-0.1), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
    }

    #[test]
    fn universe_membership_is_case_insensitive() {
        let mut universe = HashtagUniverse::new();
        universe.insert(Some("LeftTroll"), "Freedom");
        universe.insert(Some("LeftTroll"), "freedom");

        let tags = universe.category("LeftTroll").unwrap();
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("freedom"));
        assert_eq!(universe.global().len(), 1);
    }

    #[test]
    fn global_set_spans_categories() {
        let mut universe = HashtagUniverse::new();
        universe.insert(Some("LeftTroll"), "resist");
        universe.insert(Some("RightTroll"), "MAGA");
        universe.insert(None, "news");

        assert_eq!(universe.global().len(), 3);
        assert_eq!(universe.category("LeftTroll").unwrap().len(), 1);
        assert!(universe.category("NewsFeed").is_none());
    }
}
