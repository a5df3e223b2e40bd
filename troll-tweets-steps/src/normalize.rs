use {
    std::collections::HashSet,
    once_cell::sync::Lazy,
    regex::Regex,
    troll_tweets_core::entity::Tweet,
    crate::{
        lemmatization::lemmatize,
        progress::Progress,
    },
};

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+://[\w\-]+(\.[\w\-]+)*(?:/[^\s/]*)*").unwrap());
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());
static PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "her", "hers", "herself", "it", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "these", "those", "am", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "having", "do", "does", "did", "doing",
    "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "to",
    "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "should", "now",
]));

/// Canonical cleaning pipeline, applied in this exact order: strip URLs,
/// strip hashtag tokens, drop stopwords, strip punctuation, lowercase,
/// lemmatize. Later steps assume the earlier cleanup; in particular hashtag
/// extraction must already have run, since step two destroys the markers.
pub fn normalize(text: &str) -> String {
    let no_urls = URL_RE.replace_all(text, "");
    let no_tags = HASHTAG_RE.replace_all(&no_urls, "");

    let no_stop = no_tags.split_whitespace()
        .filter(|token| !STOP_WORDS.contains(*token))
        .collect::<Vec<_>>()
        .join(" ");

    let no_punct = PUNCT_RE.replace_all(&no_stop, "");
    let lowered = no_punct.to_lowercase();

    lowered.split_whitespace()
        .map(lemmatize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Annotates target-language tweets with their normalized content. Null
/// content and other languages are skipped entirely; text that normalizes
/// to an empty string is demoted back to None so downstream word-cloud and
/// sentiment consumers never see it.
pub fn run_normalize_step(tweets: &mut [Tweet], target_language: &str) {
    let mut progress = Progress::new("normalizing tweet content".to_owned());

    for tweet in tweets.iter_mut() {
        if tweet.language != target_language {
            continue;
        }

        let content = match tweet.content.as_deref() {
            Some(content) => content,
            None => continue,
        };

        let normalized = normalize(content);
        tweet.processed_content = if normalized.is_empty() { None } else { Some(normalized) };
        progress.update();
    }

    progress.finish();
}
