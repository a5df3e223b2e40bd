use {
    std::collections::BTreeSet,
    once_cell::sync::Lazy,
    regex::Regex,
    troll_tweets_core::entity::Tweet,
    crate::progress::Progress,
};

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\w+)").unwrap());

/// Returns the hashtag tokens of a tweet in first-occurrence order with the
/// original casing. Null content yields an empty sequence.
pub fn extract_hash_tags(content: Option<&str>) -> Vec<String> {
    let content = match content {
        Some(content) => content,
        None => return Vec::new(),
    };

    HASHTAG_RE.captures_iter(content)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_owned()))
        .collect()
}

/// Annotates every tweet with the hashtags of its raw content. Must run
/// before normalization, which strips the hashtag syntax from the text.
pub fn run_hashtag_step(tweets: &mut [Tweet]) {
    let mut progress = Progress::new("extracting hash tags".to_owned());

    for tweet in tweets.iter_mut() {
        tweet.hash_tags = extract_hash_tags(tweet.content.as_deref());
        progress.update();
    }

    progress.finish();
}

/// Flattens per-tweet hashtag sequences into a distinct lowercase set,
/// optionally restricted to one account category.
pub fn distinct_hash_tags(tweets: &[Tweet], category: Option<&str>) -> BTreeSet<String> {
    tweets.iter()
        .filter(|tweet| category.map(|c| tweet.account_category == c).unwrap_or(true))
        .flat_map(|tweet| tweet.hash_tags.iter())
        .map(|tag| tag.to_lowercase())
        .collect()
}
