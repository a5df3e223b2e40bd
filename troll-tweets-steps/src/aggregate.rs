use {
    std::collections::{BTreeMap, HashSet},
    chrono::NaiveDateTime,
    troll_tweets_core::{
        entity::{AuthorSnapshot, HashtagUniverse, Sentiment, Tweet},
        error::PipelineError,
    },
};

/// Summary statistics over the author snapshots' follower/following counts.
#[derive(Clone, Copy, Debug)]
pub struct FollowSummary {
    pub followers_mean: f64,
    pub followers_median: f64,
    pub following_mean: f64,
    pub following_median: f64,
    /// sum(followers) / sum(following), rounded to two decimals.
    pub ratio: f64,
}

/// Per-(category, sentiment) and per-sentiment counts over deduplicated
/// processed content. Absent buckets count as zero.
#[derive(Debug, Default)]
pub struct SentimentRollup {
    by_category: BTreeMap<(String, Sentiment), u64>,
    by_sentiment: BTreeMap<Sentiment, u64>,
}

impl SentimentRollup {
    pub fn count(&self, category: Option<&str>, sentiment: Sentiment) -> u64 {
        match category {
            Some(category) => self.by_category
                .get(&(category.to_owned(), sentiment))
                .copied()
                .unwrap_or(0),
            None => self.by_sentiment.get(&sentiment).copied().unwrap_or(0),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ProfileMetric {
    Followers,
    Following,
}

/// Reduces the tweet collection to one snapshot per (author,
/// account_category) pair: the pair's maximum publish date, with the
/// follower/following counts recorded at that date. Multiple tweets sharing
/// the maximum date collapse to a single row.
pub fn author_snapshots(tweets: &[Tweet]) -> Vec<AuthorSnapshot> {
    let mut max_dates: BTreeMap<(&str, &str), NaiveDateTime> = BTreeMap::new();
    for tweet in tweets {
        max_dates.entry((tweet.author.as_str(), tweet.account_category.as_str()))
            .and_modify(|date| *date = (*date).max(tweet.publish_date))
            .or_insert(tweet.publish_date);
    }

    max_dates.iter()
        .filter_map(|((author, category), date)| {
            tweets.iter()
                .find(|tweet| {
                    tweet.author == *author
                        && tweet.account_category == *category
                        && tweet.publish_date == *date
                })
                .map(|tweet| AuthorSnapshot::builder()
                    .author(tweet.author.clone())
                    .account_category(tweet.account_category.clone())
                    .publish_date(tweet.publish_date)
                    .following(tweet.following)
                    .followers(tweet.followers)
                    .build())
        })
        .collect()
}

/// Mean, median and followers-to-following ratio over the snapshots. A zero
/// following sum is signaled explicitly instead of producing NaN or
/// infinity.
pub fn follow_summary(snapshots: &[AuthorSnapshot]) -> Result<FollowSummary, PipelineError> {
    let followers: Vec<u64> = snapshots.iter().map(|s| s.followers).collect();
    let following: Vec<u64> = snapshots.iter().map(|s| s.following).collect();

    let following_sum: u64 = following.iter().sum();
    if following_sum == 0 {
        return Err(PipelineError::DivisionByZero);
    }
    let followers_sum: u64 = followers.iter().sum();

    let ratio = followers_sum as f64 / following_sum as f64;

    Ok(FollowSummary {
        followers_mean: mean(&followers),
        followers_median: median(&followers),
        following_mean: mean(&following),
        following_median: median(&following),
        ratio: (ratio * 100.0).round() / 100.0,
    })
}

/// Distinct lowercase hashtags for every configured category plus the
/// global set over all records. Unlisted categories contribute to the
/// global set only.
pub fn hashtag_universe(tweets: &[Tweet], categories: &[String]) -> HashtagUniverse {
    let mut universe = HashtagUniverse::new();
    for category in categories {
        universe.ensure_category(category);
    }

    for tweet in tweets {
        let category = categories.iter()
            .find(|c| **c == tweet.account_category)
            .map(|c| c.as_str());

        for tag in &tweet.hash_tags {
            universe.insert(category, tag);
        }
    }

    universe
}

/// Counts sentiment classes per category and overall, after deduplicating
/// on (processed_content, account_category, class_sentiment). Tweets that
/// did not survive normalization are excluded.
pub fn sentiment_rollup(tweets: &[Tweet]) -> SentimentRollup {
    let mut seen: HashSet<(&str, &str, Sentiment)> = HashSet::new();
    let mut rollup = SentimentRollup::default();

    for tweet in tweets {
        let (content, sentiment) = match (tweet.processed_content.as_deref(), tweet.class_sentiment) {
            (Some(content), Some(sentiment)) => (content, sentiment),
            _ => continue,
        };

        if !seen.insert((content, tweet.account_category.as_str(), sentiment)) {
            continue;
        }

        *rollup.by_category.entry((tweet.account_category.clone(), sentiment)).or_insert(0) += 1;
        *rollup.by_sentiment.entry(sentiment).or_insert(0) += 1;
    }

    rollup
}

/// Tweet counts per account category, most active first.
pub fn tweets_per_category(tweets: &[Tweet]) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for tweet in tweets {
        *counts.entry(&tweet.account_category).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, u64)> = counts.into_iter()
        .map(|(category, count)| (category.to_owned(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Top N snapshots by followers or following, optionally restricted to one
/// category. Fewer than N matching snapshots is fine.
pub fn top_profiles<'a>(
    snapshots: &'a [AuthorSnapshot],
    n: usize,
    metric: ProfileMetric,
    category: Option<&str>,
) -> Vec<&'a AuthorSnapshot> {
    let mut matching: Vec<&AuthorSnapshot> = snapshots.iter()
        .filter(|s| category.map(|c| s.account_category == c).unwrap_or(true))
        .collect();

    matching.sort_by(|a, b| {
        let (a, b) = match metric {
            ProfileMetric::Followers => (a.followers, b.followers),
            ProfileMetric::Following => (a.following, b.following),
        };
        b.cmp(&a)
    });
    matching.truncate(n);
    matching
}

fn mean(values: &[u64]) -> f64 {
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

fn median(values: &[u64]) -> f64 {
    let mut values = values.to_vec();
    values.sort_unstable();

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) as f64 / 2.0
    } else {
        values[mid] as f64
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        chrono::NaiveDate,
        troll_tweets_core::entity::Sentiment,
    };

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 10, day).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn tweet(author: &str, category: &str, day: u32, following: u64, followers: u64) -> Tweet {
        Tweet::builder()
            .author(author.to_owned())
            .content(None)
            .language("English".to_owned())
            .publish_date(date(day))
            .following(following)
            .followers(followers)
            .account_category(category.to_owned())
            .build()
    }

    #[test]
    fn snapshot_keeps_counts_at_max_date() {
        let tweets = vec![
            tweet("AMELIEBALDWIN", "RightTroll", 1, 100, 50),
            tweet("AMELIEBALDWIN", "RightTroll", 5, 300, 900),
            tweet("AMELIEBALDWIN", "RightTroll", 3, 200, 70),
        ];

        let snapshots = author_snapshots(&tweets);
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].publish_date, date(5));
        assert_eq!(snapshots[0].followers, 900);
        assert_eq!(snapshots[0].following, 300);
    }

    #[test]
    fn snapshot_per_author_category_pair_with_tie_dedup() {
        let tweets = vec![
            tweet("a", "LeftTroll", 2, 10, 20),
            tweet("a", "LeftTroll", 2, 10, 20),
            tweet("a", "NewsFeed", 1, 5, 5),
        ];

        let snapshots = author_snapshots(&tweets);
        assert_eq!(snapshots.len(), 2);
    }

    #[test]
    fn ratio_is_rounded_to_two_decimals() {
        let snapshots = vec![
            AuthorSnapshot::builder()
                .author("a".to_owned())
                .account_category("NewsFeed".to_owned())
                .publish_date(date(1))
                .following(500_000)
                .followers(1_000_000)
                .build(),
        ];

        let summary = follow_summary(&snapshots).unwrap();
        assert_eq!(summary.ratio, 2.0);
        assert_eq!(summary.followers_mean, 1_000_000.0);
        assert_eq!(summary.followers_median, 1_000_000.0);
    }

    #[test]
    fn zero_following_sum_is_an_error() {
        let snapshots = vec![
            AuthorSnapshot::builder()
                .author("a".to_owned())
                .account_category("NewsFeed".to_owned())
                .publish_date(date(1))
                .following(0)
                .followers(100)
                .build(),
        ];

        assert!(matches!(follow_summary(&snapshots), Err(PipelineError::DivisionByZero)));
        assert!(matches!(follow_summary(&[]), Err(PipelineError::DivisionByZero)));
    }

    #[test]
    fn median_of_even_sized_sample() {
        assert_eq!(median(&[1, 3, 5, 7]), 4.0);
        assert_eq!(median(&[1, 3, 5]), 3.0);
    }

    #[test]
    fn universe_collapses_case_across_records() {
        let mut first = tweet("a", "LeftTroll", 1, 1, 1);
        first.hash_tags = vec!["Freedom".to_owned()];
        let mut second = tweet("b", "LeftTroll", 1, 1, 1);
        second.hash_tags = vec!["freedom".to_owned()];

        let categories = vec!["LeftTroll".to_owned(), "RightTroll".to_owned()];
        let universe = hashtag_universe(&[first, second], &categories);

        let left = universe.category("LeftTroll").unwrap();
        assert_eq!(left.len(), 1);
        assert!(left.contains("freedom"));
        assert!(universe.category("RightTroll").unwrap().is_empty());
    }

    #[test]
    fn unlisted_category_counts_globally_only() {
        let mut t = tweet("a", "Commercial", 1, 1, 1);
        t.hash_tags = vec!["deal".to_owned()];

        let universe = hashtag_universe(&[t], &["LeftTroll".to_owned()]);
        assert!(universe.global().contains("deal"));
        assert!(universe.category("LeftTroll").unwrap().is_empty());
    }

    #[test]
    fn sentiment_rollup_dedupes_and_tolerates_absent_buckets() {
        let mut a = tweet("a", "RightTroll", 1, 1, 1);
        a.processed_content = Some("fake news".to_owned());
        a.class_sentiment = Some(Sentiment::Negative);
        let b = a.clone();
        let mut c = tweet("c", "RightTroll", 1, 1, 1);
        c.processed_content = Some("great win".to_owned());
        c.class_sentiment = Some(Sentiment::Positive);
        let skipped = tweet("d", "RightTroll", 1, 1, 1);

        let rollup = sentiment_rollup(&[a, b, c, skipped]);

        assert_eq!(rollup.count(Some("RightTroll"), Sentiment::Negative), 1);
        assert_eq!(rollup.count(Some("RightTroll"), Sentiment::Positive), 1);
        assert_eq!(rollup.count(Some("RightTroll"), Sentiment::Neutral), 0);
        assert_eq!(rollup.count(Some("Fearmonger"), Sentiment::Negative), 0);
        assert_eq!(rollup.count(None, Sentiment::Negative), 1);
    }

    #[test]
    fn category_counts_are_sorted_descending() {
        let tweets = vec![
            tweet("a", "NewsFeed", 1, 1, 1),
            tweet("b", "NewsFeed", 1, 1, 1),
            tweet("c", "LeftTroll", 1, 1, 1),
        ];

        let counts = tweets_per_category(&tweets);
        assert_eq!(counts, vec![("NewsFeed".to_owned(), 2), ("LeftTroll".to_owned(), 1)]);
    }

    #[test]
    fn top_profiles_by_metric_and_category() {
        let snapshots = author_snapshots(&[
            tweet("a", "LeftTroll", 1, 10, 500),
            tweet("b", "LeftTroll", 1, 900, 100),
            tweet("c", "RightTroll", 1, 50, 800),
        ]);

        let top = top_profiles(&snapshots, 2, ProfileMetric::Followers, None);
        assert_eq!(top[0].author, "c");
        assert_eq!(top[1].author, "a");

        let left = top_profiles(&snapshots, 10, ProfileMetric::Following, Some("LeftTroll"));
        assert_eq!(left.len(), 2);
        assert_eq!(left[0].author, "b");
    }
}
