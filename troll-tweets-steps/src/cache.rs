use {
    std::{fs::{File, create_dir_all}, path::Path},
    serde::{Serialize, Deserialize},
    tracing::info,
    chrono::NaiveDateTime,
    troll_tweets_core::{
        entity::{HashtagUniverse, Sentiment, Tweet},
        error::PipelineError,
    },
};

const TWEETS_FILE: &str = "processed_tweets.csv";
const HASHTAGS_FILE: &str = "distinct_hash_tags.csv";
const GLOBAL_SCOPE: &str = "global";
const CACHE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flat-table form of a fully annotated tweet. Hashtags are space-joined;
/// tags are `\w+` tokens, so the join is lossless.
#[derive(Serialize, Deserialize, Debug)]
struct CachedTweetRow {
    author: String,
    content: Option<String>,
    language: String,
    publish_date: String,
    following: u64,
    followers: u64,
    account_category: String,
    hash_tags: String,
    processed_content: Option<String>,
    sent_polarity: Option<f64>,
    sent_subjectivity: Option<f64>,
    class_sentiment: Option<Sentiment>,
}

#[derive(Serialize, Deserialize, Debug)]
struct HashtagRow {
    scope: String,
    hash_tag: String,
}

/// Writes the annotated table and the per-category hashtag table so a later
/// run can skip the transformation stages entirely.
pub fn persist_artifacts(
    dir: &str,
    tweets: &[Tweet],
    universe: &HashtagUniverse,
) -> Result<(), PipelineError> {
    create_dir_all(dir).map_err(|err| persist_error(dir, &err))?;

    let tweets_path = Path::new(dir).join(TWEETS_FILE);
    let mut writer = csv::Writer::from_path(&tweets_path)
        .map_err(|err| persist_error(&tweets_path.display().to_string(), &err))?;
    for tweet in tweets {
        let row = CachedTweetRow {
            author: tweet.author.clone(),
            content: tweet.content.clone(),
            language: tweet.language.clone(),
            publish_date: tweet.publish_date.format(CACHE_DATE_FORMAT).to_string(),
            following: tweet.following,
            followers: tweet.followers,
            account_category: tweet.account_category.clone(),
            hash_tags: tweet.hash_tags.join(" "),
            processed_content: tweet.processed_content.clone(),
            sent_polarity: tweet.sent_polarity,
            sent_subjectivity: tweet.sent_subjectivity,
            class_sentiment: tweet.class_sentiment,
        };
        writer.serialize(row).map_err(|err| persist_error(&tweets_path.display().to_string(), &err))?;
    }
    writer.flush().map_err(|err| persist_error(&tweets_path.display().to_string(), &err))?;

    let hashtags_path = Path::new(dir).join(HASHTAGS_FILE);
    let mut writer = csv::Writer::from_path(&hashtags_path)
        .map_err(|err| persist_error(&hashtags_path.display().to_string(), &err))?;
    for (category, tags) in universe.categories() {
        for tag in tags {
            let row = HashtagRow { scope: category.clone(), hash_tag: tag.clone() };
            writer.serialize(row).map_err(|err| persist_error(&hashtags_path.display().to_string(), &err))?;
        }
    }
    for tag in universe.global() {
        let row = HashtagRow { scope: GLOBAL_SCOPE.to_owned(), hash_tag: tag.clone() };
        writer.serialize(row).map_err(|err| persist_error(&hashtags_path.display().to_string(), &err))?;
    }
    writer.flush().map_err(|err| persist_error(&hashtags_path.display().to_string(), &err))?;

    info!("persisted {} tweets and hashtag universe to {}", tweets.len(), dir);
    Ok(())
}

/// Loads previously persisted artifacts. Absence or a parse failure is
/// fatal: cached mode has no silent fallback to recomputation.
pub fn load_artifacts(dir: &str) -> Result<(Vec<Tweet>, HashtagUniverse), PipelineError> {
    let tweets_path = Path::new(dir).join(TWEETS_FILE);
    let mut reader = open_reader(&tweets_path)?;

    let mut tweets = Vec::new();
    for row in reader.deserialize() {
        let row: CachedTweetRow = row.map_err(|err| missing_error(&tweets_path.display().to_string(), &err))?;

        let publish_date = NaiveDateTime::parse_from_str(&row.publish_date, CACHE_DATE_FORMAT)
            .map_err(|err| missing_error(&tweets_path.display().to_string(), &err))?;

        tweets.push(Tweet::builder()
            .author(row.author)
            .content(row.content)
            .language(row.language)
            .publish_date(publish_date)
            .following(row.following)
            .followers(row.followers)
            .account_category(row.account_category)
            .hash_tags(row.hash_tags.split_whitespace().map(str::to_owned).collect())
            .processed_content(row.processed_content)
            .sent_polarity(row.sent_polarity)
            .sent_subjectivity(row.sent_subjectivity)
            .class_sentiment(row.class_sentiment)
            .build());
    }

    let hashtags_path = Path::new(dir).join(HASHTAGS_FILE);
    let mut reader = open_reader(&hashtags_path)?;

    let mut universe = HashtagUniverse::new();
    for row in reader.deserialize() {
        let row: HashtagRow = row.map_err(|err| missing_error(&hashtags_path.display().to_string(), &err))?;
        if row.scope == GLOBAL_SCOPE {
            universe.insert(None, &row.hash_tag);
        } else {
            universe.ensure_category(&row.scope);
            universe.insert(Some(&row.scope), &row.hash_tag);
        }
    }

    info!("loaded {} cached tweets from {}", tweets.len(), dir);
    Ok((tweets, universe))
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, PipelineError> {
    let file = File::open(path).map_err(|err| missing_error(&path.display().to_string(), &err))?;
    Ok(csv::Reader::from_reader(file))
}

fn persist_error(path: &str, err: &dyn std::fmt::Display) -> PipelineError {
    PipelineError::Persist {
        path: path.to_owned(),
        reason: err.to_string(),
    }
}

fn missing_error(path: &str, err: &dyn std::fmt::Display) -> PipelineError {
    PipelineError::MissingCachedArtifact {
        path: path.to_owned(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::io::Write,
        chrono::NaiveDate,
    };

    fn annotated_tweet() -> Tweet {
        Tweet::builder()
            .author("10_GOP".to_owned())
            .content(Some("Check this out #Freedom http://example.com/x".to_owned()))
            .language("English".to_owned())
            .publish_date(NaiveDate::from_ymd_opt(2017, 10, 1).unwrap().and_hms_opt(19, 58, 0).unwrap())
            .following(1052)
            .followers(9636)
            .account_category("RightTroll".to_owned())
            .hash_tags(vec!["Freedom".to_owned()])
            .processed_content(Some("check".to_owned()))
            .sent_polarity(Some(0.4))
            .sent_subjectivity(Some(0.6))
            .class_sentiment(Some(Sentiment::Positive))
            .build()
    }

    #[test]
    fn artifacts_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().display().to_string();

        let tweets = vec![annotated_tweet()];
        let mut universe = HashtagUniverse::new();
        universe.insert(Some("RightTroll"), "Freedom");

        persist_artifacts(&dir, &tweets, &universe).unwrap();
        let (loaded_tweets, loaded_universe) = load_artifacts(&dir).unwrap();

        assert_eq!(loaded_tweets, tweets);
        assert_eq!(loaded_universe, universe);
    }

    #[test]
    fn unannotated_fields_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dir = dir.path().display().to_string();

        let mut tweet = annotated_tweet();
        tweet.content = None;
        tweet.hash_tags = Vec::new();
        tweet.processed_content = None;
        tweet.sent_polarity = None;
        tweet.sent_subjectivity = None;
        tweet.class_sentiment = None;

        persist_artifacts(&dir, &[tweet.clone()], &HashtagUniverse::new()).unwrap();
        let (loaded, _) = load_artifacts(&dir).unwrap();

        assert_eq!(loaded, vec![tweet]);
    }

    #[test]
    fn absent_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_artifacts(&dir.path().display().to_string()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingCachedArtifact { .. }));
    }

    #[test]
    fn corrupt_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join(TWEETS_FILE)).unwrap();
        writeln!(file, "author,followers").unwrap();
        writeln!(file, "someone,many").unwrap();

        let err = load_artifacts(&dir.path().display().to_string()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingCachedArtifact { .. }));
    }
}
