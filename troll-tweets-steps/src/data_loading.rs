use {
    std::fs::File,
    indicatif::ProgressBar,
    serde::Deserialize,
    tracing::info,
    chrono::NaiveDateTime,
    troll_tweets_core::{
        config::DataConfig,
        entity::Tweet,
        error::PipelineError,
    },
};

pub const PUBLISH_DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

/// One row of the source CSV schema. Only the fields the pipeline consumes
/// are carried into the Tweet entity; the rest stay here so that a schema
/// mismatch in any column still surfaces as a hard error.
#[derive(Deserialize, Debug)]
struct RawTweetRow {
    #[allow(dead_code)]
    external_author_id: Option<String>,
    author: String,
    content: Option<String>,
    #[allow(dead_code)]
    region: Option<String>,
    language: String,
    publish_date: String,
    #[allow(dead_code)]
    harvested_date: Option<String>,
    following: u64,
    followers: u64,
    #[allow(dead_code)]
    updates: Option<u64>,
    #[allow(dead_code)]
    post_type: Option<String>,
    #[allow(dead_code)]
    account_type: Option<String>,
    #[allow(dead_code)]
    new_june_2018: Option<u8>,
    #[allow(dead_code)]
    retweet: Option<u8>,
    account_category: String,
}

/// Loads `file_count` CSV files named `<path_template><i>.csv` and
/// concatenates them into one collection in a single bulk pass. Any row
/// that fails schema validation aborts the whole run; a partial record
/// collection is never returned.
pub fn load_data_files(config: &DataConfig) -> Result<Vec<Tweet>, PipelineError> {
    let mut tweets = Vec::new();

    for i in 0..config.file_count() {
        let path = format!("{}{}.csv", config.path_template(), i);
        load_data_file(&path, &mut tweets)?;
    }

    info!("loaded {} tweets from {} files", tweets.len(), config.file_count());
    Ok(tweets)
}

fn load_data_file(path: &str, tweets: &mut Vec<Tweet>) -> Result<(), PipelineError> {
    info!("loading file: {}", path);

    let file = File::open(path).map_err(|err| PipelineError::MalformedInput {
        file: path.to_owned(),
        line: 0,
        reason: err.to_string(),
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let rows: Vec<Result<RawTweetRow, csv::Error>> = reader.deserialize().collect();

    let pb = ProgressBar::new(rows.len() as u64);

    for (index, row) in rows.into_iter().enumerate() {
        // header occupies line one
        let line = index as u64 + 2;

        let row = row.map_err(|err| PipelineError::MalformedInput {
            file: path.to_owned(),
            line,
            reason: err.to_string(),
        })?;

        let publish_date = NaiveDateTime::parse_from_str(&row.publish_date, PUBLISH_DATE_FORMAT)
            .map_err(|err| PipelineError::MalformedInput {
                file: path.to_owned(),
                line,
                reason: format!("unparseable publish_date {:?}: {}", row.publish_date, err),
            })?;

        tweets.push(Tweet::builder()
            .author(row.author)
            .content(row.content)
            .language(row.language)
            .publish_date(publish_date)
            .following(row.following)
            .followers(row.followers)
            .account_category(row.account_category)
            .build());

        pb.inc(1);
    }

    pb.finish();
    Ok(())
}
