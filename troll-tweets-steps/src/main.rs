use {
    tracing::info,
    troll_tweets_core::{
        config::Config,
        entity::Sentiment,
    },
    crate::{
        aggregate::{
            author_snapshots, follow_summary, sentiment_rollup,
            top_profiles, tweets_per_category, ProfileMetric,
        },
        pipeline::PipelineOutput,
        utils::init_logging,
    },
};

mod aggregate;
mod cache;
mod data_loading;
mod hashtags;
mod lemmatization;
mod normalize;
mod pipeline;
mod progress;
mod sentiment;
mod utils;

fn main() -> anyhow::Result<()> {
    init_logging();

    info!("troll tweet analytics pipeline");

    let config = Config::load();
    let output = pipeline::run(&config)?;

    report(&config, &output)?;

    Ok(())
}

/// Logs the rollups renderers would consume: follower statistics, top
/// profiles, tweet counts, hashtag universe sizes and sentiment counts.
fn report(config: &Config, output: &PipelineOutput) -> anyhow::Result<()> {
    let snapshots = author_snapshots(&output.tweets);
    let summary = follow_summary(&snapshots)?;

    info!("followers avg: {}", summary.followers_mean as i64);
    info!("followers median: {}", summary.followers_median as i64);
    info!("following avg: {}", summary.following_mean as i64);
    info!("following median: {}", summary.following_median as i64);
    info!("followers-to-following: {}", summary.ratio);

    for snapshot in top_profiles(&snapshots, 10, ProfileMetric::Followers, None) {
        info!("top followers: {} ({}) - {}", snapshot.author, snapshot.account_category, snapshot.followers);
    }
    for snapshot in top_profiles(&snapshots, 10, ProfileMetric::Following, None) {
        info!("top following: {} ({}) - {}", snapshot.author, snapshot.account_category, snapshot.following);
    }

    for (category, count) in tweets_per_category(&output.tweets) {
        info!("tweets in {}: {}", category, count);
    }

    let categories = config.pipeline.account_categories();

    for category in &categories {
        let tags = output.universe.category(category).map(|tags| tags.len()).unwrap_or(0);
        info!("distinct hash tags in {}: {}", category, tags);
    }
    info!("distinct hash tags overall: {}", output.universe.global().len());

    let rollup = sentiment_rollup(&output.tweets);
    for category in &categories {
        for sentiment in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
            info!(
                "{} {} tweets: {}",
                category,
                sentiment.label(),
                rollup.count(Some(category), sentiment),
            );
        }
    }

    Ok(())
}
