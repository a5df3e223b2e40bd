use {
    tracing::info,
    troll_tweets_core::{
        config::Config,
        entity::{HashtagUniverse, Tweet},
        error::PipelineError,
    },
    crate::{
        aggregate::hashtag_universe,
        cache,
        data_loading::load_data_files,
        hashtags::run_hashtag_step,
        normalize::run_normalize_step,
        sentiment::run_sentiment_step,
    },
};

/// The annotated record collection and the hashtag universe. Read-only once
/// the run completes; renderers and calculators consume it as-is.
#[derive(Debug)]
pub struct PipelineOutput {
    pub tweets: Vec<Tweet>,
    pub universe: HashtagUniverse,
}

/// Runs the pipeline end to end in one of two modes. Recompute ingests the
/// raw CSVs and sequences the stages in their one valid order: hashtag
/// extraction over raw content first, then normalization (which strips the
/// hashtag markers), then sentiment over the normalized text. Cached mode
/// loads previously persisted artifacts and performs no transformation.
/// Either mode is all-or-nothing per invocation.
pub fn run(config: &Config) -> Result<PipelineOutput, PipelineError> {
    if config.pipeline.recompute() {
        run_recompute(config)
    } else {
        run_cached(config)
    }
}

fn run_recompute(config: &Config) -> Result<PipelineOutput, PipelineError> {
    info!("running pipeline in recompute mode");

    let mut tweets = load_data_files(&config.data())?;

    run_hashtag_step(&mut tweets);
    run_normalize_step(&mut tweets, &config.pipeline.target_language());
    run_sentiment_step(&mut tweets);

    let universe = hashtag_universe(&tweets, &config.pipeline.account_categories());

    if config.pipeline.persist_artifacts() {
        cache::persist_artifacts(&config.data().processed_dir(), &tweets, &universe)?;
    }

    Ok(PipelineOutput { tweets, universe })
}

fn run_cached(config: &Config) -> Result<PipelineOutput, PipelineError> {
    info!("running pipeline in cached mode");

    let (tweets, mut universe) = cache::load_artifacts(&config.data().processed_dir())?;
    for category in config.pipeline.account_categories() {
        universe.ensure_category(&category);
    }

    Ok(PipelineOutput { tweets, universe })
}
