use {
    std::collections::{HashMap, HashSet},
    once_cell::sync::Lazy,
    troll_tweets_core::entity::{Sentiment, Tweet},
    crate::progress::Progress,
};

/// Word-level lexicon mapping a token to (polarity, subjectivity). Polarity
/// is in [-1, 1], subjectivity in [0, 1]. Values follow the usual
/// lexicon-based sentiment conventions.
static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| HashMap::from([
    ("amazing", (0.6, 0.9)),
    ("awesome", (1.0, 1.0)),
    ("beautiful", (0.85, 1.0)),
    ("best", (1.0, 0.3)),
    ("better", (0.5, 0.5)),
    ("brave", (0.8, 0.9)),
    ("excellent", (1.0, 1.0)),
    ("free", (0.4, 0.8)),
    ("freedom", (0.4, 0.6)),
    ("friend", (0.3, 0.4)),
    ("fun", (0.3, 0.2)),
    ("good", (0.7, 0.6)),
    ("great", (0.8, 0.75)),
    ("happy", (0.8, 1.0)),
    ("hero", (0.6, 0.7)),
    ("honest", (0.6, 0.9)),
    ("hope", (0.4, 0.5)),
    ("love", (0.5, 0.6)),
    ("patriot", (0.5, 0.6)),
    ("peace", (0.5, 0.5)),
    ("perfect", (1.0, 1.0)),
    ("proud", (0.6, 0.8)),
    ("safe", (0.5, 0.5)),
    ("smart", (0.6, 0.8)),
    ("strong", (0.45, 0.55)),
    ("support", (0.3, 0.3)),
    ("thank", (0.4, 0.4)),
    ("truth", (0.4, 0.5)),
    ("win", (0.8, 0.4)),
    ("wonderful", (1.0, 1.0)),
    ("angry", (-0.5, 0.9)),
    ("attack", (-0.4, 0.5)),
    ("awful", (-1.0, 1.0)),
    ("bad", (-0.7, 0.67)),
    ("corrupt", (-0.8, 0.9)),
    ("crime", (-0.5, 0.6)),
    ("criminal", (-0.6, 0.8)),
    ("crisis", (-0.5, 0.5)),
    ("crooked", (-0.7, 0.9)),
    ("dangerous", (-0.6, 0.7)),
    ("dead", (-0.6, 0.5)),
    ("disaster", (-0.9, 0.8)),
    ("dishonest", (-0.6, 0.9)),
    ("evil", (-0.9, 0.9)),
    ("fail", (-0.6, 0.6)),
    ("failing", (-0.6, 0.6)),
    ("fake", (-0.5, 0.7)),
    ("fear", (-0.5, 0.6)),
    ("fraud", (-0.7, 0.8)),
    ("hate", (-0.8, 0.9)),
    ("horrible", (-1.0, 1.0)),
    ("kill", (-0.7, 0.7)),
    ("lie", (-0.6, 0.8)),
    ("liar", (-0.7, 0.9)),
    ("lose", (-0.4, 0.4)),
    ("loser", (-0.6, 0.8)),
    ("sad", (-0.5, 1.0)),
    ("scandal", (-0.6, 0.7)),
    ("scared", (-0.6, 0.8)),
    ("stupid", (-0.8, 0.9)),
    ("terrible", (-1.0, 1.0)),
    ("threat", (-0.5, 0.5)),
    ("ugly", (-0.7, 0.9)),
    ("violence", (-0.6, 0.6)),
    ("war", (-0.4, 0.4)),
    ("worst", (-1.0, 0.3)),
    ("wrong", (-0.5, 0.54)),
]));

// A negator flips and dampens the polarity of the word that follows it.
static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "not", "no", "never", "cannot", "dont", "cant", "wont", "isnt", "wasnt",
]));

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentimentScore {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Scores normalized text against the lexicon. Assessments are averaged, so
/// the result is a deterministic function of the text alone: identical input
/// scores identically regardless of batch order. Text with no lexicon match
/// scores (0.0, 0.0).
pub fn score(text: &str) -> SentimentScore {
    let mut assessments: Vec<(f64, f64)> = Vec::new();
    let mut negated = false;

    for token in text.split_whitespace() {
        let token = token.to_lowercase();

        if NEGATORS.contains(token.as_str()) {
            negated = true;
            continue;
        }

        if let Some((polarity, subjectivity)) = LEXICON.get(token.as_str()) {
            let polarity = if negated { polarity * -0.5 } else { *polarity };
            assessments.push((polarity, *subjectivity));
        }
        negated = false;
    }

    if assessments.is_empty() {
        return SentimentScore { polarity: 0.0, subjectivity: 0.0 };
    }

    let count = assessments.len() as f64;
    SentimentScore {
        polarity: assessments.iter().map(|(p, _)| p).sum::<f64>() / count,
        subjectivity: assessments.iter().map(|(_, s)| s).sum::<f64>() / count,
    }
}

/// Annotates every tweet that survived normalization with polarity,
/// subjectivity and the discrete sentiment class.
pub fn run_sentiment_step(tweets: &mut [Tweet]) {
    let mut progress = Progress::new("classifying tweet sentiment".to_owned());

    for tweet in tweets.iter_mut() {
        let content = match tweet.processed_content.as_deref() {
            Some(content) => content,
            None => continue,
        };

        let score = score(content);
        tweet.sent_polarity = Some(score.polarity);
        tweet.sent_subjectivity = Some(score.subjectivity);
        tweet.class_sentiment = Some(Sentiment::from_polarity(score.polarity));
        progress.update();
    }

    progress.finish();
}
