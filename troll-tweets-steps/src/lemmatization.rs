use {
    std::collections::{HashMap, HashSet},
    once_cell::sync::Lazy,
};

// Irregular noun plurals and a handful of irregular verb forms. Dictionary
// lookup happens before any suffix rule.
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| HashMap::from([
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("media", "medium"),
    ("data", "datum"),
    ("went", "go"),
    ("goes", "go"),
    ("gone", "go"),
    ("did", "do"),
    ("does", "do"),
    ("done", "do"),
    ("said", "say"),
    ("says", "say"),
    ("made", "make"),
    ("took", "take"),
    ("taken", "take"),
    ("got", "get"),
    ("ran", "run"),
    ("came", "come"),
    ("saw", "see"),
    ("seen", "see"),
    ("told", "tell"),
    ("won", "win"),
    ("lost", "lose"),
]));

// Words a naive plural rule would mangle.
static KEEP_AS_IS: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "news", "series", "species", "always", "perhaps", "politics", "economics",
    "congress", "press", "less", "mass", "gas", "bus", "yes", "its", "ours",
    "theirs", "whereas", "besides", "sometimes", "texas", "vegas", "isis",
]));

/// Reduces a word to its dictionary base form: irregular-form lookup first,
/// then plural suffix rules. Unknown shapes pass through unchanged.
pub fn lemmatize(word: &str) -> String {
    if let Some(lemma) = IRREGULAR.get(word) {
        return (*lemma).to_owned();
    }

    if KEEP_AS_IS.contains(word) {
        return word.to_owned();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        if word.len() > 4 {
            return format!("{}y", stem);
        }
    }

    if word.ends_with("sses") || word.ends_with("xes") || word.ends_with("ches")
        || word.ends_with("shes") || word.ends_with("zes") {
        return word[..word.len() - 2].to_owned();
    }

    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is") {
        return word[..word.len() - 1].to_owned();
    }

    word.to_owned()
}
