use {
    std::fs::read_to_string,
    tracing::warn,
    serde::Deserialize,
};

#[derive(Deserialize, Debug)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub data: Option<DataConfig>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PipelineConfig {
    recompute: Option<bool>,
    persist_artifacts: Option<bool>,
    target_language: Option<String>,
    account_categories: Option<Vec<String>>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DataConfig {
    path_template: Option<String>,
    file_count: Option<u32>,
    processed_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            data: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            recompute: None,
            persist_artifacts: None,
            target_language: None,
            account_categories: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path_template: None,
            file_count: None,
            processed_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        read_to_string("./config.toml")
            .or_else(|_| read_to_string("/config/config.toml"))
            .map_err(|err| err.to_string())
            .and_then(|v| toml::from_str(&v).map_err(|err| err.to_string()))
            .unwrap_or_else(|err| {
                warn!("failed to read config: {}", err);
                Config::default()
            })
    }

    pub fn data(&self) -> DataConfig {
        self.data.as_ref().cloned().unwrap_or_default()
    }
}

impl PipelineConfig {
    pub fn recompute(&self) -> bool {
        self.recompute.unwrap_or(true)
    }

    pub fn persist_artifacts(&self) -> bool {
        self.persist_artifacts.unwrap_or(false)
    }

    pub fn target_language(&self) -> String {
        self.target_language.as_ref().cloned().unwrap_or("English".to_owned())
    }

    pub fn account_categories(&self) -> Vec<String> {
        self.account_categories.as_ref().cloned().unwrap_or_else(|| vec![
            "Fearmonger".to_owned(),
            "Commercial".to_owned(),
            "HashtagGamer".to_owned(),
            "LeftTroll".to_owned(),
            "NewsFeed".to_owned(),
            "RightTroll".to_owned(),
            "Unknown".to_owned(),
        ])
    }
}

impl DataConfig {
    pub fn path_template(&self) -> String {
        self.path_template.as_ref().cloned().unwrap_or("data/IRAhandle_tweets_".to_owned())
    }

    pub fn file_count(&self) -> u32 {
        self.file_count.unwrap_or(2)
    }

    pub fn processed_dir(&self) -> String {
        self.processed_dir.as_ref().cloned().unwrap_or("data/processed".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(r#"
[pipeline]
recompute = false
persist_artifacts = true
target_language = "English"
account_categories = ["LeftTroll", "RightTroll"]

[data]
path_template = "data/IRAhandle_tweets_"
file_count = 5
processed_dir = "data/processed"
"#).unwrap();

        assert!(!config.pipeline.recompute());
        assert!(config.pipeline.persist_artifacts());
        assert_eq!(config.pipeline.account_categories(), vec!["LeftTroll", "RightTroll"]);
        assert_eq!(config.data().file_count(), 5);
    }

    #[test]
    fn empty_pipeline_section_falls_back_to_defaults() {
        let config: Config = toml::from_str("[pipeline]\n").unwrap();

        assert!(config.pipeline.recompute());
        assert!(!config.pipeline.persist_artifacts());
        assert_eq!(config.pipeline.target_language(), "English");
        assert_eq!(config.pipeline.account_categories().len(), 7);
        assert_eq!(config.data().path_template(), "data/IRAhandle_tweets_");
    }
}
