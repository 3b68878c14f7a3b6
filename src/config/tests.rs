#[cfg(test)]
mod tests {
    use crate::config::{Config, HttpConfig, LLMConfig, LLMProvider, SearchConfig};
    use crate::error::ConfigError;
    use crate::types::SearchDepth;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.search.api_url = "https://search.example.com/search".to_string();
        config.search.api_key = "search-key".to_string();
        config.llm.api_key = "llm-key".to_string();
        config
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.output_path, PathBuf::from("./reports"));
        assert!(!config.save_evidence);
        assert!(!config.verbose);
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();

        assert!(config.api_url.is_empty());
        assert!(config.api_key.is_empty());
        assert_eq!(config.search_depth, SearchDepth::Advanced);
        assert_eq!(config.max_results, 5);
        assert_eq!(
            config.include_domains,
            vec!["sec.gov", "investor.*", "finance.*"]
        );
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::DeepSeek);
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(
            config.resolved_api_url(),
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn test_http_config_default() {
        let config = HttpConfig::default();

        assert_eq!(config.connect_timeout_seconds, 30);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!(
            "deepseek".parse::<LLMProvider>().unwrap(),
            LLMProvider::DeepSeek
        );
        assert_eq!("OpenAI".parse::<LLMProvider>().unwrap(), LLMProvider::OpenAI);
        assert_eq!(
            "moonshot".parse::<LLMProvider>().unwrap(),
            LLMProvider::Moonshot
        );
        assert_eq!(
            "openrouter".parse::<LLMProvider>().unwrap(),
            LLMProvider::OpenRouter
        );
        assert_eq!("ollama".parse::<LLMProvider>().unwrap(), LLMProvider::Ollama);

        assert!("invalid".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display() {
        assert_eq!(LLMProvider::DeepSeek.to_string(), "deepseek");
        assert_eq!(LLMProvider::OpenAI.to_string(), "openai");
        assert_eq!(LLMProvider::Moonshot.to_string(), "moonshot");
        assert_eq!(LLMProvider::OpenRouter.to_string(), "openrouter");
        assert_eq!(LLMProvider::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_explicit_api_url_wins_over_provider_default() {
        let mut config = LLMConfig::default();
        config.api_url = "https://proxy.internal/v1/chat/completions".to_string();
        assert_eq!(
            config.resolved_api_url(),
            "https://proxy.internal/v1/chat/completions"
        );
    }

    #[test]
    fn test_from_file_partial_sections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finreport.toml");
        fs::write(
            &path,
            r#"
output_path = "/tmp/out"

[search]
api_url = "https://api.tavily.com/search"
max_results = 8
include_domains = ["sec.gov", "nasdaq.com"]

[llm]
provider = "openai"
model = "gpt-4o-mini"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.output_path, PathBuf::from("/tmp/out"));
        assert_eq!(config.search.api_url, "https://api.tavily.com/search");
        assert_eq!(config.search.max_results, 8);
        assert_eq!(config.search.include_domains, vec!["sec.gov", "nasdaq.com"]);
        assert_eq!(config.search.search_depth, SearchDepth::Advanced);
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_file(&temp_dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[search\napi_url = ").unwrap();

        let result = Config::from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "save_evidence = true\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert!(config.save_evidence);
    }

    #[test]
    fn test_apply_env_primary_names() {
        let mut config = Config::default();
        config.apply_env_with(env_of(&[
            ("SEARCH_API_URL", "https://search.example.com"),
            ("SEARCH_API_KEY", "s-key"),
            ("LLM_API_URL", "https://llm.example.com/chat/completions"),
            ("LLM_API_KEY", "l-key"),
            ("LLM_MODEL", "deepseek-reasoner"),
        ]));

        assert_eq!(config.search.api_url, "https://search.example.com");
        assert_eq!(config.search.api_key, "s-key");
        assert_eq!(config.llm.api_url, "https://llm.example.com/chat/completions");
        assert_eq!(config.llm.api_key, "l-key");
        assert_eq!(config.llm.model, "deepseek-reasoner");
    }

    #[test]
    fn test_apply_env_fallback_names() {
        let mut config = Config::default();
        config.apply_env_with(env_of(&[
            ("TAVILY_API_URL", "https://api.tavily.com/search"),
            ("TAVILY_API_KEY", "tvly-key"),
            ("DEEPSEEK_API_URL", "https://api.deepseek.com/chat/completions"),
            ("DEEPSEEK_API_KEY", "ds-key"),
        ]));

        assert_eq!(config.search.api_url, "https://api.tavily.com/search");
        assert_eq!(config.search.api_key, "tvly-key");
        assert_eq!(config.llm.api_key, "ds-key");
    }

    #[test]
    fn test_apply_env_primary_beats_fallback_and_blank_is_ignored() {
        let mut config = Config::default();
        config.search.api_key = "from-file".to_string();
        config.apply_env_with(env_of(&[
            ("SEARCH_API_URL", "https://primary"),
            ("TAVILY_API_URL", "https://fallback"),
            ("SEARCH_API_KEY", "   "),
        ]));

        assert_eq!(config.search.api_url, "https://primary");
        assert_eq!(config.search.api_key, "from-file");
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(valid_config().validate(), Ok(()));
    }

    #[test]
    fn test_validate_missing_settings() {
        let mut config = valid_config();
        config.search.api_url.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingSetting("search.api_url"))
        );

        let mut config = valid_config();
        config.search.api_key.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingSetting("search.api_key"))
        );

        let mut config = valid_config();
        config.llm.api_key.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingSetting("llm.api_key"))
        );
    }

    #[test]
    fn test_validate_ollama_needs_no_key() {
        let mut config = valid_config();
        config.llm.provider = LLMProvider::Ollama;
        config.llm.api_key.clear();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut config = valid_config();
        config.search.max_results = 11;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaxResultsOutOfRange(11))
        );

        let mut config = valid_config();
        config.llm.temperature = 3.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "llm.temperature",
                ..
            })
        ));

        let mut config = valid_config();
        config.http.timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "http", .. })
        ));
    }

    #[test]
    fn test_report_options_from_config() {
        let mut config = valid_config();
        config.search.max_results = 3;
        config.search.include_domains = vec!["sec.gov".to_string()];

        let options = config.report_options();
        assert_eq!(options.max_results, 3);
        assert_eq!(options.include_domains, vec!["sec.gov"]);
    }
}
