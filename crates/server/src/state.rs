use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use std::sync::Arc;
use textlens::{Analyzer, TextlensConfig};

/// Shared application state
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Every analysis stage, built once at startup
    pub analyzer: Arc<Analyzer>,
}

impl ServerState {
    /// Builds the analyzer from `config.pipeline_config`, or from built-in
    /// defaults when no pipeline file is set.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let mut pipeline = match &config.pipeline_config {
            Some(path) => TextlensConfig::from_file(path).map_err(|e| {
                ServerError::Config(format!("{}: {e}", path.display()))
            })?,
            None => TextlensConfig::default(),
        };
        pipeline.apply_env();

        let analyzer = Analyzer::from_config(&pipeline)?;
        Ok(Self::with_analyzer(config, analyzer))
    }

    /// State around an already built analyzer.
    pub fn with_analyzer(config: ServerConfig, analyzer: Analyzer) -> Self {
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_state_builds_offline() {
        let state = ServerState::new(ServerConfig::default()).unwrap();
        assert_eq!(state.analyzer.component_status().summarizer, "fallback");
    }

    #[test]
    fn pipeline_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"version: \"1.0\"\nlexicon:\n  - name: Cooking\n    triggers: [oven]\n",
        )
        .unwrap();
        let config = ServerConfig {
            pipeline_config: Some(file.path().to_path_buf()),
            ..ServerConfig::default()
        };
        let state = ServerState::new(config).unwrap();
        assert_eq!(state.analyzer.categories(), vec!["Cooking", "Other"]);
    }

    #[test]
    fn missing_pipeline_file_is_a_config_error() {
        let config = ServerConfig {
            pipeline_config: Some("/nonexistent/textlens.yaml".into()),
            ..ServerConfig::default()
        };
        assert!(matches!(
            ServerState::new(config),
            Err(ServerError::Config(_))
        ));
    }
}
