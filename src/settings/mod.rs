use std::{collections::HashMap, env, fs, path::Path};
use serde::Deserialize;
use tracing::debug;
use crate::middleware::{FlowConfig, FlowError, FlowType};
use crate::middleware::headers::HeadersConfig;
use crate::middleware::path_guard::PathGuardConfig;
use crate::middleware::recover::RecoverConfig;

mod error;
pub mod logging;
mod server;

pub use error::SettingsError;
pub use logging::{LogFormat, LogSettings};
pub use server::{parse_env_var, ServerSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    // 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 흐름 설정
    #[serde(default)]
    pub flows: HashMap<String, FlowConfig>,
}

impl Settings {
    pub async fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("FLOW_CONFIG_FILE") {
            Self::from_toml_file(&config_path).await
        } else {
            Self::from_env().await
        }
    }

    pub async fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("설정 파일 로드: {}", path.as_ref().display());
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        Self::from_toml_str(&content).await
    }

    pub async fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate().await?;
        Ok(settings)
    }

    pub async fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            flows: HashMap::new(),
        };

        // 설정 생성 시점에 바로 검증
        settings.validate().await?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub async fn validate(&self) -> Result<()> {
        self.server.validate()?;

        for (name, flow) in &self.flows {
            if flow.enabled {
                Self::validate_flow(flow).map_err(|e| {
                    SettingsError::InvalidConfig(format!("flow {}: {}", name, e))
                })?;
            }
        }

        Ok(())
    }

    fn validate_flow(flow: &FlowConfig) -> std::result::Result<(), FlowError> {
        match flow.flow_type {
            FlowType::Headers => {
                let config: HeadersConfig = flow.settings_as()?;
                config.parsed_headers()?;
                config.parsed_request_id_header()?;
            }
            FlowType::PathGuard => {
                let config: PathGuardConfig = flow.settings_as()?;
                config.validate()?;
            }
            FlowType::Recover => {
                let config: RecoverConfig = flow.settings_as()?;
                config.validate()?;
            }
        }
        Ok(())
    }
}
