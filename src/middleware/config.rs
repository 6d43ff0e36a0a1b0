use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 내장 흐름 종류
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FlowType {
    Headers,
    PathGuard,
    Recover,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// 흐름 타입
    pub flow_type: FlowType,

    /// 흐름 활성화 여부
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// 실행 순서 (낮은 숫자가 바깥 계층)
    #[serde(default)]
    pub order: i32,

    /// 흐름별 설정
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

impl FlowConfig {
    pub fn new(flow_type: FlowType) -> Self {
        Self {
            flow_type,
            enabled: true,
            order: 0,
            settings: HashMap::new(),
        }
    }

    /// 흐름별 설정을 구체적인 설정 타입으로 변환합니다.
    pub fn settings_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let value = serde_json::Value::Object(
            self.settings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );
        serde_json::from_value(value)
    }

    /// TOML 설정에서 흐름 설정을 파싱합니다.
    pub fn from_toml(config: &str) -> Result<HashMap<String, Self>, toml::de::Error> {
        #[derive(Deserialize)]
        struct Config {
            #[serde(default)]
            flows: HashMap<String, FlowConfig>,
        }

        let config: Config = toml::from_str(config)?;
        Ok(config.flows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::path_guard::PathGuardConfig;

    #[test]
    fn test_parse_toml_config() {
        let toml_str = r#"
            [flows.admin-block]
            flow_type = "path-guard"
            order = 1

            [flows.admin-block.settings]
            prefixes = ["/admin"]
            status = 404
        "#;

        let configs = FlowConfig::from_toml(toml_str).unwrap();
        assert_eq!(configs.len(), 1);

        let config = configs.get("admin-block").unwrap();
        assert_eq!(config.flow_type, FlowType::PathGuard);
        assert!(config.enabled);
        assert_eq!(config.order, 1);

        let guard: PathGuardConfig = config.settings_as().unwrap();
        assert_eq!(guard.prefixes, vec!["/admin".to_string()]);
        assert_eq!(guard.status, 404);
        assert_eq!(guard.message, "Forbidden");
    }

    #[test]
    fn test_unknown_flow_type_rejected() {
        let toml_str = r#"
            [flows.cors]
            flow_type = "cors"
        "#;

        assert!(FlowConfig::from_toml(toml_str).is_err());
    }
}
