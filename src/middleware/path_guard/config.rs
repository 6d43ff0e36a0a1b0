use serde::{Deserialize, Serialize};
use hyper::StatusCode;
use crate::middleware::FlowError;

/// 경로 차단 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathGuardConfig {
    /// 차단할 경로 접두사
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// 차단 시 응답 상태 코드 (기본값: 403)
    #[serde(default = "default_status")]
    pub status: u16,

    /// 차단 시 응답 본문
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_status() -> u16 { 403 }
fn default_message() -> String { "Forbidden".to_string() }

impl Default for PathGuardConfig {
    fn default() -> Self {
        Self {
            prefixes: Vec::new(),
            status: default_status(),
            message: default_message(),
        }
    }
}

impl PathGuardConfig {
    pub fn validate(&self) -> Result<StatusCode, FlowError> {
        if let Some(prefix) = self.prefixes.iter().find(|p| !p.starts_with('/')) {
            return Err(FlowError::Config(format!(
                "경로 접두사는 '/'로 시작해야 합니다: {}",
                prefix
            )));
        }

        StatusCode::from_u16(self.status)
            .map_err(|_| FlowError::Config(format!("잘못된 상태 코드: {}", self.status)))
    }
}
