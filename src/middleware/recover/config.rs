use serde::{Deserialize, Serialize};
use hyper::StatusCode;
use crate::middleware::FlowError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecoverFormat {
    #[default]
    Text,
    Json,
}

/// 에러 복구 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoverConfig {
    /// 복구 응답 상태 코드 (기본값: 500)
    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default)]
    pub format: RecoverFormat,

    /// 에러 메시지를 응답 본문에 포함할지 여부
    #[serde(default)]
    pub expose_errors: bool,
}

fn default_status() -> u16 { 500 }

impl Default for RecoverConfig {
    fn default() -> Self {
        Self {
            status: default_status(),
            format: RecoverFormat::default(),
            expose_errors: false,
        }
    }
}

impl RecoverConfig {
    pub fn validate(&self) -> Result<StatusCode, FlowError> {
        StatusCode::from_u16(self.status)
            .map_err(|_| FlowError::Config(format!("잘못된 상태 코드: {}", self.status)))
    }
}
