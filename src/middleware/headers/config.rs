use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use hyper::header::{HeaderName, HeaderValue};
use crate::middleware::FlowError;

/// 헤더 흐름 설정
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeadersConfig {
    /// 응답에 덮어쓸 헤더
    #[serde(default)]
    pub set: HashMap<String, String>,

    /// 기본 보안 헤더 적용 여부
    #[serde(default)]
    pub security_headers: bool,

    /// 요청 ID를 응답에 실어 보낼 헤더 이름
    #[serde(default)]
    pub request_id_header: Option<String>,
}

impl HeadersConfig {
    /// 문자열 설정을 검증된 헤더 쌍으로 변환합니다.
    pub fn parsed_headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>, FlowError> {
        let mut headers: Vec<_> = self
            .set
            .iter()
            .map(|(name, value)| parse_header(name, value))
            .collect::<Result<_, _>>()?;
        headers.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        Ok(headers)
    }

    pub fn parsed_request_id_header(&self) -> Result<Option<HeaderName>, FlowError> {
        self.request_id_header
            .as_deref()
            .map(|name| {
                HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| FlowError::InvalidHeader(format!("{}: {}", name, e)))
            })
            .transpose()
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), FlowError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| FlowError::InvalidHeader(format!("{}: {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| FlowError::InvalidHeader(format!("{}={}: {}", name, value, e)))?;
    Ok((header_name, header_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_header_name_rejected() {
        let mut config = HeadersConfig::default();
        config.set.insert("bad header".to_string(), "x".to_string());
        assert!(matches!(config.parsed_headers(), Err(FlowError::InvalidHeader(_))));
    }

    #[test]
    fn test_from_toml() {
        let config: HeadersConfig = toml::from_str(
            r#"
            security_headers = true
            request_id_header = "X-Request-ID"

            [set]
            "X-Powered-By" = "flow"
            "#,
        )
        .unwrap();

        let headers = config.parsed_headers().unwrap();
        assert_eq!(headers[0].0.as_str(), "x-powered-by");
        assert_eq!(
            config.parsed_request_id_header().unwrap().unwrap().as_str(),
            "x-request-id"
        );
        assert!(config.security_headers);
    }
}
