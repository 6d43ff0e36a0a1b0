use std::sync::Arc;
use async_trait::async_trait;
use hyper::header::{HeaderName, HeaderValue};
use tracing::debug;
use crate::middleware::{Dispatch, Flow, FlowError, FlowHooks, StagedFlow};
use crate::protocol::{BoxError, Response, ResponseView, Scope};
use super::config::HeadersConfig;

#[derive(Debug)]
struct HeaderRules {
    set: Vec<(HeaderName, HeaderValue)>,
    security_headers: bool,
    request_id_header: Option<HeaderName>,
}

/// 응답 헤더를 수정하는 흐름 디스패처
#[derive(Debug, Clone)]
pub struct HeadersFlow {
    rules: Arc<HeaderRules>,
}

impl HeadersFlow {
    pub fn new(config: HeadersConfig) -> Result<Self, FlowError> {
        Ok(Self {
            rules: Arc::new(HeaderRules {
                set: config.parsed_headers()?,
                security_headers: config.security_headers,
                request_id_header: config.parsed_request_id_header()?,
            }),
        })
    }
}

impl Dispatch for HeadersFlow {
    fn make_flow(&self, _scope: &Scope) -> Box<dyn Flow> {
        StagedFlow::boxed(HeadersHooks {
            rules: self.rules.clone(),
            request_id: None,
        })
    }
}

struct HeadersHooks {
    rules: Arc<HeaderRules>,
    request_id: Option<String>,
}

impl HeadersHooks {
    /// 기본 보안 헤더를 설정합니다.
    fn apply_security_headers(view: &mut ResponseView) {
        let headers = view.headers_mut();
        headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
        headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
        headers.insert(
            "strict-transport-security",
            HeaderValue::from_static("max-age=31536000"),
        );
    }
}

#[async_trait]
impl FlowHooks for HeadersHooks {
    async fn before(&mut self, scope: &Scope) -> Result<Option<Response>, BoxError> {
        self.request_id = Some(scope.request_id.clone());
        Ok(None)
    }

    async fn after(&mut self, view: &mut ResponseView) -> Result<(), BoxError> {
        if self.rules.security_headers {
            Self::apply_security_headers(view);
        }

        for (name, value) in &self.rules.set {
            view.headers_mut().insert(name.clone(), value.clone());
        }

        if let (Some(name), Some(id)) = (&self.rules.request_id_header, &self.request_id) {
            view.headers_mut().insert(name.clone(), HeaderValue::from_str(id)?);
        }

        debug!(status = %view.status(), headers = ?view.headers(), "응답 헤더 설정 완료");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Suspension;
    use hyper::{Method, StatusCode};

    #[tokio::test]
    async fn test_sets_configured_headers() {
        let mut config = HeadersConfig {
            security_headers: true,
            request_id_header: Some("x-request-id".to_string()),
            ..Default::default()
        };
        config.set.insert("X-Custom-Header".to_string(), "value".to_string());

        let dispatch = HeadersFlow::new(config).unwrap();
        let scope = Scope::http(Method::GET, "/").with_request_id("req-1");
        let mut flow = dispatch.make_flow(&scope);

        assert!(matches!(flow.start(&scope).await.unwrap(), Suspension::Pending));

        let mut view = ResponseView::new(StatusCode::OK);
        flow.resume_with_response(&mut view).await.unwrap();

        assert_eq!(view.headers()["x-custom-header"], "value");
        assert_eq!(view.headers()["x-frame-options"], "DENY");
        assert_eq!(view.headers()["x-request-id"], "req-1");
    }
}
