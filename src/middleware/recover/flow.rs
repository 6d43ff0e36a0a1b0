use std::sync::Arc;
use async_trait::async_trait;
use hyper::StatusCode;
use serde::Serialize;
use tracing::warn;
use crate::middleware::{Dispatch, Flow, FlowError, FlowHooks, StagedFlow};
use crate::protocol::{BoxError, Response, Scope};
use super::config::{RecoverConfig, RecoverFormat};

#[derive(Debug)]
struct RecoverRules {
    status: StatusCode,
    format: RecoverFormat,
    expose_errors: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: u16,
    error: &'a str,
    request_id: Option<&'a str>,
}

/// 에러 복구 흐름 디스패처
#[derive(Debug, Clone)]
pub struct RecoverFlow {
    rules: Arc<RecoverRules>,
}

impl RecoverFlow {
    pub fn new(config: RecoverConfig) -> Result<Self, FlowError> {
        Ok(Self {
            rules: Arc::new(RecoverRules {
                status: config.validate()?,
                format: config.format,
                expose_errors: config.expose_errors,
            }),
        })
    }
}

impl Dispatch for RecoverFlow {
    fn make_flow(&self, _scope: &Scope) -> Box<dyn Flow> {
        StagedFlow::boxed(RecoverHooks {
            rules: self.rules.clone(),
            request_id: None,
        })
    }
}

struct RecoverHooks {
    rules: Arc<RecoverRules>,
    request_id: Option<String>,
}

impl RecoverHooks {
    fn error_response(&self, error: &BoxError) -> Result<Response, BoxError> {
        let status = self.rules.status;
        let message = if self.rules.expose_errors {
            error.to_string()
        } else {
            status.canonical_reason().unwrap_or("Error").to_string()
        };

        match self.rules.format {
            RecoverFormat::Text => Ok(Response::text(status, message)),
            RecoverFormat::Json => {
                let body = ErrorBody {
                    status: status.as_u16(),
                    error: &message,
                    request_id: self.request_id.as_deref(),
                };
                Ok(Response::json(status, &body)?)
            }
        }
    }
}

#[async_trait]
impl FlowHooks for RecoverHooks {
    async fn before(&mut self, scope: &Scope) -> Result<Option<Response>, BoxError> {
        self.request_id = Some(scope.request_id.clone());
        Ok(None)
    }

    async fn on_error(&mut self, error: BoxError) -> Result<Option<Response>, BoxError> {
        warn!(
            request_id = ?self.request_id,
            error = %error,
            "애플리케이션 에러 복구"
        );
        self.error_response(&error).map(Some)
    }
}
