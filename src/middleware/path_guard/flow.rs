use std::sync::Arc;
use async_trait::async_trait;
use hyper::StatusCode;
use tracing::debug;
use crate::middleware::{Dispatch, Flow, FlowError, FlowHooks, StagedFlow};
use crate::protocol::{BoxError, Response, Scope};
use super::config::PathGuardConfig;

#[derive(Debug)]
struct GuardRules {
    prefixes: Vec<String>,
    status: StatusCode,
    message: String,
}

impl GuardRules {
    fn blocks(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// 경로 차단 흐름 디스패처
#[derive(Debug, Clone)]
pub struct PathGuardFlow {
    rules: Arc<GuardRules>,
}

impl PathGuardFlow {
    pub fn new(config: PathGuardConfig) -> Result<Self, FlowError> {
        let status = config.validate()?;
        Ok(Self {
            rules: Arc::new(GuardRules {
                prefixes: config.prefixes,
                status,
                message: config.message,
            }),
        })
    }
}

impl Dispatch for PathGuardFlow {
    fn make_flow(&self, _scope: &Scope) -> Box<dyn Flow> {
        StagedFlow::boxed(PathGuardHooks {
            rules: self.rules.clone(),
        })
    }
}

struct PathGuardHooks {
    rules: Arc<GuardRules>,
}

#[async_trait]
impl FlowHooks for PathGuardHooks {
    async fn before(&mut self, scope: &Scope) -> Result<Option<Response>, BoxError> {
        if !self.rules.blocks(&scope.path) {
            return Ok(None);
        }

        debug!(request_id = %scope.request_id, path = %scope.path, "차단된 경로 요청");
        Ok(Some(Response::text(self.rules.status, self.rules.message.clone())))
    }
}
