use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use crate::protocol::Application;
use super::headers::{HeadersConfig, HeadersFlow};
use super::path_guard::{PathGuardConfig, PathGuardFlow};
use super::recover::{RecoverConfig, RecoverFlow};
use super::{FlowConfig, FlowError, FlowType, HttpMiddleware};

/// 흐름 설정으로부터 애플리케이션을 한 계층 감쌉니다.
fn wrap_layer(
    app: Arc<dyn Application>,
    config: &FlowConfig,
) -> Result<Arc<dyn Application>, FlowError> {
    debug!("흐름 생성 시작: type={:?}, settings={:?}", config.flow_type, config.settings);

    let layer: Arc<dyn Application> = match config.flow_type {
        FlowType::Headers => {
            let headers_config: HeadersConfig = config.settings_as()?;
            Arc::new(HttpMiddleware::new(app, HeadersFlow::new(headers_config)?))
        }
        FlowType::PathGuard => {
            let guard_config: PathGuardConfig = config.settings_as()?;
            Arc::new(HttpMiddleware::new(app, PathGuardFlow::new(guard_config)?))
        }
        FlowType::Recover => {
            let recover_config: RecoverConfig = config.settings_as()?;
            Arc::new(HttpMiddleware::new(app, RecoverFlow::new(recover_config)?))
        }
    };
    Ok(layer)
}

/// 설정된 흐름들을 순서대로 쌓아 올리는 관리자
#[derive(Debug, Clone, Default)]
pub struct FlowManager {
    configs: Vec<(String, FlowConfig)>,
}

impl FlowManager {
    pub fn new(flow_configs: &HashMap<String, FlowConfig>) -> Self {
        let mut manager = Self::default();
        let configs: Vec<_> = flow_configs
            .iter()
            .map(|(name, config)| (name.clone(), config.clone()))
            .collect();
        manager.update_configs(&configs);
        manager
    }

    pub fn update_configs(&mut self, configs: &[(String, FlowConfig)]) {
        // 정렬을 위해 Vec으로 변환
        let mut ordered: Vec<_> = configs
            .iter()
            .filter(|(_, config)| config.enabled)
            .cloned()
            .collect();
        ordered.sort_by(|(a_name, a), (b_name, b)| a.order.cmp(&b.order).then(a_name.cmp(b_name)));

        self.configs = ordered;
    }

    /// 활성화된 흐름 이름을 바깥 계층부터 반환합니다.
    pub fn flow_names(&self) -> Vec<&str> {
        self.configs.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 내부 애플리케이션을 흐름 계층으로 감쌉니다.
    ///
    /// `order`가 가장 낮은 흐름이 가장 바깥에 위치합니다.
    /// 생성에 실패한 흐름은 로그를 남기고 건너뜁니다.
    pub fn build(&self, app: Arc<dyn Application>) -> Arc<dyn Application> {
        let mut stack = app;
        for (name, config) in self.configs.iter().rev() {
            match wrap_layer(stack.clone(), config) {
                Ok(layer) => {
                    debug!(flow = %name, "흐름 계층 추가");
                    stack = layer;
                }
                Err(e) => {
                    error!(flow = %name, error = %e, "흐름 생성 실패");
                    continue;
                }
            }
        }

        info!(flows = ?self.flow_names(), "흐름 스택 구성 완료");
        stack
    }
}
