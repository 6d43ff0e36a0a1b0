use tracing::{error, info, warn, Level, span};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use crate::protocol::{BoxError, Scope};
use crate::settings::{LogFormat, LogSettings};

/// 로깅을 초기화합니다. `RUST_LOG`가 설정되어 있으면 설정 파일의 레벨보다 우선합니다.
pub fn init_logging(settings: &LogSettings) -> Result<(), BoxError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.level).into())
        .from_env_lossy();

    let result = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .try_init(),
    };

    result.map_err(|e| e.into())
}

#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl RequestLog {
    pub fn new(scope: &Scope) -> Self {
        Self {
            request_id: scope.request_id.clone(),
            method: scope.method.to_string(),
            path: scope.path.clone(),
            status_code: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
    }

    pub fn with_duration(&mut self, elapsed: std::time::Duration) {
        self.duration_ms = elapsed.as_millis() as u64;
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }
}

pub fn log_request(log: &RequestLog) {
    let span = span!(
        Level::INFO,
        "request",
        request_id = %log.request_id,
        method = %log.method,
        path = %log.path,
        status = %log.status_code,
        duration_ms = %log.duration_ms
    );
    let _enter = span.enter();

    if let Some(error) = &log.error {
        error!(error = %error, "Request failed");
    } else if log.status_code >= 400 {
        warn!("Request completed with warning");
    } else {
        info!("Request completed successfully");
    }
}
