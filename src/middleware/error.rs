/// 디스패치 프로토콜 위반
///
/// 모두 흐름이나 내부 애플리케이션의 버그를 뜻하므로 재시도 대상이 아닙니다.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("dispatch flow must suspend exactly once before the response starts")]
    NoInitialSuspension,

    #[error("dispatch flow suspended again after the response started")]
    MultipleSuspensions,

    #[error("no response was produced by the inner application")]
    NoResponse,

    #[error("dispatch flow handled error `{error}` but returned no response")]
    ErrorSwallowed { error: String },
}

/// 흐름 설정 오류
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("잘못된 헤더: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
