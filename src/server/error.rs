/// 전송 계층 브리지 에러
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("response body sent before response start")]
    NotStarted,

    #[error("response already started")]
    AlreadyStarted,

    #[error("response already complete")]
    AlreadyComplete,

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Hyper(#[from] hyper::Error),
}
