//! 헤더 수정 흐름
//!
//! 응답 시작 직전에 응답 헤더를 덮어씁니다.

mod config;
mod flow;

pub use config::HeadersConfig;
pub use flow::HeadersFlow;
