//! 에러 복구 흐름
//!
//! 응답 시작 전에 발생한 애플리케이션 에러를 에러 응답으로 변환합니다.

mod config;
mod flow;

pub use config::{RecoverConfig, RecoverFormat};
pub use flow::RecoverFlow;
