//! 경로 차단 흐름
//!
//! 차단된 경로 접두사로 들어온 요청에 애플리케이션 호출 없이 조기 응답을 반환합니다.

mod config;
mod flow;

pub use config::PathGuardConfig;
pub use flow::PathGuardFlow;
