//! 디스패치 흐름 미들웨어
//!
//! 요청 전 처리, 조기 응답, 응답 헤더 수정, 에러 복구를 하나의 흐름으로 작성할 수 있게 해줍니다.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod guard;
pub mod headers;
pub mod interceptor;
pub mod manager;
pub mod path_guard;
pub mod recover;
pub mod staged;
pub mod traits;

pub use config::{FlowConfig, FlowType};
pub use dispatch::HttpMiddleware;
pub use error::{DispatchError, FlowError};
pub use guard::FlowGuard;
pub use interceptor::ResponseInterceptor;
pub use manager::FlowManager;
pub use staged::{FlowHooks, StagedFlow};
pub use traits::{Dispatch, Flow, Suspension};
