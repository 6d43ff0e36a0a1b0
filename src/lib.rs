//! Flow Dispatch는 하나의 흐름 함수로 HTTP 미들웨어를 작성할 수 있게 해주는 라이브러리입니다.
//!
//! # 주요 기능
//!
//! - 애플리케이션 호출 전 처리 및 조기 응답
//! - 응답 전송 직전 상태 코드 확인과 헤더 수정
//! - 응답 시작 전에 발생한 애플리케이션 에러 복구
//!
//! # 예제
//!
//! ```
//! use flow_dispatch::middleware::{FlowHooks, HttpMiddleware, StagedFlow};
//! use flow_dispatch::protocol::{
//!     Application, BoxError, MessageSink, MessageSource, Response, ResponseView, Scope,
//! };
//! use async_trait::async_trait;
//! use hyper::header::HeaderValue;
//! use hyper::StatusCode;
//!
//! struct Hello;
//!
//! #[async_trait]
//! impl Application for Hello {
//!     async fn call(
//!         &self,
//!         _scope: &Scope,
//!         _source: &mut dyn MessageSource,
//!         sink: &mut dyn MessageSink,
//!     ) -> Result<(), BoxError> {
//!         Response::text(StatusCode::OK, "hello").send(sink).await
//!     }
//! }
//!
//! struct PoweredBy;
//!
//! #[async_trait]
//! impl FlowHooks for PoweredBy {
//!     async fn after(&mut self, view: &mut ResponseView) -> Result<(), BoxError> {
//!         view.headers_mut().insert("x-powered-by", HeaderValue::from_static("flow"));
//!         Ok(())
//!     }
//! }
//!
//! let app = HttpMiddleware::new(Hello, |_: &Scope| StagedFlow::boxed(PoweredBy));
//! # let _ = app;
//! ```

pub mod logging;
pub mod middleware;
pub mod protocol;
pub mod server;
pub mod settings;
