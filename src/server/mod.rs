//! hyper 기반 전송 계층 브리지
//!
//! HTTP 파싱과 연결 관리는 hyper가 담당하고, 이 모듈은 요청/응답을 메시지 프로토콜로 변환만 합니다.

pub mod body;
pub mod error;
pub mod handler;
pub mod listener;

pub use body::{BodySource, ResponseCollector};
pub use error::BridgeError;
pub use handler::RequestHandler;
pub use listener::ServerListener;
