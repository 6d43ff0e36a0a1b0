//! 전송 계층과 애플리케이션 사이의 최소 비동기 메시지 프로토콜

mod headers;
mod message;
mod response;
mod scope;
mod traits;

pub use headers::HeaderList;
pub use message::Message;
pub use response::{Response, ResponseView};
pub use scope::{Scope, ScopeKind};
pub use traits::{Application, BoxError, MessageSink, MessageSource};
