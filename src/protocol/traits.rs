use std::sync::Arc;
use async_trait::async_trait;
use super::{Message, Scope};

/// 애플리케이션 경계를 넘나드는 에러 타입
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 인바운드 메시지 공급자 (요청 바디 등)
#[async_trait]
pub trait MessageSource: Send {
    async fn receive(&mut self) -> Result<Message, BoxError>;
}

/// 아웃바운드 메시지 소비자
#[async_trait]
pub trait MessageSink: Send {
    async fn send(&mut self, message: Message) -> Result<(), BoxError>;
}

/// 내부 애플리케이션 호출 인터페이스
///
/// 미들웨어도 같은 트레이트를 구현하므로 여러 계층을 겹쳐 쌓을 수 있습니다.
#[async_trait]
pub trait Application: Send + Sync {
    async fn call(
        &self,
        scope: &Scope,
        source: &mut dyn MessageSource,
        sink: &mut dyn MessageSink,
    ) -> Result<(), BoxError>;
}

#[async_trait]
impl<A: Application + ?Sized> Application for Arc<A> {
    async fn call(
        &self,
        scope: &Scope,
        source: &mut dyn MessageSource,
        sink: &mut dyn MessageSink,
    ) -> Result<(), BoxError> {
        (**self).call(scope, source, sink).await
    }
}

#[async_trait]
impl<A: Application + ?Sized> Application for Box<A> {
    async fn call(
        &self,
        scope: &Scope,
        source: &mut dyn MessageSource,
        sink: &mut dyn MessageSink,
    ) -> Result<(), BoxError> {
        (**self).call(scope, source, sink).await
    }
}
