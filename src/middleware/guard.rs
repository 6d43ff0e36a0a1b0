use std::ops::{Deref, DerefMut};
use tracing::trace;
use super::Flow;

/// 흐름 소유권을 가진 가드
///
/// 드롭될 때 `Flow::close`를 정확히 한 번 호출합니다.
/// 상위 태스크가 취소되어 future가 중간에 드롭되어도 마찬가지입니다.
pub struct FlowGuard {
    flow: Box<dyn Flow>,
    closed: bool,
}

impl FlowGuard {
    pub fn new(flow: Box<dyn Flow>) -> Self {
        Self { flow, closed: false }
    }

    /// 흐름을 즉시 닫습니다. 이미 닫혔다면 아무것도 하지 않습니다.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.flow.close();
            trace!("dispatch flow closed");
        }
    }
}

impl Deref for FlowGuard {
    type Target = dyn Flow;

    fn deref(&self) -> &Self::Target {
        self.flow.as_ref()
    }
}

impl DerefMut for FlowGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.flow.as_mut()
    }
}

impl Drop for FlowGuard {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Suspension;
    use crate::protocol::{BoxError, ResponseView, Scope};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingFlow(Arc<AtomicUsize>);

    #[async_trait]
    impl Flow for CountingFlow {
        async fn start(&mut self, _scope: &Scope) -> Result<Suspension, BoxError> {
            Ok(Suspension::Pending)
        }

        async fn resume_with_response(&mut self, _view: &mut ResponseView) -> Result<Suspension, BoxError> {
            Ok(Suspension::Terminated)
        }

        async fn resume_with_error(&mut self, error: BoxError) -> Result<Suspension, BoxError> {
            Err(error)
        }

        fn close(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_close_runs_once() {
        let closes = Arc::new(AtomicUsize::new(0));
        let mut guard = FlowGuard::new(Box::new(CountingFlow(closes.clone())));

        guard.close();
        guard.close();
        drop(guard);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_closes_flow() {
        let closes = Arc::new(AtomicUsize::new(0));
        drop(FlowGuard::new(Box::new(CountingFlow(closes.clone()))));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
