use async_trait::async_trait;
use crate::protocol::{BoxError, Response, ResponseView, Scope};
use super::{Flow, Suspension};

/// 전/후/에러 단계를 나눠서 작성하는 흐름 인터페이스
///
/// `StagedFlow`로 감싸면 두 번 중단하는 `Flow` 계약을 자동으로 지킵니다.
#[async_trait]
pub trait FlowHooks: Send {
    /// 애플리케이션 호출 전에 실행됩니다. `Some`을 반환하면 조기 응답이 됩니다.
    async fn before(&mut self, _scope: &Scope) -> Result<Option<Response>, BoxError> {
        Ok(None)
    }

    /// 응답 시작 직전에 상태 코드를 확인하고 헤더를 추가합니다.
    async fn after(&mut self, _view: &mut ResponseView) -> Result<(), BoxError> {
        Ok(())
    }

    /// 응답 시작 전에 발생한 애플리케이션 에러를 처리합니다.
    /// 기본 구현은 에러를 그대로 다시 던집니다.
    async fn on_error(&mut self, error: BoxError) -> Result<Option<Response>, BoxError> {
        Err(error)
    }

    fn cleanup(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Created,
    Parked,
    Finished,
}

/// `FlowHooks`를 `Flow`로 변환하는 어댑터
pub struct StagedFlow<H> {
    hooks: H,
    stage: Stage,
}

impl<H: FlowHooks> StagedFlow<H> {
    pub fn new(hooks: H) -> Self {
        Self {
            hooks,
            stage: Stage::Created,
        }
    }

    pub fn boxed(hooks: H) -> Box<dyn Flow>
    where
        H: 'static,
    {
        Box::new(Self::new(hooks))
    }
}

#[async_trait]
impl<H: FlowHooks> Flow for StagedFlow<H> {
    async fn start(&mut self, scope: &Scope) -> Result<Suspension, BoxError> {
        if self.stage != Stage::Created {
            return Ok(Suspension::Terminated);
        }

        match self.hooks.before(scope).await {
            Ok(Some(response)) => {
                self.stage = Stage::Parked;
                Ok(Suspension::Yielded(response))
            }
            Ok(None) => {
                self.stage = Stage::Parked;
                Ok(Suspension::Pending)
            }
            Err(e) => {
                self.stage = Stage::Finished;
                Err(e)
            }
        }
    }

    async fn resume_with_response(&mut self, view: &mut ResponseView) -> Result<Suspension, BoxError> {
        if self.stage != Stage::Parked {
            return Ok(Suspension::Terminated);
        }
        self.stage = Stage::Finished;

        self.hooks.after(view).await?;
        Ok(Suspension::Terminated)
    }

    async fn resume_with_error(&mut self, error: BoxError) -> Result<Suspension, BoxError> {
        // 이미 종료된 흐름에 주입된 에러는 그대로 다시 던집니다.
        if self.stage != Stage::Parked {
            return Err(error);
        }
        self.stage = Stage::Finished;

        match self.hooks.on_error(error).await? {
            Some(response) => Ok(Suspension::Yielded(response)),
            None => Ok(Suspension::Terminated),
        }
    }

    fn close(&mut self) {
        self.stage = Stage::Finished;
        self.hooks.cleanup();
    }
}
