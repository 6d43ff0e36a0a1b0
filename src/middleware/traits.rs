use async_trait::async_trait;
use crate::protocol::{BoxError, Response, ResponseView, Scope};

/// 흐름이 코디네이터에 제어를 넘길 때의 상태
#[derive(Debug)]
pub enum Suspension {
    /// 값 없이 중단됨
    Pending,
    /// 응답을 내놓고 중단됨
    Yielded(Response),
    /// 흐름이 종료됨
    Terminated,
}

/// 요청 하나에 대한 디스패치 흐름
///
/// 흐름은 최대 두 번 재개됩니다.
/// 1. `start`: 애플리케이션 호출 전. 정확히 한 번 중단해야 하며 조기 응답을 내놓을 수 있습니다.
/// 2. `resume_with_response` 또는 `resume_with_error`: 이후 흐름은 반드시 종료해야 합니다.
///
/// `Err`는 흐름이 에러를 던졌다는 뜻입니다. 주입된 에러를 다시 던지는 경우도 포함합니다.
#[async_trait]
pub trait Flow: Send {
    async fn start(&mut self, scope: &Scope) -> Result<Suspension, BoxError>;

    async fn resume_with_response(&mut self, view: &mut ResponseView) -> Result<Suspension, BoxError>;

    async fn resume_with_error(&mut self, error: BoxError) -> Result<Suspension, BoxError>;

    /// 흐름이 잡고 있는 자원을 해제합니다. 요청마다 정확히 한 번 호출됩니다.
    fn close(&mut self) {}
}

/// 요청마다 새 흐름을 생성합니다.
pub trait Dispatch: Send + Sync {
    fn make_flow(&self, scope: &Scope) -> Box<dyn Flow>;
}

impl<F> Dispatch for F
where
    F: Fn(&Scope) -> Box<dyn Flow> + Send + Sync,
{
    fn make_flow(&self, scope: &Scope) -> Box<dyn Flow> {
        self(scope)
    }
}
