use async_trait::async_trait;
use tracing::{debug, error, trace, warn};
use crate::protocol::{Application, BoxError, MessageSink, MessageSource, Scope};
use super::{Dispatch, DispatchError, FlowGuard, ResponseInterceptor, Suspension};

/// 디스패치 흐름 코디네이터
///
/// HTTP 요청마다 흐름을 하나 생성해 내부 애플리케이션과 같은 타임라인에서 구동합니다.
///
/// 1. 흐름을 첫 중단 지점까지 실행합니다. 응답을 내놓으면 조기 응답으로 전송하고 끝냅니다.
/// 2. 감싼 싱크로 애플리케이션을 호출합니다. 첫 응답 시작 메시지에서 흐름을 재개해 헤더를 병합합니다.
/// 3. 응답 시작 전에 애플리케이션이 실패하면 흐름에 에러를 주입해 복구 응답을 시도합니다.
///
/// HTTP가 아닌 요청은 흐름 없이 애플리케이션으로 그대로 전달됩니다.
pub struct HttpMiddleware<A, D> {
    app: A,
    dispatch: D,
}

impl<A, D> HttpMiddleware<A, D>
where
    A: Application,
    D: Dispatch,
{
    pub fn new(app: A, dispatch: D) -> Self {
        Self { app, dispatch }
    }
}

#[async_trait]
impl<A, D> Application for HttpMiddleware<A, D>
where
    A: Application,
    D: Dispatch,
{
    async fn call(
        &self,
        scope: &Scope,
        source: &mut dyn MessageSource,
        sink: &mut dyn MessageSink,
    ) -> Result<(), BoxError> {
        if !scope.is_http() {
            trace!(kind = ?scope.kind, "non-http scope bypasses dispatch flow");
            return self.app.call(scope, source, sink).await;
        }

        // 가드가 드롭되면서 모든 종료 경로(취소 포함)에서 흐름이 닫힙니다.
        let mut flow = FlowGuard::new(self.dispatch.make_flow(scope));

        match flow.start(scope).await? {
            Suspension::Pending => {}
            Suspension::Yielded(response) => {
                debug!(
                    request_id = %scope.request_id,
                    status = %response.status(),
                    "조기 응답 반환"
                );
                return response.send(sink).await;
            }
            Suspension::Terminated => {
                error!(request_id = %scope.request_id, "dispatch flow finished without suspending");
                return Err(DispatchError::NoInitialSuspension.into());
            }
        }

        let mut interceptor = ResponseInterceptor::new(sink, &mut flow);
        let result = self.app.call(scope, source, &mut interceptor).await;
        let response_started = interceptor.response_started();
        drop(interceptor);

        let app_error = match result {
            Ok(()) if response_started => return Ok(()),
            Ok(()) => {
                error!(request_id = %scope.request_id, "inner application returned without a response");
                return Err(DispatchError::NoResponse.into());
            }
            // 전송이 시작된 뒤의 에러는 응답으로 바꿀 수 없습니다.
            Err(e) if response_started => return Err(e),
            Err(e) => e,
        };

        let description = app_error.to_string();
        match flow.resume_with_error(app_error).await? {
            Suspension::Yielded(response) => {
                warn!(
                    request_id = %scope.request_id,
                    error = %description,
                    status = %response.status(),
                    "애플리케이션 에러를 응답으로 복구"
                );
                response.send(sink).await
            }
            Suspension::Pending | Suspension::Terminated => {
                error!(
                    request_id = %scope.request_id,
                    error = %description,
                    "dispatch flow swallowed error without a response"
                );
                Err(DispatchError::ErrorSwallowed { error: description }.into())
            }
        }
    }
}
