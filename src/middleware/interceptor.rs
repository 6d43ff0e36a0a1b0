use async_trait::async_trait;
use tracing::{debug, error};
use crate::protocol::{BoxError, Message, MessageSink, ResponseView};
use super::{DispatchError, FlowGuard, Suspension};

/// 응답 시작 메시지를 가로채는 싱크 래퍼
///
/// 첫 번째 응답 시작 메시지에서만 전달을 멈추고 흐름을 재개한 뒤,
/// 흐름이 설정한 헤더를 병합하고 나서 다운스트림으로 넘깁니다.
/// 그 외의 메시지는 검사 없이 그대로 전달됩니다.
pub struct ResponseInterceptor<'a> {
    inner: &'a mut dyn MessageSink,
    flow: &'a mut FlowGuard,
    response_started: bool,
}

impl<'a> ResponseInterceptor<'a> {
    pub fn new(inner: &'a mut dyn MessageSink, flow: &'a mut FlowGuard) -> Self {
        Self {
            inner,
            flow,
            response_started: false,
        }
    }

    pub fn response_started(&self) -> bool {
        self.response_started
    }
}

#[async_trait]
impl<'a> MessageSink for ResponseInterceptor<'a> {
    async fn send(&mut self, message: Message) -> Result<(), BoxError> {
        let message = match message {
            Message::ResponseStart { status, mut headers } if !self.response_started => {
                // 흐름이 실패하더라도 응답이 이미 시작된 것으로 취급합니다.
                self.response_started = true;

                let mut view = ResponseView::new(status);
                match self.flow.resume_with_response(&mut view).await? {
                    Suspension::Terminated => {}
                    Suspension::Pending | Suspension::Yielded(_) => {
                        error!(status = %status, "dispatch flow suspended after response start");
                        return Err(DispatchError::MultipleSuspensions.into());
                    }
                }

                let overrides = view.into_headers();
                debug!(
                    status = %status,
                    merged = overrides.len(),
                    "응답 헤더 병합"
                );
                headers.merge(&overrides);
                Message::ResponseStart { status, headers }
            }
            other => other,
        };

        self.inner.send(message).await
    }
}
