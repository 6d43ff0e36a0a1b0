use std::pin::Pin;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::StatusCode;
use tracing::trace;
use crate::protocol::{BoxError, HeaderList, Message, MessageSink, MessageSource};
use super::error::BridgeError;

/// hyper 요청 바디를 인바운드 메시지로 변환합니다.
///
/// 바디 조각을 `RequestBody`로 전달하고, 바디가 끝난 뒤에는 `Disconnect`를 반환합니다.
pub struct BodySource<B> {
    body: Pin<Box<B>>,
    finished: bool,
}

impl<B> BodySource<B> {
    pub fn new(body: B) -> Self {
        Self {
            body: Box::pin(body),
            finished: false,
        }
    }
}

#[async_trait]
impl<B> MessageSource for BodySource<B>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    async fn receive(&mut self) -> Result<Message, BoxError> {
        if self.finished {
            return Ok(Message::Disconnect);
        }

        loop {
            match self.body.frame().await {
                Some(Ok(frame)) => {
                    // 트레일러 프레임은 전달하지 않습니다.
                    if let Ok(chunk) = frame.into_data() {
                        let more_body = !self.body.is_end_stream();
                        self.finished = !more_body;
                        return Ok(Message::RequestBody { chunk, more_body });
                    }
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    self.finished = true;
                    return Ok(Message::RequestBody {
                        chunk: Bytes::new(),
                        more_body: false,
                    });
                }
            }
        }
    }
}

/// 아웃바운드 메시지를 모아 hyper 응답으로 만드는 싱크
#[derive(Debug, Default)]
pub struct ResponseCollector {
    status: Option<StatusCode>,
    headers: HeaderList,
    body: BytesMut,
    complete: bool,
}

impl ResponseCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> bool {
        self.status.is_some()
    }

    /// 응답 시작 메시지를 받지 못했다면 `None`을 반환합니다.
    pub fn into_response(self) -> Option<hyper::Response<Full<Bytes>>> {
        let status = self.status?;
        let mut response = hyper::Response::new(Full::new(self.body.freeze()));
        *response.status_mut() = status;
        *response.headers_mut() = self.headers.to_header_map();
        Some(response)
    }
}

#[async_trait]
impl MessageSink for ResponseCollector {
    async fn send(&mut self, message: Message) -> Result<(), BoxError> {
        match message {
            Message::ResponseStart { status, headers } => {
                if self.started() {
                    return Err(BridgeError::AlreadyStarted.into());
                }
                self.status = Some(status);
                self.headers = headers;
            }
            Message::ResponseBody { chunk, more_body } => {
                if !self.started() {
                    return Err(BridgeError::NotStarted.into());
                }
                if self.complete {
                    return Err(BridgeError::AlreadyComplete.into());
                }
                self.body.extend_from_slice(&chunk);
                self.complete = !more_body;
            }
            other => {
                trace!(kind = other.kind(), "ignoring message in response collector");
            }
        }
        Ok(())
    }
}
