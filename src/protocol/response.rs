use bytes::Bytes;
use hyper::header::{self, HeaderMap, HeaderName, HeaderValue};
use hyper::StatusCode;
use serde::Serialize;
use super::{BoxError, HeaderList, Message, MessageSink};

/// 완결된 응답 값
///
/// 조기 응답이나 에러 복구 응답처럼 흐름이 직접 만들어 전송하는 응답입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// `text/plain` 응답을 생성합니다.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )
            .with_body(body.into())
    }

    /// `application/json` 응답을 생성합니다.
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(Self::new(status)
            .with_header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(body))
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// 응답 시작 메시지 하나와 마지막 바디 메시지 하나를 전송합니다.
    pub async fn send(self, sink: &mut dyn MessageSink) -> Result<(), BoxError> {
        let mut headers = HeaderList::from(&self.headers);
        if !headers.contains(&header::CONTENT_LENGTH) {
            headers.append(header::CONTENT_LENGTH, HeaderValue::from(self.body.len()));
        }

        sink.send(Message::start(self.status, headers)).await?;
        sink.send(Message::body(self.body, false)).await
    }
}

/// 흐름에 노출되는 응답 미리보기
///
/// 상태 코드는 읽기 전용이고 헤더는 비어 있는 상태로 시작합니다.
/// 흐름이 설정한 헤더만 실제 응답 시작 메시지에 병합됩니다.
#[derive(Debug, Clone)]
pub struct ResponseView {
    status: StatusCode,
    headers: HeaderMap,
}

impl ResponseView {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Default)]
    struct VecSink(Vec<Message>);

    #[async_trait]
    impl MessageSink for VecSink {
        async fn send(&mut self, message: Message) -> Result<(), BoxError> {
            self.0.push(message);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_send_emits_start_then_final_body() {
        let mut sink = VecSink::default();
        Response::text(StatusCode::FORBIDDEN, "nope")
            .send(&mut sink)
            .await
            .unwrap();

        assert_eq!(sink.0.len(), 2);
        match &sink.0[0] {
            Message::ResponseStart { status, headers } => {
                assert_eq!(*status, StatusCode::FORBIDDEN);
                assert_eq!(headers.get(&header::CONTENT_LENGTH).unwrap(), "4");
                assert_eq!(
                    headers.get(&header::CONTENT_TYPE).unwrap(),
                    "text/plain; charset=utf-8"
                );
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert_eq!(sink.0[1], Message::body("nope", false));
    }

    #[test]
    fn test_json_response() {
        let response = Response::json(StatusCode::OK, &serde_json::json!({"ok": true})).unwrap();
        assert_eq!(response.body().as_ref(), br#"{"ok":true}"#);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_view_starts_empty() {
        let view = ResponseView::new(StatusCode::CREATED);
        assert_eq!(view.status(), StatusCode::CREATED);
        assert!(view.headers().is_empty());
    }
}
