use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use tracing::error;
use crate::logging::{log_request, RequestLog};
use crate::protocol::{Application, BoxError, HeaderList, Scope};
use super::body::{BodySource, ResponseCollector};
use super::error::BridgeError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// hyper 요청을 메시지 프로토콜로 변환해 애플리케이션을 호출하는 핸들러
pub struct RequestHandler {
    app: Arc<dyn Application>,
}

impl RequestHandler {
    pub fn new(app: Arc<dyn Application>) -> Self {
        Self { app }
    }

    /// 요청 메타데이터로 `Scope`를 생성합니다.
    pub fn build_scope<B>(req: &Request<B>) -> Scope {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(|value| value.to_string())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let mut scope = Scope::http(req.method().clone(), req.uri().path())
            .with_request_id(request_id)
            .with_headers(HeaderList::from(req.headers()));
        if let Some(query) = req.uri().query() {
            scope = scope.with_query(query);
        }
        scope.version = req.version();
        scope
    }

    pub async fn handle_request<B>(
        &self,
        req: Request<B>,
    ) -> Result<Response<Full<Bytes>>, Infallible>
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let started_at = Instant::now();
        let scope = Self::build_scope(&req);
        let mut log = RequestLog::new(&scope);

        let mut source = BodySource::new(req.into_body());
        let mut collector = ResponseCollector::new();
        let result = self.app.call(&scope, &mut source, &mut collector).await;

        if let Err(e) = &result {
            error!(request_id = %scope.request_id, error = %e, "애플리케이션 처리 실패");
            log.with_error(e);
        }

        // 응답이 이미 시작되었다면 실패했더라도 받은 만큼 돌려줍니다.
        let response = collector.into_response().unwrap_or_else(Self::internal_error_response);

        log.with_response(response.status());
        log.with_duration(started_at.elapsed());
        log_request(&log);

        Ok(response)
    }

    fn internal_error_response() -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(Bytes::from_static(b"Internal Server Error")));
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    }

    pub async fn handle_connection<I>(self: Arc<Self>, io: I) -> Result<(), BridgeError>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        http1::Builder::new()
            .serve_connection(
                io,
                service_fn(move |req| {
                    let handler = self.clone();
                    async move { handler.handle_request(req).await }
                }),
            )
            .await
            .map_err(BridgeError::from)
    }
}
