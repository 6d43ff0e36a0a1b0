use std::sync::Arc;
use async_trait::async_trait;
use bytes::BytesMut;
use hyper::StatusCode;
use serde::Serialize;
use tracing::{error, info};
use flow_dispatch::{
    logging,
    middleware::FlowManager,
    protocol::{Application, BoxError, HeaderList, Message, MessageSink, MessageSource, Response, Scope},
    server::{RequestHandler, ServerListener},
    settings::Settings,
};

/// 요청 정보를 JSON으로 돌려주는 데모 애플리케이션
///
/// - `/fail`: 응답 시작 전에 실패합니다.
/// - `/fail-late`: 응답 시작 후에 실패합니다.
struct EchoApp;

#[derive(Serialize)]
struct EchoBody<'a> {
    request_id: &'a str,
    method: &'a str,
    path: &'a str,
    query: Option<&'a str>,
    body_bytes: usize,
}

#[async_trait]
impl Application for EchoApp {
    async fn call(
        &self,
        scope: &Scope,
        source: &mut dyn MessageSource,
        sink: &mut dyn MessageSink,
    ) -> Result<(), BoxError> {
        let mut body = BytesMut::new();
        loop {
            match source.receive().await? {
                Message::RequestBody { chunk, more_body } => {
                    body.extend_from_slice(&chunk);
                    if !more_body {
                        break;
                    }
                }
                _ => break,
            }
        }

        match scope.path.as_str() {
            "/fail" => Err("demo failure before response start".into()),
            "/fail-late" => {
                sink.send(Message::start(StatusCode::OK, HeaderList::new())).await?;
                sink.send(Message::body("partial", true)).await?;
                Err("demo failure after response start".into())
            }
            _ => {
                let echo = EchoBody {
                    request_id: &scope.request_id,
                    method: scope.method.as_str(),
                    path: &scope.path,
                    query: scope.query.as_deref(),
                    body_bytes: body.len(),
                };
                Response::json(StatusCode::OK, &echo)?.send(sink).await
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let settings = match Settings::load().await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_logging(&settings.logging) {
        eprintln!("로깅 초기화 실패: {}", e);
        std::process::exit(1);
    }

    let manager = FlowManager::new(&settings.flows);
    let app = manager.build(Arc::new(EchoApp));
    let handler = Arc::new(RequestHandler::new(app));

    let listener = match ServerListener::new(&settings.server).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, "서버 시작 실패");
            std::process::exit(1);
        }
    };

    info!("Flow dispatch server started");
    if let Err(e) = listener.run(handler).await {
        error!(error = %e, "서버 실행 중 에러 발생");
        std::process::exit(1);
    }
}
