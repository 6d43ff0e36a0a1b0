use std::sync::Arc;
use tokio::net::TcpListener;
use hyper_util::rt::TokioIo;
use tracing::{debug, error, info};
use crate::settings::ServerSettings;
use super::error::BridgeError;
use super::handler::RequestHandler;

pub struct ServerListener {
    http_listener: TcpListener,
}

impl ServerListener {
    pub async fn new(settings: &ServerSettings) -> Result<Self, BridgeError> {
        let addr = settings.bind_addr();
        let http_listener = TcpListener::bind(addr).await.map_err(|e| {
            error!(error = %e, %addr, "HTTP 포트 바인딩 실패");
            e
        })?;

        info!(%addr, "HTTP 리스너 시작");
        Ok(Self { http_listener })
    }

    pub fn local_addr(&self) -> Result<std::net::SocketAddr, BridgeError> {
        Ok(self.http_listener.local_addr()?)
    }

    pub async fn run(self, handler: Arc<RequestHandler>) -> Result<(), BridgeError> {
        loop {
            match self.http_listener.accept().await {
                Ok((stream, peer)) => {
                    debug!(%peer, "HTTP 연결 수락");
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        if let Err(err) = handler.handle_connection(io).await {
                            error!(error = %err, "HTTP 연결 처리 실패");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "HTTP 연결 수락 실패");
                }
            }
        }
    }
}
