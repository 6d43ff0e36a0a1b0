use hyper::{Method, Version};
use super::HeaderList;

/// 요청 범주
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Http,
    WebSocket,
    Lifespan,
}

/// 요청 단위의 불변 메타데이터
///
/// 전송 계층이 생성하며 요청이 끝날 때까지 유지됩니다.
#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    pub request_id: String,
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub version: Version,
    pub headers: HeaderList,
}

impl Scope {
    pub fn http(method: Method, path: impl Into<String>) -> Self {
        Self {
            kind: ScopeKind::Http,
            request_id: uuid::Uuid::new_v4().to_string(),
            method,
            path: path.into(),
            query: None,
            version: Version::HTTP_11,
            headers: HeaderList::new(),
        }
    }

    pub fn with_kind(mut self, kind: ScopeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_headers(mut self, headers: HeaderList) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn is_http(&self) -> bool {
        self.kind == ScopeKind::Http
    }
}
