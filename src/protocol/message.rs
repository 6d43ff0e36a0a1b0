use bytes::Bytes;
use hyper::StatusCode;
use super::HeaderList;

/// 전송 계층과 애플리케이션 사이를 오가는 메시지
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// 요청 바디 조각 (upstream)
    RequestBody {
        chunk: Bytes,
        more_body: bool,
    },

    /// 클라이언트 연결 종료 (upstream)
    Disconnect,

    /// 응답 시작: 상태 코드와 헤더 (downstream)
    ResponseStart {
        status: StatusCode,
        headers: HeaderList,
    },

    /// 응답 바디 조각 (downstream)
    ResponseBody {
        chunk: Bytes,
        more_body: bool,
    },

    /// 응답 트레일러 (downstream)
    ResponseTrailers {
        headers: HeaderList,
        more_trailers: bool,
    },
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestBody { .. } => "http.request",
            Self::Disconnect => "http.disconnect",
            Self::ResponseStart { .. } => "http.response.start",
            Self::ResponseBody { .. } => "http.response.body",
            Self::ResponseTrailers { .. } => "http.response.trailers",
        }
    }

    pub fn start(status: StatusCode, headers: HeaderList) -> Self {
        Self::ResponseStart { status, headers }
    }

    pub fn body(chunk: impl Into<Bytes>, more_body: bool) -> Self {
        Self::ResponseBody {
            chunk: chunk.into(),
            more_body,
        }
    }

    pub fn is_response_start(&self) -> bool {
        matches!(self, Self::ResponseStart { .. })
    }
}
