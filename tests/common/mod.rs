//! 디스패치 테스트용 공용 목 객체
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use bytes::Bytes;
use hyper::header::{HeaderName, HeaderValue};
use hyper::StatusCode;
use flow_dispatch::middleware::{Dispatch, Flow, Suspension};
use flow_dispatch::protocol::{
    Application, BoxError, HeaderList, Message, MessageSink, MessageSource, Response, ResponseView,
    Scope,
};

/// 원본 에러가 그대로 전파되는지 확인하기 위한 에러 타입
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("app failure: {0}")]
pub struct AppFailure(pub &'static str);

pub fn header(name: &str, value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_bytes(name.as_bytes()).unwrap(),
        HeaderValue::from_str(value).unwrap(),
    )
}

pub fn header_pairs(headers: &HeaderList) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap().to_string()))
        .collect()
}

/// 전송된 메시지를 기록하는 싱크
#[derive(Default)]
pub struct RecordingSink {
    pub messages: Vec<Message>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<(StatusCode, &HeaderList)> {
        self.messages.iter().find_map(|message| match message {
            Message::ResponseStart { status, headers } => Some((*status, headers)),
            _ => None,
        })
    }

    pub fn start_count(&self) -> usize {
        self.messages.iter().filter(|message| message.is_response_start()).count()
    }

    pub fn body(&self) -> Vec<u8> {
        self.messages
            .iter()
            .filter_map(|message| match message {
                Message::ResponseBody { chunk, .. } => Some(chunk.to_vec()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&mut self, message: Message) -> Result<(), BoxError> {
        self.messages.push(message);
        Ok(())
    }
}

/// 바디가 없는 요청 소스
pub struct EmptySource;

#[async_trait]
impl MessageSource for EmptySource {
    async fn receive(&mut self) -> Result<Message, BoxError> {
        Ok(Message::RequestBody {
            chunk: Bytes::new(),
            more_body: false,
        })
    }
}

#[derive(Clone)]
pub enum AppBehavior {
    Respond {
        status: StatusCode,
        headers: Vec<(HeaderName, HeaderValue)>,
        body: &'static str,
    },
    Silent,
    FailBeforeStart(&'static str),
    FailAfterStart(&'static str),
    Hang,
}

/// 정해진 동작을 수행하는 내부 애플리케이션
pub struct ScriptedApp {
    pub behavior: AppBehavior,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedApp {
    pub fn new(behavior: AppBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Application for ScriptedApp {
    async fn call(
        &self,
        _scope: &Scope,
        _source: &mut dyn MessageSource,
        sink: &mut dyn MessageSink,
    ) -> Result<(), BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            AppBehavior::Respond { status, headers, body } => {
                let headers: HeaderList = headers.iter().cloned().collect();
                sink.send(Message::start(*status, headers)).await?;
                sink.send(Message::body(*body, false)).await
            }
            AppBehavior::Silent => Ok(()),
            AppBehavior::FailBeforeStart(msg) => Err(AppFailure(*msg).into()),
            AppBehavior::FailAfterStart(msg) => {
                sink.send(Message::start(StatusCode::OK, HeaderList::new())).await?;
                Err(AppFailure(*msg).into())
            }
            AppBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }
}

/// 흐름 호출 기록
#[derive(Default)]
pub struct FlowProbe {
    pub closes: AtomicUsize,
    pub events: Mutex<Vec<String>>,
}

impl FlowProbe {
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }
}

#[derive(Clone)]
pub enum ErrorStep {
    Reraise,
    Replace(&'static str),
    Respond(Response),
    Swallow,
}

/// 흐름의 각 단계 동작
#[derive(Clone)]
pub struct Script {
    pub early: Option<Response>,
    pub never_suspend: bool,
    pub fail_on_start: bool,
    pub set_headers: Vec<(HeaderName, HeaderValue)>,
    pub suspend_twice: bool,
    pub yield_on_response: Option<Response>,
    pub fail_on_response: bool,
    pub on_error: ErrorStep,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            early: None,
            never_suspend: false,
            fail_on_start: false,
            set_headers: Vec::new(),
            suspend_twice: false,
            yield_on_response: None,
            fail_on_response: false,
            on_error: ErrorStep::Reraise,
        }
    }
}

/// `Flow`를 직접 구현한 스크립트 흐름
pub struct ScriptedFlow {
    script: Script,
    probe: Arc<FlowProbe>,
}

#[async_trait]
impl Flow for ScriptedFlow {
    async fn start(&mut self, scope: &Scope) -> Result<Suspension, BoxError> {
        self.probe.record(format!("start {}", scope.path));

        if self.script.fail_on_start {
            return Err(AppFailure("flow start").into());
        }
        if self.script.never_suspend {
            return Ok(Suspension::Terminated);
        }
        match self.script.early.take() {
            Some(response) => Ok(Suspension::Yielded(response)),
            None => Ok(Suspension::Pending),
        }
    }

    async fn resume_with_response(&mut self, view: &mut ResponseView) -> Result<Suspension, BoxError> {
        self.probe.record(format!(
            "response {} headers={}",
            view.status().as_u16(),
            view.headers().len()
        ));

        if self.script.fail_on_response {
            return Err(AppFailure("flow response").into());
        }
        for (name, value) in &self.script.set_headers {
            view.headers_mut().insert(name.clone(), value.clone());
        }
        if self.script.suspend_twice {
            return Ok(Suspension::Pending);
        }
        if let Some(response) = self.script.yield_on_response.take() {
            return Ok(Suspension::Yielded(response));
        }
        Ok(Suspension::Terminated)
    }

    async fn resume_with_error(&mut self, error: BoxError) -> Result<Suspension, BoxError> {
        self.probe.record(format!("error {}", error));

        match &self.script.on_error {
            ErrorStep::Reraise => Err(error),
            ErrorStep::Replace(msg) => Err(AppFailure(*msg).into()),
            ErrorStep::Respond(response) => Ok(Suspension::Yielded(response.clone())),
            ErrorStep::Swallow => Ok(Suspension::Terminated),
        }
    }

    fn close(&mut self) {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// 스크립트 흐름 디스패처
pub struct ScriptedDispatch {
    pub script: Script,
    pub probe: Arc<FlowProbe>,
}

impl ScriptedDispatch {
    pub fn new(script: Script) -> (Self, Arc<FlowProbe>) {
        let probe = Arc::new(FlowProbe::default());
        (
            Self {
                script,
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl Dispatch for ScriptedDispatch {
    fn make_flow(&self, _scope: &Scope) -> Box<dyn Flow> {
        Box::new(ScriptedFlow {
            script: self.script.clone(),
            probe: self.probe.clone(),
        })
    }
}
