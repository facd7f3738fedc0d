#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use textsum::{
    Orchestrator, SelectedFile, SummaryRequest,
    error::SummarizeError,
    transport::{FormField, RawResponse, Transport},
};

pub(crate) const BASE_URL: &str = "http://summarizer.test";

#[macro_export]
macro_rules! assert_status_kinds {
    (
        $(
            $test_name:ident : status => $status:expr, body => $body:expr, kind => $kind:pat, message => $message:expr
        ),+ $(,)?
    ) => {
        $(
            #[tokio::test]
            async fn $test_name() {
                let orchestrator = stub_orchestrator(StubReply::respond($status, $body));
                let error = orchestrator
                    .submit(&valid_text_request())
                    .await
                    .expect_err("Expected the response to be reported as an error.");

                assert!(matches!(error, $kind), "unexpected error kind: {error:?}");
                assert_that(&error.to_string()).is_equal_to($message.to_owned());
                assert_that(&orchestrator.transport().calls().len()).is_equal_to(1);
            }
        )+
    }
}

/// What a [`StubTransport`] answers with.
#[derive(Clone, Debug)]
pub(crate) enum StubReply {
    Respond(RawResponse),
    Fail(String),
    Hang,
}

impl StubReply {
    pub fn respond(status: u16, body: &str) -> Self {
        StubReply::Respond(RawResponse {
            status,
            body: body.to_owned(),
        })
    }

    pub fn summary(original_length: u64, summary_length: u64) -> Self {
        Self::respond(
            200,
            &format!(
                r#"{{"summary":"x y z","original_text":"...","original_length":{original_length},"summary_length":{summary_length}}}"#
            ),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub fields: Vec<FormField>,
}

/// Transport recording every call and answering with scripted replies.
/// The last reply is repeated once the script runs out. GET requests take the
/// health reply instead when one is set.
pub(crate) struct StubTransport {
    replies: Mutex<VecDeque<StubReply>>,
    health: Option<StubReply>,
    delay: Duration,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubTransport {
    pub fn new(reply: StubReply) -> Self {
        Self::sequence(vec![reply])
    }

    pub fn sequence(replies: Vec<StubReply>) -> Self {
        StubTransport {
            replies: Mutex::new(replies.into()),
            health: None,
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_health(mut self, reply: StubReply) -> Self {
        self.health = Some(reply);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("Stub mutex poisoned").clone()
    }

    async fn answer(&self, call: RecordedCall) -> Result<RawResponse, SummarizeError> {
        let health = if call.method == "GET" {
            self.health.clone()
        } else {
            None
        };
        self.calls.lock().expect("Stub mutex poisoned").push(call);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let reply = health.or_else(|| {
            let mut replies = self.replies.lock().expect("Stub mutex poisoned");
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        });

        match reply.expect("Stub needs at least one reply") {
            StubReply::Respond(response) => Ok(response),
            StubReply::Fail(reason) => Err(SummarizeError::Network(reason)),
            StubReply::Hang => {
                std::future::pending::<()>().await;
                Err(SummarizeError::Network("unreachable".to_owned()))
            }
        }
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post_multipart(
        &self,
        url: &str,
        fields: Vec<FormField>,
    ) -> Result<RawResponse, SummarizeError> {
        self.answer(RecordedCall {
            method: "POST",
            url: url.to_owned(),
            fields,
        })
        .await
    }

    async fn get(&self, url: &str) -> Result<RawResponse, SummarizeError> {
        self.answer(RecordedCall {
            method: "GET",
            url: url.to_owned(),
            fields: Vec::new(),
        })
        .await
    }
}

pub(crate) fn stub_orchestrator(reply: StubReply) -> Orchestrator<StubTransport> {
    Orchestrator::new(StubTransport::new(reply), BASE_URL)
}

/// 60 characters of text.
pub(crate) fn sixty_chars() -> String {
    "abcdefghij".repeat(6)
}

pub(crate) fn valid_text_request() -> SummaryRequest {
    SummaryRequest::text(sixty_chars(), 100)
}

pub(crate) fn pdf_file(name: &str, size: usize) -> SelectedFile {
    let mut bytes = b"%PDF-1.7\n".to_vec();
    bytes.resize(size, 0);
    SelectedFile::new(name, bytes)
}
