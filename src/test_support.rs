//! Transport con respuestas guionizadas para los tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport};

enum Scripted {
    Ready(Result<HttpResponse, ApiError>),
    Deferred(oneshot::Receiver<HttpResponse>),
}

/// Responde en orden con lo encolado y registra cada request
#[derive(Default)]
pub(crate) struct MockTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) {
        self.script.borrow_mut().push_back(Scripted::Ready(Ok(HttpResponse {
            status,
            body: body.to_string(),
        })));
    }

    pub(crate) fn fail_network(&self, message: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Ready(Err(ApiError::Network(message.to_string()))));
    }

    /// Encola una respuesta que queda pendiente hasta que se use el sender devuelto
    pub(crate) fn defer(&self) -> oneshot::Sender<HttpResponse> {
        let (sender, receiver) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Deferred(receiver));
        sender
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(result)) => result,
            Some(Scripted::Deferred(receiver)) => receiver
                .await
                .map_err(|_| ApiError::Network("deferred response dropped".to_string())),
            None => Err(ApiError::Network("no scripted response".to_string())),
        }
    }
}

pub(crate) fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}

/// Valor decodificado de `key` en la query string de `url`
pub(crate) fn query_value(url: &str, key: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}
