//! 测试替身 - 按URL返回预置响应并记录全部请求，无需真实网络即可断言请求体与调用次数

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::http::{HttpReply, HttpTransport, JsonRequest};

pub const TEST_SEARCH_URL: &str = "https://search.test/search";
pub const TEST_LLM_URL: &str = "https://llm.test/chat/completions";

/// 按URL路由的传输层：每个URL一个先进先出的响应队列，只剩最后一个时重复返回；
/// 未注册的URL返回网络错误
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<Result<HttpReply, TransportError>>>>,
    calls: Mutex<Vec<JsonRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_post(self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.push(
            url,
            Ok(HttpReply {
                status,
                body: body.into(),
            }),
        );
        self
    }

    pub fn on_post_json(self, url: &str, status: u16, body: &Value) -> Self {
        self.on_post(url, status, body.to_string())
    }

    pub fn on_failure(self, url: &str, error: TransportError) -> Self {
        self.push(url, Err(error));
        self
    }

    fn push(&self, url: &str, reply: Result<HttpReply, TransportError>) {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }

    /// 按发送顺序记录的全部请求
    pub fn calls(&self) -> Vec<JsonRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<JsonRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.url == url)
            .cloned()
            .collect()
    }

    pub fn call_count(&self, url: &str) -> usize {
        self.calls_to(url).len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_json(&self, request: JsonRequest) -> Result<HttpReply, TransportError> {
        let url = request.url.clone();
        self.calls.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let Some(queue) = routes.get_mut(&url) else {
            return Err(TransportError::Network(format!(
                "no mock reply registered for {}",
                url
            )));
        };
        if queue.len() > 1 {
            queue
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("empty mock queue".to_string())))
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(TransportError::Network("empty mock queue".to_string())))
        }
    }
}

/// 由 `(url, title, content)` 组成的搜索API响应体
pub fn search_body(results: &[(&str, &str, &str)]) -> Value {
    let results: Vec<Value> = results
        .iter()
        .map(|(url, title, content)| {
            serde_json::json!({ "url": url, "title": title, "content": content })
        })
        .collect();
    serde_json::json!({ "results": results })
}

/// 首个choice携带 `content` 的chat completions响应体
pub fn completion_body(content: &str) -> Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}
