//! HTTP传输层 - 检索与合成两个阶段共用的JSON POST通道

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::TransportError;

/// 一次JSON POST请求
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRequest {
    pub url: String,
    /// 设置后以 `Authorization: Bearer <token>` 发送
    pub bearer_token: Option<String>,
    pub body: Value,
}

impl JsonRequest {
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            bearer_token: None,
            body,
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

/// 完整读取后的HTTP响应
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// 发送请求并等待完整响应；非2xx状态码不视为传输错误
    async fn post_json(&self, request: JsonRequest) -> Result<HttpReply, TransportError>;
}

/// 基于reqwest的传输实现，连接与读取超时取自配置
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { http })
    }

    fn headers(bearer_token: Option<&str>) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| TransportError::Client(format!("invalid api key header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, request: JsonRequest) -> Result<HttpReply, TransportError> {
        debug!(url = %request.url, "POST json request");

        let response = self
            .http
            .post(&request.url)
            .headers(Self::headers(request.bearer_token.as_deref())?)
            .json(&request.body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        debug!(url = %request.url, status, bytes = body.len(), "POST json response");

        Ok(HttpReply { status, body })
    }
}
