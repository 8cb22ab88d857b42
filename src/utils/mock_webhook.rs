//! 测试用本地 Webhook 模拟服务器
//!
//! 绑定 `127.0.0.1:0`，对每个请求返回预设的状态码和响应体，
//! 同时记录请求次数和最后一次请求的原始内容，用于断言网络调用行为。

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// 服务器收到的一次请求
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// 不经过系统代理的 HTTP 客户端，保证请求直达本地模拟服务器
pub(crate) fn direct_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build reqwest client")
}

pub(crate) struct MockWebhook {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<RecordedRequest>>>,
}

impl MockWebhook {
    /// 启动返回固定状态码和响应体的模拟服务器
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    /// 启动在响应前等待 `delay` 的模拟服务器
    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let hits = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(Mutex::new(None));
        let body = Bytes::from(body.to_string());

        let server_hits = hits.clone();
        let server_last = last.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let hits = server_hits.clone();
                let last = server_last.clone();
                let body = body.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let hits = hits.clone();
                        let last = last.clone();
                        let body = body.clone();
                        async move {
                            hits.fetch_add(1, Ordering::SeqCst);
                            let method = req.method().to_string();
                            let content_type = req
                                .headers()
                                .get(hyper::header::CONTENT_TYPE)
                                .and_then(|v| v.to_str().ok())
                                .unwrap_or_default()
                                .to_string();
                            let request_body = req
                                .into_body()
                                .collect()
                                .await
                                .map(|c| c.to_bytes().to_vec())
                                .unwrap_or_default();
                            *last.lock().unwrap() = Some(RecordedRequest {
                                method,
                                content_type,
                                body: request_body,
                            });

                            if !delay.is_zero() {
                                tokio::time::sleep(delay).await;
                            }

                            let mut response = Response::new(Full::new(body));
                            *response.status_mut() =
                                StatusCode::from_u16(status).expect("valid status");
                            response.headers_mut().insert(
                                hyper::header::CONTENT_TYPE,
                                hyper::header::HeaderValue::from_static("application/json"),
                            );
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self { addr, hits, last }
    }

    pub fn url(&self) -> String {
        format!("http://{}/webhook/heritage-report-draft", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last.lock().unwrap().clone()
    }
}
