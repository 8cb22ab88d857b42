//! # 初稿请求追踪器
//!
//! 为"生成初稿"操作提供可选的过期请求取代机制：
//! 每次调用 `begin()` 签发一个代数递增的票据（DraftTicket），
//! 票据运行期间如果有更新的票据被签发，正在进行的请求 future 会被直接丢弃
//! （底层 HTTP 请求随之取消），并返回 `DraftError::Superseded`。
//!
//! 追踪器不做去重：每次 `begin()` 之后的 `run()` 都会发出自己的请求。

use std::future::Future;

use tokio::sync::watch;

use crate::services::webhook::DraftError;

/// 初稿请求追踪器
///
/// 内部用 `watch` 通道广播最新代数，所有票据订阅同一个通道。
#[derive(Debug)]
pub struct DraftTracker {
    generation: watch::Sender<u64>,
}

/// 单次初稿请求的票据
#[derive(Debug)]
pub struct DraftTicket {
    generation: u64,
    latest: watch::Receiver<u64>,
}

impl DraftTracker {
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self { generation }
    }

    /// 签发新票据，使之前签发的所有票据过期
    pub fn begin(&self) -> DraftTicket {
        let mut generation = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            generation = *g;
        });
        DraftTicket {
            generation,
            latest: self.generation.subscribe(),
        }
    }

    /// 当前最新的代数
    pub fn current(&self) -> u64 {
        *self.generation.borrow()
    }
}

impl Default for DraftTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 是否已被更新的票据取代
    pub fn is_stale(&self) -> bool {
        *self.latest.borrow() != self.generation
    }

    /// 在票据有效期内运行 `fut`
    ///
    /// `fut` 先完成则返回其结果；票据先过期则丢弃 `fut` 并返回 `Superseded`。
    /// 即使 `fut` 已经完成，只要此时票据已过期，结果同样被丢弃。
    pub async fn run<T, F>(mut self, fut: F) -> Result<T, DraftError>
    where
        F: Future<Output = Result<T, DraftError>>,
    {
        if self.is_stale() {
            return Err(DraftError::Superseded);
        }

        let my_generation = self.generation;
        let superseded = async {
            // 发送端随追踪器一起存在；发送端被丢弃时永远等待，让请求自然完成
            if self
                .latest
                .wait_for(|latest| *latest != my_generation)
                .await
                .is_err()
            {
                std::future::pending::<()>().await;
            }
        };

        let result = tokio::select! {
            result = fut => result,
            _ = superseded => return Err(DraftError::Superseded),
        };

        if self.is_stale() {
            log::info!("초안 결과가 더 최근 요청에 의해 폐기되었습니다 (generation={})", my_generation);
            return Err(DraftError::Superseded);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_begin_increments_generation() {
        let tracker = DraftTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert_eq!(first.generation(), 1);
        assert_eq!(second.generation(), 2);
        assert_eq!(tracker.current(), 2);
        assert!(first.is_stale());
        assert!(!second.is_stale());
    }

    #[tokio::test]
    async fn test_latest_ticket_completes() {
        let tracker = DraftTracker::new();
        let ticket = tracker.begin();
        let value = ticket.run(async { Ok::<_, DraftError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_stale_ticket_is_rejected_before_running() {
        let tracker = DraftTracker::new();
        let old = tracker.begin();
        let _new = tracker.begin();

        let err = old.run(async { Ok::<_, DraftError>(1) }).await.unwrap_err();
        assert!(matches!(err, DraftError::Superseded));
    }

    #[tokio::test]
    async fn test_in_flight_request_is_superseded() {
        let tracker = DraftTracker::new();
        let old = tracker.begin();

        let slow = old.run(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, DraftError>("old")
        });
        let supersede = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            tracker.begin()
        };

        let (old_result, new_ticket) = tokio::join!(slow, supersede);
        assert!(matches!(old_result, Err(DraftError::Superseded)));

        let fresh = new_ticket.run(async { Ok::<_, DraftError>("new") }).await;
        assert_eq!(fresh.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_errors_from_latest_ticket_pass_through() {
        let tracker = DraftTracker::new();
        let err = tracker
            .begin()
            .run(async { Err::<(), _>(DraftError::MissingWebhookUrl) })
            .await
            .unwrap_err();
        assert!(matches!(err, DraftError::MissingWebhookUrl));
    }
}
