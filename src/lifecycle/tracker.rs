//! 跟踪器组
//!
//! [`TrackerGroup`] 是 [`LifecycleFacade`] 的一个具体实现：按名称登记跟踪器，
//! 刷新时逐个刷新，关闭时在后台线程里排空并限时等待。

use crossbeam::channel::{self, RecvTimeoutError};
use dashmap::DashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::facade::{LifecycleError, LifecycleFacade};

/// 可刷新、可关闭的指标跟踪器
pub trait Tracker: Send + Sync {
    /// 发布尚未发布的数据
    fn flush(&self) -> anyhow::Result<()>;

    /// 排空并停止，默认等同于一次刷新
    fn shut_down(&self) -> anyhow::Result<()> {
        self.flush()
    }
}

/// 按名称管理的跟踪器集合
///
/// # 示例
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use metricx::lifecycle::{LifecycleFacade, Tracker, TrackerGroup};
///
/// struct PageViews;
/// impl Tracker for PageViews {
///     fn flush(&self) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// let group = TrackerGroup::new();
/// group.register("page_views", Arc::new(PageViews));
///
/// assert!(group.flush_all().is_ok());
/// assert!(group.shut_down(Duration::from_secs(1)).is_ok());
/// ```
#[derive(Clone, Default)]
pub struct TrackerGroup {
    trackers: Arc<DashMap<String, Arc<dyn Tracker>>>,
}

impl TrackerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记跟踪器，同名的旧跟踪器被替换并返回
    pub fn register(
        &self,
        name: impl Into<String>,
        tracker: Arc<dyn Tracker>,
    ) -> Option<Arc<dyn Tracker>> {
        self.trackers.insert(name.into(), tracker)
    }

    /// 移除跟踪器
    pub fn deregister(&self, name: &str) -> Option<Arc<dyn Tracker>> {
        self.trackers.remove(name).map(|(_, tracker)| tracker)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.trackers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// 已登记的跟踪器名称（按字典序）
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.trackers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    // 复制出一份快照再调用跟踪器，避免持有分片锁
    fn snapshot(&self) -> Vec<(String, Arc<dyn Tracker>)> {
        let mut trackers: Vec<(String, Arc<dyn Tracker>)> = self
            .trackers
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(e.value())))
            .collect();
        trackers.sort_by(|a, b| a.0.cmp(&b.0));
        trackers
    }
}

type Failures = Vec<(String, anyhow::Error)>;

fn describe(failures: &Failures) -> String {
    failures
        .iter()
        .map(|(name, e)| format!("{}: {}", name, e))
        .collect::<Vec<_>>()
        .join("; ")
}

impl LifecycleFacade for TrackerGroup {
    fn flush_all(&self) -> Result<(), LifecycleError> {
        let failures: Failures = self
            .snapshot()
            .into_iter()
            .filter_map(|(name, tracker)| tracker.flush().err().map(|e| (name, e)))
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError::Flush(describe(&failures)))
        }
    }

    /// 在后台线程中依次关闭调用时已登记的跟踪器
    ///
    /// 超时后立即返回 [`LifecycleError::Timeout`]，后台线程继续运行直到完成。
    /// 每个跟踪器处理完（无论成功与否）即从登记中移除；关闭期间新登记的跟踪器，
    /// 包括同名替换的跟踪器，保留在登记中。
    fn shut_down(&self, timeout: Duration) -> Result<(), LifecycleError> {
        let trackers = self.snapshot();
        if trackers.is_empty() {
            return Ok(());
        }

        let registered = Arc::clone(&self.trackers);
        let (done_tx, done_rx) = channel::bounded::<Failures>(1);
        thread::Builder::new()
            .name("metricx-shutdown".to_string())
            .spawn(move || {
                let mut failures = Failures::new();
                for (name, tracker) in trackers {
                    if let Err(e) = tracker.shut_down() {
                        failures.push((name.clone(), e));
                    }
                    registered.remove_if(&name, |_, current| Arc::ptr_eq(current, &tracker));
                }
                let _ = done_tx.send(failures);
            })
            .map_err(|e| LifecycleError::Shutdown(e.to_string()))?;

        match done_rx.recv_timeout(timeout) {
            Ok(failures) => {
                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(LifecycleError::Shutdown(describe(&failures)))
                }
            }
            Err(RecvTimeoutError::Timeout) => Err(LifecycleError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(LifecycleError::Shutdown(
                "shutdown worker exited before reporting".to_string(),
            )),
        }
    }
}
