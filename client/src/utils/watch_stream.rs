//! 双watch通道 → Stream 合并
//!
//! 单通道直接使用 `tokio_stream::wrappers::WatchStream`;
//! 会话状态同时依赖两个存储,这里合并为"先推送当前组合,再推送每次变更"的流。

use futures::stream::{self, Stream};
use tokio::sync::watch;

/// 双通道合并流
///
/// 任一通道变更都推送一次 `(A, B)` 组合快照
pub fn watch_pair_stream<A, B>(
    rx_a: watch::Receiver<A>,
    rx_b: watch::Receiver<B>,
) -> impl Stream<Item = (A, B)> + Send + 'static
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    stream::unfold((rx_a, rx_b, true), |(mut a, mut b, first)| async move {
        if !first {
            let closed = tokio::select! {
                changed = a.changed() => changed.is_err(),
                changed = b.changed() => changed.is_err(),
            };
            if closed {
                return None;
            }
        }
        let value = (a.borrow_and_update().clone(), b.borrow_and_update().clone());
        Some((value, (a, b, false)))
    })
}
