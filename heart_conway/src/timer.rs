// timer.rs - Delayed grace callback on the tokio runtime

use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;

/// Called from the timer task when it fires, typically to ask the UI for a
/// repaint so the expiry is noticed without user input.
pub type RepaintFn = Arc<dyn Fn() + Send + Sync>;

/// A one-shot delay whose task is aborted when the timer is cancelled or
/// dropped, so it can never fire into a torn-down scene.
pub struct GraceTimer {
    task: JoinHandle<()>,
    fired: oneshot::Receiver<()>,
    done: bool,
}

impl GraceTimer {
    pub fn start(runtime: &Handle, delay: Duration, repaint: RepaintFn) -> Self {
        let (tx, rx) = oneshot::channel();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(()).is_ok() {
                repaint();
            }
        });
        log::debug!("grace timer armed for {delay:?}");
        Self {
            task,
            fired: rx,
            done: false,
        }
    }

    /// Returns `true` exactly once, on the first poll after the delay ran out.
    pub fn poll(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.fired.try_recv() {
            Ok(()) => {
                self.done = true;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                self.done = true;
                false
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.done && !self.task.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for GraceTimer {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            log::debug!("grace timer cancelled");
        }
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, RepaintFn) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let repaint: RepaintFn = Arc::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        (hits, repaint)
    }

    #[tokio::test]
    async fn test_fires_once() {
        let (hits, repaint) = counter();
        let mut timer = GraceTimer::start(&Handle::current(), Duration::from_millis(10), repaint);
        assert!(!timer.poll());
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(timer.poll());
        assert!(!timer.poll());
        assert!(!timer.is_pending());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_prevents_callback() {
        let (hits, repaint) = counter();
        let timer = GraceTimer::start(&Handle::current(), Duration::from_millis(10), repaint);
        assert!(timer.is_pending());
        timer.cancel();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_drop_prevents_callback() {
        let (hits, repaint) = counter();
        {
            let _timer = GraceTimer::start(&Handle::current(), Duration::from_millis(10), repaint);
        }
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
