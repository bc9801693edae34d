use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

/// One elapsed period for the question at `question_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub question_index: usize,
}

/// Receiving end of a run's tick channel.
pub type TickReceiver = UnboundedReceiver<Tick>;

/// Background timer that emits a [`Tick`] every period until cancelled.
///
/// Dropping the countdown cancels it.
#[derive(Debug)]
pub struct Countdown {
    question_index: usize,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Start ticking for `question_index`. The first tick fires one period
    /// from now.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(period: Duration, question_index: usize, ticks: UnboundedSender<Tick>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticks.send(Tick { question_index }).is_err() {
                    debug!(question_index, "tick receiver gone, countdown stopping");
                    break;
                }
            }
        });
        Self {
            question_index,
            handle,
        }
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test(start_paused = true)]
    async fn emits_one_tick_per_period() {
        let (tx, mut rx) = unbounded_channel();
        let countdown = Countdown::spawn(Duration::from_secs(1), 3, tx);
        assert_eq!(countdown.question_index(), 3);

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(Tick { question_index: 3 }));
        }
        assert!(countdown.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_countdown_stops_sending() {
        let (tx, mut rx) = unbounded_channel();
        let countdown = Countdown::spawn(Duration::from_secs(1), 0, tx);
        assert_eq!(rx.recv().await, Some(Tick { question_index: 0 }));

        countdown.cancel();
        // The aborted task drops its sender, which closes the channel.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels() {
        let (tx, mut rx) = unbounded_channel();
        drop(Countdown::spawn(Duration::from_secs(1), 0, tx));
        assert_eq!(rx.recv().await, None);
    }
}
