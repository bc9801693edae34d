use std::time::Duration;

use quiz_core::model::Question;
use quiz_core::{AnswerFeedback, QuizSession, SessionState, TickOutcome};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

use super::countdown::{Countdown, Tick, TickReceiver};

/// Final tally of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub series_name: String,
    pub score: u32,
    pub total: usize,
}

/// Session controller: owns a [`QuizSession`] and the countdown for its
/// open question.
///
/// The countdown only sends [`Tick`]s; the owner feeds them back through
/// [`on_tick`](Self::on_tick). The countdown is re-armed whenever a question
/// resolves and stopped for good once the session finishes, which also
/// closes the tick channel.
#[derive(Debug)]
pub struct QuizRun {
    session: QuizSession,
    period: Option<Duration>,
    countdown: Option<Countdown>,
    tick_tx: Option<UnboundedSender<Tick>>,
    tick_rx: Option<TickReceiver>,
}

impl QuizRun {
    /// A run without a background timer; time only passes through
    /// [`tick`](Self::tick).
    #[must_use]
    pub fn manual(session: QuizSession) -> Self {
        Self {
            session,
            period: None,
            countdown: None,
            tick_tx: None,
            tick_rx: None,
        }
    }

    /// A run whose countdown ticks once per `period`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn with_countdown(session: QuizSession, period: Duration) -> Self {
        let (tx, rx) = unbounded_channel();
        let mut run = Self {
            session,
            period: Some(period),
            countdown: None,
            tick_tx: Some(tx),
            tick_rx: Some(rx),
        };
        run.rearm();
        run
    }

    /// Hand the tick receiver to whoever drives the run. Returns `None` for a
    /// manual run or if already taken.
    pub fn take_ticks(&mut self) -> Option<TickReceiver> {
        self.tick_rx.take()
    }

    /// Apply a countdown tick. Ticks for a question that is no longer open
    /// are ignored.
    pub fn on_tick(&mut self, tick: Tick) -> TickOutcome {
        if self.session.current_index() != Some(tick.question_index) {
            warn!(
                tick = tick.question_index,
                current = ?self.session.current_index(),
                "stale tick ignored"
            );
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    /// Count down one second on the open question.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        if let TickOutcome::TimedOut { question_index, .. } = &outcome {
            debug!(question_index, "question timed out");
            self.rearm();
        }
        outcome
    }

    /// Answer the open question; `None` if nothing is accepting answers.
    pub fn submit(&mut self, choice: usize) -> Option<AnswerFeedback> {
        let feedback = self.session.submit(choice)?;
        debug!(
            question_index = feedback.question_index,
            correct = feedback.correct,
            "answer submitted"
        );
        self.rearm();
        Some(feedback)
    }

    /// Stop the countdown without finishing the session.
    pub fn abandon(&mut self) {
        self.stop();
        debug!(series = self.session.series_name(), "quiz abandoned");
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.session.remaining_secs()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    #[must_use]
    pub fn has_active_countdown(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_active)
    }

    /// The tally, once every question has been resolved.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        let (score, total) = self.session.final_score()?;
        Some(QuizResult {
            series_name: self.session.series_name().to_owned(),
            score,
            total,
        })
    }

    fn rearm(&mut self) {
        if let Some(old) = self.countdown.take() {
            debug!(question_index = old.question_index(), "countdown cancelled");
            old.cancel();
        }
        let Some(index) = self.session.current_index() else {
            self.stop();
            return;
        };
        if let (Some(period), Some(tx)) = (self.period, self.tick_tx.as_ref()) {
            self.countdown = Some(Countdown::spawn(period, index, tx.clone()));
        }
    }

    fn stop(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            debug!(question_index = countdown.question_index(), "countdown stopped");
            countdown.cancel();
        }
        self.tick_tx = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quiz_core::QUESTION_TIME_LIMIT_SECS;
    use quiz_core::model::QuestionSeries;

    fn session(correct: &[usize]) -> QuizSession {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| Question::new(format!("Q{i}?"), ["a", "b", "c", "d"], c).unwrap())
            .collect();
        QuizSession::start(QuestionSeries::new("Run", questions).unwrap()).unwrap()
    }

    #[test]
    fn manual_run_scores_and_reports_result() {
        let mut run = QuizRun::manual(session(&[1, 0]));
        assert!(run.take_ticks().is_none());
        assert!(run.result().is_none());

        assert!(run.submit(1).unwrap().correct);
        assert!(!run.submit(1).unwrap().correct);

        assert_eq!(
            run.result(),
            Some(QuizResult {
                series_name: "Run".into(),
                score: 1,
                total: 2,
            })
        );
    }

    #[test]
    fn stale_ticks_do_not_touch_the_next_question() {
        let mut run = QuizRun::manual(session(&[0, 0]));
        run.submit(0).unwrap();
        assert_eq!(run.on_tick(Tick { question_index: 0 }), TickOutcome::Ignored);
        assert_eq!(run.remaining_secs(), QUESTION_TIME_LIMIT_SECS);

        assert_eq!(
            run.on_tick(Tick { question_index: 1 }),
            TickOutcome::Running {
                remaining_secs: QUESTION_TIME_LIMIT_SECS - 1
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_times_out_the_open_question() {
        let mut run = QuizRun::with_countdown(session(&[2, 3]), Duration::from_secs(1));
        let mut ticks = run.take_ticks().unwrap();

        let mut last = TickOutcome::Ignored;
        for _ in 0..QUESTION_TIME_LIMIT_SECS {
            let tick = ticks.recv().await.unwrap();
            last = run.on_tick(tick);
        }
        assert_eq!(
            last,
            TickOutcome::TimedOut {
                question_index: 0,
                correct_choice_text: "c".into(),
            }
        );
        assert_eq!(run.state(), SessionState::AwaitingAnswer { index: 1 });
        assert!(run.has_active_countdown());
    }

    #[tokio::test(start_paused = true)]
    async fn finishing_closes_the_tick_channel() {
        let mut run = QuizRun::with_countdown(session(&[0]), Duration::from_secs(1));
        let mut ticks = run.take_ticks().unwrap();

        run.submit(0).unwrap();
        assert!(run.is_finished());
        assert!(!run.has_active_countdown());
        assert_eq!(ticks.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_run_stops_ticking() {
        let mut run = QuizRun::with_countdown(session(&[0, 1]), Duration::from_secs(1));
        let mut ticks = run.take_ticks().unwrap();
        assert!(ticks.recv().await.is_some());

        drop(run);
        assert_eq!(ticks.recv().await, None);
    }
}
