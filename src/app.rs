use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::progress::Evaluation;
use crate::samples::SampleDeck;
use crate::session::{Phase, Session};

/// What the event loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    None,
    Redraw,
    Quit,
}

/// Headless state of the typing test, driven by key events and ticks
#[derive(Debug)]
pub struct App {
    pub deck: SampleDeck,
    pub input: String,
    pub session: Session,
    pub evaluation: Evaluation,
    /// live timer value, refreshed on ticks while the session is active
    pub elapsed: Duration,
}

impl App {
    pub fn new(deck: SampleDeck) -> Self {
        Self {
            deck,
            input: String::new(),
            session: Session::new(),
            evaluation: Evaluation::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn sample(&self) -> &'static str {
        self.deck.current()
    }

    /// The input as compared against the sample, surrounding whitespace removed
    pub fn typed(&self) -> &str {
        self.input.trim()
    }

    /// Sample position of the next char to type, `None` once completed.
    /// Counts trailing whitespace the comparison itself ignores.
    pub fn cursor(&self) -> Option<usize> {
        if self.session.is_completed() {
            return None;
        }
        let leading = self.input.chars().take_while(|c| c.is_whitespace()).count();
        Some(self.input.chars().count() - leading)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => AppAction::Quit,
            KeyCode::Char('c') if ctrl => AppAction::Quit,
            KeyCode::Char('r') if ctrl => {
                self.reset();
                AppAction::Redraw
            }
            KeyCode::Tab => {
                self.reset();
                AppAction::Redraw
            }
            // newlines never make it into the input
            KeyCode::Enter => AppAction::None,
            KeyCode::Backspace => {
                if self.session.is_completed() || self.input.pop().is_none() {
                    return AppAction::None;
                }
                self.refresh(now);
                AppAction::Redraw
            }
            KeyCode::Char(c) if !ctrl => {
                if self.session.is_completed() {
                    return AppAction::None;
                }
                self.input.push(c);
                self.refresh(now);
                AppAction::Redraw
            }
            _ => AppAction::None,
        }
    }

    /// Returns true when the timer display changed and needs a redraw
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match self.session.on_tick(now) {
            Some(elapsed) => {
                self.elapsed = elapsed;
                true
            }
            None => false,
        }
    }

    /// Move to the next sample sentence and start over
    pub fn reset(&mut self) {
        self.deck.advance();
        self.input.clear();
        self.session.reset();
        self.evaluation = Evaluation::default();
        self.elapsed = Duration::ZERO;
        info!(sample = self.deck.index() + 1, "test reset");
    }

    pub fn stats_line(&self) -> String {
        match self.session.phase() {
            Phase::Idle => "Time: 0.0s | WPM: 0 | Accuracy: 0%".to_string(),
            Phase::Active { .. } => format!("Time: {:.1}s", self.elapsed.as_secs_f64()),
            Phase::Completed { elapsed, metrics } => {
                format!("Time: {:.1}s | {}", elapsed.as_secs_f64(), metrics)
            }
        }
    }

    fn refresh(&mut self, now: Instant) {
        let sample = self.deck.current();
        let typed = self.input.trim();
        self.evaluation = self.session.on_input(sample, typed, now);
        if let Phase::Completed { elapsed, .. } = self.session.phase() {
            self.elapsed = elapsed;
        }
        debug!(
            typed = typed.chars().count(),
            incorrect = self.evaluation.incorrect_count(),
            extra = self.evaluation.extra_count(),
            "input evaluated"
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SampleDeck::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::CharState;
    use crate::samples::SAMPLE_TEXTS;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str, now: Instant) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_new_app_is_idle() {
        let app = App::default();
        assert_eq!(app.sample(), SAMPLE_TEXTS[0]);
        assert!(app.session.is_idle());
        assert_eq!(app.stats_line(), "Time: 0.0s | WPM: 0 | Accuracy: 0%");
    }

    #[test]
    fn test_typing_starts_session_and_classifies() {
        let mut app = App::default();
        let now = Instant::now();

        type_str(&mut app, "Thx", now);

        assert!(app.session.is_active());
        assert_eq!(app.evaluation.state_at(0), Some(CharState::Correct));
        assert_eq!(app.evaluation.state_at(2), Some(CharState::Incorrect));
        assert_eq!(app.stats_line(), "Time: 0.0s");
    }

    #[test]
    fn test_leading_space_does_not_start_session() {
        let mut app = App::default();
        app.handle_key(key(KeyCode::Char(' ')), Instant::now());
        assert!(app.session.is_idle());
        assert!(app.evaluation.classifications.is_empty());
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut app = App::default();
        let now = Instant::now();
        type_str(&mut app, "Thx", now);

        assert_eq!(app.handle_key(key(KeyCode::Backspace), now), AppAction::Redraw);

        assert_eq!(app.input, "Th");
        assert_eq!(app.evaluation.incorrect_count(), 0);
    }

    #[test]
    fn test_backspace_on_empty_input_is_noop() {
        let mut app = App::default();
        assert_eq!(
            app.handle_key(key(KeyCode::Backspace), Instant::now()),
            AppAction::None
        );
    }

    #[test]
    fn test_cursor_counts_trailing_but_not_leading_space() {
        let mut app = App::default();
        let now = Instant::now();
        assert_eq!(app.cursor(), Some(0));

        type_str(&mut app, "  The ", now);
        assert_eq!(app.cursor(), Some(4));
        assert_eq!(app.typed(), "The");

        type_str(&mut app, &SAMPLE_TEXTS[0][4..], now);
        assert!(app.session.is_completed());
        assert_eq!(app.cursor(), None);
    }

    #[test]
    fn test_enter_is_ignored() {
        let mut app = App::default();
        assert_eq!(app.handle_key(key(KeyCode::Enter), Instant::now()), AppAction::None);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_full_sample_completes_with_results() {
        let mut app = App::new(SampleDeck::with_start(&SAMPLE_TEXTS, 0));
        let t0 = Instant::now();

        type_str(&mut app, "The quick brown fox jumps over the lazy", t0);
        type_str(&mut app, " dog.", t0 + Duration::from_secs(6));

        assert!(app.evaluation.completed);
        assert!(app.session.is_completed());
        // 9 words in 6 seconds
        assert_eq!(app.stats_line(), "Time: 6.0s | WPM: 90 | Accuracy: 100.0%");
    }

    #[test]
    fn test_completed_session_ignores_typing() {
        let mut app = App::default();
        let now = Instant::now();
        type_str(&mut app, SAMPLE_TEXTS[0], now);

        assert_eq!(app.handle_key(key(KeyCode::Char('x')), now), AppAction::None);
        assert_eq!(app.handle_key(key(KeyCode::Backspace), now), AppAction::None);
        assert_eq!(app.input, SAMPLE_TEXTS[0]);
    }

    #[test]
    fn test_tab_resets_to_next_sample() {
        let mut app = App::default();
        let now = Instant::now();
        type_str(&mut app, "The", now);

        app.handle_key(key(KeyCode::Tab), now);

        assert_eq!(app.sample(), SAMPLE_TEXTS[1]);
        assert!(app.input.is_empty());
        assert!(app.evaluation.classifications.is_empty());
        assert!(app.session.is_idle());
        assert_eq!(app.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_ctrl_r_resets_and_wraps() {
        let mut app = App::new(SampleDeck::with_start(&SAMPLE_TEXTS, 4));
        app.handle_key(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert_eq!(app.sample(), SAMPLE_TEXTS[0]);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        let now = Instant::now();
        assert_eq!(app.handle_key(key(KeyCode::Esc), now), AppAction::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now),
            AppAction::Quit
        );
    }

    #[test]
    fn test_tick_updates_elapsed_only_while_active() {
        let mut app = App::default();
        let t0 = Instant::now();
        assert!(!app.on_tick(t0));

        type_str(&mut app, "T", t0);
        assert!(app.on_tick(t0 + Duration::from_millis(1500)));
        assert_eq!(app.stats_line(), "Time: 1.5s");

        app.reset();
        assert!(!app.on_tick(t0 + Duration::from_secs(3)));
    }
}
