//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Session integration (one `AssessmentSession` per run)

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand_chacha::ChaCha20Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{RngConfidence, SessionHistory};
use crate::application::{save_report, AssessmentSession};
use crate::config::AppConfig;

use super::ui::{
    dashboard::render_dashboard,
    history::{render_history, HistoryState, HISTORY_PAGE_SIZE},
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
    result::{render_result, ResultState},
};

/// Session type driven by the terminal UI.
pub type TuiSession = AssessmentSession<RngConfidence<ChaCha20Rng>, SessionHistory>;

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    PatientForm,
    Result,
    History,
}

/// Main application state
pub struct App {
    screen: Screen,

    should_quit: bool,

    /// Session context; dropped together with the app
    session: TuiSession,

    /// Directory reports are saved into
    report_dir: PathBuf,

    patient_form_state: PatientFormState,

    result_state: ResultState,

    history_state: HistoryState,
}

impl App {
    /// Create a new application from configuration.
    ///
    /// The confidence source is seeded from `config.seed` when set, otherwise
    /// from OS entropy.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let confidence = match config.seed {
            Some(seed) => {
                tracing::info!("Using fixed confidence seed");
                RngConfidence::seeded(seed)
            }
            None => RngConfidence::from_entropy(),
        };
        let session = AssessmentSession::new(confidence, SessionHistory::new());

        Self::with_dependencies(session, config.report_dir.clone())
    }

    /// Create application with an injected session (Composition Root pattern).
    #[must_use]
    pub fn with_dependencies(session: TuiSession, report_dir: PathBuf) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            session,
            report_dir,
            patient_form_state: PatientFormState::default(),
            result_state: ResultState::default(),
            history_state: HistoryState::default(),
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore the terminal even when the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!(
            "Session ended after {} assessment(s)",
            self.session.entry_count()
        );
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => {
                        let latest = self.session.latest();
                        render_dashboard(
                            f,
                            content_area,
                            &self.session.summary(),
                            latest.as_ref(),
                        );
                    }
                    Screen::PatientForm => {
                        render_patient_form(f, content_area, &self.patient_form_state)
                    }
                    Screen::Result => render_result(f, content_area, &self.result_state),
                    Screen::History => render_history(f, content_area, &self.history_state),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Nothing animates, so a slow poll keeps the loop idle.
            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Result => self.handle_result_key(key),
            Screen::History => self.handle_history_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => self.open_form(),
            KeyCode::Char('h') | KeyCode::Char('H') => self.open_history(0),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.patient_form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.patient_form_state.next_field();
            }
            KeyCode::Left => {
                self.patient_form_state.cycle_choice(-1);
            }
            KeyCode::Right => {
                self.patient_form_state.cycle_choice(1);
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.patient_form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.patient_form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.patient_form_state.delete_char();
            }
            KeyCode::Delete => {
                self.patient_form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match &self.result_state {
            ResultState::Complete { .. } => match key {
                KeyCode::Char('d') | KeyCode::Char('D') => self.download_report(),
                KeyCode::Char('h') | KeyCode::Char('H') => self.open_history(0),
                KeyCode::Char('n') | KeyCode::Char('N') => self.open_form(),
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                _ => {}
            },
            ResultState::Idle => {
                if key == KeyCode::Esc {
                    self.screen = Screen::Dashboard;
                }
            }
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Down | KeyCode::PageDown => {
                if let Some(next) = self.history_state.page.as_ref().and_then(|p| p.next_offset()) {
                    self.open_history(next);
                }
            }
            KeyCode::Up | KeyCode::PageUp => {
                if let Some(prev) = self.history_state.page.as_ref().and_then(|p| p.prev_offset()) {
                    self.open_history(prev);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => self.open_form(),
            _ => {}
        }
    }

    fn open_form(&mut self) {
        self.patient_form_state = PatientFormState::default();
        self.screen = Screen::PatientForm;
    }

    fn open_history(&mut self, offset: usize) {
        self.history_state.page = Some(self.session.history_page(offset, HISTORY_PAGE_SIZE));
        self.screen = Screen::History;
    }

    fn submit_patient_form(&mut self) {
        let record = match self.patient_form_state.to_patient_record() {
            Ok(record) => record,
            Err(e) => {
                self.patient_form_state.error_message = Some(e);
                return;
            }
        };

        // The form enforces the same ranges as the session, so a rejection
        // here only surfaces as a form message.
        let entry = match self.session.assess(record) {
            Ok(entry) => entry,
            Err(e) => {
                self.patient_form_state.error_message = Some(e.to_string());
                return;
            }
        };

        self.result_state = ResultState::Complete {
            entry,
            status: None,
        };
        // Clear plaintext buffers from the UI immediately.
        self.patient_form_state.clear_sensitive();
        self.screen = Screen::Result;
    }

    fn download_report(&mut self) {
        let ResultState::Complete { entry, status } = &mut self.result_state else {
            return;
        };

        *status = Some(
            match save_report(&self.report_dir, &entry.record, &entry.assessment) {
                Ok(path) => format!("Report saved to {}", path.display()),
                Err(e) => {
                    tracing::error!("Failed to save report: {}", e);
                    format!("Could not save report: {e}")
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::REPORT_FILE_NAME;
    use crate::domain::RiskLevel;

    fn create_test_app(report_dir: PathBuf) -> App {
        let session = AssessmentSession::new(RngConfidence::seeded(1), SessionHistory::new());
        App::with_dependencies(session, report_dir)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn submit_sample(app: &mut App) {
        press(app, KeyCode::Char('n'));
        press(app, KeyCode::Char('s'));
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_submit_sample_shows_result() {
        let mut app = create_test_app(PathBuf::from("."));
        submit_sample(&mut app);

        assert_eq!(app.screen, Screen::Result);
        match &app.result_state {
            ResultState::Complete { entry, status } => {
                assert_eq!(entry.sequence, 1);
                assert_eq!(entry.assessment.risk_score, 100);
                assert_eq!(entry.assessment.risk_level, RiskLevel::High);
                assert!(status.is_none());
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(app.session.entry_count(), 1);
    }

    #[test]
    fn test_invalid_form_stays_on_form() {
        let mut app = create_test_app(PathBuf::from("."));
        press(&mut app, KeyCode::Char('n'));
        // Age field: "50" -> "509"
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.screen, Screen::PatientForm);
        assert!(app.patient_form_state.error_message.is_some());
        assert_eq!(app.session.entry_count(), 0);
        assert!(matches!(app.result_state, ResultState::Idle));
    }

    #[test]
    fn test_result_screen_returns_to_dashboard() {
        let mut app = create_test_app(PathBuf::from("."));
        submit_sample(&mut app);
        assert_eq!(app.screen, Screen::Result);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(matches!(app.result_state, ResultState::Complete { .. }));
    }

    #[test]
    fn test_download_report_writes_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = create_test_app(dir.path().to_path_buf());
        submit_sample(&mut app);

        press(&mut app, KeyCode::Char('d'));

        let path = dir.path().join(REPORT_FILE_NAME);
        let report = std::fs::read_to_string(&path).expect("Report should exist");
        assert!(report.starts_with("Stroke Risk Assessment Report\n"));
        assert!(report.contains("Risk Score: 100/100"));

        match &app.result_state {
            ResultState::Complete { status, .. } => {
                assert!(status
                    .as_deref()
                    .is_some_and(|s| s.starts_with("Report saved to")));
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_history_paging_is_most_recent_first() {
        let mut app = create_test_app(PathBuf::from("."));
        for _ in 0..5 {
            submit_sample(&mut app);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.screen, Screen::Dashboard);

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.screen, Screen::History);
        let first: Vec<usize> = app
            .history_state
            .page
            .as_ref()
            .expect("Should have page")
            .items
            .iter()
            .map(|e| e.sequence)
            .collect();
        assert_eq!(first, vec![5, 4, 3]);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.history_state.offset(), 3);
        let second: Vec<usize> = app
            .history_state
            .page
            .as_ref()
            .expect("Should have page")
            .items
            .iter()
            .map(|e| e.sequence)
            .collect();
        assert_eq!(second, vec![2, 1]);

        // No older page: stays put
        press(&mut app, KeyCode::Down);
        assert_eq!(app.history_state.offset(), 3);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.history_state.offset(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = create_test_app(PathBuf::from("."));
        press(&mut app, KeyCode::Char('n'));
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = create_test_app(PathBuf::from("."));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_form_is_reset_after_submission() {
        let mut app = create_test_app(PathBuf::from("."));
        submit_sample(&mut app);
        press(&mut app, KeyCode::Char('n'));

        let record = app
            .patient_form_state
            .to_patient_record()
            .expect("Should parse defaults");
        assert_eq!(record, crate::domain::PatientRecord::default());
    }
}
