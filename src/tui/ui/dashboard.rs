//! Dashboard view: Main overview screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::application::SessionSummary;
use crate::domain::{HistoryEntry, RiskLevel};
use crate::tui::styles::MedicalTheme;

/// Render the main dashboard view.
pub fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    summary: &SessionSummary,
    latest: Option<&HistoryEntry>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    super::render_screen_header(f, chunks[0], "Strokecheck", "Stroke Risk Assessment");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Session panels
            Constraint::Percentage(60), // Latest result
        ])
        .split(chunks[1]);

    render_session_panels(f, columns[0], summary);
    render_latest(f, columns[1], latest);
}

fn render_session_panels(f: &mut Frame, area: Rect, summary: &SessionSummary) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Session stats
            Constraint::Length(3), // High-risk share
            Constraint::Min(0),    // Quick actions
        ])
        .margin(1)
        .split(area);

    let stats = vec![
        stat_line("Assessments", summary.total.to_string()),
        Line::from(vec![
            Span::styled("  High: ", MedicalTheme::text_secondary()),
            Span::styled(
                summary.high.to_string(),
                MedicalTheme::risk_level(RiskLevel::High),
            ),
            Span::styled("  Low: ", MedicalTheme::text_secondary()),
            Span::styled(
                summary.low.to_string(),
                MedicalTheme::risk_level(RiskLevel::Low),
            ),
        ]),
        stat_line("Mean score", format!("{:.1}", summary.mean_score)),
        stat_line("Mean confidence", format!("{:.1}%", summary.mean_confidence)),
        stat_line(
            "Latest",
            summary
                .latest_level
                .map_or_else(|| "-".to_string(), |level| level.to_string()),
        ),
    ];

    let stats_block = Block::default()
        .title(Span::styled(" Session ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(stats).block(stats_block), chunks[0]);

    let share = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" High-Risk Share ", MedicalTheme::subtitle()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::score_gauge(summary.high_rate()))
        .ratio(summary.high_rate().clamp(0.0, 1.0))
        .label(format!("{:.0}%", summary.high_rate() * 100.0));
    f.render_widget(share, chunks[1]);

    let actions = vec![
        action_line("N", "New Assessment"),
        action_line("H", "History"),
        action_line("Q", "Quit"),
    ];
    let actions_block = Block::default()
        .title(Span::styled(" Quick Actions ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(actions).block(actions_block), chunks[2]);
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), MedicalTheme::text_secondary()),
        Span::styled(value, MedicalTheme::text()),
    ])
}

fn action_line(key: &str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
        Span::styled(desc, MedicalTheme::key_desc()),
    ])
}

fn render_latest(f: &mut Frame, area: Rect, latest: Option<&HistoryEntry>) {
    let block = Block::default()
        .title(Span::styled(" Latest Assessment ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let Some(entry) = latest else {
        let empty_msg = Paragraph::new(Line::from(Span::styled(
            "No assessments yet. Press [N] to start.",
            MedicalTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty_msg, area);
        return;
    };

    let assessment = &entry.assessment;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Assessment {}: ", entry.sequence),
                MedicalTheme::text_secondary(),
            ),
            Span::styled(
                format!("{} Risk", assessment.risk_level),
                MedicalTheme::risk_level(assessment.risk_level),
            ),
            Span::styled(
                format!("  (Score: {}/100)", assessment.risk_score),
                MedicalTheme::text(),
            ),
        ]),
        Line::from(""),
    ];

    if assessment.risk_factors.is_empty() {
        lines.push(Line::from(Span::styled(
            "No contributing factors",
            MedicalTheme::text_muted(),
        )));
    } else {
        lines.extend(assessment.risk_factors.iter().map(|factor| {
            Line::from(vec![
                Span::styled("- ", MedicalTheme::text_muted()),
                Span::styled(factor.clone(), MedicalTheme::text()),
            ])
        }));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
