//! Assessment result view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{HistoryEntry, RiskLevel};
use crate::tui::styles::MedicalTheme;

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing assessed yet
    #[default]
    Idle,
    /// Assessment finished; `status` carries the last report save outcome
    Complete {
        entry: HistoryEntry,
        status: Option<String>,
    },
}

/// Render the assessment result
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    super::render_screen_header(f, chunks[0], "Risk Assessment", "Weighted Rule Evaluation");

    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Complete { entry, .. } => render_entry(f, chunks[1], entry),
    }

    render_result_footer(f, chunks[2], state);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No assessment yet",
            MedicalTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter patient data to begin",
            MedicalTheme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_entry(f: &mut Frame, area: Rect, entry: &HistoryEntry) {
    let assessment = &entry.assessment;

    let block = Block::default()
        .title(Span::styled(
            format!(" Assessment {} ", entry.sequence),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Risk level
            Constraint::Length(3), // Score gauge
            Constraint::Length(1), // Confidence
            Constraint::Min(3),    // Factors
            Constraint::Length(3), // Recommendation
        ])
        .margin(1)
        .split(inner);

    let risk_style = MedicalTheme::risk_level(assessment.risk_level);
    let risk_icon = match assessment.risk_level {
        RiskLevel::Low => "OK",
        RiskLevel::High => "!",
    };

    let level = Paragraph::new(Line::from(Span::styled(
        format!("{} {} Risk", risk_icon, assessment.risk_level),
        risk_style.add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(level, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Risk Score ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::score_gauge(assessment.score_ratio()))
        .ratio(assessment.score_ratio().clamp(0.0, 1.0))
        .label(format!("{}/100", assessment.risk_score));
    f.render_widget(gauge, chunks[1]);

    let confidence = Paragraph::new(Line::from(vec![
        Span::styled("Confidence: ", MedicalTheme::text_secondary()),
        Span::styled(
            format!("{:.1}%", assessment.confidence),
            MedicalTheme::text(),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(confidence, chunks[2]);

    let factor_lines: Vec<Line> = if assessment.risk_factors.is_empty() {
        vec![Line::from(Span::styled(
            "No contributing factors",
            MedicalTheme::text_muted(),
        ))]
    } else {
        assessment
            .risk_factors
            .iter()
            .map(|factor| {
                Line::from(vec![
                    Span::styled("- ", MedicalTheme::text_muted()),
                    Span::styled(factor.as_str(), MedicalTheme::text()),
                ])
            })
            .collect()
    };
    let factors = Paragraph::new(factor_lines).block(
        Block::default()
            .title(Span::styled(" Risk Factors ", MedicalTheme::text_secondary()))
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(factors, chunks[3]);

    let recommendation = Paragraph::new(Span::styled(
        assessment.recommendation.as_str(),
        MedicalTheme::info(),
    ))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(recommendation, chunks[4]);
}

fn render_result_footer(f: &mut Frame, area: Rect, state: &ResultState) {
    match state {
        ResultState::Complete {
            status: Some(status),
            ..
        } => {
            let footer = Paragraph::new(Line::from(Span::styled(
                status.as_str(),
                MedicalTheme::warning(),
            )))
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(MedicalTheme::border()),
            );
            f.render_widget(footer, area);
        }
        ResultState::Complete { .. } => super::render_key_footer(
            f,
            area,
            &[
                ("D", "Download Report"),
                ("H", "History"),
                ("N", "New Assessment"),
                ("Enter", "Dashboard"),
            ],
        ),
        ResultState::Idle => super::render_key_footer(f, area, &[("Esc", "Dashboard")]),
    }
}
