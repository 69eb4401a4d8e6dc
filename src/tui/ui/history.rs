//! Assessment history view (most recent first).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::HistoryEntry;
use crate::ports::HistoryPage;
use crate::tui::styles::MedicalTheme;

/// Entries shown per page.
pub const HISTORY_PAGE_SIZE: usize = 3;

/// History screen state
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub page: Option<HistoryPage>,
}

impl HistoryState {
    /// Offset of the page currently displayed.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.page.as_ref().map_or(0, |p| p.offset)
    }
}

/// Render the history view
pub fn render_history(f: &mut Frame, area: Rect, state: &HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Entries
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let subtitle = match &state.page {
        Some(page) if page.total_count > 0 => format!(
            "Entries {}-{} of {}",
            page.offset + 1,
            page.offset + page.items.len(),
            page.total_count
        ),
        _ => "Session only".to_string(),
    };
    super::render_screen_header(f, chunks[0], "Assessment History", &subtitle);

    match &state.page {
        Some(page) if !page.items.is_empty() => render_entries(f, chunks[1], &page.items),
        _ => {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No assessments in this session yet. Press [N] to start.",
                MedicalTheme::text_muted(),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(MedicalTheme::border()),
            );
            f.render_widget(empty, chunks[1]);
        }
    }

    super::render_key_footer(
        f,
        chunks[2],
        &[
            ("↑", "Newer"),
            ("↓", "Older"),
            ("N", "New Assessment"),
            ("Esc", "Dashboard"),
        ],
    );
}

fn render_entries(f: &mut Frame, area: Rect, entries: &[HistoryEntry]) {
    let constraints: Vec<Constraint> = entries
        .iter()
        .map(|_| Constraint::Ratio(1, entries.len() as u32))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (entry, chunk) in entries.iter().zip(chunks.iter()) {
        render_entry_card(f, *chunk, entry);
    }
}

fn render_entry_card(f: &mut Frame, area: Rect, entry: &HistoryEntry) {
    let assessment = &entry.assessment;
    let record_json = serde_json::to_string(&entry.record)
        .unwrap_or_else(|_| "<unavailable>".to_string());

    let lines = vec![
        Line::from(Span::styled(record_json, MedicalTheme::text_muted())),
        Line::from(vec![
            Span::styled("Risk Level: ", MedicalTheme::text_secondary()),
            Span::styled(
                assessment.risk_level.to_string(),
                MedicalTheme::risk_level(assessment.risk_level),
            ),
            Span::styled("  Risk Score: ", MedicalTheme::text_secondary()),
            Span::styled(assessment.risk_score.to_string(), MedicalTheme::text()),
            Span::styled("  Confidence: ", MedicalTheme::text_secondary()),
            Span::styled(
                format!("{:.1}%", assessment.confidence),
                MedicalTheme::text(),
            ),
        ]),
        Line::from(Span::styled(
            entry.created_at.format("%H:%M:%S UTC").to_string(),
            MedicalTheme::text_muted(),
        )),
    ];

    let block = Block::default()
        .title(Span::styled(
            format!(" Assessment {} ", entry.sequence),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
