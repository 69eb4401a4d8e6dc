//! Patient data input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{Gender, PatientRecord, SmokingStatus, WorkType};
use crate::tui::styles::MedicalTheme;

const YES_NO: [&str; 2] = ["No", "Yes"];

/// Editable value of a form field.
#[derive(Debug, Clone)]
pub enum FieldInput {
    /// Free text parsed as a number on submit
    Numeric { value: String, min: f64, max: f64 },
    /// Fixed list of options cycled with Left/Right
    Choice {
        options: Vec<&'static str>,
        selected: usize,
    },
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub input: FieldInput,
}

impl FormField {
    fn numeric(label: &'static str, hint: &'static str, default: &str, min: f64, max: f64) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Numeric {
                value: default.to_string(),
                min,
                max,
            },
        }
    }

    fn choice(label: &'static str, hint: &'static str, options: Vec<&'static str>) -> Self {
        Self {
            label,
            hint,
            input: FieldInput::Choice {
                options,
                selected: 0,
            },
        }
    }

    fn parse_number(&self) -> Result<f64, String> {
        let FieldInput::Numeric { value, min, max } = &self.input else {
            return Err(format!("{}: Not a numeric field", self.label));
        };

        let parsed: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("{}: Invalid number", self.label))?;

        if !(*min..=*max).contains(&parsed) {
            return Err(format!(
                "{}: Value must be between {} and {}",
                self.label, min, max
            ));
        }
        Ok(parsed)
    }

    fn selected_index(&self) -> usize {
        match &self.input {
            FieldInput::Choice { selected, .. } => *selected,
            FieldInput::Numeric { .. } => 0,
        }
    }

    fn set_choice(&mut self, index: usize) {
        if let FieldInput::Choice { options, selected } = &mut self.input {
            if index < options.len() {
                *selected = index;
            }
        }
    }

    fn set_value(&mut self, text: &str) {
        if let FieldInput::Numeric { value, .. } = &mut self.input {
            value.zeroize();
            value.push_str(text);
        }
    }
}

// Field positions; order matches the on-screen layout.
const AGE: usize = 0;
const GENDER: usize = 1;
const BMI: usize = 2;
const GLUCOSE: usize = 3;
const HYPERTENSION: usize = 4;
const HEART_DISEASE: usize = 5;
const SMOKING: usize = 6;
const WORK_TYPE: usize = 7;

/// Patient form state
pub struct PatientFormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::numeric("Age", "years (0-120)", "50", 0.0, 120.0),
                FormField::choice(
                    "Gender",
                    "biological gender",
                    Gender::ALL.iter().map(Gender::label).collect(),
                ),
                FormField::numeric("BMI", "kg/m² (10-50)", "24.0", 10.0, 50.0),
                FormField::numeric(
                    "Avg Glucose",
                    "mg/dL (50-400)",
                    "100.0",
                    50.0,
                    400.0,
                ),
                FormField::choice("Hypertension", "high blood pressure", YES_NO.to_vec()),
                FormField::choice("Heart Disease", "history of heart disease", YES_NO.to_vec()),
                FormField::choice(
                    "Smoking Status",
                    "current or past smoking",
                    SmokingStatus::ALL.iter().map(SmokingStatus::label).collect(),
                ),
                FormField::choice(
                    "Work Type",
                    "employment type",
                    WorkType::ALL.iter().map(WorkType::label).collect(),
                ),
            ],
            selected_field: 0,
            error_message: None,
        }
    }
}

impl PatientFormState {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        if let FieldInput::Numeric { value, .. } = &mut self.fields[self.selected_field].input {
            if c.is_ascii_digit() || c == '.' {
                value.push(c);
                self.error_message = None;
            }
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldInput::Numeric { value, .. } = &mut self.fields[self.selected_field].input {
            value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        if let FieldInput::Numeric { value, .. } = &mut self.fields[self.selected_field].input {
            value.zeroize();
        }
    }

    /// Cycle the current choice field forward (`step = 1`) or backward (`step = -1`).
    pub fn cycle_choice(&mut self, step: isize) {
        if let FieldInput::Choice { options, selected } = &mut self.fields[self.selected_field].input
        {
            let len = options.len() as isize;
            *selected = (*selected as isize + step).rem_euclid(len) as usize;
            self.error_message = None;
        }
    }

    /// Wipe typed values and restore the defaults.
    ///
    /// Called right after a submission so patient values do not linger in the
    /// form buffers.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            if let FieldInput::Numeric { value, .. } = &mut field.input {
                value.zeroize();
            }
        }
        *self = Self::default();
    }

    /// Validate and convert to a PatientRecord
    pub fn to_patient_record(&self) -> Result<PatientRecord, String> {
        let age = self.fields[AGE].parse_number()?;
        if age.fract() != 0.0 {
            return Err(format!("{}: Must be a whole number", self.fields[AGE].label));
        }

        Ok(PatientRecord {
            // Range-checked above, so the cast is exact.
            age: age as u8,
            gender: Gender::ALL[self.fields[GENDER].selected_index()],
            bmi: self.fields[BMI].parse_number()?,
            avg_glucose_level: self.fields[GLUCOSE].parse_number()?,
            hypertension: self.fields[HYPERTENSION].selected_index() == 1,
            heart_disease: self.fields[HEART_DISEASE].selected_index() == 1,
            smoking_status: SmokingStatus::ALL[self.fields[SMOKING].selected_index()],
            work_type: WorkType::ALL[self.fields[WORK_TYPE].selected_index()],
        })
    }

    /// Load sample data for testing (typical high-risk patient)
    pub fn load_sample_data(&mut self) {
        // 70yo male, hypertensive, diabetic-range glucose, obese, smoker
        self.fields[AGE].set_value("70");
        self.fields[GENDER].set_choice(0);
        self.fields[BMI].set_value("32.0");
        self.fields[GLUCOSE].set_value("130.0");
        self.fields[HYPERTENSION].set_choice(1);
        self.fields[HEART_DISEASE].set_choice(0);
        self.fields[SMOKING].set_choice(2);
        self.fields[WORK_TYPE].set_choice(0);
        self.error_message = None;
    }
}

/// Render the patient data input form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    super::render_screen_header(f, chunks[0], "Patient Information", "Stroke Risk Attributes");
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &PatientFormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (state.fields.len() + 1) / 2;

    render_field_column(f, columns[0], &state.fields[..mid], 0, state.selected_field);
    render_field_column(
        f,
        columns[1],
        &state.fields[mid..],
        mid,
        state.selected_field,
    );
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut spans = vec![Span::raw(" ")];
        match &field.input {
            FieldInput::Numeric { value, .. } if value.is_empty() => {
                spans.push(Span::styled(field.hint, MedicalTheme::text_muted()));
            }
            FieldInput::Numeric { value, .. } => {
                spans.push(Span::styled(value.as_str(), MedicalTheme::text()));
            }
            FieldInput::Choice { options, selected } => {
                spans.push(Span::styled("◀ ", MedicalTheme::text_muted()));
                spans.push(Span::styled(options[*selected], MedicalTheme::text()));
                spans.push(Span::styled(" ▶", MedicalTheme::text_muted()));
            }
        }
        if is_selected {
            spans.push(Span::styled("▌", MedicalTheme::cursor()));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[i]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &PatientFormState) {
    if let Some(err) = &state.error_message {
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ]))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        );
        f.render_widget(footer, area);
        return;
    }

    super::render_key_footer(
        f,
        area,
        &[
            ("↑↓", "Navigate"),
            ("←→", "Change"),
            ("Enter", "Assess Risk"),
            ("S", "Sample Data"),
            ("Esc", "Cancel"),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let state = PatientFormState::default();
        let record = state.to_patient_record().expect("Should parse defaults");
        assert_eq!(record, PatientRecord::default());
    }

    #[test]
    fn test_sample_data_parses() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        let record = state.to_patient_record().expect("Should parse sample");

        assert_eq!(record.age, 70);
        assert!(record.hypertension);
        assert!(!record.heart_disease);
        assert_eq!(record.smoking_status, SmokingStatus::Currently);
        assert_eq!(record.work_type, WorkType::Private);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut state = PatientFormState::default();
        state.fields[BMI].set_value("55");
        let err = state.to_patient_record().expect_err("Should reject");
        assert!(err.starts_with("BMI"));
    }

    #[test]
    fn test_fractional_age_rejected() {
        let mut state = PatientFormState::default();
        state.fields[AGE].set_value("40.5");
        assert!(state.to_patient_record().is_err());
    }

    #[test]
    fn test_choice_cycling_wraps() {
        let mut state = PatientFormState::default();
        state.selected_field = WORK_TYPE;

        state.cycle_choice(-1);
        let record = state.to_patient_record().expect("Should parse");
        assert_eq!(record.work_type, WorkType::NeverWorked);

        state.cycle_choice(1);
        let record = state.to_patient_record().expect("Should parse");
        assert_eq!(record.work_type, WorkType::Private);
    }

    #[test]
    fn test_typing_ignored_on_choice_fields() {
        let mut state = PatientFormState::default();
        state.selected_field = GENDER;
        state.input_char('7');
        state.delete_char();
        assert_eq!(state.fields[GENDER].selected_index(), 0);
    }

    #[test]
    fn test_clear_sensitive_restores_defaults() {
        let mut state = PatientFormState::default();
        state.load_sample_data();
        state.selected_field = 3;
        state.clear_sensitive();

        assert_eq!(state.selected_field, 0);
        let record = state.to_patient_record().expect("Should parse");
        assert_eq!(record, PatientRecord::default());
    }
}
