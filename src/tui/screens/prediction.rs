//! The prediction form screen.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, Wrap},
};

use crate::form::{FormError, PredictionForm};
use crate::model::{Distance, FormInput, Gender, RequestOutcome, Stroke};
use crate::predict::PredictError;

/// Which control has focus, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Year,
    Distance,
    Stroke,
    Gender,
    Submit,
}

impl Focus {
    const ORDER: [Self; 5] = [
        Self::Year,
        Self::Distance,
        Self::Stroke,
        Self::Gender,
        Self::Submit,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

pub struct PredictionScreen {
    form: PredictionForm,
    focus: Focus,
    /// Raw year text as typed. The form holds its parsed value.
    year_text: String,
    /// Shown when a submission is refused before it starts.
    notice: Option<String>,
}

impl PredictionScreen {
    pub fn new() -> Self {
        let form = PredictionForm::new();
        let year_text = form
            .input()
            .year
            .map(|y| y.to_string())
            .unwrap_or_default();
        Self {
            form,
            focus: Focus::Year,
            year_text,
            notice: None,
        }
    }

    pub fn focus_next(&mut self) {
        let i = self.focus.index();
        if i + 1 < Focus::ORDER.len() {
            self.focus = Focus::ORDER[i + 1];
        }
    }

    pub fn focus_prev(&mut self) {
        let i = self.focus.index();
        if i > 0 {
            self.focus = Focus::ORDER[i - 1];
        }
    }

    /// Whether keystrokes currently go into the year input.
    pub fn is_editing_year(&self) -> bool {
        self.focus == Focus::Year
    }

    /// Type into the year input. Only characters a number input takes are
    /// kept: digits anywhere, a minus sign only in front.
    pub fn on_char(&mut self, c: char) {
        let accepted = c.is_ascii_digit() || (c == '-' && self.year_text.is_empty());
        if self.focus == Focus::Year && accepted {
            self.year_text.push(c);
            self.sync_year();
        }
    }

    pub fn on_backspace(&mut self) {
        if self.focus == Focus::Year {
            self.year_text.pop();
            self.sync_year();
        }
    }

    /// Step the focused selector to its next (or previous) option, wrapping.
    pub fn cycle_option(&mut self, forward: bool) {
        let input = self.form.input().clone();
        match self.focus {
            Focus::Distance => self
                .form
                .set_distance(cycle(&Distance::ALL, input.distance, forward)),
            Focus::Stroke => self
                .form
                .set_stroke(cycle(&Stroke::ALL, input.stroke, forward)),
            Focus::Gender => self
                .form
                .set_gender(cycle(&Gender::ALL, input.gender, forward)),
            Focus::Year | Focus::Submit => {}
        }
    }

    /// Enter submits the form from any control.
    ///
    /// Returns the input to send, or `None` when the submit control is
    /// disabled or the form refused to submit.
    pub fn on_enter(&mut self) -> Option<FormInput> {
        if self.form.is_pending() {
            return None;
        }
        match self.form.begin_submit() {
            Ok(input) => {
                self.notice = None;
                Some(input)
            }
            Err(FormError::YearRequired) => {
                self.focus = Focus::Year;
                self.notice = Some("Preencha o ano da competição.".to_string());
                None
            }
            Err(e) => {
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    /// A round trip came back.
    pub fn settle(&mut self, result: Result<String, PredictError>) {
        self.form.settle(result);
    }

    pub fn outcome(&self) -> &RequestOutcome {
        self.form.outcome()
    }

    fn sync_year(&mut self) {
        self.notice = None;
        self.form.set_year_text(&self.year_text);
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3),  // title
            Constraint::Length(11), // fields + button
            Constraint::Min(0),     // outcome
            Constraint::Length(1),  // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);
        let label = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        // Title.
        let title = Paragraph::new(Line::from(vec![Span::styled(
            "🏆 Previsor de Vencedor de Natação",
            highlight,
        )]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(title, chunks[0]);

        // Fields.
        let input = self.form.input();
        let fields = [
            (Focus::Year, "Ano da Competição:", self.year_text.clone()),
            (
                Focus::Distance,
                "Distância (em metros):",
                input.distance.as_str().to_string(),
            ),
            (
                Focus::Stroke,
                "Estilo de Nado:",
                input.stroke.as_str().to_string(),
            ),
            (Focus::Gender, "Gênero:", input.gender.label().to_string()),
        ];

        let mut lines = Vec::new();
        for (focus, caption, value) in fields {
            let focused = self.focus == focus;
            let pointer = if focused { "› " } else { "  " };
            let style = if focused { highlight } else { normal };
            let value = match focus {
                Focus::Year if focused => format!("{value}█"),
                Focus::Year => value,
                _ if focused => format!("‹ {value} ›"),
                _ => format!("  {value}"),
            };
            lines.push(Line::from(Span::styled(format!("  {caption}"), label)));
            lines.push(Line::from(vec![
                Span::styled(pointer, style),
                Span::styled(value, style),
            ]));
        }

        // Submit button, disabled while a request is in flight.
        let pending = self.form.is_pending();
        let button_label = if pending {
            "[ Prevendo... ]"
        } else {
            "[ Prever Vencedor ]"
        };
        let button_style = if pending {
            muted
        } else if self.focus == Focus::Submit {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };
        let pointer = if self.focus == Focus::Submit {
            "› "
        } else {
            "  "
        };
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(pointer, highlight),
            Span::styled(button_label, button_style),
        ]));

        let form = Paragraph::new(lines).block(Block::default().padding(Padding::new(2, 2, 0, 0)));
        frame.render_widget(form, chunks[1]);

        // Outcome or notice.
        let mut outcome_lines = Vec::new();
        if let Some(notice) = &self.notice {
            outcome_lines.push(Line::from(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Yellow),
            )));
        }
        if let Some(text) = self.form.outcome().display_line() {
            let style = match self.form.outcome() {
                RequestOutcome::Failure { .. } => Style::default().fg(Color::Red),
                _ => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            };
            outcome_lines.push(Line::from(Span::styled(text, style)));
        }
        let outcome = Paragraph::new(outcome_lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
        frame.render_widget(outcome, chunks[2]);

        // Help.
        let help = Paragraph::new(Line::from(vec![Span::styled(
            " ↑↓ field  ←→ option  ⏎ predict  esc quit",
            muted,
        )]));
        frame.render_widget(help, chunks[3]);
    }
}

/// The option after (or before) `current`, wrapping around.
fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let i = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
    options[next]
}
