use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{app::App, progress::CharState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

const INSTRUCTIONS: &str = "Type the following text as quickly and accurately as possible:";
const LEGEND: &str = "(tab) reset / next sentence   (esc) quit";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let correct_style = Style::default().bg(Color::LightGreen).fg(Color::Black);
        let incorrect_style = Style::default()
            .bg(Color::Rgb(250, 128, 114))
            .fg(Color::Black);
        let pending_style = Style::default().add_modifier(Modifier::DIM);
        let cursor_style = pending_style.add_modifier(Modifier::UNDERLINED);
        let extra_style = Style::default().patch(bold_style).fg(Color::Red);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2 + 2).max(1);
        let sample = self.sample();

        let cursor = self.cursor();
        let sample_spans: Vec<Span> = sample
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                let style = match self.evaluation.state_at(idx) {
                    Some(CharState::Correct) => correct_style,
                    Some(CharState::Incorrect) | Some(CharState::Extra) => incorrect_style,
                    None if cursor == Some(idx) => cursor_style,
                    None => pending_style,
                };
                Span::styled(c.to_string(), style)
            })
            .collect();

        // classifications index the trimmed input, so skip the leading whitespace
        let offset = self.input.chars().take_while(|c| c.is_whitespace()).count();
        let input_spans: Vec<Span> = self
            .input
            .chars()
            .enumerate()
            .map(|(idx, c)| {
                let state = idx
                    .checked_sub(offset)
                    .and_then(|i| self.evaluation.state_at(i));
                match state {
                    Some(CharState::Extra) => Span::styled(c.to_string(), extra_style),
                    _ => Span::raw(c.to_string()),
                }
            })
            .collect();

        let instructions = Paragraph::new(Span::styled(INSTRUCTIONS, bold_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let sample_text = Paragraph::new(Line::from(sample_spans)).wrap(Wrap { trim: false });
        let input_text = Paragraph::new(Line::from(input_spans)).wrap(Wrap { trim: false });

        // measured with the same word wrapping the paragraphs render with
        let instruction_lines = rows(&instructions, area.width.saturating_sub(HORIZONTAL_MARGIN * 2));
        let sample_lines = rows(&sample_text, inner_width);
        let input_lines = rows(&input_text, inner_width).max(1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(instruction_lines.saturating_add(1)), // instructions
                Constraint::Length(sample_lines.saturating_add(2)), // sample text
                Constraint::Length(input_lines.saturating_add(2)), // input box
                Constraint::Length(2),                     // stats
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        instructions.render(chunks[0], buf);

        sample_text
            .block(Block::default().borders(Borders::ALL).title("Sample"))
            .render(chunks[1], buf);

        let input_title = if self.session.is_completed() {
            "Done"
        } else {
            "Your input"
        };
        input_text
            .block(Block::default().borders(Borders::ALL).title(input_title))
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(self.stats_line(), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(LEGEND, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }
}

/// Rows `paragraph` occupies when wrapped at `width` columns
fn rows(paragraph: &Paragraph, width: u16) -> u16 {
    u16::try_from(paragraph.line_count(width.max(1))).unwrap_or(u16::MAX)
}
