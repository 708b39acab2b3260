use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::{
    alert::Notifier,
    keymap::{keys_for, Action},
    stopwatch::Stopwatch,
    ticker::Ticker,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const PULSE_FRAMES: [&str; 3] = ["●  ○  ○", "○  ●  ○", "○  ○  ●"];

impl<N: Notifier, T: Ticker> Widget for &Stopwatch<N, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(0),    // padding
                Constraint::Length(1), // time
                Constraint::Length(1), // padding
                Constraint::Length(1), // indicator
                Constraint::Length(1), // limit
                Constraint::Min(0),    // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        let time_style = if self.is_overtime() {
            red_bold_style
        } else {
            bold_style
        };
        Paragraph::new(Span::styled(self.display(), time_style))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        if self.indicator_visible() {
            let index = self.session.indicator.index();
            let pulse = Style::default().fg(self.indicator_phase().color());
            Paragraph::new(Span::styled(PULSE_FRAMES[index], pulse))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        Paragraph::new(Span::styled(
            format!("limit: {}", self.time_limit()),
            dim_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        let settings_style = if self.settings_enabled() {
            Style::default()
        } else {
            dim_style.add_modifier(Modifier::CROSSED_OUT)
        };
        let legend = Line::from(vec![
            Span::raw(format!("({}) start  ", keys_for(Action::Start))),
            Span::raw(format!("({}) reset  ", keys_for(Action::Reset))),
            Span::styled(
                format!("({}) time limit", keys_for(Action::Settings)),
                settings_style,
            ),
            Span::raw(format!("  ({}) quit", keys_for(Action::Quit))),
        ])
        .style(Style::default().add_modifier(Modifier::ITALIC));
        Paragraph::new(legend)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        if let Some(dialog) = self.settings_dialog() {
            let popup = centered_rect(50, 5, area);
            Clear.render(popup, buf);
            let input = Line::from(vec![
                Span::styled(dialog.input().to_string(), bold_style),
                Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::REVERSED),
                ),
            ]);
            Paragraph::new(vec![input, Line::from(Span::styled("(enter) ok  (esc) cancel", dim_style))])
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(self.settings_title().to_string()),
                )
                .render(popup, buf);
        }
    }
}

/// Rect of `percent_x` width and `height` rows centered in `r`
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
