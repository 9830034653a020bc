use ratatui::prelude::Alignment;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Typing indicator shown in place of the input while a reply is pending.
#[derive(Default)]
pub struct Loading {}

impl Loading {
    pub fn text(name: &str, ticks: usize) -> String {
        let dots = ".".repeat(ticks % 3 + 1);
        return format!("{name} is typing{dots:<3}");
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, name: &str, ticks: usize) {
        frame.render_widget(
            Paragraph::new(Loading::text(name, ticks))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}
