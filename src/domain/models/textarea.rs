use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub const PROMPT_TITLE: &str = "Type your message... (Markdown supported)";
pub const CONFIRM_TITLE: &str = "Type CONFIRM to proceed or anything else to cancel";

pub struct TextArea {}

impl<'a> TextArea {
    pub fn new(title: &'a str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }
}
