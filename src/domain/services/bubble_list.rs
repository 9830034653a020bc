use std::collections::HashMap;

use chrono::NaiveDate;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::date_label;
use super::group_messages;
use super::Bubble;
use super::BubbleAlignment;
use super::Grouping;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageStatus;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

struct BubbleCacheEntry {
    status: MessageStatus,
    is_new: bool,
    text_len: usize,
    lines: Vec<Line<'static>>,
}

/// Names printed in the top border of each bubble.
pub struct BubbleTitles<'a> {
    pub user: &'a str,
    pub bot: &'a str,
}

pub struct BubbleList {
    cache: HashMap<String, BubbleCacheEntry>,
    line_width: usize,
    lines: Vec<Line<'static>>,
}

impl Default for BubbleList {
    fn default() -> BubbleList {
        return BubbleList::new();
    }
}

fn separator(label: &str, line_width: usize) -> Line<'static> {
    let label = format!(" {label} ");
    let side = line_width.saturating_sub(UnicodeWidthStr::width(label.as_str())) / 2;
    let bar = ["─"].repeat(side).join("");

    return Line::from(Span::styled(
        format!("{bar}{label}{bar}"),
        Style::default().fg(Color::DarkGray),
    ));
}

impl BubbleList {
    pub fn new() -> BubbleList {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines: vec![],
        };
    }

    pub fn set_messages(
        &mut self,
        messages: &[Message],
        grouping: Grouping,
        titles: &BubbleTitles,
        line_width: usize,
        today: NaiveDate,
    ) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        let mut lines = vec![];
        for group in group_messages(messages, grouping) {
            if let Some(date) = group.date {
                lines.push(separator(&date_label(date, today), line_width));
            }

            for message in group.messages {
                lines.extend(self.bubble_lines(message, titles));
            }
        }

        self.lines = lines;
    }

    fn bubble_lines(&mut self, message: &Message, titles: &BubbleTitles) -> Vec<Line<'static>> {
        if let Some(entry) = self.cache.get(&message.id) {
            if entry.status == message.status()
                && entry.is_new == message.is_new()
                && entry.text_len == message.text.len()
            {
                return entry.lines.to_owned();
            }
        }

        let mut align = BubbleAlignment::Left;
        let mut title = titles.bot;
        if message.author == Author::User {
            align = BubbleAlignment::Right;
            title = titles.user;
        }

        let lines = Bubble::new(message, align, title, self.line_width).as_lines();
        self.cache.insert(
            message.id.to_string(),
            BubbleCacheEntry {
                status: message.status(),
                is_new: message.is_new(),
                text_len: message.text.len(),
                lines: lines.to_owned(),
            },
        );

        return lines;
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.to_owned())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
