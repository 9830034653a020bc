#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use super::time_label;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageStatus;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    title: &'a str,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

const TAB: &str = "  ";

/// Columns the text takes up in the terminal.
fn width(text: &str) -> usize {
    return UnicodeWidthStr::width(text);
}

/// Longest prefix of `text` that fits in `max` columns. Always takes at least
/// one character so callers make progress.
fn split_at_width(text: &str, max: usize) -> (String, String) {
    let mut head = String::new();
    let mut head_width = 0;
    for (idx, c) in text.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if head_width + char_width > max && !head.is_empty() {
            return (head, text[idx..].to_string());
        }

        head.push(c);
        head_width += char_width;
    }

    return (head, "".to_string());
}

fn fill(text: &str, count: usize) -> String {
    return [text].repeat(count).join("");
}

pub fn status_glyph(status: MessageStatus) -> Span<'static> {
    match status {
        MessageStatus::Sending => return Span::styled("◷", Style::default().fg(Color::DarkGray)),
        MessageStatus::Sent => return Span::styled("✓", Style::default().fg(Color::DarkGray)),
        MessageStatus::Delivered => {
            return Span::styled("✓✓", Style::default().fg(Color::DarkGray))
        }
        MessageStatus::Read => return Span::styled("✓✓", Style::default().fg(Color::Cyan)),
    }
}

/// Splits a line on spaces so no piece is wider than `max`. Words longer than
/// `max` are cut.
fn wrap_line(line: &str, max: usize) -> Vec<String> {
    let mut res = vec![];
    let mut current = String::new();

    for word in line.split(' ') {
        let mut word = word.to_string();
        while width(&word) > max {
            if !current.is_empty() {
                res.push(current);
                current = String::new();
            }
            let (head, rest) = split_at_width(&word, max);
            word = rest;
            res.push(head);
        }

        if current.is_empty() {
            current = word;
        } else if width(&current) + 1 + width(&word) <= max {
            current = format!("{current} {word}");
        } else {
            res.push(current);
            current = word;
        }
    }

    res.push(current);
    return res;
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        title: &'a str,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            title,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 4,
            // left border + left padding + (text, not counted) + right padding + right border.
            border_elements_length: 4,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let mut lines = self
            .message
            .text
            .lines()
            .map(|line| return line.replace('\t', TAB))
            .flat_map(|line| return wrap_line(&line, max_line_length))
            .map(|text| {
                let fill_len = max_line_length.saturating_sub(width(&text));
                return self.bubble_line(
                    vec![Span::from(format!("{text}{}", fill(" ", fill_len)))],
                    max_line_length,
                );
            })
            .collect::<Vec<Line<'static>>>();

        if lines.is_empty() {
            lines.push(self.bubble_line(vec![Span::from(fill(" ", max_line_length))], max_line_length));
        }

        lines.push(self.footer_line(max_line_length));

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn footer(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled(
            time_label(&self.message.timestamp),
            Style::default().fg(Color::DarkGray),
        )];

        if self.message.author == Author::User {
            spans.push(Span::from(" "));
            spans.push(status_glyph(self.message.status()));
        }

        return spans;
    }

    fn footer_line(&self, max_line_length: usize) -> Line<'static> {
        let mut spans = self.footer();
        let footer_len: usize = spans.iter().map(|e| return width(&e.content)).sum();
        let padding = Span::from(fill(" ", max_line_length.saturating_sub(footer_len)));

        if self.alignment == BubbleAlignment::Right {
            spans.insert(0, padding);
        } else {
            spans.push(padding);
        }

        return self.bubble_line(spans, max_line_length);
    }

    fn outer_padding(&self, max_line_length: usize) -> String {
        let bubble_width = max_line_length + Bubble::style_config().bubble_padding;
        return fill(" ", self.window_max_width.saturating_sub(bubble_width));
    }

    fn bubble_line(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(" │".to_string()));

        let outer_bubble_padding = Span::from(self.outer_padding(max_line_length));
        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(outer_bubble_padding);
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![outer_bubble_padding];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;

        let footer_len: usize = self.footer().iter().map(|e| return width(&e.content)).sum();
        let mut max_line_length = self
            .message
            .text
            .lines()
            .map(|line| {
                return width(&line.replace('\t', TAB));
            })
            .max()
            .unwrap_or_default()
            .max(footer_len);

        let available = self.window_max_width.saturating_sub(line_border_width).max(1);
        if max_line_length > available {
            max_line_length = available;
        }

        let title_len = width(self.title);
        if max_line_length < title_len {
            max_line_length = title_len;
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the inner padding.
        let inner_len = max_line_length + 2;
        let (title, _) = split_at_width(self.title, inner_len);
        let top_bar = format!("╭{title}{}╮", fill("─", inner_len.saturating_sub(width(&title))));
        let bottom_bar = format!("╰{}╯", fill("─", inner_len));
        let bar_bubble_padding = self.outer_padding(max_line_length);

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_bubble_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        let mut style = Style::default();
        if self.message.author == Author::Bot {
            style = style.fg(Color::Rgb(232, 65, 109)); // Flare pink
        }

        if self.message.is_new() {
            style = style.add_modifier(Modifier::BOLD);
        }

        return Span::styled(text, style);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
