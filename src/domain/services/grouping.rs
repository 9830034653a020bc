#[cfg(test)]
#[path = "grouping_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Duration;
use chrono::Local;
use chrono::NaiveDate;

use crate::domain::models::Message;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grouping {
    ByDate,
    Ungrouped,
}

impl Grouping {
    pub fn from_flag(group_by_date: bool) -> Grouping {
        if group_by_date {
            return Grouping::ByDate;
        }

        return Grouping::Ungrouped;
    }

    pub fn toggle(self) -> Grouping {
        match self {
            Grouping::ByDate => return Grouping::Ungrouped,
            Grouping::Ungrouped => return Grouping::ByDate,
        }
    }
}

#[derive(Debug)]
pub struct MessageGroup<'a> {
    /// None when grouping is off.
    pub date: Option<NaiveDate>,
    pub messages: Vec<&'a Message>,
}

/// Buckets messages by the calendar date of their timestamp. Buckets keep the
/// order in which their date first shows up, messages keep log order.
pub fn group_messages(messages: &[Message], grouping: Grouping) -> Vec<MessageGroup<'_>> {
    if grouping == Grouping::Ungrouped {
        return vec![MessageGroup {
            date: None,
            messages: messages.iter().collect(),
        }];
    }

    let mut groups: Vec<MessageGroup> = vec![];
    for message in messages {
        let date = message.timestamp.date_naive();
        match groups.iter_mut().find(|group| return group.date == Some(date)) {
            Some(group) => group.messages.push(message),
            None => groups.push(MessageGroup {
                date: Some(date),
                messages: vec![message],
            }),
        }
    }

    return groups;
}

pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }

    if Some(date) == today.checked_sub_signed(Duration::days(1)) {
        return "Yesterday".to_string();
    }

    return date.format("%A, %b %-d").to_string();
}

pub fn time_label(timestamp: &DateTime<Local>) -> String {
    return timestamp.format("%I:%M %p").to_string();
}
