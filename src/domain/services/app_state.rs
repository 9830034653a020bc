#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::BubbleTitles;
use super::ConversationController;
use super::Grouping;
use super::Scroll;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendResponse;
use crate::domain::models::BackendStatus;
use crate::domain::models::Event;

pub struct AppState {
    pub agent_name: String,
    pub bubble_list: BubbleList,
    pub conversation: ConversationController,
    pub grouping: Grouping,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub scroll: Scroll,
    pub sent_delay: Duration,
    pub show_info: bool,
    pub ticks: usize,
    pub username: String,
}

impl AppState {
    pub fn new(
        username: &str,
        agent_name: &str,
        grouping: Grouping,
        sent_delay: Duration,
    ) -> AppState {
        return AppState {
            agent_name: agent_name.to_string(),
            bubble_list: BubbleList::new(),
            conversation: ConversationController::default(),
            grouping,
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            sent_delay,
            show_info: false,
            ticks: 0,
            username: username.to_string(),
        };
    }

    pub fn from_config() -> Result<AppState> {
        return Ok(AppState::new(
            &Config::get(ConfigKey::Username),
            &Config::get(ConfigKey::AgentName),
            Grouping::from_flag(Config::flag(ConfigKey::GroupByDate)),
            Config::duration(ConfigKey::SentDelay)?,
        ));
    }

    /// Hands the text to the conversation and queues the follow up work.
    /// Returns false when the text was not accepted.
    pub fn submit(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let submission = match self.conversation.submit(text) {
            Some(submission) => submission,
            None => return Ok(false),
        };

        tx.send(Action::Schedule(
            self.sent_delay,
            Event::MessageSent(submission.message_id),
        ))?;

        if let Some(request) = submission.request {
            tx.send(Action::BackendRequest(request))?;
        }

        if let Some(reply_id) = submission.reply_id {
            tx.send(Action::Schedule(
                self.sent_delay,
                Event::MessageSettled(reply_id),
            ))?;
        }

        self.sync_dependants();
        self.scroll.last();

        return Ok(true);
    }

    pub fn handle_backend_response(
        &mut self,
        res: BackendResponse,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        let reply_id = self.conversation.receive(res);
        tx.send(Action::Schedule(
            self.sent_delay,
            Event::MessageSettled(reply_id),
        ))?;

        self.sync_dependants();
        self.scroll.last();

        return Ok(());
    }

    pub fn mark_sent(&mut self, id: &str) {
        self.conversation.mark_sent(id);
        self.sync_dependants();
    }

    pub fn settle(&mut self, id: &str) {
        self.conversation.settle(id);
        self.sync_dependants();
    }

    pub fn set_backend_status(&mut self, status: BackendStatus) {
        self.conversation.set_backend_status(status);
    }

    pub fn toggle_grouping(&mut self) {
        self.grouping = self.grouping.toggle();
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    /// Paragraphs shown in the About overlay.
    pub fn info_lines(&self) -> Vec<String> {
        return vec![
            format!(
                "{} is a social AI agent fine-tuned on Hugo Philion's tweets. It runs in a Trusted Execution Environment (TEE) for secure AI execution.",
                self.agent_name
            ),
            "This AI is powered by Gemini 1.5 Flash and supports markdown in its responses."
                .to_string(),
            "Press F1 to close.".to_string(),
        ];
    }

    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        if rect.width == self.last_known_width && rect.height == self.last_known_height {
            return;
        }

        let follow = self.scroll.is_at_bottom();
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();

        if follow {
            self.scroll.last();
        }
    }

    fn sync_dependants(&mut self) {
        let titles = BubbleTitles {
            user: &self.username,
            bot: &self.agent_name,
        };

        self.bubble_list.set_messages(
            self.conversation.session().messages(),
            self.grouping,
            &titles,
            self.last_known_width as usize,
            Local::now().date_naive(),
        );

        self.scroll.set_state(
            u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX),
            self.last_known_height,
        );

        if self.conversation.session().is_busy() {
            self.scroll.last();
        }
    }
}
