use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
#[cfg(feature = "dev")]
use tui_textarea::Input;
#[cfg(feature = "dev")]
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::BackendStatus;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::TextArea;
use crate::domain::models::CONFIRM_TITLE;
use crate::domain::models::PROMPT_TITLE;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::CONFIRM_KEYWORD;

const CANCEL_KEYWORD: &str = "CANCEL";

fn input_title(app_state: &AppState) -> &'static str {
    if app_state.conversation.session().awaiting_confirmation() {
        return CONFIRM_TITLE;
    }

    return PROMPT_TITLE;
}

fn render_header(frame: &mut Frame, rect: Rect, app_state: &AppState) {
    let status = app_state.conversation.session().backend_status();
    let colour = match status {
        BackendStatus::Checking => Color::Yellow,
        BackendStatus::Online => Color::Green,
        BackendStatus::Offline => Color::Red,
    };

    let line = Line::from(vec![
        Span::styled(
            app_state.agent_name.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::from("  "),
        Span::styled(format!("● {}", status.label()), Style::default().fg(colour)),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .padding(Padding::new(1, 1, 0, 0)),
        ),
        rect,
    );
}

fn render_confirmation(frame: &mut Frame, rect: Rect, pending: &str) {
    frame.render_widget(
        Paragraph::new(format!("Transaction requires confirmation ({pending}). Type CONFIRM to proceed or anything else to cancel. CTRL+Y confirms, CTRL+N cancels."))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        rect,
    );
}

fn render_offline(frame: &mut Frame, rect: Rect) {
    frame.render_widget(
        Paragraph::new("The backend is offline. Waiting for it to come back...")
            .style(Style::default().fg(Color::Red))
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

fn centered_rect(width: u16, height: u16, rect: Rect) -> Rect {
    let width = width.min(rect.width);
    let height = height.min(rect.height);

    return Rect::new(
        rect.x + (rect.width - width) / 2,
        rect.y + (rect.height - height) / 2,
        width,
        height,
    );
}

fn render_info(frame: &mut Frame, app_state: &AppState) {
    let mut lines = vec![];
    for (idx, paragraph) in app_state.info_lines().into_iter().enumerate() {
        if idx > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(paragraph));
    }

    let rect = centered_rect(60, 14, frame.size());
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title("About this AI")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .padding(Padding::new(1, 1, 1, 0)),
            ),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::new(PROMPT_TITLE);
    let loading = Loading::default();

    #[cfg(feature = "dev")]
    {
        let test_str = "What is the price of FLR today?";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        terminal.draw(|frame| {
            let awaiting = app_state.conversation.session().awaiting_confirmation();
            let mut constraints = vec![Constraint::Length(2), Constraint::Min(1)];
            if awaiting {
                constraints.push(Constraint::Length(1));
            }
            constraints.push(Constraint::Length(3));

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.size());
            let input_rect = layout[layout.len() - 1];

            app_state.set_rect(layout[1]);

            render_header(frame, layout[0], app_state);
            app_state
                .bubble_list
                .render(frame, layout[1], app_state.scroll.position);

            if let Some(pending) = app_state.conversation.session().pending_transaction() {
                render_confirmation(frame, layout[2], pending);
            }

            if app_state.conversation.session().is_busy() {
                loading.render(frame, input_rect, &app_state.agent_name, app_state.ticks);
            } else if app_state.conversation.session().backend_status() == BackendStatus::Offline
            {
                render_offline(frame, input_rect);
            } else {
                frame.render_widget(textarea.widget(), input_rect);
            }

            if app_state.show_info {
                render_info(frame, app_state);
            }
        })?;

        let accepts_input = app_state.conversation.accepts_input();
        match events.next().await? {
            Event::BackendResponse(res) => {
                app_state.handle_backend_response(res, &tx)?;
                textarea = TextArea::new(input_title(app_state));
            }
            Event::BackendStatus(status) => {
                app_state.set_backend_status(status);
            }
            Event::KeyboardCharInput(input) => {
                if accepts_input {
                    textarea.input(input);
                }
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLG() => {
                app_state.toggle_grouping();
            }
            Event::KeyboardEnter() => {
                if !accepts_input {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if app_state.submit(&input_str, &tx)? {
                    textarea = TextArea::new(input_title(app_state));
                }
            }
            Event::KeyboardPaste(text) => {
                if accepts_input {
                    textarea.insert_str(text);
                }
            }
            Event::MessageSent(id) => {
                app_state.mark_sent(&id);
            }
            Event::MessageSettled(id) => {
                app_state.settle(&id);
            }
            Event::TransactionConfirm() => {
                if accepts_input && app_state.conversation.session().awaiting_confirmation() {
                    app_state.submit(CONFIRM_KEYWORD, &tx)?;
                    textarea = TextArea::new(input_title(app_state));
                }
            }
            Event::TransactionCancel() => {
                if accepts_input && app_state.conversation.session().awaiting_confirmation() {
                    app_state.submit(CANCEL_KEYWORD, &tx)?;
                    textarea = TextArea::new(input_title(app_state));
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                app_state.tick();
            }
            Event::UIToggleInfo() => {
                app_state.toggle_info();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut app_state = AppState::from_config()?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
