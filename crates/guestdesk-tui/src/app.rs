//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use guestdesk_core::AdminService;

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::popup;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Action sender — screens dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl App {
    pub fn new(service: Arc<AdminService>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(&service).into_iter().collect();

        Self {
            active_screen: ScreenId::Orders,
            screens,
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            notification: None,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(Duration::from_millis(250), Duration::from_millis(33));
        info!("guestdesk-tui started");

        while self.running {
            tokio::select! {
                Some(event) = events.next() => match event {
                    Event::Key(key) => self.handle_key(key)?,
                    Event::Tick => {
                        self.expire_toast();
                        self.broadcast(&Action::Tick)?;
                    }
                    Event::Render => {
                        tui.draw(|frame| self.render(frame))?;
                    }
                    Event::Resize(_, _) => {}
                },
                Some(action) = self.action_rx.recv() => self.handle_action(action)?,
            }
        }

        events.stop();
        tui.exit()?;
        debug!("event loop finished");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+C always quits, whatever has focus.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return Ok(());
        }

        if self.help_visible {
            self.help_visible = false;
            return Ok(());
        }

        // While a screen captures text (search box, form modal), keys go
        // straight through — no global shortcuts.
        let captures_text = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.wants_text_input());
        if captures_text {
            return self.forward_key(key);
        }

        match key.code {
            KeyCode::Char('q') => {
                self.running = false;
                Ok(())
            }
            KeyCode::Char('?') => {
                self.help_visible = true;
                Ok(())
            }
            KeyCode::Tab => self.switch_screen(self.active_screen.next()),
            KeyCode::BackTab => self.switch_screen(self.active_screen.prev()),
            KeyCode::Char(c @ '1'..='9') => {
                let digit = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(screen) = digit.and_then(ScreenId::from_number) {
                    self.switch_screen(screen)
                } else {
                    Ok(())
                }
            }
            _ => self.forward_key(key),
        }
    }

    fn forward_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(action) = screen.handle_key_event(key)? {
                self.handle_action(action)?;
            }
        }
        Ok(())
    }

    fn switch_screen(&mut self, to: ScreenId) -> Result<()> {
        if to == self.active_screen {
            return Ok(());
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = to;
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }
            Action::NextScreen => self.switch_screen(self.active_screen.next())?,
            Action::PrevScreen => self.switch_screen(self.active_screen.prev())?,
            Action::GoToScreen(screen) => self.switch_screen(screen)?,
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Notify(notification) => {
                self.notification = Some((notification, Instant::now()));
            }
            other => self.broadcast(&other)?,
        }
        Ok(())
    }

    /// Deliver an action to every screen; follow-ups are re-queued so
    /// they pass through `handle_action` like everything else.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                let _ = self.action_tx.send(follow_up);
            }
        }
        Ok(())
    }

    fn expire_toast(&mut self) {
        if let Some((_, shown_at)) = &self.notification {
            if shown_at.elapsed() > TOAST_TTL {
                self.notification = None;
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let areas = Layout::vertical([
            Constraint::Length(1), // tab bar
            Constraint::Min(5),    // active screen
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

        self.render_tabs(frame, areas[0]);

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.render(frame, areas[1]);
        }

        self.render_status_bar(frame, areas[2]);

        if self.help_visible {
            self.render_help(frame, frame.area());
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|screen| {
                Line::from(vec![
                    Span::styled(format!(" {} ", screen.number()), theme::key_hint_key()),
                    Span::styled(screen.label(), if *screen == self.active_screen {
                        theme::tab_active()
                    } else {
                        theme::tab_inactive()
                    }),
                ])
            })
            .collect();

        let selected = ScreenId::ALL
            .iter()
            .position(|s| *s == self.active_screen)
            .unwrap_or(0);
        frame.render_widget(
            Tabs::new(titles)
                .select(selected)
                .divider(Span::styled("\u{2502}", theme::border_default())),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some((notification, _)) = &self.notification {
            let color = match notification.level {
                NotificationLevel::Success => theme::SUCCESS_GREEN,
                NotificationLevel::Error => theme::ERROR_RED,
                NotificationLevel::Warning => theme::AMBER,
                NotificationLevel::Info => theme::DIM_WHITE,
            };
            Line::from(Span::styled(
                format!(" {}", notification.message),
                Style::default().fg(color),
            ))
        } else {
            Line::from(vec![
                Span::styled(" guestdesk ", theme::title_style()),
                Span::styled("Tab ", theme::key_hint_key()),
                Span::styled("switch  ", theme::key_hint()),
                Span::styled("? ", theme::key_hint_key()),
                Span::styled("help  ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("quit", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup = popup::centered_rect(56, 16, area);
        let block = Block::default()
            .title(" Help ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(popup);
        frame.render_widget(ratatui::widgets::Clear, popup);
        frame.render_widget(block, popup);

        let rows: [(&str, &str); 12] = [
            ("1-4 / Tab", "switch between Orders, Rooms, Users, Products"),
            ("/", "search (re-filters as you type, Enter commits)"),
            ("f", "cycle status / category / role filter"),
            ("d", "cycle date range"),
            ("o", "cycle sort field"),
            ("s", "toggle sort direction"),
            ("\u{2190} \u{2192}", "previous / next page"),
            ("Enter", "open detail"),
            ("a / e / x", "add / edit / delete"),
            ("u", "update order status"),
            ("r", "refresh from the backend"),
            ("q", "quit"),
        ];
        let lines: Vec<Line> = rows
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(format!("  {key:<11}"), theme::key_hint_key()),
                    Span::styled(*description, theme::key_hint()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
