//! Orders screen — the order board: stats cards, filterable table,
//! detail/status/delete modals.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use guestdesk_core::{
    AdminService, CollectionStore, DateRange, ListQuery, ModalState, MutationErrorPolicy, Order,
    OrderStatus, StatusFilter, SubmitOutcome, visible,
};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::common;
use crate::theme;
use crate::widgets::popup;

const PAGE_SIZE: usize = 10;
const REVENUE_CODES: [&str; 4] = ["C", "PR", "S", "D"];
const SORT_FIELDS: [&str; 4] = ["created_at", "total_amount", "order_number", "customer"];

pub struct OrdersScreen {
    service: Arc<AdminService>,
    action_tx: Option<UnboundedSender<Action>>,
    store: CollectionStore<Order>,
    query: ListQuery,
    modal: ModalState<()>,
    /// Highlighted row inside the status-transition modal.
    status_idx: usize,
    table_state: TableState,
    search: Option<Input>,
    throbber: ThrobberState,
    focused: bool,
}

impl OrdersScreen {
    pub fn new(service: Arc<AdminService>) -> Self {
        Self {
            service,
            action_tx: None,
            store: CollectionStore::new(&REVENUE_CODES),
            query: ListQuery::new(PAGE_SIZE),
            modal: ModalState::Closed,
            status_idx: 0,
            table_state: TableState::default(),
            search: None,
            throbber: ThrobberState::default(),
            focused: false,
        }
    }

    fn refetch(&mut self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let seq = self.store.begin_fetch();
        let service = Arc::clone(&self.service);
        let query = self.query.clone();
        tokio::spawn(async move {
            let result = service.orders(&query).await.map_err(|e| e.to_string());
            let _ = tx.send(Action::OrdersLoaded { seq, result });
        });
    }

    fn selected_order_id(&mut self) -> Option<i64> {
        let view = visible(
            self.store.items(),
            &self.query.filter,
            &self.query.sort,
            &self.query.page,
            Utc::now(),
        );
        let idx = self.table_state.selected()?;
        view.items.get(idx).map(|o| o.id)
    }

    fn cycle_status_filter(&mut self) {
        let next = match &self.query.filter.status {
            StatusFilter::All => StatusFilter::Code("P".into()),
            StatusFilter::Code(code) => {
                let position = OrderStatus::ALL.iter().position(|s| s.as_code() == code);
                match position {
                    Some(idx) if idx + 1 < OrderStatus::ALL.len() => {
                        StatusFilter::Code(OrderStatus::ALL[idx + 1].as_code().to_owned())
                    }
                    _ => StatusFilter::All,
                }
            }
        };
        self.query.update_filter(|f| f.status = next);
        self.refetch();
    }

    fn cycle_date_range(&mut self) {
        const RANGES: [DateRange; 5] = [
            DateRange::All,
            DateRange::Today,
            DateRange::Week,
            DateRange::Month,
            DateRange::ThreeMonths,
        ];
        let idx = RANGES
            .iter()
            .position(|r| *r == self.query.filter.date_range)
            .unwrap_or(0);
        let next = RANGES[(idx + 1) % RANGES.len()];
        self.query.update_filter(|f| f.date_range = next);
        self.refetch();
    }

    fn cycle_sort_field(&mut self) {
        let idx = SORT_FIELDS
            .iter()
            .position(|f| *f == self.query.sort.field)
            .unwrap_or(0);
        self.query.select_sort(SORT_FIELDS[(idx + 1) % SORT_FIELDS.len()]);
    }

    fn spawn_status_update(&self, id: i64, status: OrderStatus) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let (success, message) = match service.set_order_status(id, &status).await {
                Ok(order) => (
                    true,
                    format!("Order {} is now {}", order.order_number, order.status.label()),
                ),
                Err(err) => (false, format!("Status update failed: {err}")),
            };
            let _ = tx.send(Action::MutationDone {
                screen: ScreenId::Orders,
                success,
                message,
            });
        });
    }

    fn spawn_delete(&self, id: i64) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let (success, message) = match service.delete_order(id).await {
                Ok(()) => (true, "Order deleted".to_owned()),
                Err(err) => (false, format!("Delete failed: {err}")),
            };
            let _ = tx.send(Action::MutationDone {
                screen: ScreenId::Orders,
                success,
                message,
            });
        });
    }

    // ── Modal key handling ───────────────────────────────────────────

    fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Esc {
            self.modal.close();
            return None;
        }
        match (self.modal.clone(), key.code) {
            (ModalState::UpdateStatus { id, .. }, KeyCode::Up) => {
                self.status_idx = self.status_idx.saturating_sub(1);
                self.sync_status_selection(id);
            }
            (ModalState::UpdateStatus { id, .. }, KeyCode::Down) => {
                self.status_idx = (self.status_idx + 1).min(OrderStatus::ALL.len() - 1);
                self.sync_status_selection(id);
            }
            (ModalState::UpdateStatus { id, selected }, KeyCode::Enter) => {
                if self.modal.submit() == SubmitOutcome::Submit {
                    self.spawn_status_update(id, OrderStatus::from_code(&selected));
                }
            }
            (ModalState::ConfirmDelete { id }, KeyCode::Char('y') | KeyCode::Enter) => {
                if self.modal.submit() == SubmitOutcome::Submit {
                    self.spawn_delete(id);
                }
            }
            (ModalState::Detail { id }, KeyCode::Char('u')) => {
                let current = self
                    .store
                    .find(id)
                    .map(|o| o.status.clone())
                    .unwrap_or(OrderStatus::Pending);
                self.status_idx = OrderStatus::ALL
                    .iter()
                    .position(|s| *s == current)
                    .unwrap_or(0);
                self.modal.open_update_status(id, current.as_code());
            }
            _ => {}
        }
        None
    }

    fn sync_status_selection(&mut self, id: i64) {
        let code = OrderStatus::ALL[self.status_idx].as_code().to_owned();
        self.modal.open_update_status(id, &code);
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let stats = self.store.breakdown();
        let cards = [
            ("Total", stats.total.to_string(), theme::DIM_WHITE),
            ("Pending", stats.count("P").to_string(), theme::AMBER),
            ("Confirmed", stats.count("C").to_string(), theme::SKY),
            ("Delivered", stats.count("D").to_string(), theme::SUCCESS_GREEN),
            ("Cancelled", stats.count("CA").to_string(), theme::ERROR_RED),
            ("Revenue", format!("${}", stats.revenue), theme::BRASS),
        ];

        let columns = Layout::horizontal(
            std::iter::repeat_n(Constraint::Ratio(1, 6), 6).collect::<Vec<_>>(),
        )
        .split(area);

        for ((label, value, color), column) in cards.into_iter().zip(columns.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            let inner = block.inner(*column);
            frame.render_widget(block, *column);
            let lines = vec![
                Line::from(Span::styled(label, theme::key_hint())),
                Line::from(Span::styled(value, Style::default().fg(color))),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
        }
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, order: &Order) {
        let popup = popup::centered_rect(64, 16, area);
        let inner = popup::modal_block(frame, popup, &format!("Order {}", order.order_number));

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Customer   ", theme::form_label()),
                Span::styled(order.customer.display_name(), theme::table_row()),
                Span::styled("   ", Style::default()),
                Span::styled(order.customer.email.as_str(), theme::key_hint()),
            ]),
            Line::from(vec![
                Span::styled("  Status     ", theme::form_label()),
                Span::styled(
                    order.status.label(),
                    Style::default().fg(theme::order_status_color(&order.status)),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Total      ", theme::form_label()),
                Span::styled(format!("${}", order.total_amount), theme::table_row()),
            ]),
            Line::from(vec![
                Span::styled("  Created    ", theme::form_label()),
                Span::styled(
                    order.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    theme::table_row(),
                ),
            ]),
        ];
        if let Some(ref notes) = order.notes {
            lines.push(Line::from(vec![
                Span::styled("  Notes      ", theme::form_label()),
                Span::styled(notes.as_str(), theme::table_row()),
            ]));
        }
        if !order.items.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("  Items", theme::title_style())));
            for item in &order.items {
                lines.push(Line::from(Span::styled(
                    format!(
                        "    {} x{} @ ${} = ${}",
                        item.product_name,
                        item.quantity,
                        item.price,
                        item.subtotal()
                    ),
                    theme::table_row(),
                )));
            }
        }
        lines.push(Line::from(""));
        lines.push(common::hint_line(&[("u", "update status"), ("Esc", "back")]));
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_status_modal(&self, frame: &mut Frame, area: Rect, selected: &str) {
        let popup = popup::centered_rect(36, 12, area);
        let inner = popup::modal_block(frame, popup, "Update status");

        let mut lines = Vec::new();
        for status in &OrderStatus::ALL {
            let marker = if status.as_code() == selected { "> " } else { "  " };
            let style = if status.as_code() == selected {
                Style::default().fg(theme::order_status_color(status))
            } else {
                theme::table_row()
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{}", status.label()),
                style,
            )));
        }
        lines.push(Line::from(""));
        lines.push(common::hint_line(&[("Enter", "apply"), ("Esc", "cancel")]));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for OrdersScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        self.refetch();
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.modal.is_open() {
            return Ok(self.handle_modal_key(key));
        }

        // Search input captures everything except Enter/Esc.
        if let Some(ref mut search) = self.search {
            match key.code {
                KeyCode::Enter => {
                    self.search = None;
                    self.refetch();
                }
                KeyCode::Esc => {
                    self.search = None;
                }
                _ => {
                    search.handle_event(&crossterm::event::Event::Key(key));
                    let text = search.value().to_owned();
                    // Re-scan the in-memory collection on every keystroke.
                    self.query.update_filter(|f| f.query = text);
                }
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.search = Some(Input::new(self.query.filter.query.clone()));
            }
            KeyCode::Char('r') => self.refetch(),
            KeyCode::Char('f') => self.cycle_status_filter(),
            KeyCode::Char('d') => self.cycle_date_range(),
            KeyCode::Char('o') => self.cycle_sort_field(),
            KeyCode::Char('s') => {
                let field = self.query.sort.field.clone();
                self.query.select_sort(&field);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.current_page_len();
                common::move_selection(&mut self.table_state, len, -1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.current_page_len();
                common::move_selection(&mut self.table_state, len, 1);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.query.page.page = self.query.page.page.saturating_sub(1).max(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.query.page.page += 1; // engine clamps to the last page
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_order_id() {
                    self.modal.open_detail(id);
                }
            }
            KeyCode::Char('u') => {
                if let Some(id) = self.selected_order_id() {
                    let current = self
                        .store
                        .find(id)
                        .map(|o| o.status.clone())
                        .unwrap_or(OrderStatus::Pending);
                    self.status_idx = OrderStatus::ALL
                        .iter()
                        .position(|s| *s == current)
                        .unwrap_or(0);
                    self.modal.open_update_status(id, current.as_code());
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_order_id() {
                    self.modal.open_delete(id);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.store.is_loading() {
                    self.throbber.calc_next();
                }
            }
            Action::OrdersLoaded { seq, result } => {
                let failed = result.is_err();
                let applied = self.store.apply(*seq, result.clone());
                if applied {
                    let len = self.current_page_len();
                    common::clamp_selection(&mut self.table_state, len);
                    if failed {
                        let message = self.store.error().unwrap_or("fetch failed").to_owned();
                        return Ok(Some(Action::Notify(Notification::error(format!(
                            "Failed to load orders: {message}"
                        )))));
                    }
                }
            }
            Action::MutationDone {
                screen: ScreenId::Orders,
                success,
                message,
            } => {
                self.modal
                    .resolve_mutation(*success, MutationErrorPolicy::StayOpen);
                if *success {
                    // Always re-read from the backend after a mutation.
                    self.refetch();
                    return Ok(Some(Action::Notify(Notification::success(message.clone()))));
                }
                return Ok(Some(Action::Notify(Notification::error(message.clone()))));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows_area = Layout::vertical([
            Constraint::Length(4), // stats cards
            Constraint::Length(1), // filter summary
            Constraint::Min(3),    // table
            Constraint::Length(1), // footer
        ])
        .split(area);

        self.render_stats(frame, rows_area[0]);

        let status_label = match &self.query.filter.status {
            StatusFilter::Code(code) => OrderStatus::from_code(code).label().to_owned(),
            StatusFilter::All => "All".to_owned(),
        };
        if let Some(ref search) = self.search {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" search: ", theme::key_hint()),
                    Span::styled(search.value().to_owned(), theme::table_selected()),
                    Span::styled("_", theme::table_selected()),
                ])),
                rows_area[1],
            );
        } else {
            frame.render_widget(
                Paragraph::new(common::filter_summary(&self.query, &status_label)),
                rows_area[1],
            );
        }

        self.render_table(frame, rows_area[2]);

        frame.render_widget(
            Paragraph::new(common::hint_line(&[
                ("/", "search"),
                ("f", "status"),
                ("d", "range"),
                ("o/s", "sort"),
                ("\u{2190}\u{2192}", "page"),
                ("Enter", "detail"),
                ("u", "status update"),
                ("x", "delete"),
                ("r", "refresh"),
            ])),
            rows_area[3],
        );

        // Modals draw over everything.
        match &self.modal {
            ModalState::Detail { id } => {
                if let Some(order) = self.store.find(*id) {
                    let order = order.clone();
                    self.render_detail(frame, area, &order);
                }
            }
            ModalState::UpdateStatus { selected, .. } => {
                let selected = selected.clone();
                self.render_status_modal(frame, area, &selected);
            }
            ModalState::ConfirmDelete { id } => {
                popup::confirm_dialog(
                    frame,
                    area,
                    "Delete order",
                    &format!("Permanently delete order #{id}? This cannot be undone."),
                );
            }
            _ => {}
        }
    }

    fn wants_text_input(&self) -> bool {
        self.search.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "orders"
    }
}

impl OrdersScreen {
    fn current_page_len(&self) -> usize {
        visible(
            self.store.items(),
            &self.query.filter,
            &self.query.sort,
            &self.query.page,
            Utc::now(),
        )
        .items
        .len()
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let view = visible(
            self.store.items(),
            &self.query.filter,
            &self.query.sort,
            &self.query.page,
            Utc::now(),
        );

        // Fetch failed with nothing cached: error panel with retry hint.
        if let Some(message) = self.store.error() {
            if self.store.is_empty() {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled("Could not load orders", theme::title_style())),
                    Line::from(Span::styled(message.to_owned(), theme::table_row())),
                    Line::from(""),
                    common::hint_line(&[("r", "try again")]),
                ];
                frame.render_widget(
                    Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
                    area,
                );
                return;
            }
        }

        let header = Row::new(
            ["Order #", "Customer", "Status", "Total", "Items", "Created"]
                .into_iter()
                .map(Cell::from),
        )
        .style(theme::table_header());

        let rows: Vec<Row> = view
            .items
            .iter()
            .map(|order| {
                Row::new(vec![
                    Cell::from(order.order_number.clone()),
                    Cell::from(order.customer.display_name().to_owned()),
                    Cell::from(Span::styled(
                        order.status.label().to_owned(),
                        Style::default().fg(theme::order_status_color(&order.status)),
                    )),
                    Cell::from(format!("${}", order.total_amount)),
                    Cell::from(order.items.len().to_string()),
                    Cell::from(order.created_at.format("%Y-%m-%d").to_string()),
                ])
            })
            .collect();

        let title = if self.store.is_loading() {
            " Orders (loading...) ".to_owned()
        } else {
            format!(
                " Orders \u{b7} {} ",
                common::page_summary(view.page, view.total_pages, view.total_filtered)
            )
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(22),
                Constraint::Min(14),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(6),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected())
        .block(
            Block::default()
                .title(title)
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if self.focused {
                    theme::border_focused()
                } else {
                    theme::border_default()
                }),
        );

        frame.render_stateful_widget(table, area, &mut self.table_state);

        if self.store.is_loading() {
            let spinner_area = Rect::new(area.x + 2, area.y, 3, 1);
            frame.render_stateful_widget(
                Throbber::default().style(Style::default().fg(theme::BRASS)),
                spinner_area,
                &mut self.throbber,
            );
        }
    }
}
