//! Products screen — shop inventory with add/edit/delete modals.

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

use guestdesk_core::modal::FormDraft;
use guestdesk_core::{
    AdminService, CollectionStore, DateRange, ListQuery, ModalState, MutationErrorPolicy, Product,
    ProductForm, StatusFilter, SubmitOutcome, visible,
};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::screen::ScreenId;
use crate::screens::common;
use crate::theme;
use crate::widgets::form::FormFields;
use crate::widgets::popup;

const PAGE_SIZE: usize = 10;
const SORT_FIELDS: [&str; 5] = ["created_at", "name", "price", "cost", "quantity"];

pub struct ProductsScreen {
    service: Arc<AdminService>,
    action_tx: Option<UnboundedSender<Action>>,
    store: CollectionStore<Product>,
    query: ListQuery,
    modal: ModalState<ProductForm>,
    fields: Option<FormFields>,
    table_state: TableState,
    search: Option<Input>,
    throbber: ThrobberState,
    focused: bool,
}

impl ProductsScreen {
    pub fn new(service: Arc<AdminService>) -> Self {
        Self {
            service,
            action_tx: None,
            store: CollectionStore::new(&[]),
            query: ListQuery::new(PAGE_SIZE),
            modal: ModalState::Closed,
            fields: None,
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
            let result = service.products(&query).await.map_err(|e| e.to_string());
            let _ = tx.send(Action::ProductsLoaded { seq, result });
        });
    }

    fn current_view_len(&self) -> usize {
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

    fn selected_product_id(&self) -> Option<i64> {
        let view = visible(
            self.store.items(),
            &self.query.filter,
            &self.query.sort,
            &self.query.page,
            Utc::now(),
        );
        let idx = self.table_state.selected()?;
        view.items.get(idx).map(|p| p.id)
    }

    /// Products filter on active/inactive.
    fn cycle_active_filter(&mut self) {
        let next = match &self.query.filter.status {
            StatusFilter::All => StatusFilter::Code("active".into()),
            StatusFilter::Code(code) if code == "active" => StatusFilter::Code("inactive".into()),
            StatusFilter::Code(_) => StatusFilter::All,
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
        self.query
            .update_filter(|f| f.date_range = RANGES[(idx + 1) % RANGES.len()]);
        self.refetch();
    }

    fn cycle_sort_field(&mut self) {
        let idx = SORT_FIELDS
            .iter()
            .position(|f| *f == self.query.sort.field)
            .unwrap_or(0);
        self.query.select_sort(SORT_FIELDS[(idx + 1) % SORT_FIELDS.len()]);
    }

    // ── Modal plumbing ───────────────────────────────────────────────

    fn form_inputs(form: &ProductForm) -> FormFields {
        let ids = form
            .category_ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        FormFields::new(vec![
            ("Name", "name", form.name.clone()),
            ("Cost", "cost", form.cost.clone()),
            ("Price", "price", form.price.clone()),
            ("Quantity", "quantity", form.quantity.clone()),
            ("Description", "description", form.description.clone()),
            ("Category ids (comma separated)", "category_ids", ids),
            (
                "Active (yes/no)",
                "active",
                if form.is_active { "yes" } else { "no" }.to_owned(),
            ),
        ])
    }

    fn open_add(&mut self) {
        let form = ProductForm::blank();
        self.fields = Some(Self::form_inputs(&form));
        self.modal.open_add(form);
    }

    fn open_edit(&mut self, id: i64) {
        if let Some(product) = self.store.find(id) {
            let form = ProductForm::from_product(product);
            self.fields = Some(Self::form_inputs(&form));
            self.modal.open_edit(id, form);
        }
    }

    fn close_modal(&mut self) {
        self.modal.close();
        self.fields = None;
    }

    fn submit_form(&mut self) {
        if let (Some(fields), Some(form)) = (&self.fields, self.modal.form_mut()) {
            form.name = fields.value("name");
            form.cost = fields.value("cost");
            form.price = fields.value("price");
            form.quantity = fields.value("quantity");
            form.description = fields.value("description");
            form.category_ids = fields
                .value("category_ids")
                .split(',')
                .filter_map(|part| part.trim().parse().ok())
                .collect();
            form.is_active = !fields.value("active").trim().eq_ignore_ascii_case("no");
        }
        if self.modal.submit() == SubmitOutcome::Submit {
            match self.modal.clone() {
                ModalState::Add { form } => self.spawn_create(form),
                ModalState::Edit { id, form } => self.spawn_update(id, form),
                _ => {}
            }
        }
    }

    fn spawn_create(&self, form: ProductForm) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let (success, message) = match service.create_product(&form).await {
                Ok(product) => (true, format!("Product {} created", product.name)),
                Err(err) => (false, format!("Create failed: {err}")),
            };
            let _ = tx.send(Action::MutationDone {
                screen: ScreenId::Products,
                success,
                message,
            });
        });
    }

    fn spawn_update(&self, id: i64, form: ProductForm) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let (success, message) = match service.update_product(id, &form).await {
                Ok(product) => (true, format!("Product {} updated", product.name)),
                Err(err) => (false, format!("Update failed: {err}")),
            };
            let _ = tx.send(Action::MutationDone {
                screen: ScreenId::Products,
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
            let (success, message) = match service.delete_product(id).await {
                Ok(()) => (true, "Product deleted".to_owned()),
                Err(err) => (false, format!("Delete failed: {err}")),
            };
            let _ = tx.send(Action::MutationDone {
                screen: ScreenId::Products,
                success,
                message,
            });
        });
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match &self.modal {
            ModalState::Add { .. } | ModalState::Edit { .. } => {
                let consumed = self
                    .fields
                    .as_mut()
                    .is_some_and(|fields| fields.handle_key(key));
                if !consumed {
                    match key.code {
                        KeyCode::Enter => self.submit_form(),
                        KeyCode::Esc => self.close_modal(),
                        _ => {}
                    }
                }
            }
            ModalState::ConfirmDelete { id } => {
                let id = *id;
                match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        if self.modal.submit() == SubmitOutcome::Submit {
                            self.spawn_delete(id);
                        }
                    }
                    KeyCode::Esc => self.close_modal(),
                    _ => {}
                }
            }
            ModalState::Detail { id } => {
                let id = *id;
                match key.code {
                    KeyCode::Char('e') => self.open_edit(id),
                    KeyCode::Esc => self.close_modal(),
                    _ => {}
                }
            }
            _ => {
                if key.code == KeyCode::Esc {
                    self.close_modal();
                }
            }
        }
    }

    fn render_form_modal(&mut self, frame: &mut Frame, area: Rect, title: &str) {
        let errors = match &self.modal {
            ModalState::Add { form } | ModalState::Edit { form, .. } => form.errors().clone(),
            _ => return,
        };
        let Some(fields) = &self.fields else { return };

        let height = fields.height(&errors) + 4;
        let popup = popup::centered_rect(56, height, area);
        let inner = popup::modal_block(frame, popup, title);

        let parts =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        fields.render(frame, parts[0], &errors);
        frame.render_widget(
            Paragraph::new(common::hint_line(&[
                ("Tab", "next field"),
                ("Enter", "save"),
                ("Esc", "cancel"),
            ])),
            parts[1],
        );
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, product: &Product) {
        let popup = popup::centered_rect(58, 12, area);
        let inner = popup::modal_block(
            frame,
            popup,
            &format!("{} ({})", product.name, product.product_code),
        );

        let mut lines = vec![
            Line::from(vec![
                Span::styled("  Cost       ", theme::form_label()),
                Span::styled(format!("${}", product.cost), theme::table_row()),
                Span::styled("   Price   ", theme::form_label()),
                Span::styled(format!("${}", product.price), theme::table_row()),
                Span::styled("   Margin  ", theme::form_label()),
                Span::styled(
                    format!("${}", product.margin()),
                    Style::default().fg(theme::BRASS),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Stock      ", theme::form_label()),
                Span::styled(product.quantity.to_string(), theme::table_row()),
            ]),
            Line::from(vec![
                Span::styled("  Active     ", theme::form_label()),
                Span::styled(
                    if product.is_active { "yes" } else { "no" },
                    theme::table_row(),
                ),
            ]),
        ];
        if !product.categories.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("  Categories ", theme::form_label()),
                Span::styled(product.category_names(), theme::table_row()),
            ]));
        }
        if let Some(ref description) = product.description {
            lines.push(Line::from(vec![
                Span::styled("  Notes      ", theme::form_label()),
                Span::styled(description.as_str(), theme::table_row()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(common::hint_line(&[("e", "edit"), ("Esc", "back")]));
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for ProductsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        self.refetch();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.modal.is_open() {
            self.handle_modal_key(key);
            return Ok(None);
        }

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
            KeyCode::Char('f') => self.cycle_active_filter(),
            KeyCode::Char('d') => self.cycle_date_range(),
            KeyCode::Char('o') => self.cycle_sort_field(),
            KeyCode::Char('s') => {
                let field = self.query.sort.field.clone();
                self.query.select_sort(&field);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.current_view_len();
                common::move_selection(&mut self.table_state, len, -1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.current_view_len();
                common::move_selection(&mut self.table_state, len, 1);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.query.page.page = self.query.page.page.saturating_sub(1).max(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.query.page.page += 1;
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_product_id() {
                    self.modal.open_detail(id);
                }
            }
            KeyCode::Char('a') => self.open_add(),
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_product_id() {
                    self.open_edit(id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_product_id() {
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
            Action::ProductsLoaded { seq, result } => {
                let failed = result.is_err();
                if self.store.apply(*seq, result.clone()) {
                    let len = self.current_view_len();
                    common::clamp_selection(&mut self.table_state, len);
                    if failed {
                        let message = self.store.error().unwrap_or("fetch failed").to_owned();
                        return Ok(Some(Action::Notify(Notification::error(format!(
                            "Failed to load products: {message}"
                        )))));
                    }
                }
            }
            Action::MutationDone {
                screen: ScreenId::Products,
                success,
                message,
            } => {
                self.modal
                    .resolve_mutation(*success, MutationErrorPolicy::StayOpen);
                if *success {
                    self.fields = None;
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
            Constraint::Length(1), // active/inactive breakdown
            Constraint::Length(1), // filter summary
            Constraint::Min(3),    // table
            Constraint::Length(1), // footer
        ])
        .split(area);

        let stats = self.store.breakdown();
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" products ", theme::key_hint()),
                Span::styled(
                    format!("active {}  ", stats.count("active")),
                    Style::default().fg(theme::SUCCESS_GREEN),
                ),
                Span::styled(
                    format!("inactive {}  ", stats.count("inactive")),
                    Style::default().fg(theme::ERROR_RED),
                ),
            ])),
            rows_area[0],
        );

        let status_label = match &self.query.filter.status {
            StatusFilter::Code(code) => code.clone(),
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
                ("f", "active"),
                ("d", "range"),
                ("o/s", "sort"),
                ("a", "add"),
                ("e", "edit"),
                ("x", "delete"),
                ("Enter", "detail"),
                ("r", "refresh"),
            ])),
            rows_area[3],
        );

        match &self.modal {
            ModalState::Detail { id } => {
                if let Some(product) = self.store.find(*id) {
                    let product = product.clone();
                    self.render_detail(frame, area, &product);
                }
            }
            ModalState::Add { .. } => self.render_form_modal(frame, area, "Add product"),
            ModalState::Edit { .. } => self.render_form_modal(frame, area, "Edit product"),
            ModalState::ConfirmDelete { id } => {
                popup::confirm_dialog(
                    frame,
                    area,
                    "Delete product",
                    &format!("Permanently delete product #{id}? This cannot be undone."),
                );
            }
            _ => {}
        }
    }

    fn wants_text_input(&self) -> bool {
        self.search.is_some() || matches!(self.modal, ModalState::Add { .. } | ModalState::Edit { .. })
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "products"
    }
}

impl ProductsScreen {
    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let view = visible(
            self.store.items(),
            &self.query.filter,
            &self.query.sort,
            &self.query.page,
            Utc::now(),
        );

        if let Some(message) = self.store.error() {
            if self.store.is_empty() {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Could not load products",
                        theme::title_style(),
                    )),
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
            ["Code", "Name", "Categories", "Cost", "Price", "Stock", "Active"]
                .into_iter()
                .map(Cell::from),
        )
        .style(theme::table_header());

        let rows: Vec<Row> = view
            .items
            .iter()
            .map(|product| {
                Row::new(vec![
                    Cell::from(product.product_code.clone()),
                    Cell::from(product.name.clone()),
                    Cell::from(product.category_names()),
                    Cell::from(format!("${}", product.cost)),
                    Cell::from(format!("${}", product.price)),
                    Cell::from(product.quantity.to_string()),
                    Cell::from(if product.is_active { "yes" } else { "no" }),
                ])
            })
            .collect();

        let title = if self.store.is_loading() {
            " Products (loading...) ".to_owned()
        } else {
            format!(
                " Products \u{b7} {} ",
                common::page_summary(view.page, view.total_pages, view.total_filtered)
            )
        };

        let table = Table::new(
            rows,
            [
                Constraint::Length(22),
                Constraint::Min(14),
                Constraint::Min(12),
                Constraint::Length(9),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(7),
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
