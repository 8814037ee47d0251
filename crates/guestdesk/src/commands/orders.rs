//! Order command handlers.

use chrono::Utc;
use tabled::Tabled;

use guestdesk_core::export::to_csv;
use guestdesk_core::{Order, OrderStatus, StatusBreakdown, visible};

use crate::cli::{GlobalOpts, ListOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Order #")]
    number: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id,
            number: o.order_number.clone(),
            customer: o.customer.display_name().to_owned(),
            status: o.status.label().to_owned(),
            total: format!("${}", o.total_amount),
            items: o.items.len(),
            created: o.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn detail(o: &Order) -> String {
    let mut lines = vec![
        format!("Order:     {}", o.order_number),
        format!("Customer:  {} <{}>", o.customer.display_name(), o.customer.email),
        format!("Status:    {} ({})", o.status.label(), o.status.as_code()),
        format!("Total:     ${}", o.total_amount),
        format!("Created:   {}", o.created_at.format("%Y-%m-%d %H:%M")),
        format!("Updated:   {}", o.updated_at.format("%Y-%m-%d %H:%M")),
    ];
    if let Some(ref notes) = o.notes {
        lines.push(format!("Notes:     {notes}"));
    }
    if !o.items.is_empty() {
        lines.push("Items:".into());
        for item in &o.items {
            lines.push(format!(
                "  {} x{} @ ${} = ${}",
                item.product_name,
                item.quantity,
                item.price,
                item.subtotal()
            ));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: OrdersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::connect(global)?;

    match args.command {
        OrdersCommand::List(opts) => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading orders...");
            let orders = service.orders(&query).await?;
            util::finish(bar);

            let page = util::render_page(&opts, orders.len());
            let view = visible(&orders, &query.filter, &query.sort, &page, Utc::now());

            let out = output::render_list(
                &global.output,
                &view.items,
                |o| OrderRow::from(o),
                |o| o.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            output::print_footer(
                &output::page_footer(
                    view.items.len(),
                    view.page,
                    page.page_size,
                    view.total_filtered,
                    view.total_pages,
                ),
                output::should_color(&global.color),
                global.quiet,
            );
            Ok(())
        }

        OrdersCommand::Get { id } => {
            let order = service.order(id).await?;
            let out = output::render_single(&global.output, &order, detail, |o| o.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::Stats(opts) => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading orders...");
            let orders = service.orders(&query).await?;
            util::finish(bar);

            // Aggregate over every row the filters matched, not one page.
            let all = util::render_page(&ListOpts { all: true, ..opts }, orders.len());
            let view = visible(&orders, &query.filter, &query.sort, &all, Utc::now());
            let stats = StatusBreakdown::compute(
                view.items.iter().copied(),
                &["C", "PR", "S", "D"],
            );

            let mut lines = vec![format!("Total:     {}", stats.total)];
            for status in OrderStatus::ALL {
                let count = stats.count(status.as_code());
                if count > 0 {
                    lines.push(format!("{:<10} {count}", format!("{}:", status.label())));
                }
            }
            lines.push(format!("Revenue:   ${}", stats.revenue));
            output::print_output(&lines.join("\n"), global.quiet);
            Ok(())
        }

        OrdersCommand::SetStatus { id, status } => {
            let status = OrderStatus::from_code(&status.to_uppercase());
            if matches!(status, OrderStatus::Unknown(_)) {
                return Err(CliError::Validation {
                    details: format!(
                        "unknown status '{}'; expected one of P, C, PR, S, D, CA, R",
                        status.as_code()
                    ),
                });
            }
            let order = service.set_order_status(id, &status).await?;
            if !global.quiet {
                eprintln!(
                    "Order {} is now {}",
                    order.order_number,
                    order.status.label()
                );
            }
            Ok(())
        }

        OrdersCommand::Delete { id } => {
            util::confirm(&format!("Delete order {id}"), global)?;
            service.delete_order(id).await?;
            if !global.quiet {
                eprintln!("Order {id} deleted");
            }
            Ok(())
        }

        OrdersCommand::Export { opts, out } => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading orders...");
            let orders = service.orders(&query).await?;
            util::finish(bar);

            let all = util::render_page(&ListOpts { all: true, ..opts }, orders.len());
            let view = visible(&orders, &query.filter, &query.sort, &all, Utc::now());
            let csv = to_csv(view.items.iter().copied());
            util::write_csv(&csv, view.items.len(), out, "orders", global)
        }
    }
}
