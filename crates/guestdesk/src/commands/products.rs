//! Product command handlers.

use chrono::Utc;
use tabled::Tabled;

use guestdesk_core::export::to_csv;
use guestdesk_core::modal::FormDraft;
use guestdesk_core::{Product, ProductForm, visible};

use crate::cli::{GlobalOpts, ListOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Categories")]
    categories: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            code: p.product_code.clone(),
            name: p.name.clone(),
            categories: p.category_names(),
            cost: format!("${}", p.cost),
            price: format!("${}", p.price),
            stock: p.quantity,
            active: if p.is_active { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(p: &Product) -> String {
    let mut lines = vec![
        format!("Product:   {} ({})", p.name, p.product_code),
        format!("Cost:      ${}", p.cost),
        format!("Price:     ${} (margin ${})", p.price, p.margin()),
        format!("Stock:     {}", p.quantity),
        format!("Active:    {}", if p.is_active { "yes" } else { "no" }),
        format!("Created:   {}", p.created_at.format("%Y-%m-%d %H:%M")),
    ];
    if !p.categories.is_empty() {
        lines.push(format!("Categories: {}", p.category_names()));
    }
    if let Some(ref description) = p.description {
        lines.push(format!("Notes:     {description}"));
    }
    lines.join("\n")
}

fn validated(mut form: ProductForm) -> Result<ProductForm, CliError> {
    if form.validate() {
        Ok(form)
    } else {
        let details = form
            .errors
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("\n");
        Err(CliError::Validation { details })
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(args: ProductsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::connect(global)?;

    match args.command {
        ProductsCommand::List(opts) => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading products...");
            let products = service.products(&query).await?;
            util::finish(bar);

            let page = util::render_page(&opts, products.len());
            let view = visible(&products, &query.filter, &query.sort, &page, Utc::now());

            let out = output::render_list(
                &global.output,
                &view.items,
                |p| ProductRow::from(p),
                |p| p.id.to_string(),
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

        ProductsCommand::Get { id } => {
            let product = service.product(id).await?;
            let out =
                output::render_single(&global.output, &product, detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Create {
            name,
            cost,
            price,
            quantity,
            description,
            categories,
        } => {
            let form = validated(ProductForm {
                name,
                cost,
                price,
                quantity,
                description: description.unwrap_or_default(),
                category_ids: categories,
                ..ProductForm::blank()
            })?;
            let product = service.create_product(&form).await?;
            if !global.quiet {
                eprintln!(
                    "Product {} created ({})",
                    product.name, product.product_code
                );
            }
            Ok(())
        }

        ProductsCommand::Update {
            id,
            name,
            cost,
            price,
            quantity,
            description,
            active,
        } => {
            let current = service.product(id).await?;
            let mut form = ProductForm::from_product(&current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(cost) = cost {
                form.cost = cost;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(quantity) = quantity {
                form.quantity = quantity;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(active) = active {
                form.is_active = active;
            }
            let form = validated(form)?;
            let product = service.update_product(id, &form).await?;
            if !global.quiet {
                eprintln!("Product {} updated", product.name);
            }
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            util::confirm(&format!("Delete product {id}"), global)?;
            service.delete_product(id).await?;
            if !global.quiet {
                eprintln!("Product {id} deleted");
            }
            Ok(())
        }

        ProductsCommand::Export { opts, out } => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading products...");
            let products = service.products(&query).await?;
            util::finish(bar);

            let all = util::render_page(&ListOpts { all: true, ..opts }, products.len());
            let view = visible(&products, &query.filter, &query.sort, &all, Utc::now());
            let csv = to_csv(view.items.iter().copied());
            util::write_csv(&csv, view.items.len(), out, "products", global)
        }
    }
}
