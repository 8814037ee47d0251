//! Room command handlers.

use chrono::Utc;
use tabled::Tabled;

use guestdesk_core::export::to_csv;
use guestdesk_core::modal::FormDraft;
use guestdesk_core::{Room, RoomCategory, RoomForm, visible};

use crate::cli::{GlobalOpts, ListOpts, RoomsArgs, RoomsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price/Night")]
    price: String,
    #[tabled(rename = "Capacity")]
    capacity: u32,
    #[tabled(rename = "Reserved")]
    reserved: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Room> for RoomRow {
    fn from(r: &Room) -> Self {
        Self {
            id: r.id,
            code: r.room_code.clone(),
            category: r.category.label().to_owned(),
            price: format!("${}", r.price_per_night),
            capacity: r.capacity,
            reserved: if r.reserved { "yes" } else { "no" }.into(),
            active: if r.is_active { "yes" } else { "no" }.into(),
        }
    }
}

fn detail(r: &Room) -> String {
    let mut lines = vec![
        format!("Room:      {}", r.room_code),
        format!("Category:  {} ({})", r.category.label(), r.category.as_code()),
        format!("Price:     ${} per night", r.price_per_night),
        format!("Capacity:  {}", r.capacity),
        format!("Reserved:  {}", if r.reserved { "yes" } else { "no" }),
        format!("Active:    {}", if r.is_active { "yes" } else { "no" }),
        format!("Created:   {}", r.created_at.format("%Y-%m-%d %H:%M")),
    ];
    if let Some(ref description) = r.description {
        lines.push(format!("Notes:     {description}"));
    }
    lines.join("\n")
}

/// Validate a form, folding field errors into one CLI diagnostic.
fn validated(mut form: RoomForm) -> Result<RoomForm, CliError> {
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
pub async fn handle(args: RoomsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::connect(global)?;

    match args.command {
        RoomsCommand::List(opts) => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading rooms...");
            let rooms = service.rooms(&query).await?;
            util::finish(bar);

            let page = util::render_page(&opts, rooms.len());
            let view = visible(&rooms, &query.filter, &query.sort, &page, Utc::now());

            let out = output::render_list(
                &global.output,
                &view.items,
                |r| RoomRow::from(r),
                |r| r.id.to_string(),
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

        RoomsCommand::Get { id } => {
            let room = service.room(id).await?;
            let out = output::render_single(&global.output, &room, detail, |r| r.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RoomsCommand::Create {
            code,
            category,
            price,
            capacity,
            description,
        } => {
            let form = validated(RoomForm {
                room_code: code,
                category: RoomCategory::from_code(&category.to_uppercase()),
                price_per_night: price,
                capacity,
                description: description.unwrap_or_default(),
                ..RoomForm::blank()
            })?;
            let room = service.create_room(&form).await?;
            if !global.quiet {
                eprintln!("Room {} created (id {})", room.room_code, room.id);
            }
            Ok(())
        }

        RoomsCommand::Update {
            id,
            code,
            category,
            price,
            capacity,
            description,
            active,
        } => {
            // Pre-populate from the current room, then apply the flags —
            // same edit semantics as the admin modal.
            let current = service.room(id).await?;
            let mut form = RoomForm::from_room(&current);
            if let Some(code) = code {
                form.room_code = code;
            }
            if let Some(category) = category {
                form.category = RoomCategory::from_code(&category.to_uppercase());
            }
            if let Some(price) = price {
                form.price_per_night = price;
            }
            if let Some(capacity) = capacity {
                form.capacity = capacity;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(active) = active {
                form.is_active = active;
            }
            let form = validated(form)?;
            let room = service.update_room(id, &form).await?;
            if !global.quiet {
                eprintln!("Room {} updated", room.room_code);
            }
            Ok(())
        }

        RoomsCommand::Delete { id } => {
            util::confirm(&format!("Delete room {id}"), global)?;
            service.delete_room(id).await?;
            if !global.quiet {
                eprintln!("Room {id} deleted");
            }
            Ok(())
        }

        RoomsCommand::Export { opts, out } => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading rooms...");
            let rooms = service.rooms(&query).await?;
            util::finish(bar);

            let all = util::render_page(&ListOpts { all: true, ..opts }, rooms.len());
            let view = visible(&rooms, &query.filter, &query.sort, &all, Utc::now());
            let csv = to_csv(view.items.iter().copied());
            util::write_csv(&csv, view.items.len(), out, "rooms", global)
        }
    }
}
