//! Staff-account command handlers.

use chrono::Utc;
use tabled::Tabled;

use guestdesk_core::export::to_csv;
use guestdesk_core::modal::FormDraft;
use guestdesk_core::{User, UserForm, UserRole, UserStatus, visible};

use crate::cli::{GlobalOpts, ListOpts, UsersArgs, UsersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "User ID")]
    user_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            user_id: u.user_id.clone(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.label().to_owned(),
            status: u.status.label().to_owned(),
        }
    }
}

fn detail(u: &User) -> String {
    [
        format!("User:      {} ({})", u.name, u.user_id),
        format!("Email:     {}", u.email),
        format!("Phone:     {}", u.phone),
        format!("Role:      {}", u.role.label()),
        format!("Status:    {}", u.status.label()),
        format!("Created:   {}", u.created_at.format("%Y-%m-%d %H:%M")),
    ]
    .join("\n")
}

fn validated(mut form: UserForm) -> Result<UserForm, CliError> {
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

/// Prompt for a password twice on an interactive terminal.
fn prompt_password() -> Result<(String, String), CliError> {
    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    Ok((password, confirm))
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(args: UsersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::connect(global)?;

    match args.command {
        UsersCommand::List(opts) => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading users...");
            let users = service.users(&query).await?;
            util::finish(bar);

            let page = util::render_page(&opts, users.len());
            let view = visible(&users, &query.filter, &query.sort, &page, Utc::now());

            let out = output::render_list(
                &global.output,
                &view.items,
                |u| UserRow::from(u),
                |u| u.id.to_string(),
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

        UsersCommand::Get { id } => {
            let user = service.user(id).await?;
            let out = output::render_single(&global.output, &user, detail, |u| u.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UsersCommand::Create {
            name,
            email,
            phone,
            role,
        } => {
            let (password, password_confirm) = prompt_password()?;
            let form = validated(UserForm {
                name,
                email,
                phone,
                role: UserRole::from_code(&role.to_uppercase()),
                password,
                password_confirm,
                ..UserForm::blank()
            })?;
            let user = service.create_user(&form).await?;
            if !global.quiet {
                eprintln!("User {} created ({})", user.name, user.user_id);
            }
            Ok(())
        }

        UsersCommand::Update {
            id,
            name,
            phone,
            role,
            status,
        } => {
            let current = service.user(id).await?;
            let mut form = UserForm::from_user(&current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(phone) = phone {
                form.phone = phone;
            }
            if let Some(role) = role {
                form.role = UserRole::from_code(&role.to_uppercase());
            }
            if let Some(status) = status {
                form.status = UserStatus::from_code(&status.to_uppercase());
            }
            let form = validated(form)?;
            let user = service.update_user(id, &form).await?;
            if !global.quiet {
                eprintln!("User {} updated", user.name);
            }
            Ok(())
        }

        UsersCommand::ResetPassword { id } => {
            let (password, confirm) = prompt_password()?;
            if password.len() < 8 {
                return Err(CliError::Validation {
                    details: "password: Password must be at least 8 characters".into(),
                });
            }
            if password != confirm {
                return Err(CliError::Validation {
                    details: "password_confirm: Passwords do not match".into(),
                });
            }
            service.reset_password(id, &password).await?;
            if !global.quiet {
                eprintln!("Password reset for user {id}");
            }
            Ok(())
        }

        UsersCommand::Delete { id } => {
            util::confirm(&format!("Delete user {id}"), global)?;
            service.delete_user(id).await?;
            if !global.quiet {
                eprintln!("User {id} deleted");
            }
            Ok(())
        }

        UsersCommand::Export { opts, out } => {
            let query = util::list_query(&opts);
            let bar = util::spinner(global, "Loading users...");
            let users = service.users(&query).await?;
            util::finish(bar);

            let all = util::render_page(&ListOpts { all: true, ..opts }, users.len());
            let view = visible(&users, &query.filter, &query.sort, &all, Utc::now());
            let csv = to_csv(view.items.iter().copied());
            util::write_csv(&csv, view.items.len(), out, "users", global)
        }
    }
}
