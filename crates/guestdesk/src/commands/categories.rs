//! Product-category command handlers.

use tabled::Tabled;

use guestdesk_core::Category;

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(args: CategoriesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let service = util::connect(global)?;

    match args.command {
        CategoriesCommand::List => {
            let categories = service.categories().await?;
            let refs: Vec<&Category> = categories.iter().collect();
            let out = output::render_list(
                &global.output,
                &refs,
                |c| CategoryRow::from(c),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Create { name, description } => {
            let category = service
                .create_category(&name, description.as_deref())
                .await?;
            if !global.quiet {
                eprintln!("Category {} created (id {})", category.name, category.id);
            }
            Ok(())
        }

        CategoriesCommand::Delete { id } => {
            util::confirm(&format!("Delete category {id}"), global)?;
            service.delete_category(id).await?;
            if !global.quiet {
                eprintln!("Category {id} deleted");
            }
            Ok(())
        }
    }
}
