//! Group command handlers.

use tabled::Tabled;

use scoreboard_core::Scoreboard;
use scoreboard_core::api::{Group, GroupId, UpsertGroup};

use crate::cli::{GlobalOpts, GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Group> for GroupRow {
    fn from(g: &Group) -> Self {
        Self {
            id: g.id.to_string(),
            name: g.name.clone(),
        }
    }
}

fn detail(g: &Group) -> String {
    format!("ID:   {}\nName: {}", g.id, g.name)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Scoreboard,
    args: GroupsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GroupsCommand::List => {
            let groups = session.api().groups().await?;
            let out = output::render_list(
                &global.output,
                &groups,
                |g| GroupRow::from(g),
                |g| g.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Get { id } => {
            let group = session.api().get_group(&GroupId::new(id)).await?;
            let out = output::render_single(&global.output, &group, detail, |g| g.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Upsert { id, name } => {
            let group = session
                .api()
                .upsert_group(&UpsertGroup {
                    id: id.map(GroupId::new),
                    name,
                })
                .await?;
            let out = output::render_single(&global.output, &group, detail, |g| g.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        GroupsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete group '{id}' and everything in it?"),
                "groups delete",
                global.yes,
            )? {
                return Ok(());
            }
            session.api().delete_group(&GroupId::new(id.clone())).await?;
            util::report(&format!("Group '{id}' deleted"), global);
            Ok(())
        }
    }
}
