//! Scorable command handlers.

use tabled::Tabled;

use scoreboard_core::Scoreboard;
use scoreboard_core::api::{GroupId, Scorable, ScorableId, UpsertScorable};

use crate::cli::{GlobalOpts, ScorablesArgs, ScorablesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ScorableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Scorable> for ScorableRow {
    fn from(s: &Scorable) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
        }
    }
}

fn detail(s: &Scorable) -> String {
    format!("ID:   {}\nName: {}", s.id, s.name)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Scoreboard,
    args: ScorablesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ScorablesCommand::List { group } => {
            let scorables = session
                .api()
                .scorables_in_group(&GroupId::new(group))
                .await?;
            let out = output::render_list(
                &global.output,
                &scorables,
                |s| ScorableRow::from(s),
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScorablesCommand::Get { id } => {
            let scorable = session.api().get_scorable(&ScorableId::new(id)).await?;
            let out =
                output::render_single(&global.output, &scorable, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScorablesCommand::Upsert { id, group, name } => {
            let scorable = session
                .api()
                .upsert_scorable(&UpsertScorable {
                    id: id.map(ScorableId::new),
                    group_id: GroupId::new(group),
                    name,
                })
                .await?;
            let out =
                output::render_single(&global.output, &scorable, detail, |s| s.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScorablesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete scorable '{id}' and its scores?"),
                "scorables delete",
                global.yes,
            )? {
                return Ok(());
            }
            session
                .api()
                .delete_scorable(&ScorableId::new(id.clone()))
                .await?;
            util::report(&format!("Scorable '{id}' deleted"), global);
            Ok(())
        }
    }
}
