//! Score command handlers.

use tabled::Tabled;

use scoreboard_core::Scoreboard;
use scoreboard_core::api::{ScorableId, Score, ScoreId, ScoresQuery, UpsertScore};

use crate::cli::{GlobalOpts, OutputFormat, ScoresArgs, ScoresCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Score")]
    value: i64,
    #[tabled(rename = "Date (UTC)")]
    date: String,
}

impl From<&Score> for ScoreRow {
    fn from(s: &Score) -> Self {
        Self {
            id: s.id.to_string(),
            player: s.username.clone(),
            value: s.value,
            date: util::format_date(s.date),
        }
    }
}

/// Fetch and render the scores of one scorable.
///
/// Shared with `watch`, which re-renders on every change.
pub async fn render_scores(
    session: &Scoreboard,
    scorable_id: &ScorableId,
    limit: Option<usize>,
    format: &OutputFormat,
) -> Result<String, CliError> {
    let scores = session
        .api()
        .scores(&ScoresQuery {
            scorable_id: scorable_id.clone(),
            limit,
        })
        .await?;
    Ok(output::render_list(
        format,
        &scores,
        |s| ScoreRow::from(s),
        |s| s.id.to_string(),
    ))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Scoreboard,
    args: ScoresArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ScoresCommand::List { scorable, limit } => {
            let out =
                render_scores(session, &ScorableId::new(scorable), limit, &global.output).await?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScoresCommand::Upsert {
            id,
            scorable,
            player,
            value,
            date,
        } => {
            let saved = session
                .api()
                .upsert_score(&UpsertScore {
                    id: id.map(ScoreId::new),
                    scorable_id: ScorableId::new(scorable),
                    username: player,
                    value,
                    date,
                })
                .await?;
            let out = output::render_single(
                &global.output,
                &saved,
                |s| format!("Score saved with ID {}", s.id),
                |s| s.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ScoresCommand::Delete { id } => {
            if !util::confirm(&format!("Delete score '{id}'?"), "scores delete", global.yes)? {
                return Ok(());
            }
            session.api().delete_score(&ScoreId::new(id.clone())).await?;
            util::report(&format!("Score '{id}' deleted"), global);
            Ok(())
        }
    }
}
