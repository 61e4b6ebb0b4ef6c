use std::sync::Arc;

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinSet,
};
use tracing::{error, info};

use crate::{handler::SubmitHandler, models::FormFields};

/// Submits every line from `reader` as its own form.
///
/// Lines are spawned as soon as they are read, so a slow request does not hold
/// up the next line. Blank lines are skipped, malformed lines are reported and
/// skipped. Returns the number of submissions issued once all have resolved.
pub async fn run_lines<R>(handler: Arc<SubmitHandler>, reader: R) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut tasks = JoinSet::new();
    let mut submitted = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let fields = match FormFields::parse_line(&line) {
            Ok(fields) => fields,
            Err(e) => {
                eprintln!("Skipping line: {e}");
                continue;
            }
        };

        let handler = handler.clone();
        tasks.spawn(async move { handler.submit(fields).await });
        submitted += 1;
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) if !outcome.rendered => {
                info!(ticket = outcome.ticket, "Superseded by a newer submission");
            }
            Ok(_) => {}
            Err(e) => error!("Submission task failed: {e}"),
        }
    }

    Ok(submitted)
}
