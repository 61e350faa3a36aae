//! Clearing the log history.

use crate::app::App;
use crate::errors::{AppError, AppResult};

/// Deletes every log entry. Destructive and irreversible, so the `--yes`
/// flag stands in for the confirmation dialog.
pub fn clear_logs(app: &mut App, yes: bool) -> AppResult<()> {
    if !yes {
        return Err(AppError::Tracker(
            "Refusing to delete all log entries. Re-run with --yes to confirm.".to_string(),
        ));
    }

    let removed = app.state().logs.len();
    app.clear_logs()?;
    println!("已清除 {} 条记录", removed);
    Ok(())
}
