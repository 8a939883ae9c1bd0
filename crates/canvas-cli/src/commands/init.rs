//! Board initialization command

use canvas_core::errors::ExError;
use serde_json::json;

use crate::config::CliConfig;

pub fn execute(config: &CliConfig) -> Result<(), ExError> {
    let conn = config.open_board()?;
    let applied = canvas_store::migrations::applied_migrations(&conn)?;

    super::print_json(&json!({
        "db": config.db.display().to_string(),
        "migrations": applied,
    }))
}
