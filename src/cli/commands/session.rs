use crate::cli::commands::{describe_step, open_session, open_store};
use crate::cli::parser::{Cli, SessionCmd};
use crate::config::Config;
use crate::db::sessions;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};

/// Handle the `session` subcommands.
pub fn handle(cli: &Cli, action: &SessionCmd, cfg: &Config) -> AppResult<()> {
    let mut store = open_store(cfg)?;

    match action {
        SessionCmd::Show => {
            let ctx = open_session(&store, cli, cfg)?;
            header(format!("Session '{}'", ctx.id));
            print!("{}", ctx.session.current_state());
            describe_step(&mut store, &ctx, cfg)?;
        }
        SessionCmd::Cancel => {
            let ctx = open_session(&store, cli, cfg)?;
            let id = ctx.id.clone();
            if !ctx.discard(store.conn())? {
                return Err(AppError::SessionNotFound(id));
            }
            success(format!("Session '{id}' cancelled."));
        }
        SessionCmd::List => {
            sessions::purge_expired(store.conn(), cfg.session_ttl_minutes)?;
            let stored = sessions::list(store.conn())?;
            if stored.is_empty() {
                info("No stored sessions.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Session", 20),
                Column::new("State", 28),
                Column::new("Updated (UTC)", 20),
            ]);
            for (id, updated_at, session) in stored {
                table.add_row(vec![id, session.label(), updated_at]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }
    }
    Ok(())
}
