use crate::cli::subcommands::HistoryCommands;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `scout history`.
pub fn handle(action: &HistoryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        HistoryCommands::Show => {
            let prefs = ctx.prefs()?.load()?;
            if flags.format == OutputFormat::Raw {
                if let Some(result) = &prefs.last_result {
                    println!("{result}");
                }
                return Ok(());
            }
            output(&prefs, flags.format)
        }
        HistoryCommands::Clear => {
            let store = ctx.prefs()?;
            store.clear()?;
            if !flags.quiet {
                eprintln!("cleared {}", store.path().display());
            }
            Ok(())
        }
    }
}
