use anyhow::bail;
use scout_core::{DEFAULT_MODEL, JobOptions, JobStatus, Mode, ResearchJob};
use scout_jobs::{SubmitError, SubmitRequest};
use scout_prefs::Preferences;
use serde::Serialize;

use crate::cli::root_commands::RunArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `scout run`.
pub async fn handle(args: &RunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let prefs = ctx.load_prefs();
    let query = resolve_query(args, &prefs)?;
    let model = resolve_model(
        args.model.as_deref(),
        &ctx.config.general.default_model,
        &prefs,
    );
    let mode = args.mode.unwrap_or(prefs.search_mode);
    let options = resolve_options(args, &prefs);

    let controller = ctx.controller();
    let progress = Progress::spinner(&format!("submitting {mode} query to {model}"));
    let request = SubmitRequest::new(query, model, mode).with_options(options);

    let submitted = tokio::select! {
        result = controller.submit(request) => result,
        () = interrupted() => {
            controller.cancel();
            progress.finish_err("cancelled");
            bail!("cancelled before the backend acknowledged the job");
        }
    };

    let handle = match submitted {
        Ok(handle) => handle,
        Err(SubmitError::UnsupportedModelForMode {
            model,
            mode,
            suggested,
        }) => {
            progress.finish_clear();
            bail!("{}", unsupported_model_hint(&model, mode, &suggested));
        }
        Err(error) => {
            progress.finish_err("submission failed");
            return Err(error.into());
        }
    };

    let mut updates = handle.subscribe();
    let job = loop {
        let job = updates.borrow_and_update().clone();
        if job.status.is_terminal() {
            break job;
        }
        progress.set_message(&state_message(&job));

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break handle.current();
                }
            }
            () = interrupted() => {
                controller.cancel();
            }
        }
    };

    if !args.no_save {
        remember(ctx, &job);
    }

    match job.status {
        JobStatus::Completed => {
            progress.finish_clear();
            if let Some(reason) = &job.report_error {
                progress.println(&format!("warning: {reason}"));
            }
            print_job(&job, flags.format)
        }
        JobStatus::Cancelled => {
            progress.finish_err("cancelled");
            if let Some(id) = &job.id {
                progress.println(&format!(
                    "backend job {id} may still be running; stop it with `scout research stop {id}`"
                ));
            }
            bail!("job cancelled")
        }
        _ => {
            progress.finish_err("failed");
            if flags.format == OutputFormat::Json {
                output(&job, flags.format)?;
            }
            let message = job.error_message.as_deref().unwrap_or("job failed");
            match job.error_kind {
                Some(kind) => bail!("{message} ({kind})"),
                None => bail!("{message}"),
            }
        }
    }
}

/// Resolve once Ctrl-C is pressed. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn resolve_query(args: &RunArgs, prefs: &Preferences) -> anyhow::Result<String> {
    if args.again {
        return prefs
            .last_query
            .clone()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("no previous query to run again"));
    }
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        bail!("a query is required (or use --again)");
    }
    Ok(query)
}

/// `--model`, then `general.default_model`, then the last model used.
fn resolve_model(arg: Option<&str>, configured: &str, prefs: &Preferences) -> String {
    [arg, Some(configured), Some(prefs.selected_model.as_str())]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|model| !model.is_empty())
        .unwrap_or(DEFAULT_MODEL)
        .to_string()
}

/// Saved planner/headless choices, overridden by explicit flags.
fn resolve_options(args: &RunArgs, prefs: &Preferences) -> JobOptions {
    let saved = prefs.options();
    JobOptions {
        use_planner: toggle(args.planner, args.no_planner, saved.use_planner),
        headless: toggle(args.headless, args.headed, saved.headless),
    }
}

const fn toggle(on: bool, off: bool, saved: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        saved
    }
}

fn unsupported_model_hint(model: &str, mode: Mode, suggested: &str) -> String {
    format!("model '{model}' cannot run {mode} jobs; re-run with --model {suggested}")
}

fn state_message(job: &ResearchJob) -> String {
    match (job.status, job.id.as_deref()) {
        (JobStatus::Submitting, _) => format!("submitting {} query to {}", job.mode, job.model),
        (JobStatus::Running, Some(id)) => format!("researching with {} (job {id})", job.model),
        (status, _) => status.to_string(),
    }
}

fn remember(ctx: &AppContext, job: &ResearchJob) {
    let Ok(store) = ctx.prefs() else {
        return;
    };
    let saved = store.update(|prefs| {
        prefs.remember_query(&job.query);
        if let Some(result) = &job.result {
            prefs.remember_result(result);
        }
        prefs.selected_model.clone_from(&job.model);
        prefs.search_mode = job.mode;
        prefs.use_planner = job.options.use_planner;
        prefs.headless = job.options.headless;
    });
    if let Err(error) = saved {
        tracing::warn!(%error, "failed to save preferences");
    }
}

#[derive(Debug, Serialize)]
struct JobSummary<'a> {
    status: JobStatus,
    mode: Mode,
    model: &'a str,
    provider: &'a str,
    id: Option<&'a str>,
    elapsed_secs: Option<i64>,
}

fn print_job(job: &ResearchJob, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => output(job, format),
        OutputFormat::Raw => {
            if let Some(result) = &job.result {
                println!("{result}");
            }
            Ok(())
        }
        OutputFormat::Table => {
            let summary = JobSummary {
                status: job.status,
                mode: job.mode,
                model: &job.model,
                provider: &job.provider,
                id: job.id.as_deref(),
                elapsed_secs: job.elapsed_secs(),
            };
            output(&summary, format)?;
            if let Some(result) = &job.result {
                println!("\n{result}");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(query: &[&str]) -> RunArgs {
        RunArgs {
            query: query.iter().map(ToString::to_string).collect(),
            model: None,
            mode: None,
            again: false,
            planner: false,
            no_planner: false,
            headless: false,
            headed: false,
            no_save: false,
        }
    }

    #[test]
    fn query_words_are_joined() {
        let query = resolve_query(&args(&["rust", "async"]), &Preferences::default()).unwrap();
        assert_eq!(query, "rust async");
    }

    #[test]
    fn empty_query_is_an_error() {
        assert!(resolve_query(&args(&[]), &Preferences::default()).is_err());
        assert!(resolve_query(&args(&["  "]), &Preferences::default()).is_err());
    }

    #[test]
    fn again_reuses_last_query() {
        let mut run = args(&[]);
        run.again = true;
        assert!(resolve_query(&run, &Preferences::default()).is_err());

        let prefs = Preferences {
            last_query: Some("previous question".into()),
            ..Preferences::default()
        };
        assert_eq!(resolve_query(&run, &prefs).unwrap(), "previous question");
    }

    #[test]
    fn model_precedence_is_flag_config_prefs() {
        let prefs = Preferences {
            selected_model: "claude-3.5".into(),
            ..Preferences::default()
        };
        assert_eq!(resolve_model(Some("gpt-4o"), "deepseek-r1", &prefs), "gpt-4o");
        assert_eq!(resolve_model(None, "deepseek-r1", &prefs), "deepseek-r1");
        assert_eq!(resolve_model(Some(" "), "", &prefs), "claude-3.5");

        let blank = Preferences {
            selected_model: String::new(),
            ..Preferences::default()
        };
        assert_eq!(resolve_model(None, "", &blank), DEFAULT_MODEL);
    }

    #[test]
    fn saved_options_apply_without_flags() {
        let prefs = Preferences {
            use_planner: false,
            headless: false,
            ..Preferences::default()
        };
        let options = resolve_options(&args(&["q"]), &prefs);
        assert_eq!(
            options,
            JobOptions {
                use_planner: false,
                headless: false,
            }
        );
    }

    #[test]
    fn flags_override_saved_options() {
        let prefs = Preferences {
            use_planner: false,
            headless: false,
            ..Preferences::default()
        };
        let mut run = args(&["q"]);
        run.planner = true;
        run.headless = true;
        assert_eq!(resolve_options(&run, &prefs), JobOptions::default());

        let mut run = args(&["q"]);
        run.no_planner = true;
        run.headed = true;
        let options = resolve_options(&run, &Preferences::default());
        assert!(!options.use_planner);
        assert!(!options.headless);
    }

    #[test]
    fn unsupported_model_hint_names_suggestion() {
        let hint = unsupported_model_hint("gpt-4o", Mode::Research, "gemini-2.0-flash");
        assert_eq!(
            hint,
            "model 'gpt-4o' cannot run research jobs; re-run with --model gemini-2.0-flash"
        );
    }

    #[test]
    fn state_message_names_running_job() {
        let mut job = ResearchJob::submitting(
            "q",
            "gemini-2.0-flash",
            Mode::Research,
            JobOptions::default(),
        );
        assert_eq!(
            state_message(&job),
            "submitting research query to gemini-2.0-flash"
        );
        job.status = JobStatus::Running;
        job.id = Some("6f1c".into());
        assert_eq!(
            state_message(&job),
            "researching with gemini-2.0-flash (job 6f1c)"
        );
    }
}
