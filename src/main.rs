use recruitment_console::config::{get_config, init_config};
use recruitment_console::models::candidate::Candidate;
use recruitment_console::pipeline::{available_actions, Action, PipelineContext};
use recruitment_console::Console;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn describe(candidate: &Candidate, ctx: &PipelineContext, cv: Option<String>) -> String {
    let actions: Vec<&str> = available_actions(ctx).iter().map(Action::label).collect();
    let actions = if actions.is_empty() {
        "none".to_string()
    } else {
        actions.join(", ")
    };

    let mut line = format!(
        "{} <{}> | {} | {} | interviews: {} | assessments: {} | actions: {}",
        candidate.name,
        candidate.email,
        ctx.status,
        candidate.technologies().join(", "),
        ctx.stages.len(),
        ctx.assessments.len(),
        actions,
    );
    if let Some(cv) = cv {
        line.push_str(&format!(" | cv: {cv}"));
    }
    line
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    init_config()?;
    let config = get_config()?;
    let console = Console::new(config)?;

    let query = std::env::args().nth(1).unwrap_or_default();
    let candidates = console.candidates.search(&query).await?;
    info!(count = candidates.len(), query = %query, "Loaded candidates");

    for candidate in &candidates {
        let ctx = match console.workflow.snapshot(&candidate.id).await {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!(candidate_id = %candidate.id, error = %e, "Could not load pipeline state");
                continue;
            }
        };
        let cv = candidate
            .cv_file_url
            .as_deref()
            .and_then(|path| console.file_url(path).ok())
            .map(|url| url.to_string());
        println!("{}", describe(candidate, &ctx, cv));
    }

    Ok(())
}
