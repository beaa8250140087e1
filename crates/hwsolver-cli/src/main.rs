//! CLI entry point: the composition root.

use clap::Parser;
use hwsolver_cli::{Cli, Session, bootstrap, input};

/// Log to stderr so log lines never mix with rendered answers.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let default_directive = if verbose {
        "warn,hwsolver_core=debug,hwsolver_client=debug,hwsolver_cli=debug"
    } else {
        "warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so HWSOLVER_BACKEND_URL can come from it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = bootstrap(&cli)?;
    let mut session = Session::new(ctx, std::io::stdout());
    session.start().await?;

    if let Some(question) = cli.question.as_deref() {
        return session.ask_once(question).await;
    }

    let lines = input::spawn_prompt("hwsolver> ")?;
    session.run(lines).await
}
