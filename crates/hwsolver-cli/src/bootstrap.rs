//! Composition root: wires the HTTP client and speech platform into the
//! interaction controller.

use std::sync::Arc;

use anyhow::{Context, Result};
use hwsolver_client::{DefaultSolverClient, SolverClientConfig};
use hwsolver_core::{
    ControllerConfig, InteractionController, InteractionDeps, InteractionEvent,
    SpeechSynthesizer, UnavailableSynthesizer, VoiceDescriptor, resolve_backend_base,
};
use tokio::sync::{mpsc, watch};

use crate::console_speech::{ConsoleSynthesizer, console_voices};
use crate::parser::Cli;

/// Everything a session needs.
pub struct CliContext {
    pub controller: InteractionController,
    pub events: mpsc::UnboundedReceiver<InteractionEvent>,
    /// Publishes the voice catalog; dropping it freezes the catalog.
    pub voices: watch::Sender<Vec<VoiceDescriptor>>,
    pub backend_base: String,
}

pub fn bootstrap(cli: &Cli) -> Result<CliContext> {
    let backend_base = resolve_backend_base(cli.backend_url.as_deref(), &cli.origin);

    let client = Arc::new(
        DefaultSolverClient::new(&SolverClientConfig::new(&backend_base))
            .with_context(|| format!("Failed to create solver client for {backend_base}"))?,
    );

    let synthesizer: Arc<dyn SpeechSynthesizer> = if cli.no_speech {
        Arc::new(UnavailableSynthesizer)
    } else {
        Arc::new(ConsoleSynthesizer::new(cli.words_per_minute))
    };
    let catalog = if cli.no_speech {
        Vec::new()
    } else {
        console_voices()
    };
    let (voices, voices_rx) = watch::channel(catalog);

    let deps = InteractionDeps {
        solver: client.clone(),
        history: client,
        synthesizer,
        voices: voices_rx,
    };
    let (mut controller, events) = InteractionController::new(deps, &ControllerConfig::default())
        .context("Failed to create interaction controller")?;

    controller.set_auto_speak(cli.auto_speak);
    if let Some(index) = cli.voice {
        if !controller.set_voice(index) {
            tracing::warn!(index, "Voice index out of range, using the default voice");
        }
    }

    tracing::info!(backend = %backend_base, auto_speak = cli.auto_speak, "Session configured");

    Ok(CliContext {
        controller,
        events,
        voices,
        backend_base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_backend_derived_from_origin() {
        let cli = Cli::parse_from(["hwsolver", "--origin", "http://localhost:3000"]);
        // The env override would win; only check when it is absent.
        if cli.backend_url.is_none() {
            let ctx = bootstrap(&cli).unwrap();
            assert_eq!(ctx.backend_base, "http://localhost:8000");
        }
    }

    #[tokio::test]
    async fn test_explicit_backend_and_options() {
        let cli = Cli::parse_from([
            "hwsolver",
            "--backend-url",
            "https://solver.example.com/",
            "--auto-speak",
            "--voice",
            "1",
        ]);
        let ctx = bootstrap(&cli).unwrap();
        assert_eq!(ctx.backend_base, "https://solver.example.com");
        assert!(ctx.controller.auto_speak());
        assert_eq!(ctx.controller.voices().selected_index(), 1);
        assert_eq!(ctx.controller.voices().list().len(), 3);
    }

    #[tokio::test]
    async fn test_no_speech_has_no_voices() {
        let cli = Cli::parse_from(["hwsolver", "--no-speech", "--backend-url", "http://h:8000"]);
        let ctx = bootstrap(&cli).unwrap();
        assert!(ctx.controller.voices().list().is_empty());
        assert_eq!(ctx.controller.voices().labels(), vec!["System voice"]);
    }
}
