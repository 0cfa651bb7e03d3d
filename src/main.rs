//! Interactive claim-verification CLI
//!
//! Reads one claim from standard input, runs the pipeline, and reports the
//! outcome on standard output. Every terminal pipeline state exits with
//! status 0; failures are reported, not signaled through the exit code.
//! Diagnostics go to stderr via `tracing` (`RUST_LOG` controls verbosity).

use anyhow::Context;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::debug;
use veridict::{
    CancellationToken, Claim, EvidenceCache, Lexicon, OllamaChatClient, OllamaReasoningOracle,
    OllamaReferenceOracle, PipelineConfig, PipelineState, VerificationPipeline,
    VerificationReport, VerifyError, WikipediaClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig::default().from_env();
    debug!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "configuration loaded"
    );

    println!("\n🛡️ CORRECTEUR DE VÉRITÉ — DOUBLE IA\n");
    print!("👉 Entre une affirmation : ");
    std::io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading claim from stdin")?;

    let Some(claim) = Claim::new(line.trim()) else {
        println!("❌ Affirmation vide : rien à vérifier.");
        return Ok(());
    };

    let pipeline = build_pipeline(&config)?;

    let cancel = CancellationToken::new();
    let abort = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            abort.cancel();
        }
    });

    match pipeline.run(&claim, &cancel).await {
        Ok(report) => print_report(&report),
        Err(e) => print_failure(&e),
    }

    Ok(())
}

fn build_pipeline(config: &PipelineConfig) -> anyhow::Result<VerificationPipeline> {
    let lexicon = Lexicon::for_locale(&config.locale);

    let cache = EvidenceCache::new(config.cache_ttl(), config.cache_capacity);
    let retriever = WikipediaClient::new(
        &config.wikipedia_url,
        config.max_evidence_chars,
        config.retry.clone(),
    )
    .context("building wikipedia client")?
    .with_cache(cache);

    let chat = Arc::new(
        OllamaChatClient::new(&config.ollama_url, config.retry.clone())
            .context("building oracle client")?,
    );
    let reasoning = OllamaReasoningOracle::new(Arc::clone(&chat), &config.reasoning_model);
    let reference = OllamaReferenceOracle::new(chat, &config.reference_model);

    let pipeline = VerificationPipeline::new(
        lexicon,
        config.relevance_threshold,
        config.max_concurrent_retrievals,
        Arc::new(retriever),
        Arc::new(reasoning),
        Arc::new(reference),
    )
    .with_observer(Box::new(print_progress));

    Ok(pipeline)
}

fn print_progress(state: PipelineState) {
    match state {
        PipelineState::ConceptsExtracted => println!("📚 Recherche encyclopédique..."),
        PipelineState::EvidenceFiltered => {
            println!("⚖️ Analyse IA 1 (raisonnement)...");
            println!("🧪 Fact-checking IA 2 (référence)...");
        }
        _ => {}
    }
}

fn print_report(report: &VerificationReport) {
    println!("\n🧠 Concepts détectés : {}", report.concepts.joined());
    for scored in &report.evidence {
        println!(
            "📖 Page retenue : {} (pertinence {})",
            scored.document.title, scored.score
        );
    }

    let consensus = &report.consensus;

    println!("\n{} IA 1 : RAISONNEMENT {}", "=".repeat(20), "=".repeat(20));
    println!("{}", consensus.reasoning_text.trim());
    println!("→ verdict : {}", consensus.reasoning_verdict);

    println!("\n{} IA 2 : RESULTAT ATTENDU {}", "=".repeat(18), "=".repeat(18));
    println!("{}", consensus.reference_text.trim());
    println!("→ verdict : {}", consensus.reference_verdict);

    println!();
    match consensus.outcome {
        veridict::ConsensusOutcome::Concordant => {
            println!("✅ Concordance : les deux IA donnent le même résultat ({})", consensus.reasoning_verdict);
        }
        veridict::ConsensusOutcome::Disagreement => {
            println!("⚠️ Désaccord : l'IA 1 est potentiellement erronée");
        }
    }
    println!("{}", "=".repeat(60));
}

fn print_failure(error: &VerifyError) {
    match error {
        VerifyError::InvalidClaim => {
            println!("❌ Affirmation vide : rien à vérifier.");
        }
        VerifyError::NoConcepts => {
            println!("❌ Aucun concept exploitable dans l'affirmation.");
        }
        VerifyError::NoEvidence { .. } => {
            println!("❌ Aucune information encyclopédique trouvée.");
        }
        VerifyError::InsufficientEvidence { .. } => {
            println!("❌ Informations trouvées mais insuffisantes.");
        }
        VerifyError::ExternalService { service, reason } => {
            println!("❌ Service externe indisponible ({service}) : {reason}");
        }
        VerifyError::Cancelled => {
            println!("\n⏹️ Vérification annulée.");
        }
    }
}
