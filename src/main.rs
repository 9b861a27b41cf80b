use booktape::domain::audio::{render_ascii, render_columns};
use booktape::domain::audiobook::{AudiobookOptions, AudiobookService, Session};
use booktape::domain::document::{DocumentFile, DocumentService};
use booktape::domain::translation::TranslationService;
use booktape::domain::tts::{LanguageCode, TtsService};
use booktape::error::{AppError, AppResult};
use booktape::infrastructure::config::{Config, LogFormat};
use booktape::infrastructure::repositories::GeminiRepository;
use clap::Parser;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Turn a document into a narrated audiobook
#[derive(Debug, Parser)]
#[command(name = "booktape", version)]
struct Args {
    /// Document to narrate (PDF, DOCX, TXT, MD or HTML)
    input: PathBuf,

    /// Narrate in this language (name or ISO code), translating if needed
    #[arg(short, long)]
    language: Option<String>,

    /// Voice to use instead of the language's default voice
    #[arg(short, long)]
    voice: Option<String>,

    /// Where to save the WAV file [default: input name with .wav]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Width of the waveform preview, 0 to disable
    #[arg(long, default_value_t = 60)]
    waveform_columns: usize,

    /// Maximum characters per speech request [default: TTS_MAX_CHUNK_LENGTH]
    #[arg(long)]
    max_chunk_length: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    // Initialize logging
    init_logging(&config);

    if let Err(err) = run(args, config).await {
        tracing::error!(error = %err, "booktape failed");
        eprintln!("{}", err.user_message());
        std::process::exit(err.exit_code());
    }
}

async fn run(args: Args, config: Config) -> AppResult<()> {
    tracing::info!(
        input = %args.input.display(),
        text_model = %config.gemini_text_model,
        tts_model = %config.gemini_tts_model,
        "Starting booktape"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate the Gemini client (one client behind every collaborator)
    let gemini = Arc::new(
        GeminiRepository::new(
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
            config.gemini_text_model.clone(),
            config.gemini_tts_model.clone(),
            config.request_timeout(),
        )
        .map_err(|e| AppError::Config(format!("could not build HTTP client: {}", e)))?,
    );

    // 2. Instantiate services (inject repositories)
    let document_service = Arc::new(DocumentService::new(
        gemini.clone(),
        config.local_text_extraction,
    ));
    let translation_service = Arc::new(TranslationService::new(gemini.clone()));
    let tts_service = Arc::new(TtsService::new(gemini, config.tts_cache_enabled));
    let audiobook_service =
        AudiobookService::new(document_service, translation_service, tts_service);

    // 3. Cancel between chunks on Ctrl-C
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping before the next chunk");
            signal_token.cancel();
        }
    });

    let options = AudiobookOptions {
        target_language: args.language.as_deref().map(language_name),
        voice: args.voice.clone(),
        max_chunk_length: args
            .max_chunk_length
            .map(NonZeroUsize::get)
            .unwrap_or(config.tts_max_chunk_length),
    };

    let file = DocumentFile::read(&args.input).await?;
    let mut session = Session::new();
    tracing::info!(
        session_id = %session.id(),
        created_at = %session.created_at().to_rfc3339(),
        "Session started"
    );

    audiobook_service
        .process(&mut session, &file, &options, &cancel)
        .await?;

    let Some(audiobook) = session.audiobook() else {
        return Err(AppError::Internal("pipeline finished without audio".to_string()));
    };

    if args.waveform_columns > 0 {
        if let Some(samples) = audiobook.buffer.channel(0) {
            let columns = render_columns(samples, args.waveform_columns);
            eprintln!("{}", render_ascii(&columns));
        }
    }

    println!(
        "Narrated {} characters in {} with voice {} ({:.1}s of audio)",
        audiobook.narration_text.chars().count(),
        audiobook.narration_language,
        audiobook.voice,
        audiobook.duration_secs()
    );
    if !audiobook.missing_chunks.is_empty() {
        println!(
            "Warning: {} chunk(s) produced no audio and were skipped",
            audiobook.missing_chunks.len()
        );
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("wav"));
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    session.export_wav(&output_dir)?;
    let saved = match session.take_export() {
        Some(export) => export.persist(&output)?,
        None => return Err(AppError::Internal("export was not created".to_string())),
    };
    println!("Saved {}", display_path(&saved));

    Ok(())
}

/// Map an ISO code to the language's name; unknown values pass through unchanged
fn language_name(value: &str) -> String {
    LanguageCode::parse(value)
        .map(|code| code.name().to_string())
        .unwrap_or_else(|| value.trim().to_string())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "booktape=debug"
    } else {
        "booktape=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
