// PromptSmith - terminal entry point

use anyhow::{bail, Context, Result};
use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptsmith_core::{PromptCategory, PromptRequest, PromptResult, DEFAULT_TONE, TONE_OPTIONS};
use promptsmith_desktop::models::theme::{ThemeId, THEMES};
use promptsmith_desktop::services::{CompletionOutcome, PendingGeneration, PROGRESS_STAGES};
use promptsmith_desktop::state::AppState;
use promptsmith_desktop::storage::PROXY_PASSWORD_KEY;
use promptsmith_llm::ProviderType;

#[derive(Debug, Parser)]
#[command(name = "promptsmith", version, about = "Turn rough ideas into refined LLM prompts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Refine a raw idea into a structured prompt
    Generate {
        input: String,
        /// Category slug or label (general, coding, json, image, creative, business, academic, marketing)
        #[arg(long, short, default_value = "general")]
        category: String,
        #[arg(long, short, default_value = DEFAULT_TONE)]
        tone: String,
    },
    /// Generate again from the input of a stored prompt (latest by default)
    Regenerate { id: Option<String> },
    /// List recent history
    History,
    /// List saved prompts
    Saved,
    /// Show one stored prompt
    Show { id: String },
    /// Toggle a prompt in the saved collection
    Save { id: String },
    /// Replace the refined text of a stored prompt
    Edit { id: String, text: String },
    /// Delete every entry of a collection
    Clear {
        #[arg(value_enum)]
        collection: ClearTarget,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show or set the colour theme
    Theme { id: Option<String> },
    /// Create a local account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in by username or email
    Login {
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Store an API key for a provider
    SetKey { provider: String, key: String },
    /// Remove the stored API key for a provider
    DeleteKey { provider: String },
    /// Store the password for the configured proxy
    SetProxyPassword { password: String },
    /// Check local storage and the configured provider
    Check,
    /// List prompt categories and suggested tones
    Categories,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClearTarget {
    History,
    Saved,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptsmith=info,promptsmith_desktop=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let state = AppState::new();
    state
        .initialize()
        .await
        .context("failed to initialize PromptSmith data directory")?;

    run(cli.command, &state).await
}

async fn run(command: Command, state: &AppState) -> Result<()> {
    match command {
        Command::Generate {
            input,
            category,
            tone,
        } => {
            let category: PromptCategory = category.parse()?;
            let request = PromptRequest::new(input, category, tone);
            let pending = state
                .with_session(move |s| {
                    s.set_request(request);
                    s.begin()
                })
                .await?;
            drive(state, pending).await
        }
        Command::Regenerate { id } => {
            let pending = state
                .with_session(move |s| {
                    let target = id.or_else(|| s.history().first().map(|i| i.id().to_string()));
                    match target {
                        Some(id) if s.select_by_id(&id) => Ok(s.begin_regenerate()),
                        Some(id) => Err(anyhow::anyhow!("no stored prompt with id {}", id)),
                        None => Err(anyhow::anyhow!("history is empty, nothing to regenerate")),
                    }
                })
                .await??;
            drive(state, pending).await
        }
        Command::History => {
            let items = state.with_session(|s| s.history().to_vec()).await?;
            print_list("Recent history", &items);
            Ok(())
        }
        Command::Saved => {
            let items = state.with_session(|s| s.saved().to_vec()).await?;
            print_list("Saved prompts", &items);
            Ok(())
        }
        Command::Show { id } => {
            let (item, saved) = state
                .with_session(move |s| {
                    let found = s.select_by_id(&id);
                    (found.then(|| s.current().cloned()).flatten(), s.is_current_saved())
                })
                .await?;
            match item {
                Some(item) => {
                    print_result(&item, saved);
                    Ok(())
                }
                None => bail!("no stored prompt with that id"),
            }
        }
        Command::Save { id } => {
            let saved = state
                .with_session(move |s| {
                    if s.select_by_id(&id) {
                        s.toggle_saved()
                    } else {
                        None
                    }
                })
                .await?;
            match saved {
                Some(true) => println!("Saved."),
                Some(false) => println!("Removed from saved."),
                None => bail!("no stored prompt with that id"),
            }
            Ok(())
        }
        Command::Edit { id, text } => {
            let outcome = state
                .with_session(move |s| {
                    if s.select_by_id(&id) {
                        s.update_refined_prompt(&id, &text)
                    } else {
                        None
                    }
                })
                .await?;
            match outcome {
                Some(_) => {
                    println!("Updated.");
                    Ok(())
                }
                None => bail!("no stored prompt with that id"),
            }
        }
        Command::Clear { collection, yes } => {
            if !yes {
                bail!("clearing cannot be undone; re-run with --yes to confirm");
            }
            state
                .with_session(|s| match collection {
                    ClearTarget::History => s.clear_history(),
                    ClearTarget::Saved => s.clear_saved(),
                })
                .await?;
            println!("Cleared.");
            Ok(())
        }
        Command::Theme { id } => {
            let themes = state.theme().await?;
            match id {
                Some(id) => {
                    let id: ThemeId = id.parse().map_err(anyhow::Error::msg)?;
                    themes.set(id)?;
                    println!("Theme set to {}.", id.theme().name);
                }
                None => {
                    let current = themes.current();
                    for theme in THEMES.iter() {
                        let marker = if theme.id == current { "*" } else { " " };
                        println!("{} {:<8} {}", marker, theme.id, theme.name);
                    }
                }
            }
            Ok(())
        }
        Command::Register {
            name,
            username,
            email,
            password,
        } => {
            let user = state
                .auth()
                .await?
                .register(&name, &username, &email, &password)?;
            println!("Welcome, {} (@{}).", user.name, user.username);
            Ok(())
        }
        Command::Login {
            identifier,
            password,
        } => {
            let user = state.auth().await?.login(&identifier, &password)?;
            println!("Signed in as @{}.", user.username);
            Ok(())
        }
        Command::Logout => {
            state.auth().await?.logout()?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            match state.auth().await?.current_user() {
                Some(user) => println!("{} (@{}) <{}>", user.name, user.username, user.email),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Command::SetKey { provider, key } => {
            let provider: ProviderType = provider.parse().map_err(anyhow::Error::msg)?;
            state.set_api_key(&provider.to_string(), key.trim()).await?;
            println!("Stored API key for {}.", provider);
            Ok(())
        }
        Command::DeleteKey { provider } => {
            let provider: ProviderType = provider.parse().map_err(anyhow::Error::msg)?;
            state.delete_api_key(&provider.to_string()).await?;
            println!("Removed API key for {}.", provider);
            Ok(())
        }
        Command::SetProxyPassword { password } => {
            state.set_api_key(PROXY_PASSWORD_KEY, &password).await?;
            println!("Stored proxy password.");
            Ok(())
        }
        Command::Categories => {
            for category in PromptCategory::ALL {
                println!(
                    "{:<10} {:<28} {}",
                    category.slug(),
                    category.label(),
                    category.description()
                );
            }
            println!();
            println!("Suggested tones: {}", TONE_OPTIONS.join(", "));
            Ok(())
        }
        Command::Check => {
            let report = |name: &str, ok: bool| {
                println!("{:<10} {}", name, if ok { "ok" } else { "FAILED" });
            };
            report("database", state.is_database_healthy());
            report("config", state.is_config_healthy());
            report("secrets", state.is_keyring_healthy());

            let config = state.get_config().await?;
            match state.check_provider().await {
                Ok(()) => {
                    println!("{:<10} ok ({} / {})", "provider", config.provider, config.model);
                    Ok(())
                }
                Err(e) => bail!("provider {} unreachable: {}", config.provider, e),
            }
        }
    }
}

/// Execute a started generation, echoing progress stages to stderr.
async fn drive(state: &AppState, pending: Option<PendingGeneration>) -> Result<()> {
    let Some(pending) = pending else {
        bail!("nothing to refine: the input is empty");
    };

    let client = match state.generation_client().await {
        Ok(client) => client,
        Err(e) => {
            state.with_session(|s| s.reset()).await?;
            return Err(e.into());
        }
    };

    let stages = state
        .with_session(|s| s.progress().map(|p| p.subscribe()))
        .await?;
    let printer = stages.map(|mut rx| {
        tokio::spawn(async move {
            eprintln!("{}", PROGRESS_STAGES[*rx.borrow_and_update()]);
            while rx.changed().await.is_ok() {
                eprintln!("{}", PROGRESS_STAGES[*rx.borrow_and_update()]);
            }
        })
    });

    let completed = pending.execute(&client).await;
    let outcome = state.with_session(|s| s.complete(completed)).await?;
    if let Some(printer) = printer {
        printer.await.ok();
    }

    match outcome {
        CompletionOutcome::Succeeded(item) => {
            print_result(&item, false);
            Ok(())
        }
        CompletionOutcome::Failed(err) => bail!("{}", err),
        CompletionOutcome::Discarded => bail!("the request was superseded"),
    }
}

fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn print_list(title: &str, items: &[PromptResult]) {
    println!("{} ({})", title, items.len());
    for item in items {
        let preview: String = item.original_input().chars().take(60).collect();
        println!(
            "  {}  {}  [{}]  {}",
            item.id(),
            format_timestamp(item.timestamp()),
            item.category().slug(),
            preview.replace('\n', " ")
        );
    }
}

fn print_result(item: &PromptResult, saved: bool) {
    println!(
        "{}  {}  {} / {}{}",
        item.id(),
        format_timestamp(item.timestamp()),
        item.category(),
        item.tone(),
        if saved { "  (saved)" } else { "" }
    );
    println!();
    println!("{}", item.refined_prompt());
    println!();
    println!("Why: {}", item.explanation());
    for tip in item.tips() {
        println!("  - {}", tip);
    }
    if let Some(follow_up) = item.suggested_follow_up() {
        println!("Next: {}", follow_up);
    }
}
