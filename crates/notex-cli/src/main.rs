//! notex - chat with a summarization assistant from the terminal

mod commands;
mod config;
mod render;

use anyhow::Context;
use clap::Parser;
use notex_api::ApiClient;
use notex_session::{FileStore, InteractionController, Storage};
use std::path::PathBuf;
use std::sync::Arc;

use render::Palette;

/// notex - chat, YouTube and document summaries
#[derive(Parser, Debug)]
#[command(name = "notex")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Send a single chat message and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Summarize a YouTube video and exit
    #[arg(long)]
    youtube: Option<String>,

    /// Summarize a .doc, .docx or .pdf file and exit
    #[arg(long)]
    upload: Option<PathBuf>,

    /// List saved conversations
    #[arg(long)]
    list: bool,

    /// Check whether the backend is reachable
    #[arg(long)]
    health: bool,

    /// Backend base URL (default: http://localhost:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Model to use (default: last selected, or 2.5 Flash)
    #[arg(short, long)]
    model: Option<String>,

    /// Directory for the conversation store
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

impl Args {
    fn is_one_shot(&self) -> bool {
        self.command.is_some() || self.youtube.is_some() || self.upload.is_some()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("notex=debug")
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let cfg = config::Config::load();

    // Merge config with CLI args (CLI takes precedence)
    let api_url = cfg.resolve_api_url(args.api_url.clone());
    let client = ApiClient::new(&api_url).with_context(|| format!("Bad API URL: {}", api_url))?;

    let storage = if args.ephemeral {
        Storage::in_memory()
    } else {
        let dir = args
            .data_dir
            .clone()
            .or(cfg.data_dir.clone())
            .unwrap_or_else(FileStore::default_dir);
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open data directory {}", dir.display()))?;
        tracing::debug!("Using store at {}", store.path().display());
        Storage::new(Arc::new(store))
    };

    let mut controller = InteractionController::new(storage, Arc::new(client));

    if let Some(model) = args.model.clone().or(cfg.model.clone()) {
        controller.select_model(&model)?;
    }

    let color = std::io::IsTerminal::is_terminal(&std::io::stdout());
    let palette = Palette::new(controller.theme(), color);

    if args.list {
        println!("{}", commands::list_text(&controller));
        return Ok(());
    }

    if args.health {
        return check_health(&controller).await;
    }

    if args.is_one_shot() {
        let ok = run_one_shot(&mut controller, &args, &palette).await;
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_interactive(&mut controller, color).await
}

async fn check_health(controller: &InteractionController) -> anyhow::Result<()> {
    let mut receiver = controller.subscribe();
    match controller.check_health().await {
        Some(payload) => {
            println!("API connected at {}", controller.api_base_url());
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        None => {
            render::drain(&mut receiver, &Palette::new(controller.theme(), false));
            std::process::exit(1);
        }
    }
}

/// Run a single chat or summary in a fresh conversation
async fn run_one_shot(
    controller: &mut InteractionController,
    args: &Args,
    palette: &Palette,
) -> bool {
    let mut receiver = controller.subscribe();

    let mut ok = true;
    if let Some(ref link) = args.youtube {
        let result = render::drive(controller.summarize_link(link), &mut receiver, palette).await;
        ok &= render::report(result);
    }
    if let Some(ref path) = args.upload {
        let result = render::drive(controller.upload_path(path), &mut receiver, palette).await;
        ok &= render::report(result);
    }
    if let Some(ref text) = args.command {
        let result = render::drive(controller.send_message(text), &mut receiver, palette).await;
        ok &= render::report(result);
    }
    ok
}

async fn run_interactive(controller: &mut InteractionController, color: bool) -> anyhow::Result<()> {
    use std::io::{self, Write};

    let mut receiver = controller.subscribe();
    let mut palette = Palette::new(controller.theme(), color);

    // Show minimal startup info (only if TTY)
    if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        eprintln!("notex ({}) api: {}", controller.model(), controller.api_base_url());
        eprintln!("Type /help for commands.");
        eprintln!();
    }

    controller.check_health().await;
    if controller.restore_last_conversation() {
        if let Some(conv) = controller.active_conversation() {
            eprintln!("Continuing \"{}\" ({} messages)", conv.title, conv.messages.len());
            eprintln!();
        }
    }
    render::drain(&mut receiver, &palette);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        println!();

        let Some(result) = commands::execute_command(input, controller) else {
            let result = render::drive(controller.send_message(input), &mut receiver, &palette).await;
            render::report(result);
            continue;
        };

        match result {
            commands::CommandResult::Exit => break,
            commands::CommandResult::Message(msg) => {
                println!("{}", msg);
            }
            commands::CommandResult::Unknown(cmd) => {
                println!("Unknown command: /{}", cmd);
                println!("Type /help for available commands.");
            }
            commands::CommandResult::NewChat => controller.new_chat(),
            commands::CommandResult::Open(id) => match controller.select_conversation(&id) {
                Ok(()) => {
                    render::drain(&mut receiver, &palette);
                    println!("{}", commands::history_text(controller));
                }
                Err(e) => println!("{}", e),
            },
            commands::CommandResult::Delete(id) => {
                if let Err(e) = controller.delete_conversation(&id) {
                    println!("{}", e);
                }
            }
            commands::CommandResult::Youtube(link) => {
                let result =
                    render::drive(controller.summarize_link(&link), &mut receiver, &palette).await;
                render::report(result);
            }
            commands::CommandResult::Upload(path) => {
                let result =
                    render::drive(controller.upload_path(&path), &mut receiver, &palette).await;
                render::report(result);
            }
            commands::CommandResult::ChangeModel(name) => match controller.select_model(&name) {
                Ok(()) => println!("Switched to: {}", controller.model()),
                Err(e) => println!("{}", e),
            },
            commands::CommandResult::ToggleTheme => match controller.toggle_theme() {
                Ok(theme) => {
                    palette = Palette::new(theme, color);
                    println!("Theme set to: {}", theme);
                }
                Err(e) => {
                    palette = Palette::new(controller.theme(), color);
                    println!("Theme changed but not saved: {}", e);
                }
            },
        }
        render::drain(&mut receiver, &palette);
        println!();
    }

    Ok(())
}
