use reviewiq::analysis::{Analyzer, GeminiClient};
use reviewiq::app::{App, SubmissionForm, SubmitOutcome, View};
use reviewiq::cli::{Cli, Commands, ConfigAction, HistoryAction, ViewArgs};
use reviewiq::config::Config;
use reviewiq::error::{Result, ReviewIqError};
use reviewiq::filter::ReviewFilter;
use reviewiq::history::{HistoryLog, SqliteHistoryStore};
use reviewiq::render;
use reviewiq::reviews::{BusinessCategory, InputFormat, ReviewParser};
use reviewiq::storage;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            business,
            category,
            file,
            csv,
            view,
        } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_analyze(&config, business, category, file, csv, &view)?;
        }
        Commands::History { action } => {
            let config = load_config(cli.config, cli.profile)?;
            cmd_history(&config, action)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, cli.profile, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "reviewiq=debug" } else { "reviewiq=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_analyze(
    config: &Config,
    business: String,
    category: Option<BusinessCategory>,
    file: Option<PathBuf>,
    csv: Option<PathBuf>,
    view: &ViewArgs,
) -> Result<()> {
    let (raw, format) = match (file, csv) {
        (_, Some(path)) => (read_file(&path)?, InputFormat::Csv),
        (Some(path), None) => (read_file(&path)?, InputFormat::Text),
        (None, None) => (read_stdin()?, InputFormat::Text),
    };

    let category = match category {
        Some(c) => c,
        None => config
            .input
            .default_category
            .parse()
            .map_err(ReviewIqError::Config)?,
    };

    let form = SubmissionForm::new(raw, business)
        .with_category(category)
        .with_format(format);

    let mut app = App::new(open_history(config)?, ReviewParser::new(&config.input));

    if !app.can_submit(&form) {
        println!("{}", render::render_upload());
        return Ok(());
    }

    let client = GeminiClient::from_env(&config.llm).map_err(|e| {
        tracing::error!("Cannot build model client: {}", e);
        ReviewIqError::from(e)
    })?;
    let analyzer = Analyzer::new(Arc::new(client), &config.llm);

    let rt = tokio::runtime::Runtime::new().map_err(|e| ReviewIqError::Io {
        source: e,
        context: "Failed to create tokio runtime".to_string(),
    })?;

    eprintln!("Analyzing reviews...");
    // A failure is reported once by `main`
    match rt.block_on(app.submit(&analyzer, &form))? {
        SubmitOutcome::Completed(record) => {
            eprintln!("✓ Saved as {}", record.id);
            show(&mut app, view)
        }
        SubmitOutcome::Rejected(reason) => {
            println!("Nothing to analyze: {}", reason);
            Ok(())
        }
    }
}

fn cmd_history(config: &Config, action: HistoryAction) -> Result<()> {
    let history = open_history(config)?;

    match action {
        HistoryAction::List { json } => {
            let records = history.list()?;
            if json {
                let text = serde_json::to_string_pretty(&records).map_err(|e| ReviewIqError::Json {
                    source: e,
                    context: "Failed to serialize history".to_string(),
                })?;
                println!("{}", text);
            } else {
                println!("{}", render::render_history(&records));
            }
        }
        HistoryAction::Show { id, view } => {
            let mut app = App::new(history, ReviewParser::new(&config.input));
            app.open_history(&id)?;
            show(&mut app, &view)?;
        }
    }

    Ok(())
}

/// Switch to the requested view and print it
fn show(app: &mut App, args: &ViewArgs) -> Result<()> {
    app.navigate(args.view)?;

    let current = app.current();

    if args.json {
        if let Some(current) = current {
            let text =
                serde_json::to_string_pretty(&current.result).map_err(|e| ReviewIqError::Json {
                    source: e,
                    context: "Failed to serialize analysis".to_string(),
                })?;
            println!("{}", text);
            return Ok(());
        }
    }

    let output = match (app.view(), current) {
        (View::Dashboard, Some(c)) => render::render_dashboard(c),
        (View::Reviews, Some(c)) => {
            let filter = ReviewFilter::new(args.search.clone(), args.sentiment);
            render::render_reviews(c, &filter)
        }
        (View::Actions, Some(c)) => render::render_actions(&c.result.action_suggestions),
        (View::History, _) => render::render_history(&app.history().list()?),
        (View::Upload, _) => render::render_upload(),
        (view, None) => return Err(ReviewIqError::ViewUnavailable(view)),
    };

    println!("{}", output);
    Ok(())
}

fn open_history(config: &Config) -> Result<HistoryLog> {
    let data_dir = storage::expand_path(&config.storage.data_dir)?;
    let db = storage::open(&data_dir)?;
    let store = SqliteHistoryStore::new(db, config.storage.history_key.clone());
    Ok(HistoryLog::new(Arc::new(store)))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ReviewIqError::Io {
        source: e,
        context: format!("Failed to read reviews from {}", path.display()),
    })
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| ReviewIqError::Io {
            source: e,
            context: "Failed to read reviews from stdin".to_string(),
        })?;
    Ok(buf)
}

fn cmd_config(
    config_path: Option<PathBuf>,
    profile: Option<String>,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path, profile)?;
            let text = toml::to_string_pretty(&config)?;
            println!("{}", text);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(p) => p,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(p) => p,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ReviewIqError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn load_config(config_path: Option<PathBuf>, profile: Option<String>) -> Result<Config> {
    let path = match config_path {
        Some(p) => p,
        None => Config::default_path()?,
    };

    Config::load_or_default(&path, profile.as_deref())
}
