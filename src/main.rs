use clap::{Args, Parser, Subcommand};
use rsketch::logger::{self, LogLevel, LoggerConfig};
use rsketch::{log_error, log_info, log_warn};
use rsketch::{
    detect_theme_style, AppConfig, ArtStyle, BackendClient, EndpointConfigStore,
    ParameterPreset, ParametersInfo, PromptComposer, SketchJob, SubjectScope,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "rsketch",
    version,
    about = "Prompt and endpoint helper for the ControlNet sketch backend"
)]
struct Cli {
    /// Endpoint file (overrides RSKETCH_ENDPOINT_FILE)
    #[arg(long, global = true)]
    endpoint_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also append log lines to this file
    #[arg(long, global = true)]
    log_file: Option<String>,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the stored backend URL
    #[command(subcommand)]
    Endpoint(EndpointCommand),
    /// Print the composed positive and negative prompts
    Compose(PromptArgs),
    /// Print supported values and preset parameters as JSON
    Parameters,
    /// Check whether the configured backend answers on /test
    Probe,
    /// Send a sketch to the backend and save the generated image
    Generate(GenerateArgs),
}

#[derive(Subcommand)]
enum EndpointCommand {
    /// Validate and store a new base URL
    Set { url: String },
    /// Print the stored base URL
    Show,
    /// Report whether a usable URL is stored
    Validate,
    /// Ask the running backend for its tunnel URL and store it
    Detect,
}

#[derive(Args)]
struct PromptArgs {
    #[arg(long, default_value = "")]
    prompt: String,
    #[arg(long, default_value = "")]
    negative: String,
    /// face | full_body
    #[arg(long, default_value = "face")]
    scope: String,
    /// realistic | cartoon (guessed from --theme when omitted)
    #[arg(long)]
    style: Option<String>,
    /// Theme name used to guess the style
    #[arg(long)]
    theme: Option<String>,
}

impl PromptArgs {
    fn scope(&self) -> SubjectScope {
        SubjectScope::parse_lenient(&self.scope)
    }

    fn style(&self) -> ArtStyle {
        match (&self.style, &self.theme) {
            (Some(style), _) => ArtStyle::parse_lenient(style),
            (None, Some(theme)) => detect_theme_style(theme),
            (None, None) => ArtStyle::default(),
        }
    }
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    prompt: PromptArgs,
    /// Sketch image to send
    #[arg(long)]
    image: PathBuf,
    /// Where to write the generated PNG
    #[arg(long, default_value = "output.png")]
    output: PathBuf,
    /// default | balanced | creative
    #[arg(long, default_value = "default")]
    preset: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LoggerConfig::new()
        .with_level(LogLevel::from_verbosity(cli.verbose))
        .with_json_output(cli.json_logs);
    if let Some(path) = &cli.log_file {
        log_config = log_config.with_file_output(path);
    }
    if let Err(e) = logger::init_with_config(log_config) {
        eprintln!("{}", e);
    }

    match dotenv::dotenv() {
        Ok(path) => log::debug!("Loaded {}", path.display()),
        Err(_) => log::debug!("No .env file found, using process environment"),
    }
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log_error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = AppConfig::from_env();
    if let Some(path) = cli.endpoint_file {
        config = config.with_endpoint_file(path);
    }
    let store = EndpointConfigStore::from_config(&config);

    match cli.command {
        Command::Endpoint(EndpointCommand::Set { url }) => {
            store.set(&url)?;
            let endpoint = store.load()?;
            println!("{}", endpoint.base_url);
            logger::log_endpoint_info(&config, Some(&endpoint));
        }
        Command::Endpoint(EndpointCommand::Show) => {
            println!("{}", store.get()?);
        }
        Command::Endpoint(EndpointCommand::Validate) => {
            let report = store.validate();
            logger::log_endpoint_info(&config, store.load().ok().as_ref());
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.ok {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Endpoint(EndpointCommand::Detect) => {
            let client = BackendClient::new(store.load()?, &config)?;
            match client.refresh_endpoint(&store).await? {
                Some(url) => println!("{}", url),
                None => {
                    log_warn!("No usable tunnel URL reported; stored value unchanged");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Compose(args) => {
            let composed = PromptComposer::new().compose(
                &args.prompt,
                &args.negative,
                args.scope(),
                args.style(),
            );
            println!("{}", serde_json::to_string_pretty(&composed)?);
        }
        Command::Parameters => {
            println!("{}", serde_json::to_string_pretty(&ParametersInfo::current())?);
        }
        Command::Probe => {
            let endpoint = store.load()?;
            logger::log_endpoint_info(&config, Some(&endpoint));
            let client = BackendClient::new(endpoint, &config)?;
            let health = client.health_check().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if !health.reachable {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Generate(args) => {
            let preset: ParameterPreset = args.preset.parse()?;
            let image_bytes = std::fs::read(&args.image)?;
            let client = BackendClient::new(store.load()?, &config)?;

            let job = SketchJob::new(args.prompt.prompt.clone(), image_bytes)
                .with_negative_prompt(args.prompt.negative.clone())
                .with_subject_scope(args.prompt.scope())
                .with_art_style(args.prompt.style())
                .with_preset(preset);

            let _timer = logger::timer("generation");
            let response = client.generate(&job).await?;
            std::fs::write(&args.output, &response.image_bytes)?;
            log_info!(
                "Saved {} bytes to {} ({}ms)",
                response.image_bytes.len(),
                args.output.display(),
                response.elapsed_ms
            );
            println!("{}", args.output.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
