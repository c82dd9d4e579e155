// dhclient - digital-human API client
// Main entry point

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::prelude::*;

use dhclient::api::{ApiEnvelope, CreateStreamTaskRequest, OutputMode};
use dhclient::config::{load_config, ClientConfig};
use dhclient::ApiClient;

#[derive(Parser, Debug)]
#[command(name = "dhclient")]
#[command(about = "Drive digital-human stream tasks from the command line", version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL (overrides config file and API_BASE_URL)
    #[arg(long = "base-url", global = true)]
    base_url: Option<String>,

    /// Log request/response details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch digital-human asset info
    Info {
        /// User to request a preload token for (defaults to config user_id)
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Issue an RTC room token
    Token {
        /// User the token is issued for (defaults to config user_id)
        #[arg(long)]
        user_id: Option<String>,
    },
    /// List running stream tasks
    Tasks {
        /// Print one line per task instead of the raw response
        #[arg(long)]
        summary: bool,
    },
    /// Create a stream task
    Create {
        /// User owning the task (defaults to config user_id)
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputModeArg::Web)]
        output_mode: OutputModeArg,
        /// Raw JSON body, sent instead of the generated one
        #[arg(long, conflicts_with_all = ["user_id", "output_mode"])]
        json: Option<String>,
    },
    /// Stop a stream task
    Stop { task_id: String },
    /// Query the status of a stream task
    Status { task_id: String },
    /// Drive the digital human with the server's default text
    DriveText { task_id: String },
    /// Drive the digital human with the server's default audio
    DriveAudio { task_id: String },
    /// Drive the digital human through streaming TTS
    DriveTts { task_id: String },
    /// Interrupt the current drive action
    Interrupt { task_id: String },
    /// Send a GET to an arbitrary endpoint
    Get {
        path: String,
        /// Query parameters as key=value
        params: Vec<String>,
    },
    /// Send a POST to an arbitrary endpoint
    Post {
        path: String,
        /// JSON body (defaults to {})
        body: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputModeArg {
    Web,
    Mobile,
}

impl From<OutputModeArg> for OutputMode {
    fn from(arg: OutputModeArg) -> Self {
        match arg {
            OutputModeArg::Web => OutputMode::Web,
            OutputModeArg::Mobile => OutputMode::Mobile,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    let config = resolve_config(args.base_url)?;
    let client = ApiClient::new(config).context("Failed to create API client")?;

    let response = run_command(&client, args.command).await?;
    println!("{}", response);

    Ok(())
}

fn resolve_config(base_url: Option<String>) -> Result<ClientConfig> {
    match base_url {
        Some(base_url) => {
            // Keep the configured user id if a config exists
            let user_id = load_config().ok().and_then(|c| c.user_id);
            Ok(ClientConfig {
                api_base_url: base_url,
                user_id,
            })
        }
        None => load_config(),
    }
}

async fn run_command(client: &ApiClient, command: Command) -> Result<String> {
    let value = match command {
        Command::Info { user_id } => {
            let user_id = user_id_or_default(client, user_id)?;
            client.digital_human().get_digital_human_info(&user_id).await?
        }
        Command::Token { user_id } => {
            let user_id = user_id_or_default(client, user_id)?;
            client.digital_human().zego_token(&user_id).await?
        }
        Command::Tasks { summary } => {
            let value = client.stream().query_stream_tasks().await?;
            if summary {
                return Ok(task_summary(&value));
            }
            value
        }
        Command::Create {
            user_id,
            output_mode,
            json,
        } => match json {
            Some(json) => {
                let body = parse_json_arg(&json)?;
                client.stream().create_stream_task(&body).await?
            }
            None => {
                let user_id = user_id_or_default(client, user_id)?;
                let request = CreateStreamTaskRequest::new(user_id).with_output_mode(output_mode.into());
                client.stream().create_stream_task(&request).await?
            }
        },
        Command::Stop { task_id } => client.stream().stop_stream_task(&task_id).await?,
        Command::Status { task_id } => client.stream().get_stream_task_status(&task_id).await?,
        Command::DriveText { task_id } => client.drive().drive_by_text(&task_id).await?,
        Command::DriveAudio { task_id } => client.drive().drive_by_audio(&task_id).await?,
        Command::DriveTts { task_id } => {
            client.drive().drive_by_ws_stream_with_tts(&task_id).await?
        }
        Command::Interrupt { task_id } => client.drive().interrupt_drive_task(&task_id).await?,
        Command::Get { path, params } => {
            let params = parse_params(&params)?;
            client.get(&path, &params).await?
        }
        Command::Post { path, body } => {
            let body = match body {
                Some(body) => parse_json_arg(&body)?,
                None => serde_json::json!({}),
            };
            client.post(&path, &body).await?
        }
    };

    serde_json::to_string_pretty(&value).context("Failed to format response")
}

fn user_id_or_default(client: &ApiClient, user_id: Option<String>) -> Result<String> {
    match user_id.or_else(|| client.config().user_id.clone()) {
        Some(user_id) if !user_id.is_empty() => Ok(user_id),
        _ => bail!("No user id given. Pass --user-id or set user_id in the config file"),
    }
}

fn parse_json_arg(json: &str) -> Result<Value> {
    serde_json::from_str(json).with_context(|| format!("Invalid JSON argument: {}", json))
}

fn parse_params(params: &[String]) -> Result<Vec<(String, String)>> {
    params
        .iter()
        .map(|param| match param.split_once('=') {
            Some((key, value)) => Ok((key.to_string(), value.to_string())),
            None => bail!("Query parameter must be key=value, got '{}'", param),
        })
        .collect()
}

fn task_summary(value: &Value) -> String {
    let envelope = ApiEnvelope::from_value(value);
    if !envelope.is_success() {
        return format!("error {}: {}", envelope.code, envelope.message);
    }

    let tasks = envelope.tasks();
    if tasks.is_empty() {
        return "no running tasks".to_string();
    }
    tasks
        .iter()
        .map(|t| format!("{}\troom={}\tstream={}", t.task_id, t.room_id, t.stream_id))
        .collect::<Vec<_>>()
        .join("\n")
}

fn init_tracing(verbose: bool) {
    // Default: WARN level so stdout stays clean; --verbose or RUST_LOG raise it
    let default_level = if verbose { "dhclient=debug,info" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}
