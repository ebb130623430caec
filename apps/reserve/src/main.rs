use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use booking_core::{HttpTransport, ReservationController, SubmissionOutcome, SystemClock};
use clap::{Args, Parser, Subcommand};
use shared::domain::FormValues;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::load_settings;
use terminal::TerminalForm;

#[derive(Parser, Debug)]
#[command(name = "reserve", about = "Book a table at the office café")]
struct Cli {
    #[arg(long, default_value = "reserve.toml")]
    config: PathBuf,
    /// Overrides the configured booking endpoint.
    #[arg(long)]
    endpoint_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the range of dates open for booking.
    Window,
    /// Print the payload that would be sent, without sending it.
    Preview(FormArgs),
    /// Validate and send one reservation.
    Submit(FormArgs),
}

#[derive(Args, Debug, Clone)]
struct FormArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    department: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Reservation date, YYYY-MM-DD.
    #[arg(long)]
    date: String,
    #[arg(long, default_value = "")]
    time: String,
    #[arg(long, default_value = "1")]
    guests: String,
    #[arg(long, default_value = "")]
    message: String,
}

impl From<FormArgs> for FormValues {
    fn from(args: FormArgs) -> Self {
        Self {
            name: args.name,
            department: args.department,
            email: args.email,
            phone: args.phone,
            date: args.date,
            time: args.time,
            guests: args.guests,
            message: args.message,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config)?;
    if let Some(url) = cli.endpoint_url {
        settings.endpoint_url = url;
    }
    let config = settings.controller_config()?;

    let values = match cli.command {
        Command::Window => FormValues::default(),
        Command::Preview(ref args) | Command::Submit(ref args) => args.clone().into(),
    };
    let form = TerminalForm::new(values);
    let bindings = terminal::bind(&form).context("failed to bind form elements")?;
    let mut controller = ReservationController::new(
        bindings,
        config,
        Arc::new(HttpTransport::new()),
        Arc::new(SystemClock),
    );
    let window = controller.initialize();

    match cli.command {
        Command::Window => {
            println!("bookable weekdays: {} through {}", window.min, window.max);
        }
        Command::Preview(_) => {
            let request = controller.preview();
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Command::Submit(_) => {
            match controller.handle_submit().await {
                SubmissionOutcome::Succeeded(receipt) => {
                    tracing::info!(?receipt, "reservation submitted");
                }
                SubmissionOutcome::Invalid(err) => bail!("reservation not sent: {err}"),
                SubmissionOutcome::Failed(err) if err.is_configuration() => bail!(
                    "reservation failed: {err}; set endpoint_url in {} or APP__ENDPOINT_URL",
                    cli.config.display()
                ),
                SubmissionOutcome::Failed(err) => bail!("reservation failed: {err}"),
            }
        }
    }

    Ok(())
}
