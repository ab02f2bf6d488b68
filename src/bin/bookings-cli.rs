use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Parser)]
#[command(name = "bookings-cli")]
#[command(about = "Command-line client for the Booking System API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service info and the endpoint catalogue
    Info,
    /// List every booking, newest first
    List,
    /// Fetch one booking
    Get { id: String },
    /// Create a booking
    Create(BookingArgs),
    /// Replace every field of a booking
    Update {
        id: String,
        #[command(flatten)]
        booking: BookingArgs,
    },
    /// Delete a booking
    Delete { id: String },
}

#[derive(Args)]
struct BookingArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// YYYY-MM-DD
    #[arg(long)]
    date: String,
    /// HH:MM or HH:MM:SS
    #[arg(long)]
    time: String,
    #[arg(long)]
    phone_number: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    user_id: Option<String>,
}

impl BookingArgs {
    /// Unset optional flags are left out so the server applies its defaults.
    fn into_body(self) -> Value {
        let mut body = Map::new();
        body.insert("title".into(), Value::String(self.title));
        body.insert("description".into(), Value::String(self.description));
        body.insert("date".into(), Value::String(self.date));
        body.insert("time".into(), Value::String(self.time));
        body.insert("phone_number".into(), Value::String(self.phone_number));
        if let Some(email) = self.email {
            body.insert("email".into(), Value::String(email));
        }
        if let Some(user_id) = self.user_id {
            body.insert("user_id".into(), Value::String(user_id));
        }
        Value::Object(body)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/api", cli.url.trim_end_matches('/'));

    let request = match cli.command {
        Commands::Info => client.get(format!("{}/", base)),
        Commands::List => client.get(format!("{}/bookings", base)),
        Commands::Get { id } => client.get(format!("{}/bookings/{}", base, id)),
        Commands::Create(booking) => client
            .post(format!("{}/bookings", base))
            .json(&booking.into_body()),
        Commands::Update { id, booking } => client
            .put(format!("{}/bookings/{}", base, id))
            .json(&booking.into_body()),
        Commands::Delete { id } => client.delete(format!("{}/bookings/{}", base, id)),
    };

    let res = request.send().await?;
    if !print_response(res).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Pretty-print the body. Returns whether the status was a success.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        eprintln!("{}", rendered);
        return Ok(false);
    }

    println!("{}", rendered);
    Ok(true)
}
