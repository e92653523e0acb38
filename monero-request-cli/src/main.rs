//! Create and read Monero payment requests from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Create a monthly request for 25.99 USD
//! monero-request create --wallet 4At3X5... --currency USD --amount 25.99 \
//!     --days-per-billing-cycle 30 --number-of-payments 12
//!
//! # Print the fields of a request as JSON
//! monero-request read 'monero-request:1:H4sIAAAA...'
//! ```
//!
//! # Environment Variables
//!
//! Read from the process environment or a `.env` file.
//!
//! - `MONERO_REQUEST_ALLOW_SUBADDRESS`: Accept subaddresses as the seller's wallet
//! - `MONERO_REQUEST_STRICT`: Fail instead of using `0` for unreadable counters
//! - `RUST_LOG`: Log level filter (default: `info`)

use clap::{Args, Parser, Subcommand};
use monero_request::{
    AddressPolicy, CodecConfig, CoercionPolicy, NewPaymentRequest, PaymentRequestCodec,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "monero-request", version, about = "Create and read Monero payment requests")]
struct Cli {
    /// Accept subaddresses (starting with 8) as the seller's wallet
    #[arg(long, global = true, env = "MONERO_REQUEST_ALLOW_SUBADDRESS")]
    allow_subaddress: bool,

    /// Fail instead of using 0 when a counter cannot be read
    #[arg(long, global = true, env = "MONERO_REQUEST_STRICT")]
    strict: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a new payment request and print it
    Create(CreateArgs),

    /// Decode a payment request and print its fields as JSON
    Read {
        /// The `monero-request:...` string
        request: String,

        /// Also check every field and fail if one is invalid
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Label shown to the payer
    #[arg(long, default_value = "Unlabeled Monero Payment Request")]
    label: String,

    /// Address receiving the funds
    #[arg(long)]
    wallet: String,

    /// Currency code (XMR or USD)
    #[arg(long, default_value = "XMR")]
    currency: String,

    /// Amount, using digits, ',' and '.' only
    #[arg(long)]
    amount: String,

    /// 16 lowercase hex characters; generated when omitted
    #[arg(long, default_value = "")]
    payment_id: String,

    /// yyyy-MM-ddTHH:mm:ss.SSSZ; now when omitted
    #[arg(long, default_value = "")]
    start_date: String,

    /// Days between payments
    #[arg(long, default_value_t = 0)]
    days_per_billing_cycle: i64,

    /// Number of payments
    #[arg(long, default_value_t = 1)]
    number_of_payments: i64,

    /// URL the payer can poll for changes
    #[arg(long, default_value = "")]
    change_indicator_url: String,
}

impl From<CreateArgs> for NewPaymentRequest {
    fn from(args: CreateArgs) -> Self {
        Self {
            custom_label: args.label,
            sellers_wallet: args.wallet,
            currency: args.currency,
            amount: args.amount,
            payment_id: args.payment_id,
            start_date: args.start_date,
            days_per_billing_cycle: args.days_per_billing_cycle,
            number_of_payments: args.number_of_payments,
            change_indicator_url: args.change_indicator_url,
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CodecConfig {
        address_policy: if cli.allow_subaddress {
            AddressPolicy::ALL
        } else {
            AddressPolicy::PRIMARY
        },
        coercion: if cli.strict {
            CoercionPolicy::Strict
        } else {
            CoercionPolicy::Lenient
        },
    };
    let codec = PaymentRequestCodec::new().with_config(config);

    match cli.cmd {
        Commands::Create(args) => {
            let encoded = codec.encode(&args.into())?;
            println!("{encoded}");
        }
        Commands::Read { request, validate } => {
            let decoded = codec.decode(request.trim())?;
            if validate {
                let checked = decoded.validate(config.address_policy)?;
                tracing::info!(payment_id = %checked.payment_id, "all fields valid");
            }
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
    }
    Ok(())
}
