//! Tasador CLI binary.
//!
//! Provides a command-line interface for the Tasador valuation toolkit.

mod args;
mod cmd;
mod output;

use anyhow::Result;
use args::{OptionKindArg, OutputFormat, RequestArgs};
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasador")]
#[command(about = "Statement-driven DCF, LBO and comparables valuation", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full valuation: forecast, WACC, DCF, LBO and comparables
    Report {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Forecast the statements and build free cash flows
    Forecast {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Compute the discount rate
    Wacc {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Discount a free cash flow series (offline)
    Dcf {
        /// Free cash flows for years 1..=N
        #[arg(long, value_delimiter = ',', conflicts_with = "last_fcf")]
        fcf: Vec<f64>,

        /// Last reported FCF, grown at --fcf-growth
        #[arg(long)]
        last_fcf: Option<f64>,

        /// FCF growth for --last-fcf
        #[arg(long, default_value = "0.0")]
        fcf_growth: f64,

        /// Years to project from --last-fcf
        #[arg(long, default_value = "5")]
        years: usize,

        /// Discount rate
        #[arg(long)]
        wacc: f64,

        /// Perpetual growth after the last year
        #[arg(short = 'g', long, default_value = "0.025")]
        terminal_growth: f64,

        /// Total debt, for the equity bridge
        #[arg(long, requires = "shares")]
        debt: Option<f64>,

        /// Cash, for the equity bridge
        #[arg(long, default_value = "0.0")]
        cash: f64,

        /// Shares outstanding, for the equity bridge
        #[arg(long)]
        shares: Option<f64>,
    },

    /// Leveraged buyout returns (offline)
    Lbo {
        /// Purchase price
        #[arg(long)]
        price: f64,

        /// Entry EBITDA
        #[arg(long, conflicts_with_all = ["revenue", "margin"])]
        ebitda: Option<f64>,

        /// Entry revenue, used with --margin
        #[arg(long, requires = "margin")]
        revenue: Option<f64>,

        /// EBITDA margin on --revenue
        #[arg(long, requires = "revenue")]
        margin: Option<f64>,

        /// Share of the price funded with debt
        #[arg(long, default_value = "0.6")]
        debt_fraction: f64,

        /// Interest rate on the debt
        #[arg(long, default_value = "0.08")]
        interest_rate: f64,

        /// Exit EV/EBITDA multiple
        #[arg(long, default_value = "8.0")]
        exit_multiple: f64,

        /// Annual EBITDA growth
        #[arg(long, default_value = "0.0")]
        growth: f64,

        /// Holding period in years
        #[arg(long, default_value = "5")]
        years: usize,

        /// Yearly debt paydown, starting with year 1
        #[arg(long, value_delimiter = ',')]
        paydown: Vec<f64>,
    },

    /// Peer multiples and implied prices
    Comps {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Black-Scholes price and Greeks
    Option {
        /// Call or put
        #[arg(long, value_enum, default_value_t = OptionKindArg::Call)]
        kind: OptionKindArg,

        /// Strike price
        #[arg(long)]
        strike: f64,

        /// Spot price (fetched from --ticker when omitted)
        #[arg(long)]
        spot: Option<f64>,

        /// Time to expiry in days
        #[arg(long, default_value = "30")]
        days: u32,

        /// Risk-free rate
        #[arg(long, default_value = "0.04")]
        rate: f64,

        /// Volatility (estimated from --ticker closes when omitted)
        #[arg(long)]
        vol: Option<f64>,

        /// Ticker for spot price and historical volatility
        #[arg(long)]
        ticker: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;

    match cli.command {
        Commands::Report { request } => cmd::report::run(request.into_request()?, format).await?,
        Commands::Forecast { request } => {
            cmd::forecast::run(request.into_request()?, format).await?;
        }
        Commands::Wacc { request } => cmd::wacc::run(request.into_request()?, format).await?,
        Commands::Dcf {
            fcf,
            last_fcf,
            fcf_growth,
            years,
            wacc,
            terminal_growth,
            debt,
            cash,
            shares,
        } => {
            let source = match last_fcf {
                Some(last) => cmd::dcf::FcfSource::Simple {
                    last,
                    growth: fcf_growth,
                    years,
                },
                None => cmd::dcf::FcfSource::Explicit(fcf),
            };
            let bridge = shares.map(|shares| cmd::dcf::BridgeInputs {
                debt: debt.unwrap_or(0.0),
                cash,
                shares,
            });
            cmd::dcf::run(&source, wacc, terminal_growth, bridge, format)?;
        }
        Commands::Lbo {
            price,
            ebitda,
            revenue,
            margin,
            debt_fraction,
            interest_rate,
            exit_multiple,
            growth,
            years,
            paydown,
        } => {
            let inputs = cmd::lbo::inputs(price, ebitda, revenue.zip(margin))?
                .with_debt_fraction(debt_fraction)
                .with_interest_rate(interest_rate)
                .with_exit_multiple(exit_multiple)
                .with_ebitda_growth(growth)
                .with_horizon(years)
                .with_paydown(paydown);
            cmd::lbo::run(&inputs, format)?;
        }
        Commands::Comps { request } => cmd::comps::run(request.into_request()?, format).await?,
        Commands::Option {
            kind,
            strike,
            spot,
            days,
            rate,
            vol,
            ticker,
        } => {
            let params = cmd::option::OptionParams {
                kind: kind.into(),
                strike,
                spot,
                years: f64::from(days) / 365.0,
                rate,
                vol,
            };
            cmd::option::run(params, ticker.as_deref(), format).await?;
        }
    }

    Ok(())
}
