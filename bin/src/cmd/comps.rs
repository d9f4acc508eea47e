//! Comps command implementation.

use crate::args::OutputFormat;
use crate::output::{banner, heading, print_frame, print_json};
use anyhow::Result;
use tasador::fmp::FmpClient;
use tasador::{CompsReport, ValuationRequest, compare, fetch_peer_data, fetch_peers, tables};

/// Peer multiples for `request.ticker` and the prices they imply.
pub(crate) async fn run(request: ValuationRequest, format: OutputFormat) -> Result<()> {
    let client = FmpClient::from_env()?;
    let ticker = request.symbol();

    let peers = fetch_peers(&client, &ticker, request.peers.as_deref()).await;
    let (subject, peer_data) = tokio::join!(
        client.company_data(&ticker, 1),
        fetch_peer_data(&client, &peers),
    );
    let subject = subject
        .map_err(|e| tracing::warn!(%ticker, error = %e, "subject data unavailable"))
        .ok();
    let report = compare(&ticker, subject.as_ref(), &peers, &peer_data)?;

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            banner("Comparable Companies");
            println!("Ticker:   {ticker}");
            println!("Peers:    {}", peers.join(", "));
            println!();
            render(&report)
        }
    }
}

pub(crate) fn render(report: &CompsReport) -> Result<()> {
    let comps = &report.comparables;
    print_frame("PEER MULTIPLES", tables::comparables_frame(comps))?;
    if !comps.skipped.is_empty() {
        println!("Skipped (no data): {}\n", comps.skipped.join(", "));
    }
    print_frame("PEER SUMMARY", tables::summary_frame(comps))?;
    if report.implied.is_empty() {
        heading("IMPLIED PRICES");
        println!("No multiple could be applied to the subject.\n");
        Ok(())
    } else {
        print_frame("IMPLIED PRICES", tables::implied_frame(&report.implied))
    }
}
