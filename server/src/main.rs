use anyhow::Result;
use clap::Parser;
use jobmatch_core::corpus::index_from_csv;
use jobmatch_server::extract::PdfTextExtractor;
use jobmatch_server::{build_app, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Job postings CSV path
    #[arg(long, default_value = "./postings_clean.csv")]
    corpus: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Postings returned per match request
    #[arg(long, default_value_t = 5)]
    top_k: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // a corpus that fails to load still serves: requests get 503 until the
    // process restarts with a valid corpus
    let index = index_from_csv(&args.corpus);
    let state = AppState::new(index, Arc::new(PdfTextExtractor)).with_top_k(args.top_k);
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
