use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use client_core::{HttpRecommendationBackend, SearchSession, SearchState, ViewController};
use shared::domain::{Page, SearchType};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://localhost:8000")]
    server_url: String,
    /// Field the query is matched against.
    #[arg(long, value_enum, default_value_t = SearchTypeArg::Book)]
    search_type: SearchTypeArg,
    /// Optional per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    query: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SearchTypeArg {
    Book,
    Author,
    Genre,
}

impl From<SearchTypeArg> for SearchType {
    fn from(value: SearchTypeArg) -> Self {
        match value {
            SearchTypeArg::Book => SearchType::Title,
            SearchTypeArg::Author => SearchType::Author,
            SearchTypeArg::Genre => SearchType::Genre,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let view = ViewController::new();
    view.navigate(Page::Recommend).await;

    let mut backend = HttpRecommendationBackend::new(args.server_url);
    if let Some(secs) = args.timeout_secs {
        backend = backend.with_timeout(Duration::from_secs(secs));
    }
    let session = SearchSession::new(Arc::new(backend));
    let mut states = session.subscribe();

    session.set_search_type(args.search_type.into()).await;
    session.set_query(args.query).await;
    session.submit().await;

    loop {
        match states.recv().await? {
            SearchState::Success(result) => {
                println!("Results for '{}'", result.input_book);
                for (index, item) in result.recommendations.iter().enumerate() {
                    println!("{}. {} ({:.4})", index + 1, item.title, item.distance);
                }
                return Ok(());
            }
            SearchState::Failed(message) => return Err(anyhow!(message)),
            SearchState::Idle | SearchState::Validating | SearchState::Loading => {}
        }
    }
}
