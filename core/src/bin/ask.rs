//! One-shot command-line client
//!
//! Usage: `ask [--agent <id>] <query...>`
//! Reads `BACKEND_BASE_URL`, loads the agents, sends the query, and prints the
//! answer followed by its sources.

use ai_search_core::api::HttpBackend;
use ai_search_core::{extract_citations, Config, QueryDispatcher, SessionState};
use anyhow::{anyhow, bail, Context};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut agent_id = None;
    let mut words = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--agent" {
            let value = args.next().ok_or_else(|| anyhow!("--agent needs a value"))?;
            agent_id = Some(
                value
                    .parse::<i64>()
                    .with_context(|| format!("invalid agent id: {}", value))?,
            );
        } else {
            words.push(arg);
        }
    }
    let query = words.join(" ");
    if query.trim().is_empty() {
        bail!("usage: ask [--agent <id>] <query...>");
    }

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);
    let dispatcher = QueryDispatcher::new(HttpBackend::new(config));
    let mut state = SessionState::new();

    if dispatcher.load_agents(&mut state).await == 0 {
        bail!("no agents available from the backend");
    }
    if let Some(id) = agent_id {
        if !state.select_agent(id) {
            let known: Vec<String> = state
                .agents()
                .iter()
                .map(|a| format!("{} ({})", a.id, a.name))
                .collect();
            bail!("unknown agent {}; available: {}", id, known.join(", "));
        }
    }
    if let Some(agent) = state.selected_agent() {
        info!(agent_id = agent.id, agent = %agent.name, "Using agent");
    }

    if !dispatcher.submit(&mut state, &query).await? {
        bail!("Error fetching response from backend chat bot server");
    }

    let answer = state
        .conversation()
        .last()
        .ok_or_else(|| anyhow!("conversation is empty"))?;
    println!("{}", answer.text);

    let citations = extract_citations(Some(answer.citations.as_slice()));
    if !citations.is_empty() {
        println!("\nCitations:");
        for citation in citations {
            println!("  - {}", citation.title);
        }
    }
    Ok(())
}
