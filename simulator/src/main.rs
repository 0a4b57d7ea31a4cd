use anyhow::Context;
use chrono::Local;
use clap::Parser;
use generator::classifier::MockClassifier;
use log::info;
use scenario::config::ScenarioConfig;
use server::routes::routes;
use server::state::BackendState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod generator;
mod scenario;
mod server;

#[derive(Parser)]
#[command(author, version, about = "Mock classification backend for the dashboard")]
struct Args {
    /// Address to serve the REST API on
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
    /// Load a scenario config from YAML
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Override the scenario RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Override the number of records generated at startup
    #[arg(long)]
    history: Option<usize>,
    /// Override the classify-now failure probability
    #[arg(long)]
    failure_rate: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let bind = args.bind;

    let mut scenario = if let Some(path) = args.scenario {
        ScenarioConfig::load(path)?
    } else {
        ScenarioConfig::default()
    };
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    if let Some(history) = args.history {
        scenario.seed_records = history;
    }
    if let Some(rate) = args.failure_rate {
        scenario.failure_rate = rate;
    }
    scenario.validate().context("validating scenario")?;

    let classes = scenario.classes.join(", ");
    let state = Arc::new(RwLock::new(BackendState::new(
        MockClassifier::new(scenario),
        Local::now().naive_local(),
    )));

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating runtime for the mock backend")?;
    runtime.block_on(async move {
        let (addr, server) = warp::serve(routes(state))
            .try_bind_with_graceful_shutdown(bind, async {
                let _ = signal::ctrl_c().await;
            })
            .with_context(|| format!("binding {}", bind))?;
        info!("mock backend on http://{} (classes: {})", addr, classes);
        println!("Mock backend listening on http://{} (Ctrl+C to stop)", addr);
        server.await;
        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
