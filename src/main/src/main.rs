// Copyright © holoclash 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::time::Duration;

use catalog::card_database::{CardDatabase, DEFAULT_MANIFEST_PATH};
use clap::Parser;
use color_eyre::Result;
use serde::Deserialize;
use server::connection;
use server::server_state::{ServerConfig, ServerState};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "holoclash game server")]
struct Args {
    /// Path to the card definitions manifest.
    #[arg(long)]
    cards_path: Option<String>,

    /// Address to listen on, e.g. 0.0.0.0:8000.
    #[arg(long)]
    listen_address: Option<String>,

    /// Seconds a disconnected player may reconnect before losing.
    #[arg(long)]
    disconnect_grace_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Settings {
    cards_path: String,
    listen_address: String,
    disconnect_grace_seconds: u64,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut builder = config::Config::builder()
        .set_default("cards_path", DEFAULT_MANIFEST_PATH)?
        .set_default("listen_address", "0.0.0.0:8000")?
        .set_default("disconnect_grace_seconds", 30i64)?
        .add_source(config::File::with_name("holoclash").required(false))
        .add_source(config::Environment::with_prefix("HOLOCLASH"));

    if let Some(cards_path) = &args.cards_path {
        builder = builder.set_override("cards_path", cards_path.as_str())?;
    }
    if let Some(listen_address) = &args.listen_address {
        builder = builder.set_override("listen_address", listen_address.as_str())?;
    }
    if let Some(grace) = args.disconnect_grace_seconds {
        builder = builder.set_override("disconnect_grace_seconds", grace as i64)?;
    }

    Ok(builder.build()?.try_deserialize()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .init();

    let args = Args::parse();
    let settings = load_settings(&args)?;

    let card_database = CardDatabase::load(&settings.cards_path)?;
    let state = Arc::new(ServerState::new(card_database, ServerConfig {
        disconnect_grace: Duration::from_secs(settings.disconnect_grace_seconds),
    }));

    let listener = tokio::net::TcpListener::bind(&settings.listen_address).await?;
    info!(address = %settings.listen_address, "holoclash server listening");
    axum::serve(listener, connection::router(state)).await?;
    Ok(())
}
