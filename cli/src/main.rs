//! ballot — terminal front-end for the two-candidate voting client.
//!
//! Pure rendering over the view model: reads intents from stdin, forwards
//! provider notifications as they arrive, and prints the resulting state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use ballot_client::{ClientConfig, Phase, VotingViewModel};
use ballot_provider::{HttpProvider, ProviderEvent, WalletProvider};
use ballot_types::{CandidateId, ChainId, TxState};

#[derive(Parser)]
#[command(name = "ballot", about = "Cast and watch votes on a two-candidate ballot")]
struct Cli {
    /// JSON-RPC endpoint of the wallet-enabled node.
    #[arg(long, env = "BALLOT_RPC_URL")]
    rpc_url: Option<String>,

    /// Address of the deployed voting contract.
    #[arg(long, env = "BALLOT_CONTRACT")]
    contract: Option<Address>,

    /// Chain the contract is deployed on.
    #[arg(long, env = "BALLOT_CHAIN_ID")]
    chain_id: Option<u64>,

    /// Display name for candidate A.
    #[arg(long, env = "BALLOT_CANDIDATE_A")]
    candidate_a: Option<String>,

    /// Display name for candidate B.
    #[arg(long, env = "BALLOT_CANDIDATE_B")]
    candidate_b: Option<String>,

    /// Provider poll interval in milliseconds.
    #[arg(long, env = "BALLOT_POLL_INTERVAL_MS")]
    poll_interval_ms: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "BALLOT_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ballot_utils::init_tracing(&cli.log_level);

    let base = match cli.config.as_ref() {
        Some(path) => match ClientConfig::from_toml_file(&path.display().to_string()) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("Failed to read config file: {e}, using CLI defaults");
                ClientConfig::default()
            }
        },
        None => ClientConfig::default(),
    };

    let config = ClientConfig {
        rpc_url: cli.rpc_url.unwrap_or(base.rpc_url),
        contract_address: cli.contract.unwrap_or(base.contract_address),
        chain_id: cli.chain_id.map(ChainId::new).unwrap_or(base.chain_id),
        candidate_a: cli.candidate_a.unwrap_or(base.candidate_a),
        candidate_b: cli.candidate_b.unwrap_or(base.candidate_b),
        poll_interval_ms: cli.poll_interval_ms.unwrap_or(base.poll_interval_ms),
        log_level: cli.log_level,
    };

    let provider: Option<Arc<dyn WalletProvider>> = match HttpProvider::new(&config.rpc_url) {
        Ok(provider) => {
            let provider = Arc::new(provider);
            provider.start_poller(Duration::from_millis(config.poll_interval_ms));
            Some(provider as Arc<dyn WalletProvider>)
        }
        Err(e) => {
            tracing::warn!("wallet provider unavailable: {e}");
            None
        }
    };

    let mut vm = VotingViewModel::new(provider, &config);
    vm.on_startup().await;

    println!("ballot — contract {} on chain {}", config.contract_address, config.chain_id);
    print_help();
    render(&vm);

    let mut events = vm.events().ok();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = line.trim().to_lowercase();
                match command.as_str() {
                    "" => continue,
                    "quit" | "exit" | "q" => break,
                    "help" => {
                        print_help();
                        continue;
                    }
                    "connect" => vm.on_connect_intent().await,
                    "disconnect" => vm.on_disconnect_intent(),
                    "vote a" => vote(&mut vm, CandidateId::A).await,
                    "vote b" => vote(&mut vm, CandidateId::B).await,
                    "tally" | "status" => {}
                    other => {
                        println!("unknown command: {other} (try \"help\")");
                        continue;
                    }
                }
                render(&vm);
            }
            event = next_event(&mut events), if events.is_some() => {
                match event {
                    Some(ProviderEvent::AccountsChanged(accounts)) => {
                        vm.on_accounts_changed(accounts).await;
                        render(&vm);
                    }
                    Some(ProviderEvent::ChainChanged(chain)) => {
                        vm.on_chain_changed(chain).await;
                        render(&vm);
                    }
                    None => events = None,
                }
            }
        }
    }

    println!("bye");
    Ok(())
}

/// Receive the next provider notification, riding out lag.
async fn next_event(
    events: &mut Option<broadcast::Receiver<ProviderEvent>>,
) -> Option<ProviderEvent> {
    let Some(rx) = events.as_mut() else {
        return std::future::pending().await;
    };
    loop {
        match rx.recv().await {
            Ok(event) => return Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event receiver lagged; trusting the latest");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}

/// Refuse vote intents the view model would ignore, with the reason echoed.
async fn vote(vm: &mut VotingViewModel, candidate: CandidateId) {
    match vm.phase() {
        Phase::Voting => {
            println!("a vote is already in flight — wait for it to settle");
            return;
        }
        Phase::Idle | Phase::Connecting => {
            println!("connect a wallet before voting");
            return;
        }
        Phase::Connected => {}
    }
    println!("voting for candidate {candidate}...");
    vm.on_vote_intent(candidate).await;
}

fn render(vm: &VotingViewModel) {
    println!();
    match vm.account() {
        Some(account) => println!("connected: {}", account.short()),
        None if !vm.has_provider() => println!("no wallet provider — install or configure one"),
        None => println!("not connected"),
    }

    for candidate in vm.candidates() {
        println!("  {:<16} {} votes", candidate.display_name, candidate.vote_count);
    }

    match vm.tx_state() {
        TxState::Pending => println!("vote pending..."),
        TxState::Confirmed(receipt) => println!("last vote: {}", receipt.transaction_hash),
        TxState::Idle | TxState::Failed(_) => {}
    }

    if let Some(err) = vm.last_error() {
        println!("! {err}");
    }
}

fn print_help() {
    println!("commands: connect, disconnect, vote a, vote b, tally, status, help, quit");
}
