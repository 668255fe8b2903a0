//! `evm run <fixture.json>` — loads a JSON test fixture, executes it
//! through `evm_core::Evm`, and prints the resulting stack and return
//! envelope. The test-harness/fixture-loading concern the core spec treats
//! as an external collaborator; this binary is that collaborator, in the
//! style of `thesems-evm-rusty`'s `src/bin/node.rs` and
//! `abbychau-abbyEVM`'s `src/main.rs`.

use std::collections::HashMap;
use std::path::PathBuf;

use alloy::primitives::{Bytes, U256};
use clap::{Parser, Subcommand};
use primitives::context::{BlockEnv, Transaction};
use primitives::errors::{EvmError, Result};
use primitives::hexutil::{decode_address, deserialize_bytes, deserialize_word};
use primitives::world::{Account, WorldState};
use serde::Deserialize;
use serde_json::json;

use evm_core::Evm;

#[derive(Parser)]
#[command(name = "evm", about = "Single-contract EVM bytecode interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a JSON test fixture and print the resulting stack and return envelope.
    Run {
        fixture: PathBuf,
        /// Trace every dispatched opcode to stderr.
        #[arg(long)]
        verbose: bool,
    },
}

#[derive(Debug, Deserialize)]
struct FixtureAccount {
    #[serde(default, deserialize_with = "deserialize_word")]
    balance: U256,
    #[serde(default, deserialize_with = "deserialize_bytes")]
    code: Bytes,
    #[serde(default, deserialize_with = "deserialize_word")]
    nonce: U256,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(deserialize_with = "deserialize_bytes")]
    code: Bytes,
    tx: Transaction,
    block: BlockEnv,
    #[serde(default)]
    state: HashMap<String, FixtureAccount>,
}

fn load_world(state: HashMap<String, FixtureAccount>) -> Result<WorldState> {
    let mut accounts = HashMap::new();
    for (address, account) in state {
        let address = decode_address(&address)?;
        accounts.insert(address, Account::new(account.balance, account.code, account.nonce));
    }
    Ok(WorldState::init(accounts))
}

fn run_fixture(path: &PathBuf) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let fixture: Fixture = serde_json::from_str(&raw)?;
    let world = load_world(fixture.state)?;

    let mut evm = Evm::top_level(fixture.code, fixture.tx, fixture.block, world);
    let outcome = evm.run()?;

    let stack: Vec<String> = outcome.stack.iter().map(|w| format!("0x{w:x}")).collect();
    let output = json!({
        "stack": stack,
        "success": outcome.envelope.success,
        "return": outcome.envelope.return_data.map(|b| format!("0x{}", hex::encode(b))),
    });
    println!("{}", serde_json::to_string_pretty(&output).map_err(EvmError::from)?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Command::Run { fixture, verbose } => {
            let level = if *verbose { log::LevelFilter::Trace } else { log::LevelFilter::Info };
            env_logger::Builder::new().filter_level(level).init();

            if let Err(err) = run_fixture(fixture) {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    #[test]
    fn load_world_decodes_hex_keyed_accounts() {
        let mut state = HashMap::new();
        state.insert(
            "0x0000000000000000000000000000000000000001".to_string(),
            FixtureAccount { balance: U256::from(42), code: Bytes::new(), nonce: U256::ZERO },
        );
        let world = load_world(state).unwrap();
        assert_eq!(world.balance(Address::with_last_byte(1)), U256::from(42));
    }
}
