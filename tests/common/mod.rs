//! In-memory connector for exercising the client without a node
//!
//! Every read and submission is recorded so tests can assert exactly which
//! RPC calls an operation issued.

#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, B256, U256},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use tokio::sync::Barrier;
use oathstone::{
    errors::Result, registry::ContractBinding, types::SubmittedTx, ChainConnection, Connector,
    OathstoneError,
};

/// Anvil's first development account
pub const SENDER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const SENDER: Address = alloy::primitives::address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const RECIPIENT: &str = "0x000000000000000000000000000000000000dEaD";
pub const HOLDER: &str = "0x28C6c06298d514Db089934071355E5743bf21d60";

pub const CUSD: &str = "0x874069Fa1Eb16D44d622F2e0Ca25eeA172369bC1";
pub const CEUR: &str = "0x10c892A6EC43a53E45D0B916B4b7D383B1b78C0F";

/// A submission accepted by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct SentTx {
    pub network: String,
    pub from: Address,
    /// Recipient for value transfers, token contract for calls
    pub to: Address,
    pub value: U256,
    pub function: Option<String>,
    pub args: Vec<DynSolValue>,
}

#[derive(Debug, Default)]
pub struct MockState {
    /// `(network, rpc_url)` per connect attempt
    pub connects: Mutex<Vec<(String, String)>>,
    /// `(network, function)` per read
    pub reads: Mutex<Vec<(String, String)>>,
    /// Id of the connection that served each read, in `reads` order
    pub read_connections: Mutex<Vec<usize>>,
    pub submissions: Mutex<Vec<SentTx>>,

    pub unreachable: Mutex<HashSet<String>>,
    pub native_balances: Mutex<HashMap<Address, U256>>,
    /// keyed by (token contract, owner)
    pub token_balances: Mutex<HashMap<(Address, Address), U256>>,
    /// `None` makes `decimals()` fail
    pub onchain_decimals: Mutex<Option<u8>>,
    pub onchain_symbol: Mutex<Option<String>>,
    pub reject_submissions: AtomicBool,
    /// When set, `balanceOf` and `decimals` wait here before answering
    pub read_barrier: Mutex<Option<Arc<Barrier>>>,
}

impl MockState {
    pub fn reads_of(&self, function: &str) -> usize {
        self.reads
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, f)| f == function)
            .count()
    }

    pub fn connect_count(&self) -> usize {
        self.connects.lock().unwrap().len()
    }

    /// Connection id of the most recent read
    pub fn last_read_connection(&self) -> Option<usize> {
        self.read_connections.lock().unwrap().last().copied()
    }

    pub fn submissions(&self) -> Vec<SentTx> {
        self.submissions.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    pub state: Arc<MockState>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decimals(self, decimals: Option<u8>) -> Self {
        *self.state.onchain_decimals.lock().unwrap() = decimals;
        self
    }

    pub fn with_native_balance(self, owner: &str, wei: U256) -> Self {
        self.state
            .native_balances
            .lock()
            .unwrap()
            .insert(owner.parse().unwrap(), wei);
        self
    }

    pub fn with_token_balance(self, token: &str, owner: &str, raw: U256) -> Self {
        self.state
            .token_balances
            .lock()
            .unwrap()
            .insert((token.parse().unwrap(), owner.parse().unwrap()), raw);
        self
    }

    /// Makes `balanceOf` and `decimals` block until `parties` reads are in flight
    pub fn with_read_barrier(self, parties: usize) -> Self {
        *self.state.read_barrier.lock().unwrap() = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn unreachable(self, network: &str) -> Self {
        self.state.unreachable.lock().unwrap().insert(network.to_string());
        self
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Connection = MockConnection;

    async fn connect(&self, network: &str, rpc_url: &str) -> Result<MockConnection> {
        let id = {
            let mut connects = self.state.connects.lock().unwrap();
            connects.push((network.to_string(), rpc_url.to_string()));
            connects.len() - 1
        };
        if self.state.unreachable.lock().unwrap().contains(network) {
            return Err(OathstoneError::Transport {
                network: network.to_string(),
                operation: "eth_chainId".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(MockConnection {
            id,
            network: network.to_string(),
            state: self.state.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MockConnection {
    /// Index of the connect call that created this connection
    pub id: usize,
    network: String,
    state: Arc<MockState>,
}

impl MockConnection {
    fn record_read(&self, function: &str) {
        self.state
            .reads
            .lock()
            .unwrap()
            .push((self.network.clone(), function.to_string()));
        self.state.read_connections.lock().unwrap().push(self.id);
    }

    fn transport_error(&self, function: &str, reason: &str) -> OathstoneError {
        OathstoneError::Transport {
            network: self.network.clone(),
            operation: function.to_string(),
            reason: reason.to_string(),
        }
    }

    fn submit(&self, tx: SentTx) -> Result<SubmittedTx> {
        let mut submissions = self.state.submissions.lock().unwrap();
        submissions.push(tx);
        if self.state.reject_submissions.load(Ordering::SeqCst) {
            return Err(OathstoneError::Submission {
                network: self.network.clone(),
                reason: "insufficient funds for gas * price + value".to_string(),
            });
        }
        Ok(SubmittedTx {
            hash: B256::with_last_byte(submissions.len() as u8),
            status: Some(1),
        })
    }
}

#[async_trait]
impl ChainConnection for MockConnection {
    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.record_read("eth_getBalance");
        Ok(self
            .state
            .native_balances
            .lock()
            .unwrap()
            .get(&owner)
            .copied()
            .unwrap_or_default())
    }

    async fn call(
        &self,
        contract: &ContractBinding,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>> {
        self.record_read(function);
        if matches!(function, "balanceOf" | "decimals") {
            let barrier = self.state.read_barrier.lock().unwrap().clone();
            if let Some(barrier) = barrier {
                barrier.wait().await;
            }
        }
        match (function, args) {
            ("balanceOf", [DynSolValue::Address(owner)]) => {
                let balance = self
                    .state
                    .token_balances
                    .lock()
                    .unwrap()
                    .get(&(contract.address(), *owner))
                    .copied()
                    .unwrap_or_default();
                Ok(vec![DynSolValue::Uint(balance, 256)])
            }
            ("decimals", []) => match *self.state.onchain_decimals.lock().unwrap() {
                Some(decimals) => Ok(vec![DynSolValue::Uint(U256::from(decimals), 8)]),
                None => Err(self.transport_error(function, "execution reverted")),
            },
            ("symbol", []) => match self.state.onchain_symbol.lock().unwrap().clone() {
                Some(symbol) => Ok(vec![DynSolValue::String(symbol)]),
                None => Err(self.transport_error(function, "execution reverted")),
            },
            _ => Err(self.transport_error(function, "unsupported call")),
        }
    }

    async fn send_value(
        &self,
        signer: &PrivateKeySigner,
        to: Address,
        value: U256,
    ) -> Result<SubmittedTx> {
        self.submit(SentTx {
            network: self.network.clone(),
            from: signer.address(),
            to,
            value,
            function: None,
            args: Vec::new(),
        })
    }

    async fn send_call(
        &self,
        signer: &PrivateKeySigner,
        contract: &ContractBinding,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<SubmittedTx> {
        self.submit(SentTx {
            network: self.network.clone(),
            from: signer.address(),
            to: contract.address(),
            value: U256::ZERO,
            function: Some(function.to_string()),
            args: args.to_vec(),
        })
    }
}

/// One network on testnet with a cUSD token carrying an explicit decimals override
pub fn celo_config() -> String {
    format!(
        r#"{{
        "networks": {{
            "celo": {{
                "environment": 0,
                "rpcUrl": {{
                    "testnet": "https://alfajores-forno.celo-testnet.org",
                    "mainnet": "https://forno.celo.org"
                }},
                "tokens": {{
                    "cUSD": {{ "address": "{CUSD}", "decimals": 18 }}
                }}
            }}
        }}
    }}"#
    )
}

/// Two networks; `celo` tokens have no decimals override, one token has no address
pub fn multi_network_config() -> String {
    format!(
        r#"{{
        "networks": {{
            "celo": {{
                "environment": 0,
                "rpcUrl": {{ "testnet": "https://alfajores-forno.celo-testnet.org" }},
                "tokens": {{
                    "cUSD": {{ "contractAddress": "{CUSD}" }},
                    "cEUR": {{ "address": "{CEUR}", "symbol": "cEUR", "name": "Celo Euro" }},
                    "cREAL": {{ "decimals": 18 }}
                }}
            }},
            "polygon": {{
                "environment": 1,
                "rpcUrl": {{
                    "testnet": "https://rpc-amoy.polygon.technology",
                    "mainnet": "https://polygon-rpc.com"
                }},
                "tokens": {{
                    "USDC": {{ "address": "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359", "decimals": 6 }}
                }}
            }}
        }}
    }}"#
    )
}
