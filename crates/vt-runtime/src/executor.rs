//! # Block Executor
//!
//! Applies batches of registry calls in order, one block at a time.
//!
//! ## Guarantees
//!
//! - Every transaction in a block sees the same block height.
//! - Each call commits or aborts on its own; a failing call never affects
//!   the calls around it.
//! - One receipt per transaction, in submission order.

use serde::{Deserialize, Serialize};
use shared_types::{Address, CallContext};
use std::path::Path;
use tracing::{debug, info, instrument};
use vt_product_registry::dispatch::{dispatch, CallReceipt, ContractCall};
use vt_product_registry::ports::EventSink;
use vt_product_registry::service::RegistryService;

/// A call together with its authenticated sender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Authenticated caller.
    pub caller: Address,
    /// The call.
    pub call: ContractCall,
}

impl Transaction {
    /// Create a transaction.
    pub fn new(caller: Address, call: ContractCall) -> Self {
        Self { caller, call }
    }
}

/// Receipts of one executed block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockReceipt {
    /// Height the block executed at.
    pub height: u64,
    /// One receipt per transaction, in order.
    pub receipts: Vec<CallReceipt>,
}

impl BlockReceipt {
    /// Number of failed calls in the block.
    pub fn failed(&self) -> usize {
        self.receipts.iter().filter(|r| !r.is_ok()).count()
    }
}

/// A replay script: a list of blocks, each a list of transactions.
pub type Script = Vec<Vec<Transaction>>;

/// Parse a JSON replay script.
pub fn parse_script(json: &str) -> Result<Script, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and parse a JSON replay script file.
pub fn load_script(path: &Path) -> anyhow::Result<Script> {
    use anyhow::Context;

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    parse_script(&raw).with_context(|| format!("failed to parse script {}", path.display()))
}

/// Drives a registry one block at a time.
pub struct BlockExecutor<E: EventSink> {
    registry: RegistryService<E>,
    next_height: u64,
}

impl<E: EventSink> BlockExecutor<E> {
    /// Create an executor whose first block runs at `start_height`.
    pub fn new(registry: RegistryService<E>, start_height: u64) -> Self {
        Self {
            registry,
            next_height: start_height,
        }
    }

    /// The registry being driven.
    pub fn registry(&self) -> &RegistryService<E> {
        &self.registry
    }

    /// Height the next block will execute at.
    pub fn next_height(&self) -> u64 {
        self.next_height
    }

    /// Execute one block.
    #[instrument(skip(self, transactions), fields(height = self.next_height, txs = transactions.len()))]
    pub fn execute_block(&mut self, transactions: &[Transaction]) -> BlockReceipt {
        let height = self.next_height;
        let receipts: Vec<CallReceipt> = transactions
            .iter()
            .map(|tx| {
                let ctx = CallContext::new(tx.caller, height);
                let receipt = dispatch(&self.registry, &ctx, &tx.call);
                debug!(
                    function = %receipt.function,
                    caller = %tx.caller,
                    code = ?receipt.error_code(),
                    "Transaction applied"
                );
                receipt
            })
            .collect();

        self.next_height = self.next_height.saturating_add(1);
        let block = BlockReceipt { height, receipts };
        info!(
            height,
            applied = block.receipts.len(),
            failed = block.failed(),
            "Block executed"
        );
        block
    }

    /// Execute every block of a script in order.
    pub fn run_script(&mut self, script: &[Vec<Transaction>]) -> Vec<BlockReceipt> {
        script.iter().map(|block| self.execute_block(block)).collect()
    }
}
