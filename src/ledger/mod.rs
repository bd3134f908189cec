//! Reserve ledger: batched balance mutations and an in-memory ledger.

mod batch;
mod memory;

pub use batch::{LedgerBatch, LedgerOp};
pub use memory::InMemoryLedger;
