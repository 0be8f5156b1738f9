/// Endpoint surface, grouped by API domain.
///
/// Each submodule contributes one inherent `impl` block on
/// [`PublicClient`](crate::PublicClient) or
/// [`AuthenticatedClient`](crate::AuthenticatedClient). A method builds its
/// parameter set, names its signing instruction, and hands off to the
/// dispatcher; no endpoint carries transport logic of its own.
pub mod account;
pub mod borrow_lend;
pub mod capital;
pub mod history;
pub mod order;
pub mod public;
pub mod rfq;
pub mod strategy;

pub use capital::WithdrawalRequest;
pub use history::HistoryPage;
pub use order::OrderRequest;
pub use strategy::StrategyRequest;
