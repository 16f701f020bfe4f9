//! Whole-game orchestration and end-of-game reporting.

pub mod for_sale;
pub mod report;

pub use for_sale::{ForSaleGame, ForSaleGameBuilder};
pub use report::{winner, GameReport, PlayerReport};
