//! Host-independent round engine.
//!
//! Every function here takes the rows it touches plus the action's time
//! snapshot (`now`, unix seconds) and either mutates them completely or
//! returns an error. Instruction handlers and the in-memory [`tables`]
//! executor are thin drivers around these functions.

pub mod commitment;
pub mod entropy;
pub mod phase;
pub mod registry;
pub mod scoring;
pub mod settlement;
pub mod tables;

pub use phase::Phase;
pub use settlement::{FlatRateMarket, ResourceMarket};
pub use tables::Tables;
