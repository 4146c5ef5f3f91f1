//! Game-state engine for single-player Minesweeper: board generation, reveal with flood-fill,
//! and win/loss detection. Front ends only read [`CellDisplay`] values and call
//! [`BoardEngine::reveal`].
#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod layout;
mod types;
