#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod common;
mod config;
mod fleet;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod placement;
pub mod prelude;
mod shape;
mod targeting;
#[cfg(feature = "std")]
mod ui;

pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::*;
pub use shape::*;
pub use targeting::*;
#[cfg(feature = "std")]
pub use ui::*;
