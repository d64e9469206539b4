//! Game implementations built on the pile and undo substrate.

pub mod klondike;

pub use klondike::{Klondike, KlondikeBuilder};
