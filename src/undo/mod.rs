//! Undo substrate shared by every pile.
//!
//! ## Key Types
//!
//! - `UndoAction`: closed set of primitive inverse actions
//! - `UndoOp`: the allow-list of serialized operation names
//! - `Turn`: inverses recorded during one move, replayed LIFO
//! - `UndoLog`: stack of turns with portable and binary export
//! - `ActionRecord`: portable `{operation, args}` form

pub mod action;
pub mod stack;

pub use action::{ActionRecord, ArgValue, UndoAction, UndoOp};
pub use stack::{Turn, UndoLog};
