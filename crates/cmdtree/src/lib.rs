//! Recursive command-tree parsing, dispatch, and help rendering.
//!
//! A program declares its interface once, as a tree of [`Command`] nodes:
//! interior nodes group subcommands, leaf nodes carry positional
//! [`Argument`]s, presence-only [`Flag`]s, and an executor. [`resolve`]
//! walks that tree against a raw argument vector and yields a typed
//! [`ParseOutcome`]; [`Dispatcher`] turns the outcome into console output
//! and a process exit code. Help text is synthesized from the same tree.
//!
//! Subcommands are selected by literal prefix: `su` picks `sum` when no
//! other child name starts with `su`, and an ambiguous prefix fails with
//! the candidate names rather than guessing.

mod command;
mod help;
mod resolve;

pub use command::{Argument, Command, ExecutorFuture, Flag, ValueMap, HELP_FLAG};
pub use resolve::{resolve, Dispatcher, ExitCodes, ParseOutcome};
