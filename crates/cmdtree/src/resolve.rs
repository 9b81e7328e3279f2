use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{Command, ValueMap, HELP_FLAG};

/// Process exit codes reported for each parse failure kind.
///
/// Threaded explicitly into [`resolve`] and [`Dispatcher`] rather than held
/// in mutable statics, so resolution stays a pure function of its inputs.
/// Serde support lets hosts override individual codes from a JSON config
/// file; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExitCodes {
    pub invalid_arguments: i32,
    pub command_not_provided: i32,
    pub unknown_command: i32,
    pub ambiguous_command: i32,
}

impl Default for ExitCodes {
    fn default() -> Self {
        Self {
            invalid_arguments: 1,
            command_not_provided: 2,
            unknown_command: 3,
            ambiguous_command: 4,
        }
    }
}

/// Result of resolving a token sequence against a command tree.
///
/// `Success` carries the matched node together with the flags and
/// positional arguments collected along the way, both in consumption
/// order. `Failure` names the node the failure occurred at so its help
/// text can be rendered next to the message.
#[derive(Debug)]
pub enum ParseOutcome {
    Success {
        command: Rc<Command>,
        options: ValueMap,
        arguments: ValueMap,
    },
    Failure {
        command: Rc<Command>,
        message: String,
        code: i32,
    },
}

/// Resolve `tokens` against `node`, descending into at most one child per
/// level.
///
/// Single pass, no backtracking. Leading tokens that exactly match one of
/// the node's flags are collected first; the first token that matches no
/// flag ends that phase for good, so an option-looking token appearing
/// after a positional is consumed as a positional. Remaining tokens bind
/// to declared arguments in order. A collected `--help` short-circuits all
/// further validation. Interior nodes then treat the next remaining token
/// as a subcommand selector, matched as a literal case-sensitive prefix of
/// the child names: no match, more than one match, and no token at all are
/// each a distinct failure.
///
/// Performs no I/O; turning the outcome into output is [`Dispatcher`]'s job.
pub fn resolve(node: &Rc<Command>, tokens: &[String], codes: &ExitCodes) -> ParseOutcome {
    let mut options = ValueMap::new();
    let mut arguments = ValueMap::new();
    let mut rest = tokens;

    while let Some((token, tail)) = rest.split_first() {
        let Some(flag) = node.flags().iter().find(|f| f.matches(token)) else {
            break;
        };
        options.insert(flag.name().to_string(), token.clone());
        rest = tail;
    }

    for argument in node.arguments() {
        let Some((token, tail)) = rest.split_first() else {
            break;
        };
        arguments.insert(argument.name().to_string(), token.clone());
        rest = tail;
    }

    if options.contains_key(HELP_FLAG) {
        return ParseOutcome::Success {
            command: Rc::clone(node),
            options,
            arguments,
        };
    }

    if arguments.len() != node.arguments().len() {
        return ParseOutcome::Failure {
            command: Rc::clone(node),
            message: "Invalid number of arguments.".to_string(),
            code: codes.invalid_arguments,
        };
    }

    if node.children().is_empty() {
        return ParseOutcome::Success {
            command: Rc::clone(node),
            options,
            arguments,
        };
    }

    let Some((selector, tail)) = rest.split_first() else {
        return ParseOutcome::Failure {
            command: Rc::clone(node),
            message: "Required command was not provided.".to_string(),
            code: codes.command_not_provided,
        };
    };

    let matching: Vec<&Rc<Command>> = node
        .children()
        .iter()
        .filter(|child| child.name().starts_with(selector.as_str()))
        .collect();

    match matching.as_slice() {
        [] => ParseOutcome::Failure {
            command: Rc::clone(node),
            message: "Unrecognized command".to_string(),
            code: codes.unknown_command,
        },
        [child] => {
            debug!(parent = node.name(), child = child.name(), "descending into subcommand");
            resolve(*child, tail, codes)
        }
        _ => {
            let mut names: Vec<&str> = matching.iter().map(|c| c.name()).collect();
            names.sort_unstable();
            ParseOutcome::Failure {
                command: Rc::clone(node),
                message: format!("Ambiguous command, could be one of: {}", names.join(", ")),
                code: codes.ambiguous_command,
            }
        }
    }
}

/// Turns a [`ParseOutcome`] into console output and a process exit code.
pub struct Dispatcher {
    codes: ExitCodes,
}

impl Dispatcher {
    pub fn new(codes: ExitCodes) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &ExitCodes {
        &self.codes
    }

    /// Resolve `tokens` against `root` and act on the outcome.
    ///
    /// A successful help request prints the matched command's help and
    /// returns 0 without invoking any executor. Any other success awaits
    /// the leaf's executor and returns its code. A failure prints the
    /// message followed by the failing command's help and returns the
    /// configured code.
    pub async fn dispatch(&self, root: &Rc<Command>, tokens: &[String]) -> i32 {
        match resolve(root, tokens, &self.codes) {
            ParseOutcome::Success {
                command,
                options,
                arguments,
            } => {
                if options.contains_key(HELP_FLAG) {
                    println!("{}", command.help());
                    return 0;
                }
                command.invoke(&options, &arguments).await
            }
            ParseOutcome::Failure {
                command,
                message,
                code,
            } => {
                debug!(code, command = command.name(), "command resolution failed");
                command.print_error_and_help(&message);
                code
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ExitCodes::default())
    }
}
