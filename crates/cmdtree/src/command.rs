use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use futures_util::future::LocalBoxFuture;
use indexmap::IndexMap;

/// Canonical name of the implicit help flag every command carries.
pub const HELP_FLAG: &str = "--help";

/// Ordered map from a canonical name to the literal token bound to it.
///
/// Used both for matched flags (canonical flag name -> the token that
/// matched, which may be an alias) and for positional arguments (declared
/// name -> the token consumed for it). Insertion order is the order the
/// tokens were consumed in, which for arguments equals declaration order.
pub type ValueMap = IndexMap<String, String>;

/// Future returned by a command executor; resolves to the exit code.
pub type ExecutorFuture<'a> = LocalBoxFuture<'a, i32>;

type Executor = Box<dyn for<'a> Fn(&'a Command, &'a ValueMap, &'a ValueMap) -> ExecutorFuture<'a>>;

/// One required positional slot on a command.
///
/// Declaration order in the command's argument list defines binding order.
#[derive(Debug, Clone)]
pub struct Argument {
    name: String,
    description: String,
}

impl Argument {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A presence-only flag with a canonical name and any number of aliases.
///
/// Flags carry no value; matching is exact string equality against the
/// name or an alias, never a prefix or case-folded comparison.
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    description: String,
    aliases: Vec<String>,
}

impl Flag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            aliases: Vec::new(),
        }
    }

    /// Add an alias token that refers to the same flag.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Canonical name followed by the aliases, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn matches(&self, token: &str) -> bool {
        token == self.name || self.aliases.iter().any(|a| a == token)
    }
}

fn help_flag() -> Flag {
    Flag::new(HELP_FLAG, "Shows help").alias("-h").alias("-?")
}

fn noop_executor() -> Executor {
    Box::new(|_, _, _| Box::pin(async { 0 }))
}

/// One node in the declarative command tree.
///
/// Interior nodes group child commands; leaves bind arguments, flags, and
/// an executor. Nodes are built once and never mutated afterwards, apart
/// from the one-time parent wiring performed by the parent's constructor.
/// The parent edge is a [`Weak`] reference used only for the help
/// breadcrumb; ownership flows strictly root-to-leaf through `children`.
pub struct Command {
    name: String,
    description: String,
    arguments: Vec<Argument>,
    flags: Vec<Flag>,
    children: Vec<Rc<Command>>,
    executor: Executor,
    parent: RefCell<Weak<Command>>,
}

impl Command {
    fn build(
        name: impl Into<String>,
        description: impl Into<String>,
        arguments: Vec<Argument>,
        flags: Vec<Flag>,
        children: Vec<Rc<Command>>,
        executor: Executor,
    ) -> Rc<Self> {
        let mut flags = flags;
        // Appended last so an explicitly declared --help wins the match.
        flags.push(help_flag());

        let node = Rc::new(Self {
            name: name.into(),
            description: description.into(),
            arguments,
            flags,
            children,
            executor,
            parent: RefCell::new(Weak::new()),
        });

        for child in &node.children {
            *child.parent.borrow_mut() = Rc::downgrade(&node);
        }

        node
    }

    /// An interior node: no arguments or executor of its own, dispatch
    /// continues into one of `children`.
    pub fn group(
        name: impl Into<String>,
        description: impl Into<String>,
        children: Vec<Rc<Command>>,
    ) -> Rc<Self> {
        Self::build(
            name,
            description,
            Vec::new(),
            Vec::new(),
            children,
            noop_executor(),
        )
    }

    /// A leaf node with a synchronous executor.
    pub fn leaf(
        name: impl Into<String>,
        description: impl Into<String>,
        arguments: Vec<Argument>,
        flags: Vec<Flag>,
        run: impl Fn(&Command, &ValueMap, &ValueMap) -> i32 + 'static,
    ) -> Rc<Self> {
        Self::build(
            name,
            description,
            arguments,
            flags,
            Vec::new(),
            Box::new(move |command, options, arguments| {
                let code = run(command, options, arguments);
                Box::pin(async move { code })
            }),
        )
    }

    /// A leaf node with an asynchronous executor.
    pub fn leaf_async(
        name: impl Into<String>,
        description: impl Into<String>,
        arguments: Vec<Argument>,
        flags: Vec<Flag>,
        run: impl for<'a> Fn(&'a Command, &'a ValueMap, &'a ValueMap) -> ExecutorFuture<'a> + 'static,
    ) -> Rc<Self> {
        Self::build(name, description, arguments, flags, Vec::new(), Box::new(run))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Declared flags followed by the implicit help flag.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn children(&self) -> &[Rc<Command>] {
        &self.children
    }

    /// The parent node, if this node was wired into a tree and the tree
    /// root is still alive.
    pub fn parent(&self) -> Option<Rc<Command>> {
        self.parent.borrow().upgrade()
    }

    pub(crate) fn invoke<'a>(
        &'a self,
        options: &'a ValueMap,
        arguments: &'a ValueMap,
    ) -> ExecutorFuture<'a> {
        (self.executor)(self, options, arguments)
    }

    /// Print an error message followed by this command's help text.
    ///
    /// Intended for executors reporting their own validation failures.
    pub fn print_error_and_help(&self, message: &str) {
        println!("{message}");
        println!("{}", self.help());
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("flags", &self.flags)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
