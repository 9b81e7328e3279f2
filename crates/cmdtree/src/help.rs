//! Help-text rendering.
//!
//! Pure functions of a [`Command`] and its ancestor chain; no wrapping,
//! truncation, or coloring.

use crate::command::Command;

impl Command {
    /// This node's usage signature: name, ` [options]` when any flags
    /// exist, each argument name in order, then the literal word `command`
    /// when children exist.
    pub fn usage(&self) -> String {
        let mut usage = self.name().to_string();
        if !self.flags().is_empty() {
            usage.push_str(" [options]");
        }
        for argument in self.arguments() {
            usage.push(' ');
            usage.push_str(argument.name());
        }
        if !self.children().is_empty() {
            usage.push_str(" command");
        }
        usage
    }

    /// Render the full help text for this node.
    ///
    /// Sections, each included only when non-empty and separated by a
    /// blank line: `Description`, `Usage` (ancestor names oldest first,
    /// then this node's usage signature), `Arguments`, `Options`, and
    /// `Commands`. Definition names are padded to the widest name in
    /// their own list.
    pub fn help(&self) -> String {
        let mut breadcrumb = Vec::new();
        let mut ancestor = self.parent();
        while let Some(node) = ancestor {
            breadcrumb.push(node.name().to_string());
            ancestor = node.parent();
        }
        breadcrumb.reverse();
        breadcrumb.push(self.usage());
        let usage_line = breadcrumb.join(" ");

        let description = if self.description().is_empty() {
            Vec::new()
        } else {
            vec![self.description().to_string()]
        };
        let arguments = format_definitions(
            self.arguments()
                .iter()
                .map(|a| (a.name().to_string(), a.description().to_string())),
        );
        let options = format_definitions(self.flags().iter().map(|f| {
            let names: Vec<&str> = f.names().collect();
            (names.join(", "), f.description().to_string())
        }));
        let commands = format_definitions(
            self.children()
                .iter()
                .map(|c| (c.usage(), c.description().to_string())),
        );

        [
            format_section("Description", &description),
            format_section("Usage", &[usage_line]),
            format_section("Arguments", &arguments),
            format_section("Options", &options),
            format_section("Commands", &commands),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n\n")
    }
}

fn format_section(title: &str, lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let body: Vec<String> = lines.iter().map(|line| format!("  {line}")).collect();
    Some(format!("{title}:\n{}", body.join("\n")))
}

/// Name/description rows with names padded to the widest in the list.
fn format_definitions(rows: impl Iterator<Item = (String, String)>) -> Vec<String> {
    let rows: Vec<(String, String)> = rows.collect();
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(name, description)| format!("{name:<width$}  {description}"))
        .collect()
}
