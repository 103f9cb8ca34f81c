use crate::generator::GeneratorOptions;
use crate::WorkspaceFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logo-blocks",
    about = "Generate Logo (turtle graphics) source from a saved block workspace."
)]
pub struct Args {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(value_name = "OUTPUT", help = "Write the program here instead of stdout.")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        default_value_t = FormatArg::Auto,
        help = "Workspace serialization of INPUT."
    )]
    pub format: FormatArg,

    #[arg(
        long,
        help = "Treat list and text positions in the workspace as 0-based."
    )]
    pub zero_based_index: bool,

    #[arg(
        long,
        value_name = "SNIPPET",
        help = "Logo emitted before every statement; %1 becomes the quoted block id."
    )]
    pub statement_prefix: Option<String>,

    #[arg(
        long,
        value_name = "SNIPPET",
        help = "Logo emitted after every statement; %1 becomes the quoted block id."
    )]
    pub statement_suffix: Option<String>,

    #[arg(
        long,
        value_name = "SNIPPET",
        help = "Logo emitted at the top of every loop and procedure body."
    )]
    pub loop_trap: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Auto,
    Json,
    Xml,
}

impl FormatArg {
    pub fn resolve(self) -> Option<WorkspaceFormat> {
        match self {
            FormatArg::Auto => None,
            FormatArg::Json => Some(WorkspaceFormat::Json),
            FormatArg::Xml => Some(WorkspaceFormat::Xml),
        }
    }
}

impl Args {
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            one_based_index: !self.zero_based_index,
            statement_prefix: self.statement_prefix.as_deref().map(as_line),
            statement_suffix: self.statement_suffix.as_deref().map(as_line),
            infinite_loop_trap: self.loop_trap.as_deref().map(as_line),
            ..GeneratorOptions::default()
        }
    }
}

/// Snippets are spliced in as whole lines.
fn as_line(snippet: &str) -> String {
    if snippet.ends_with('\n') {
        snippet.to_string()
    } else {
        format!("{}\n", snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_generator_options() {
        let args = Args::parse_from([
            "logo-blocks",
            "in.json",
            "--zero-based-index",
            "--statement-prefix",
            "hl %1",
            "--format",
            "xml",
        ]);
        let options = args.generator_options();
        assert!(!options.one_based_index);
        assert_eq!(options.statement_prefix.as_deref(), Some("hl %1\n"));
        assert_eq!(options.statement_suffix, None);
        assert_eq!(args.format.resolve(), Some(WorkspaceFormat::Xml));
        assert!(args.output.is_none());
    }
}
