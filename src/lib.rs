pub mod blocks;
pub mod error;
pub mod generator;
pub mod generators;
pub mod names;
pub mod order;
pub mod serialization;
pub mod strings;
pub mod xml;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(all(target_arch = "wasm32", feature = "wasm-bindings"))]
pub mod wasm;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use blocks::{Block, Workspace};
pub use error::GenerateError;
pub use generator::{Code, GeneratorOptions, LogoGenerator};
pub use order::Order;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceFormat {
    Json,
    Xml,
}

impl WorkspaceFormat {
    /// Picks the format from the file extension, falling back to sniffing
    /// the first non-blank character.
    pub fn detect(path: Option<&Path>, text: &str) -> Self {
        let by_extension = path
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match by_extension.as_deref() {
            Some("xml") => WorkspaceFormat::Xml,
            Some("json") => WorkspaceFormat::Json,
            _ if text.trim_start().starts_with('<') => WorkspaceFormat::Xml,
            _ => WorkspaceFormat::Json,
        }
    }
}

pub fn load_workspace(text: &str, format: WorkspaceFormat) -> Result<Workspace> {
    match format {
        WorkspaceFormat::Json => serialization::workspace_from_json(text),
        WorkspaceFormat::Xml => xml::workspace_from_xml(text),
    }
}

pub fn generate(workspace: &Workspace, options: GeneratorOptions) -> Result<String> {
    let mut generator = LogoGenerator::new(options);
    Ok(generator.workspace_to_code(workspace)?)
}

pub fn generate_from_json(text: &str, options: GeneratorOptions) -> Result<String> {
    let workspace = serialization::workspace_from_json(text)?;
    generate(&workspace, options)
}

pub fn generate_from_xml(text: &str, options: GeneratorOptions) -> Result<String> {
    let workspace = xml::workspace_from_xml(text)?;
    generate(&workspace, options)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_cli(args: &cli::Args) -> Result<()> {
    let total_stages = 3 + usize::from(args.output.is_some());
    let progress = CliProgress::new("Generate", total_stages);
    let mut stage = 0usize;

    stage += 1;
    progress.emit(stage, "Resolving input path");
    let input = canonicalize_file(&args.input)?;

    stage += 1;
    progress.emit(stage, "Loading workspace");
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read '{}'.", input.display()))?;
    let format = args
        .format
        .resolve()
        .unwrap_or_else(|| WorkspaceFormat::detect(Some(&input), &text));
    let workspace = load_workspace(&text, format)
        .with_context(|| format!("Failed to load workspace '{}'.", input.display()))?;

    stage += 1;
    progress.emit(stage, "Generating Logo");
    let code = generate(&workspace, args.generator_options())
        .with_context(|| format!("Failed to generate Logo for '{}'.", input.display()))?;

    match &args.output {
        Some(output) => {
            stage += 1;
            progress.emit(stage, "Writing output");
            std::fs::write(output, code.as_bytes())
                .with_context(|| format!("Failed to write '{}'.", output.display()))?;
        }
        None => print!("{}", code),
    }

    Ok(())
}

pub fn canonicalize_file(path: &Path) -> Result<PathBuf> {
    if !path.exists() || !path.is_file() {
        return Err(anyhow::anyhow!("Input file not found: '{}'.", path.display()));
    }
    Ok(path.canonicalize()?)
}

#[cfg(not(target_arch = "wasm32"))]
struct CliProgress {
    prefix: &'static str,
    total: usize,
}

#[cfg(not(target_arch = "wasm32"))]
impl CliProgress {
    fn new(prefix: &'static str, total: usize) -> Self {
        Self {
            prefix,
            total: total.max(1),
        }
    }

    fn emit(&self, step: usize, label: &str) {
        let step = step.clamp(1, self.total);
        let bar = render_progress_bar(step, self.total, 14);
        eprintln!(
            "[{}] {}... ({}/{}) {}",
            self.prefix, label, step, self.total, bar
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn render_progress_bar(step: usize, total: usize, width: usize) -> String {
    let width = width.max(1);
    let filled = ((step * width) + (total / 2)) / total;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < filled { '=' } else { '-' });
    }
    s.push(']');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection_prefers_the_extension() {
        assert_eq!(
            WorkspaceFormat::detect(Some(Path::new("a.xml")), "{}"),
            WorkspaceFormat::Xml
        );
        assert_eq!(
            WorkspaceFormat::detect(Some(Path::new("a.txt")), "  <xml/>"),
            WorkspaceFormat::Xml
        );
        assert_eq!(WorkspaceFormat::detect(None, "{}"), WorkspaceFormat::Json);
    }

    #[test]
    fn progress_bar_rounds_to_width() {
        assert_eq!(render_progress_bar(1, 4, 8), "[==------]");
        assert_eq!(render_progress_bar(4, 4, 4), "[====]");
    }
}
