pub mod logging;

use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use gox_lower::{Lowerer, RenderApi};
use gox_syntax::{Diagnostics, Lexer, line_col, parse_file, print_file};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmitMode {
    /// Lowered Go source.
    Go,
    /// The parsed tree printed back, markup included.
    Ast,
    /// One token per line.
    Tokens,
}

impl EmitMode {
    fn extension(self) -> &'static str {
        match self {
            EmitMode::Go => "go",
            EmitMode::Ast => "ast",
            EmitMode::Tokens => "tokens",
        }
    }
}

/// Compiles one `.gox` file and writes the result to `out_dir`
/// (default: `target/gox-gen`). Returns the path written.
pub fn build_cmd(
    input: &Path,
    out_dir: Option<&Path>,
    emit: EmitMode,
    api: &RenderApi,
) -> Result<PathBuf> {
    let src =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;

    let name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("component");
    let code = compile_source(&src, &input.display().to_string(), emit, api)?;

    let out_dir = out_dir
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("target/gox-gen"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let out_path = out_dir.join(format!("{name}.{}", emit.extension()));
    fs::write(&out_path, code)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    println!("Generated: {}", out_path.display());
    Ok(out_path)
}

/// Parses and lowers a file without writing anything.
pub fn check_cmd(input: &Path, api: &RenderApi) -> Result<()> {
    let src =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    compile_source(&src, &input.display().to_string(), EmitMode::Go, api)?;
    println!("{}: ok", input.display());
    Ok(())
}

/// Runs the pipeline over `src` as far as `emit` needs.
pub fn compile_source(src: &str, file_name: &str, emit: EmitMode, api: &RenderApi) -> Result<String> {
    info!(file = file_name, ?emit, "compiling");
    if emit == EmitMode::Tokens {
        return dump_tokens(src, file_name);
    }

    let file = parse_file(src).map_err(|diags| diagnostics_error(&diags, src, file_name))?;
    debug!(decls = file.decls.len(), "parsed");
    if emit == EmitMode::Ast {
        return Ok(print_file(&file));
    }

    let lowered = Lowerer::new(api.clone()).lower_file(file);
    let mut out = format!("// Code generated by gox from {file_name}. DO NOT EDIT.\n\n");
    out.push_str(&print_file(&lowered));
    Ok(out)
}

fn dump_tokens(src: &str, file_name: &str) -> Result<String> {
    let (tokens, diags) = Lexer::new(src).tokenize();
    if !diags.is_empty() {
        return Err(diagnostics_error(&Diagnostics(diags), src, file_name));
    }
    let mut out = String::new();
    for tok in tokens {
        let (line, col) = line_col(src, tok.start);
        out.push_str(&format!("{line}:{col}\t{}\t{:?}\n", tok.kind, tok.text));
    }
    Ok(out)
}

fn diagnostics_error(diags: &Diagnostics, src: &str, file_name: &str) -> anyhow::Error {
    anyhow!(
        "{} error(s) in {file_name}\n{}",
        diags.len(),
        diags.render(src, file_name)
    )
}
