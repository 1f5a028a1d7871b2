//! `schemabuild`: schema.org structured-data command-line interface.
//!
//! Provides two subcommands for working with JSON-LD documents on the command
//! line:
//!
//! - **`render`**: rebuild a document as a validated schema tree and print it
//!   as HTML microdata or normalised JSON-LD.
//! - **`validate`**: check that a document satisfies the schema invariants.
//!
//! Both subcommands read JSON from a file path or from stdin (`-`). Set
//! `RUST_LOG` (e.g. `RUST_LOG=schemabuilder=debug`) to see rendering events on
//! stderr.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use schemabuilder::{Outputter, Schema, WrapperAttribute};
use tracing_subscriber::EnvFilter;

/// schemabuild: schema.org structured-data CLI
///
/// Validate JSON-LD documents and render them as microdata or JSON-LD.
#[derive(Parser)]
#[command(name = "schemabuild", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Output format for `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// HTML microdata markup
    Microdata,
    /// Compact (or `--pretty`) JSON-LD
    JsonLd,
}

#[derive(Subcommand)]
enum Command {
    /// Render a JSON-LD document as microdata or JSON-LD.
    ///
    /// The input must be a single JSON object with an `@type`. Nested objects
    /// become nested schemas; property order is kept as written.
    ///
    /// Pass `-` as FILE to read from stdin.
    ///
    /// Examples:
    ///   schemabuild render person.json
    ///   schemabuild render person.json --wrapper article --attr class=card
    ///   cat person.json | schemabuild render - --format json-ld --context --pretty
    Render {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,

        /// Output format.
        #[arg(
            short,
            long,
            value_enum,
            default_value_t = Format::Microdata,
            env = "SCHEMABUILD_FORMAT"
        )]
        format: Format,

        /// Tag of the outer microdata wrapper (default `div`).
        #[arg(short, long, default_value = "", env = "SCHEMABUILD_WRAPPER")]
        wrapper: String,

        /// Extra attribute on the outer microdata wrapper: <name>=<value>.
        /// Repeat for multiple attributes: --attr class=card --attr id=ada
        #[arg(long = "attr", value_name = "NAME=VALUE")]
        attributes: Vec<String>,

        /// `itemprop` for the outer microdata wrapper.
        #[arg(short, long = "property", value_name = "NAME", default_value = "")]
        property_name: String,

        /// Indent JSON-LD output.
        #[arg(long, env = "SCHEMABUILD_PRETTY")]
        pretty: bool,

        /// Add `"@context": "http://schema.org"` to JSON-LD output.
        #[arg(long, env = "SCHEMABUILD_CONTEXT")]
        context: bool,
    },

    /// Validate a JSON-LD document against the schema invariants.
    ///
    /// Exits 0 and prints a one-line summary if the document is valid,
    /// 1 otherwise.
    ///
    /// Pass `-` as FILE to read from stdin.
    Validate {
        /// Path to a JSON file, or `-` for stdin.
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schemabuilder=warn,schemabuild=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            file,
            format,
            wrapper,
            attributes,
            property_name,
            pretty,
            context,
        } => {
            let json = read_input(&file);
            let schema = json
                .parse::<Schema>()
                .unwrap_or_else(|e| fatal(&format!("invalid JSON-LD document: {}", e)));
            tracing::debug!(
                schema_type = %schema.schema_type(),
                properties = schema.len(),
                ?format,
                "document loaded"
            );

            let mut stdout = io::stdout().lock();
            let written = match format {
                Format::Microdata => {
                    let parsed: Vec<WrapperAttribute> = attributes
                        .iter()
                        .map(|raw| parse_attribute(raw).unwrap_or_else(|e| fatal(&e)))
                        .collect();
                    schema
                        .microdata_outputter()
                        .property_name(property_name)
                        .wrapper(wrapper)
                        .attributes(parsed)
                        .output(&mut stdout)
                }
                Format::JsonLd => schema
                    .json_ld_outputter()
                    .with_context(context)
                    .pretty(pretty)
                    .output(&mut stdout),
            };
            written
                .and_then(|_| writeln!(stdout))
                .unwrap_or_else(|e| fatal(&format!("failed to write output: {}", e)));
        }

        Command::Validate { file } => {
            let json = read_input(&file);
            match json.parse::<Schema>() {
                Ok(schema) => {
                    let n = schema.len();
                    println!(
                        "valid: {} ({} propert{})",
                        schema.schema_type(),
                        n,
                        if n == 1 { "y" } else { "ies" }
                    );
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

/// Parse a `--attr` argument from `<name>=<value>`.
///
/// The value may be empty (`--attr hidden=`) and may itself contain `=`.
fn parse_attribute(raw: &str) -> Result<WrapperAttribute, String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(WrapperAttribute::new(name, value)),
        _ => Err(format!(
            "invalid --attr {:?}: expected format <name>=<value>",
            raw
        )),
    }
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &PathBuf) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("schemabuild: {}", msg);
    process::exit(2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_splits_on_first_equals() {
        assert_eq!(
            parse_attribute("data-q=a=b").unwrap(),
            WrapperAttribute::new("data-q", "a=b")
        );
        assert_eq!(parse_attribute("hidden=").unwrap(), WrapperAttribute::new("hidden", ""));
    }

    #[test]
    fn attribute_without_name_rejected() {
        assert!(parse_attribute("=x").is_err());
        assert!(parse_attribute("class").is_err());
    }

    #[test]
    fn cli_parses_render_flags() {
        let cli = Cli::try_parse_from([
            "schemabuild",
            "render",
            "in.json",
            "--format",
            "json-ld",
            "--attr",
            "class=card",
            "--pretty",
        ])
        .unwrap();
        match cli.command {
            Command::Render {
                format,
                attributes,
                pretty,
                context,
                ..
            } => {
                assert_eq!(format, Format::JsonLd);
                assert_eq!(attributes, ["class=card"]);
                assert!(pretty);
                assert!(!context);
            }
            Command::Validate { .. } => panic!("expected render"),
        }
    }
}
