//! Command-line interface for mml
//!
//! Usage:
//!   mml format `<path>` [--in-place]                  - Autofix and print canonical markup
//!   mml inspect `<path>` [--format `<format>`]        - Show the tree (treeviz, json, yaml, markup)
//!   mml query `<path>` [filters] [--set k=v | --delete] - Select nodes, optionally mutate them
//!   mml list-formats                                 - List output formats
//!
//! Global flags: `--config <file>` layers a TOML file over the defaults,
//! `--verbose` turns on debug logging (otherwise `RUST_LOG` decides).

use clap::{Arg, ArgAction, ArgMatches, Command};
use mml_config::{Loader, MmlConfig};
use mml_parser::mml::formats::{MarkupFormatter, TreevizFormatter};
use mml_parser::{Document, DocumentLoader, Dom, FormatRegistry, NodeKind, Selection};
use std::fs;
use std::process;

fn cli() -> Command {
    let path_arg = || Arg::new("path").help("Path to the mml document").required(true).index(1);
    let in_place = || {
        Arg::new("in-place")
            .long("in-place")
            .short('i')
            .help("Write the result back to the file instead of stdout")
            .action(ArgAction::SetTrue)
    };

    Command::new("mml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting, repairing and querying mml documents")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Log autofix actions and other debug output")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("format")
                .about("Autofix a document and emit canonical markup")
                .arg(path_arg())
                .arg(in_place()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Render a document in one of the registered formats")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)")
                        .default_value("treeviz"),
                ),
        )
        .subcommand(
            Command::new("query")
                .about("Select nodes; print their ids or apply a bulk change")
                .arg(path_arg())
                .arg(
                    Arg::new("where")
                        .long("where")
                        .short('w')
                        .value_name("KEY=VALUE")
                        .help("Keep nodes with this attribute value (repeatable)")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .help("Keep nodes of this kind: container or content"),
                )
                .arg(
                    Arg::new("has-fragment")
                        .long("has-fragment")
                        .value_name("IDENTIFIER")
                        .help("Keep content nodes holding this fragment"),
                )
                .arg(
                    Arg::new("under")
                        .long("under")
                        .value_name("ID")
                        .help("Keep descendants of this container"),
                )
                .arg(
                    Arg::new("set")
                        .long("set")
                        .short('s')
                        .value_name("KEY=VALUE")
                        .help("Set this attribute on every match (repeatable)")
                        .action(ArgAction::Append)
                        .conflicts_with("delete"),
                )
                .arg(
                    Arg::new("delete")
                        .long("delete")
                        .help("Delete every match")
                        .action(ArgAction::SetTrue),
                )
                .arg(in_place()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn main() {
    let matches = cli().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        unreachable!("clap requires a subcommand")
    };

    // Global flags may sit before or after the subcommand
    init_logging(matches.get_flag("verbose") || sub.get_flag("verbose"));
    let config = load_config(
        sub.get_one::<String>("config")
            .or_else(|| matches.get_one::<String>("config")),
    );
    let registry = registry_for(&config);

    match name {
        "format" => handle_format_command(sub, &config),
        "inspect" => handle_inspect_command(sub, &config, &registry),
        "query" => handle_query_command(sub, &config),
        "list-formats" => handle_list_formats_command(&registry),
        other => unreachable!("unknown subcommand {other}"),
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

fn load_config(path: Option<&String>) -> MmlConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new(),
    };
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("invalid configuration: {e}")))
}

/// The default registry with markup and treeviz built from the configuration
fn registry_for(config: &MmlConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(MarkupFormatter::new(config.serialize_options()));
    registry.register(TreevizFormatter::new(config.treeviz_options()));
    registry
}

fn load_document(path: &str, config: &MmlConfig) -> Document {
    DocumentLoader::from_path(path)
        .and_then(|loader| loader.parse_with(&config.parse_options()))
        .unwrap_or_else(|e| fail(format!("{path}: {e}")))
}

fn emit(doc: &Document, path: &str, in_place: bool, config: &MmlConfig) {
    let text = doc.serialize_with(&config.serialize_options());
    if in_place {
        fs::write(path, text).unwrap_or_else(|e| fail(format!("{path}: {e}")));
        log::info!(target: "mml.cli", "wrote {path}");
    } else {
        print!("{text}");
    }
}

fn handle_format_command(matches: &ArgMatches, config: &MmlConfig) {
    let path = required(matches, "path");
    let doc = load_document(path, config);
    emit(&doc, path, matches.get_flag("in-place"), config);
}

fn handle_inspect_command(matches: &ArgMatches, config: &MmlConfig, registry: &FormatRegistry) {
    let path = required(matches, "path");
    let format = required(matches, "format");
    let doc = load_document(path, config);
    let output = registry.serialize(&doc, format).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("\nAvailable formats:");
        for name in registry.list_formats() {
            eprintln!("  {name}");
        }
        process::exit(1);
    });
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
}

fn handle_query_command(matches: &ArgMatches, config: &MmlConfig) {
    let path = required(matches, "path");
    let mut dom = Dom::new();
    dom.load(load_document(path, config));

    let wheres = pairs(matches, "where");
    let sets = pairs(matches, "set");
    let delete = matches.get_flag("delete");

    let mut query = dom.query_mut().unwrap_or_else(|e| fail(e));
    if !wheres.is_empty() {
        query = query.where_attrs(wheres);
    }
    if let Some(kind) = matches.get_one::<String>("type") {
        let kind: NodeKind = kind.parse().unwrap_or_else(|e: String| fail(e));
        query = query.where_type(kind);
    }
    if let Some(identifier) = matches.get_one::<String>("has-fragment") {
        query = query.where_has_fragment(identifier);
    }
    if let Some(container) = matches.get_one::<String>("under") {
        query = query.where_container(container, true);
    }

    if sets.is_empty() && !delete {
        for id in query.get_ids() {
            println!("{id}");
        }
        return;
    }

    if delete {
        let removed = query.bulk_delete().unwrap_or_else(|e| fail(e));
        eprintln!("deleted {removed} node(s)");
    } else {
        query.bulk_set_attributes(sets).unwrap_or_else(|e| fail(e));
    }
    if query.skipped() > 0 {
        eprintln!("skipped {} node(s)", query.skipped());
    }

    let doc = dom.document().unwrap_or_else(|e| fail(e));
    emit(doc, path, matches.get_flag("in-place"), config);
}

fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for (name, description) in registry.describe() {
        println!("  {name}");
        println!("    {description}");
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| fail(format!("missing argument {name}")))
}

/// Repeated `KEY=VALUE` arguments
fn pairs(matches: &ArgMatches, name: &str) -> Vec<(String, String)> {
    matches
        .get_many::<String>(name)
        .into_iter()
        .flatten()
        .map(|raw| match raw.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.to_string()),
            None => fail(format!("--{name} expects KEY=VALUE, got {raw:?}")),
        })
        .collect()
}
