// Command-line interface for corpconv
//
// This binary converts text corpora between line-based formats and inspects
// the parsed sentence model.
//
// A format is given either as a preset name (conll, tsv, vrt, osl, plus any
// presets defined in the configuration file) or as a raw six-character
// descriptor. Both --from and --to are always explicit: corpus files share
// too few extension conventions for auto-detection to be reliable.
//
// Usage:
//  corpconv <input> --from <format> --to <format> [--output <file>]  - Convert (default)
//  corpconv convert <input> --from <format> --to <format>            - Same as above (explicit)
//  corpconv inspect <input> --from <format>                          - Dump the sentence model as JSON
//  corpconv --list-presets                                           - List available presets
//
// Malformed input never aborts a conversion; each structural problem is
// reported on stderr and a summary count is printed at the end of the run.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use corpconv::{convert, read_sentences, Diagnostics, FormatDescriptor, PresetRegistry, Sentence, XmlOptions};
use corpconv_config::{CorpusConfig, Loader};
use std::fs;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

fn build_cli() -> Command {
    Command::new("corpconv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting text corpora between line-based formats")
        .long_about(
            "corpconv converts text corpora between line-based formats.\n\n\
            A format is a preset name or a six-character descriptor:\n  \
            pos 1  sentence delimiter : e=empty line, l=newline, x=XML tag\n  \
            pos 2  token delimiter    : l=newline, s=space, t=tab\n  \
            pos 3  field delimiter    : n=none, s=space, t=tab, other chars literally\n  \
            pos 4  sentence ID        : c=comment line, n=none, s/t=leading field, x=XML attribute\n  \
            pos 5  token ID           : n=none, digit=zero-based field index\n  \
            pos 6  missing value      : e=empty string, n=forbidden, other chars as marker\n\n\
            Examples:\n  \
            corpconv input.conllu --from conll --to vrt     # CoNLL to VRT (stdout)\n  \
            corpconv input.txt --from lstnne --to tsv -o out.tsv\n  \
            corpconv inspect input.vrt --from vrt           # Sentence model as JSON\n  \
            corpconv --list-presets                         # Show preset descriptors"
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-presets")
                .long("list-presets")
                .help("List available format presets")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a corpconv.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a corpus between formats (default command)")
                .long_about(
                    "Convert a corpus between two formats.\n\n\
                    Both formats are preset names or raw descriptors; neither is\n\
                    auto-detected. Output goes to stdout by default, or use -o to\n\
                    write a file.\n\n\
                    Examples:\n  \
                    corpconv convert in.conllu --from conll --to vrt\n  \
                    corpconv convert in.txt --from \"es/sne\" --to tsv -o out.tsv\n  \
                    corpconv in.conllu --from conll --to osl    # 'convert' is optional"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (preset name or descriptor)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (preset name or descriptor)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("xml-tag")
                        .long("xml-tag")
                        .value_name("NAME")
                        .help("Sentence tag for XML-delimited formats")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("xml-id")
                        .long("xml-id")
                        .value_name("NAME")
                        .help("Sentence ID attribute for XML-delimited formats")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse a corpus and dump the sentence model as JSON")
                .long_about(
                    "Parse a corpus under the given format and print the resulting\n\
                    sentence model as pretty-printed JSON. Useful for checking how a\n\
                    descriptor interprets a file before converting it.\n\n\
                    Examples:\n  \
                    corpconv inspect file.conllu --from conll\n  \
                    corpconv inspect file.vrt --from xltxne --xml-tag sentence"
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (preset name or descriptor)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("xml-tag")
                        .long("xml-tag")
                        .value_name("NAME")
                        .help("Sentence tag for XML-delimited formats")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("xml-id")
                        .long("xml-id")
                        .value_name("NAME")
                        .help("Sentence ID attribute for XML-delimited formats")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    init_logging();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // Check if this is a "missing subcommand" error by seeing if the first arg looks like a file
            if args.len() > 1
                && !args[1].starts_with('-')
                && args[1] != "convert"
                && args[1] != "inspect"
                && args[1] != "help"
            {
                // Inject "convert" as the subcommand
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                // Try parsing again with "convert" injected
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                // Not a case where we should inject convert, show original error
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let registry = config.preset_registry();

    if matches.get_flag("list-presets") {
        handle_list_presets_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = sub_matches
                .get_one::<String>("from")
                .expect("from is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let options = xml_options_from(&config, sub_matches);
            handle_convert_command(input, from, to, output, &options, &registry);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = sub_matches
                .get_one::<String>("from")
                .expect("from is required");
            let options = xml_options_from(&config, sub_matches);
            handle_inspect_command(input, from, &options, &registry);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Route warnings to stderr; `RUST_LOG` overrides the default level.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    options: &XmlOptions,
    registry: &PresetRegistry,
) {
    let from = resolve_format(registry, from);
    let to = resolve_format(registry, to);

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let diag = Diagnostics::new();
    let result = convert(&source, &from, &to, options, &diag).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => {
            print!("{result}");
        }
    }

    if !diag.is_empty() {
        eprintln!(
            "{} warning(s) while converting '{input}'",
            diag.warning_count()
        );
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    input: &str,
    from: &str,
    options: &XmlOptions,
    registry: &PresetRegistry,
) {
    let from = resolve_format(registry, from);

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let diag = Diagnostics::new();
    let sentences = read_sentences(source.lines().map(str::to_string), &from, options, &diag)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
    let sentences: Vec<Sentence> = sentences.collect();

    let json = serde_json::to_string_pretty(&sentences).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{json}");

    if !diag.is_empty() {
        eprintln!(
            "{} warning(s) while parsing '{input}'",
            diag.warning_count()
        );
    }
}

/// Handle the list-presets command
fn handle_list_presets_command(registry: &PresetRegistry) {
    println!("Available presets:");
    for (name, descriptor) in registry.list_presets() {
        println!("  {name:<10} {descriptor}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> CorpusConfig {
    let loader = Loader::new().with_optional_file("corpconv.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn resolve_format(registry: &PresetRegistry, spec: &str) -> FormatDescriptor {
    registry.resolve(spec).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn xml_options_from(config: &CorpusConfig, matches: &ArgMatches) -> XmlOptions {
    let mut options: XmlOptions = (&config.xml).into();
    if let Some(tag) = matches.get_one::<String>("xml-tag") {
        options.tag = tag.clone();
    }
    if let Some(id) = matches.get_one::<String>("xml-id") {
        options.id_attribute = id.clone();
    }
    options
}
