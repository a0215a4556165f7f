use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("corpconv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting text corpora between line-based formats")
        .arg_required_else_help(true)
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "corpconv", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "corpconv", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "corpconv", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
