use ansi_term::Style;
use clap::{App, Arg, ArgMatches, SubCommand};
use std::fs;
use std::io::{self, Read, Write};
use std::process::exit;

fn main() {
    let matches = App::new("bastool")
        .version("0.1.0")
        .about("Tokenizer and detokenizer for NeoBASIC program images")
        .subcommand(
            SubCommand::with_name("make")
                .about("Tokenize a source file to a program image")
                .arg(
                    Arg::with_name("input")
                        .short("f")
                        .value_name("FILE")
                        .help("Source file to tokenize, stdin when omitted")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .value_name("FILE")
                        .help("Program image to write")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("library")
                        .short("l")
                        .help("Force every line number to zero"),
                ),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Detokenize a program image to source text")
                .arg(
                    Arg::with_name("input")
                        .short("f")
                        .value_name("FILE")
                        .help("Program image to detokenize")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .value_name("FILE")
                        .help("Listing file to write, stdout when omitted")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("numbers")
                        .short("n")
                        .help("Include line numbers in the listing"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("make", Some(sub)) => make(sub),
        ("list", Some(sub)) => list(sub),
        _ => {
            eprintln!("{}", matches.usage());
            exit(2);
        }
    };
    if let Err(message) = result {
        eprintln!("{}", Style::new().bold().paint(message));
        exit(1);
    }
}

fn make(matches: &ArgMatches) -> Result<(), String> {
    let source = match matches.value_of("input") {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?,
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|e| e.to_string())?;
            s
        }
    };
    let image = bastool::encode_source(&source, matches.is_present("library"))
        .map_err(|e| e.to_string())?;
    let path = matches.value_of("output").unwrap();
    fs::write(path, image).map_err(|e| format!("{}: {}", path, e))
}

fn list(matches: &ArgMatches) -> Result<(), String> {
    let path = matches.value_of("input").unwrap();
    let image = fs::read(path).map_err(|e| format!("{}: {}", path, e))?;
    let text =
        bastool::decode_image(&image, matches.is_present("numbers")).map_err(|e| e.to_string())?;
    match matches.value_of("output") {
        Some(path) => fs::write(path, text).map_err(|e| format!("{}: {}", path, e)),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| e.to_string()),
    }
}
