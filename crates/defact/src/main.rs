use std::path::PathBuf;

use defact::{analyze, load_decl_set, render_report};

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    }
}

fn run() -> Result<i32, String> {
    let args = std::env::args().collect::<Vec<_>>();
    let command = parse_cli(&args)?;

    match command {
        Command::Check { input, json } => {
            let decls = load_decl_set(&input).map_err(|err| err.to_string())?;
            let result = analyze(&decls);

            if json {
                let rendered = serde_json::to_string_pretty(&result.diagnostics)
                    .map_err(|err| format!("failed to serialize diagnostics: {err}"))?;
                println!("{rendered}");
            } else {
                print!("{}", render_report(&decls, &result.diagnostics));
            }

            Ok(if result.has_errors() { 1 } else { 0 })
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Check { input: PathBuf, json: bool },
}

fn parse_cli(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err(usage());
    }

    match args[1].as_str() {
        "check" => {
            let input = PathBuf::from(&args[2]);
            let mut json = false;

            for arg in &args[3..] {
                match arg.as_str() {
                    "--json" => json = true,
                    unknown => {
                        return Err(format!("unknown argument `{unknown}`\n{}", usage()));
                    }
                }
            }

            Ok(Command::Check { input, json })
        }
        _ => Err(usage()),
    }
}

fn usage() -> String {
    "usage:\n  defact check <decls.json> [--json]".to_string()
}
