use clap::{CommandFactory, Parser};
use jot_cli::cli::{self, Cli, Command, SessionArgs};
use jot_cli::render;
use jot_core::config::{self, Config, Palette};
use jot_core::error::AppError;
use jot_core::store::TaskStore;
use jot_core::view;
use std::io::{self, BufRead};

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

/// Replace the first word of the line when the config maps it to an alias
/// expansion. Expansion happens once; aliases do not recurse.
fn expand_alias(line: &str, config: &Config) -> String {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, Some(rest)),
        None => (line, None),
    };

    match config.aliases.get(head) {
        Some(expansion) => match rest {
            Some(rest) => format!("{expansion} {rest}"),
            None => expansion.clone(),
        },
        None => line.to_string(),
    }
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn render_view(store: &TaskStore, palette: &Palette, json: bool) {
    let view = view::build(store.tasks(), store.filter());

    if json {
        println!("{}", render::view_json(&view));
        return;
    }

    println!("{}", render::filter_bar(store.filter(), palette));
    if view.is_empty() {
        println!("{}", view.empty_message());
    } else {
        println!("{}", render::task_table(&view, palette));
    }
    println!("{}", render::counters(&view));
}

fn run_command<R: BufRead>(
    store: &mut TaskStore,
    input: &mut R,
    palette: &Palette,
    cli: Cli,
) -> Result<(), AppError> {
    match cli.command {
        Command::Add { text } => {
            let text = text.unwrap_or_default();
            if store.add(&text).is_none() {
                return Ok(());
            }
            render_view(store, palette, cli.json);
        }
        Command::Toggle { id } => {
            store.toggle(id);
            render_view(store, palette, cli.json);
        }
        Command::Delete { id } => {
            store.delete(id);
            render_view(store, palette, cli.json);
        }
        Command::Edit { id, text } => {
            let Some(current) = store.begin_edit(id).map(str::to_string) else {
                return Ok(());
            };

            let replacement = match text {
                Some(value) => value,
                None => {
                    println!("Editing {id}: {current}");
                    let mut line = String::new();
                    input
                        .read_line(&mut line)
                        .map_err(|err| AppError::io(err.to_string()))?;
                    line
                }
            };

            store.save_edit(id, &replacement);
            render_view(store, palette, cli.json);
        }
        Command::Filter { filter } => {
            store.set_filter(filter.into());
            render_view(store, palette, cli.json);
        }
        Command::List => render_view(store, palette, cli.json),
        Command::Stats => {
            let view = view::build(store.tasks(), store.filter());
            if cli.json {
                println!("{}", render::stats_json(&view));
            } else {
                println!("{}", render::counters(&view));
            }
        }
    }

    Ok(())
}

fn run_session(config: &Config, palette: &Palette) -> Result<(), AppError> {
    let mut store = TaskStore::new();
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let expanded = expand_alias(input.trim(), config);
        let line = expanded.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("jot".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(&mut store, &mut stdin_lock, palette, cli) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let args = SessionArgs::parse();

    let overrides = match cli::collect_config_overrides(&args.config_override) {
        Ok(overrides) => overrides,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };

    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: {err}");
    }

    let config = config::merge_overrides(&loaded.config, &overrides);
    let palette = config::palette_for_theme(config.theme.as_deref());

    if let Err(err) = run_session(&config, &palette) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
