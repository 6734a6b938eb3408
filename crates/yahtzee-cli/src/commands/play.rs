use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use tracing::info;

use yahtzee_session::{DiceRenderer, RandomRenderer, ScriptedRenderer, Table};

pub fn run(seed: u64, rounds: u32, dice: Option<&Path>, log: Option<&Path>) -> Result<(), String> {
    let config = super::session_config(seed, rounds)?;

    println!("  {} Two-player Yahtzee", "Starting".bold());
    println!("  Rounds: {rounds} | Seed: {seed}");
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    match dice {
        Some(path) => {
            let hands = load_hands(path)?;
            info!(hands = hands.len(), path = %path.display(), "replaying dice script");
            repl(Table::new(config, ScriptedRenderer::new(hands)), log)
        }
        None => repl(Table::new(config, RandomRenderer::new(seed)), log),
    }
}

fn repl<R: DiceRenderer>(mut table: Table<R>, log: Option<&Path>) -> Result<(), String> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{} > ", table.session().turn().active_player());
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match table.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }

        if table.session().is_game_over() {
            println!("{}\n", table.render_card());
            break;
        }
    }

    if let Some(path) = log {
        std::fs::write(path, table.session().log().export_markdown())
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        info!(entries = table.session().log().len(), path = %path.display(), "game log written");
        println!("  Log written to {}", path.display());
    }

    Ok(())
}

/// Read a dice script: one hand per line, faces separated by spaces or
/// commas. Blank lines and `#` comments are skipped.
fn load_hands(path: &Path) -> Result<Vec<Vec<u8>>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(n, line)| {
            line.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<u8>()
                        .map_err(|_| format!("{}:{}: bad face '{s}'", path.display(), n + 1))
                })
                .collect()
        })
        .collect()
}
