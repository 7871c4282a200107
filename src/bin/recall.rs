//! Terminal front-end for the number recall game
//!
//! Type `start` to begin, a number to pick it during recall, `reset` to
//! start over and `quit` to leave.

use clap::Parser;
use number_recall_core::runtime::{Command, SessionRunner, Update};
use number_recall_core::session::{Notice, Phase, Snapshot};
use number_recall_core::{GameConfig, GameSession};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "recall", about = "Memorize the numbers, then pick them back out")]
struct Args {
    /// JSON game config
    #[arg(long)]
    config: Option<PathBuf>,
    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,
    /// Print updates as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let (commands, mut updates) = SessionRunner::spawn(GameSession::new(config)?).into_parts();
    let json = args.json;
    let printer = tokio::spawn(async move {
        while let Some(update) = updates.recv().await {
            match update {
                Update::Snapshot(snapshot) if json => println!("{}", serde_json::to_string(&snapshot)?),
                Update::Notice(notice) if json => println!("{}", serde_json::to_string(&notice)?),
                Update::Snapshot(snapshot) => render(&snapshot),
                Update::Notice(notice) => announce(&notice),
            }
        }
        Ok::<(), serde_json::Error>(())
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.trim() {
            "" => continue,
            "start" => Command::StartGame,
            "reset" => Command::ResetGame,
            "quit" | "exit" => break,
            other => match other.parse::<u32>() {
                Ok(number) => Command::Select(number),
                Err(_) => {
                    eprintln!("expected a number, start, reset or quit");
                    continue;
                }
            },
        };
        commands.send(command)?;
    }

    commands.shutdown()?;
    printer.await??;
    Ok(())
}

fn render(snapshot: &Snapshot) {
    match snapshot.phase {
        Phase::Ready => println!("[ready] type `start` to play"),
        Phase::Memorize => println!(
            "[level {}/{} | score {} | {}s] memorize: {}",
            snapshot.level,
            snapshot.max_level,
            snapshot.score,
            snapshot.time_left,
            join(&snapshot.memory_numbers)
        ),
        Phase::Test => {
            let picked: Vec<String> = snapshot
                .selections
                .iter()
                .map(|s| format!("{}{}", s.number, if s.correct { "+" } else { "x" }))
                .collect();
            println!(
                "[level {}/{} | score {} | {}s | wrong {}/{}] board: {} | picked: {}",
                snapshot.level,
                snapshot.max_level,
                snapshot.score,
                snapshot.time_left,
                snapshot.wrong_attempts,
                snapshot.max_wrong_attempts,
                join(&snapshot.test_numbers),
                picked.join(" ")
            )
        }
        Phase::LevelComplete => println!(
            "[level {} cleared] score {} | memory iq {}",
            snapshot.level,
            snapshot.score,
            snapshot.iq_score.map(|iq| iq.to_string()).unwrap_or_default()
        ),
        Phase::Complete => println!("[complete] final score {}", snapshot.score),
    }
}

fn announce(notice: &Notice) {
    println!(">> {} ({})", notice.text, notice.category.as_str());
}

fn join(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
