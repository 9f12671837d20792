use crate::comparison::{Answer, ComparisonAction, ComparisonInterface, Performance, Question, Side};
use crate::error::GameError;
use crate::feedback::{Feedback, GuessReport};
use crate::game_state::{GameInterface, Hint, HintKind, NewGameInfo, Progress, UserAction};
use crate::router::{GAMES, route_for};
use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::io::BufRead;
use std::path::PathBuf;

/// Sports trivia games in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Game id (e.g. mlb-player-guess) or route (e.g. '#/home/mlb-player-guess')
    pub game: Option<String>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV file replacing the built-in player data
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Use the full-screen interface
    #[arg(long)]
    pub tui: bool,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Reject the data file on its first invalid row
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available games
    List,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn read_trimmed<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input.trim().to_string()),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

/// Interpret one line typed during a guessing game.
#[must_use]
pub fn parse_action(input: &str) -> Option<UserAction> {
    let lower = input.trim().to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    match words.as_slice() {
        [] => None,
        ["exit" | "quit"] => Some(UserAction::Exit),
        ["new" | "next"] => Some(UserAction::NewGame),
        ["hint", "team"] => Some(UserAction::Hint(HintKind::Team)),
        ["hint", "initial"] => Some(UserAction::Hint(HintKind::Initial)),
        ["hint", ..] => None,
        _ => Some(UserAction::Guess(input.trim().to_string())),
    }
}

/// Interpret one line typed during a comparison game.
#[must_use]
pub fn parse_choice(input: &str) -> Option<ComparisonAction> {
    match input.trim().to_lowercase().as_str() {
        "a" | "1" => Some(ComparisonAction::Choose(Side::A)),
        "b" | "2" => Some(ComparisonAction::Choose(Side::B)),
        "new" | "next" => Some(ComparisonAction::NewGame),
        "exit" | "quit" => Some(ComparisonAction::Exit),
        _ => None,
    }
}

pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!("\nEnter a player name ('hint team', 'hint initial', 'new' or 'exit'):");
    let Some(input) = read_trimmed(reader) else {
        return Some(UserAction::Exit);
    };
    let action = parse_action(&input);
    if action.is_none() && !input.is_empty() {
        println!("Unknown command. Try 'hint team' or 'hint initial'.");
    }
    action
}

pub fn read_choice<R: BufRead>(reader: &mut R) -> Option<ComparisonAction> {
    println!("\nWho has more? Enter A or B ('new' or 'exit'):");
    let Some(input) = read_trimmed(reader) else {
        return Some(ComparisonAction::Exit);
    };
    let choice = parse_choice(&input);
    if choice.is_none() {
        println!("Please enter A or B.");
    }
    choice
}

/// Offer to try again after a failure. Only `r` retries.
pub fn prompt_retry<R: BufRead>(reader: &mut R, message: &str) -> bool {
    println!("{message}");
    println!("Press 'r' to retry, or Enter to quit:");
    read_trimmed(reader).is_some_and(|input| input.eq_ignore_ascii_case("r"))
}

/// Run `load` until it succeeds or the user declines to retry.
pub fn retry_loop<R, T, E, F>(reader: &mut R, mut load: F) -> Option<T>
where
    R: BufRead,
    E: Display,
    F: FnMut() -> Result<T, E>,
{
    loop {
        match load() {
            Ok(value) => return Some(value),
            Err(e) => {
                log::warn!("{e}");
                if !prompt_retry(reader, &format!("Error: {e}")) {
                    return None;
                }
            }
        }
    }
}

pub fn display_game_list() {
    println!("Available games:");
    for game in &GAMES {
        let route = route_for(game.id).unwrap_or_default();
        println!("  {:<24} {} ({route})", game.id, game.name);
        println!("  {:<24} {}", "", game.description);
    }
}

fn marker(feedback: Feedback) -> &'static str {
    match feedback {
        Feedback::Correct => "✓",
        Feedback::Close(_) => "~",
        Feedback::Wrong(_) => "✗",
    }
}

#[must_use]
pub fn format_report(report: &GuessReport, progress: Progress) -> String {
    let mut out = format!("Guess {}/{}: {}", progress.made, progress.max, report.player);
    for cell in &report.cells {
        out.push_str(&format!(
            "\n  {:<12}{:<12}{} {}",
            cell.label,
            cell.display,
            marker(cell.feedback),
            cell.feedback.as_str()
        ));
    }
    out
}

#[must_use]
pub fn format_hint(hint: &Hint) -> String {
    match hint {
        Hint::Team(team) => format!("Hint: the player is on {team}"),
        Hint::Initial(initial) => format!("Hint: the player's first name starts with {initial}"),
    }
}

#[must_use]
pub fn format_question(question: &Question, progress: Progress, score: usize) -> String {
    format!(
        "Question {}/{} (score {score})\nWho has more {}?\n  A) {} ({} {})\n  B) {} ({} {})",
        progress.made,
        progress.max,
        question.stat,
        question.a.name,
        question.a.team,
        question.a.league,
        question.b.name,
        question.b.team,
        question.b.league,
    )
}

#[must_use]
pub fn format_answer(question: &Question, answer: &Answer) -> String {
    let verdict = if answer.is_correct() { "✓ Correct!" } else { "✗ Incorrect!" };
    format!(
        "{verdict}\n  {}: {} {}\n  {}: {} {}",
        question.a.name,
        answer.stat,
        answer.value_a,
        question.b.name,
        answer.stat,
        answer.value_b,
    )
}

/// CLI implementation of the game interfaces over any `BufRead` source.
/// End of input counts as exit.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&mut self) -> &mut R {
        &mut self.reader
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_new_game(&mut self, info: &NewGameInfo) {
        println!(
            "\nNew {} game: guess the mystery player from {} players. You have {} guesses.",
            info.sport, info.player_count, info.max_guesses
        );
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_guess(&mut self, report: &GuessReport, progress: Progress) {
        println!("{}", format_report(report, progress));
    }

    fn display_hints_available(&mut self, hints: &[HintKind]) {
        let names: Vec<String> = hints.iter().map(|h| format!("'hint {h}'")).collect();
        println!("Hint available: {}", names.join(" or "));
    }

    fn display_hint(&mut self, hint: &Hint) {
        println!("{}", format_hint(hint));
    }

    fn display_error(&mut self, error: &GameError) {
        println!("{error}");
    }

    fn display_won(&mut self, answer: &str, guesses: usize) {
        println!("Correct! It was {answer}. Solved in {guesses} guesses. Type 'new' to play again.");
    }

    fn display_lost(&mut self, answer: &str, details: &str) {
        println!("Out of guesses! The player was {answer}: {details}. Type 'new' to play again.");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

impl<R: BufRead> ComparisonInterface for CliInterface<R> {
    fn display_question(&mut self, question: &Question, progress: Progress, score: usize) {
        println!("\n{}", format_question(question, progress, score));
    }

    fn read_choice(&mut self) -> Option<ComparisonAction> {
        read_choice(&mut self.reader)
    }

    fn display_answer(&mut self, question: &Question, answer: &Answer) {
        println!("{}", format_answer(question, answer));
    }

    fn display_summary(&mut self, score: usize, max: usize, percentage: u32, performance: Performance) {
        println!("\nGame complete! Final score: {score} / {max} ({percentage}%)");
        println!("{}", performance.message());
        println!("Type 'new' to play again or 'exit' to quit.");
    }

    fn display_error(&mut self, error: &GameError) {
        println!("{error}");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
