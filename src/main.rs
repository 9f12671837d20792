use anyhow::{Context, Result};
use stat_guess::cli::{self, Cli, CliInterface, Command};
use stat_guess::comparison::{ComparisonGame, comparison_loop};
use stat_guess::config::GameConfig;
use stat_guess::dataset::load_players;
use stat_guess::enrich::{HttpStatSource, PlayerRef, enrich_players};
use stat_guess::game_state::game_loop;
use stat_guess::profile::{self, SportProfile};
use stat_guess::router::{self, GameKind};
use stat_guess::tui::TuiInterface;
use stat_guess::{info_log, logging};
use std::io;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = cli::parse_cli();
    if cli.command == Some(Command::List) {
        cli::display_game_list();
        return Ok(());
    }

    let log_file = if cli.tui {
        logging::default_log_file()
    } else {
        None
    };
    logging::init(cli.verbose, log_file.as_deref()).context("Failed to initialize logging")?;

    let Some(target) = cli.game.as_deref() else {
        cli::display_game_list();
        return Ok(());
    };
    let entry = router::resolve(target).with_context(|| format!("Cannot open game '{target}'"))?;

    let mut config =
        GameConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.strict {
        config.csv.strict = true;
    }
    info_log!("Starting {} ({})", entry.name, entry.id);

    match entry.kind {
        GameKind::PlayerGuess(profile) => run_guess_game(profile, &cli, &config),
        GameKind::Comparison => run_comparison(&cli, &config),
    }
}

fn run_guess_game(profile: &'static SportProfile, cli: &Cli, config: &GameConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut ui = CliInterface::new(stdin.lock());
    let Some(players) = cli::retry_loop(ui.reader(), || {
        load_players(profile, cli.data.as_deref(), &config.csv)
    }) else {
        return Ok(());
    };

    if cli.tui {
        let mut tui = TuiInterface::new(profile, players.clone(), config.search)
            .context("Failed to start the terminal UI")?;
        game_loop(profile, &players, config.rules, &mut tui)?;
    } else {
        game_loop(profile, &players, config.rules, &mut ui)?;
    }
    Ok(())
}

fn run_comparison(cli: &Cli, config: &GameConfig) -> Result<()> {
    if cli.tui {
        println!("The comparison game runs in line mode.");
    }
    let stdin = io::stdin();
    let mut ui = CliInterface::new(stdin.lock());

    let Some(roster) = cli::retry_loop(ui.reader(), || {
        load_players(&profile::MLB, cli.data.as_deref(), &config.csv)
    }) else {
        return Ok(());
    };
    let refs: Vec<PlayerRef> = roster
        .iter()
        .map(|record| PlayerRef::from_record(&profile::MLB, record))
        .collect();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    let source = Arc::new(HttpStatSource::new(&config.enrich));

    println!("Loading {} MLB player data...", config.enrich.season);
    let Some(active) = cli::retry_loop(ui.reader(), || {
        runtime.block_on(enrich_players(
            Arc::clone(&source),
            refs.clone(),
            &config.enrich,
        ))
    }) else {
        return Ok(());
    };
    println!("Loaded stats for {} active players.", active.len());

    let mut rng = rand::thread_rng();
    let mut game = ComparisonGame::new(active, config.comparison_questions, &mut rng)?;
    comparison_loop(&mut game, &mut ui, &mut rng);
    Ok(())
}
