//! For Sale command line runner.
//!
//! Plays one or more games and prints each final report. Seats without an
//! `--agent` get the bundled random agent.

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use for_sale::{DecisionAgent, ForSaleGame, GameConfig, GameRng, PlayerMap, ProcessAgent, RandomAgent, RefundPolicy};

#[derive(Parser)]
#[command(author, version, about = "Play For Sale between decision agents", long_about = None)]
struct Args {
    /// Number of players (2 to 30)
    #[arg(short, long)]
    players: Option<usize>,

    /// Refund rule for passing players: `up` or `down`
    #[arg(short, long)]
    refund: Option<RefundPolicy>,

    /// Base seed; game N uses seed + N
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting money per player
    #[arg(long)]
    money: Option<i64>,

    /// Per-decision timeout for process agents, in milliseconds
    #[arg(long = "timeout-ms")]
    timeout_ms: Option<u64>,

    /// JSON game configuration; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Agent for the next seat: `random` or a command line to run
    #[arg(short, long = "agent")]
    agents: Vec<String>,

    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => GameConfig::default(),
        };
        if let Some(players) = self.players {
            config.player_count = players;
        }
        if let Some(refund) = self.refund {
            config.refund_policy = refund;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(money) = self.money {
            config.starting_money = money;
        }
        if let Some(timeout) = self.timeout_ms {
            config = config.with_agent_timeout(Duration::from_millis(timeout));
        }
        config.validate()?;
        Ok(config)
    }

    fn seat_agents(&self, config: &GameConfig) -> Result<Vec<Box<dyn DecisionAgent>>, Box<dyn Error>> {
        if self.agents.len() > config.player_count {
            return Err(format!("{} agents given for {} players", self.agents.len(), config.player_count).into());
        }

        let rng = GameRng::new(config.seed);
        let seats = PlayerMap::new(config.player_count, |seat| self.agents.get(seat.index()).cloned());
        let mut agents: Vec<Box<dyn DecisionAgent>> = Vec::with_capacity(config.player_count);
        for (seat, command) in seats.iter() {
            let agent: Box<dyn DecisionAgent> = match command.as_deref() {
                None | Some("random") => Box::new(RandomAgent::new(rng.for_context(&format!("agent-{}", seat.index())))),
                Some(command) => Box::new(ProcessAgent::from_command_line(command, config.agent_timeout())?),
            };
            log::info!("{} plays as {}", seat, agent.label());
            agents.push(agent);
        }
        Ok(agents)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let base = args.game_config()?;
    let mut wins = vec![0u32; base.player_count];

    for game_index in 0..args.games {
        let config = base.clone().with_seed(base.seed.wrapping_add(u64::from(game_index)));
        let agents = args.seat_agents(&config)?;
        let mut game = ForSaleGame::builder(config).agents(agents).build()?;
        let report = game.play()?;
        wins[report.winner.index()] += 1;

        if args.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            if args.games > 1 {
                println!("Game {}", game_index + 1);
            }
            println!("{}\n", report);
        }
    }

    if args.games > 1 && !args.json {
        println!("Wins after {} games:", args.games);
        for (seat, count) in wins.iter().enumerate() {
            println!("  Player {}: {}", seat + 1, count);
        }
    }
    Ok(())
}
