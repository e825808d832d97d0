use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use vsrdle::sim::{synthetic_roster, AlwaysCorrect, AlwaysWrong, ChoicePolicy, RandomChoice};
use vsrdle::sim::{SelfPlay, SelfPlayConfig};
use vsrdle::{CharacterPool, EngineConfig, GameMode, MemoryStore, Session, Settings, TierLadder};

#[derive(Parser)]
#[command(version, about = "Play simulated vsrdle rounds and print a JSON report")]
struct Cli {
    /// Round type to play.
    #[arg(short, long, value_enum, default_value_t = Mode::Classic)]
    mode: Mode,

    /// Rounds to play.
    #[arg(short, long, default_value_t = 100)]
    rounds: u32,

    /// Drop Tier 0 and require Classic pairs exactly three tiers apart.
    #[arg(long)]
    very_hard: bool,

    /// Seed for the engines and the policy.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Characters generated per tier.
    #[arg(long, default_value_t = 3)]
    per_tier: usize,

    /// Simulated player.
    #[arg(short, long, value_enum, default_value_t = Policy::Random)]
    policy: Policy,

    /// Restart the run when the pool is exhausted.
    #[arg(long)]
    restart: bool,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Classic,
    OddOneOut,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Classic => GameMode::Classic,
            Mode::OddOneOut => GameMode::OddOneOut,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    Correct,
    Wrong,
    Random,
}

impl Policy {
    fn build(self) -> Box<dyn ChoicePolicy> {
        match self {
            Policy::Correct => Box::new(AlwaysCorrect),
            Policy::Wrong => Box::new(AlwaysWrong),
            Policy::Random => Box::new(RandomChoice),
        }
    }
}

const ORIGINS: &[&str] = &["Saga", "Epic", "Myth", "Chronicle", "Legend"];

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = vsrdle::logging::init_logging(cli.verbose) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let ladder = TierLadder::standard();
    let pool = CharacterPool::new(synthetic_roster(&ladder, cli.per_tier, ORIGINS));

    let mut config = EngineConfig::default();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut session = Session::with_store(pool, ladder, MemoryStore::new(), config);
    session.set_mode(cli.mode.into());
    session.apply_settings(Settings::default().with_very_hard_mode(cli.very_hard));

    let self_play = SelfPlay::new(
        SelfPlayConfig::new()
            .with_rounds(cli.rounds)
            .with_restart_on_failure(cli.restart)
            .with_seed(cli.seed.unwrap_or_default()),
    );
    let mut policy = cli.policy.build();
    let report = self_play.run(&mut session, policy.as_mut());

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to encode report: {e}");
            ExitCode::FAILURE
        }
    }
}
