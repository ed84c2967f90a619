//! Train the shared arena policy on the built-in demo arena.
//!
//! The demo arena is a deliberately small melee game: two teams of fighters
//! trade blows until one team is wiped out. It exists so the trainer can be
//! exercised end to end from the command line; a real game plugs in through
//! the same `TeamEnvironment` trait.

use clap::Parser;
use log::{error, info};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use ares::config::TrainerConfig;
use ares::env::{StepOutcome, TeamEnvironment, NUM_TEAMS};
use ares::error::Result;
use ares::trainer::Trainer;

const STARTING_HP: i32 = 3;
const HIT_REWARD: f32 = 0.5;
const KILL_REWARD: f32 = 1.0;

/// Demo actions: 0 guards (no effect), 1 strikes the first living enemy,
/// 2 strikes the weakest living enemy.
const ACTION_STRIKE_FIRST: usize = 1;
const ACTION_STRIKE_WEAKEST: usize = 2;
const DEMO_NUM_ACTIONS: usize = 3;

/// Two-team melee arena. The shared state vector holds every fighter's
/// hit points, normalized; eliminated fighters stay in the vector at zero.
struct DemoArena {
    hp: [Vec<i32>; NUM_TEAMS],
    team_size: usize,
    active: (usize, usize),
    rng: StdRng,
}

impl DemoArena {
    fn new(team_size: usize, seed: u64) -> Self {
        DemoArena {
            hp: [vec![STARTING_HP; team_size], vec![STARTING_HP; team_size]],
            team_size,
            active: (0, 0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn state(&self) -> Array1<f32> {
        let mut state = Array1::zeros(self.team_size * NUM_TEAMS);
        for (team, members) in self.hp.iter().enumerate() {
            for (i, &hp) in members.iter().enumerate() {
                state[team * self.team_size + i] = hp as f32 / STARTING_HP as f32;
            }
        }
        state
    }

    /// Index of the `slot`-th living fighter on a team.
    fn living(&self, team: usize, slot: usize) -> Option<usize> {
        self.hp[team]
            .iter()
            .enumerate()
            .filter(|(_, &hp)| hp > 0)
            .map(|(i, _)| i)
            .nth(slot)
    }

    fn strike(&mut self, enemy_team: usize, target: usize) -> f32 {
        self.hp[enemy_team][target] -= 1;
        if self.hp[enemy_team][target] == 0 {
            HIT_REWARD + KILL_REWARD
        } else {
            HIT_REWARD
        }
    }
}

impl TeamEnvironment for DemoArena {
    fn reset(&mut self) -> Array1<f32> {
        self.hp = [
            vec![STARTING_HP; self.team_size],
            vec![STARTING_HP; self.team_size],
        ];
        self.active = (0, 0);
        self.state()
    }

    fn step(&mut self, action: usize) -> StepOutcome {
        let (_slot, team) = self.active;
        let enemy_team = (team + 1) % NUM_TEAMS;

        let target = match action {
            ACTION_STRIKE_FIRST => self.living(enemy_team, 0),
            ACTION_STRIKE_WEAKEST => self
                .hp[enemy_team]
                .iter()
                .enumerate()
                .filter(|(_, &hp)| hp > 0)
                .min_by_key(|(_, &hp)| hp)
                .map(|(i, _)| i),
            _ => None,
        };

        let reward = match target {
            Some(target) => self.strike(enemy_team, target),
            None => 0.0,
        };
        let done = self.hp[enemy_team].iter().all(|&hp| hp <= 0);

        StepOutcome {
            next_state: self.state(),
            reward,
            done,
            truncated: false,
        }
    }

    fn sample_action(&mut self) -> usize {
        self.rng.gen_range(0..DEMO_NUM_ACTIONS)
    }

    fn state_dim(&self) -> usize {
        self.team_size * NUM_TEAMS
    }

    fn num_actions(&self) -> usize {
        DEMO_NUM_ACTIONS
    }

    fn team_len(&self, team: usize) -> usize {
        self.hp[team].iter().filter(|&&hp| hp > 0).count()
    }

    fn set_active(&mut self, slot: usize, team: usize) {
        // The slot addresses the slot-th living fighter; in this arena only
        // the acting team changes what a strike does.
        self.active = (slot, team);
    }
}

/// Train the shared arena policy on the demo arena.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a JSON training configuration. Missing fields use defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of epochs.
    #[arg(long)]
    epochs: Option<usize>,

    /// Override the number of episodes per epoch.
    #[arg(long)]
    episodes: Option<usize>,

    /// Override the RNG seed for the trainer's streams.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the value-network checkpoint path.
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Fighters per team in the demo arena.
    #[arg(long, default_value_t = 5)]
    team_size: usize,
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => TrainerConfig::from_path(path)?,
        None => TrainerConfig::default(),
    };
    if let Some(epochs) = cli.epochs {
        config.epochs = epochs;
    }
    if let Some(episodes) = cli.episodes {
        config.episodes_per_epoch = episodes;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(checkpoint) = cli.checkpoint {
        config.checkpoint = Some(checkpoint);
    }

    let env = DemoArena::new(cli.team_size, config.seed.wrapping_add(2));
    info!(
        "training on demo arena: {} fighters per team, {} epochs x {} episodes",
        cli.team_size, config.epochs, config.episodes_per_epoch
    );

    let mut trainer = Trainer::new(env, config)?;
    let stats = trainer.train()?;

    if let Some(last) = stats.last() {
        info!("finished: {}", last);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("training aborted: {}", err);
        std::process::exit(1);
    }
}
