use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use marjapussi_bot::{Agent, PolicyKind};
use marjapussi_core::belief::ObservationError;
use marjapussi_core::game::deal::{ActionError, DealSetup, DealState};
use marjapussi_core::model::deck::Deck;
use marjapussi_core::model::player::{PlayerPosition, Side};
use marjapussi_core::model::suit::Suit;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary, side_label};
use crate::config::{BenchmarkConfig, PolicyConfig, ResolvedOutputs};
use crate::scoring::{DealScore, score_deal};

/// Plays many isolated deals between the two configured policies.
pub struct MatchRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    kinds: [PolicyKind; 2],
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub analytics: AnalyticsSummary,
}

/// Result of one finished deal.
pub struct DealOutcome {
    pub game_index: usize,
    pub deal_seed: u64,
    pub declarer: PlayerPosition,
    pub score: DealScore,
    pub tricks_won: [usize; 2],
    pub announcements: Vec<(PlayerPosition, Suit)>,
    pub actions: usize,
}

impl MatchRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let kinds = [
            policy_kind(&config.policies.a)?,
            policy_kind(&config.policies.b)?,
        ];
        Ok(Self {
            config,
            outputs,
            kinds,
        })
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let base_seed = self.config.deals.seed.unwrap_or(0);
        let mut rng = StdRng::seed_from_u64(base_seed);
        let mut agents = self.seat_agents(base_seed);
        let mut analytics = AnalyticsCollector::new(&self.config)?;
        let mut rows_written = 0usize;

        for game_index in 0..self.config.deals.games {
            let deal_seed = rng.next_u64();
            let outcome = self.play_deal(game_index, deal_seed, &mut agents)?;
            analytics.record_deal(&outcome);
            write_deal_row(&mut writer, &self.config, &outcome)?;
            rows_written += 1;
        }

        writer.flush()?;

        let analytics = analytics.finalize()?;
        analytics.write_markdown(&self.outputs.summary_md, &self.config.run_id)?;

        Ok(RunSummary {
            games_played: self.config.deals.games,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            analytics,
        })
    }

    /// Policies `a` sit North/South and `b` East/West. Each seat owns its
    /// policy for the whole run; trackers are reset per deal.
    fn seat_agents(&self, base_seed: u64) -> Vec<Agent> {
        PlayerPosition::LOOP
            .into_iter()
            .map(|seat| {
                let (kind, cfg) = match seat.side() {
                    Side::NorthSouth => (self.kinds[0], &self.config.policies.a),
                    Side::EastWest => (self.kinds[1], &self.config.policies.b),
                };
                let seed = cfg
                    .seed
                    .unwrap_or(base_seed)
                    .wrapping_add(seat.index() as u64);
                Agent::new(seat, &[], kind.build(seed))
            })
            .collect()
    }

    fn play_deal(
        &self,
        game_index: usize,
        deal_seed: u64,
        agents: &mut [Agent],
    ) -> Result<DealOutcome, RunnerError> {
        let declarer = PlayerPosition::LOOP[game_index % 4];
        let setup = DealSetup {
            declarer,
            game_value: self.config.deals.game_value,
        };
        let mut deal = DealState::deal(&Deck::shuffled_with_seed(deal_seed), setup);
        for agent in agents.iter_mut() {
            agent.reset(deal.hand(agent.seat()).cards());
        }

        while let Some(seat) = deal.player_at_turn() {
            let legal = deal.legal_actions();
            let action = agents[seat.index()]
                .next_action(&legal)
                .ok_or(RunnerError::NoAction { game_index, seat })?;
            deal.act_action(action)
                .map_err(|source| RunnerError::Action { game_index, source })?;
            for agent in agents.iter_mut() {
                agent
                    .observe_action(&action)
                    .map_err(|source| RunnerError::Observation { game_index, source })?;
            }
        }

        let summary = deal
            .summary()
            .ok_or(RunnerError::Unfinished { game_index })?;
        let score = score_deal(&summary);
        let mut tricks_won = [0usize; 2];
        for completed in &summary.tricks {
            tricks_won[side_index(completed.winner.side())] += 1;
        }

        event!(
            target: "marjapussi_bench::deal",
            Level::INFO,
            game_index,
            deal_seed,
            declarer = %declarer,
            declaring_points = score.declaring_points,
            defending_points = score.defending_points,
            declarer_won = score.declarer_won,
        );

        Ok(DealOutcome {
            game_index,
            deal_seed,
            declarer,
            score,
            tricks_won,
            announcements: summary.announcements,
            actions: deal.history().len(),
        })
    }
}

fn policy_kind(cfg: &PolicyConfig) -> Result<PolicyKind, RunnerError> {
    cfg.policy_kind().map_err(|err| RunnerError::Config {
        message: err.to_string(),
    })
}

fn side_index(side: Side) -> usize {
    match side {
        Side::NorthSouth => 0,
        Side::EastWest => 1,
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_deal_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    outcome: &DealOutcome,
) -> Result<(), RunnerError> {
    let declaring = outcome.score.declaring_side;
    let declaring_policy = match declaring {
        Side::NorthSouth => &config.policies.a.name,
        Side::EastWest => &config.policies.b.name,
    };
    let row = DealLogRow {
        run_id: config.run_id.clone(),
        deal_id: format!("G{:05}", outcome.game_index),
        game_index: outcome.game_index,
        deal_seed: outcome.deal_seed,
        declarer: outcome.declarer.to_string(),
        declaring_side: side_label(declaring).to_string(),
        declaring_policy: declaring_policy.clone(),
        game_value: outcome.score.game_value,
        points_a: outcome.score.points_for(Side::NorthSouth),
        points_b: outcome.score.points_for(Side::EastWest),
        seat_points: outcome.score.seat_points,
        tricks_a: outcome.tricks_won[0],
        tricks_b: outcome.tricks_won[1],
        declarer_won: outcome.score.declarer_won,
        announcements: outcome
            .announcements
            .iter()
            .map(|(seat, suit)| format!("{seat}:{}", suit.symbol()))
            .collect(),
        actions: outcome.actions,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Serialize)]
struct DealLogRow {
    run_id: String,
    deal_id: String,
    game_index: usize,
    deal_seed: u64,
    declarer: String,
    declaring_side: String,
    declaring_policy: String,
    game_value: u32,
    points_a: u32,
    points_b: u32,
    /// North, East, South, West.
    seat_points: [u32; 4],
    tricks_a: usize,
    tricks_b: usize,
    declarer_won: bool,
    announcements: Vec<String>,
    actions: usize,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("configuration error: {message}")]
    Config { message: String },
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game {game_index}: {seat} had no action to offer")]
    NoAction {
        game_index: usize,
        seat: PlayerPosition,
    },
    #[error("game {game_index}: rejected action: {source}")]
    Action {
        game_index: usize,
        #[source]
        source: ActionError,
    },
    #[error("game {game_index}: tracker rejected observation: {source}")]
    Observation {
        game_index: usize,
        #[source]
        source: ObservationError,
    },
    #[error("game {game_index} ended without a summary")]
    Unfinished { game_index: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DealConfig, LoggingConfig, OutputsConfig, PoliciesConfig};

    fn config(games: usize) -> BenchmarkConfig {
        BenchmarkConfig {
            run_id: "unit".to_string(),
            deals: DealConfig {
                seed: Some(9),
                games,
                game_value: 120,
            },
            policies: PoliciesConfig {
                a: PolicyConfig {
                    name: "rand".to_string(),
                    kind: "random".to_string(),
                    seed: Some(1),
                },
                b: PolicyConfig {
                    name: "stand".to_string(),
                    kind: "standing".to_string(),
                    seed: None,
                },
            },
            outputs: OutputsConfig {
                jsonl: "unused.jsonl".to_string(),
                summary_md: "unused.md".to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn declarer_rotates_through_seats() {
        let cfg = config(4);
        let runner = MatchRunner::new(cfg.clone(), cfg.resolved_outputs()).unwrap();
        let mut agents = runner.seat_agents(9);
        for game_index in 0..4 {
            let outcome = runner
                .play_deal(game_index, 100 + game_index as u64, &mut agents)
                .unwrap();
            assert_eq!(outcome.declarer, PlayerPosition::LOOP[game_index]);
            assert_eq!(outcome.tricks_won[0] + outcome.tricks_won[1], 9);
            assert!(outcome.actions >= 44);
        }
    }

    #[test]
    fn agents_follow_configured_sides() {
        let cfg = config(1);
        let runner = MatchRunner::new(cfg.clone(), cfg.resolved_outputs()).unwrap();
        let names: Vec<&str> = runner
            .seat_agents(0)
            .iter()
            .map(|agent| agent.policy_name())
            .collect();
        assert_eq!(names, ["random", "standing", "random", "standing"]);
    }

    #[test]
    fn unknown_policy_kind_is_rejected() {
        let mut cfg = config(1);
        cfg.policies.b.kind = "psychic".to_string();
        let outputs = cfg.resolved_outputs();
        assert!(matches!(
            MatchRunner::new(cfg, outputs),
            Err(RunnerError::Config { .. })
        ));
    }
}
