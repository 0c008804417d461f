use std::fs;
use std::path::Path;

use marjapussi_bot::PolicyKind;
use marjapussi_core::model::player::Side;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::BenchmarkConfig;
use crate::runner::DealOutcome;

const CONFIDENCE_LEVEL: f64 = 0.95;
const INSUFFICIENT: &str = "insufficient data";

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid policy configuration: {0}")]
    Policy(String),
    #[error("statistics failure: {0}")]
    Stats(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-deal outcomes for both partnerships.
pub struct AnalyticsCollector {
    sides: [SideAccumulator; 2],
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Result<Self, AnalyticsError> {
        let kind_a = config
            .policies
            .a
            .policy_kind()
            .map_err(|err| AnalyticsError::Policy(err.to_string()))?;
        let kind_b = config
            .policies
            .b
            .policy_kind()
            .map_err(|err| AnalyticsError::Policy(err.to_string()))?;
        Ok(Self {
            sides: [
                SideAccumulator::new(config.policies.a.name.clone(), kind_a, Side::NorthSouth),
                SideAccumulator::new(config.policies.b.name.clone(), kind_b, Side::EastWest),
            ],
        })
    }

    pub fn record_deal(&mut self, outcome: &DealOutcome) {
        for acc in &mut self.sides {
            let declared = outcome.score.declaring_side == acc.side;
            acc.record(
                f64::from(outcome.score.points_for(acc.side)),
                declared,
                declared && outcome.score.declarer_won,
            );
        }
    }

    pub fn finalize(self) -> Result<AnalyticsSummary, AnalyticsError> {
        let z = Normal::new(0.0, 1.0)
            .map_err(|err| AnalyticsError::Stats(err.to_string()))?
            .inverse_cdf(0.5 + CONFIDENCE_LEVEL / 2.0);
        let [a, b] = self.sides;
        Ok(AnalyticsSummary {
            sides: vec![a.into_report(z), b.into_report(z)],
        })
    }
}

struct SideAccumulator {
    name: String,
    kind: PolicyKind,
    side: Side,
    games: usize,
    declared: usize,
    declared_won: usize,
    per_game_points: Vec<f64>,
}

impl SideAccumulator {
    fn new(name: String, kind: PolicyKind, side: Side) -> Self {
        Self {
            name,
            kind,
            side,
            games: 0,
            declared: 0,
            declared_won: 0,
            per_game_points: Vec::new(),
        }
    }

    fn record(&mut self, points: f64, declared: bool, won: bool) {
        self.games += 1;
        self.per_game_points.push(points);
        if declared {
            self.declared += 1;
        }
        if won {
            self.declared_won += 1;
        }
    }

    fn into_report(self, z: f64) -> SideReport {
        let win_rate = (self.declared > 0).then(|| self.declared_won as f64 / self.declared as f64);
        let win_ci95 = win_rate.map(|rate| proportion_interval(rate, self.declared, z));
        let avg_points = (self.games > 0)
            .then(|| self.per_game_points.iter().sum::<f64>() / self.games as f64);
        let points_ci95 = mean_interval(&self.per_game_points, z);

        SideReport {
            name: self.name,
            kind: self.kind.as_str().to_string(),
            side: side_label(self.side).to_string(),
            games: self.games,
            declared: self.declared,
            declared_won: self.declared_won,
            declared_lost: self.declared - self.declared_won,
            win_rate,
            win_ci95,
            avg_points,
            points_ci95,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SideReport {
    pub name: String,
    pub kind: String,
    pub side: String,
    pub games: usize,
    pub declared: usize,
    pub declared_won: usize,
    pub declared_lost: usize,
    /// `None` when the side never declared.
    pub win_rate: Option<f64>,
    pub win_ci95: Option<(f64, f64)>,
    pub avg_points: Option<f64>,
    pub points_ci95: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub sides: Vec<SideReport>,
}

impl AnalyticsSummary {
    /// `(won, lost)` as declarer, per side.
    pub fn declared_records(&self) -> Vec<(usize, usize)> {
        self.sides
            .iter()
            .map(|side| (side.declared_won, side.declared_lost))
            .collect()
    }

    pub fn render_markdown(&self, run_id: &str) -> String {
        let mut rows = String::new();
        rows.push_str(&format!("# Match Summary: {run_id}\n\n"));
        rows.push_str("| Policy | Kind | Side | Games | Declared | Won | Lost | Win % | 95% CI | Avg points | Points 95% CI |\n");
        rows.push_str("|--------|------|------|-------|----------|-----|------|-------|--------|------------|----------------|\n");

        for side in &self.sides {
            let win = side
                .win_rate
                .map_or_else(|| INSUFFICIENT.to_string(), |rate| format!("{:.1}%", rate * 100.0));
            let win_ci = side.win_ci95.map_or_else(
                || INSUFFICIENT.to_string(),
                |(low, high)| format!("[{:.1}%, {:.1}%]", low * 100.0, high * 100.0),
            );
            let avg = side
                .avg_points
                .map_or_else(|| INSUFFICIENT.to_string(), |avg| format!("{avg:.2}"));
            let points_ci = side.points_ci95.map_or_else(
                || INSUFFICIENT.to_string(),
                |(low, high)| format!("[{low:.2}, {high:.2}]"),
            );

            rows.push_str(&format!(
                "| {name} | {kind} | {side_label} | {games} | {declared} | {won} | {lost} | {win} | {win_ci} | {avg} | {points_ci} |\n",
                name = side.name,
                kind = side.kind,
                side_label = side.side,
                games = side.games,
                declared = side.declared,
                won = side.declared_won,
                lost = side.declared_lost,
            ));
        }
        rows
    }

    pub fn write_markdown(
        &self,
        path: impl AsRef<Path>,
        run_id: &str,
    ) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.render_markdown(run_id)).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::NorthSouth => "north_south",
        Side::EastWest => "east_west",
    }
}

/// Normal-approximation interval for a proportion, clamped to [0, 1].
fn proportion_interval(rate: f64, samples: usize, z: f64) -> (f64, f64) {
    let margin = z * (rate * (1.0 - rate) / samples as f64).sqrt();
    ((rate - margin).max(0.0), (rate + margin).min(1.0))
}

fn mean_interval(points: &[f64], z: f64) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return Some((mean, mean));
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = z * std_error;
    Some((mean - margin, mean + margin))
}
