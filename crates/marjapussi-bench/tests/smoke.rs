use std::fs;

use marjapussi_bench::config::BenchmarkConfig;
use marjapussi_bench::runner::MatchRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path, games: usize) -> BenchmarkConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
deals:
  seed: 4242
  games: {games}
policies:
  a:
    name: "random"
    kind: "random"
    seed: 3
  b:
    name: "standing"
    kind: "standing"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("deals.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let mut cfg: BenchmarkConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_once(games: usize) -> (String, String, Vec<(usize, usize)>) {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), games);
    let outputs = config.resolved_outputs();

    let runner = MatchRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("run completes");
    assert_eq!(summary.games_played, games);
    assert_eq!(summary.rows_written, games);

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    (jsonl, markdown, summary.analytics.declared_records())
}

#[test]
fn smoke_run_writes_rows_and_summary() {
    let (jsonl, markdown, records) = run_once(8);
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    assert_eq!(rows.len(), 8);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row["run_id"], "test_smoke");
        assert_eq!(row["game_index"], index);
        assert_eq!(row["game_value"], 120);
        let tricks = row["tricks_a"].as_u64().unwrap() + row["tricks_b"].as_u64().unwrap();
        assert_eq!(tricks, 9);

        let seats: Vec<u64> = row["seat_points"]
            .as_array()
            .expect("seat points listed")
            .iter()
            .map(|points| points.as_u64().unwrap())
            .collect();
        assert_eq!(seats.len(), 4);
        let north_south = seats[0] + seats[2];
        let east_west = seats[1] + seats[3];
        assert_eq!(row["points_a"].as_u64().unwrap(), north_south);
        assert_eq!(row["points_b"].as_u64().unwrap(), east_west);
    }

    let declared: usize = records.iter().map(|(won, lost)| won + lost).sum();
    assert_eq!(declared, 8);
    assert_eq!(records[0].0 + records[0].1, 4);
    assert!(markdown.contains("| random | random | north_south |"));
    assert!(markdown.contains("| standing | standing | east_west |"));
}

#[test]
fn same_seed_reproduces_rows() {
    let (first, _, _) = run_once(4);
    let (second, _, _) = run_once(4);
    assert_eq!(first, second);
}

#[test]
fn single_game_leaves_one_side_without_data() {
    let (_, markdown, records) = run_once(1);
    assert_eq!(records[1], (0, 0));
    assert!(markdown.contains("insufficient data"));
}
