use serde_json::Value;
use serial_test::serial;
use thirteen_cli::run;

fn clear_env() {
    unsafe {
        std::env::remove_var("THIRTEEN_CONFIG");
        std::env::remove_var("THIRTEEN_SEED");
        std::env::remove_var("THIRTEEN_NODE");
    }
}

fn sim(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["thirteen", "sim"];
    argv.extend_from_slice(args);
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

/// Parsed lines with the wall-clock fields removed.
fn stable_lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .map(|l| {
            let mut v: Value = serde_json::from_str(l).expect("every line is JSON");
            if let Some(obj) = v.as_object_mut() {
                obj.remove("ts");
                obj.remove("battle_id");
            }
            v
        })
        .collect()
}

#[test]
#[serial]
fn emits_round_lines_and_one_summary_per_battle() {
    clear_env();
    let (code, stdout, stderr) = sim(&["--battles", "2", "--seed", "42"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let lines = stable_lines(&stdout);
    let summaries: Vec<&Value> = lines
        .iter()
        .filter(|v| v.get("battle_end_reason").is_some() && v.get("result").is_none())
        .collect();
    assert_eq!(summaries.len(), 2);
    for s in &summaries {
        let reason = s["battle_end_reason"].as_str().expect("battle finished");
        assert!(reason == "PLAYER_WIN" || reason == "ENEMY_WIN");
    }
    let rounds: Vec<&Value> = lines.iter().filter(|v| v.get("result").is_some()).collect();
    assert!(!rounds.is_empty());
    assert_eq!(rounds[0]["round"], 1);
    assert!(rounds[0]["result"]["outcome"].is_string());
}

#[test]
#[serial]
fn same_seed_same_stream() {
    clear_env();
    let (_, a, _) = sim(&["--seed", "7"]);
    let (_, b, _) = sim(&["--seed", "7"]);
    assert_eq!(stable_lines(&a), stable_lines(&b));
}

#[test]
#[serial]
fn seed_can_come_from_the_environment() {
    clear_env();
    unsafe {
        std::env::set_var("THIRTEEN_SEED", "9");
    }
    let (code, from_env, _) = sim(&[]);
    clear_env();
    assert_eq!(code, 0);
    let (_, explicit, _) = sim(&["--seed", "9"]);
    assert_eq!(stable_lines(&from_env), stable_lines(&explicit));
}

#[test]
#[serial]
fn boss_node_fights_the_scarecrow() {
    clear_env();
    let (code, stdout, stderr) = sim(&["--seed", "3", "--node", "boss_d1"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stderr.is_empty());
    let lines = stable_lines(&stdout);
    let enemy_hp = lines[0]["enemy_hp"].as_u64().unwrap();
    assert!(enemy_hp <= 30);
    let summary = lines.last().unwrap();
    assert!(summary["battle_end_reason"].is_string());
}

#[test]
#[serial]
fn unknown_node_warns_and_fights_an_ordinary_enemy() {
    clear_env();
    let (code, _, stderr) = sim(&["--seed", "3", "--node", "swamp_9"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("WARNING: node swamp_9 has no boss"));
}

#[test]
#[serial]
fn chacha_source_runs() {
    clear_env();
    let (code, stdout, _) = sim(&["--seed", "5", "--rng", "chacha"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("battle_end_reason"));
}

#[test]
#[serial]
fn zero_battles_is_an_error() {
    clear_env();
    let (code, stdout, stderr) = sim(&["--battles", "0"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("battles must be >= 1"));
}
