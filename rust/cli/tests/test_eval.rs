use thirteen_cli::run;

fn eval(args: &[&str]) -> (i32, String, String) {
    let mut argv = vec!["thirteen", "eval"];
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

#[test]
fn ace_and_six_is_perfect() {
    let (code, stdout, _) = eval(&["A", "6"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cards: A,6"));
    assert!(stdout.contains("sum: 13"));
    assert!(stdout.contains("perfect: true"));
    assert!(stdout.contains("bust: false"));
}

#[test]
fn overshoot_is_bust() {
    let (code, stdout, _) = eval(&["6", "6", "5"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("sum: 17"));
    assert!(stdout.contains("bust: true"));
}

#[test]
fn straw_flag_elevates_first_straw() {
    let (_, plain, _) = eval(&["6", "6", "0"]);
    assert!(plain.contains("sum: 12"));
    let (code, boosted, _) = eval(&["6", "6", "0", "--straw-as-one"]);
    assert_eq!(code, 0);
    assert!(boosted.contains("sum: 13"));
}

#[test]
fn unknown_rank_exits_two() {
    let (code, stdout, stderr) = eval(&["K"]);
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown card rank: K"));
}

#[test]
fn missing_cards_shows_usage() {
    let (code, _, stderr) = eval(&[]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Usage: thirteen <command> [options]"));
}

#[test]
fn help_goes_to_stdout() {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(["thirteen", "--help"], &mut out, &mut err);
    assert_eq!(code, 0);
    assert!(String::from_utf8_lossy(&out).contains("sim"));
}
