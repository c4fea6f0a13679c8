use blockfall::cli::{parse_args, Command, PlayConfig};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn no_arguments_plays_with_clock_seed() {
    assert_eq!(
        parse_args(&[]).unwrap(),
        Command::Play(PlayConfig { seed: None })
    );
}

#[test]
fn seed_is_parsed() {
    assert_eq!(
        parse_args(&args(&["--seed", "12345"])).unwrap(),
        Command::Play(PlayConfig { seed: Some(12345) })
    );
}

#[test]
fn help_wins_over_other_flags() {
    assert_eq!(
        parse_args(&args(&["--seed", "1", "--help"])).unwrap(),
        Command::Help
    );
    assert_eq!(parse_args(&args(&["-h"])).unwrap(), Command::Help);
}

#[test]
fn bad_arguments_are_errors() {
    let err = parse_args(&args(&["--seed"])).unwrap_err();
    assert!(err.to_string().contains("missing value for --seed"));

    let err = parse_args(&args(&["--seed", "-3"])).unwrap_err();
    assert!(err.to_string().contains("invalid --seed value"));

    let err = parse_args(&args(&["--port", "7777"])).unwrap_err();
    assert!(err.to_string().contains("unknown argument"));
}
