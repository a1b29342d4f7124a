use keyforge_protocol::{parse_interactive, parse_normal, take_flags, ColumnRef, InteractiveCommand, NormalCommand};

#[test]
fn test_take_flags_splits_leading_flags_from_tokens() {
    let (flags, tokens) = take_flags("--stagger --dynamic analyze qwerty").unwrap();
    assert!(flags.stagger);
    assert!(flags.dynamic);
    assert!(!flags.slide);
    assert_eq!(tokens, vec!["analyze", "qwerty"]);
}

#[test]
fn test_take_flags_stops_at_first_non_flag_token() {
    let (flags, tokens) = take_flags("rank --stagger").unwrap();
    assert!(!flags.stagger);
    assert_eq!(tokens, vec!["rank", "--stagger"]);
}

#[test]
fn test_take_flags_rejects_unknown_flag() {
    let err = take_flags("--turbo rank").unwrap_err();
    assert!(err.to_string().contains("turbo"));
}

#[test]
fn test_parse_normal_short_aliases() {
    assert_eq!(parse_normal(&["r"]).unwrap(), NormalCommand::Rank);
    assert_eq!(
        parse_normal(&["a", "qwerty"]).unwrap(),
        NormalCommand::Analyze { layout: "qwerty".to_string() }
    );
    assert_eq!(parse_normal(&["g"]).unwrap(), NormalCommand::Generate);
}

#[test]
fn test_parse_normal_optional_count_argument() {
    assert_eq!(
        parse_normal(&["sfbs", "qwerty"]).unwrap(),
        NormalCommand::Sfbs { layout: "qwerty".to_string(), n: None }
    );
    assert_eq!(
        parse_normal(&["sfbs", "qwerty", "20"]).unwrap(),
        NormalCommand::Sfbs { layout: "qwerty".to_string(), n: Some(20) }
    );
}

#[test]
fn test_parse_normal_missing_argument_is_an_error() {
    let err = parse_normal(&["analyze"]).unwrap_err();
    assert!(err.to_string().contains("LAYOUT"));
}

#[test]
fn test_parse_normal_unknown_command() {
    let err = parse_normal(&["frobnicate"]).unwrap_err();
    assert!(err.to_string().contains("frobnicate"));
}

#[test]
fn test_parse_normal_empty_line_is_an_error() {
    assert!(parse_normal(&[]).is_err());
}

#[test]
fn test_parse_interactive_swap() {
    assert_eq!(
        parse_interactive(&["s", "j", "f"]).unwrap(),
        InteractiveCommand::Swap { k1: "j".to_string(), k2: "f".to_string() }
    );
}

#[test]
fn test_parse_interactive_column_swap_accepts_index_or_grapheme() {
    assert_eq!(
        parse_interactive(&["cs", "2", "j"]).unwrap(),
        InteractiveCommand::ColumnSwap { x: ColumnRef::Index(2), y: ColumnRef::Grapheme("j".to_string()) }
    );
}

#[test]
fn test_parse_interactive_suggest_depth_defaults_to_none() {
    assert_eq!(parse_interactive(&["g"]).unwrap(), InteractiveCommand::Suggest { max_depth: None });
    assert_eq!(parse_interactive(&["g", "3"]).unwrap(), InteractiveCommand::Suggest { max_depth: Some(3) });
}

#[test]
fn test_parse_interactive_minimize_recursion_levels() {
    assert_eq!(parse_interactive(&["m"]).unwrap(), InteractiveCommand::Minimize { recursion: 0 });
    assert_eq!(parse_interactive(&["m2"]).unwrap(), InteractiveCommand::Minimize { recursion: 1 });
}

#[test]
fn test_parse_interactive_quit() {
    assert_eq!(parse_interactive(&["q"]).unwrap(), InteractiveCommand::Quit);
}
