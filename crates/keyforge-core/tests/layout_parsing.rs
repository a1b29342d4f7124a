use keyforge_core::layout::{Finger, Layout, Position};

const SAMPLE: &str = "\
sample
q w e r t y u i o p
a s d f g h j k l ;
z x c v b n m , . /
0 1 2 3 4 4 3 2 1 0
0 1 2 3 3 4 4 3 2 1
0 1 2 3 3 4 4 3 2 1
";

#[test]
fn test_load_parses_name_keys_and_fingers() {
    let layout = Layout::load(SAMPLE, 0.0).unwrap();
    assert_eq!(layout.name, "sample");
    assert_eq!(layout.widths.0, [10, 10, 10]);
    assert_eq!(layout.grapheme_at(Position::new(0, 0)), "q");
    assert_eq!(layout.finger_at(Position::new(0, 0)), Some(Finger::LeftPinky));
    assert_eq!(layout.finger_at(Position::new(4, 0)), Some(Finger::RightIndex));
}

#[test]
fn test_load_rejects_short_input() {
    let err = Layout::load("just one line", 0.0).unwrap_err();
    assert!(err.to_string().contains("7 lines"));
}

#[test]
fn test_keymap_matches_key_grid() {
    let layout = Layout::load(SAMPLE, 0.0).unwrap();
    for pos in layout.positions() {
        let g = layout.grapheme_at(pos);
        assert_eq!(layout.keymap.get(g), Some(&pos));
    }
}

#[test]
fn test_swap_is_involutive() {
    let mut layout = Layout::load(SAMPLE, 0.0).unwrap();
    let a = Position::new(0, 0);
    let b = Position::new(5, 1);
    let before = layout.clone();

    layout.swap(a, b);
    assert_eq!(layout.grapheme_at(a), before.grapheme_at(b));
    assert_eq!(layout.grapheme_at(b), before.grapheme_at(a));
    assert_eq!(layout.keymap.get(before.grapheme_at(b)), Some(&a));

    layout.swap(a, b);
    assert_eq!(layout.grapheme_at(a), before.grapheme_at(a));
    assert_eq!(layout.grapheme_at(b), before.grapheme_at(b));
}

#[test]
fn test_swap_same_position_is_a_no_op() {
    let mut layout = Layout::load(SAMPLE, 0.0).unwrap();
    let before = layout.clone();
    let pos = Position::new(2, 2);
    layout.swap(pos, pos);
    assert_eq!(layout.grapheme_at(pos), before.grapheme_at(pos));
}

#[test]
fn test_duplicates_and_missing_against_full_alphabet() {
    // SAMPLE's 30 keys cover every alphabet character except the apostrophe,
    // which the standard 3x10 grid has no room for.
    let layout = Layout::load(SAMPLE, 0.0).unwrap();
    let (duplicates, missing) = layout.duplicates_and_missing();
    assert!(duplicates.is_empty());
    assert_eq!(missing, vec!["'".to_string()]);
}

#[test]
fn test_duplicates_and_missing_flags_a_dropped_grapheme() {
    let broken = SAMPLE.replacen("q ", "w ", 1);
    let layout = Layout::load(&broken, 0.0).unwrap();
    let (duplicates, missing) = layout.duplicates_and_missing();
    assert!(duplicates.contains(&"w".to_string()));
    assert!(missing.contains(&"q".to_string()));
}

#[test]
fn test_deep_copy_shares_no_mutable_state() {
    let layout = Layout::load(SAMPLE, 0.0).unwrap();
    let mut copy = layout.deep_copy();
    copy.swap(Position::new(0, 0), Position::new(1, 0));
    assert_ne!(layout.grapheme_at(Position::new(0, 0)), copy.grapheme_at(Position::new(0, 0)));
}
