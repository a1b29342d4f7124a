use keyforge_core::layout::Finger;
use rstest::rstest;

#[rstest]
#[case(0, Finger::LeftPinky)]
#[case(1, Finger::LeftRing)]
#[case(2, Finger::LeftMiddle)]
#[case(3, Finger::LeftIndex)]
#[case(4, Finger::RightIndex)]
#[case(5, Finger::RightMiddle)]
#[case(6, Finger::RightRing)]
#[case(7, Finger::RightPinky)]
fn test_from_u8_round_trips_every_valid_finger(#[case] code: u8, #[case] expected: Finger) {
    assert_eq!(Finger::from_u8(code).unwrap(), expected);
}

#[rstest]
#[case(8)]
#[case(9)]
#[case(255)]
fn test_from_u8_rejects_out_of_range_codes(#[case] code: u8) {
    assert!(Finger::from_u8(code).is_err());
}

#[rstest]
#[case(Finger::LeftPinky, true)]
#[case(Finger::LeftIndex, true)]
#[case(Finger::RightIndex, false)]
#[case(Finger::RightPinky, false)]
fn test_is_left_matches_hand_split(#[case] finger: Finger, #[case] expected: bool) {
    assert_eq!(finger.is_left(), expected);
}

#[rstest]
#[case(Finger::LeftIndex, true)]
#[case(Finger::RightIndex, true)]
#[case(Finger::LeftMiddle, false)]
#[case(Finger::RightPinky, false)]
fn test_is_index_matches_only_the_two_index_fingers(#[case] finger: Finger, #[case] expected: bool) {
    assert_eq!(finger.is_index(), expected);
}
