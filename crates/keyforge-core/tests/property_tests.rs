use keyforge_core::config::Config;
use keyforge_core::corpus::TextData;
use keyforge_core::layout::{gen_keymap, Layout, Position};
use keyforge_core::metrics::Flags;
use keyforge_core::optimizer::greedy::greedy_improve;
use keyforge_core::scorer::Scorer;
use proptest::prelude::*;
use std::collections::HashMap;

const TEMPLATE: &str = "\
template
q w e r t y u i o p
a s d f g h j k l ;
z x c v b n m , . /
0 1 2 3 4 4 3 2 1 0
0 1 2 3 3 4 4 3 2 1
0 1 2 3 3 4 4 3 2 1
";

fn shuffled_layout(seed: u64) -> Layout {
    let mut layout = Layout::load(TEMPLATE, 0.0).unwrap();
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut flat: Vec<String> = layout.keys.iter().flatten().cloned().collect();
    rng.shuffle(&mut flat);
    let mut it = flat.into_iter();
    for row in layout.keys.iter_mut() {
        for cell in row.iter_mut() {
            *cell = it.next().unwrap();
        }
    }
    layout.keymap = gen_keymap(&layout.keys);
    layout
}

fn flat_corpus() -> TextData {
    let mut letters = HashMap::new();
    let mut bigrams = HashMap::new();
    for c in "abcdefghijklmnopqrstuvwxyz.,/;'".chars() {
        letters.insert(c.to_string(), 1000);
        for d in "abcdefghijklmnopqrstuvwxyz.,/;'".chars() {
            bigrams.insert(format!("{c}{d}"), 10);
        }
    }
    TextData {
        letters,
        bigrams,
        skipgrams: HashMap::new(),
        trigrams: HashMap::new(),
        top_trigrams: Vec::new(),
        total: 31000.0,
        total_bigrams: 31.0 * 31.0 * 10.0,
    }
}

prop_compose! {
    fn arb_layout()(seed in any::<u64>()) -> Layout {
        shuffled_layout(seed)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Swapping the same pair of positions twice always returns to the
    /// starting keymap/key grid, regardless of which layout or positions.
    #[test]
    fn test_swap_twice_undoes_itself(layout in arb_layout(), i in 0usize..30, j in 0usize..30) {
        let before = layout.clone();
        let mut layout = layout;
        let a = Position::new(i % 10, i / 10);
        let b = Position::new(j % 10, j / 10);

        layout.swap(a, b);
        layout.swap(a, b);

        prop_assert_eq!(layout.keys, before.keys);
        prop_assert_eq!(layout.keymap, before.keymap);
    }

    /// `deep_copy` shares no mutable state with its source: mutating the
    /// copy never changes the original.
    #[test]
    fn test_deep_copy_is_independent_of_mutation(layout in arb_layout(), i in 0usize..30, j in 0usize..30) {
        let original = layout.clone();
        let mut copy = layout.deep_copy();
        let a = Position::new(i % 10, i / 10);
        let b = Position::new(j % 10, j / 10);
        copy.swap(a, b);

        prop_assert_eq!(original.keys, layout.keys);
        if a != b {
            prop_assert_ne!(copy.keys, layout.keys);
        }
    }

    /// `greedy_improve` only ever keeps a swap on strict improvement, so the
    /// score after running it is never worse than before.
    #[test]
    fn test_greedy_improve_rejects_non_improving_swaps(layout in arb_layout(), seed in any::<u64>()) {
        let config = Config::default();
        let data = flat_corpus();
        let scorer = Scorer::new(&config, &data);
        let flags = Flags::default();

        let mut layout = layout;
        let before = scorer.score(&layout, &flags);

        let mut rng = fastrand::Rng::with_seed(seed);
        greedy_improve(&mut layout, &scorer, &[], &flags, &mut rng);

        let after = scorer.score(&layout, &flags);
        prop_assert!(after <= before);
    }
}
