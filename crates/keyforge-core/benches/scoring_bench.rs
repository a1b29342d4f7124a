// ===== keyforge-core/benches/scoring_bench.rs =====
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keyforge_core::config::Config;
use keyforge_core::corpus::TextData;
use keyforge_core::layout::Layout;
use keyforge_core::metrics::Flags;
use keyforge_core::scorer::Scorer;
use std::collections::HashMap;

const LAYOUT_TEXT: &str = "\
qwerty
q w e r t y u i o p
a s d f g h j k l ;
z x c v b n m , . /
0 1 2 3 4 4 3 2 1 0
0 1 2 3 3 4 4 3 2 1
0 1 2 3 3 4 4 3 2 1
";

fn setup_corpus() -> TextData {
    let mut letters = HashMap::new();
    let mut bigrams = HashMap::new();
    let mut trigrams = HashMap::new();
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz.,/;'".chars().collect();
    for &c in &alphabet {
        letters.insert(c.to_string(), 1000);
    }
    for &a in &alphabet {
        for &b in &alphabet {
            bigrams.insert(format!("{a}{b}"), 50);
        }
    }
    let mut count = 0u64;
    'outer: for &a in &alphabet {
        for &b in &alphabet {
            for &c in &alphabet {
                if count >= 3000 {
                    break 'outer;
                }
                trigrams.insert(format!("{a}{b}{c}"), 10);
                count += 1;
            }
        }
    }

    TextData {
        letters,
        bigrams,
        skipgrams: HashMap::new(),
        trigrams,
        top_trigrams: Vec::new(),
        total: 31000.0,
        total_bigrams: alphabet.len() as f64 * alphabet.len() as f64 * 50.0,
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let config = Config::default();
    let data = setup_corpus();
    let layout = Layout::load(LAYOUT_TEXT, data.total).unwrap();
    let scorer = Scorer::new(&config, &data);
    let flags = Flags::default();

    c.bench_function("score qwerty (3k trigrams)", |b| {
        b.iter(|| scorer.score(black_box(&layout), black_box(&flags)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
