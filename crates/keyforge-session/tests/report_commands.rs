use keyforge_session::Session;
use rstest::rstest;
use std::fs;
use std::io;
use tempfile::TempDir;

const LAYOUT_TEXT: &str = "\
qwerty
q w e r t y u i o p
a s d f g h j k l ;
z x c v b n m , . /
0 1 2 3 4 4 3 2 1 0
0 1 2 3 3 4 4 3 2 1
0 1 2 3 3 4 4 3 2 1
";

const TEMPLATE_TEXT: &str = "\
template
q w e r t y u i o p
a s d f g h j k l ;
z x c v b n m , . /
0 1 2 3 4 4 3 2 1 0
0 1 2 3 3 4 4 3 2 1
0 1 2 3 3 4 4 3 2 1
";

fn letters_json() -> String {
    let entries: Vec<String> = "qwertyuiopasdfghjkl;zxcvbnm,./"
        .chars()
        .map(|g| format!("\"{g}\": 100"))
        .collect();
    format!("{{{}}}", entries.join(","))
}

fn setup_root() -> TempDir {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("config.toml"), "[corpus]\nname = \"sample\"\n").unwrap();

    let corpora = root.path().join("corpora");
    fs::create_dir_all(&corpora).unwrap();
    let corpus_json = format!(
        "{{\"letters\": {}, \"bigrams\": {{}}, \"skipgrams\": {{}}, \"trigrams\": {{}}, \"topTrigrams\": [], \"total\": 3000.0, \"totalBigrams\": 0.0}}",
        letters_json()
    );
    fs::write(corpora.join("sample.json"), corpus_json).unwrap();

    let layouts = root.path().join("layouts");
    fs::create_dir_all(&layouts).unwrap();
    fs::write(layouts.join("_template"), TEMPLATE_TEXT).unwrap();
    fs::write(layouts.join("qwerty"), LAYOUT_TEXT).unwrap();

    root
}

fn new_session(root: &TempDir) -> Session {
    Session::new(root.path(), io::sink()).expect("session should start against a well-formed root")
}

#[rstest]
#[case("sfbs qwerty")]
#[case("sfbs qwerty 5")]
#[case("dsfbs qwerty")]
#[case("lsbs qwerty")]
#[case("speed qwerty")]
#[case("bigrams qwerty")]
fn test_per_layout_report_commands_complete_without_error(#[case] line: &str) {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line(line);
    assert!(!reply.starts_with("error:"), "{line:?} -> {reply:?}");
    assert!(reply.ends_with("[DONE]"));
}

#[rstest]
#[case("q")]
#[case("a")]
#[case("qq")]
fn test_ngram_accepts_one_to_three_characters(#[case] ngram: &str) {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line(&format!("ngram {ngram}"));
    assert!(reply.contains(ngram));
    assert!(reply.ends_with("[DONE]"));
}

#[test]
fn test_ngram_rejects_a_four_character_ngram() {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line("ngram abcd");
    assert!(reply.contains("must be"));
    assert!(reply.ends_with("[DONE]"));
}
