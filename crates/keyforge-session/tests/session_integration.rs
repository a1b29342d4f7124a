use keyforge_session::Session;
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
    let mut entries = Vec::new();
    for g in "qwertyuiopasdfghjkl;zxcvbnm,./".chars() {
        entries.push(format!("\"{g}\": 100"));
    }
    format!("{{{}}}", entries.join(","))
}

fn setup_root() -> TempDir {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("config.toml"),
        "[corpus]\nname = \"sample\"\n",
    )
    .unwrap();

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

#[test]
fn test_version_ends_with_done_sentinel() {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line("version");
    assert!(reply.contains("keyforge-session"));
    assert!(reply.ends_with("[DONE]"));
}

#[test]
fn test_help_lists_commands() {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line("help");
    assert!(reply.contains("commands:"));
    assert!(reply.ends_with("[DONE]"));
}

#[test]
fn test_rank_includes_the_loaded_layout() {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line("rank");
    assert!(reply.to_lowercase().contains("qwerty"));
    assert!(reply.ends_with("[DONE]"));
}

#[test]
fn test_analyze_unknown_layout_reports_an_error_not_a_crash() {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line("analyze nonexistent");
    assert!(reply.starts_with("error:"));
    assert!(reply.contains("nonexistent"));
    assert!(reply.ends_with("[DONE]"));
}

#[test]
fn test_entering_interactive_mode_clears_then_holds() {
    let root = setup_root();
    let mut session = new_session(&root);
    let reply = session.handle_line("interactive qwerty");
    assert!(reply.starts_with("[CLEAR]\n"));
    assert!(reply.ends_with("[HOLD]"));
}

#[test]
fn test_quit_from_interactive_returns_to_done() {
    let root = setup_root();
    let mut session = new_session(&root);
    session.handle_line("interactive qwerty");
    let reply = session.handle_line("q");
    assert!(reply.ends_with("[DONE]"));
}

#[test]
fn test_unparseable_interactive_command_holds_without_quitting() {
    let root = setup_root();
    let mut session = new_session(&root);
    session.handle_line("interactive qwerty");
    let reply = session.handle_line("bogus");
    assert!(reply.ends_with("[HOLD]"));

    // the session should still be interactive: quitting now should succeed
    let reply = session.handle_line("q");
    assert!(reply.ends_with("[DONE]"));
}

#[test]
fn test_swap_then_undo_round_trips_inside_interactive_mode() {
    let root = setup_root();
    let mut session = new_session(&root);
    session.handle_line("interactive qwerty");
    let after_swap = session.handle_line("s q w");
    assert!(after_swap.ends_with("[HOLD]"));
    let after_undo = session.handle_line("r");
    assert!(after_undo.ends_with("[HOLD]"));
    session.handle_line("q");
}
