// ===== keyforge-session/src/main.rs =====
//! Thread-per-connection line server: each accepted connection blocks on
//! `read_line` on its own thread and drives one `Session` to completion. No
//! async runtime — the concurrency model in use is one OS thread per
//! session, matching the synchronous, blocking-read contract the session
//! state machine is specified against.

use clap::Parser;
use keyforge_session::{Session, SessionRegistry};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "keyboard-layout analysis session server", long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:4505")]
    addr: String,

    /// Root directory config.toml/corpora/layouts are resolved under.
    #[arg(long, default_value = ".")]
    root: String,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let listener = match TcpListener::bind(&cli.addr) {
        Ok(l) => l,
        Err(e) => {
            error!(addr = %cli.addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %cli.addr, root = %cli.root, "listening");

    let registry = Arc::new(SessionRegistry::new());

    for incoming in listener.incoming() {
        let stream = match incoming {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to accept connection");
                continue;
            }
        };
        let root = cli.root.clone();
        let registry = Arc::clone(&registry);
        thread::spawn(move || handle_connection(stream, root, registry));
    }
}

fn handle_connection(stream: TcpStream, root: String, registry: Arc<SessionRegistry>) {
    let peer = match stream.peer_addr() {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "connection has no peer address, dropping");
            return;
        }
    };
    let id = registry.register(peer);
    info!(%peer, connections = registry.len(), "session connected");

    if let Err(e) = run_session(stream, &root) {
        warn!(%peer, error = %e, "session ended with a transport error");
    }

    registry.unregister(id);
    info!(%peer, connections = registry.len(), "session disconnected");
}

/// Reads one command line at a time and writes the rendered response back.
/// A closed connection (read returns zero, or any write failure) ends the
/// session immediately; per the error-handling contract there is no retry.
fn run_session(stream: TcpStream, root: &str) -> std::io::Result<()> {
    let writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);

    let mut session = match Session::new(root, writer) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to start session");
            return Ok(());
        }
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() {
            continue;
        }

        let response = session.handle_line(trimmed);
        let out = reader.get_mut();
        writeln!(out, "{response}")?;
        out.flush()?;
    }
    Ok(())
}
