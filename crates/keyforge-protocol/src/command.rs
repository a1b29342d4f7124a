// ===== keyforge-protocol/src/command.rs =====
use crate::error::ProtocolError;

/// Leading `--stagger`/`--colstagger`/`--slide`/`--dynamic` flags, consumed
/// before the command token itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagSet {
    pub stagger: bool,
    pub col_stagger: bool,
    pub slide: bool,
    pub dynamic: bool,
}

/// Either a literal column index or a grapheme name whose current column
/// should be used (`cs` interactive command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Grapheme(String),
}

impl ColumnRef {
    fn parse(token: &str) -> Self {
        match token.parse::<usize>() {
            Ok(n) => ColumnRef::Index(n),
            Err(_) => ColumnRef::Grapheme(token.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalCommand {
    Load { path: String },
    Rank,
    Analyze { layout: String },
    Interactive { layout: String },
    Generate,
    Improve { layout: String },
    Heatmap { layout: String },
    Sfbs { layout: String, n: Option<usize> },
    Dsfbs { layout: String, n: Option<usize> },
    Lsbs { layout: String, n: Option<usize> },
    Speed { layout: String },
    Bigrams { layout: String, n: Option<usize> },
    Ngram { ngram: String },
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    ToggleTrigrams,
    Swap { k1: String, k2: String },
    ColumnSwap { x: ColumnRef, y: ColumnRef },
    Undo,
    Suggest { max_depth: Option<usize> },
    Worsen,
    Minimize { recursion: u8 },
    Quit,
    Save,
}

/// Splits leading `--flag` tokens off a command line and returns them along
/// with the remaining whitespace-split tokens.
pub fn take_flags(line: &str) -> Result<(FlagSet, Vec<&str>), ProtocolError> {
    let mut flags = FlagSet::default();
    let mut tokens = line.split_whitespace().peekable();
    while let Some(tok) = tokens.peek() {
        if !tok.starts_with("--") {
            break;
        }
        match *tok {
            "--stagger" => flags.stagger = true,
            "--colstagger" => flags.col_stagger = true,
            "--slide" => flags.slide = true,
            "--dynamic" => flags.dynamic = true,
            other => return Err(ProtocolError::UnknownFlag(other.to_string())),
        }
        tokens.next();
    }
    Ok((flags, tokens.collect()))
}

/// Parses a normal-mode command line (after flags have been split off).
pub fn parse_normal(tokens: &[&str]) -> Result<NormalCommand, ProtocolError> {
    let (&name, rest) = tokens.split_first().ok_or(ProtocolError::Empty)?;
    let arg = |i: usize, what: &str| -> Result<String, ProtocolError> {
        rest.get(i)
            .map(|s| s.to_string())
            .ok_or_else(|| ProtocolError::MissingArgument(what.to_string()))
    };
    let count = |i: usize| rest.get(i).and_then(|s| s.parse::<usize>().ok());

    Ok(match name {
        "load" => NormalCommand::Load { path: arg(0, "PATH")? },
        "rank" | "r" => NormalCommand::Rank,
        "analyze" | "a" => NormalCommand::Analyze { layout: arg(0, "LAYOUT")? },
        "interactive" => NormalCommand::Interactive { layout: arg(0, "LAYOUT")? },
        "generate" | "g" => NormalCommand::Generate,
        "improve" => NormalCommand::Improve { layout: arg(0, "LAYOUT")? },
        "heatmap" => NormalCommand::Heatmap { layout: arg(0, "LAYOUT")? },
        "sfbs" => NormalCommand::Sfbs { layout: arg(0, "LAYOUT")?, n: count(1) },
        "dsfbs" => NormalCommand::Dsfbs { layout: arg(0, "LAYOUT")?, n: count(1) },
        "lsbs" => NormalCommand::Lsbs { layout: arg(0, "LAYOUT")?, n: count(1) },
        "speed" => NormalCommand::Speed { layout: arg(0, "LAYOUT")? },
        "bigrams" => NormalCommand::Bigrams { layout: arg(0, "LAYOUT")?, n: count(1) },
        "ngram" => NormalCommand::Ngram { ngram: arg(0, "NGRAM")? },
        "version" => NormalCommand::Version,
        "help" => NormalCommand::Help,
        other => return Err(ProtocolError::UnknownCommand(other.to_string())),
    })
}

/// Parses an interactive-mode command line.
pub fn parse_interactive(tokens: &[&str]) -> Result<InteractiveCommand, ProtocolError> {
    let (&name, rest) = tokens.split_first().ok_or(ProtocolError::Empty)?;
    let arg = |i: usize, what: &str| -> Result<String, ProtocolError> {
        rest.get(i)
            .map(|s| s.to_string())
            .ok_or_else(|| ProtocolError::MissingArgument(what.to_string()))
    };

    Ok(match name {
        "t" => InteractiveCommand::ToggleTrigrams,
        "s" => InteractiveCommand::Swap { k1: arg(0, "K1")?, k2: arg(1, "K2")? },
        "cs" => InteractiveCommand::ColumnSwap {
            x: ColumnRef::parse(&arg(0, "X")?),
            y: ColumnRef::parse(&arg(1, "Y")?),
        },
        "r" => InteractiveCommand::Undo,
        "g" => InteractiveCommand::Suggest { max_depth: rest.first().and_then(|s| s.parse().ok()) },
        "w" => InteractiveCommand::Worsen,
        "m" => InteractiveCommand::Minimize { recursion: 0 },
        "m2" => InteractiveCommand::Minimize { recursion: 1 },
        "q" => InteractiveCommand::Quit,
        "save" => InteractiveCommand::Save,
        other => return Err(ProtocolError::UnknownCommand(other.to_string())),
    })
}
