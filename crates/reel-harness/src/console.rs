//! Line-oriented command console.
//!
//! Each non-empty line is one command; `#` starts a comment. Malformed lines
//! are reported and skipped, so a script keeps running past a typo. The
//! carousel only ever sees well-typed values.
//!
//! ```text
//! goto <index>            animated jump, ticked until it lands
//! jump <index>            immediate jump
//! update <index> <name>   replace the record at index with { id: index, name }
//! click <slot>            click a slot (animated jump to its record)
//! drag <px> [frames]      drag px pointer units per frame, then release
//! tick [frames]           advance frames, or until rest when omitted
//! show                    print the current frame
//! quit                    stop reading
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use reel_widgets::{Carousel, Record};
use tracing::{info, warn};

use crate::error::{HarnessError, Result};
use crate::{build_carousel, format_snapshot, frame_duration, load_config};

/// Upper bound on frames for `tick` without a count and for settling jumps.
pub const MAX_SETTLE_FRAMES: usize = 10_000;

#[derive(Debug, Clone, Args)]
pub struct ConsoleArgs {
    /// Number of sample records (`Item 0` .. `Item N-1`).
    #[arg(long, default_value_t = 1000)]
    pub records: usize,

    /// Carousel config file (TOML, or JSON with a `.json` extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Goto(i64),
    Jump(i64),
    Update { index: i64, name: String },
    Click(usize),
    Drag { px: f64, frames: usize },
    Tick(Option<usize>),
    Show,
    Quit,
}

/// Parse one line. Blank lines and comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "goto" => Command::Goto(required(words.next(), "index")?),
        "jump" => Command::Jump(required(words.next(), "index")?),
        "update" => {
            let index = required(words.next(), "index")?;
            let name = words.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err("update needs a name".into());
            }
            return Ok(Some(Command::Update { index, name }));
        }
        "click" => Command::Click(required(words.next(), "slot")?),
        "drag" => {
            let px = required(words.next(), "px")?;
            let frames = optional(words.next(), "frames")?.unwrap_or(1);
            if frames == 0 {
                return Err("drag frames must be > 0".into());
            }
            Command::Drag { px, frames }
        }
        "tick" => Command::Tick(optional(words.next(), "frames")?),
        "show" => Command::Show,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    Ok(Some(command))
}

fn required<T: std::str::FromStr>(
    word: Option<&str>,
    what: &str,
) -> std::result::Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {what}"))?;
    word.parse().map_err(|_| format!("invalid {what} `{word}`"))
}

fn optional<T: std::str::FromStr>(
    word: Option<&str>,
    what: &str,
) -> std::result::Result<Option<T>, String> {
    word.map(|w| required(Some(w), what)).transpose()
}

/// Counts from one console session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleSummary {
    pub executed: usize,
    pub errors: usize,
}

/// Executes commands against a carousel, writing results to `out`.
#[derive(Debug)]
pub struct Console<W: Write> {
    carousel: Carousel,
    frame: Duration,
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(carousel: Carousel, frame: Duration, out: W) -> Self {
        Self {
            carousel,
            frame,
            out,
        }
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read and execute every line until EOF or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<ConsoleSummary> {
        let mut summary = ConsoleSummary::default();
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    let error = HarnessError::parse(number + 1, message);
                    warn!(%error, "skipping malformed command");
                    writeln!(self.out, "error: {error}")?;
                    summary.errors += 1;
                    continue;
                }
            };
            summary.executed += 1;
            if !self.execute(&command)? {
                break;
            }
        }
        Ok(summary)
    }

    /// Execute one command. Returns `false` on `quit`.
    pub fn execute(&mut self, command: &Command) -> Result<bool> {
        match command {
            Command::Goto(index) => {
                self.carousel.scroll_to_index(*index, true);
                let frames = self.settle();
                writeln!(
                    self.out,
                    "goto {index}: landed on {} after {frames} frames",
                    self.carousel.center_index()
                )?;
            }
            Command::Jump(index) => {
                self.carousel.scroll_to_index(*index, false);
                writeln!(self.out, "jump {index}: center {}", self.carousel.center_index())?;
            }
            Command::Update { index, name } => {
                if self.carousel.update_record(*index, Record::new(*index, name.clone())) {
                    writeln!(self.out, "update {index}: {name}")?;
                } else {
                    writeln!(self.out, "update {index}: out of range, ignored")?;
                }
            }
            Command::Click(slot) => match self.carousel.on_slot_clicked(*slot) {
                Some(index) => {
                    let frames = self.settle();
                    writeln!(self.out, "click {slot}: landed on {index} after {frames} frames")?;
                }
                None => writeln!(self.out, "click {slot}: ignored")?,
            },
            Command::Drag { px, frames } => {
                self.carousel.on_begin_drag();
                for _ in 0..*frames {
                    self.carousel.on_drag(*px, self.frame);
                }
                self.carousel.on_end_drag();
                writeln!(
                    self.out,
                    "drag {px} x{frames}: released at {:.4} with velocity {:.4}",
                    self.carousel.position(),
                    self.carousel.velocity()
                )?;
            }
            Command::Tick(Some(frames)) => {
                for _ in 0..*frames {
                    self.carousel.tick(self.frame);
                }
                writeln!(self.out, "tick {frames}")?;
            }
            Command::Tick(None) => {
                let frames = self.settle();
                writeln!(self.out, "tick: rest after {frames} frames")?;
            }
            Command::Show => {
                writeln!(self.out, "{}", format_snapshot(&self.carousel.snapshot()))?;
            }
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Tick until the carousel rests. Returns the frames ticked.
    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while frames < MAX_SETTLE_FRAMES && self.carousel.tick(self.frame) {
            frames += 1;
        }
        frames
    }
}

pub fn run_console(args: ConsoleArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let carousel = build_carousel(config, args.records)?;
    let frame = frame_duration(args.fps)?;
    info!(records = args.records, fps = args.fps, "console started");

    let stdout = io::stdout();
    let mut console = Console::new(carousel, frame, stdout.lock());
    let summary = match &args.script {
        Some(path) => console.run(BufReader::new(File::open(path)?))?,
        None => console.run(io::stdin().lock())?,
    };
    info!(
        executed = summary.executed,
        errors = summary.errors,
        "console finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!(parse_command("goto 40"), Ok(Some(Command::Goto(40))));
        assert_eq!(parse_command("JUMP -3"), Ok(Some(Command::Jump(-3))));
        assert_eq!(
            parse_command("update 2 Big  Item"),
            Ok(Some(Command::Update {
                index: 2,
                name: "Big Item".into()
            }))
        );
        assert_eq!(parse_command("click 5"), Ok(Some(Command::Click(5))));
        assert_eq!(
            parse_command("drag -30.5 4"),
            Ok(Some(Command::Drag {
                px: -30.5,
                frames: 4
            }))
        );
        assert_eq!(
            parse_command("drag 10"),
            Ok(Some(Command::Drag { px: 10.0, frames: 1 }))
        );
        assert_eq!(parse_command("tick"), Ok(Some(Command::Tick(None))));
        assert_eq!(parse_command("tick 12"), Ok(Some(Command::Tick(Some(12)))));
        assert_eq!(parse_command("show"), Ok(Some(Command::Show)));
        assert_eq!(parse_command("quit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_command(""), Ok(None));
        assert_eq!(parse_command("   # just a note"), Ok(None));
        assert_eq!(parse_command("show # trailing"), Ok(Some(Command::Show)));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(parse_command("goto"), Err("missing index".into()));
        assert_eq!(parse_command("goto ten"), Err("invalid index `ten`".into()));
        assert_eq!(parse_command("click -1"), Err("invalid slot `-1`".into()));
        assert_eq!(parse_command("update 3"), Err("update needs a name".into()));
        assert_eq!(parse_command("drag 5 0"), Err("drag frames must be > 0".into()));
        assert_eq!(parse_command("show me"), Err("unexpected argument `me`".into()));
        assert_eq!(parse_command("fly 3"), Err("unknown command `fly`".into()));
    }
}
