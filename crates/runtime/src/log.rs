//! Append-only JSON-lines command log.
//!
//! ```text
//! {"record":"start","seed":7,"blue_deck":["zombie",...],"red_deck":[...]}
//! {"record":"command","command":{"command":"spawn","card":"villager","position":{"row":0,"col":3}}}
//! {"record":"command","command":{"command":"end_turn"}}
//! ```
//!
//! The first line fixes the match; every later line is one accepted command.
//! Replaying the lines against the same registries reproduces the match.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use chegg_core::{Command, UnitId};

use crate::error::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum LogRecord {
    Start {
        seed: u64,
        blue_deck: Vec<UnitId>,
        red_deck: Vec<UnitId>,
    },
    Command {
        command: Command,
    },
}

/// Parsed command log: the match header plus its commands in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchLog {
    pub seed: u64,
    pub blue_deck: Vec<UnitId>,
    pub red_deck: Vec<UnitId>,
    pub commands: Vec<Command>,
}

impl MatchLog {
    /// Reads a log file; blank lines are skipped.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut header = None;
        let mut commands = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let number = index + 1;
            let record: LogRecord = serde_json::from_str(&line)
                .map_err(|source| RuntimeError::MalformedLog { line: number, source })?;

            match record {
                LogRecord::Start { .. } if header.is_some() => {
                    return Err(RuntimeError::DuplicateHeader { line: number });
                }
                LogRecord::Start {
                    seed,
                    blue_deck,
                    red_deck,
                } => header = Some((seed, blue_deck, red_deck)),
                LogRecord::Command { .. } if header.is_none() => {
                    return Err(RuntimeError::MissingHeader);
                }
                LogRecord::Command { command } => commands.push(command),
            }
        }

        let (seed, blue_deck, red_deck) = header.ok_or(RuntimeError::MissingHeader)?;
        Ok(Self {
            seed,
            blue_deck,
            red_deck,
            commands,
        })
    }
}

/// Writer half of the command log.
pub struct CommandLog {
    path: PathBuf,
    writer: Box<dyn Write + Send>,
    records: usize,
}

impl CommandLog {
    /// Creates a new log, refusing to overwrite an existing file.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() {
            return Err(RuntimeError::LogAlreadyExists(path));
        }
        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;

        tracing::debug!(target: "chegg::session", "created command log {}", path.display());
        Ok(Self::from_writer(path, BufWriter::new(file)))
    }

    /// Log over an arbitrary sink; `path` only labels it.
    pub fn from_writer(path: impl Into<PathBuf>, writer: impl Write + Send + 'static) -> Self {
        Self {
            path: path.into(),
            writer: Box::new(writer),
            records: 0,
        }
    }

    /// Appends one record and flushes it to disk.
    pub fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = serde_json::to_string(record).map_err(RuntimeError::Encode)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.records += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written through this handle.
    pub fn records(&self) -> usize {
        self.records
    }
}

impl std::fmt::Debug for CommandLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLog")
            .field("path", &self.path)
            .field("records", &self.records)
            .finish()
    }
}
