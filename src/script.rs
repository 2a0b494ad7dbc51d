//! Replay scripts: a line-oriented command language that drives a working set
//! deterministically on a manual clock.
//!
//! ```text
//! # comment
//! add <id> [from=<message-id>] <payload text...>
//! remove <id>
//! activate <id>
//! minimize <id>
//! restore <id>
//! clear
//! tick <ms>
//! ```

use crate::clock::{Clock, ManualClock};
use crate::error::ApiError;
use crate::events::Change;
use crate::types::MessageId;
use crate::views::WorksetSnapshot;
use crate::workset::Workset;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Clock start for replays; each command advances it by one millisecond.
pub const REPLAY_EPOCH: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCommand {
    Add {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        payload: String,
    },
    Remove {
        id: String,
    },
    Activate {
        id: String,
    },
    Minimize {
        id: String,
    },
    Restore {
        id: String,
    },
    Clear,
    Tick {
        ms: u64,
    },
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptCommand::Add { id, from, .. } => match from {
                Some(from) => write!(f, "add {} from={}", id, from),
                None => write!(f, "add {}", id),
            },
            ScriptCommand::Remove { id } => write!(f, "remove {}", id),
            ScriptCommand::Activate { id } => write!(f, "activate {}", id),
            ScriptCommand::Minimize { id } => write!(f, "minimize {}", id),
            ScriptCommand::Restore { id } => write!(f, "restore {}", id),
            ScriptCommand::Clear => write!(f, "clear"),
            ScriptCommand::Tick { ms } => write!(f, "tick {}", ms),
        }
    }
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ApiError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command =
            parse_line(trimmed).map_err(|message| ApiError::ScriptError { line, message })?;
        out.push(ScriptLine { line, command });
    }
    Ok(out)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>, ApiError> {
    let text = std::fs::read_to_string(path)?;
    parse_script(&text)
}

fn parse_line(line: &str) -> Result<ScriptCommand, String> {
    let mut parts = line.split_whitespace();
    let op = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    let single_arg = |name: &str, what: &str| -> Result<String, String> {
        match rest.as_slice() {
            [arg] => Ok((*arg).to_string()),
            [] => Err(format!("`{}` needs {}", name, what)),
            _ => Err(format!("`{}` takes exactly one argument", name)),
        }
    };
    let single_id = |name: &str| single_arg(name, "an artifact id");

    match op {
        "add" => {
            let (id, tail) = rest
                .split_first()
                .ok_or_else(|| "`add` needs an artifact id".to_string())?;
            let (from, payload_words) = match tail.split_first() {
                Some((first, remaining)) if first.starts_with("from=") => {
                    let msg = &first["from=".len()..];
                    if msg.is_empty() {
                        return Err("`from=` needs a message id".to_string());
                    }
                    (Some(msg.to_string()), remaining)
                }
                _ => (None, tail),
            };
            Ok(ScriptCommand::Add {
                id: (*id).to_string(),
                from,
                payload: payload_words.join(" "),
            })
        }
        "remove" => Ok(ScriptCommand::Remove { id: single_id(op)? }),
        "activate" => Ok(ScriptCommand::Activate { id: single_id(op)? }),
        "minimize" => Ok(ScriptCommand::Minimize { id: single_id(op)? }),
        "restore" => Ok(ScriptCommand::Restore { id: single_id(op)? }),
        "clear" if rest.is_empty() => Ok(ScriptCommand::Clear),
        "clear" => Err("`clear` takes no arguments".to_string()),
        "tick" => {
            let raw = single_arg(op, "a millisecond count")?;
            let ms = raw
                .parse::<u64>()
                .map_err(|_| format!("`tick` needs a millisecond count, got `{}`", raw))?;
            Ok(ScriptCommand::Tick { ms })
        }
        other => Err(format!("unknown command `{}`", other)),
    }
}

/// Outcome of one replayed command.
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    pub line: usize,
    pub command: String,
    /// False when the command was a no-op on an unknown id.
    pub applied: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepResult>,
    pub changes: Vec<Change>,
    pub snapshot: WorksetSnapshot,
}

/// Run a parsed script against a fresh working set.
pub fn replay(script: &[ScriptLine], capacity: usize) -> Result<ReplayReport, ApiError> {
    let clock = ManualClock::new(REPLAY_EPOCH);
    let mut workset: Workset<String, ManualClock> =
        Workset::with_clock(capacity, clock.clone())?;
    let (_, changes_rx) = workset.subscribe_channel();

    let mut steps = Vec::with_capacity(script.len());
    for entry in script {
        let applied = match &entry.command {
            ScriptCommand::Add { id, from, payload } => {
                workset.add(id.as_str(), payload.clone(), from.clone().map(MessageId::new));
                true
            }
            ScriptCommand::Remove { id } => workset.remove(id),
            ScriptCommand::Activate { id } => workset.set_active(id),
            ScriptCommand::Minimize { id } => workset.minimize(id),
            ScriptCommand::Restore { id } => workset.restore(id),
            ScriptCommand::Clear => {
                workset.clear_all();
                true
            }
            ScriptCommand::Tick { ms } => {
                clock.advance(*ms);
                true
            }
        };
        debug!(line = entry.line, command = %entry.command, applied, "Replayed command");
        steps.push(StepResult {
            line: entry.line,
            command: entry.command.to_string(),
            applied,
        });
        clock.advance(1);
    }

    let snapshot = workset.snapshot();
    info!(
        commands = steps.len(),
        artifacts = snapshot.len(),
        clock = clock.now(),
        "Replay finished"
    );
    Ok(ReplayReport {
        steps,
        changes: changes_rx.try_iter().collect(),
        snapshot,
    })
}
