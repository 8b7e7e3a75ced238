//! Script execution against one sequence

use tracing::info;

use super::{parse_script, Command, QueryOutput, ScriptError, ScriptLine};
use crate::sequence::PersistentSequence;
use crate::version::VersionId;
use crate::SequenceError;

/// Owns a sequence and renders each command's outcome as text
#[derive(Debug, Default)]
pub struct Session {
    sequence: PersistentSequence,
}

impl Session {
    /// Create session over an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence driven by this session
    pub fn sequence(&self) -> &PersistentSequence {
        &self.sequence
    }

    /// Parse and run a whole script, stopping at the first error
    ///
    /// Returns one output line per command.
    pub fn run_script(&mut self, source: &str) -> Result<Vec<String>, ScriptError> {
        let lines = parse_script(source)?;
        info!(commands = lines.len(), "running script");

        lines.iter().map(|line| self.run_line(line)).collect()
    }

    /// Run one parsed line
    pub fn run_line(&mut self, line: &ScriptLine) -> Result<String, ScriptError> {
        self.execute(&line.command)
            .map_err(|source| ScriptError::Sequence {
                line: line.number,
                source,
            })
    }

    /// Execute one command
    pub fn execute(&mut self, command: &Command) -> Result<String, SequenceError> {
        let seq = &mut self.sequence;

        let output = match command {
            Command::Build(values) => {
                let version = seq.build(values)?;
                format!("{version} = build {}", format_values(values))
            }
            Command::Update {
                version,
                index,
                value,
            } => {
                let new_version = seq.update(*version, *index, *value)?;
                format!("{new_version} = update {version} [{index}] = {value}")
            }
            Command::Query {
                version,
                left,
                right,
                output: QueryOutput::Single(op),
            } => {
                let result = seq.query(*version, *left, *right, *op)?;
                format!("{op} {version} [{left}, {right}] = {result}")
            }
            Command::Query {
                version,
                left,
                right,
                output: QueryOutput::All,
            } => {
                let aggregate = seq.query_aggregate(*version, *left, *right)?;
                format!("all {version} [{left}, {right}] {aggregate}")
            }
            Command::Get { version, index } => {
                let value = seq.get(*version, *index)?;
                format!("{version}[{index}] = {value}")
            }
            Command::Array(version) => {
                let values = seq.get_version_array(*version)?;
                format!("{version} = {}", format_values(&values))
            }
            Command::Diff(a, b) => {
                let changed = seq.diff(*a, *b)?;
                format!("diff {a} {b} = {changed:?}")
            }
            Command::Fingerprint(version) => {
                let hash = seq.fingerprint(*version)?;
                format!("{version} fingerprint {}", hash.to_hex())
            }
            Command::Lineage(version) => {
                let chain = seq.lineage(*version)?;
                let rendered: Vec<String> = chain.iter().map(VersionId::to_string).collect();
                format!("lineage {}", rendered.join(" <- "))
            }
            Command::Versions => {
                let mut rendered = Vec::with_capacity(seq.version_count());
                for idx in 0..seq.version_count() {
                    let version = VersionId(idx);
                    rendered.push(format!("{version}: {}", seq.origin_of(version)?));
                }
                if rendered.is_empty() {
                    "no versions".to_string()
                } else {
                    rendered.join("\n")
                }
            }
            Command::Stats => format!(
                "versions={} len={} height={} {}",
                seq.version_count(),
                seq.len(),
                seq.tree_height(),
                seq.arena_stats().report()
            ),
        };

        Ok(output)
    }
}

fn format_values(values: &[crate::aggregate::Value]) -> String {
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}
