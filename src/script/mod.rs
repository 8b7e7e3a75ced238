//! Command scripts
//!
//! A tiny line-oriented language for driving a [`PersistentSequence`]
//! from the CLI. One command per line; `#` starts a comment.
//!
//! ```text
//! build 1 3 5 7 9 11
//! update v0 2 10        # -> v1
//! query v1 1 4 sum
//! array v1
//! ```
//!
//! [`PersistentSequence`]: crate::PersistentSequence

mod session;

pub use session::Session;

use std::str::FromStr;

use thiserror::Error;

use crate::aggregate::{AggregateOp, ParseOpError, Value};
use crate::version::VersionId;
use crate::SequenceError;

/// Errors raised while parsing or executing a script
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// First word of the line is not a command
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand {
        /// 1-based line number
        line: usize,
        /// Offending word
        command: String,
    },

    /// Wrong number of arguments
    #[error("line {line}: usage: {usage}")]
    Usage {
        /// 1-based line number
        line: usize,
        /// Expected form of the command
        usage: &'static str,
    },

    /// Argument is not a valid number or version
    #[error("line {line}: invalid {what} '{token}'")]
    InvalidArgument {
        /// 1-based line number
        line: usize,
        /// Kind of argument expected
        what: &'static str,
        /// Offending token
        token: String,
    },

    /// Unknown aggregate operator
    #[error("line {line}: {source}")]
    Operator {
        /// 1-based line number
        line: usize,
        /// Parse failure
        #[source]
        source: ParseOpError,
    },

    /// Sequence operation failed
    #[error("line {line}: {source}")]
    Sequence {
        /// 1-based line number
        line: usize,
        /// Underlying error
        #[source]
        source: SequenceError,
    },
}

/// What a `query` line reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutput {
    /// One operator
    Single(AggregateOp),
    /// Sum, min and max together
    All,
}

/// Parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `build <value>...`
    Build(Vec<Value>),
    /// `update <version> <index> <value>`
    Update {
        /// Source version
        version: VersionId,
        /// Position to replace
        index: usize,
        /// New value
        value: Value,
    },
    /// `query <version> <left> <right> [sum|min|max|all]`
    Query {
        /// Version to read
        version: VersionId,
        /// Left end (inclusive)
        left: usize,
        /// Right end (inclusive)
        right: usize,
        /// Operator(s) to report
        output: QueryOutput,
    },
    /// `get <version> <index>`
    Get {
        /// Version to read
        version: VersionId,
        /// Position
        index: usize,
    },
    /// `array <version>`
    Array(VersionId),
    /// `diff <version> <version>`
    Diff(VersionId, VersionId),
    /// `fingerprint <version>`
    Fingerprint(VersionId),
    /// `lineage <version>`
    Lineage(VersionId),
    /// `versions`
    Versions,
    /// `stats`
    Stats,
}

/// Command together with its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number
    pub number: usize,
    /// Parsed command
    pub command: Command,
}

/// Parse a whole script, skipping blank lines and comments
pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        if let Some(command) = parse_line(raw, number)? {
            lines.push(ScriptLine { number, command });
        }
    }

    Ok(lines)
}

/// Parse one line; `Ok(None)` for blank or comment-only lines
pub fn parse_line(raw: &str, line: usize) -> Result<Option<Command>, ScriptError> {
    let content = raw.split('#').next().unwrap_or("").trim();
    let mut words = content.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let args = Args { line, args: &args };

    let command = match name.to_ascii_lowercase().as_str() {
        "build" => {
            const USAGE: &str = "build <value>...";
            if args.args.is_empty() {
                return Err(ScriptError::Usage { line, usage: USAGE });
            }
            let values = (0..args.args.len())
                .map(|i| args.number(i, "value"))
                .collect::<Result<Vec<Value>, _>>()?;
            Command::Build(values)
        }
        "update" => {
            args.expect(3, "update <version> <index> <value>")?;
            Command::Update {
                version: args.version(0)?,
                index: args.number(1, "index")?,
                value: args.number(2, "value")?,
            }
        }
        "query" => {
            const USAGE: &str = "query <version> <left> <right> [sum|min|max|all]";
            if args.args.len() != 3 && args.args.len() != 4 {
                return Err(ScriptError::Usage { line, usage: USAGE });
            }
            let output = match args.args.get(3) {
                None => QueryOutput::Single(AggregateOp::Sum),
                Some(op) if op.eq_ignore_ascii_case("all") => QueryOutput::All,
                Some(op) => QueryOutput::Single(
                    op.parse()
                        .map_err(|source| ScriptError::Operator { line, source })?,
                ),
            };
            Command::Query {
                version: args.version(0)?,
                left: args.number(1, "left index")?,
                right: args.number(2, "right index")?,
                output,
            }
        }
        "get" => {
            args.expect(2, "get <version> <index>")?;
            Command::Get {
                version: args.version(0)?,
                index: args.number(1, "index")?,
            }
        }
        "array" => {
            args.expect(1, "array <version>")?;
            Command::Array(args.version(0)?)
        }
        "diff" => {
            args.expect(2, "diff <version> <version>")?;
            Command::Diff(args.version(0)?, args.version(1)?)
        }
        "fingerprint" => {
            args.expect(1, "fingerprint <version>")?;
            Command::Fingerprint(args.version(0)?)
        }
        "lineage" => {
            args.expect(1, "lineage <version>")?;
            Command::Lineage(args.version(0)?)
        }
        "versions" => {
            args.expect(0, "versions")?;
            Command::Versions
        }
        "stats" => {
            args.expect(0, "stats")?;
            Command::Stats
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: name.to_string(),
            })
        }
    };

    Ok(Some(command))
}

struct Args<'a> {
    line: usize,
    args: &'a [&'a str],
}

impl Args<'_> {
    fn expect(&self, count: usize, usage: &'static str) -> Result<(), ScriptError> {
        if self.args.len() == count {
            Ok(())
        } else {
            Err(ScriptError::Usage {
                line: self.line,
                usage,
            })
        }
    }

    fn number<T: FromStr>(&self, position: usize, what: &'static str) -> Result<T, ScriptError> {
        let token = self.args[position];
        token.parse().map_err(|_| ScriptError::InvalidArgument {
            line: self.line,
            what,
            token: token.to_string(),
        })
    }

    /// Versions may be written `3` or `v3`
    fn version(&self, position: usize) -> Result<VersionId, ScriptError> {
        let token = self.args[position];
        let digits = token
            .strip_prefix('v')
            .or_else(|| token.strip_prefix('V'))
            .unwrap_or(token);
        digits
            .parse()
            .map(VersionId)
            .map_err(|_| ScriptError::InvalidArgument {
                line: self.line,
                what: "version",
                token: token.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        let script = "\
# seed
build 1 3 5 7 9 11
update v0 2 10   # first edit
query 1 1 4
query v1 1 4 MIN
query v1 0 5 all
get v1 2

array v1
diff v0 v1
fingerprint v1
lineage v1
versions
stats
";
        let lines = parse_script(script).unwrap();
        let commands: Vec<Command> = lines.iter().map(|l| l.command.clone()).collect();

        assert_eq!(lines[0].number, 2);
        assert_eq!(
            commands,
            vec![
                Command::Build(vec![1, 3, 5, 7, 9, 11]),
                Command::Update {
                    version: VersionId(0),
                    index: 2,
                    value: 10
                },
                Command::Query {
                    version: VersionId(1),
                    left: 1,
                    right: 4,
                    output: QueryOutput::Single(AggregateOp::Sum)
                },
                Command::Query {
                    version: VersionId(1),
                    left: 1,
                    right: 4,
                    output: QueryOutput::Single(AggregateOp::Min)
                },
                Command::Query {
                    version: VersionId(1),
                    left: 0,
                    right: 5,
                    output: QueryOutput::All
                },
                Command::Get {
                    version: VersionId(1),
                    index: 2
                },
                Command::Array(VersionId(1)),
                Command::Diff(VersionId(0), VersionId(1)),
                Command::Fingerprint(VersionId(1)),
                Command::Lineage(VersionId(1)),
                Command::Versions,
                Command::Stats,
            ]
        );
    }

    #[test]
    fn negative_values_are_accepted() {
        assert_eq!(
            parse_line("build -4 0 12", 1).unwrap(),
            Some(Command::Build(vec![-4, 0, 12]))
        );
    }

    #[test]
    fn errors_carry_line_numbers() {
        assert_eq!(
            parse_script("build 1 2\nfrobnicate 3").unwrap_err(),
            ScriptError::UnknownCommand {
                line: 2,
                command: "frobnicate".to_string()
            }
        );
        assert!(matches!(
            parse_line("update v0 1", 7),
            Err(ScriptError::Usage { line: 7, .. })
        ));
        assert!(matches!(
            parse_line("get vx 1", 3),
            Err(ScriptError::InvalidArgument {
                what: "version",
                ..
            })
        ));
        assert!(matches!(
            parse_line("get v0 -1", 3),
            Err(ScriptError::InvalidArgument { what: "index", .. })
        ));
        assert!(matches!(
            parse_line("query v0 0 1 avg", 4),
            Err(ScriptError::Operator { line: 4, .. })
        ));
        assert!(matches!(
            parse_line("build", 1),
            Err(ScriptError::Usage { .. })
        ));
    }
}
