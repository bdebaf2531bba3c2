//! Scenario scripts.
//!
//! A scenario is a line-oriented script of device changes, user gestures and
//! time steps. `#` starts a comment; blank lines are ignored.
//!
//! ```text
//! # PIN-locked SIM, then charging
//! sim pin_required
//! battery true true 40
//! trigger sound
//! advance 3500
//! ```
//!
//! | Command | Arguments |
//! |---|---|
//! | `sim` | SIM state name |
//! | `provisioned` | bool |
//! | `carrier` | plmn or `-`, spn or `-` |
//! | `battery` | showable, plugged in, level |
//! | `alarm` | text to end of line, or `-` |
//! | `ringer` | `normal`, `silent`, `vibrate` |
//! | `vibrate-on-ring` | bool |
//! | `orientation` | `portrait`, `landscape` |
//! | `keyboard` | `open`, `closed` |
//! | `trigger` | `unlock`, `sound` |
//! | `grab` | `unlock`, `sound`, `none` |
//! | `key` | `menu`, `center`, raw code |
//! | `emergency`, `pause`, `resume`, `tick` | none |
//! | `advance` | milliseconds |

use std::{str::FromStr, time::Duration};

use keyguard_app::{KeyCode, KeyguardEvent};
use keyguard_core::{BatteryInfo, BatteryLevel, Handle, RingerMode, SignalError, SimState};
use thiserror::Error;

/// A script line could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenarioError {
    /// First word is not a known command.
    #[error("line {line}, column {column}: unknown command {command:?}")]
    UnknownCommand {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
        /// Offending word.
        command: String,
    },

    /// Wrong number of arguments.
    #[error("line {line}: `{command}` expects {expected}")]
    Arity {
        /// 1-based line.
        line: usize,
        /// Command name.
        command: &'static str,
        /// Description of the expected arguments.
        expected: &'static str,
    },

    /// Argument is not of the expected form.
    #[error("line {line}, column {column}: expected {expected}, found {found:?}")]
    InvalidArgument {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
        /// Description of the expected value.
        expected: &'static str,
        /// Offending word.
        found: String,
    },

    /// Argument names an unknown signal value.
    #[error("line {line}, column {column}: {source}")]
    Signal {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
        /// Underlying conversion error.
        #[source]
        source: SignalError,
    },
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Telephony reports a SIM state.
    SimState(SimState),
    /// Provisioning flag changes.
    Provisioned(bool),
    /// Carrier names refresh.
    Carrier {
        /// Network name.
        plmn: Option<String>,
        /// Service provider name.
        spn: Option<String>,
    },
    /// Power source changes.
    Battery(BatteryInfo),
    /// Next alarm changes.
    Alarm(Option<String>),
    /// Ringer changes outside the lock screen.
    Ringer(RingerMode),
    /// Vibrate-on-ring preference changes.
    VibrateOnRing(bool),
    /// Device rotates.
    Orientation {
        /// Whether the device is now in portrait.
        portrait: bool,
    },
    /// Keyboard opens or closes.
    Keyboard {
        /// Whether the keyboard is now open.
        open: bool,
    },
    /// Time tick.
    Tick,
    /// User gesture or lifecycle event.
    Input(KeyguardEvent),
    /// Let virtual time pass, firing due timers.
    Advance(Duration),
}

/// Parse a whole script.
pub fn parse(script: &str) -> Result<Vec<Step>, ScenarioError> {
    script
        .lines()
        .enumerate()
        .filter_map(|(index, text)| parse_line(index + 1, text).transpose())
        .collect()
}

/// Word of a line with its 1-based column.
#[derive(Debug, Clone, Copy)]
struct Word<'a> {
    column: usize,
    text: &'a str,
}

fn words(text: &str) -> Vec<Word<'_>> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push(Word { column: s + 1, text: &text[s..i] });
                start = None;
            },
            (false, None) => start = Some(i),
            _ => {},
        }
    }
    if let Some(s) = start {
        words.push(Word { column: s + 1, text: &text[s..] });
    }
    words
}

/// Parse one line. `None` for blank and comment-only lines.
fn parse_line(line: usize, text: &str) -> Result<Option<Step>, ScenarioError> {
    let text = text.split('#').next().unwrap_or_default();
    let words = words(text);
    let Some((command, args)) = words.split_first() else {
        return Ok(None);
    };

    let parser = LineParser { line, args };
    let step = match command.text {
        "sim" => Step::SimState(parser.one("sim", "a SIM state")?.signal()?),
        "provisioned" => Step::Provisioned(parser.flag(parser.one("provisioned", "a bool")?)?),
        "carrier" => {
            let [plmn, spn] = parser.exactly::<2>("carrier", "<plmn|-> <spn|->")?;
            Step::Carrier { plmn: optional(plmn.text), spn: optional(spn.text) }
        },
        "battery" => {
            let [showable, plugged, level] =
                parser.exactly::<3>("battery", "<showable> <plugged> <level>")?;
            let raw = parser.value::<i32>(level, "an integer battery level")?;
            Step::Battery(BatteryInfo::new(
                parser.flag(showable)?,
                parser.flag(plugged)?,
                BatteryLevel::saturating(raw),
            ))
        },
        "alarm" => {
            let first = args.first().ok_or(ScenarioError::Arity {
                line,
                command: "alarm",
                expected: "alarm text or -",
            })?;
            Step::Alarm(optional(text[first.column - 1..].trim_end()))
        },
        "ringer" => Step::Ringer(parser.one("ringer", "a ringer mode")?.signal()?),
        "vibrate-on-ring" => {
            Step::VibrateOnRing(parser.flag(parser.one("vibrate-on-ring", "a bool")?)?)
        },
        "orientation" => {
            let word = parser.one("orientation", "portrait or landscape")?;
            let portrait = match word.text() {
                "portrait" => true,
                "landscape" => false,
                _ => return Err(parser.invalid(word, "portrait or landscape")),
            };
            Step::Orientation { portrait }
        },
        "keyboard" => {
            let word = parser.one("keyboard", "open or closed")?;
            let open = match word.text() {
                "open" => true,
                "closed" => false,
                _ => return Err(parser.invalid(word, "open or closed")),
            };
            Step::Keyboard { open }
        },
        "trigger" => Step::Input(KeyguardEvent::Trigger(
            parser.one("trigger", "unlock or sound")?.signal()?,
        )),
        "grab" => {
            let word = parser.one("grab", "unlock, sound or none")?;
            let handle = match word.text() {
                "none" => None,
                _ => Some(word.signal::<Handle>()?),
            };
            Step::Input(KeyguardEvent::GrabStateChanged { handle })
        },
        "key" => {
            let key = parser.one("key", "a key")?.signal::<KeyCode>()?;
            Step::Input(KeyguardEvent::KeyDown(key))
        },
        "emergency" => parser.none("emergency", KeyguardEvent::EmergencyTapped)?,
        "pause" => parser.none("pause", KeyguardEvent::Paused)?,
        "resume" => parser.none("resume", KeyguardEvent::Resumed)?,
        "tick" => {
            parser.exactly::<0>("tick", "no arguments")?;
            Step::Tick
        },
        "advance" => {
            let word = parser.one("advance", "milliseconds")?;
            Step::Advance(Duration::from_millis(parser.value(word, "milliseconds")?))
        },
        other => {
            return Err(ScenarioError::UnknownCommand {
                line,
                column: command.column,
                command: other.to_string(),
            });
        },
    };
    Ok(Some(step))
}

fn optional(text: &str) -> Option<String> {
    (text != "-").then(|| text.to_string())
}

struct LineParser<'a> {
    line: usize,
    args: &'a [Word<'a>],
}

impl<'a> LineParser<'a> {
    fn exactly<const N: usize>(
        &self,
        command: &'static str,
        expected: &'static str,
    ) -> Result<[Word<'a>; N], ScenarioError> {
        <[Word<'a>; N]>::try_from(self.args).map_err(|_| ScenarioError::Arity {
            line: self.line,
            command,
            expected,
        })
    }

    fn one(
        &self,
        command: &'static str,
        expected: &'static str,
    ) -> Result<Located<'a>, ScenarioError> {
        let [word] = self.exactly::<1>(command, expected)?;
        Ok(Located { line: self.line, word })
    }

    fn none(&self, command: &'static str, event: KeyguardEvent) -> Result<Step, ScenarioError> {
        self.exactly::<0>(command, "no arguments")?;
        Ok(Step::Input(event))
    }

    fn flag(&self, word: impl Into<Word<'a>>) -> Result<bool, ScenarioError> {
        let word = word.into();
        match word.text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(self.invalid(word, "a bool")),
        }
    }

    fn value<T: FromStr>(
        &self,
        word: impl Into<Word<'a>>,
        expected: &'static str,
    ) -> Result<T, ScenarioError> {
        let word = word.into();
        word.text.parse().map_err(|_| self.invalid(word, expected))
    }

    fn invalid(&self, word: impl Into<Word<'a>>, expected: &'static str) -> ScenarioError {
        let word = word.into();
        ScenarioError::InvalidArgument {
            line: self.line,
            column: word.column,
            expected,
            found: word.text.to_string(),
        }
    }
}

/// A single argument that knows its position.
#[derive(Debug, Clone, Copy)]
struct Located<'a> {
    line: usize,
    word: Word<'a>,
}

impl<'a> Located<'a> {
    fn text(self) -> &'a str {
        self.word.text
    }

    fn signal<T: FromStr<Err = SignalError>>(self) -> Result<T, ScenarioError> {
        self.word.text.parse().map_err(|source| ScenarioError::Signal {
            line: self.line,
            column: self.word.column,
            source,
        })
    }
}

impl<'a> From<Located<'a>> for Word<'a> {
    fn from(located: Located<'a>) -> Self {
        located.word
    }
}
