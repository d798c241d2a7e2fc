//! Text and JSON rendering of log events.
//!
//! Text lines look like
//! `time="2017-10-18T12:00:00Z" level=info msg="started" scope=pkg`
//! (the message is always quoted, field values only when needed)
//! and JSON lines like
//! `{"level":"info","msg":"started","scope":"pkg","time":"2017-10-18T12:00:00Z"}`.
//! Both are newline terminated. Fields are ordered by key; a field named after
//! a reserved key (`time`, `level`, `msg`) is emitted as `fields.<key>`.

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use petal_ports::{Fields, Flags, Level, SharedSink, Writer};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::{Mutex, PoisonError};

const TIME_KEY: &str = "time";
const LEVEL_KEY: &str = "level";
const MESSAGE_KEY: &str = "msg";
const CLASH_PREFIX: &str = "fields.";

/// Writer rendering events as text or JSON lines into a swappable sink.
pub struct FormatWriter {
    state: Mutex<FormatState>,
}

struct FormatState {
    flags: Flags,
    output: Option<SharedSink>,
}

impl FormatWriter {
    /// Create a writer targeting `output` with the given format options.
    #[must_use]
    pub fn new(output: Option<SharedSink>, flags: Flags) -> Self {
        Self {
            state: Mutex::new(FormatState { flags, output }),
        }
    }

    /// Currently configured options.
    pub fn flags(&self) -> Flags {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flags
    }
}

impl fmt::Debug for FormatWriter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        formatter
            .debug_struct("FormatWriter")
            .field("flags", &state.flags)
            .field("has_output", &state.output.is_some())
            .finish()
    }
}

impl Writer for FormatWriter {
    fn set_flags(&self, flags: Flags) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flags = flags;
    }

    fn set_output(&self, output: Option<SharedSink>) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .output = output;
    }

    fn log(&self, level: Level, fields: &Fields, message: &str) {
        // The lock is held across the write so lines from this writer never interleave.
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(output) = state.output.as_ref() else {
            return;
        };
        let line = render(state.flags, &Local::now(), level, fields, message);
        output.write_line(&line);
    }

    fn flush(&self) {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(output) = state.output.as_ref() {
            output.flush();
        }
    }
}

/// Render one event according to `flags`, including the trailing newline.
///
/// `time` is only used when [`Flags::TIMESTAMP`] is set.
pub fn render<Tz>(
    flags: Flags,
    time: &DateTime<Tz>,
    level: Level,
    fields: &Fields,
    message: &str,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let time = flags
        .contains(Flags::TIMESTAMP)
        .then(|| time.to_rfc3339_opts(SecondsFormat::Secs, true));
    if flags.contains(Flags::JSON) {
        render_json(time.as_deref(), level, fields, message)
    } else {
        render_text(time.as_deref(), level, fields, message)
    }
}

fn render_text(time: Option<&str>, level: Level, fields: &Fields, message: &str) -> String {
    let mut line = String::new();
    if let Some(time) = time {
        append_pair(&mut line, TIME_KEY, time);
    }
    append_pair(&mut line, LEVEL_KEY, level.as_str());
    if !message.is_empty() {
        line.push(' ');
        line.push_str(MESSAGE_KEY);
        line.push('=');
        append_quoted(&mut line, message);
    }
    for (key, value) in prefixed_fields(fields) {
        append_pair(&mut line, &key, &text_value(value));
    }
    line.push('\n');
    line
}

fn render_json(time: Option<&str>, level: Level, fields: &Fields, message: &str) -> String {
    let mut payload = serde_json::Map::new();
    for (key, value) in prefixed_fields(fields) {
        payload.insert(key.into_owned(), value.clone());
    }
    payload.insert(
        LEVEL_KEY.to_string(),
        Value::String(level.as_str().to_string()),
    );
    payload.insert(MESSAGE_KEY.to_string(), Value::String(message.to_string()));
    if let Some(time) = time {
        payload.insert(TIME_KEY.to_string(), Value::String(time.to_string()));
    }

    serde_json::to_string(&Value::Object(payload)).map_or_else(
        |_| {
            format!(
                "{{\"level\":\"{}\",\"msg\":\"log serialization failed\"}}\n",
                level.as_str()
            )
        },
        |mut encoded| {
            encoded.push('\n');
            encoded
        },
    )
}

fn prefixed_fields(fields: &Fields) -> BTreeMap<Cow<'_, str>, &Value> {
    fields
        .iter()
        .map(|(key, value)| {
            let key = if matches!(key.as_str(), TIME_KEY | LEVEL_KEY | MESSAGE_KEY) {
                Cow::Owned(format!("{CLASH_PREFIX}{key}"))
            } else {
                Cow::Borrowed(key.as_str())
            };
            (key, value)
        })
        .collect()
}

fn text_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text.as_str()),
        Value::Null => Cow::Borrowed("<nil>"),
        other => Cow::Owned(other.to_string()),
    }
}

fn append_pair(line: &mut String, key: &str, value: &str) {
    if !line.is_empty() {
        line.push(' ');
    }
    line.push_str(key);
    line.push('=');
    if needs_quoting(value) {
        append_quoted(line, value);
    } else {
        line.push_str(value);
    }
}

fn needs_quoting(text: &str) -> bool {
    !text
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | '/' | '@' | '^' | '+'))
}

fn append_quoted(line: &mut String, text: &str) {
    line.push('"');
    for ch in text.chars() {
        match ch {
            '"' => line.push_str("\\\""),
            '\\' => line.push_str("\\\\"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            ch if ch.is_control() && u32::from(ch) < 0x80 => {
                let _ = write!(line, "\\x{:02x}", u32::from(ch));
            },
            ch if ch.is_control() => {
                let _ = write!(line, "\\u{:04x}", u32::from(ch));
            },
            ch => line.push(ch),
        }
    }
    line.push('"');
}
