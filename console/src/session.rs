use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant as HostInstant};

use netcfg_core::overrides::{Overrides, parse_line};
use netcfg_core::platform::Platform;
use netcfg_core::registry::{HandleSlots, TEST_NETWORK_COUNT, TestRegistry};
use netcfg_core::resolve::{ResolvedConfig, resolve, resolve_hardware};

use crate::host_api::HostNetworkApi;
use crate::render;

pub const HELP_TOPICS: &[(&str, &str)] = &[
    (
        "platform",
        "platform [stm32f4|nrf5x]         - show or switch the default table",
    ),
    (
        "set",
        "set <key> <value>                - override a parameter or selector",
    ),
    (
        "unset",
        "unset <key>                      - drop an override",
    ),
    (
        "load",
        "load <path>                      - apply an override file",
    ),
    (
        "show",
        "show [params|records|registry]   - print the resolved configuration",
    ),
    (
        "up",
        "up                               - bring up every configured network",
    ),
    (
        "down",
        "down                             - tear down networks brought up",
    ),
    (
        "help",
        "help [topic]                     - show help for a command",
    ),
];

pub struct Session {
    platform: Platform,
    overrides: Overrides,
    handles: HandleSlots,
    /// Configuration the open handles were brought up with.
    live: Option<ResolvedConfig>,
    api: HostNetworkApi,
    transcript: Option<TranscriptLogger>,
    started_at: HostInstant,
}

impl Session {
    pub fn new(platform: Platform, transcript: Option<&Path>) -> io::Result<Self> {
        let transcript = transcript.map(TranscriptLogger::new).transpose()?;
        Ok(Self {
            platform,
            overrides: Overrides::new(),
            handles: [None; TEST_NETWORK_COUNT],
            live: None,
            api: HostNetworkApi::new(platform),
            transcript,
            started_at: HostInstant::now(),
        })
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn handle_command(&mut self, line: &str) -> io::Result<Vec<String>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let elapsed = self.started_at.elapsed();
        self.record(elapsed, TranscriptRole::Host, &[trimmed.to_string()])?;

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        let lines = match command.to_ascii_lowercase().as_str() {
            "help" => Self::handle_help(rest),
            "platform" => self.handle_platform(rest),
            "set" => self.handle_set(rest),
            "unset" => self.handle_unset(rest),
            "load" => self.handle_load(rest),
            "show" => self.handle_show(rest),
            "up" => self.handle_up(),
            "down" => self.handle_down(),
            _ => vec![format!("ERR unknown command `{command}`; type `help`")],
        };

        self.record(elapsed, TranscriptRole::Console, &lines)?;
        Ok(lines)
    }

    /// Applies an override file before the first command.
    pub fn load_file(&mut self, path: &str) -> Vec<String> {
        self.handle_load(path)
    }

    fn handle_help(topic: &str) -> Vec<String> {
        let mut lines = Vec::new();
        if topic.is_empty() {
            lines.push("Available commands:".to_string());
            for (_, detail) in HELP_TOPICS {
                lines.push(format!("  {detail}"));
            }
            lines.push("Type `help <topic>` for a specific command.".to_string());
        } else if let Some((_, detail)) = HELP_TOPICS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(topic))
        {
            lines.push((*detail).to_string());
        } else {
            lines.push(format!("No help available for `{topic}`."));
            lines.push(format!("Available topics: {}", help_topic_list()));
        }
        lines
    }

    fn handle_platform(&mut self, rest: &str) -> Vec<String> {
        if rest.is_empty() {
            return vec![format!("platform {}", self.platform)];
        }
        if let Some(busy) = self.busy() {
            return busy;
        }
        match Platform::from_name(rest) {
            Some(platform) => {
                self.platform = platform;
                self.api.set_platform(platform);
                vec![format!("OK platform {platform}")]
            }
            None => vec![format!("ERR unknown platform `{rest}` (stm32f4, nrf5x)")],
        }
    }

    fn handle_set(&mut self, rest: &str) -> Vec<String> {
        if let Some(busy) = self.busy() {
            return busy;
        }
        let Some((key, value)) = rest.split_once(char::is_whitespace) else {
            return vec!["ERR syntax expected `set <key> <value>`".to_string()];
        };
        let assignment = format!("{key} = {}", value.trim());
        let Ok(Some(parsed)) = parse_line(&assignment) else {
            return vec![format!("ERR syntax bad value `{}`", value.trim())];
        };

        // `set` replaces an earlier override of the same key.
        let mut candidate = self.overrides.clone();
        if let Err(error) = candidate.unset(parsed.key) {
            return vec![format!("ERR {key}: {error}")];
        }
        match candidate.apply(parsed.key, parsed.value) {
            Ok(()) => {
                self.overrides = candidate;
                vec![format!("OK {key}")]
            }
            Err(error) => vec![format!("ERR {key}: {error}")],
        }
    }

    fn handle_unset(&mut self, key: &str) -> Vec<String> {
        if let Some(busy) = self.busy() {
            return busy;
        }
        match self.overrides.unset(key) {
            Ok(true) => vec![format!("OK {key} back to default")],
            Ok(false) => vec![format!("OK {key} was not overridden")],
            Err(error) => vec![format!("ERR {key}: {error}")],
        }
    }

    fn handle_load(&mut self, path: &str) -> Vec<String> {
        if let Some(busy) = self.busy() {
            return busy;
        }
        if path.is_empty() {
            return vec!["ERR syntax expected `load <path>`".to_string()];
        }
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => return vec![format!("ERR load {path}: {error}")],
        };
        let mut candidate = self.overrides.clone();
        match candidate.load_source(&source) {
            Ok(count) => {
                self.overrides = candidate;
                vec![format!("OK loaded {count} override(s) from {path}")]
            }
            Err(error) => vec![format!("ERR load {path}: {error}")],
        }
    }

    fn handle_show(&self, what: &str) -> Vec<String> {
        match what.to_ascii_lowercase().as_str() {
            "" | "params" => match resolve_hardware(self.platform, &self.overrides) {
                Ok(hardware) => render::parameter_table(&hardware),
                Err(error) => vec![format!(
                    "ERR {} rejected a {:?} value",
                    error.parameter, error.found
                )],
            },
            "records" => match resolve(self.platform, &self.overrides) {
                Ok(resolved) => render::record_lines(self.platform, &resolved.records),
                Err(error) => vec![format!("ERR {error}")],
            },
            "registry" => self.show_registry(),
            other => vec![format!("ERR unknown view `{other}` (params, records, registry)")],
        }
    }

    fn show_registry(&self) -> Vec<String> {
        if let Some(live) = &self.live {
            let registry = TestRegistry::with_handles(&live.records, self.handles);
            let mut lines = vec![format!(
                "registry ({} entries, live, driver holds {})",
                registry.len(),
                self.api.live_count()
            )];
            lines.extend(render::registry_lines(live.hardware.platform, &registry));
            return lines;
        }
        match resolve(self.platform, &self.overrides) {
            Ok(resolved) => {
                let registry = TestRegistry::new(&resolved.records);
                let mut lines = vec![format!("registry ({} entries)", registry.len())];
                lines.extend(render::registry_lines(self.platform, &registry));
                lines
            }
            Err(error) => vec![format!("ERR {error}")],
        }
    }

    fn handle_up(&mut self) -> Vec<String> {
        if self.live.is_some() {
            return vec!["ERR networks are already up; run `down` first".to_string()];
        }
        let resolved = match resolve(self.platform, &self.overrides) {
            Ok(resolved) => resolved,
            Err(error) => return vec![format!("ERR {error}")],
        };

        let mut registry = TestRegistry::new(&resolved.records);
        let result = registry.bring_up(&mut self.api);
        self.handles = registry.into_handles();

        let mut lines = self.api.take_log();
        match result {
            Ok(0) => lines.push("OK nothing to bring up; no module selected".to_string()),
            Ok(count) => lines.push(format!("OK {count} network(s) up")),
            Err(error) => lines.push(format!("ERR {error}")),
        }
        if self.handles.iter().any(Option::is_some) {
            self.live = Some(resolved);
        }
        lines
    }

    fn handle_down(&mut self) -> Vec<String> {
        let Some(live) = self.live.take() else {
            return vec!["OK nothing is up".to_string()];
        };
        let mut registry = TestRegistry::with_handles(&live.records, self.handles);
        let result = registry.tear_down(&mut self.api);
        self.handles = registry.into_handles();

        let mut lines = self.api.take_log();
        match result {
            Ok(count) => lines.push(format!("OK {count} network(s) down")),
            Err(error) => lines.push(format!("ERR {error}")),
        }
        lines
    }

    fn busy(&self) -> Option<Vec<String>> {
        self.live
            .as_ref()
            .map(|_| vec!["ERR networks are up; run `down` first".to_string()])
    }

    fn record(
        &mut self,
        elapsed: Duration,
        role: TranscriptRole,
        lines: &[String],
    ) -> io::Result<()> {
        if let Some(transcript) = self.transcript.as_mut() {
            for line in lines {
                transcript.append_line(elapsed, role, line)?;
            }
        }
        Ok(())
    }
}

struct TranscriptLogger {
    writer: BufWriter<std::fs::File>,
}

impl TranscriptLogger {
    fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut logger = Self {
            writer: BufWriter::new(file),
        };

        logger.write_header()?;
        Ok(logger)
    }

    fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.writer, "# Network test configuration console transcript")?;
        writeln!(
            self.writer,
            "# Timestamps are milliseconds since session start"
        )?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn append_line(
        &mut self,
        elapsed: Duration,
        role: TranscriptRole,
        line: &str,
    ) -> io::Result<()> {
        writeln!(
            self.writer,
            "[+{:>6} ms] {} {}",
            elapsed.as_millis(),
            role.prefix(),
            line
        )?;
        self.writer.flush()
    }
}

#[derive(Clone, Copy)]
enum TranscriptRole {
    Host,
    Console,
}

impl TranscriptRole {
    fn prefix(self) -> &'static str {
        match self {
            TranscriptRole::Host => "HOST>",
            TranscriptRole::Console => "CON <",
        }
    }
}

fn help_topic_list() -> String {
    HELP_TOPICS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
