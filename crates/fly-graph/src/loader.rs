//! Map-file loader.
//!
//! # File format
//!
//! One directive per line.  Blank lines and lines starting with `#` are
//! ignored.
//!
//! ```text
//! nb_drones: 4
//! start_hub: base 0 0 [color=green max_drones=4]
//! hub: gate 1 0 [zone=restricted max_drones=2]
//! hub: wall 1 1 [zone=blocked]
//! end_hub: goal 2 0
//! connection: base-gate [max_link_capacity=2]
//! connection: gate-goal
//! ```
//!
//! | Directive     | Allowed metadata                                         |
//! |---------------|----------------------------------------------------------|
//! | `nb_drones:`  | none (must be the first directive)                       |
//! | `start_hub:`  | `zone`, `color`, `max_drones`                            |
//! | `end_hub:`    | `zone`, `color`, `max_drones`                            |
//! | `hub:`        | `zone`, `color`, `max_drones`                            |
//! | `connection:` | `max_link_capacity`                                      |
//!
//! Once the first `connection:` appears, only connections may follow.
//!
//! Every rejection is a [`MapError::Syntax`] carrying the 1-based line and
//! the cause; whole-file checks (missing start, …) carry `line: None`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::zone::{is_valid_zone_name, Zone, ZoneType};
use crate::{MapError, MapResult, ZoneMap, ZoneMapBuilder};

const ZONE_META_KEYS: &[&str] = &["zone", "color", "max_drones"];
const CONN_META_KEYS: &[&str] = &["max_link_capacity"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a map file.
pub fn load_map_file(path: &Path) -> MapResult<ZoneMap> {
    let file = File::open(path)?;
    load_map_reader(BufReader::new(file))
}

/// Like [`load_map_file`] but accepts any buffered source.
pub fn load_map_reader<R: BufRead>(reader: R) -> MapResult<ZoneMap> {
    let mut parser = MapParser::default();
    for (i, line) in reader.lines().enumerate() {
        parser.feed(i + 1, &line?)?;
    }
    parser.finish()
}

/// Parse a map held in memory.
pub fn parse_map(text: &str) -> MapResult<ZoneMap> {
    load_map_reader(text.as_bytes())
}

// ── Parser state ──────────────────────────────────────────────────────────────

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    #[default]
    Header,
    Zones,
    Connections,
}

/// Line-at-a-time parser.  Duplicate and reference checks happen here, at the
/// offending line, so that errors can name it; the builder repeats them as a
/// final structural check.
#[derive(Default)]
struct MapParser {
    phase:     Phase,
    builder:   Option<ZoneMapBuilder>,
    names:     FxHashSet<String>,
    pairs:     FxHashSet<(String, String)>,
    has_start: bool,
    has_end:   bool,
}

/// Cause of a rejected line, before the line number is attached.
type Cause = String;

fn syntax(line: usize, cause: impl Into<String>) -> MapError {
    MapError::Syntax { line: Some(line), cause: cause.into() }
}

impl MapParser {
    fn feed(&mut self, line_no: usize, raw: &str) -> MapResult<()> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match self.phase {
            Phase::Header => {
                let Some(rest) = line.strip_prefix("nb_drones:") else {
                    return Err(syntax(
                        line_no,
                        "First non-comment line must be nb_drones: <positive_integer>",
                    ));
                };
                let n = positive_int(rest, "nb_drones").map_err(|c| syntax(line_no, c))?;
                self.builder = Some(ZoneMapBuilder::new(n));
                self.phase = Phase::Zones;
                Ok(())
            }
            Phase::Zones if !line.starts_with("connection:") => {
                self.zone_line(line).map_err(|c| syntax(line_no, c))
            }
            Phase::Zones | Phase::Connections => {
                self.phase = Phase::Connections;
                let Some(rest) = line.strip_prefix("connection:") else {
                    return Err(syntax(
                        line_no,
                        "Expected connection: zone1-zone2 or zone definitions before connections",
                    ));
                };
                self.connection_line(rest).map_err(|c| syntax(line_no, c))
            }
        }
    }

    fn finish(self) -> MapResult<ZoneMap> {
        let file_error = |cause: &str| MapError::Syntax { line: None, cause: cause.to_owned() };

        let Some(builder) = self.builder else {
            return Err(file_error("File must define nb_drones: <positive_integer>"));
        };
        if !self.has_start {
            return Err(file_error("File must define exactly one start_hub:"));
        }
        if !self.has_end {
            return Err(file_error("File must define exactly one end_hub:"));
        }
        builder.build()
    }

    // ── Zone lines ────────────────────────────────────────────────────────

    fn zone_line(&mut self, line: &str) -> Result<(), Cause> {
        let (kind, rest) = if let Some(rest) = line.strip_prefix("start_hub:") {
            ("start_hub", rest)
        } else if let Some(rest) = line.strip_prefix("end_hub:") {
            ("end_hub", rest)
        } else if let Some(rest) = line.strip_prefix("hub:") {
            ("hub", rest)
        } else {
            return Err("Expected start_hub:, end_hub:, or hub: (or connection: after zones)".into());
        };

        let (name, x, y, meta) = zone_fields(rest, kind)?;

        let zone = match kind {
            "start_hub" => {
                if self.has_start {
                    return Err("Duplicate start_hub: exactly one allowed".into());
                }
                Zone::start(name, x, y)
            }
            "end_hub" => {
                if self.has_end {
                    return Err("Duplicate end_hub: exactly one allowed".into());
                }
                Zone::end(name, x, y)
            }
            _ => Zone::hub(name, x, y),
        };
        let zone = apply_zone_meta(zone, &meta)?;

        if !self.names.insert(zone.name.clone()) {
            return Err(format!("Duplicate zone name: {:?}", zone.name));
        }
        self.has_start |= zone.is_start;
        self.has_end |= zone.is_end;
        if let Some(b) = self.builder.as_mut() {
            b.add_zone(zone);
        }
        Ok(())
    }

    // ── Connection lines ──────────────────────────────────────────────────

    fn connection_line(&mut self, rest: &str) -> Result<(), Cause> {
        let rest = rest.trim();
        if rest.is_empty() {
            return Err("Missing zone1-zone2 after connection:".into());
        }

        let (head, meta) = split_metadata(rest)?;
        let meta = match meta {
            Some(m) => parse_metadata(m, CONN_META_KEYS)?,
            None => Vec::new(),
        };

        let Some((a, b)) = head.split_once('-') else {
            return Err("Connection must be zone1-zone2 (exactly one dash)".into());
        };
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            return Err("Both zone names in connection must be non-empty".into());
        }
        if a.contains(char::is_whitespace) || b.contains(char::is_whitespace) {
            return Err("Zone names cannot contain spaces".into());
        }
        for name in [a, b] {
            if !self.names.contains(name) {
                return Err(format!("Connection references undefined zone: {name:?}"));
            }
        }
        if a == b {
            return Err(format!("Connection cannot join a zone to itself: {a:?}"));
        }

        let pair = if a <= b { (a.to_owned(), b.to_owned()) } else { (b.to_owned(), a.to_owned()) };
        if !self.pairs.insert(pair) {
            return Err(format!("Duplicate connection: {a}-{b} (same as {b}-{a})"));
        }

        let mut capacity = 1;
        for (key, value) in &meta {
            if key == "max_link_capacity" {
                capacity = positive_int(value, "max_link_capacity")?;
            }
        }

        if let Some(builder) = self.builder.as_mut() {
            builder.add_connection(a, b, capacity);
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Split `rest` into the part before `[` and the trailing metadata block.
fn split_metadata(rest: &str) -> Result<(&str, Option<&str>), Cause> {
    match rest.find('[') {
        None => Ok((rest, None)),
        Some(i) => {
            if !rest[i..].contains(']') {
                return Err("Unclosed metadata bracket [...]".into());
            }
            Ok((rest[..i].trim(), Some(&rest[i..])))
        }
    }
}

/// Parse `[key=value key=value ...]`; values are single tokens.
fn parse_metadata(block: &str, allowed: &[&str]) -> Result<Vec<(String, String)>, Cause> {
    let block = block.trim();
    let Some(inner) = block.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return Err("Metadata must be enclosed in [...]".into());
    };

    let mut out = Vec::new();
    for part in inner.split_whitespace() {
        let Some((key, value)) = part.split_once('=') else {
            return Err(format!("Invalid metadata token: {part:?}"));
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(format!("Invalid metadata key=value: {part:?}"));
        }
        if !allowed.contains(&key) {
            return Err(format!("Unknown metadata key: {key:?}"));
        }
        out.push((key.to_owned(), value.to_owned()));
    }
    Ok(out)
}

/// Parse `<name> <x> <y> [meta]` following a zone prefix.
fn zone_fields(rest: &str, kind: &str) -> Result<(String, i32, i32, Vec<(String, String)>), Cause> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Err(format!("Missing name and coordinates after {kind}"));
    }

    let (head, meta) = split_metadata(rest)?;
    let meta = match meta {
        Some(m) => parse_metadata(m, ZONE_META_KEYS)?,
        None => Vec::new(),
    };

    let parts: Vec<&str> = head.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(format!("{kind} requires name and two integer coordinates (x y)"));
    }
    let name = parts[0];
    if !is_valid_zone_name(name) {
        return Err("Zone names cannot contain dashes or spaces (connection syntax)".into());
    }
    let (Ok(x), Ok(y)) = (parts[1].parse::<i32>(), parts[2].parse::<i32>()) else {
        return Err("Zone coordinates must be integers".into());
    };
    if parts.len() > 3 {
        return Err("Extra tokens after coordinates (put metadata in [...])".into());
    }

    Ok((name.to_owned(), x, y, meta))
}

fn apply_zone_meta(mut zone: Zone, meta: &[(String, String)]) -> Result<Zone, Cause> {
    for (key, value) in meta {
        match key.as_str() {
            "zone" => {
                zone.kind = value.parse::<ZoneType>().map_err(|_| {
                    format!(
                        "Invalid zone type: {value:?}. Must be one of: \
                         normal, blocked, restricted, priority"
                    )
                })?;
            }
            "color" => zone.color = Some(value.clone()),
            "max_drones" => zone.max_drones = positive_int(value, "max_drones")?,
            _ => {}
        }
    }
    Ok(zone)
}

fn positive_int(value: &str, what: &str) -> Result<u32, Cause> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{what} must not be empty"));
    }
    let n: i64 = value
        .parse()
        .map_err(|_| format!("{what} must be an integer: {value:?}"))?;
    if n < 1 {
        return Err(format!("{what} must be a positive integer: {n}"));
    }
    u32::try_from(n).map_err(|_| format!("{what} is too large: {n}"))
}
