use regex::Regex;
use once_cell::sync::Lazy;
use log::{warn, debug};
use unicode_normalization::UnicodeNormalization;
use crate::subtitle_event::{SubtitleEvent, normalize_events};

// @module: Subtitle format parsers (ASS/SSA, SRT, SMI)

// @const: SRT time range regex
static SRT_TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @const: Blank-line block separator for SRT
static BLANK_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

// @const: ASS override tag ({\...}) and comment ({!...}) blocks
static ASS_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\\!].*?\}").unwrap());

// @const: SMI SYNC opening tag with start time in ms
static SMI_SYNC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<SYNC\s+Start\s*=\s*(\d+)[^>]*>").unwrap()
});

// @const: SMI paragraph opening tag
static SMI_P_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<P[^>]*>").unwrap());

// @const: HTML line break tag
static HTML_BR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

// @const: Any remaining HTML-ish tag
static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Provisional SMI event duration, corrected by the normalizer
const SMI_PLACEHOLDER_DURATION_MS: u64 = 2000;

/// Supported source subtitle formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// Advanced SubStation Alpha (.ass / .ssa)
    Ass,
    /// SubRip (.srt)
    Srt,
    /// SAMI (.smi / .sami)
    Smi,
}

impl SubtitleFormat {
    /// Map a file extension to a format, if recognized
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "ass" | "ssa" => Some(Self::Ass),
            "srt" => Some(Self::Srt),
            "smi" | "sami" => Some(Self::Smi),
            _ => None,
        }
    }

    /// Parse raw subtitle text into events, sorted by start time.
    ///
    /// Lines and blocks that do not match the format's expected pattern are
    /// silently skipped. Returned events are not normalized.
    pub fn parse(&self, text: &str) -> Vec<SubtitleEvent> {
        match self {
            Self::Ass => parse_ass_events(text),
            Self::Srt => parse_srt_events(text),
            Self::Smi => parse_smi_events(text),
        }
    }
}

/// Parse subtitle text using the extension hint when recognized, otherwise try
/// each parser in order (SRT, ASS, SMI) and take the first non-empty result.
///
/// Returns a normalized, start-sorted, overlap-free event list. An empty list
/// means no parser matched; callers treat that as an empty track rather than
/// an error.
pub fn load_events(text: &str, extension_hint: &str) -> Vec<SubtitleEvent> {
    let events = if let Some(format) = SubtitleFormat::from_extension(extension_hint) {
        format.parse(text)
    } else {
        let mut found = Vec::new();
        for format in [SubtitleFormat::Srt, SubtitleFormat::Ass, SubtitleFormat::Smi] {
            let parsed = format.parse(text);
            if !parsed.is_empty() {
                debug!("Fallback dispatch matched {:?} with {} events", format, parsed.len());
                found = parsed;
                break;
            }
        }
        found
    };

    if events.is_empty() {
        warn!("No subtitle events parsed (extension hint: '{}')", extension_hint);
    }

    normalize_events(events)
}

/// Canonical composition applied to all parsed text
fn nfc(text: &str) -> String {
    text.nfc().collect()
}

/// Parse ASS/SSA dialogue lines
fn parse_ass_events(text: &str) -> Vec<SubtitleEvent> {
    let mut events = Vec::new();

    for line in text.lines() {
        if !line.starts_with("Dialogue:") {
            continue;
        }

        // The payload is the 10th field and may itself contain commas
        let parts: Vec<&str> = line.splitn(10, ',').collect();
        if parts.len() < 10 {
            continue;
        }

        let start_ms = match SubtitleEvent::parse_ass_timestamp(parts[1]) {
            Ok(ms) => ms,
            Err(_) => continue,
        };
        let end_ms = match SubtitleEvent::parse_ass_timestamp(parts[2]) {
            Ok(ms) => ms,
            Err(_) => continue,
        };

        let stripped = ASS_TAG_REGEX.replace_all(parts[9], "");
        let cleaned = stripped.replace("\\N", "\n").replace("\\n", "\n");
        let cleaned = cleaned.trim();
        if !cleaned.is_empty() {
            events.push(SubtitleEvent::new(start_ms, end_ms, nfc(cleaned)));
        }
    }

    events.sort_by_key(|event| event.start_ms);
    events
}

/// Parse SRT blank-line-delimited blocks
fn parse_srt_events(text: &str) -> Vec<SubtitleEvent> {
    let mut events = Vec::new();

    for block in BLANK_LINE_REGEX.split(text.trim()) {
        let caps = match SRT_TIME_RANGE_REGEX.captures(block) {
            Some(caps) => caps,
            None => continue,
        };

        let start_ms = srt_caps_to_ms(&caps, 1);
        let end_ms = srt_caps_to_ms(&caps, 5);

        // Everything that is neither the time range nor the numeric index is text
        let lines: Vec<&str> = block
            .lines()
            .filter(|line| !line.contains("-->"))
            .map(|line| line.trim())
            .filter(|line| !line.is_empty() && !line.chars().all(|c| c.is_ascii_digit()))
            .collect();

        let joined = lines.join("\n");
        if !joined.is_empty() {
            events.push(SubtitleEvent::new(start_ms, end_ms, nfc(&joined)));
        }
    }

    events.sort_by_key(|event| event.start_ms);
    events
}

/// Sum an SRT time range capture group (4 components) starting at the given index
fn srt_caps_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
    let component = |idx: usize| -> u64 {
        caps.get(idx).map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };
    (component(start_idx) * 3600 + component(start_idx + 1) * 60 + component(start_idx + 2)) * 1000
        + component(start_idx + 3)
}

/// Parse SMI SYNC blocks.
///
/// End times are a provisional start + 2000 ms placeholder; the normalizer
/// corrects them against the following event. When a `class=` attribute is
/// present, only `KRCC` paragraphs are kept (multi-language SMI files carry a
/// class per track).
fn parse_smi_events(text: &str) -> Vec<SubtitleEvent> {
    let data = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut events = Vec::new();

    // The regex crate has no lookahead, so bodies are sliced between
    // consecutive SYNC tag matches
    let sync_matches: Vec<(u64, usize, usize)> = SMI_SYNC_REGEX
        .captures_iter(&data)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let start_ms: u64 = caps.get(1)?.as_str().parse().ok()?;
            Some((start_ms, whole.start(), whole.end()))
        })
        .collect();

    for (i, &(start_ms, _, body_start)) in sync_matches.iter().enumerate() {
        let body_end = sync_matches
            .get(i + 1)
            .map_or(data.len(), |&(_, next_tag_start, _)| next_tag_start);
        let body = &data[body_start..body_end];

        let lines = extract_smi_lines(body);
        if !lines.is_empty() {
            let joined = lines.join("\n");
            events.push(SubtitleEvent::new(
                start_ms,
                start_ms + SMI_PLACEHOLDER_DURATION_MS,
                nfc(&joined),
            ));
        }
    }

    events.sort_by_key(|event| event.start_ms);
    events
}

/// Extract display lines from one SYNC body
fn extract_smi_lines(body: &str) -> Vec<String> {
    let mut lines = Vec::new();

    let p_matches: Vec<(usize, usize)> = SMI_P_REGEX
        .find_iter(body)
        .map(|m| (m.start(), m.end()))
        .collect();

    if p_matches.is_empty() {
        // Malformed SMI without <P> tags: strip every tag from the whole body
        collect_clean_lines(body, &mut lines);
        return lines;
    }

    for (i, &(tag_start, content_start)) in p_matches.iter().enumerate() {
        let content_end = p_matches
            .get(i + 1)
            .map_or(body.len(), |&(next_start, _)| next_start);

        let tag_lower = body[tag_start..content_start].to_lowercase();
        if tag_lower.contains("class=") && !tag_lower.contains("krcc") {
            continue;
        }

        collect_clean_lines(&body[content_start..content_end], &mut lines);
    }

    lines
}

/// Strip markup from an SMI fragment and append its non-empty lines
fn collect_clean_lines(fragment: &str, lines: &mut Vec<String>) {
    let with_breaks = HTML_BR_REGEX.replace_all(fragment, "\n");
    let stripped = HTML_TAG_REGEX.replace_all(&with_breaks, "");
    let cleaned = stripped.replace("\\N", "\n");

    for line in cleaned.lines() {
        let line = line.trim();
        if line.is_empty() || line == "&nbsp;" {
            continue;
        }
        lines.push(line.to_string());
    }
}
