use std::path::Path;
use anyhow::Result;
use crate::file_utils::FileManager;
use crate::payload_fuser::FusedLine;
use crate::subtitle_event::SubtitleEvent;

// @module: ASS container serialization

/// Render fused dialogue lines into a complete ASS script.
///
/// The header carries a single minimal `Base` style; positioning, fonts, and
/// sizes are all forced per line by the payload's override tags.
pub fn render_ass(lines: &[FusedLine]) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push("[Script Info]".to_string());
    out.push("ScriptType: v4.00+".to_string());
    out.push("PlayResX: 1920".to_string());
    out.push("PlayResY: 1080".to_string());
    out.push("ScaledBorderAndShadow: yes".to_string());
    out.push(String::new());
    out.push("[V4+ Styles]".to_string());
    out.push(
        "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, \
         OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, \
         ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, \
         Alignment, MarginL, MarginR, MarginV, Encoding"
            .to_string(),
    );
    out.push(
        "Style: Base,Arial,36,&H00FFFFFF,&H000000FF,&H00000000,&H7F000000,\
         0,0,0,0,100,100,0,0,1,2,0,2,0,0,0,1"
            .to_string(),
    );
    out.push(String::new());
    out.push("[Events]".to_string());
    out.push(
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, \
         MarginV, Effect, Text"
            .to_string(),
    );

    for line in lines {
        out.push(format!(
            "Dialogue: 0,{},{},Base,,0,0,0,,{}",
            SubtitleEvent::format_ass_timestamp(line.start_ms),
            SubtitleEvent::format_ass_timestamp(line.end_ms),
            line.payload
        ));
    }

    out.join("\n")
}

/// Write fused dialogue lines to an ASS file with a UTF-8 BOM
pub fn write_ass<P: AsRef<Path>>(path: P, lines: &[FusedLine]) -> Result<()> {
    FileManager::write_with_bom(path, &render_ass(lines))
}
