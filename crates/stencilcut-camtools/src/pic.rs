//! PIC line-art import
//!
//! Reads the PIC drawing description written by `pstoedit -f pic` and turns
//! its `line` and `spline` statements into strokes. Coordinates are inches.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use stencilcut_core::{ConversionError, Point, Stroke};
use tracing::{debug, warn};

const NUMBER: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

static COORDINATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?:from|to)\s+({NUMBER})\s*,\s*({NUMBER})"))
        .expect("invalid regex pattern")
});

static KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:from|to)\b").expect("invalid regex pattern"));

/// Parse PIC text into strokes, in statement order
pub fn read_pic(content: &str) -> Result<Vec<Stroke>, ConversionError> {
    let mut strokes = Vec::new();
    let mut skipped = 0usize;

    for (line_number, statement) in logical_lines(content) {
        let statement = statement.trim();
        if statement.is_empty() || statement.starts_with('.') || statement.starts_with('#') {
            continue;
        }

        let body = strip_label(statement);
        let keyword = body.split_whitespace().next().unwrap_or_default();
        match keyword {
            "line" | "spline" => {
                if keyword == "spline" {
                    debug!("Line {}: spline approximated by its control polygon", line_number);
                }
                strokes.push(parse_polyline(line_number, body)?);
            }
            _ => {
                warn!("Line {}: skipping unsupported PIC statement '{}'", line_number, keyword);
                skipped += 1;
            }
        }
    }

    debug!("Read {} strokes from PIC ({} statements skipped)", strokes.len(), skipped);
    Ok(strokes)
}

/// Read and parse a PIC file
pub fn read_pic_file(path: &Path) -> Result<Vec<Stroke>, ConversionError> {
    let content = fs::read_to_string(path).map_err(|e| ConversionError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    read_pic(&content)
}

/// Join `\`-continued physical lines, keeping the first line number
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in content.lines().enumerate() {
        let (text, continued) = match raw.trim_end().strip_suffix('\\') {
            Some(head) => (head, true),
            None => (raw, false),
        };

        let (number, mut buffer) = pending.take().unwrap_or((index + 1, String::new()));
        if !buffer.is_empty() {
            buffer.push(' ');
        }
        buffer.push_str(text);

        if continued {
            pending = Some((number, buffer));
        } else {
            lines.push((number, buffer));
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }
    lines
}

/// Drop a leading `Label:` if present
fn strip_label(statement: &str) -> &str {
    match statement.split_once(':') {
        Some((label, rest))
            if !label.is_empty()
                && label.chars().next().is_some_and(|c| c.is_ascii_uppercase())
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            rest.trim_start()
        }
        _ => statement,
    }
}

fn parse_polyline(line_number: usize, body: &str) -> Result<Stroke, ConversionError> {
    let mut points = Vec::new();
    for caps in COORDINATE.captures_iter(body) {
        let x = parse_number(line_number, &caps[1])?;
        let y = parse_number(line_number, &caps[2])?;
        points.push(Point::new(x, y));
    }

    let keywords = KEYWORD.find_iter(body).count();
    if points.is_empty() || keywords != points.len() {
        return Err(ConversionError::Parse {
            line: line_number,
            reason: format!("malformed coordinate list in '{}'", body),
        });
    }

    // The source path returns to its start point.
    let closed = points.len() > 1 && points.first() == points.last();
    Stroke::with_closed(points, closed).map_err(|e| ConversionError::Parse {
        line: line_number,
        reason: e.to_string(),
    })
}

fn parse_number(line_number: usize, token: &str) -> Result<f64, ConversionError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConversionError::Parse {
            line: line_number,
            reason: format!("invalid number '{}'", token),
        })
}
