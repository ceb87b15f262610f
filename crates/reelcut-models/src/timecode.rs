//! Timecode formatting and parsing.
//!
//! Two output formats are supported:
//! - subtitle timecodes `HH:MM:SS,mmm` (millisecond precision)
//! - edit-list timecodes `HH:MM:SS:FF` (frame precision, non-drop frame)
//!
//! Hours are never wrapped at 24h. Every function here is pure.

use thiserror::Error;

/// Frame rate used for edit-list timecodes unless configured otherwise.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Frame positions are snapped to this many steps per frame before flooring,
/// so `n + k/fps` maps back to frame `k` despite binary rounding.
const FRAME_SNAP_STEPS: f64 = 1e6;

/// Result type for timecode operations.
pub type TimecodeResult<T> = Result<T, TimecodeError>;

/// Timecode conversion error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimecodeError {
    #[error("Timecode input must be finite and non-negative, got {0}")]
    InvalidInput(f64),

    #[error("Frame rate must be finite and positive, got {0}")]
    InvalidFrameRate(f64),

    #[error("Invalid timecode format '{0}'")]
    InvalidFormat(String),
}

/// Whole clock fields plus the sub-second remainder.
struct ClockFields {
    hours: u64,
    minutes: u64,
    secs: u64,
    frac: f64,
}

fn split_clock(seconds: f64) -> TimecodeResult<ClockFields> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(TimecodeError::InvalidInput(seconds));
    }

    Ok(ClockFields {
        hours: (seconds / 3600.0).floor() as u64,
        minutes: ((seconds % 3600.0) / 60.0).floor() as u64,
        secs: (seconds % 60.0).floor() as u64,
        frac: seconds % 1.0,
    })
}

fn validate_frame_rate(frame_rate: f64) -> TimecodeResult<()> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(TimecodeError::InvalidFrameRate(frame_rate));
    }
    Ok(())
}

/// Number of distinct frame labels within one second (`FF` ranges over `0..frames_per_second`).
fn frames_per_second(frame_rate: f64) -> u64 {
    (frame_rate.ceil() as u64).max(1)
}

/// Format seconds as a subtitle timecode (`HH:MM:SS,mmm`).
///
/// Milliseconds are rounded and clamped to 999, so a value just below a
/// whole second never spills into the seconds field.
///
/// # Examples
/// ```
/// use reelcut_models::timecode::seconds_to_subtitle_timecode;
/// assert_eq!(seconds_to_subtitle_timecode(5.0).unwrap(), "00:00:05,000");
/// assert_eq!(seconds_to_subtitle_timecode(3661.25).unwrap(), "01:01:01,250");
/// ```
pub fn seconds_to_subtitle_timecode(seconds: f64) -> TimecodeResult<String> {
    let clock = split_clock(seconds)?;
    let millis = ((clock.frac * 1000.0).round() as u64).min(999);

    Ok(format!(
        "{:02}:{:02}:{:02},{:03}",
        clock.hours, clock.minutes, clock.secs, millis
    ))
}

/// Format seconds as a non-drop-frame edit-list timecode (`HH:MM:SS:FF`).
///
/// # Examples
/// ```
/// use reelcut_models::timecode::seconds_to_edit_timecode;
/// assert_eq!(seconds_to_edit_timecode(65.5, 30.0).unwrap(), "00:01:05:15");
/// ```
pub fn seconds_to_edit_timecode(seconds: f64, frame_rate: f64) -> TimecodeResult<String> {
    validate_frame_rate(frame_rate)?;
    let clock = split_clock(seconds)?;

    let max_frame = frames_per_second(frame_rate) - 1;
    let position = (clock.frac * frame_rate * FRAME_SNAP_STEPS).round() / FRAME_SNAP_STEPS;
    let frames = (position.floor() as u64).min(max_frame);

    Ok(format!(
        "{:02}:{:02}:{:02}:{:02}",
        clock.hours, clock.minutes, clock.secs, frames
    ))
}

/// Parse `HH:MM:SS` into whole seconds, checking minute/second ranges.
fn parse_clock(clock: &str, original: &str) -> TimecodeResult<u64> {
    let invalid = || TimecodeError::InvalidFormat(original.to_string());

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let hours = parse_digits(parts[0], 2).ok_or_else(invalid)?;
    let minutes = parse_digits(parts[1], 2).ok_or_else(invalid)?;
    let secs = parse_digits(parts[2], 2).ok_or_else(invalid)?;
    if minutes >= 60 || secs >= 60 {
        return Err(invalid());
    }

    Ok(hours * 3600 + minutes * 60 + secs)
}

/// Parse an all-digit field of at least `min_width` characters.
fn parse_digits(field: &str, min_width: usize) -> Option<u64> {
    if field.len() < min_width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse a subtitle timecode (`HH:MM:SS,mmm`) back into seconds.
pub fn parse_subtitle_timecode(timecode: &str) -> TimecodeResult<f64> {
    let invalid = || TimecodeError::InvalidFormat(timecode.to_string());

    let (clock, millis) = timecode.trim().split_once(',').ok_or_else(invalid)?;
    if millis.len() != 3 {
        return Err(invalid());
    }
    let millis = parse_digits(millis, 3).ok_or_else(invalid)?;
    let whole = parse_clock(clock, timecode)?;

    Ok(whole as f64 + millis as f64 / 1000.0)
}

/// Parse an edit-list timecode (`HH:MM:SS:FF`) back into seconds.
pub fn parse_edit_timecode(timecode: &str, frame_rate: f64) -> TimecodeResult<f64> {
    validate_frame_rate(frame_rate)?;
    let invalid = || TimecodeError::InvalidFormat(timecode.to_string());

    let (clock, frames) = timecode.trim().rsplit_once(':').ok_or_else(invalid)?;
    let frames = parse_digits(frames, 2).ok_or_else(invalid)?;
    if frames >= frames_per_second(frame_rate) {
        return Err(invalid());
    }
    let whole = parse_clock(clock, timecode)?;

    Ok(whole as f64 + frames as f64 / frame_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_timecode_basic() {
        assert_eq!(seconds_to_subtitle_timecode(0.0).unwrap(), "00:00:00,000");
        assert_eq!(seconds_to_subtitle_timecode(5.0).unwrap(), "00:00:05,000");
        assert_eq!(seconds_to_subtitle_timecode(12.345).unwrap(), "00:00:12,345");
        assert_eq!(seconds_to_subtitle_timecode(3723.5).unwrap(), "01:02:03,500");
    }

    #[test]
    fn test_subtitle_timecode_clamps_millis() {
        assert_eq!(seconds_to_subtitle_timecode(1.9996).unwrap(), "00:00:01,999");
    }

    #[test]
    fn test_hours_not_wrapped() {
        assert_eq!(seconds_to_subtitle_timecode(90000.0).unwrap(), "25:00:00,000");
        assert_eq!(
            seconds_to_edit_timecode(359999.0, DEFAULT_FRAME_RATE).unwrap(),
            "99:59:59:00"
        );
        assert_eq!(seconds_to_subtitle_timecode(360000.0).unwrap(), "100:00:00,000");
    }

    #[test]
    fn test_edit_timecode() {
        assert_eq!(seconds_to_edit_timecode(65.5, 30.0).unwrap(), "00:01:05:15");
        assert_eq!(seconds_to_edit_timecode(0.0, 30.0).unwrap(), "00:00:00:00");
        assert_eq!(seconds_to_edit_timecode(1.0 / 30.0, 30.0).unwrap(), "00:00:00:01");
        assert_eq!(seconds_to_edit_timecode(2.5, 24.0).unwrap(), "00:00:02:12");
        assert_eq!(seconds_to_edit_timecode(0.999, 25.0).unwrap(), "00:00:00:24");
    }

    #[test]
    fn test_edit_timecode_floors_just_below_boundary() {
        // 0.999999 of a frame is still frame 0
        assert_eq!(seconds_to_edit_timecode(0.0333333, 30.0).unwrap(), "00:00:00:00");
        assert_eq!(seconds_to_edit_timecode(65.0333333, 30.0).unwrap(), "00:01:05:00");
        assert_eq!(seconds_to_edit_timecode(0.0333334, 30.0).unwrap(), "00:00:00:01");
    }

    #[test]
    fn test_negative_and_non_finite_rejected() {
        assert_eq!(
            seconds_to_subtitle_timecode(-1.0),
            Err(TimecodeError::InvalidInput(-1.0))
        );
        assert!(seconds_to_subtitle_timecode(f64::NAN).is_err());
        assert!(seconds_to_edit_timecode(f64::INFINITY, 30.0).is_err());
        assert!(seconds_to_edit_timecode(-0.5, 30.0).is_err());
    }

    #[test]
    fn test_invalid_frame_rate() {
        assert_eq!(
            seconds_to_edit_timecode(1.0, 0.0),
            Err(TimecodeError::InvalidFrameRate(0.0))
        );
        assert!(seconds_to_edit_timecode(1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_parse_subtitle_timecode() {
        assert_eq!(parse_subtitle_timecode("00:00:05,000").unwrap(), 5.0);
        assert_eq!(parse_subtitle_timecode("01:02:03,500").unwrap(), 3723.5);
        assert!(parse_subtitle_timecode("00:00:05.000").is_err());
        assert!(parse_subtitle_timecode("00:61:05,000").is_err());
        assert!(parse_subtitle_timecode("00:00:05,50").is_err());
        assert!(parse_subtitle_timecode("aa:00:05,000").is_err());
    }

    #[test]
    fn test_parse_edit_timecode() {
        assert_eq!(parse_edit_timecode("00:01:05:15", 30.0).unwrap(), 65.5);
        assert!(parse_edit_timecode("00:01:05:30", 30.0).is_err());
        assert!(parse_edit_timecode("00:01:05", 30.0).is_err());
    }

    #[test]
    fn test_subtitle_round_trip() {
        let samples = [0.0, 0.001, 0.5, 59.999, 61.07, 3599.999, 86399.123, 359999.999];
        for seconds in samples {
            let rendered = seconds_to_subtitle_timecode(seconds).unwrap();
            let parsed = parse_subtitle_timecode(&rendered).unwrap();
            assert_eq!(seconds_to_subtitle_timecode(parsed).unwrap(), rendered);
        }
    }

    #[test]
    fn test_edit_round_trip_every_frame() {
        for frame in 0..30 {
            let rendered = format!("00:10:59:{:02}", frame);
            let parsed = parse_edit_timecode(&rendered, 30.0).unwrap();
            assert_eq!(seconds_to_edit_timecode(parsed, 30.0).unwrap(), rendered);
        }
    }
}
