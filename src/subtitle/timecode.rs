// Subtitle timecode conversion

/// Convert a subtitle timecode (`HH:MM:SS,mmm` or `HH:MM:SS.mmm`) to whole seconds.
///
/// Fractional seconds are truncated. Anything that does not split into exactly
/// three numeric `:`-separated parts is treated as the start of the file. Each
/// part must be a whole number after trimming, so trailing text such as
/// `05,000abc` makes the timecode 0 rather than being cut off.
pub fn to_seconds(timecode: &str) -> u64 {
    let normalized = timecode.replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    let [hours, minutes, seconds] = parts[..] else {
        return 0;
    };

    let parse = |part: &str| part.trim().parse::<f64>().ok();

    match (parse(hours), parse(minutes), parse(seconds)) {
        (Some(h), Some(m), Some(s)) => {
            let total = h * 3600.0 + m * 60.0 + s;
            if total.is_finite() && total >= 0.0 {
                total.floor() as u64
            } else {
                0
            }
        }
        _ => 0,
    }
}
