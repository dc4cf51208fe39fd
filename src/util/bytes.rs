//! Human-readable file sizes for table cells.

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// IEC units with at most two decimals and no trailing zeros.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        return format!("{bytes} B");
    }
    let precision = if value >= 10.0 { 1 } else { 2 };
    let rendered = format!("{value:.precision$}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Cell text for an optional size; blank when the server omits it.
#[must_use]
pub fn format_size(bytes: Option<u64>) -> String {
    bytes.map(format_bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sizes_stay_in_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn larger_sizes_trim_precision() {
        assert_eq!(format_bytes(1024), "1 KiB");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(15 * 1024 * 1024), "15 MiB");
        assert_eq!(format_bytes(1_234_567), "1.18 MiB");
    }

    #[test]
    fn missing_size_is_blank() {
        assert_eq!(format_size(None), "");
        assert_eq!(format_size(Some(2048)), "2 KiB");
    }
}
