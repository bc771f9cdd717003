//! Entry tokens used by the tree rendering.

use chrono::{DateTime, Utc};

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Human-readable binary size: `0B`, `500B`, `2K`, `1.5M`, `3G`.
///
/// G and M carry one decimal, dropped when it is zero; K is a whole number.
/// Rounding is half away from zero.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        "0B".to_string()
    } else if bytes >= GIB {
        one_decimal(bytes, GIB, 'G')
    } else if bytes >= MIB {
        one_decimal(bytes, MIB, 'M')
    } else if bytes >= KIB {
        format!("{}K", (bytes + KIB / 2) / KIB)
    } else {
        format!("{bytes}B")
    }
}

fn one_decimal(bytes: u64, unit: u64, suffix: char) -> String {
    let unit = u128::from(unit);
    let tenths = (u128::from(bytes) * 10 + unit / 2) / unit;
    let (whole, fraction) = (tenths / 10, tenths % 10);
    if fraction == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{fraction}{suffix}")
    }
}

/// `MM-DD HH:MM`, rendered as given (no timezone conversion).
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%m-%d %H:%M").to_string()
}

/// Lowercased text after the last `.`, or `file` when there is none.
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => name[dot + 1..].to_lowercase(),
        _ => "file".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_size_bytes() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1), "1B");
        assert_eq!(format_size(500), "500B");
        assert_eq!(format_size(1023), "1023B");
    }

    #[test]
    fn test_size_kibibytes_round_to_whole() {
        assert_eq!(format_size(1024), "1K");
        assert_eq!(format_size(1536), "2K");
        assert_eq!(format_size(1535), "1K");
        assert_eq!(format_size(MIB - 1), "1024K");
    }

    #[test]
    fn test_size_mebibytes_and_gibibytes() {
        assert_eq!(format_size(1_048_576), "1M");
        assert_eq!(format_size(1_572_864), "1.5M");
        assert_eq!(format_size(1_073_741_824), "1G");
        assert_eq!(format_size(2 * GIB + GIB / 2), "2.5G");
        // 1.95 MiB rounds up to 2.0 and drops the decimal.
        assert_eq!(format_size(MIB * 195 / 100 + 1), "2M");
        assert_eq!(format_size(u64::MAX), "17179869184G");
    }

    #[test]
    fn test_extension() {
        assert_eq!(file_extension("report.PDF"), "pdf");
        assert_eq!(file_extension("README"), "file");
        assert_eq!(file_extension("archive."), "file");
        assert_eq!(file_extension("backup.tar.GZ"), "gz");
        assert_eq!(file_extension(".gitignore"), "gitignore");
    }

    #[test]
    fn test_date_pattern() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap();
        assert_eq!(format_date(&at), "03-05 09:07");
    }
}
