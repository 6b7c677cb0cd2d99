/// Formats a byte count with 1024-based units and two decimals.
///
/// Anything still at or above 1024 after the TB step is shown in PB.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;

    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }

    format!("{size:.2} PB")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::cast_precision_loss)]
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0), "0.00 B");
    }

    #[test]
    fn test_format_bytes_bytes() {
        assert_eq!(format_bytes(1), "1.00 B");
        assert_eq!(format_bytes(100), "100.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
    }

    #[test]
    fn test_format_bytes_kilobytes() {
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(1024 * 1023), "1023.00 KB");
    }

    #[test]
    fn test_format_bytes_megabytes() {
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1024 * 1024 * 10 + 1024 * 512), "10.50 MB");
    }

    #[test]
    fn test_format_bytes_gigabytes() {
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
        assert_eq!(format_bytes(1024 * 1024 * 4700), "4.59 GB");
        assert_eq!(format_bytes(1024_u64.pow(3) * 25), "25.00 GB");
    }

    #[test]
    fn test_format_bytes_terabytes() {
        assert_eq!(format_bytes(1024_u64.pow(4)), "1.00 TB");
        assert_eq!(format_bytes(1024_u64.pow(4) * 100), "100.00 TB");
        assert_eq!(format_bytes(1024_u64.pow(4) * 1023), "1023.00 TB");
    }

    #[test]
    fn test_format_bytes_petabyte_fallback() {
        assert_eq!(format_bytes(1024_u64.pow(5)), "1.00 PB");
        assert_eq!(format_bytes(1024_u64.pow(5) * 2048), "2048.00 PB");
        assert_eq!(format_bytes(u64::MAX), "16384.00 PB");
    }

    #[test]
    fn test_format_bytes_rounding_at_threshold() {
        // Just below a step still uses the smaller unit
        assert_eq!(format_bytes(1024 * 1024 - 1), "1024.00 KB");
        assert_eq!(format_bytes(1024 + 5), "1.00 KB");
        assert_eq!(format_bytes(1024 + 6), "1.01 KB");
    }

    fn unit_factor(unit: &str) -> f64 {
        let power = match unit {
            "B" => 0,
            "KB" => 1,
            "MB" => 2,
            "GB" => 3,
            "TB" => 4,
            "PB" => 5,
            other => panic!("unexpected unit {other}"),
        };
        1024_f64.powi(power)
    }

    proptest! {
        #[test]
        fn prop_format_bytes_round_trips(bytes in any::<u64>()) {
            let formatted = format_bytes(bytes);
            let (number, unit) = formatted.split_once(' ').unwrap();
            let factor = unit_factor(unit);
            let value: f64 = number.parse().unwrap();

            let restored = value * factor;
            prop_assert!((restored - bytes as f64).abs() <= 0.0051 * factor);
        }

        #[test]
        fn prop_format_bytes_has_two_decimals(bytes in any::<u64>()) {
            let formatted = format_bytes(bytes);
            let (number, _) = formatted.split_once(' ').unwrap();
            let (_, decimals) = number.split_once('.').unwrap();
            prop_assert_eq!(decimals.len(), 2);
        }
    }
}
