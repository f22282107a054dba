/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h 30m, 1d).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        };
    }

    if hours > 0 {
        let mut parts = vec![format!("{}h", hours)];
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if seconds > 0 {
            parts.push(format!("{}s", seconds));
        }
        return parts.join(" ");
    }

    if minutes > 0 {
        return if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        };
    }

    format!("{}s", seconds)
}

/// One star per prestige, or an empty string before the first.
pub fn prestige_stars(prestige: u32) -> String {
    "⭐".repeat(prestige as usize)
}

/// Kill/death ratio with deaths clamped to at least one.
pub fn format_kd_ratio(kills: u64, deaths: u64) -> String {
    let ratio = kills as f64 / deaths.max(1) as f64;
    format!("{ratio:.2}")
}

/// Neutralize mention pings in user-supplied text.
pub fn sanitize_mentions(raw: &str) -> String {
    raw.replace('@', "@\u{200B}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_duration_single_units() {
        assert_eq!(format_compact_duration(0), "0s");
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(60), "1m");
        assert_eq!(format_compact_duration(3_600), "1h");
        assert_eq!(format_compact_duration(86_400), "1d");
    }

    #[test]
    fn compact_duration_combined_units() {
        assert_eq!(format_compact_duration(90), "1m 30s");
        assert_eq!(format_compact_duration(5_400), "1h 30m");
        assert_eq!(format_compact_duration(3_661), "1h 1m 1s");
        assert_eq!(format_compact_duration(90_000), "1d 1h");
    }

    #[test]
    fn kd_ratio_handles_zero_deaths() {
        assert_eq!(format_kd_ratio(10, 0), "10.00");
        assert_eq!(format_kd_ratio(7, 2), "3.50");
        assert_eq!(format_kd_ratio(0, 5), "0.00");
    }

    #[test]
    fn prestige_stars_count() {
        assert_eq!(prestige_stars(0), "");
        assert_eq!(prestige_stars(3), "⭐⭐⭐");
    }

    #[test]
    fn sanitize_defuses_pings() {
        assert_eq!(sanitize_mentions("hi @everyone"), "hi @\u{200B}everyone");
    }
}
