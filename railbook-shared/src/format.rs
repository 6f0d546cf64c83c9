use chrono::{DateTime, Utc};

/// Render a minute count as "7h 45m" (or "45m" under an hour).
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours == 0 {
        format!("{}m", rest)
    } else {
        format!("{}h {:02}m", hours, rest)
    }
}

/// Render minor currency units as a decimal amount, e.g. 1250 -> "12.50".
pub fn format_price(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Date plus wall-clock time, the form every trip card shows.
pub fn format_departure(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

const QR_SERVICE_BASE: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// URL of the third-party QR image rendered on ticket display.
/// No local generation; the service receives the ticket reference verbatim.
pub fn qr_code_url(data: &str) -> String {
    format!(
        "{}?size=200x200&data={}",
        QR_SERVICE_BASE,
        urlencoding::encode(data)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(465), "7h 45m");
        assert_eq!(format_duration(120), "2h 00m");
        assert_eq!(format_duration(-5), "0m");
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_price(1250), "12.50");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(-990), "-9.90");
    }

    #[test]
    fn test_departure_formatting() {
        let at = Utc.with_ymd_and_hms(2026, 9, 1, 8, 5, 0).unwrap();
        assert_eq!(format_departure(&at), "2026-09-01 08:05");
    }

    #[test]
    fn test_qr_url_encodes_payload() {
        let url = qr_code_url("ORDER 42/1");
        assert!(url.starts_with("https://api.qrserver.com/"));
        assert!(url.ends_with("data=ORDER%2042%2F1"));
    }
}
