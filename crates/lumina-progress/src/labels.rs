use jiff::tz::TimeZone;
use jiff::Timestamp;

/// `dd/mm/yyyy` in the given zone, as shown on charts and reports.
pub fn format_date(at: Timestamp, tz: &TimeZone) -> String {
    at.to_zoned(tz.clone()).strftime("%d/%m/%Y").to_string()
}
