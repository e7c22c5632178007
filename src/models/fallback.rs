//! Presentation defaults for fields the store may leave empty, and the
//! Spanish date formatting used everywhere dates are shown.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

pub const UNKNOWN_OCCUPATION: &str = "No especificada";
pub const UNKNOWN_ADDRESS: &str = "No especificada";
pub const UNKNOWN_PHONE: &str = "No especificado";
pub const UNKNOWN_HOST: &str = "Anfitrión";
pub const UNKNOWN_USER: &str = "Usuario";
pub const UNKNOWN_VEHICLE: &str = "Vehículo desconocido";
pub const UNKNOWN_STATUS: &str = "Desconocido";
pub const UNKNOWN_DATE: &str = "Fecha desconocida";
pub const UNKNOWN_DATE_RANGE: &str = "Fechas desconocidas";

pub const AVATAR_PLACEHOLDER: &str = "/placeholder.svg?height=40&width=40";
pub const PORTRAIT_PLACEHOLDER: &str = "/placeholder.svg?height=200&width=200";

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Blank and whitespace-only strings count as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn text_or(value: Option<String>, fallback: &str) -> String {
    non_blank(value).unwrap_or_else(|| fallback.to_string())
}

/// Parses the timestamp shapes PostgREST hands back: RFC 3339 with an
/// offset, `timestamp` columns without one, and bare `date` columns.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

fn month_name(date: &DateTime<Utc>) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// "12 de mayo de 2024", or "Fecha desconocida" when the value is missing
/// or unparseable.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(date) => format!("{} de {} de {}", date.day(), month_name(&date), date.year()),
        None => UNKNOWN_DATE.to_string(),
    }
}

/// "3 enero - 10 enero, 2025" with the year taken from the end date, or
/// "Fechas desconocidas" when either bound is missing or unparseable.
pub fn format_date_range(start: &str, end: &str) -> String {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => format!(
            "{} {} - {} {}, {}",
            start.day(),
            month_name(&start),
            end.day(),
            month_name(&end),
            end.year()
        ),
        _ => UNKNOWN_DATE_RANGE.to_string(),
    }
}
