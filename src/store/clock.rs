use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

const MONTHS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// `05 Ene 2026, 09:00`
pub fn display_timestamp(dt: NaiveDateTime) -> String {
    format!(
        "{}, {:02}:{:02}",
        display_date(dt.date()),
        dt.hour(),
        dt.minute()
    )
}

/// `05 Ene 2026`
pub fn display_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

pub fn now() -> String {
    display_timestamp(Local::now().naive_local())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn uid() -> String {
    uuid::Uuid::new_v4().to_string()
}
