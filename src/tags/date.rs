//! Day-month-year date parsing
//!
//! Annotations carry fixed-width `DDMMYYYY` dates, ledger exports carry
//! delimited `DD.MM.YYYY` dates. An unset date (the zero date) is `None`.

use chrono::NaiveDate;

use crate::types::*;

/// Width of a fixed `DDMMYYYY` date
pub const FIXED_DATE_WIDTH: usize = 8;

/// Whether `date` is the zero date
pub fn is_zero(date: Option<NaiveDate>) -> bool {
    date.is_none()
}

/// Parse a fixed-width `DDMMYYYY` date
pub fn parse_fixed8(s: &str) -> DocResult<NaiveDate> {
    if s.len() != FIXED_DATE_WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DocError::InvalidDate(s.to_string()));
    }

    let day = parse_component(s, &s[0..2])?;
    let month = parse_component(s, &s[2..4])?;
    let year = parse_component(s, &s[4..8])?;
    build_date(s, day, month, year)
}

/// Parse a `DD<sep>MM<sep>YYYY` date
pub fn parse_delimited(s: &str, sep: char) -> DocResult<NaiveDate> {
    let parts: Vec<&str> = s.split(sep).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(DocError::InvalidDate(s.to_string()));
    };

    let day = parse_component(s, day)?;
    let month = parse_component(s, month)?;
    let year = parse_component(s, year)?;
    build_date(s, day, month, year)
}

/// Render a date back to `DDMMYYYY`
pub fn format_fixed8(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}

fn parse_component(input: &str, part: &str) -> DocResult<u32> {
    part.trim()
        .parse::<u32>()
        .map_err(|_| DocError::InvalidDate(input.to_string()))
}

fn build_date(input: &str, day: u32, month: u32, year: u32) -> DocResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(DocError::InvalidMonth {
            input: input.to_string(),
            month,
        });
    }

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| DocError::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed8_day_month_year_order() {
        let date = parse_fixed8("01042014").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2014, 4, 1).unwrap());
    }

    #[test]
    fn test_parse_fixed8_rejects_bad_input() {
        assert_eq!(
            parse_fixed8("01132014"),
            Err(DocError::InvalidMonth {
                input: "01132014".to_string(),
                month: 13
            })
        );
        assert!(matches!(parse_fixed8("0104201"), Err(DocError::InvalidDate(_))));
        assert!(matches!(parse_fixed8("0a042014"), Err(DocError::InvalidDate(_))));
        assert!(matches!(parse_fixed8("31022014"), Err(DocError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_delimited() {
        let date = parse_delimited("24.12.2013", '.').unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2013, 12, 24).unwrap());

        let date = parse_delimited("3.1.2014", '.').unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2014, 1, 3).unwrap());
    }

    #[test]
    fn test_parse_delimited_errors() {
        assert!(matches!(
            parse_delimited("01.00.2014", '.'),
            Err(DocError::InvalidMonth { month: 0, .. })
        ));
        assert!(matches!(parse_delimited("01.xx.2014", '.'), Err(DocError::InvalidDate(_))));
        assert!(matches!(parse_delimited("01.2014", '.'), Err(DocError::InvalidDate(_))));
        assert!(matches!(parse_delimited("", '.'), Err(DocError::InvalidDate(_))));
    }

    #[test]
    fn test_format_fixed8() {
        let date = NaiveDate::from_ymd_opt(2014, 4, 2).unwrap();
        assert_eq!(format_fixed8(date), "02042014");
        assert!(is_zero(None));
        assert!(!is_zero(Some(date)));
    }
}
