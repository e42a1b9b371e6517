//! Field vocabularies and single-field validators

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// US states and territories offered on the venue/artist forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum UsState {
    Al, Ak, Az, Ar, Ca, Co, Ct, De, Dc, Fl, Ga, Hi, Id, Il, In, Ia, Ks,
    Ky, La, Me, Mt, Ne, Nv, Nh, Nj, Nm, Ny, Nc, Nd, Oh, Ok, Or, Md, Ma,
    Mi, Mn, Ms, Mo, Pa, Ri, Sc, Sd, Tn, Tx, Ut, Vt, Va, Wa, Wv, Wi, Wy,
}

/// Genre tags offered on the venue/artist forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum Genre {
    Alternative,
    Blues,
    Classical,
    Country,
    Electronic,
    Folk,
    Funk,
    #[strum(to_string = "Hip-Hop")]
    HipHop,
    #[strum(to_string = "Heavy Metal")]
    HeavyMetal,
    Instrumental,
    Jazz,
    #[strum(to_string = "Musical Theatre")]
    MusicalTheatre,
    Pop,
    Punk,
    #[strum(to_string = "R&B")]
    RnB,
    Reggae,
    #[strum(to_string = "Rock n Roll")]
    RockNRoll,
    Soul,
    Other,
}

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\(\d{3}\) ?|\d{3}[-.]?)\d{3}[-.]?\d{4}$").expect("phone regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$").expect("url regex"));

/// Accepted `start_time` layouts, all read as UTC
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Layout used to pre-fill datetime inputs
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn required(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("This field is required.".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Blank means absent
pub fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn optional_phone(value: &str) -> Result<Option<String>, String> {
    match optional(value) {
        None => Ok(None),
        Some(phone) if PHONE_RE.is_match(&phone) => Ok(Some(phone)),
        Some(_) => Err("Invalid phone number, expected a format like 123-456-7890.".to_string()),
    }
}

pub fn optional_url(value: &str) -> Result<Option<String>, String> {
    match optional(value) {
        None => Ok(None),
        Some(url) if URL_RE.is_match(&url) => Ok(Some(url)),
        Some(_) => Err("Invalid URL.".to_string()),
    }
}

pub fn state(value: &str) -> Result<UsState, String> {
    let code = required(value)?;
    code.to_uppercase()
        .parse::<UsState>()
        .map_err(|_| "Not a valid choice.".to_string())
}

/// At least one genre, every value known; duplicates collapse in first-seen order
pub fn genres<S: AsRef<str>>(values: &[S]) -> Result<Vec<Genre>, String> {
    let mut selected = Vec::new();
    for raw in values {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            continue;
        }
        let genre = raw
            .parse::<Genre>()
            .map_err(|_| format!("'{}' is not a valid choice.", raw))?;
        if !selected.contains(&genre) {
            selected.push(genre);
        }
    }

    if selected.is_empty() {
        Err("Select at least one genre.".to_string())
    } else {
        Ok(selected)
    }
}

/// HTML checkbox semantics: present and not an explicit "off"
pub fn checkbox(value: Option<&str>) -> bool {
    match value {
        None => false,
        Some(v) => !matches!(v.trim().to_lowercase().as_str(), "" | "false" | "off" | "0"),
    }
}

pub fn positive_id(value: &str) -> Result<i64, String> {
    let raw = required(value)?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err("Must be a positive whole number.".to_string()),
    }
}

pub fn start_time(value: &str) -> Result<DateTime<Utc>, String> {
    let raw = required(value)?;
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| "Not a valid datetime value, expected YYYY-MM-DD HH:MM:SS.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use strum::IntoEnumIterator;

    #[test]
    fn test_state_codes_round_trip_through_display() {
        assert_eq!(UsState::iter().count(), 51);
        assert_eq!(UsState::Ca.to_string(), "CA");
        assert_eq!(state("ny"), Ok(UsState::Ny));
        assert!(state("ZZ").is_err());
        assert!(state("  ").is_err());
    }

    #[test]
    fn test_genre_display_names() {
        assert_eq!(Genre::RockNRoll.to_string(), "Rock n Roll");
        assert_eq!("R&B".parse::<Genre>(), Ok(Genre::RnB));
        assert_eq!("Hip-Hop".parse::<Genre>(), Ok(Genre::HipHop));
        assert!("Swing".parse::<Genre>().is_err());
    }

    #[test]
    fn test_genres_requires_one_and_dedupes() {
        assert!(genres::<&str>(&[]).is_err());
        assert!(genres(&["", " "]).is_err());
        assert_eq!(
            genres(&["Jazz", "Folk", "Jazz"]),
            Ok(vec![Genre::Jazz, Genre::Folk])
        );
        assert!(genres(&["Jazz", "Polka"]).is_err());
    }

    #[test]
    fn test_phone_formats() {
        for ok in ["123-456-7890", "(123) 456-7890", "123.456.7890", "1234567890"] {
            assert!(optional_phone(ok).unwrap().is_some(), "{ok} should be accepted");
        }
        for bad in ["12-3456", "phone", "123-456-78901"] {
            assert!(optional_phone(bad).is_err(), "{bad} should be rejected");
        }
        assert_eq!(optional_phone("   "), Ok(None));
    }

    #[test]
    fn test_url_validation() {
        assert_eq!(
            optional_url(" https://www.themusicalhop.com "),
            Ok(Some("https://www.themusicalhop.com".to_string()))
        );
        assert!(optional_url("http://").is_err());
        assert!(optional_url("ftp://example.com").is_err());
        assert!(optional_url("www.example.com").is_err());
        assert_eq!(optional_url(""), Ok(None));
    }

    #[test]
    fn test_checkbox_values() {
        assert!(!checkbox(None));
        assert!(checkbox(Some("y")));
        assert!(checkbox(Some("on")));
        assert!(!checkbox(Some("false")));
        assert!(!checkbox(Some("")));
    }

    #[test]
    fn test_start_time_layouts() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(start_time("2035-04-01 20:00:00"), Ok(expected));
        assert_eq!(start_time("2035-04-01 20:00"), Ok(expected));
        assert_eq!(start_time("2035-04-01T20:00"), Ok(expected));
        assert!(start_time("next tuesday").is_err());
        assert!(start_time("").is_err());
    }

    #[test]
    fn test_positive_id() {
        assert_eq!(positive_id("4"), Ok(4));
        assert!(positive_id("0").is_err());
        assert!(positive_id("-3").is_err());
        assert!(positive_id("four").is_err());
    }
}
