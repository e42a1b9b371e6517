//! Show create form
//!
//! Only the shape of the ids is checked here. Whether the artist and venue
//! exist is decided inside the creating transaction.

use chrono::{DateTime, Utc};

use super::fields::{self, DATETIME_INPUT_FORMAT};
use super::{FieldErrors, FormData};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    /// Blank form with the start time pre-filled to `now`
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now.format(DATETIME_INPUT_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn from_data(data: &FormData) -> Self {
        Self {
            artist_id: data.text("artist_id"),
            venue_id: data.text("venue_id"),
            start_time: data.text("start_time"),
        }
    }

    pub fn validate(&self) -> Result<ShowInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let artist_id = errors.check("artist_id", fields::positive_id(&self.artist_id));
        let venue_id = errors.check("venue_id", fields::positive_id(&self.venue_id));
        let start_time = errors.check("start_time", fields::start_time(&self.start_time));

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(ShowInput {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_show() {
        let form = ShowForm {
            artist_id: "6".to_string(),
            venue_id: "3".to_string(),
            start_time: "2035-04-08 20:00:00".to_string(),
        };
        let input = form.validate().unwrap();
        assert_eq!(input.artist_id, 6);
        assert_eq!(input.venue_id, 3);
        assert_eq!(
            input.start_time,
            Utc.with_ymd_and_hms(2035, 4, 8, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_blank_form_reports_every_field() {
        let errors = ShowForm::default().validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["artist_id", "start_time", "venue_id"]
        );
    }

    #[test]
    fn test_prefilled_start_time_validates() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 18, 30, 0).unwrap();
        let form = ShowForm {
            artist_id: "1".to_string(),
            venue_id: "1".to_string(),
            ..ShowForm::starting_at(now)
        };
        assert_eq!(form.start_time, "2026-10-19 18:30:00");
        assert_eq!(form.validate().unwrap().start_time, now);
    }
}
