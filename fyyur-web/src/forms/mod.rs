//! Form decoding and validation
//!
//! Submissions arrive as `application/x-www-form-urlencoded` key/value pairs.
//! Each form type keeps the raw submitted strings (for redisplay) and
//! validates them into a typed input that the query layer persists.
//! Validation never touches the database.

pub mod artist;
pub mod fields;
pub mod show;
pub mod venue;

pub use artist::{ArtistForm, ArtistInput};
pub use fields::{Genre, UsState};
pub use show::{ShowForm, ShowInput};
pub use venue::{VenueForm, VenueInput};

use std::collections::BTreeMap;

/// Decoded form body; repeated keys (multi-selects) are kept
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `key`, untrimmed
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, empty when absent
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Every value for `key`, in submission order
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

/// Field-level validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Record the error half of a field check, passing the value through
    pub(crate) fn check<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        FormData::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_form_data_repeated_keys() {
        let form = data(&[("genres", "Jazz"), ("name", "Hop"), ("genres", "Folk")]);
        assert_eq!(form.get("name"), Some("Hop"));
        assert_eq!(form.get_all("genres"), vec!["Jazz", "Folk"]);
        assert_eq!(form.text("missing"), "");
        assert!(form.get_all("missing").is_empty());
    }

    #[test]
    fn test_field_errors_accumulate() {
        let mut errors = FieldErrors::default();
        assert!(errors.is_empty());
        errors.add("name", "This field is required.");
        errors.add("name", "Too short.");
        assert!(errors.contains("name"));
        assert_eq!(errors.get("name").len(), 2);
        assert!(errors.get("city").is_empty());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
    }
}
