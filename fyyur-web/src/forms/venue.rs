//! Venue create/edit form

use fyyur_common::db::Venue;

use super::fields::{self, Genre, UsState};
use super::{FieldErrors, FormData};

/// Raw venue form values as submitted (or pre-filled for editing)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Validated venue, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    /// Genre display names in selection order, as stored
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(Genre::to_string).collect()
    }
}

impl VenueForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            address: data.text("address"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            genres: data.get_all("genres"),
            facebook_link: data.text("facebook_link"),
            website_link: data.text("website_link"),
            seeking_talent: fields::checkbox(data.get("seeking_talent")),
            seeking_description: data.text("seeking_description"),
        }
    }

    /// Pre-fill from a stored venue
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website_link.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = errors.check("name", fields::required(&self.name));
        let city = errors.check("city", fields::required(&self.city));
        let state = errors.check("state", fields::state(&self.state));
        let address = errors.check("address", fields::required(&self.address));
        let phone = errors.check("phone", fields::optional_phone(&self.phone));
        let image_link = errors.check("image_link", fields::optional_url(&self.image_link));
        let genres = errors.check("genres", fields::genres(self.genres.as_slice()));
        let facebook_link =
            errors.check("facebook_link", fields::optional_url(&self.facebook_link));
        let website_link = errors.check("website_link", fields::optional_url(&self.website_link));

        match (
            name, city, state, address, phone, image_link, genres, facebook_link, website_link,
        ) {
            (
                Some(name),
                Some(city),
                Some(state),
                Some(address),
                Some(phone),
                Some(image_link),
                Some(genres),
                Some(facebook_link),
                Some(website_link),
            ) => Ok(VenueInput {
                name,
                city,
                state,
                address,
                phone,
                image_link,
                genres,
                facebook_link,
                website_link,
                seeking_talent: self.seeking_talent,
                seeking_description: fields::optional(&self.seeking_description),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            image_link: String::new(),
            genres: vec!["Jazz".to_string(), "Reggae".to_string()],
            facebook_link: "https://www.facebook.com/TheMusicalHop".to_string(),
            website_link: "https://www.themusicalhop.com".to_string(),
            seeking_talent: true,
            seeking_description: "We are on the lookout for a local artist.".to_string(),
        }
    }

    #[test]
    fn test_valid_form_produces_input() {
        let input = valid_form().validate().expect("form should validate");
        assert_eq!(input.name, "The Musical Hop");
        assert_eq!(input.state, UsState::Ca);
        assert_eq!(input.genre_names(), vec!["Jazz", "Reggae"]);
        assert_eq!(input.image_link, None);
        assert!(input.seeking_talent);
    }

    #[test]
    fn test_missing_required_fields_reported_per_field() {
        let form = VenueForm {
            name: "  ".to_string(),
            address: String::new(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("address"));
        assert!(!errors.contains("city"));
    }

    #[test]
    fn test_format_errors_collected_together() {
        let form = VenueForm {
            state: "XX".to_string(),
            phone: "555".to_string(),
            website_link: "not a url".to_string(),
            genres: vec![],
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["genres", "phone", "state", "website_link"]
        );
    }

    #[test]
    fn test_from_data_reads_checkbox_and_multiselect() {
        let data = FormData::new(vec![
            ("name".to_string(), "Hop".to_string()),
            ("genres".to_string(), "Jazz".to_string()),
            ("genres".to_string(), "Folk".to_string()),
            ("seeking_talent".to_string(), "y".to_string()),
        ]);
        let form = VenueForm::from_data(&data);
        assert_eq!(form.genres, vec!["Jazz", "Folk"]);
        assert!(form.seeking_talent);
        assert_eq!(form.city, "");
    }
}
