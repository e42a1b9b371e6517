//! Artist create/edit form

use fyyur_common::db::Artist;

use super::fields::{self, Genre, UsState};
use super::{FieldErrors, FormData};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: UsState,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub genres: Vec<Genre>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(Genre::to_string).collect()
    }
}

impl ArtistForm {
    pub fn from_data(data: &FormData) -> Self {
        Self {
            name: data.text("name"),
            city: data.text("city"),
            state: data.text("state"),
            phone: data.text("phone"),
            image_link: data.text("image_link"),
            genres: data.get_all("genres"),
            facebook_link: data.text("facebook_link"),
            website_link: data.text("website_link"),
            seeking_venue: fields::checkbox(data.get("seeking_venue")),
            seeking_description: data.text("seeking_description"),
        }
    }

    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website_link.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = errors.check("name", fields::required(&self.name));
        let city = errors.check("city", fields::required(&self.city));
        let state = errors.check("state", fields::state(&self.state));
        let phone = errors.check("phone", fields::optional_phone(&self.phone));
        let image_link = errors.check("image_link", fields::optional_url(&self.image_link));
        let genres = errors.check("genres", fields::genres(self.genres.as_slice()));
        let facebook_link =
            errors.check("facebook_link", fields::optional_url(&self.facebook_link));
        let website_link = errors.check("website_link", fields::optional_url(&self.website_link));

        let (
            Some(name),
            Some(city),
            Some(state),
            Some(phone),
            Some(image_link),
            Some(genres),
            Some(facebook_link),
            Some(website_link),
        ) = (name, city, state, phone, image_link, genres, facebook_link, website_link)
        else {
            return Err(errors);
        };

        Ok(ArtistInput {
            name,
            city,
            state,
            phone,
            image_link,
            genres,
            facebook_link,
            website_link,
            seeking_venue: self.seeking_venue,
            seeking_description: fields::optional(&self.seeking_description),
        })
    }
}
