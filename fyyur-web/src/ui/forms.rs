//! Create/edit form pages
//!
//! Forms are re-rendered with the submitted values on validation failure, so
//! every renderer takes the raw form plus its [`FieldErrors`].

use strum::IntoEnumIterator;

use super::{esc, Page};
use crate::db::NamedRef;
use crate::forms::{ArtistForm, FieldErrors, Genre, ShowForm, UsState, VenueForm};

/// Whether a form creates a new record or edits record `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    fn action(self, collection: &str) -> String {
        match self {
            FormMode::Create => format!("/{collection}/create"),
            FormMode::Edit(id) => format!("/{collection}/{id}/edit"),
        }
    }
}

pub fn venue_form_page(mode: FormMode, form: &VenueForm, errors: &FieldErrors) -> Page {
    let (title, submit) = match mode {
        FormMode::Create => ("List a new venue".to_string(), "Create Venue"),
        FormMode::Edit(_) => (format!("Edit venue {}", form.name), "Save Changes"),
    };

    let fields = [
        text_field("name", "Name", &form.name, errors),
        text_field("city", "City", &form.city, errors),
        state_select(&form.state, errors),
        text_field("address", "Address", &form.address, errors),
        text_field("phone", "Phone", &form.phone, errors),
        genre_select(&form.genres, errors),
        text_field("facebook_link", "Facebook Link", &form.facebook_link, errors),
        text_field("image_link", "Image Link", &form.image_link, errors),
        text_field("website_link", "Website Link", &form.website_link, errors),
        checkbox("seeking_talent", "Looking for Talent", form.seeking_talent),
        text_field("seeking_description", "Seeking Description", &form.seeking_description, errors),
    ];

    form_page(&title, &mode.action("venues"), &fields, submit)
}

pub fn artist_form_page(mode: FormMode, form: &ArtistForm, errors: &FieldErrors) -> Page {
    let (title, submit) = match mode {
        FormMode::Create => ("List a new artist".to_string(), "Create Artist"),
        FormMode::Edit(_) => (format!("Edit artist {}", form.name), "Save Changes"),
    };

    let fields = [
        text_field("name", "Name", &form.name, errors),
        text_field("city", "City", &form.city, errors),
        state_select(&form.state, errors),
        text_field("phone", "Phone", &form.phone, errors),
        genre_select(&form.genres, errors),
        text_field("facebook_link", "Facebook Link", &form.facebook_link, errors),
        text_field("image_link", "Image Link", &form.image_link, errors),
        text_field("website_link", "Website Link", &form.website_link, errors),
        checkbox("seeking_venue", "Looking for Venues", form.seeking_venue),
        text_field("seeking_description", "Seeking Description", &form.seeking_description, errors),
    ];

    form_page(&title, &mode.action("artists"), &fields, submit)
}

pub fn show_form_page(
    form: &ShowForm,
    errors: &FieldErrors,
    artists: &[NamedRef],
    venues: &[NamedRef],
) -> Page {
    let fields = [
        ref_select("artist_id", "Artist", &form.artist_id, artists, errors),
        ref_select("venue_id", "Venue", &form.venue_id, venues, errors),
        text_field("start_time", "Start Time (YYYY-MM-DD HH:MM)", &form.start_time, errors),
    ];

    form_page("List a new show", "/shows/create", &fields, "Create Show")
}

fn form_page(title: &str, action: &str, fields: &[String], submit: &str) -> Page {
    let body = format!(
        r#"<h1>{}</h1>
<form method="post" action="{action}">
{}
<button type="submit">{submit}</button>
</form>"#,
        esc(title),
        fields.join("\n"),
    );

    Page::new(title, body)
}

fn field(name: &str, label: &str, control: String, errors: &FieldErrors) -> String {
    let messages: String = errors
        .get(name)
        .iter()
        .map(|message| format!(r#"<div class="error">{}</div>"#, esc(message)))
        .collect();
    let class = if errors.contains(name) { "field has-error" } else { "field" };

    format!(
        r#"<div class="{class}">
    <label for="{name}">{label}</label>
    {control}
    {messages}
</div>"#
    )
}

fn text_field(name: &str, label: &str, value: &str, errors: &FieldErrors) -> String {
    let control = format!(
        r#"<input type="text" id="{name}" name="{name}" value="{}">"#,
        esc(value)
    );
    field(name, label, control, errors)
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!(
        r#"<div class="field">
    <label><input type="checkbox" name="{name}" value="y"{checked}> {label}</label>
</div>"#
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{}"{selected}>{}</option>"#, esc(value), esc(label))
}

fn state_select(current: &str, errors: &FieldErrors) -> String {
    let current = current.trim();
    let options: String = UsState::iter()
        .map(|state| {
            let code = state.as_ref();
            option(code, code, code.eq_ignore_ascii_case(current))
        })
        .collect();
    let control = format!(r#"<select id="state" name="state">{options}</select>"#);
    field("state", "State", control, errors)
}

fn genre_select(selected: &[String], errors: &FieldErrors) -> String {
    let options: String = Genre::iter()
        .map(|genre| {
            let name = genre.to_string();
            let is_selected = selected.iter().any(|s| s.trim() == name);
            option(&name, &name, is_selected)
        })
        .collect();
    let control = format!(r#"<select id="genres" name="genres" multiple size="8">{options}</select>"#);
    field("genres", "Genres", control, errors)
}

fn ref_select(
    name: &str,
    label: &str,
    current: &str,
    choices: &[NamedRef],
    errors: &FieldErrors,
) -> String {
    let current = current.trim();
    let mut options = option("", &format!("Select {}", label.to_lowercase()), current.is_empty());
    for choice in choices {
        let id = choice.id.to_string();
        let text = format!("{} (#{})", choice.name, choice.id);
        options.push_str(&option(&id, &text, id == current));
    }
    let control = format!(r#"<select id="{name}" name="{name}">{options}</select>"#);
    field(name, label, control, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redisplay_keeps_values_and_errors() {
        let form = VenueForm {
            name: "The \"Hop\"".to_string(),
            state: "ca".to_string(),
            genres: vec!["Jazz".to_string(), "R&B".to_string()],
            ..Default::default()
        };
        let mut errors = FieldErrors::default();
        errors.add("city", "This field is required.");

        let html = venue_form_page(FormMode::Create, &form, &errors).render();
        assert!(html.contains(r#"action="/venues/create""#));
        assert!(html.contains("This field is required."));
        assert!(html.contains(r#"<div class="field has-error">"#));
        assert!(html.contains(r#"<option value="CA" selected>CA</option>"#));
        assert!(html.contains(">Jazz</option>"));
        assert!(html.contains(" selected>R&amp;B</option>"));
        assert!(!html.contains("The \"Hop\""));
    }

    #[test]
    fn test_edit_mode_posts_to_edit_path() {
        let html = artist_form_page(FormMode::Edit(7), &ArtistForm::default(), &FieldErrors::default())
            .render();
        assert!(html.contains(r#"action="/artists/7/edit""#));
        assert!(html.contains("Save Changes"));
    }

    #[test]
    fn test_show_form_preselects_choice() {
        let form = ShowForm {
            artist_id: "2".to_string(),
            ..Default::default()
        };
        let artists = vec![
            NamedRef { id: 1, name: "Guns N Petals".to_string() },
            NamedRef { id: 2, name: "Matt Quevedo".to_string() },
        ];
        let html = show_form_page(&form, &FieldErrors::default(), &artists, &[]).render();
        assert!(html.contains(r#"<option value="2" selected>Matt Quevedo (#2)</option>"#));
        assert!(html.contains(r#"action="/shows/create""#));
    }
}
