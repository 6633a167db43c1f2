use serde_json::json;

use super::{float_field, int_field, string_field, string_list_field, CatalogEntity, Record};
use crate::domain::value_objects::MpaaRating;
use crate::shared::errors::{CatalogError, CatalogResult};
use crate::shared::utils::Validator;

/// Discriminant between a standalone movie and a series. A series carries the
/// season/episode counts; `duration_each_series` is the per-episode runtime in
/// minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TitleKind {
    Movie,
    Series {
        amount_of_seasons: i32,
        amount_of_series: i32,
        duration_each_series: i32,
    },
}

impl TitleKind {
    pub fn label(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Series { .. } => "series",
        }
    }
}

/// A catalog title. Fields are validated at construction and immutable
/// afterwards; replacing a title goes through `EntityStore::update`.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    name: String,
    leading_actors: Vec<String>,
    duration: i32,
    year_of_release: i32,
    rating: f32,
    mpaa_rating: MpaaRating,
    genre: Vec<String>,
    country_of_production: String,
    movie_id: i32,
    kind: TitleKind,
}

impl Movie {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        leading_actors: Vec<String>,
        duration: i32,
        year_of_release: i32,
        rating: f32,
        mpaa_rating: MpaaRating,
        genre: Vec<String>,
        country_of_production: String,
        movie_id: i32,
    ) -> CatalogResult<Self> {
        Validator::validate_name(&name)?;
        Validator::validate_minutes("duration", duration)?;
        Validator::validate_year(year_of_release)?;
        Validator::validate_rating(rating)?;
        Validator::validate_id("movie_id", movie_id)?;

        Ok(Self {
            name,
            leading_actors,
            duration,
            year_of_release,
            rating,
            mpaa_rating,
            genre,
            country_of_production,
            movie_id,
            kind: TitleKind::Movie,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_series(
        name: String,
        leading_actors: Vec<String>,
        duration: i32,
        year_of_release: i32,
        rating: f32,
        mpaa_rating: MpaaRating,
        genre: Vec<String>,
        country_of_production: String,
        movie_id: i32,
        amount_of_seasons: i32,
        amount_of_series: i32,
        duration_each_series: i32,
    ) -> CatalogResult<Self> {
        Validator::validate_count("amount_of_seasons", amount_of_seasons)?;
        Validator::validate_count("amount_of_series", amount_of_series)?;
        Validator::validate_minutes("duration_each_series", duration_each_series)?;

        let mut movie = Self::new(
            name,
            leading_actors,
            duration,
            year_of_release,
            rating,
            mpaa_rating,
            genre,
            country_of_production,
            movie_id,
        )?;
        movie.kind = TitleKind::Series {
            amount_of_seasons,
            amount_of_series,
            duration_each_series,
        };
        Ok(movie)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn leading_actors(&self) -> &[String] {
        &self.leading_actors
    }

    pub fn duration(&self) -> i32 {
        self.duration
    }

    pub fn year_of_release(&self) -> i32 {
        self.year_of_release
    }

    pub fn rating(&self) -> f32 {
        self.rating
    }

    pub fn mpaa_rating(&self) -> MpaaRating {
        self.mpaa_rating
    }

    pub fn genre(&self) -> &[String] {
        &self.genre
    }

    pub fn country_of_production(&self) -> &str {
        &self.country_of_production
    }

    pub fn movie_id(&self) -> i32 {
        self.movie_id
    }

    pub fn kind(&self) -> &TitleKind {
        &self.kind
    }

    pub fn is_series(&self) -> bool {
        matches!(self.kind, TitleKind::Series { .. })
    }
}

fn invalid(message: String) -> CatalogError {
    CatalogError::InvalidMovieData(message)
}

impl CatalogEntity for Movie {
    const KIND: &'static str = "movie";

    fn id(&self) -> i32 {
        self.movie_id
    }

    fn encode(&self) -> Record {
        let mut record = Record::new();
        record.insert("kind".into(), json!(self.kind.label()));
        record.insert("name".into(), json!(self.name));
        record.insert("leading_actors".into(), json!(self.leading_actors));
        record.insert("duration".into(), json!(self.duration));
        record.insert("year_of_release".into(), json!(self.year_of_release));
        record.insert("rating".into(), json!(self.rating));
        record.insert("mpaa_rating".into(), json!(self.mpaa_rating.as_str()));
        record.insert("genre".into(), json!(self.genre));
        record.insert(
            "country_of_production".into(),
            json!(self.country_of_production),
        );
        record.insert("movie_id".into(), json!(self.movie_id));

        if let TitleKind::Series {
            amount_of_seasons,
            amount_of_series,
            duration_each_series,
        } = self.kind
        {
            record.insert("amount_of_seasons".into(), json!(amount_of_seasons));
            record.insert("amount_of_series".into(), json!(amount_of_series));
            record.insert("duration_each_series".into(), json!(duration_each_series));
        }

        record
    }

    fn decode(record: &Record) -> CatalogResult<Self> {
        let name = string_field(record, "name", invalid)?;
        let leading_actors = string_list_field(record, "leading_actors", invalid)?;
        let duration = int_field(record, "duration", invalid)?;
        let year_of_release = int_field(record, "year_of_release", invalid)?;
        let rating = float_field(record, "rating", invalid)?;
        let mpaa_rating = string_field(record, "mpaa_rating", invalid)?.parse::<MpaaRating>()?;
        let genre = string_list_field(record, "genre", invalid)?;
        let country_of_production = string_field(record, "country_of_production", invalid)?;
        let movie_id = int_field(record, "movie_id", invalid)?;

        if series_record(record)? {
            Self::new_series(
                name,
                leading_actors,
                duration,
                year_of_release,
                rating,
                mpaa_rating,
                genre,
                country_of_production,
                movie_id,
                int_field(record, "amount_of_seasons", invalid)?,
                int_field(record, "amount_of_series", invalid)?,
                int_field(record, "duration_each_series", invalid)?,
            )
        } else {
            Self::new(
                name,
                leading_actors,
                duration,
                year_of_release,
                rating,
                mpaa_rating,
                genre,
                country_of_production,
                movie_id,
            )
        }
    }

    fn recognizes(record: &Record) -> bool {
        match record.get("kind").and_then(|kind| kind.as_str()) {
            Some("movie") | Some("series") => true,
            Some(_) => false,
            // Legacy documents carry no discriminant; fall back to key
            // inspection as the old importer did.
            None => record.contains_key("amount_of_seasons") || record.contains_key("duration"),
        }
    }
}

/// Decides the concrete variant for a record. The `kind` discriminant wins;
/// legacy documents without one are sniffed by the presence of
/// `amount_of_seasons`.
fn series_record(record: &Record) -> CatalogResult<bool> {
    match record.get("kind") {
        Some(kind) => match kind.as_str() {
            Some("series") => Ok(true),
            Some("movie") => Ok(false),
            _ => Err(CatalogError::InvalidMovieData(format!(
                "Unknown kind discriminant {}",
                kind
            ))),
        },
        None => Ok(record.contains_key("amount_of_seasons")),
    }
}
