use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::CatalogError;

/// MPAA certificate. Only the five canonical values are admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MpaaRating {
    G,
    PG,
    #[serde(rename = "PG-13")]
    Pg13,
    R,
    #[serde(rename = "NC-17")]
    Nc17,
}

impl MpaaRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            MpaaRating::G => "G",
            MpaaRating::PG => "PG",
            MpaaRating::Pg13 => "PG-13",
            MpaaRating::R => "R",
            MpaaRating::Nc17 => "NC-17",
        }
    }
}

impl fmt::Display for MpaaRating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MpaaRating {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "G" => Ok(MpaaRating::G),
            "PG" => Ok(MpaaRating::PG),
            "PG-13" => Ok(MpaaRating::Pg13),
            "R" => Ok(MpaaRating::R),
            "NC-17" => Ok(MpaaRating::Nc17),
            other => Err(CatalogError::InvalidMovieData(format!(
                "Unknown MPAA rating \"{}\" (expected G, PG, PG-13, R or NC-17)",
                other
            ))),
        }
    }
}
