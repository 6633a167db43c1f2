mod mpaa_rating;

pub use mpaa_rating::MpaaRating;
