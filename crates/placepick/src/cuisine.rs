use crate::place::PlaceType;
use std::fmt;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_PLACE_TYPE: &str = "restaurant";

/// Cuisines the places service can filter on directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Cuisine {
    #[strum(to_string = "japanese", serialize = "japanese restaurant")]
    Japanese,
    #[strum(to_string = "italian", serialize = "italian restaurant")]
    Italian,
    #[strum(to_string = "chinese", serialize = "chinese restaurant")]
    Chinese,
    #[strum(to_string = "mexican", serialize = "mexican restaurant")]
    Mexican,
    #[strum(to_string = "indian", serialize = "indian restaurant")]
    Indian,
    #[strum(to_string = "thai", serialize = "thai restaurant")]
    Thai,
    #[strum(to_string = "french", serialize = "french restaurant")]
    French,
    #[strum(to_string = "american", serialize = "american restaurant")]
    American,
}

impl Cuisine {
    pub fn place_type(&self) -> PlaceType {
        PlaceType::new(format!("{self}_restaurant"))
    }
}

/// What the user typed into the keyword box, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    Any,
    /// Sent to the service as the category. Results are not filtered locally.
    Mapped(Cuisine),
    Tokens(Vec<String>),
}

impl Keyword {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Self::Any;
        }

        match normalized.parse::<Cuisine>() {
            Ok(cuisine) => Self::Mapped(cuisine),
            Err(_) => Self::Tokens(normalized.split_whitespace().map(str::to_string).collect()),
        }
    }

    pub fn place_type(&self) -> PlaceType {
        match self {
            Self::Mapped(cuisine) => cuisine.place_type(),
            Self::Any | Self::Tokens(_) => PlaceType::from(DEFAULT_PLACE_TYPE),
        }
    }

    pub fn filters_locally(&self) -> bool {
        matches!(self, Self::Tokens(_))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => Ok(()),
            Self::Mapped(cuisine) => write!(f, "{cuisine}"),
            Self::Tokens(tokens) => write!(f, "{}", tokens.join(" ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_cuisine_aliases() {
        let cases = vec![
            ("japanese", Cuisine::Japanese),
            ("Japanese Restaurant", Cuisine::Japanese),
            ("THAI", Cuisine::Thai),
            ("american restaurant", Cuisine::American),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<Cuisine>().unwrap(), expected);
        }
    }

    #[test]
    fn test_every_cuisine_maps_to_restaurant_type() {
        for cuisine in Cuisine::iter() {
            assert_eq!(
                cuisine.place_type().as_str(),
                format!("{cuisine}_restaurant")
            );
        }
    }

    #[test]
    fn test_keyword_classification() {
        assert_eq!(Keyword::parse("   "), Keyword::Any);
        assert_eq!(
            Keyword::parse("  Japanese "),
            Keyword::Mapped(Cuisine::Japanese)
        );
        assert_eq!(
            Keyword::parse("Sushi  Bar"),
            Keyword::Tokens(vec!["sushi".to_string(), "bar".to_string()])
        );
    }

    #[test]
    fn test_keyword_place_type() {
        assert_eq!(
            Keyword::parse("japanese").place_type().as_str(),
            "japanese_restaurant"
        );
        assert_eq!(Keyword::parse("sushi").place_type().as_str(), "restaurant");
        assert_eq!(Keyword::Any.place_type().as_str(), "restaurant");
        assert!(!Keyword::parse("italian").filters_locally());
        assert!(Keyword::parse("pizza").filters_locally());
    }
}
