use crate::cuisine::Keyword;
use crate::place::{Place, PlaceId, Restaurant};
use crate::selection::MAX_SELECTED;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("No restaurants matched keyword \"{0}\"")]
    NoMatches(String),
}

/// Whether a candidate survives the local keyword filter.
pub fn matches(keyword: &Keyword, place: &Place) -> bool {
    let Keyword::Tokens(tokens) = keyword else {
        return true;
    };

    let name = place.name.to_lowercase();
    let types: Vec<String> = place.types.iter().map(|t| t.to_lowercase()).collect();

    tokens.iter().any(|token| {
        let suffixed = format!("{token}_restaurant");
        types.iter().any(|t| t == token || *t == suffixed) || name.contains(token.as_str())
    })
}

/// Rating descending, then rating count descending. Missing values count as zero.
fn by_popularity(a: &Place, b: &Place) -> Ordering {
    b.rating_or_zero()
        .total_cmp(&a.rating_or_zero())
        .then_with(|| b.rating_count_or_zero().cmp(&a.rating_count_or_zero()))
}

/// Filters raw candidates by keyword, ranks them, and pre-selects the leaders.
pub fn rank(places: Vec<Place>, keyword: &Keyword) -> Result<Vec<Restaurant>, RankError> {
    let raw_count = places.len();
    let mut survivors: Vec<Place> = places
        .into_iter()
        .filter(|p| matches(keyword, p))
        .collect();

    log::info!(
        "Raw places: {}, filtered places: {}, keyword: \"{}\", type: \"{}\"",
        raw_count,
        survivors.len(),
        keyword,
        keyword.place_type()
    );

    if survivors.is_empty() {
        return Err(RankError::NoMatches(keyword.to_string()));
    }

    survivors.sort_by(by_popularity);

    Ok(survivors
        .into_iter()
        .enumerate()
        .map(|(i, place)| {
            let mut restaurant = Restaurant::from_place(PlaceId::from(i as u32), place);
            restaurant.selected = i < MAX_SELECTED;
            restaurant
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::{PlaceName, PlaceType};

    fn place(name: &str, types: &[&str], rating: Option<f64>, count: Option<u32>) -> Place {
        Place {
            name: PlaceName::from(name),
            rating,
            rating_count: count,
            types: types.iter().map(|t| PlaceType::from(*t)).collect(),
            ..Place::default()
        }
    }

    fn names(restaurants: &[Restaurant]) -> Vec<&str> {
        restaurants.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_unmapped_keyword_filters_by_type_or_name() {
        let places = vec![
            place("Sushi Bar", &["sushi_restaurant"], None, None),
            place("Taco Town", &["mexican_restaurant"], None, None),
        ];

        let ranked = rank(places, &Keyword::parse("sushi bar")).unwrap();
        assert_eq!(names(&ranked), vec!["Sushi Bar"]);
    }

    #[test]
    fn test_token_matches_suffixed_type() {
        let p = place("Golden Dragon", &["Dim_Sum_Restaurant"], None, None);
        assert!(matches(&Keyword::parse("dim_sum"), &p));
        assert!(!matches(&Keyword::parse("ramen"), &p));
    }

    #[test]
    fn test_name_match_is_case_insensitive_substring() {
        let p = place("Mama's PIZZERIA", &[], None, None);
        assert!(matches(&Keyword::parse("pizz"), &p));
    }

    #[test]
    fn test_mapped_keyword_skips_local_filter() {
        let places = vec![
            place("Taco Town", &["mexican_restaurant"], None, None),
            place("Burger Barn", &["hamburger_restaurant"], None, None),
        ];

        let keyword = Keyword::parse("japanese");
        assert_eq!(keyword.place_type().as_str(), "japanese_restaurant");

        let ranked = rank(places, &keyword).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_sort_by_rating_then_count() {
        let places = vec![
            place("a", &[], Some(3.5), Some(100)),
            place("b", &[], Some(4.8), Some(50)),
            place("c", &[], Some(4.8), Some(200)),
        ];

        let ranked = rank(places, &Keyword::Any).unwrap();
        let order: Vec<(Option<f64>, Option<u32>)> =
            ranked.iter().map(|r| (r.rating, r.rating_count)).collect();
        assert_eq!(
            order,
            vec![
                (Some(4.8), Some(200)),
                (Some(4.8), Some(50)),
                (Some(3.5), Some(100))
            ]
        );
    }

    #[test]
    fn test_missing_rating_sorts_last() {
        let places = vec![
            place("unrated", &[], None, None),
            place("rated", &[], Some(1.0), None),
        ];
        let ranked = rank(places, &Keyword::Any).unwrap();
        assert_eq!(names(&ranked), vec!["rated", "unrated"]);
    }

    #[test]
    fn test_top_ten_preselected_with_sequential_ids() {
        let places = (0..15)
            .map(|i| place(&format!("r{i}"), &[], Some(i as f64 / 4.0), None))
            .collect();

        let ranked = rank(places, &Keyword::Any).unwrap();
        assert_eq!(ranked.len(), 15);
        assert_eq!(ranked.iter().filter(|r| r.selected).count(), MAX_SELECTED);
        assert!(ranked[..MAX_SELECTED].iter().all(|r| r.selected));
        for (i, r) in ranked.iter().enumerate() {
            assert_eq!(u32::from(r.id), i as u32);
        }
    }

    #[test]
    fn test_no_survivors_is_an_error() {
        let places = vec![place("Taco Town", &["mexican_restaurant"], None, None)];
        assert_eq!(
            rank(places, &Keyword::parse("ramen")),
            Err(RankError::NoMatches("ramen".to_string()))
        );
        assert!(rank(Vec::new(), &Keyword::Any).is_err());
    }
}
