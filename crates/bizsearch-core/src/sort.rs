//! Ordering of a result batch before display.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::business::Business;
use crate::error::AppError;
use crate::favorites::FavoritesSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Distance,
    Name,
    Location,
    /// Membership in the current [`FavoritesSet`].
    Favorite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Distance => write!(f, "distance"),
            SortField::Name => write!(f, "name"),
            SortField::Location => write!(f, "location"),
            SortField::Favorite => write!(f, "favorite"),
        }
    }
}

impl std::fmt::Display for SortDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDir::Asc => write!(f, "asc"),
            SortDir::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(SortField::Distance),
            "name" => Ok(SortField::Name),
            "location" => Ok(SortField::Location),
            "favorite" => Ok(SortField::Favorite),
            other => Err(AppError::configuration(format!(
                "invalid sort field '{other}'"
            ))),
        }
    }
}

impl FromStr for SortDir {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDir::Asc),
            "desc" => Ok(SortDir::Desc),
            other => Err(AppError::configuration(format!(
                "invalid sort direction '{other}'"
            ))),
        }
    }
}

/// Sorts `results` in place by `field` and `dir`.
///
/// The sort is stable, so records with equal keys keep their service order.
/// Missing distances compare as `0`; a missing city or zip compares as the
/// empty string. For [`SortField::Favorite`], non-favorites come first in
/// `asc` and favorites first in `desc`.
pub fn sort_results(results: &mut [Business], field: SortField, dir: SortDir, favorites: &FavoritesSet) {
    results.sort_by(|a, b| {
        let ord = compare(a, b, field, favorites);
        match dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });
}

fn compare(a: &Business, b: &Business, field: SortField, favorites: &FavoritesSet) -> Ordering {
    match field {
        SortField::Distance => a
            .distance
            .unwrap_or(0.0)
            .total_cmp(&b.distance.unwrap_or(0.0)),
        SortField::Name => a.name.cmp(&b.name),
        SortField::Location => location_key(a).cmp(&location_key(b)),
        SortField::Favorite => favorites.has(&a.id).cmp(&favorites.has(&b.id)),
    }
}

fn location_key(biz: &Business) -> (&str, &str) {
    (
        biz.location.city.as_deref().unwrap_or(""),
        biz.location.zip_code.as_deref().unwrap_or(""),
    )
}
