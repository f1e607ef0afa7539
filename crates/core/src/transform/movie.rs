use rust_decimal::Decimal;

use super::types::{MovieDim, PriceCategory};
use crate::source::Movie;

/// Lower bound (inclusive) of the Standard bucket: 4.50.
const STANDARD_FROM: Decimal = Decimal::from_parts(450, 0, 0, false, 2);
/// Lower bound (inclusive) of the Premium bucket: 5.50.
const PREMIUM_FROM: Decimal = Decimal::from_parts(550, 0, 0, false, 2);

/// Buckets a price: below 4.50 Budget, below 5.50 Standard, else Premium.
pub fn price_category(price: Decimal) -> PriceCategory {
    if price < STANDARD_FROM {
        PriceCategory::Budget
    } else if price < PREMIUM_FROM {
        PriceCategory::Standard
    } else {
        PriceCategory::Premium
    }
}

/// Builds one movie dimension row per movie, preserving input order.
pub fn build_movie_dimension(movies: &[Movie]) -> Vec<MovieDim> {
    movies
        .iter()
        .map(|movie| MovieDim {
            movie_key: movie.id,
            movie_id: movie.id,
            movie_title: movie.title.trim().to_string(),
            base_price: movie.price,
            price_category: price_category(movie.price),
        })
        .collect()
}
