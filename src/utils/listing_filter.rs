//! SQL `WHERE` clause for listing filters.
//!
//! Both listing tables keep details and location as JSONB, so string
//! filters read through `->>` and price bounds cast to `numeric`.

use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;

use realty_models::{ListingFilter, PriceField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
}

/// A `WHERE` clause with its positional parameters, starting at `$1`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListingWhere {
    conditions: Vec<String>,
    params: Vec<FilterValue>,
}

impl ListingWhere {
    pub fn build(filter: &ListingFilter, price: PriceField) -> Self {
        let mut clause = Self::default();

        if let Some(property_type) = &filter.property_type {
            clause.push("property_type = ${}", FilterValue::Text(property_type.clone()));
        }
        if let Some(listing_type) = &filter.listing_type {
            clause.push("listing_type = ${}", FilterValue::Text(listing_type.clone()));
        }
        if let Some(bhk_type) = &filter.bhk_type {
            clause.push(
                "basic_details->>'bhkType' = ${}",
                FilterValue::Text(bhk_type.clone()),
            );
        }
        if let Some(city) = &filter.city {
            clause.push(
                "location->>'city' ILIKE ${} ESCAPE '\\'",
                FilterValue::Text(contains_pattern(city)),
            );
        }
        if let Some(locality) = &filter.locality {
            clause.push(
                "location->>'locality' ILIKE ${} ESCAPE '\\'",
                FilterValue::Text(contains_pattern(locality)),
            );
        }

        let price_expr = format!("(basic_details->>'{}')::numeric", price.json_key());
        if let Some(min) = filter.min_price {
            clause.push(&format!("{} >= ${{}}", price_expr), FilterValue::Int(min));
        }
        if let Some(max) = filter.max_price {
            clause.push(&format!("{} <= ${{}}", price_expr), FilterValue::Int(max));
        }

        clause
    }

    /// `template` holds a single `${}` placeholder for the parameter index.
    fn push(&mut self, template: &str, value: FilterValue) {
        self.params.push(value);
        let placeholder = format!("${}", self.params.len());
        self.conditions.push(template.replacen("${}", &placeholder, 1));
    }

    pub fn sql(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn params(&self) -> &[FilterValue] {
        &self.params
    }

    pub fn bind<'q, O>(
        self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for param in self.params {
            query = match param {
                FilterValue::Text(value) => query.bind(value),
                FilterValue::Int(value) => query.bind(value),
            };
        }
        query
    }
}

/// `%value%` with LIKE metacharacters escaped.
fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
