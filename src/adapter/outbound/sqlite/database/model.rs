//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{price_samples, purchase_markers};

/// Database row for a price sample (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = price_samples)]
pub struct NewPriceSampleRow {
    pub asset: String,
    pub recorded_at: String,
    pub price: String,
}

/// Database row for the last purchase marker of an asset.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = purchase_markers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PurchaseMarkerRow {
    pub asset: String,
    pub last_purchase_at: String,
}
