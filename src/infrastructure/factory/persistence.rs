//! Persistence factory for the price store.

use crate::adapter::outbound::sqlite::database::connection::open;
use crate::adapter::outbound::sqlite::SqlitePriceStore;
use crate::domain::AssetSymbol;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Open (and migrate) the configured database and scope a store to `asset`.
pub fn build_price_store(config: &Config, asset: &AssetSymbol) -> Result<SqlitePriceStore> {
    let pool = open(&config.database)?;
    Ok(SqlitePriceStore::new(pool, asset.clone()))
}
