//! Reference data seeding.

use sqlx::PgPool;

use shiptrack_core::Coordinates;
use shiptrack_server::db::WarehouseRepository;

use super::CommandError;

/// Default hubs: name, latitude, longitude.
const WAREHOUSES: &[(&str, f64, f64)] = &[
    ("Delhi Hub", 28.6139, 77.2090),
    ("Mumbai Hub", 19.0760, 72.8777),
    ("Bengaluru Hub", 12.9716, 77.5946),
    ("Kolkata Hub", 22.5726, 88.3639),
];

/// Insert the default warehouses if the table is empty.
///
/// # Errors
///
/// Returns `CommandError::Repository` if a query fails.
pub async fn warehouses(pool: &PgPool) -> Result<(), CommandError> {
    let repo = WarehouseRepository::new(pool);

    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Warehouses already present, nothing to seed");
        return Ok(());
    }

    for &(name, latitude, longitude) in WAREHOUSES {
        let location = Coordinates::new(latitude, longitude)
            .map_err(|e| CommandError::InvalidSeed(format!("{name}: {e}")))?;
        let warehouse = repo.create(name, Some(location)).await?;
        tracing::info!(id = %warehouse.id, name, "Warehouse created");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_coordinates_are_valid() {
        for &(name, latitude, longitude) in WAREHOUSES {
            assert!(Coordinates::new(latitude, longitude).is_ok(), "{name}");
        }
    }
}
