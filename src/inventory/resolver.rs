//! Get-or-create for the normalized lookup dimensions.
//!
//! Each dimension table carries a unique constraint on its name column, so
//! resolution is a single atomic upsert instead of a select-then-insert
//! pair; two requests racing on the same new name converge on one row. The
//! no-op DO UPDATE makes RETURNING yield the id on the conflict path too.
//! Resolution always runs inside the caller's transaction.

use sqlx::{Postgres, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    GenericName,
    Category,
    ProductType,
}

impl Dimension {
    pub fn table(self) -> &'static str {
        match self {
            Dimension::GenericName => "generic_name",
            Dimension::Category => "category",
            Dimension::ProductType => "product_type",
        }
    }

    pub fn name_column(self) -> &'static str {
        match self {
            Dimension::GenericName => "generic_name",
            Dimension::Category => "category_name",
            Dimension::ProductType => "type_name",
        }
    }
}

/// Resolves `name` to the dimension row's id, creating the row on first
/// sight. An empty name means "no dimension": the fact row's foreign key
/// stays unset.
pub async fn resolve(
    tx: &mut Transaction<'_, Postgres>,
    dim: Dimension,
    name: &str,
) -> Result<Option<i32>, sqlx::Error> {
    if name.is_empty() {
        return Ok(None);
    }

    let sql = format!(
        "INSERT INTO {table} ({col}) VALUES ($1) \
         ON CONFLICT ({col}) DO UPDATE SET {col} = EXCLUDED.{col} \
         RETURNING id",
        table = dim.table(),
        col = dim.name_column(),
    );

    let id = sqlx::query_scalar::<_, i32>(&sql)
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;
    Ok(Some(id))
}

/// Rack resolution keyed by name; the location is only written when the
/// rack is first created, never used as a match key.
pub async fn resolve_rack(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    location: &str,
) -> Result<Option<i32>, sqlx::Error> {
    if name.is_empty() {
        return Ok(None);
    }

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO rack (rack_name, rack_location) VALUES ($1, $2) \
         ON CONFLICT (rack_name) DO UPDATE SET rack_name = EXCLUDED.rack_name \
         RETURNING id",
    )
    .bind(name)
    .bind(location)
    .fetch_one(&mut **tx)
    .await?;
    Ok(Some(id))
}

/// Supplier resolution keyed by name; the contact is only written on insert.
pub async fn resolve_supplier(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    contact: &str,
) -> Result<Option<i32>, sqlx::Error> {
    if name.is_empty() {
        return Ok(None);
    }

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO supplier (name, contact) VALUES ($1, $2) \
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
         RETURNING id",
    )
    .bind(name)
    .bind(contact)
    .fetch_one(&mut **tx)
    .await?;
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_map_to_their_lookup_tables() {
        assert_eq!(Dimension::GenericName.table(), "generic_name");
        assert_eq!(Dimension::GenericName.name_column(), "generic_name");
        assert_eq!(Dimension::Category.table(), "category");
        assert_eq!(Dimension::Category.name_column(), "category_name");
        assert_eq!(Dimension::ProductType.table(), "product_type");
        assert_eq!(Dimension::ProductType.name_column(), "type_name");
    }
}
