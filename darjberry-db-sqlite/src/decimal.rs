use darjberry_core::RepositoryError;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

/// Read a decimal column. TEXT values are parsed exactly; INTEGER and REAL
/// values are accepted for rows written by other tools.
pub fn get_decimal(
    row: &SqliteRow,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Err(RepositoryError::Database(format!("Column '{}' is NULL", column)));
    }

    let type_name = value_ref.type_info().name().to_string();

    match type_name.as_str() {
        "TEXT" => {
            let text: String = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get TEXT from '{}': {}", column, e))
            })?;
            parse_decimal(&text, column)
        }
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Ok(Decimal::from(val))
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })
        }
        _ => Err(RepositoryError::Database(format!(
            "Unexpected type '{}' for column '{}'",
            type_name, column
        ))),
    }
}

/// Storage form of a decimal.
pub fn decimal_to_text(d: Decimal) -> String {
    d.to_string()
}

fn parse_decimal(
    text: &str,
    column: &str,
) -> Result<Decimal, RepositoryError> {
    text.trim().parse::<Decimal>().map_err(|e| {
        RepositoryError::Database(format!(
            "Failed to parse decimal '{}' in '{}': {}",
            text, column, e
        ))
    })
}
