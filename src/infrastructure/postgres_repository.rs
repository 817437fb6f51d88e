// PostgreSQL repository implementation
use crate::application::error::{DashboardError, DashboardResult};
use crate::application::series_repository::SeriesRepository;
use crate::domain::sensor::SensorTable;
use crate::domain::series::{Series, SeriesPoint};
use crate::infrastructure::postgres_connection::{ConnectionHandle, ConnectionProvider};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::Type;
use tokio_postgres::{Column, Row};

const TIME_COLUMN: usize = 0;
const VALUE_COLUMN: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeKind {
    Naive,
    Zoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Float8,
    Float4,
    Numeric,
    Int8,
    Int4,
    Int2,
}

fn time_kind(ty: &Type) -> Option<TimeKind> {
    match *ty {
        Type::TIMESTAMP => Some(TimeKind::Naive),
        Type::TIMESTAMPTZ => Some(TimeKind::Zoned),
        _ => None,
    }
}

fn value_kind(ty: &Type) -> Option<ValueKind> {
    match *ty {
        Type::FLOAT8 => Some(ValueKind::Float8),
        Type::FLOAT4 => Some(ValueKind::Float4),
        Type::NUMERIC => Some(ValueKind::Numeric),
        Type::INT8 => Some(ValueKind::Int8),
        Type::INT4 => Some(ValueKind::Int4),
        Type::INT2 => Some(ValueKind::Int2),
        _ => None,
    }
}

/// Quote a catalog table name as an SQL identifier. Table names may contain
/// '/', so they are always quoted.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn series_query(table: &str) -> String {
    format!("SELECT * FROM {} ORDER BY time", quote_identifier(table))
}

/// Reads whole sensor tables, one fresh connection per fetch.
#[derive(Debug, Clone, Default)]
pub struct PostgresRepository {
    connections: ConnectionProvider,
}

impl PostgresRepository {
    pub fn new(connections: ConnectionProvider) -> Self {
        Self { connections }
    }

    async fn query_series(&self, conn: &ConnectionHandle, table: &str) -> DashboardResult<Series> {
        let query = series_query(table);
        tracing::debug!("Executing series query: {}", query);

        let statement = conn
            .client()
            .prepare(&query)
            .await
            .map_err(|e| map_query_error(e, table))?;
        let (time, value) = column_kinds(statement.columns())?;

        let rows = conn
            .client()
            .query(&statement, &[])
            .await
            .map_err(|e| map_query_error(e, table))?;

        let points = rows
            .iter()
            .map(|row| decode_point(row, time, value))
            .collect::<DashboardResult<Vec<_>>>()?;

        tracing::debug!("Fetched {} rows from {}", points.len(), table);
        Ok(Series::new(points))
    }
}

#[async_trait]
impl SeriesRepository for PostgresRepository {
    async fn fetch_series(&self, sensor: &SensorTable) -> DashboardResult<Series> {
        let conn = self.connections.open().await?;
        let result = self.query_series(&conn, sensor.table).await;
        conn.close().await;
        result
    }
}

fn map_query_error(error: tokio_postgres::Error, table: &str) -> DashboardError {
    classify_query_error(error.code(), error.to_string(), table)
}

/// SQLSTATE 42P01 (undefined_table) means the sensor table is missing
fn classify_query_error(code: Option<&SqlState>, message: String, table: &str) -> DashboardError {
    if code == Some(&SqlState::UNDEFINED_TABLE) {
        DashboardError::NotFound(table.to_string())
    } else {
        DashboardError::Query(message)
    }
}

/// The result must have exactly two columns, taken positionally as time and
/// value whatever their names are.
fn column_kinds(columns: &[Column]) -> DashboardResult<(TimeKind, ValueKind)> {
    if columns.len() != 2 {
        return Err(DashboardError::Query(format!(
            "expected 2 columns (time, value), got {}",
            columns.len()
        )));
    }
    let types: Vec<&Type> = columns.iter().map(|c| c.type_()).collect();
    check_column_types(types[TIME_COLUMN], types[VALUE_COLUMN])
}

fn check_column_types(time: &Type, value: &Type) -> DashboardResult<(TimeKind, ValueKind)> {
    let time = time_kind(time)
        .ok_or_else(|| DashboardError::Query(format!("unsupported time column type {}", time)))?;
    let value = value_kind(value)
        .ok_or_else(|| DashboardError::Query(format!("unsupported value column type {}", value)))?;
    Ok((time, value))
}

fn decode_point(row: &Row, time: TimeKind, value: ValueKind) -> DashboardResult<SeriesPoint> {
    let time = match time {
        TimeKind::Naive => row.try_get::<_, Option<NaiveDateTime>>(TIME_COLUMN),
        TimeKind::Zoned => row
            .try_get::<_, Option<DateTime<Utc>>>(TIME_COLUMN)
            .map(zoned_to_naive),
    }
    .map_err(|e| DashboardError::Query(e.to_string()))?;

    let value = match value {
        ValueKind::Float8 => get_value::<f64>(row)?,
        ValueKind::Float4 => get_value::<f32>(row)?.map(widen_f32).transpose()?,
        ValueKind::Numeric => get_value::<Decimal>(row)?.map(decimal_to_f64).transpose()?,
        ValueKind::Int8 => get_value::<i64>(row)?.map(|v| v as f64),
        ValueKind::Int4 => get_value::<i32>(row)?.map(f64::from),
        ValueKind::Int2 => get_value::<i16>(row)?.map(f64::from),
    };

    point_from_parts(time, value)
}

fn get_value<'a, T>(row: &'a Row) -> DashboardResult<Option<T>>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    row.try_get::<_, Option<T>>(VALUE_COLUMN)
        .map_err(|e| DashboardError::Query(e.to_string()))
}

fn zoned_to_naive(time: Option<DateTime<Utc>>) -> Option<NaiveDateTime> {
    time.map(|t| t.naive_utc())
}

/// A NULL time is an error; a NULL value is kept as a gap
fn point_from_parts(time: Option<NaiveDateTime>, value: Option<f64>) -> DashboardResult<SeriesPoint> {
    let time = time.ok_or_else(|| DashboardError::Query("NULL in time column".to_string()))?;
    Ok(SeriesPoint::new(time, value))
}

/// Widen through the shortest decimal form so a stored `real` 7.1 stays 7.1
fn widen_f32(value: f32) -> DashboardResult<f64> {
    value
        .to_string()
        .parse()
        .map_err(|e| DashboardError::Query(format!("cannot widen real value {}: {}", value, e)))
}

fn decimal_to_f64(value: Decimal) -> DashboardResult<f64> {
    value
        .to_string()
        .parse()
        .map_err(|e| DashboardError::Query(format!("cannot convert numeric value {}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use std::str::FromStr;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("CM_PRESSURE/Output"), "\"CM_PRESSURE/Output\"");
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }

    #[test]
    fn test_series_query_quotes_table() {
        assert_eq!(
            series_query("CM_HAM_PH_AI1/pH_value"),
            "SELECT * FROM \"CM_HAM_PH_AI1/pH_value\" ORDER BY time"
        );
        assert_eq!(
            series_query("x\"; DROP TABLE y; --"),
            "SELECT * FROM \"x\"\"; DROP TABLE y; --\" ORDER BY time"
        );
    }

    #[test]
    fn test_supported_column_types() {
        assert_eq!(
            check_column_types(&Type::TIMESTAMP, &Type::FLOAT8).unwrap(),
            (TimeKind::Naive, ValueKind::Float8)
        );
        assert_eq!(
            check_column_types(&Type::TIMESTAMPTZ, &Type::INT4).unwrap(),
            (TimeKind::Zoned, ValueKind::Int4)
        );
        assert_eq!(
            check_column_types(&Type::TIMESTAMP, &Type::NUMERIC).unwrap(),
            (TimeKind::Naive, ValueKind::Numeric)
        );
    }

    #[test]
    fn test_unsupported_column_types() {
        assert!(matches!(
            check_column_types(&Type::TEXT, &Type::FLOAT8),
            Err(DashboardError::Query(_))
        ));
        assert!(matches!(
            check_column_types(&Type::TIMESTAMP, &Type::VARCHAR),
            Err(DashboardError::Query(_))
        ));
    }

    #[test]
    fn test_column_count_must_be_two() {
        assert!(matches!(column_kinds(&[]), Err(DashboardError::Query(_))));
    }

    #[test]
    fn test_undefined_table_is_not_found() {
        let error = classify_query_error(
            Some(&SqlState::UNDEFINED_TABLE),
            "relation does not exist".to_string(),
            "CM_PRESSURE/Output",
        );
        assert!(matches!(error, DashboardError::NotFound(t) if t == "CM_PRESSURE/Output"));

        let error = classify_query_error(Some(&SqlState::SYNTAX_ERROR), "syntax".to_string(), "t");
        assert!(matches!(error, DashboardError::Query(m) if m == "syntax"));

        let error = classify_query_error(None, "connection reset".to_string(), "t");
        assert!(matches!(error, DashboardError::Query(_)));
    }

    #[test]
    fn test_real_values_keep_their_decimal_form() {
        assert_eq!(widen_f32(7.1).unwrap(), 7.1);
        assert_eq!(widen_f32(-0.3).unwrap(), -0.3);

        let point = point_from_parts(Some(noon()), Some(widen_f32(7.1).unwrap())).unwrap();
        assert_eq!(
            Series::new(vec![point]).to_csv(),
            "time,value\n2023-01-01 12:00:00,7.1\n"
        );
    }

    #[test]
    fn test_numeric_values_convert_to_f64() {
        assert_eq!(decimal_to_f64(Decimal::from_str("14.70").unwrap()).unwrap(), 14.7);
        assert_eq!(decimal_to_f64(Decimal::from_str("-2").unwrap()).unwrap(), -2.0);
    }

    #[test]
    fn test_null_time_is_query_error() {
        assert!(matches!(point_from_parts(None, Some(1.0)), Err(DashboardError::Query(_))));
    }

    #[test]
    fn test_null_value_is_kept_as_gap() {
        let point = point_from_parts(Some(noon()), None).unwrap();

        assert_eq!(point, SeriesPoint::new(noon(), None));
    }

    #[test]
    fn test_zoned_time_is_converted_to_utc() {
        let local = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2023, 1, 1, 14, 0, 0)
            .unwrap();

        assert_eq!(zoned_to_naive(Some(local.with_timezone(&Utc))), Some(noon()));
        assert_eq!(zoned_to_naive(None), None);
    }

    /// Needs `POSTGRES_*` pointing at a database the test may create tables in
    #[tokio::test]
    #[ignore = "needs a writable PostgreSQL database"]
    async fn test_fetch_series_against_database() {
        const UNORDERED: SensorTable = SensorTable {
            id: "1",
            table: "dashboard_test/unordered",
            title: "Test",
            y_axis_title: "Test",
            color: "#000000",
            filename: "test",
        };
        const MISSING: SensorTable = SensorTable {
            table: "dashboard_test/missing",
            ..UNORDERED
        };

        let provider = ConnectionProvider::new();
        let conn = provider.open().await.unwrap();
        conn.client()
            .batch_execute(
                "DROP TABLE IF EXISTS \"dashboard_test/unordered\";
                 DROP TABLE IF EXISTS \"dashboard_test/missing\";
                 CREATE TABLE \"dashboard_test/unordered\" (time timestamp, value real);
                 INSERT INTO \"dashboard_test/unordered\" VALUES
                     ('2023-01-01 12:30:00', 7.3),
                     ('2023-01-01 12:00:00', 7.1),
                     ('2023-01-01 12:15:00', NULL);",
            )
            .await
            .unwrap();
        conn.close().await;

        let repository = PostgresRepository::new(provider.clone());

        let series = repository.fetch_series(&UNORDERED).await.unwrap();
        let times: Vec<NaiveDateTime> = series.points.iter().map(|p| p.time).collect();
        assert_eq!(series.len(), 3);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(series.values(), [Some(7.1), None, Some(7.3)]);

        // A failed query still releases its connection; the next fetch works
        let missing = repository.fetch_series(&MISSING).await;
        assert!(matches!(missing, Err(DashboardError::NotFound(_))));
        assert_eq!(repository.fetch_series(&UNORDERED).await.unwrap(), series);

        let conn = provider.open().await.unwrap();
        conn.client()
            .batch_execute("DROP TABLE \"dashboard_test/unordered\";")
            .await
            .unwrap();
        conn.close().await;
    }
}
