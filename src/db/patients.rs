use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, Row};

use crate::models::{PatientSummary, PatientUpsert};

/// Insert a patient, or overwrite the existing row's fields in place when
/// the external id is already taken. Returns the internal id either way.
///
/// `created` is stamped only on first insert; `updated` is re-stamped on
/// both paths. A missing `middle_name` never clears a stored one.
pub async fn upsert(
    conn: &mut PgConnection,
    record: &PatientUpsert,
    now: DateTime<Utc>,
) -> sqlx::Result<i64> {
    let row = sqlx::query(
        "INSERT INTO patients (first_name, last_name, middle_name, date_of_birth, external_id, created, updated)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         ON CONFLICT (external_id) DO UPDATE SET
             first_name = EXCLUDED.first_name,
             last_name = EXCLUDED.last_name,
             middle_name = COALESCE(EXCLUDED.middle_name, patients.middle_name),
             date_of_birth = EXCLUDED.date_of_birth,
             updated = EXCLUDED.updated
         RETURNING id",
    )
    .bind(&record.first_name)
    .bind(&record.last_name)
    .bind(&record.middle_name)
    .bind(record.date_of_birth)
    .bind(&record.external_id)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(row.get("id"))
}

/// Resolve a patient's internal id from its external id.
pub async fn find_id_by_external_id(
    conn: &mut PgConnection,
    external_id: &str,
) -> sqlx::Result<Option<i64>> {
    let row = sqlx::query("SELECT id FROM patients WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(|r| r.get("id")))
}

/// Delete every patient whose internal id is not in `keep`. An empty keep
/// set clears the table.
pub async fn delete_not_in(conn: &mut PgConnection, keep: &[i64]) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM patients WHERE id <> ALL($1)")
        .bind(keep)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// One row per patient with at least one payment, carrying the sum of that
/// patient's payments. Bounds are inclusive and apply to the sum; a `None`
/// bound is no filter.
pub async fn list_with_payment_totals(
    pool: &PgPool,
    min_sum: Option<f64>,
    max_sum: Option<f64>,
) -> sqlx::Result<Vec<PatientSummary>> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT patients.id, patients.first_name, patients.last_name, SUM(payments.amount) AS sum \
         FROM patients \
         JOIN payments ON payments.patient_id = patients.id \
         GROUP BY patients.id, patients.first_name, patients.last_name",
    );

    let mut keyword = " HAVING ";
    if let Some(min) = min_sum {
        query
            .push(keyword)
            .push("SUM(payments.amount) >= ")
            .push_bind(min);
        keyword = " AND ";
    }
    if let Some(max) = max_sum {
        query
            .push(keyword)
            .push("SUM(payments.amount) <= ")
            .push_bind(max);
    }
    query.push(" ORDER BY patients.id");

    query
        .build_query_as::<PatientSummary>()
        .fetch_all(pool)
        .await
}
