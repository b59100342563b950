use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder, Row};

use crate::models::{Payment, PaymentUpsert};

/// Insert a payment, or overwrite the existing row with the same external
/// id. `patient_id` is the already-resolved internal patient id.
pub async fn upsert(
    conn: &mut PgConnection,
    record: &PaymentUpsert,
    patient_id: i64,
    now: DateTime<Utc>,
) -> sqlx::Result<i64> {
    let row = sqlx::query(
        "INSERT INTO payments (amount, patient_id, external_id, created, updated)
         VALUES ($1, $2, $3, $4, $4)
         ON CONFLICT (external_id) DO UPDATE SET
             amount = EXCLUDED.amount,
             patient_id = EXCLUDED.patient_id,
             updated = EXCLUDED.updated
         RETURNING id",
    )
    .bind(record.amount)
    .bind(patient_id)
    .bind(&record.external_id)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(row.get("id"))
}

/// Delete every payment whose internal id is not in `keep`.
pub async fn delete_not_in(conn: &mut PgConnection, keep: &[i64]) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM payments WHERE id <> ALL($1)")
        .bind(keep)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// List payments, optionally filtered by the owning patient's external id
/// and an inclusive amount range.
pub async fn list(
    pool: &PgPool,
    patient_external_id: Option<&str>,
    amount_min: Option<f64>,
    amount_max: Option<f64>,
) -> sqlx::Result<Vec<Payment>> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT payments.id, payments.amount, payments.patient_id, payments.external_id \
         FROM payments \
         JOIN patients ON patients.id = payments.patient_id \
         WHERE TRUE",
    );

    if let Some(external_id) = patient_external_id {
        query
            .push(" AND patients.external_id = ")
            .push_bind(external_id);
    }
    if let Some(min) = amount_min {
        query.push(" AND payments.amount >= ").push_bind(min);
    }
    if let Some(max) = amount_max {
        query.push(" AND payments.amount <= ").push_bind(max);
    }
    query.push(" ORDER BY payments.id");

    query.build_query_as::<Payment>().fetch_all(pool).await
}
