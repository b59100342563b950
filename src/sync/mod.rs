mod clock;

pub use clock::{Clock, SystemClock};

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use crate::db;
use crate::models::{PatientUpsert, PaymentUpsert};

/// Failure modes of a reconciliation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A record failed field-level validation; the whole batch is rejected.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Counts describing one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Records inserted or updated.
    pub synced: usize,
    /// Records dropped because their owner could not be resolved.
    pub skipped: usize,
    /// Pre-existing rows deleted because the batch no longer contains them.
    pub pruned: u64,
}

/// Brings a local table into agreement with an externally supplied batch:
/// upsert every record by external id, then prune every row the batch no
/// longer mentions. Each run is a single transaction, committed only after
/// both phases succeed.
pub struct Reconciler {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl Reconciler {
    pub fn new(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// Reconcile the patients table against `batch`. Patients pruned here
    /// cascade-delete their payments.
    pub async fn reconcile_patients(
        &self,
        batch: &[PatientUpsert],
    ) -> Result<SyncSummary, SyncError> {
        for record in batch {
            record.validate().map_err(SyncError::InvalidRecord)?;
        }

        let now = self.clock.now();
        let mut tx = self.pool.begin().await?;
        let mut keep = Vec::with_capacity(batch.len());

        for record in batch {
            let id = db::patients::upsert(&mut tx, record, now).await?;
            keep.push(id);
        }

        let pruned = db::patients::delete_not_in(&mut tx, &keep).await?;
        tx.commit().await?;

        let summary = SyncSummary {
            synced: keep.len(),
            skipped: 0,
            pruned,
        };
        tracing::info!(
            synced = summary.synced,
            pruned = summary.pruned,
            "reconciled patients"
        );
        Ok(summary)
    }

    /// Reconcile the payments table against `batch`. A record whose owning
    /// patient cannot be resolved is skipped; because skipped records never
    /// enter the keep set, a pre-existing row for that payment falls to the
    /// prune step.
    pub async fn reconcile_payments(
        &self,
        batch: &[PaymentUpsert],
    ) -> Result<SyncSummary, SyncError> {
        for record in batch {
            record.validate().map_err(SyncError::InvalidRecord)?;
        }

        let now = self.clock.now();
        let mut tx = self.pool.begin().await?;
        let mut keep = Vec::with_capacity(batch.len());
        let mut skipped = 0usize;

        for record in batch {
            let patient_id =
                match db::patients::find_id_by_external_id(&mut tx, &record.patient_id).await? {
                    Some(id) => id,
                    None => {
                        tracing::warn!(
                            payment = %record.external_id,
                            patient = %record.patient_id,
                            "skipping payment for unknown patient"
                        );
                        skipped += 1;
                        continue;
                    }
                };

            let id = db::payments::upsert(&mut tx, record, patient_id, now).await?;
            keep.push(id);
        }

        let pruned = db::payments::delete_not_in(&mut tx, &keep).await?;
        tx.commit().await?;

        let summary = SyncSummary {
            synced: keep.len(),
            skipped,
            pruned,
        };
        tracing::info!(
            synced = summary.synced,
            skipped = summary.skipped,
            pruned = summary.pruned,
            "reconciled payments"
        );
        Ok(summary)
    }
}
