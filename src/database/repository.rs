/*!
 * Repository layer for database operations.
 */

use anyhow::Result;
use chrono::Utc;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::connection::DatabaseConnection;
use super::models::{ContactRecord, NotificationStatus};

const SELECT_SUBMISSION: &str = r#"
    SELECT id, name, email, phone, domicile, building_size, service_type, message,
           locale, notification_status, created_at, notified_at
    FROM contact_submissions
"#;

/// Repository for database operations
#[derive(Clone, Debug)]
pub struct Repository {
    db: DatabaseConnection,
}

impl Repository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Contact Submissions
    // =========================================================================

    /// Store a new submission
    pub async fn insert_submission(&self, record: &ContactRecord) -> Result<()> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO contact_submissions (
                        id, name, email, phone, domicile, building_size, service_type, message,
                        locale, notification_status, created_at, notified_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                    "#,
                    params![
                        record.id,
                        record.name,
                        record.email,
                        record.phone,
                        record.domicile,
                        record.building_size,
                        record.service_type,
                        record.message,
                        record.locale,
                        record.notification_status.to_string(),
                        record.created_at,
                        record.notified_at,
                    ],
                )?;
                debug!("Stored contact submission {}", record.id);
                Ok(())
            })
            .await
    }

    /// Get a submission by ID
    pub async fn get_submission(&self, id: &str) -> Result<Option<ContactRecord>> {
        let id = id.to_string();

        self.db
            .execute_async(move |conn| Self::get_submission_sync(conn, &id))
            .await
    }

    fn get_submission_sync(conn: &Connection, id: &str) -> Result<Option<ContactRecord>> {
        let sql = format!("{} WHERE id = ?1", SELECT_SUBMISSION);
        let record = conn.query_row(&sql, [id], Self::row_to_record).optional()?;
        Ok(record)
    }

    /// Most recent submissions, newest first
    pub async fn recent_submissions(&self, limit: usize) -> Result<Vec<ContactRecord>> {
        self.db
            .execute_async(move |conn| {
                let sql = format!("{} ORDER BY created_at DESC, rowid DESC LIMIT ?1", SELECT_SUBMISSION);
                let mut stmt = conn.prepare(&sql)?;
                let records = stmt
                    .query_map([limit as i64], Self::row_to_record)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await
    }

    /// Number of stored submissions
    pub async fn count_submissions(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM contact_submissions", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }

    /// Record the outcome of the notification attempt
    ///
    /// # Returns
    /// * `Ok(false)` - No submission has this id
    pub async fn mark_notification(&self, id: &str, status: NotificationStatus) -> Result<bool> {
        let id = id.to_string();
        let now = Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                let updated = conn.execute(
                    "UPDATE contact_submissions SET notification_status = ?1, notified_at = ?2 WHERE id = ?3",
                    params![status.to_string(), now, id],
                )?;
                Ok(updated > 0)
            })
            .await
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<ContactRecord> {
        Ok(ContactRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            domicile: row.get(4)?,
            building_size: row.get(5)?,
            service_type: row.get(6)?,
            message: row.get(7)?,
            locale: row.get(8)?,
            notification_status: row
                .get::<_, String>(9)?
                .parse()
                .unwrap_or(NotificationStatus::Pending),
            created_at: row.get(10)?,
            notified_at: row.get(11)?,
        })
    }
}
