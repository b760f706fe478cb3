mod embedded;

use embedded::migrations;

use tokio_postgres::{Client, NoTls, Row};

use crate::models::Note;

/// Persistence gateway: every operation is exactly one parameterized
/// statement, so each call is implicitly atomic and there is no
/// partial-failure state to clean up.
pub struct Repository {
    client: Client,
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    /// Runs the embedded schema migrations. Called once at startup; creating
    /// the notes table is idempotent.
    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    /// Inserts a note and reports the store-assigned id. `created_at` and
    /// `updated_at` come from column defaults.
    pub async fn create_note(
        &self,
        title: String,
        content: String,
    ) -> Result<i64, tokio_postgres::Error> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notes (title, content) VALUES ($1, $2) RETURNING id",
                &[&title, &content],
            )
            .await?;

        Ok(row.get("id"))
    }

    /// Replaces title and content by primary key. `updated_at` is refreshed
    /// by the store's trigger, never set here. Returns whether a row matched.
    pub async fn update_note(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute(
                "UPDATE notes SET title = $1, content = $2 WHERE id = $3",
                &[&title, &content, &id],
            )
            .await?;

        Ok(rows == 1)
    }

    /// Hard delete by primary key. Returns whether a row matched.
    pub async fn delete_note(&self, id: i64) -> Result<bool, tokio_postgres::Error> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<Note>, tokio_postgres::Error> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    /// All notes, most recently updated first. The tie-break for equal
    /// `updated_at` is left to the store.
    pub async fn get_all_notes(&self) -> Result<Vec<Note>, tokio_postgres::Error> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes \
                 ORDER BY updated_at DESC",
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }
}
