// SQLite-backed blog store.
//
// Tables:
// - blogs: one row per blog, polarity kept as a nullable `positive` flag
// - entries: one row per entry, emoji by tag name, date as RFC 3339 text

use crate::core::blogs::{Blog, BlogStore, Emoji, Entry, Polarity, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

pub struct SqliteBlogStore {
    pool: Pool<Sqlite>,
}

impl SqliteBlogStore {
    /// Open (creating if needed) the database at `database_url` and run migrations.
    ///
    /// Accepts a bare file path, a `sqlite://` URL or `sqlite::memory:`.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure the file exists if it's a file path
        let path_str = database_url.trim_start_matches("sqlite://");
        if !in_memory && !Path::new(path_str).exists() {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path_str)?;
        }

        let conn_str = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{}", database_url)
        };

        // Every connection to :memory: gets its own empty database.
        let max_connections = if in_memory { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&conn_str)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blogs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                handle TEXT NOT NULL,
                positive BOOLEAN
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                blog_id INTEGER NOT NULL REFERENCES blogs(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                date TEXT NOT NULL,
                emoji TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_entries_blog ON entries(blog_id, id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn row_to_blog(row: &SqliteRow) -> Blog {
    Blog {
        id: Some(row.get::<i64, _>("id") as u64),
        name: row.get("name"),
        handle: row.get("handle"),
        polarity: Polarity::from_positive_flag(row.get::<Option<bool>, _>("positive")),
    }
}

fn row_to_entry(row: &SqliteRow) -> Result<Entry, StoreError> {
    let date_str: String = row.get("date");
    let date = DateTime::parse_from_rfc3339(&date_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::StorageError(format!("bad entry date '{date_str}': {e}")))?;
    let emoji = row
        .get::<String, _>("emoji")
        .parse::<Emoji>()
        .map_err(StoreError::StorageError)?;

    Ok(Entry {
        id: Some(row.get::<i64, _>("id") as u64),
        blog_id: row.get::<i64, _>("blog_id") as u64,
        title: row.get("title"),
        content: row.get("content"),
        date,
        emoji,
    })
}

#[async_trait]
impl BlogStore for SqliteBlogStore {
    async fn get_blog(&self, id: u64) -> Result<Option<Blog>, StoreError> {
        let row = sqlx::query("SELECT id, name, handle, positive FROM blogs WHERE id = ?")
            .bind(id as i64)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        Ok(row.as_ref().map(row_to_blog))
    }

    async fn list_all_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let rows = sqlx::query("SELECT id, name, handle, positive FROM blogs ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        Ok(rows.iter().map(row_to_blog).collect())
    }

    async fn save_blog(&self, mut blog: Blog) -> Result<Blog, StoreError> {
        let positive = blog.polarity.as_positive_flag();

        match blog.id {
            Some(id) => {
                // Upsert rather than REPLACE: a REPLACE would cascade-delete the entries.
                sqlx::query(
                    r#"
                    INSERT INTO blogs (id, name, handle, positive)
                    VALUES (?, ?, ?, ?)
                    ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        handle = excluded.handle,
                        positive = excluded.positive
                    "#,
                )
                .bind(id as i64)
                .bind(&blog.name)
                .bind(&blog.handle)
                .bind(positive)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::StorageError(e.to_string()))?;
            }
            None => {
                let result =
                    sqlx::query("INSERT INTO blogs (name, handle, positive) VALUES (?, ?, ?)")
                        .bind(&blog.name)
                        .bind(&blog.handle)
                        .bind(positive)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| StoreError::StorageError(e.to_string()))?;
                blog.id = Some(result.last_insert_rowid() as u64);
            }
        }

        Ok(blog)
    }

    async fn delete_blog(&self, id: u64) -> Result<bool, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        sqlx::query("DELETE FROM entries WHERE blog_id = ?")
            .bind(id as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_entry(&self, id: u64) -> Result<Option<Entry>, StoreError> {
        let row = sqlx::query(
            "SELECT id, blog_id, title, content, date, emoji FROM entries WHERE id = ?",
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::StorageError(e.to_string()))?;

        row.as_ref().map(row_to_entry).transpose()
    }

    async fn list_all_entries(&self) -> Result<Vec<Entry>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, blog_id, title, content, date, emoji FROM entries ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::StorageError(e.to_string()))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn list_entries_by_blog(&self, blog_id: u64) -> Result<Vec<Entry>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, blog_id, title, content, date, emoji
            FROM entries
            WHERE blog_id = ?
            ORDER BY id
            "#,
        )
        .bind(blog_id as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::StorageError(e.to_string()))?;

        rows.iter().map(row_to_entry).collect()
    }

    async fn save_entry(&self, mut entry: Entry) -> Result<Entry, StoreError> {
        let date = entry.date.to_rfc3339();

        match entry.id {
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO entries (id, blog_id, title, content, date, emoji)
                    VALUES (?, ?, ?, ?, ?, ?)
                    ON CONFLICT(id) DO UPDATE SET
                        blog_id = excluded.blog_id,
                        title = excluded.title,
                        content = excluded.content,
                        date = excluded.date,
                        emoji = excluded.emoji
                    "#,
                )
                .bind(id as i64)
                .bind(entry.blog_id as i64)
                .bind(&entry.title)
                .bind(&entry.content)
                .bind(&date)
                .bind(entry.emoji.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::StorageError(e.to_string()))?;
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO entries (blog_id, title, content, date, emoji)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(entry.blog_id as i64)
                .bind(&entry.title)
                .bind(&entry.content)
                .bind(&date)
                .bind(entry.emoji.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::StorageError(e.to_string()))?;
                entry.id = Some(result.last_insert_rowid() as u64);
            }
        }

        Ok(entry)
    }

    async fn delete_entry(&self, id: u64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM entries WHERE id = ?")
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::StorageError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn memory_store() -> SqliteBlogStore {
        SqliteBlogStore::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_blog_polarity_survives_storage() {
        let store = memory_store().await;

        for polarity in [Polarity::Positive, Polarity::Negative, Polarity::Unset] {
            let saved = store
                .save_blog(Blog::new("name", "handle", polarity))
                .await
                .unwrap();
            let loaded = store.get_blog(saved.id.unwrap()).await.unwrap().unwrap();
            assert_eq!(loaded, saved);
        }
        assert_eq!(store.list_all_blogs().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_entry_round_trip_and_update() {
        let store = memory_store().await;
        let blog = store
            .save_blog(Blog::new("b", "b", Polarity::Unset))
            .await
            .unwrap();

        let mut entry = store
            .save_entry(Entry::new(blog.id.unwrap(), "Title", "Body", Emoji::Angry))
            .await
            .unwrap();
        let loaded = store.get_entry(entry.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.emoji, Emoji::Angry);
        assert_eq!(loaded.title, "Title");
        assert_eq!(loaded.date.timestamp(), entry.date.timestamp());

        entry.content = "Edited".to_string();
        store.save_entry(entry.clone()).await.unwrap();
        let entries = store.list_entries_by_blog(blog.id.unwrap()).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "Edited");
    }

    #[tokio::test]
    async fn test_updating_blog_keeps_entries() {
        let store = memory_store().await;
        let mut blog = store
            .save_blog(Blog::new("b", "b", Polarity::Unset))
            .await
            .unwrap();
        store
            .save_entry(Entry::new(blog.id.unwrap(), "t", "c", Emoji::Like))
            .await
            .unwrap();

        blog.polarity = Polarity::Negative;
        store.save_blog(blog.clone()).await.unwrap();

        assert_eq!(store.list_all_entries().await.unwrap().len(), 1);
        let loaded = store.get_blog(blog.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.polarity, Polarity::Negative);
    }

    #[tokio::test]
    async fn test_delete_blog_removes_entries() {
        let store = memory_store().await;
        let blog = store
            .save_blog(Blog::new("b", "b", Polarity::Unset))
            .await
            .unwrap();
        store
            .save_entry(Entry::new(blog.id.unwrap(), "t", "c", Emoji::Like))
            .await
            .unwrap();

        assert!(store.delete_blog(blog.id.unwrap()).await.unwrap());
        assert!(!store.delete_blog(blog.id.unwrap()).await.unwrap());
        assert!(store.list_all_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_entry_is_not_an_error() {
        let store = memory_store().await;
        assert!(!store.delete_entry(9).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_database_is_created_and_reopened() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("blog.db");
        let path_str = path.to_str().unwrap();

        {
            let store = SqliteBlogStore::new(path_str).await.unwrap();
            store
                .save_blog(Blog::new("kept", "k", Polarity::Positive))
                .await
                .unwrap();
        }
        assert!(path.exists());

        let reopened = SqliteBlogStore::new(path_str).await.unwrap();
        let blogs = reopened.list_all_blogs().await.unwrap();
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0].name, "kept");
    }
}
