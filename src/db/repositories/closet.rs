use anyhow::{bail, Context, Result};
use chrono::Utc;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{attributes_from_columns, format_datetime, parse_datetime, parse_rating},
    Database,
};
use crate::models::{ClosetEntry, ClothingAttributeRecord};

/// Input for saving a closet outfit. A fresh id is generated when `id` is
/// `None`.
#[derive(Debug, Clone, Default)]
pub struct NewClosetEntry {
    pub id: Option<String>,
    pub user_id: String,
    pub details: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<u8>,
    pub attributes: ClothingAttributeRecord,
}

fn row_to_closet_entry(row: &Row) -> Result<ClosetEntry> {
    Ok(ClosetEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        details: row.get("details")?,
        genre: row.get("genre")?,
        rating: parse_rating(row.get("rating")?)?,
        attributes: attributes_from_columns(
            row.get("top")?,
            row.get("bottom")?,
            row.get("outerwear")?,
            row.get("shoes")?,
        ),
        created_at: parse_datetime(&row.get::<_, String>("created_at")?, "created_at")?,
    })
}

impl Database {
    pub async fn insert_closet_entry(&self, entry: NewClosetEntry) -> Result<ClosetEntry> {
        if entry.user_id.is_empty() {
            bail!("user_id is required");
        }

        let entry = ClosetEntry {
            id: entry
                .id
                .unwrap_or_else(|| format!("cl_{}", uuid::Uuid::new_v4())),
            user_id: entry.user_id,
            details: entry.details,
            genre: entry.genre,
            rating: entry.rating,
            attributes: entry.attributes,
            created_at: Utc::now(),
        };

        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO closet_entries (id, user_id, details, genre, rating, top, bottom, outerwear, shoes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.id,
                    record.user_id,
                    record.details,
                    record.genre,
                    record.rating,
                    record.attributes.top,
                    record.attributes.bottom,
                    record.attributes.outerwear,
                    record.attributes.shoes,
                    format_datetime(&record.created_at),
                ],
            )
            .with_context(|| "failed to insert closet entry")?;
            Ok(())
        })
        .await?;

        Ok(entry)
    }

    /// Every closet entry the user owns, oldest first.
    pub async fn list_closet_entries(&self, user_id: &str) -> Result<Vec<ClosetEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, details, genre, rating, top, bottom, outerwear, shoes, created_at
                 FROM closet_entries
                 WHERE user_id = ?1
                 ORDER BY created_at ASC, rowid ASC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(row_to_closet_entry(row)?);
            }

            Ok(entries)
        })
        .await
    }
}
