use anyhow::{bail, Context, Result};
use chrono::Utc;
use rusqlite::{params, Row};

use crate::db::{
    helpers::{attributes_from_columns, format_datetime, parse_datetime},
    Database,
};
use crate::models::{ClothingAttributeRecord, WishlistEntry};

/// Input for saving a wishlist item. A fresh id is generated when `id` is
/// `None`.
#[derive(Debug, Clone, Default)]
pub struct NewWishlistItem {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub notes: Option<String>,
    pub attributes: ClothingAttributeRecord,
}

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, name, notes, top, bottom, outerwear, shoes, created_at FROM wishlist_items";

fn row_to_wishlist_entry(row: &Row) -> Result<WishlistEntry> {
    Ok(WishlistEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        notes: row.get("notes")?,
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
    pub async fn insert_wishlist_item(&self, item: NewWishlistItem) -> Result<WishlistEntry> {
        if item.user_id.is_empty() {
            bail!("user_id is required");
        }

        let entry = WishlistEntry {
            id: item
                .id
                .unwrap_or_else(|| format!("wl_{}", uuid::Uuid::new_v4())),
            user_id: item.user_id,
            name: item.name,
            notes: item.notes,
            attributes: item.attributes,
            created_at: Utc::now(),
        };

        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO wishlist_items (id, user_id, name, notes, top, bottom, outerwear, shoes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id,
                    record.user_id,
                    record.name,
                    record.notes,
                    record.attributes.top,
                    record.attributes.bottom,
                    record.attributes.outerwear,
                    record.attributes.shoes,
                    format_datetime(&record.created_at),
                ],
            )
            .with_context(|| "failed to insert wishlist item")?;
            Ok(())
        })
        .await?;

        Ok(entry)
    }

    /// Wishlist item `item_id`, only if it belongs to `user_id`.
    pub async fn get_wishlist_item(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Option<WishlistEntry>> {
        let user_id = user_id.to_string();
        let item_id = item_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} WHERE user_id = ?1 AND id = ?2"
            ))?;

            let mut rows = stmt.query(params![user_id, item_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_wishlist_entry(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    pub async fn list_wishlist_items(&self, user_id: &str) -> Result<Vec<WishlistEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC"
            ))?;

            let mut rows = stmt.query(params![user_id])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(row_to_wishlist_entry(row)?);
            }

            Ok(items)
        })
        .await
    }
}
