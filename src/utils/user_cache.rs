use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use serde::Serialize;
use sqlx::MySqlPool;
use std::time::Duration;
use utoipa::ToSchema;

/// Directory display info attached to request/calendar responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDisplay {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "john.doe@company.com")]
    pub email: String,
}

impl UserDisplay {
    /// A directory miss degrades to a placeholder, never to a failure.
    pub fn placeholder() -> Self {
        UserDisplay {
            name: "Unknown".to_string(),
            email: String::new(),
        }
    }
}

pub static USER_DISPLAY_CACHE: Lazy<Cache<u64, UserDisplay>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(500_000) // tune based on memory
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Resolve a user's display info, cache-first. Lookup failures are
/// logged and degrade to the placeholder.
pub async fn get_user_display(pool: &MySqlPool, user_id: u64) -> UserDisplay {
    if let Some(hit) = USER_DISPLAY_CACHE.get(&user_id).await {
        return hit;
    }

    let row = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT full_name, email
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await;

    match row {
        Ok(Some((name, email))) => {
            let display = UserDisplay { name, email };
            USER_DISPLAY_CACHE.insert(user_id, display.clone()).await;
            display
        }
        Ok(None) => UserDisplay::placeholder(),
        Err(e) => {
            tracing::warn!(error = %e, user_id, "user directory lookup failed");
            UserDisplay::placeholder()
        }
    }
}

/// Batch insert a warmup slice
async fn batch_mark(rows: &[(u64, String, String)]) {
    let futures: Vec<_> = rows
        .iter()
        .map(|(id, name, email)| {
            USER_DISPLAY_CACHE.insert(
                *id,
                UserDisplay {
                    name: name.clone(),
                    email: email.clone(),
                },
            )
        })
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load only RECENT users into the in-memory cache (batched)
pub async fn warmup_user_cache(pool: &MySqlPool, days: u32, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (u64, String, String)>(
        r#"
        SELECT id, full_name, email
        FROM users
        WHERE last_login_at >= NOW() - INTERVAL ? DAY
        ORDER BY last_login_at DESC
        "#,
    )
    .bind(days)
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        batch.push(row?);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_mark(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining rows
    if !batch.is_empty() {
        batch_mark(&batch).await;
    }

    log::info!(
        "User display cache warmup complete: {} recent users (last {} days)",
        total_count,
        days
    );

    Ok(())
}
