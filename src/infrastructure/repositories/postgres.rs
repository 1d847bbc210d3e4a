use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::domain::models::{
    ActorContext, Category, Channel, DeliveryEvent, DeliveryEventKind, Direction, Message,
    MessageStatus, Preference, PreferenceAudit, ProviderKind, RecipientKind, RecipientRef,
    Thread,
};
use crate::domain::repositories::{
    DeliveryEventRepository, MessageRepository, PreferenceRepository, ThreadRepository,
};

pub type PgPool = Pool<Postgres>;

#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn insert(&self, message: Message) -> anyhow::Result<Message> {
        let (status, status_reason) = status_to_fields(&message.status);
        let row = sqlx::query(
            r#"
            INSERT INTO messages (
                id, recipient_kind, recipient_id, direction, channel, provider, category,
                status, status_reason, subject, body, from_address, to_address, thread_id,
                metadata, scheduled_at, created_at, updated_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18)
            RETURNING *
            "#,
        )
        .bind(message.id)
        .bind(message.recipient.kind.as_str())
        .bind(message.recipient.id)
        .bind(direction_to_str(message.direction))
        .bind(message.channel.as_str())
        .bind(message.provider.as_str())
        .bind(message.category.map(|c| c.as_str()))
        .bind(status)
        .bind(status_reason)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(&message.from_address)
        .bind(&message.to_address)
        .bind(message.thread_id)
        .bind(&message.metadata)
        .bind(message.scheduled_at)
        .bind(message.created_at)
        .bind(message.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Message::try_from(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Message>> {
        let row = sqlx::query(r#"SELECT * FROM messages WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Message::try_from).transpose()
    }

    async fn update_status(&self, id: Uuid, status: MessageStatus) -> anyhow::Result<()> {
        let (status_str, reason) = status_to_fields(&status);
        sqlx::query(
            r#"
            UPDATE messages
            SET status = $2,
                status_reason = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status_str)
        .bind(reason)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_schedule(
        &self,
        id: Uuid,
        status: MessageStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<()> {
        let (status_str, reason) = status_to_fields(&status);
        sqlx::query(
            r#"
            UPDATE messages
            SET status = $2,
                status_reason = $3,
                scheduled_at = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status_str)
        .bind(reason)
        .bind(scheduled_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_by_recipient(
        &self,
        recipient: RecipientRef,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> anyhow::Result<(Vec<Message>, bool)> {
        let limit = limit.unwrap_or(50).min(200) as i64;
        let offset = offset.unwrap_or(0) as i64;

        // Fetch one extra row to learn whether more pages exist.
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM messages
            WHERE recipient_kind = $1 AND recipient_id = $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(recipient.kind.as_str())
        .bind(recipient.id)
        .bind(limit + 1)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let has_more = rows.len() > limit as usize;
        let messages: Vec<Message> = rows
            .into_iter()
            .take(limit as usize)
            .map(Message::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((messages, has_more))
    }

    async fn list_by_thread(&self, thread_id: Uuid) -> anyhow::Result<Vec<Message>> {
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM messages
            WHERE thread_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Message::try_from).collect()
    }

    async fn list_scheduled_due(&self, cutoff: DateTime<Utc>) -> anyhow::Result<Vec<Message>> {
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM messages
            WHERE status = 'scheduled' AND scheduled_at <= $1
            ORDER BY scheduled_at ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Message::try_from).collect()
    }

    async fn count(&self) -> anyhow::Result<u64> {
        let row = sqlx::query(r#"SELECT COUNT(*) AS total FROM messages"#)
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get("total")?;
        Ok(total as u64)
    }
}

#[derive(Clone)]
pub struct PostgresThreadRepository {
    pool: PgPool,
}

impl PostgresThreadRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl ThreadRepository for PostgresThreadRepository {
    async fn insert(&self, thread: Thread) -> anyhow::Result<Thread> {
        let row = sqlx::query(
            r#"
            INSERT INTO threads (
                id, recipient_kind, recipient_id, channel, subject, last_message_at, created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING *
            "#,
        )
        .bind(thread.id)
        .bind(thread.recipient.kind.as_str())
        .bind(thread.recipient.id)
        .bind(thread.channel.as_str())
        .bind(&thread.subject)
        .bind(thread.last_message_at)
        .bind(thread.created_at)
        .fetch_one(&self.pool)
        .await?;

        Thread::try_from(row)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Thread>> {
        let row = sqlx::query(r#"SELECT * FROM threads WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Thread::try_from).transpose()
    }

    async fn find_latest(
        &self,
        recipient: RecipientRef,
        channel: Channel,
    ) -> anyhow::Result<Option<Thread>> {
        let row = sqlx::query(
            r#"
            SELECT *
            FROM threads
            WHERE recipient_kind = $1 AND recipient_id = $2 AND channel = $3
            ORDER BY last_message_at DESC
            LIMIT 1
            "#,
        )
        .bind(recipient.kind.as_str())
        .bind(recipient.id)
        .bind(channel.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Thread::try_from).transpose()
    }

    async fn touch(&self, id: Uuid, at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query(r#"UPDATE threads SET last_message_at = $2 WHERE id = $1"#)
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_by_recipient(&self, recipient: RecipientRef) -> anyhow::Result<Vec<Thread>> {
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM threads
            WHERE recipient_kind = $1 AND recipient_id = $2
            ORDER BY last_message_at DESC
            "#,
        )
        .bind(recipient.kind.as_str())
        .bind(recipient.id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Thread::try_from).collect()
    }
}

#[derive(Clone)]
pub struct PostgresPreferenceRepository {
    pool: PgPool,
}

impl PostgresPreferenceRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl PreferenceRepository for PostgresPreferenceRepository {
    async fn find(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Option<Preference>> {
        let row = sqlx::query(
            r#"
            SELECT *
            FROM preferences
            WHERE recipient_kind = $1 AND recipient_id = $2 AND channel = $3 AND category = $4
            "#,
        )
        .bind(recipient.kind.as_str())
        .bind(recipient.id)
        .bind(channel.as_str())
        .bind(category.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Preference::try_from).transpose()
    }

    async fn upsert(&self, preference: Preference) -> anyhow::Result<Preference> {
        let row = sqlx::query(
            r#"
            INSERT INTO preferences (
                id, recipient_kind, recipient_id, channel, category, opted_in,
                created_at, updated_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            ON CONFLICT (recipient_kind, recipient_id, channel, category) DO UPDATE
            SET opted_in = EXCLUDED.opted_in,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(preference.id)
        .bind(preference.recipient.kind.as_str())
        .bind(preference.recipient.id)
        .bind(preference.channel.as_str())
        .bind(preference.category.as_str())
        .bind(preference.opted_in)
        .bind(preference.created_at)
        .bind(preference.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Preference::try_from(row)
    }

    async fn log_change(&self, audit: PreferenceAudit) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO preference_audits (
                id, recipient_kind, recipient_id, channel, category, opted_in,
                actor_ip, actor_user_agent, reason, created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
            "#,
        )
        .bind(audit.id)
        .bind(audit.recipient.kind.as_str())
        .bind(audit.recipient.id)
        .bind(audit.channel.as_str())
        .bind(audit.category.as_str())
        .bind(audit.opted_in)
        .bind(&audit.actor.ip)
        .bind(&audit.actor.user_agent)
        .bind(&audit.reason)
        .bind(audit.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn audit_history(
        &self,
        recipient: RecipientRef,
        channel: Channel,
        category: Category,
    ) -> anyhow::Result<Vec<PreferenceAudit>> {
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM preference_audits
            WHERE recipient_kind = $1 AND recipient_id = $2 AND channel = $3 AND category = $4
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient.kind.as_str())
        .bind(recipient.id)
        .bind(channel.as_str())
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(PreferenceAudit::try_from).collect()
    }

    async fn list_by_recipient(
        &self,
        recipient: RecipientRef,
    ) -> anyhow::Result<Vec<Preference>> {
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM preferences
            WHERE recipient_kind = $1 AND recipient_id = $2
            ORDER BY updated_at DESC
            "#,
        )
        .bind(recipient.kind.as_str())
        .bind(recipient.id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Preference::try_from).collect()
    }
}

#[derive(Clone)]
pub struct PostgresDeliveryEventRepository {
    pool: PgPool,
}

impl PostgresDeliveryEventRepository {
    pub fn new(pool: PgPool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl DeliveryEventRepository for PostgresDeliveryEventRepository {
    async fn append(&self, event: DeliveryEvent) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO delivery_events (id, message_id, kind, detail, occurred_at)
            VALUES ($1,$2,$3,$4,$5)
            "#,
        )
        .bind(event.id)
        .bind(event.message_id)
        .bind(event.kind.as_str())
        .bind(&event.detail)
        .bind(event.occurred_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_by_message(&self, message_id: Uuid) -> anyhow::Result<Vec<DeliveryEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT *
            FROM delivery_events
            WHERE message_id = $1
            ORDER BY occurred_at ASC
            "#,
        )
        .bind(message_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(DeliveryEvent::try_from).collect()
    }
}

impl TryFrom<sqlx::postgres::PgRow> for Message {
    type Error = anyhow::Error;

    fn try_from(row: sqlx::postgres::PgRow) -> Result<Self, Self::Error> {
        let status_str: String = row.try_get("status")?;
        let status_reason: Option<String> = row.try_get("status_reason")?;
        let category: Option<String> = row.try_get("category")?;

        Ok(Message {
            id: row.try_get("id")?,
            recipient: recipient_from_row(&row)?,
            direction: direction_from_str(&row.try_get::<String, _>("direction")?)?,
            channel: channel_from_str(&row.try_get::<String, _>("channel")?)?,
            provider: provider_from_str(&row.try_get::<String, _>("provider")?)?,
            category: category.as_deref().map(category_from_str).transpose()?,
            status: status_from_fields(&status_str, status_reason)?,
            subject: row.try_get("subject")?,
            body: row.try_get("body")?,
            from_address: row.try_get("from_address")?,
            to_address: row.try_get("to_address")?,
            thread_id: row.try_get("thread_id")?,
            metadata: row.try_get("metadata")?,
            scheduled_at: row.try_get("scheduled_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFrom<sqlx::postgres::PgRow> for Thread {
    type Error = anyhow::Error;

    fn try_from(row: sqlx::postgres::PgRow) -> Result<Self, Self::Error> {
        Ok(Thread {
            id: row.try_get("id")?,
            recipient: recipient_from_row(&row)?,
            channel: channel_from_str(&row.try_get::<String, _>("channel")?)?,
            subject: row.try_get("subject")?,
            last_message_at: row.try_get("last_message_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl TryFrom<sqlx::postgres::PgRow> for Preference {
    type Error = anyhow::Error;

    fn try_from(row: sqlx::postgres::PgRow) -> Result<Self, Self::Error> {
        Ok(Preference {
            id: row.try_get("id")?,
            recipient: recipient_from_row(&row)?,
            channel: channel_from_str(&row.try_get::<String, _>("channel")?)?,
            category: category_from_str(&row.try_get::<String, _>("category")?)?,
            opted_in: row.try_get("opted_in")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFrom<sqlx::postgres::PgRow> for PreferenceAudit {
    type Error = anyhow::Error;

    fn try_from(row: sqlx::postgres::PgRow) -> Result<Self, Self::Error> {
        Ok(PreferenceAudit {
            id: row.try_get("id")?,
            recipient: recipient_from_row(&row)?,
            channel: channel_from_str(&row.try_get::<String, _>("channel")?)?,
            category: category_from_str(&row.try_get::<String, _>("category")?)?,
            opted_in: row.try_get("opted_in")?,
            actor: ActorContext {
                ip: row.try_get("actor_ip")?,
                user_agent: row.try_get("actor_user_agent")?,
            },
            reason: row.try_get("reason")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl TryFrom<sqlx::postgres::PgRow> for DeliveryEvent {
    type Error = anyhow::Error;

    fn try_from(row: sqlx::postgres::PgRow) -> Result<Self, Self::Error> {
        let kind_str: String = row.try_get("kind")?;
        let kind = DeliveryEventKind::from_str(&kind_str)
            .ok_or_else(|| anyhow::anyhow!("unknown event kind {kind_str}"))?;
        Ok(DeliveryEvent {
            id: row.try_get("id")?,
            message_id: row.try_get("message_id")?,
            kind,
            detail: row.try_get("detail")?,
            occurred_at: row.try_get("occurred_at")?,
        })
    }
}

fn recipient_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<RecipientRef> {
    let kind_str: String = row.try_get("recipient_kind")?;
    let kind = RecipientKind::from_str(&kind_str)
        .ok_or_else(|| anyhow::anyhow!("unknown recipient kind {kind_str}"))?;
    Ok(RecipientRef {
        kind,
        id: row.try_get("recipient_id")?,
    })
}

fn direction_to_str(direction: Direction) -> &'static str {
    match direction {
        Direction::Outbound => "outbound",
        Direction::Inbound => "inbound",
    }
}

fn direction_from_str(value: &str) -> anyhow::Result<Direction> {
    match value {
        "outbound" => Ok(Direction::Outbound),
        "inbound" => Ok(Direction::Inbound),
        other => anyhow::bail!("unknown direction {other}"),
    }
}

fn channel_from_str(value: &str) -> anyhow::Result<Channel> {
    Channel::from_str(value).ok_or_else(|| anyhow::anyhow!("unknown channel {value}"))
}

fn provider_from_str(value: &str) -> anyhow::Result<ProviderKind> {
    ProviderKind::from_str(value).ok_or_else(|| anyhow::anyhow!("unknown provider {value}"))
}

fn category_from_str(value: &str) -> anyhow::Result<Category> {
    Category::from_str(value).ok_or_else(|| anyhow::anyhow!("unknown category {value}"))
}

fn status_to_fields(status: &MessageStatus) -> (&'static str, Option<String>) {
    match status {
        MessageStatus::Pending => ("pending", None),
        MessageStatus::Scheduled => ("scheduled", None),
        MessageStatus::Sent => ("sent", None),
        MessageStatus::Delivered => ("delivered", None),
        MessageStatus::Failed { reason } => ("failed", Some(reason.clone())),
        MessageStatus::Bounced { reason } => ("bounced", Some(reason.clone())),
        MessageStatus::Cancelled => ("cancelled", None),
    }
}

fn status_from_fields(status: &str, reason: Option<String>) -> anyhow::Result<MessageStatus> {
    Ok(match status {
        "pending" => MessageStatus::Pending,
        "scheduled" => MessageStatus::Scheduled,
        "sent" => MessageStatus::Sent,
        "delivered" => MessageStatus::Delivered,
        "failed" => MessageStatus::Failed {
            reason: reason.unwrap_or_else(|| "failed".to_string()),
        },
        "bounced" => MessageStatus::Bounced {
            reason: reason.unwrap_or_else(|| "bounced".to_string()),
        },
        "cancelled" => MessageStatus::Cancelled,
        other => anyhow::bail!("unknown message status {other}"),
    })
}
