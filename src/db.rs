use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

// One statement per entry; sqlite prepares single statements only.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT NOT NULL UNIQUE COLLATE NOCASE,
        password_hash TEXT NOT NULL,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone TEXT,
        user_type TEXT NOT NULL,
        profile_image TEXT,
        is_verified INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS properties (
        id TEXT PRIMARY KEY,
        host_id TEXT NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        property_type TEXT NOT NULL,
        price_per_night REAL NOT NULL,
        location TEXT NOT NULL,
        amenities TEXT NOT NULL,
        images TEXT NOT NULL,
        max_guests INTEGER NOT NULL,
        bedrooms INTEGER NOT NULL,
        bathrooms INTEGER NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        rating REAL NOT NULL DEFAULT 0,
        review_count INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS bookings (
        id TEXT PRIMARY KEY,
        property_id TEXT NOT NULL,
        guest_id TEXT NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        guests INTEGER NOT NULL,
        total_price REAL NOT NULL,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS conversations (
        id TEXT PRIMARY KEY,
        participant_lo TEXT NOT NULL,
        participant_hi TEXT NOT NULL,
        property_id TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    // sqlite treats NULLs as distinct in unique indexes, so the optional
    // property context is folded to '' inside the index expression
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_conversations_identity
        ON conversations (participant_lo, participant_hi, IFNULL(property_id, ''))",
    "CREATE TABLE IF NOT EXISTS messages (
        id TEXT PRIMARY KEY,
        conversation_id TEXT NOT NULL,
        sender_id TEXT NOT NULL,
        content TEXT NOT NULL,
        message_type TEXT NOT NULL DEFAULT 'text',
        is_read INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_properties_host ON properties (host_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_property ON bookings (property_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_guest ON bookings (guest_id)",
    "CREATE INDEX IF NOT EXISTS idx_messages_conversation ON messages (conversation_id)",
];

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(16)
        .connect(database_url)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
