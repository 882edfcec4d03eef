//! Application state for Casefile API

use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;

pub struct AppState {
    pub db: SqlitePool,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        // Get database path from env or use default
        let db_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let data_dir = dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("casefile-api");
            std::fs::create_dir_all(&data_dir).ok();
            format!("sqlite:{}/casefile.db?mode=rwc", data_dir.display())
        });

        tracing::info!("Connecting to database: {}", db_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        Self::setup(&pool).await?;

        Ok(Self { db: pool })
    }

    /// In-memory database, used by the integration tests.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::setup(&pool).await?;
        Ok(Self { db: pool })
    }

    async fn setup(pool: &SqlitePool) -> Result<()> {
        tracing::info!("Creating database schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cases (
                id TEXT PRIMARY KEY,
                case_number TEXT NOT NULL UNIQUE,
                railway_post TEXT NOT NULL,
                law_section TEXT NOT NULL,
                fir_number TEXT,
                incident_description TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft',
                registered_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accused (
                id TEXT PRIMARY KEY,
                case_id TEXT NOT NULL REFERENCES cases(id),
                name TEXT NOT NULL,
                parentage TEXT NOT NULL,
                address TEXT NOT NULL,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        // One table per memo kind, upserted by (case, accused).
        for table in [
            "seizure_memos",
            "arrest_memos",
            "personal_search_memos",
            "medical_memos",
            "bnss_checklist_memos",
            "court_forwarding_memos",
        ] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id TEXT PRIMARY KEY,
                    case_id TEXT NOT NULL REFERENCES cases(id),
                    accused_id TEXT NOT NULL REFERENCES accused(id),
                    fields_json TEXT NOT NULL,
                    signature_png BLOB,
                    is_completed INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    UNIQUE(case_id, accused_id)
                )
                "#,
                table
            ))
            .execute(pool)
            .await?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accused_challans (
                id TEXT PRIMARY KEY,
                case_id TEXT NOT NULL UNIQUE REFERENCES cases(id),
                fields_json TEXT NOT NULL,
                signature_png BLOB,
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS seized_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                memo_id TEXT NOT NULL REFERENCES seizure_memos(id),
                idx INTEGER NOT NULL,
                description TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                estimated_value REAL NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS personal_search_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                memo_id TEXT NOT NULL REFERENCES personal_search_memos(id),
                idx INTEGER NOT NULL,
                description TEXT NOT NULL,
                quantity INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                designation TEXT NOT NULL,
                post TEXT NOT NULL,
                zone TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS railway_posts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                division TEXT NOT NULL,
                zone TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS law_sections (
                id TEXT PRIMARY KEY,
                act TEXT NOT NULL,
                section TEXT NOT NULL,
                description TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS activity_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_id TEXT NOT NULL,
                case_id TEXT NOT NULL,
                actor TEXT NOT NULL,
                action_json TEXT NOT NULL,
                detail TEXT,
                timestamp TEXT NOT NULL,
                previous_hash TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activity_logs_case ON activity_logs(case_id)",
        )
        .execute(pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_accused_case ON accused(case_id)")
            .execute(pool)
            .await?;

        Self::seed_lookups(pool).await?;

        tracing::info!("Schema ready");
        Ok(())
    }

    /// Seed the lookup directories when they are empty.
    async fn seed_lookups(pool: &SqlitePool) -> Result<()> {
        Self::seed_law_sections(pool).await?;
        Self::seed_profiles(pool).await?;
        Self::seed_railway_posts(pool).await?;
        Ok(())
    }

    async fn seed_law_sections(pool: &SqlitePool) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM law_sections")
            .fetch_one(pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        let sections = [
            (
                "rpup-3",
                "Railway Property (Unlawful Possession) Act 1966",
                "3",
                "Unlawful possession of railway property",
            ),
            (
                "rpup-3a",
                "Railway Property (Unlawful Possession) Act 1966",
                "3(a)",
                "Unlawful possession, property valued above punishment threshold",
            ),
            (
                "rly-143",
                "Railways Act 1989",
                "143",
                "Unauthorised carrying on of business of procuring and supplying of tickets",
            ),
            (
                "rly-147",
                "Railways Act 1989",
                "147",
                "Trespass and refusal to desist from trespass",
            ),
            (
                "rly-150",
                "Railways Act 1989",
                "150",
                "Maliciously wrecking or attempting to wreck a train",
            ),
        ];

        for (id, act, section, description) in sections {
            sqlx::query(
                "INSERT INTO law_sections (id, act, section, description) VALUES (?, ?, ?, ?)",
            )
            .bind(id)
            .bind(act)
            .bind(section)
            .bind(description)
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    async fn seed_profiles(pool: &SqlitePool) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        let profiles = [
            (
                "prof-sharma",
                "S. K. Sharma",
                "Sub-Inspector",
                "RPF Post New Delhi",
                "Northern Railway",
            ),
            (
                "prof-verma",
                "R. Verma",
                "Inspector",
                "RPF Post New Delhi",
                "Northern Railway",
            ),
            (
                "prof-meena",
                "A. Meena",
                "Head Constable",
                "RPF Post Ghaziabad",
                "Northern Railway",
            ),
        ];

        for (id, name, designation, post, zone) in profiles {
            sqlx::query(
                "INSERT INTO profiles (id, name, designation, post, zone) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(id)
            .bind(name)
            .bind(designation)
            .bind(post)
            .bind(zone)
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    async fn seed_railway_posts(pool: &SqlitePool) -> Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM railway_posts")
            .fetch_one(pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        let posts = [
            ("post-ndls", "RPF Post New Delhi", "Delhi", "Northern Railway"),
            ("post-gzb", "RPF Post Ghaziabad", "Delhi", "Northern Railway"),
            (
                "post-cnb",
                "RPF Post Kanpur Central",
                "Prayagraj",
                "North Central Railway",
            ),
        ];

        for (id, name, division, zone) in posts {
            sqlx::query(
                "INSERT INTO railway_posts (id, name, division, zone) VALUES (?, ?, ?, ?)",
            )
            .bind(id)
            .bind(name)
            .bind(division)
            .bind(zone)
            .execute(pool)
            .await?;
        }

        Ok(())
    }
}

/// Get platform-specific data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(target_os = "windows")]
        {
            std::env::var("APPDATA").ok().map(PathBuf::from)
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }
}
