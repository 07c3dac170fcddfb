// ABOUTME: Tests for session persistence and the full gate flow
// ABOUTME: Covers token validation, revocation, and surface mismatch sign-out

#[cfg(test)]
mod tests {
    use crate::error::AuthError;
    use crate::gate::{AuthGate, Surface};
    use crate::password::hash_password;
    use crate::session::SessionStorage;
    use sqlx::SqlitePool;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();

        sqlx::query(
            r#"
            CREATE TABLE profiles (
                id TEXT PRIMARY KEY,
                role TEXT NOT NULL,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                membership TEXT NOT NULL DEFAULT 'Basic',
                status TEXT NOT NULL DEFAULT 'Active',
                join_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE sessions (
                id TEXT PRIMARY KEY,
                profile_id TEXT NOT NULL,
                token_hash TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                revoked_at TEXT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    async fn insert_profile(pool: &SqlitePool, id: &str, role: &str, email: &str, password: &str) {
        let hash = hash_password(password).unwrap();
        let now = chrono::Utc::now();
        sqlx::query(
            r#"
            INSERT INTO profiles (id, role, full_name, email, password_hash, join_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(role)
        .bind("Test User")
        .bind(email)
        .bind(&hash)
        .bind("2026-01-01")
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_and_validate_session() {
        let pool = setup_test_db().await;
        let storage = SessionStorage::new(pool);

        let (session, token) = storage.create_session("p1", 24).await.unwrap();
        assert_eq!(session.profile_id, "p1");

        let validated = storage.validate_token(&token).await.unwrap();
        assert_eq!(validated.id, session.id);
        assert_eq!(validated.profile_id, "p1");
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let pool = setup_test_db().await;
        let storage = SessionStorage::new(pool);

        let err = storage.validate_token("no-such-token").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let pool = setup_test_db().await;
        let storage = SessionStorage::new(pool);

        let (_, token) = storage.create_session("p1", 24).await.unwrap();
        storage.revoke_token(&token).await.unwrap();

        let err = storage.validate_token(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let pool = setup_test_db().await;
        let storage = SessionStorage::new(pool);

        let (_, token) = storage.create_session("p1", -1).await.unwrap();
        let err = storage.validate_token(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }

    #[tokio::test]
    async fn test_revoke_all_sessions_for_profile() {
        let pool = setup_test_db().await;
        let storage = SessionStorage::new(pool);

        let (_, t1) = storage.create_session("p1", 24).await.unwrap();
        let (_, t2) = storage.create_session("p1", 24).await.unwrap();
        let (_, other) = storage.create_session("p2", 24).await.unwrap();

        let revoked = storage.revoke_sessions_for_profile("p1").await.unwrap();
        assert_eq!(revoked, 2);
        assert!(storage.validate_token(&t1).await.is_err());
        assert!(storage.validate_token(&t2).await.is_err());
        assert!(storage.validate_token(&other).await.is_ok());
    }

    #[tokio::test]
    async fn test_gate_admin_login_succeeds() {
        let pool = setup_test_db().await;
        insert_profile(&pool, "a1", "Super Admin", "boss@example.com", "secret").await;
        let gate = AuthGate::new(pool, 24);

        let outcome = gate
            .authenticate("boss@example.com", "secret", Surface::Admin)
            .await
            .unwrap();
        assert_eq!(outcome.profile_id, "a1");
        assert_eq!(outcome.redirect, "/admin");

        let session = gate.sessions().validate_token(&outcome.token).await.unwrap();
        assert_eq!(session.profile_id, "a1");
    }

    #[tokio::test]
    async fn test_gate_rejects_bad_password() {
        let pool = setup_test_db().await;
        insert_profile(&pool, "c1", "customer", "cust@example.com", "secret").await;
        let gate = AuthGate::new(pool, 24);

        let err = gate
            .authenticate("cust@example.com", "wrong", Surface::Customer)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_gate_rejects_unknown_email() {
        let pool = setup_test_db().await;
        let gate = AuthGate::new(pool, 24);

        let err = gate
            .authenticate("nobody@example.com", "secret", Surface::Customer)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_gate_surface_mismatch_leaves_no_session() {
        let pool = setup_test_db().await;
        insert_profile(&pool, "c1", "customer", "cust@example.com", "secret").await;
        let gate = AuthGate::new(pool.clone(), 24);

        let err = gate
            .authenticate("cust@example.com", "secret", Surface::Admin)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::SurfaceMismatch { expected: Surface::Admin }));

        // The session established during the attempt must be revoked
        let live: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE profile_id = 'c1' AND revoked_at IS NULL",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(live, 0);
    }

    #[tokio::test]
    async fn test_gate_sign_out_revokes_token() {
        let pool = setup_test_db().await;
        insert_profile(&pool, "c1", "customer", "cust@example.com", "secret").await;
        let gate = AuthGate::new(pool, 24);

        let outcome = gate
            .authenticate("cust@example.com", "secret", Surface::Customer)
            .await
            .unwrap();
        gate.sign_out(&outcome.token).await.unwrap();

        let err = gate.sessions().validate_token(&outcome.token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidSession));
    }
}
