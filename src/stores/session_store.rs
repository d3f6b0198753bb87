// ============================================================================
// SESSION STORE - Fuente única de verdad de la autenticación
// ============================================================================
// Máquina de estados: Unknown → Authenticating → Authenticated | Unauthenticated
// La persistencia vive en SessionStorage; el estado observable en ReactiveState.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::error::ApiError;
use crate::models::{Credentials, Identity};
use crate::services::AuthService;
use crate::state::{AuthStatus, ReactiveState, Session};
use crate::utils::{
    expiry_in_days, SessionStorage, SESSION_KEYS, STORAGE_KEY_AUTHENTICATED, STORAGE_KEY_ROLE,
    STORAGE_KEY_TOKEN, STORAGE_KEY_USER_ID,
};

pub struct SessionStore {
    storage: Rc<dyn SessionStorage>,
    auth: AuthService,
    expiry_days: i64,
    status: ReactiveState<AuthStatus>,
    // Cada operación que cambia la sesión toma un número nuevo; una respuesta
    // que vuelve con un número viejo ya no manda.
    generation: Cell<u64>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn SessionStorage>, auth: AuthService, expiry_days: i64) -> Self {
        Self {
            storage,
            auth,
            expiry_days,
            status: ReactiveState::new(AuthStatus::Unknown),
            generation: Cell::new(0),
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status.with(AuthStatus::is_authenticated)
    }

    pub fn session(&self) -> Session {
        self.status
            .with(|status| Session::from_status(status, self.storage.get(STORAGE_KEY_TOKEN)))
    }

    /// Callback en cada cambio de estado
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.status.subscribe(callback);
    }

    /// Valida la sesión persistida. Solo actúa desde `Unknown`.
    pub async fn bootstrap(&self) -> AuthStatus {
        if self.status.with(|status| *status != AuthStatus::Unknown) {
            return self.status();
        }

        let Some(token) = self.storage.get(STORAGE_KEY_TOKEN) else {
            log::info!("🔓 Sin token persistido");
            self.status.set(AuthStatus::Unauthenticated);
            return AuthStatus::Unauthenticated;
        };

        let generation = self.next_generation();
        self.status.set(AuthStatus::Authenticating);
        log::info!("🔐 Validando sesión persistida...");

        let result = self.auth.current_user().await;
        if self.generation.get() != generation {
            log::info!("⏭️ Validación de sesión descartada (la sesión cambió mientras tanto)");
            return self.status();
        }

        match result {
            Ok(identity) => {
                if let Err(e) = self.persist(&token, &identity) {
                    log::warn!("⚠️ No se pudo refrescar la sesión persistida: {}", e);
                }
                log::info!("✅ Sesión válida ({})", identity.role);
                let status = authenticated(identity);
                self.status.set(status.clone());
                status
            }
            Err(e) => {
                log::warn!("⚠️ Sesión inválida, limpiando: {}", e);
                self.clear_storage();
                self.status.set(AuthStatus::Unauthenticated);
                AuthStatus::Unauthenticated
            }
        }
    }

    /// Login. Si falla, estado y storage quedan como estaban.
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, ApiError> {
        let previous = self.status();
        let generation = self.next_generation();
        self.status.set(AuthStatus::Authenticating);

        let result = self.auth.login(credentials).await;
        if self.generation.get() != generation {
            log::info!("⏭️ Respuesta de login descartada (la sesión cambió mientras tanto)");
            return Err(ApiError::Validation("Session changed during login".to_string()));
        }

        let grant = match result {
            Ok(grant) => grant,
            Err(e) => {
                self.restore_status(previous).await;
                return Err(e);
            }
        };

        let snapshot = self.snapshot();
        if let Err(e) = self.persist(&grant.token, &grant.identity) {
            log::error!("❌ No se pudo guardar la sesión: {}", e);
            self.restore(snapshot);
            self.restore_status(previous).await;
            return Err(e);
        }

        log::info!("✅ Login correcto ({})", grant.identity.role);
        self.status.set(authenticated(grant.identity.clone()));
        Ok(grant.identity)
    }

    /// Logout local, síncrono
    pub fn clear(&self) {
        self.next_generation();
        self.clear_storage();
        self.status.set(AuthStatus::Unauthenticated);
        log::info!("🚪 Sesión cerrada");
    }

    /// Logout local y aviso al backend. Un fallo del backend no restaura nada.
    pub async fn logout(&self) {
        let token = self.storage.get(STORAGE_KEY_TOKEN);
        self.clear();

        if token.is_none() {
            return;
        }
        if let Err(e) = self.auth.logout(token).await {
            log::warn!("⚠️ Logout en servidor falló: {}", e);
        }
    }

    /// Vuelve al estado previo al login. Si el login interrumpió una validación
    /// (`Authenticating`), la validación se repite desde `Unknown`.
    async fn restore_status(&self, previous: AuthStatus) {
        if previous == AuthStatus::Authenticating {
            log::info!("🔁 Login fallido durante la validación de sesión, revalidando...");
            self.status.set(AuthStatus::Unknown);
            self.bootstrap().await;
        } else {
            self.status.set(previous);
        }
    }

    fn next_generation(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn persist(&self, token: &str, identity: &Identity) -> Result<(), ApiError> {
        let expires_at = Some(expiry_in_days(self.expiry_days));
        self.storage.set(STORAGE_KEY_TOKEN, token, expires_at)?;
        self.storage.set(STORAGE_KEY_ROLE, &identity.role, expires_at)?;
        self.storage.set(STORAGE_KEY_USER_ID, &identity.user_id, expires_at)?;
        self.storage.set(STORAGE_KEY_AUTHENTICATED, "true", expires_at)
    }

    fn snapshot(&self) -> Vec<(&'static str, Option<String>)> {
        SESSION_KEYS
            .iter()
            .map(|key| (*key, self.storage.get(key)))
            .collect()
    }

    fn restore(&self, snapshot: Vec<(&'static str, Option<String>)>) {
        let expires_at = Some(expiry_in_days(self.expiry_days));
        for (key, value) in snapshot {
            let result = match value {
                Some(value) => self.storage.set(key, &value, expires_at),
                None => self.storage.remove(key),
            };
            if let Err(e) = result {
                log::warn!("⚠️ No se pudo restaurar {}: {}", key, e);
            }
        }
    }

    fn clear_storage(&self) {
        for key in SESSION_KEYS {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("⚠️ No se pudo borrar {}: {}", key, e);
            }
        }
    }
}

fn authenticated(identity: Identity) -> AuthStatus {
    AuthStatus::Authenticated {
        role: identity.role,
        user_id: identity.user_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ApiClient;
    use crate::test_support::{json_response, MockTransport};
    use crate::utils::MemoryStorage;
    use chrono::{DateTime, Utc};
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    fn store_with(transport: &Rc<MockTransport>, storage: Rc<dyn SessionStorage>) -> SessionStore {
        let client = ApiClient::new("http://api.test/api", transport.clone(), storage.clone());
        SessionStore::new(storage, AuthService::new(client), 1)
    }

    fn seed(storage: &MemoryStorage, token: &str) {
        let expires_at = Some(expiry_in_days(1));
        storage.set(STORAGE_KEY_TOKEN, token, expires_at).unwrap();
        storage.set(STORAGE_KEY_ROLE, "admin", expires_at).unwrap();
        storage.set(STORAGE_KEY_USER_ID, "u1", expires_at).unwrap();
        storage.set(STORAGE_KEY_AUTHENTICATED, "true", expires_at).unwrap();
    }

    /// Storage cuyas escrituras en una clave siempre fallan
    struct FailingStorage {
        inner: MemoryStorage,
        broken_key: &'static str,
    }

    impl SessionStorage for FailingStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str, expires_at: Option<DateTime<Utc>>) -> Result<(), ApiError> {
            if key == self.broken_key {
                return Err(ApiError::Storage("quota exceeded".to_string()));
            }
            self.inner.set(key, value, expires_at)
        }

        fn remove(&self, key: &str) -> Result<(), ApiError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn bootstrap_without_token_makes_no_request() {
        let transport = MockTransport::new();
        let store = store_with(&transport, Rc::new(MemoryStorage::new()));

        assert_eq!(block_on(store.bootstrap()), AuthStatus::Unauthenticated);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn bootstrap_with_valid_token_authenticates() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        storage.set(STORAGE_KEY_TOKEN, "t1", Some(expiry_in_days(1))).unwrap();
        transport.respond(200, json!({ "user": { "_doc": { "type": "manager", "_id": "u7" } } }));
        let store = store_with(&transport, storage.clone());

        let status = block_on(store.bootstrap());

        assert_eq!(
            status,
            AuthStatus::Authenticated { role: "manager".to_string(), user_id: "u7".to_string() }
        );
        assert_eq!(transport.requests()[0].bearer.as_deref(), Some("t1"));
        assert_eq!(storage.get(STORAGE_KEY_ROLE).as_deref(), Some("manager"));
        assert_eq!(storage.get(STORAGE_KEY_USER_ID).as_deref(), Some("u7"));
        assert!(store.session().is_authenticated);
    }

    #[test]
    fn bootstrap_with_rejected_token_clears_everything() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        seed(&storage, "stale");
        transport.respond(401, json!({ "message": "jwt expired" }));
        let store = store_with(&transport, storage.clone());

        assert_eq!(block_on(store.bootstrap()), AuthStatus::Unauthenticated);
        for key in SESSION_KEYS {
            assert_eq!(storage.get(key), None, "{} should be cleared", key);
        }
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn bootstrap_network_failure_clears_everything() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        seed(&storage, "t0");
        transport.fail_network("connection refused");
        let store = store_with(&transport, storage.clone());

        assert_eq!(block_on(store.bootstrap()), AuthStatus::Unauthenticated);
        for key in SESSION_KEYS {
            assert_eq!(storage.get(key), None, "{} should be cleared", key);
        }
        assert!(storage.is_empty());
    }

    #[test]
    fn failed_login_during_bootstrap_revalidates() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        seed(&storage, "t0");
        let pending = transport.defer();
        transport.respond(400, json!({ "message": "Invalid credentials" }));
        transport.respond(401, json!({ "message": "jwt expired" }));
        let store = store_with(&transport, storage.clone());

        let credentials = Credentials::new("a@b.com", "bad");
        let (bootstrapped, login) = block_on(async {
            futures::join!(store.bootstrap(), async {
                let login = store.login(&credentials).await;
                let _ = pending.send(json_response(
                    200,
                    json!({ "user": { "_doc": { "type": "admin", "_id": "u1" } } }),
                ));
                login
            })
        });

        assert_eq!(
            login,
            Err(ApiError::Http { status: 400, message: "Invalid credentials".to_string() })
        );
        assert_eq!(bootstrapped, AuthStatus::Unauthenticated);
        assert_eq!(store.status(), AuthStatus::Unauthenticated);
        assert_eq!(storage.get(STORAGE_KEY_TOKEN), None);

        let urls: Vec<String> = transport.requests().into_iter().map(|request| request.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/api/current/user".to_string(),
                "http://api.test/api/user/login".to_string(),
                "http://api.test/api/current/user".to_string(),
            ]
        );
    }

    #[test]
    fn bootstrap_runs_once() {
        let transport = MockTransport::new();
        let store = store_with(&transport, Rc::new(MemoryStorage::new()));

        block_on(store.bootstrap());
        transport.respond(200, json!({ "user": { "_doc": { "type": "admin", "_id": "u1" } } }));
        assert_eq!(block_on(store.bootstrap()), AuthStatus::Unauthenticated);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn login_persists_token_and_identity() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        transport.respond(200, json!({ "token": "t1", "user": { "type": "admin", "id": "u1" } }));
        let store = store_with(&transport, storage.clone());

        let identity = block_on(store.login(&Credentials::new("a@b.com", "pw"))).unwrap();

        assert_eq!(identity.user_id, "u1");
        assert_eq!(
            store.status(),
            AuthStatus::Authenticated { role: "admin".to_string(), user_id: "u1".to_string() }
        );
        assert_eq!(storage.get(STORAGE_KEY_TOKEN).as_deref(), Some("t1"));
        assert_eq!(storage.get(STORAGE_KEY_AUTHENTICATED).as_deref(), Some("true"));

        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://api.test/api/user/login");
        assert_eq!(sent[0].body, Some(json!({ "email": "a@b.com", "password": "pw" })));
    }

    #[test]
    fn failed_login_keeps_previous_state_and_storage() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        seed(&storage, "t0");
        transport.respond(200, json!({ "user": { "_doc": { "type": "admin", "_id": "u1" } } }));
        transport.respond(400, json!({ "message": "Invalid credentials" }));
        let store = store_with(&transport, storage.clone());
        let before = block_on(store.bootstrap());

        let result = block_on(store.login(&Credentials::new("a@b.com", "wrong")));

        assert_eq!(
            result,
            Err(ApiError::Http { status: 400, message: "Invalid credentials".to_string() })
        );
        assert_eq!(store.status(), before);
        assert_eq!(storage.get(STORAGE_KEY_TOKEN).as_deref(), Some("t0"));
        assert_eq!(storage.get(STORAGE_KEY_USER_ID).as_deref(), Some("u1"));
    }

    #[test]
    fn login_rolls_back_when_storage_fails() {
        let transport = MockTransport::new();
        let storage = Rc::new(FailingStorage {
            inner: MemoryStorage::new(),
            broken_key: STORAGE_KEY_USER_ID,
        });
        transport.respond(200, json!({ "token": "t1", "user": { "type": "admin", "id": "u1" } }));
        let store = store_with(&transport, storage.clone());
        block_on(store.bootstrap());

        let result = block_on(store.login(&Credentials::new("a@b.com", "pw")));

        assert!(matches!(result, Err(ApiError::Storage(_))));
        assert_eq!(store.status(), AuthStatus::Unauthenticated);
        assert_eq!(storage.get(STORAGE_KEY_TOKEN), None);
        assert_eq!(storage.get(STORAGE_KEY_ROLE), None);
    }

    #[test]
    fn logout_clears_locally_even_if_server_fails() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        transport.respond(200, json!({ "token": "t1", "user": { "type": "admin", "id": "u1" } }));
        transport.fail_network("offline");
        let store = store_with(&transport, storage.clone());
        block_on(store.login(&Credentials::new("a@b.com", "pw"))).unwrap();

        block_on(store.logout());

        assert_eq!(store.status(), AuthStatus::Unauthenticated);
        assert!(storage.is_empty());
        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].url, "http://api.test/api/user/logout");
        assert_eq!(sent[1].bearer.as_deref(), Some("t1"));
    }

    #[test]
    fn subscribers_see_every_transition() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        transport.respond(200, json!({ "token": "t1", "user": { "type": "admin", "id": "u1" } }));
        let store = Rc::new(store_with(&transport, storage));
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let weak = Rc::downgrade(&store);
            let seen = seen.clone();
            store.subscribe(move || {
                if let Some(store) = weak.upgrade() {
                    seen.borrow_mut().push(store.status());
                }
            });
        }

        block_on(store.login(&Credentials::new("a@b.com", "pw"))).unwrap();
        store.clear();

        assert_eq!(
            *seen.borrow(),
            vec![
                AuthStatus::Authenticating,
                AuthStatus::Authenticated { role: "admin".to_string(), user_id: "u1".to_string() },
                AuthStatus::Unauthenticated,
            ]
        );
    }

    #[test]
    fn clear_during_login_wins() {
        let transport = MockTransport::new();
        let storage = Rc::new(MemoryStorage::new());
        let pending = transport.defer();
        let store = store_with(&transport, storage.clone());

        let credentials = Credentials::new("a@b.com", "pw");
        let (result, _) = block_on(async {
            futures::join!(store.login(&credentials), async {
                store.clear();
                let _ = pending.send(json_response(
                    200,
                    json!({ "token": "t1", "user": { "type": "admin", "id": "u1" } }),
                ));
            })
        });

        assert!(result.is_err());
        assert_eq!(store.status(), AuthStatus::Unauthenticated);
        assert_eq!(storage.get(STORAGE_KEY_TOKEN), None);
    }
}
