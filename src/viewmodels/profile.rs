// ============================================================================
// PROFILE - Carga del perfil del usuario autenticado
// ============================================================================

use std::cell::Cell;

use crate::models::UserProfile;
use crate::services::UserService;
use crate::state::{ProfileState, ReactiveState};
use crate::utils::USER_PROFILE_SELECT;

pub struct ProfileLoader {
    users: UserService,
    state: ReactiveState<ProfileState>,
    generation: Cell<u64>,
}

impl ProfileLoader {
    pub fn new(users: UserService) -> Self {
        Self {
            users,
            state: ReactiveState::new(ProfileState::default()),
            generation: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> ProfileState {
        self.state.get()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.with(|state| state.profile.clone())
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.state.subscribe(callback);
    }

    /// Pide el perfil la primera vez; después devuelve lo que haya
    pub async fn load(&self) -> Option<UserProfile> {
        if self.state.with(|state| state.has_fetched) {
            return self.profile();
        }

        let generation = self.generation.get();
        self.state.update(|state| {
            state.has_fetched = true;
            state.is_fetching = true;
            state.error = None;
        });

        let result = self.users.current_profile(USER_PROFILE_SELECT).await;
        if self.generation.get() != generation {
            log::info!("⏭️ Perfil descartado (sesión cerrada mientras tanto)");
            return None;
        }

        match result {
            Ok(profile) => {
                log::info!("👤 Perfil cargado: {}", profile.email);
                self.state.update(|state| {
                    state.profile = Some(profile.clone());
                    state.is_fetching = false;
                });
                Some(profile)
            }
            Err(e) => {
                log::warn!("⚠️ No se pudo cargar el perfil: {}", e);
                let message = e.user_message("users");
                self.state.update(|state| {
                    state.error = Some(message);
                    state.is_fetching = false;
                });
                None
            }
        }
    }

    /// Olvida el perfil (logout)
    pub fn reset(&self) {
        self.generation.set(self.generation.get() + 1);
        self.state.set(ProfileState::default());
    }

    /// Vuelve a pedir el perfil aunque ya se haya cargado
    pub async fn reload(&self) -> Option<UserProfile> {
        self.reset();
        self.load().await
    }
}
