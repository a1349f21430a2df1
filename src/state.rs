use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{CategoryService, CredentialVerifier, QuestionService},
    store::Stores,
    utils::{gate::Gate, jwt::TokenCodec},
};

#[derive(Clone)]
pub struct AppState {
    pub questions: QuestionService,
    pub categories: CategoryService,
    pub credentials: CredentialVerifier,
    pub gate: Gate,
    pub config: Config,
}

impl AppState {
    pub fn new(stores: Stores, config: Config) -> Self {
        let codec = TokenCodec::new(&config.jwt_secret, config.jwt_expiration);
        Self {
            questions: QuestionService::new(stores.questions.clone(), stores.categories.clone()),
            categories: CategoryService::new(stores.categories, stores.questions),
            credentials: CredentialVerifier::new(stores.admins),
            gate: Gate::new(codec),
            config,
        }
    }
}

impl FromRef<AppState> for QuestionService {
    fn from_ref(state: &AppState) -> Self {
        state.questions.clone()
    }
}

impl FromRef<AppState> for CategoryService {
    fn from_ref(state: &AppState) -> Self {
        state.categories.clone()
    }
}

impl FromRef<AppState> for CredentialVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}

impl FromRef<AppState> for Gate {
    fn from_ref(state: &AppState) -> Self {
        state.gate.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
