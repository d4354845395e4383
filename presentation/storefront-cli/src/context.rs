use std::sync::Arc;

use chrono::Utc;
use tokio::sync::broadcast;

use business::application::cart::controller::{CartController, CartControllerDeps};
use business::application::catalog::configure::ConfigureHouseUseCaseImpl;
use business::application::catalog::get::GetCatalogUseCaseImpl;
use business::application::quote::get_all::GetQuotesUseCaseImpl;
use business::application::quote::request::RequestQuoteUseCaseImpl;
use business::domain::cart::auth::AuthProvider;
use business::domain::cart::session::AuthEvent;
use business::domain::cart::store::SessionStore;
use business::domain::catalog::gateway::CatalogGateway;
use business::domain::catalog::use_cases::configure::ConfigureHouseUseCase;
use business::domain::catalog::use_cases::get::GetCatalogUseCase;
use business::domain::logger::Logger;
use business::domain::quote::gateway::QuoteGateway;
use business::domain::quote::use_cases::get_all::GetQuotesUseCase;
use business::domain::quote::use_cases::request::RequestQuoteUseCase;
use local_storage::FileSessionStore;
use logger::TracingLogger;
use remote::auth::SupabaseAuthProvider;
use remote::cart_gateway::CartGatewayHttp;
use remote::catalog_gateway::CatalogGatewaySupabase;
use remote::client::ApiClient;
use remote::credentials::{AuthSession, Credentials};
use remote::order_gateway::OrderGatewayHttp;
use remote::quote_gateway::QuoteGatewaySupabase;

use crate::cli::ConnectionArgs;
use crate::notifier::ConsoleNotifier;

/// Key of the persisted identity-provider session in the session store.
pub const AUTH_SESSION_KEY: &str = "auth.session";

/// One visitor's storefront: the auth client, the cart controller and the
/// catalog and quote use cases, wired to the same session store and
/// credentials.
pub struct Storefront {
    pub auth: SupabaseAuthProvider,
    pub controller: CartController,
    pub catalog: Arc<dyn GetCatalogUseCase>,
    pub configure: Arc<dyn ConfigureHouseUseCase>,
    pub request_quote: Arc<dyn RequestQuoteUseCase>,
    pub quotes: Arc<dyn GetQuotesUseCase>,
    events: broadcast::Receiver<AuthEvent>,
    store: Arc<dyn SessionStore>,
}

impl Storefront {
    /// Restores the last session, if still valid, and loads its cart.
    pub async fn connect(args: &ConnectionArgs) -> Self {
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&args.storage_path));
        let credentials = Credentials::new();
        let auth = SupabaseAuthProvider::new(
            &args.supabase_url,
            args.supabase_anon_key.clone(),
            credentials.clone(),
        );
        if let Some(session) = load_auth_session(store.as_ref()) {
            auth.restore(session);
        }

        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let catalog_gateway: Arc<dyn CatalogGateway> = Arc::new(CatalogGatewaySupabase::new(
            &args.supabase_url,
            args.supabase_anon_key.clone(),
        ));
        let quote_gateway: Arc<dyn QuoteGateway> = Arc::new(QuoteGatewaySupabase::new(
            &args.supabase_url,
            args.supabase_anon_key.clone(),
            credentials.clone(),
        ));
        let configure: Arc<dyn ConfigureHouseUseCase> = Arc::new(ConfigureHouseUseCaseImpl {
            catalog: catalog_gateway.clone(),
            logger: logger.clone(),
        });

        let client = ApiClient::new(args.api_url.clone(), credentials);
        let controller = CartController::new(
            CartControllerDeps {
                cart_gateway: Arc::new(CartGatewayHttp::new(client.clone())),
                order_gateway: Arc::new(OrderGatewayHttp::new(client)),
                store: store.clone(),
                notifier: Arc::new(ConsoleNotifier),
                logger: logger.clone(),
            },
            args.sign_in_policy(),
        );
        let events = auth.subscribe();

        let mut storefront = Self {
            auth,
            controller,
            catalog: Arc::new(GetCatalogUseCaseImpl {
                catalog: catalog_gateway,
                logger: logger.clone(),
            }),
            configure: configure.clone(),
            request_quote: Arc::new(RequestQuoteUseCaseImpl {
                configure,
                quotes: quote_gateway.clone(),
                logger: logger.clone(),
            }),
            quotes: Arc::new(GetQuotesUseCaseImpl {
                quotes: quote_gateway,
                logger,
            }),
            events,
            store,
        };
        let current = storefront.auth.current_account();
        if let Err(e) = storefront.controller.initialize(current).await {
            tracing::debug!("Cart started degraded: {}", e);
        }
        storefront
    }

    /// Lets the controller catch up with sign-ins and sign-outs.
    pub async fn sync_auth(&mut self) -> usize {
        self.controller.pump(&mut self.events).await
    }

    pub fn remember_session(&self, session: &AuthSession) -> anyhow::Result<()> {
        let raw = serde_json::to_string(session)?;
        self.store.set(AUTH_SESSION_KEY, &raw)?;
        Ok(())
    }

    pub fn forget_session(&self) {
        if let Err(e) = self.store.remove(AUTH_SESSION_KEY) {
            tracing::warn!("Stored session could not be removed: {}", e);
        }
    }
}

/// A missing, malformed or expired session counts as signed out.
pub fn load_auth_session(store: &dyn SessionStore) -> Option<AuthSession> {
    let raw = match store.get(AUTH_SESSION_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("Stored session could not be read: {}", e);
            return None;
        }
    };

    let session: AuthSession = match serde_json::from_str(&raw) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Stored session is malformed, ignoring it: {}", e);
            return None;
        }
    };

    if session.is_expired(Utc::now()) {
        tracing::info!("Stored session for {} expired", session.account_id);
        return None;
    }

    Some(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::shared::value_objects::AccountId;
    use chrono::Duration;
    use local_storage::MemorySessionStore;

    fn session(expires_in: Option<Duration>) -> AuthSession {
        AuthSession {
            account_id: AccountId::new("acc-1"),
            email: Some("ana@example.com".to_string()),
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at: expires_in.map(|d| Utc::now() + d),
        }
    }

    fn store_with(session: &AuthSession) -> MemorySessionStore {
        let store = MemorySessionStore::new();
        store
            .set(AUTH_SESSION_KEY, &serde_json::to_string(session).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn should_restore_live_session() {
        let stored = session(Some(Duration::hours(1)));
        let store = store_with(&stored);

        assert_eq!(load_auth_session(&store), Some(stored));
    }

    #[test]
    fn should_ignore_expired_session() {
        let store = store_with(&session(Some(Duration::hours(-1))));

        assert_eq!(load_auth_session(&store), None);
    }

    #[test]
    fn should_ignore_malformed_session() {
        let store = MemorySessionStore::new();
        store.set(AUTH_SESSION_KEY, "{\"account_id\":").unwrap();

        assert_eq!(load_auth_session(&store), None);
    }

    #[test]
    fn should_treat_missing_session_as_signed_out() {
        assert_eq!(load_auth_session(&MemorySessionStore::new()), None);
    }
}
