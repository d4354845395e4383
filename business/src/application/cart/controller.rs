use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use super::checkout::CheckoutSaga;
use crate::domain::cart::checkout::CheckoutReport;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::gateway::{CartGateway, OrderGateway};
use crate::domain::cart::model::{CartLine, CartLineId, CartLineProps};
use crate::domain::cart::session::{AuthEvent, Session, SignInPolicy};
use crate::domain::cart::state::{CartAction, CartState};
use crate::domain::cart::store::{
    SessionStore, load_local_cart, load_pending_checkout, remove_local_cart,
    remove_pending_checkout, save_local_cart, save_pending_checkout,
};
use crate::domain::logger::Logger;
use crate::domain::notifier::Notifier;
use crate::domain::order::model::Order;
use crate::domain::shared::value_objects::AccountId;

pub struct CartControllerDeps {
    pub cart_gateway: Arc<dyn CartGateway>,
    pub order_gateway: Arc<dyn OrderGateway>,
    pub store: Arc<dyn SessionStore>,
    pub notifier: Arc<dyn Notifier>,
    pub logger: Arc<dyn Logger>,
}

/// Owns the cart of one visitor and keeps it in the right place.
///
/// Anonymous visitors keep their lines in the session store. Once signed in,
/// every mutation goes to the remote table first and the cart is then reloaded
/// from it, so the in-memory state always mirrors what the server holds.
/// Failed remote calls leave the state untouched.
pub struct CartController {
    cart_gateway: Arc<dyn CartGateway>,
    order_gateway: Arc<dyn OrderGateway>,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    logger: Arc<dyn Logger>,
    policy: SignInPolicy,
    session: Session,
    state: CartState,
    pending_checkout: Option<CheckoutReport>,
}

impl CartController {
    pub fn new(deps: CartControllerDeps, policy: SignInPolicy) -> Self {
        Self {
            cart_gateway: deps.cart_gateway,
            order_gateway: deps.order_gateway,
            store: deps.store,
            notifier: deps.notifier,
            logger: deps.logger,
            policy,
            session: Session::Anonymous,
            state: CartState::empty(),
            pending_checkout: None,
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Report of a checkout that stopped before the cart was cleared.
    pub fn pending_checkout(&self) -> Option<&CheckoutReport> {
        self.pending_checkout.as_ref()
    }

    /// Loads the cart for whoever is signed in when the controller starts.
    pub async fn initialize(&mut self, current_account: Option<AccountId>) -> Result<(), CartError> {
        match current_account {
            Some(account_id) => {
                self.session = Session::Authenticated(account_id.clone());
                self.pending_checkout =
                    load_pending_checkout(self.store.as_ref(), &account_id, self.logger.as_ref());
                self.refresh(&account_id)
                    .await
                    .map_err(|e| self.fail("cart.load_failed", e))
            }
            None => {
                self.session = Session::Anonymous;
                let lines = load_local_cart(self.store.as_ref(), self.logger.as_ref());
                self.dispatch(CartAction::Load(lines));
                Ok(())
            }
        }
    }

    pub async fn handle_auth_event(&mut self, event: AuthEvent) -> Result<(), CartError> {
        match (self.session.clone(), event) {
            (Session::Anonymous, AuthEvent::SignedIn(account_id)) => self.sign_in(account_id).await,
            (Session::Authenticated(current), AuthEvent::SignedIn(account_id))
                if current == account_id =>
            {
                self.logger
                    .debug(&format!("Session refreshed for {}, reloading cart", account_id));
                self.refresh(&account_id)
                    .await
                    .map_err(|e| self.fail("cart.load_failed", e))
            }
            (Session::Authenticated(_), AuthEvent::SignedIn(account_id)) => {
                self.sign_out();
                self.sign_in(account_id).await
            }
            (Session::Authenticated(_), AuthEvent::SignedOut) => {
                self.sign_out();
                Ok(())
            }
            (Session::Anonymous, AuthEvent::SignedOut) => Ok(()),
        }
    }

    /// Handles every auth event already queued, without waiting for new ones.
    pub async fn pump(&mut self, events: &mut broadcast::Receiver<AuthEvent>) -> usize {
        let mut handled = 0;
        loop {
            match events.try_recv() {
                Ok(event) => {
                    if let Err(e) = self.handle_auth_event(event).await {
                        self.logger.debug(&format!("Auth event left cart degraded: {}", e));
                    }
                    handled += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    self.logger
                        .warn(&format!("Missed {} auth events", skipped));
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        handled
    }

    /// Follows the auth stream until it closes.
    pub async fn run(mut self, mut events: broadcast::Receiver<AuthEvent>) -> Self {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Err(e) = self.handle_auth_event(event).await {
                        self.logger.debug(&format!("Auth event left cart degraded: {}", e));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    self.logger
                        .warn(&format!("Missed {} auth events", skipped));
                }
                Err(RecvError::Closed) => break,
            }
        }
        self
    }

    pub async fn add(&mut self, props: CartLineProps) -> Result<(), CartError> {
        let line = CartLine::new(props).map_err(|e| self.fail("cart.add_failed", e.into()))?;

        match self.session.clone() {
            Session::Anonymous => {
                self.dispatch(CartAction::Add(line));
                self.persist_local();
                Ok(())
            }
            Session::Authenticated(account_id) => self
                .add_remote(&account_id, &line)
                .await
                .map_err(|e| self.fail("cart.add_failed", e)),
        }
    }

    pub async fn remove(&mut self, id: CartLineId) -> Result<(), CartError> {
        match self.session.clone() {
            Session::Anonymous => {
                self.dispatch(CartAction::Remove(id));
                self.persist_local();
                Ok(())
            }
            Session::Authenticated(account_id) => self
                .remove_remote(&account_id, &id)
                .await
                .map_err(|e| self.fail("cart.remove_failed", e)),
        }
    }

    /// A quantity of zero or less behaves exactly like `remove`.
    pub async fn update_quantity(&mut self, id: CartLineId, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(id).await;
        }

        match self.session.clone() {
            Session::Anonymous => {
                self.dispatch(CartAction::UpdateQuantity(id, quantity));
                self.persist_local();
                Ok(())
            }
            Session::Authenticated(account_id) => self
                .update_remote(&account_id, &id, quantity)
                .await
                .map_err(|e| self.fail("cart.update_failed", e)),
        }
    }

    pub async fn clear(&mut self) -> Result<(), CartError> {
        match self.session.clone() {
            Session::Anonymous => {
                self.dispatch(CartAction::Clear);
                self.persist_local();
                Ok(())
            }
            Session::Authenticated(account_id) => self
                .clear_remote(&account_id)
                .await
                .map_err(|e| self.fail("cart.clear_failed", e)),
        }
    }

    /// Places one order per cart line, then clears the cart.
    ///
    /// Stops at the first failing line. The partial report is kept, in memory
    /// and in the session store, as the pending checkout. A later checkout or
    /// `resume_checkout` lines it up with the current cart and never places
    /// an order twice.
    pub async fn checkout(&mut self, account_id: &AccountId) -> Result<CheckoutReport, CartError> {
        if self.session.account() != Some(account_id) {
            return Err(self.fail("cart.sign_in_required", CartError::NotAuthenticated));
        }
        if self.state.is_empty() {
            return Err(self.fail("cart.empty", CartError::Empty));
        }

        let report = match self.pending_checkout.take() {
            Some(pending) if &pending.account_id == account_id => {
                pending.rebase(self.state.items())
            }
            _ => CheckoutReport::new(account_id.clone(), self.state.items()),
        };
        self.run_checkout(report).await
    }

    /// Finishes the pending checkout against the cart as it is now.
    pub async fn resume_checkout(&mut self) -> Result<CheckoutReport, CartError> {
        let pending = self
            .pending_checkout
            .take()
            .ok_or(CartError::NoPendingCheckout)?;

        if self.session.account() != Some(&pending.account_id) {
            return Err(self.fail("cart.sign_in_required", CartError::NotAuthenticated));
        }

        let report = pending.rebase(self.state.items());
        if report.steps.is_empty() {
            self.keep_pending(None);
            return Err(self.fail("cart.empty", CartError::Empty));
        }
        self.run_checkout(report).await
    }

    pub async fn orders(&self) -> Result<Vec<Order>, CartError> {
        let account_id = self.session.account().ok_or(CartError::NotAuthenticated)?;
        self.order_gateway
            .get_by_account(account_id)
            .await
            .map_err(|e| self.fail("orders.load_failed", e.into()))
    }

    async fn sign_in(&mut self, account_id: AccountId) -> Result<(), CartError> {
        self.logger.info(&format!("Signed in as {}", account_id));
        self.session = Session::Authenticated(account_id.clone());
        self.pending_checkout =
            load_pending_checkout(self.store.as_ref(), &account_id, self.logger.as_ref());

        let local_lines = load_local_cart(self.store.as_ref(), self.logger.as_ref());
        let mut migration_error = None;

        match self.policy {
            SignInPolicy::MergeLocal if !local_lines.is_empty() => {
                if let Err((migrated, e)) = self.migrate_local_lines(&account_id, &local_lines).await
                {
                    if let Err(store_err) =
                        save_local_cart(self.store.as_ref(), &local_lines[migrated..])
                    {
                        self.logger
                            .warn(&format!("Unmigrated lines could not be kept: {}", store_err));
                    }
                    migration_error = Some(self.fail("cart.merge_failed", e));
                }
            }
            _ if !local_lines.is_empty() => {
                self.logger.info(&format!(
                    "Discarding {} anonymous cart lines",
                    local_lines.len()
                ));
            }
            _ => {}
        }

        if migration_error.is_none() {
            if let Err(e) = remove_local_cart(self.store.as_ref()) {
                self.logger.warn(&format!("Local cart could not be removed: {}", e));
            }
        }

        if let Err(e) = self.refresh(&account_id).await {
            self.state = CartState::empty();
            return Err(self.fail("cart.load_failed", e));
        }

        match migration_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Remote state is left alone; the local blob is only written again on the
    /// next anonymous mutation. A stored pending checkout waits for its
    /// account to sign in again.
    fn sign_out(&mut self) {
        self.logger.info("Signed out, cart reset");
        self.session = Session::Anonymous;
        self.state = CartState::empty();
        self.pending_checkout = None;
    }

    /// On failure returns how many lines made it before the error.
    async fn migrate_local_lines(
        &self,
        account_id: &AccountId,
        lines: &[CartLine],
    ) -> Result<(), (usize, CartError)> {
        for (index, line) in lines.iter().enumerate() {
            self.cart_gateway
                .add(account_id, line)
                .await
                .map_err(|e| (index, CartError::from(e)))?;
        }
        self.logger.info(&format!(
            "Merged {} anonymous cart lines into {}",
            lines.len(),
            account_id
        ));
        Ok(())
    }

    async fn run_checkout(&mut self, report: CheckoutReport) -> Result<CheckoutReport, CartError> {
        let saga = CheckoutSaga {
            orders: self.order_gateway.clone(),
            logger: self.logger.clone(),
        };
        let mut report = saga.execute(report).await;

        if !report.is_complete() {
            self.keep_pending(Some(report));
            return Err(self.fail("cart.checkout_failed", CartError::CheckoutIncomplete));
        }

        let account_id = report.account_id.clone();
        match self.clear_remote(&account_id).await {
            Ok(()) => {
                report.cart_cleared = true;
                self.keep_pending(None);
                self.logger.info(&format!(
                    "Checkout placed {} orders for {}",
                    report.steps.len(),
                    account_id
                ));
                self.notifier.success("cart.checkout_succeeded");
                Ok(report)
            }
            Err(e) => {
                self.keep_pending(Some(report));
                Err(self.fail("cart.checkout_failed", e))
            }
        }
    }

    async fn add_remote(&mut self, account_id: &AccountId, line: &CartLine) -> Result<(), CartError> {
        self.cart_gateway.add(account_id, line).await?;
        self.refresh(account_id).await
    }

    async fn remove_remote(&mut self, account_id: &AccountId, id: &CartLineId) -> Result<(), CartError> {
        self.cart_gateway.delete(account_id, id).await?;
        self.refresh(account_id).await
    }

    async fn update_remote(
        &mut self,
        account_id: &AccountId,
        id: &CartLineId,
        quantity: i32,
    ) -> Result<(), CartError> {
        self.cart_gateway
            .update_quantity(account_id, id, quantity)
            .await?;
        self.refresh(account_id).await
    }

    async fn clear_remote(&mut self, account_id: &AccountId) -> Result<(), CartError> {
        self.cart_gateway.delete_all_for_account(account_id).await?;
        self.refresh(account_id).await
    }

    async fn refresh(&mut self, account_id: &AccountId) -> Result<(), CartError> {
        let lines = self.cart_gateway.get_by_account(account_id).await?;
        self.dispatch(CartAction::Load(lines));
        Ok(())
    }

    fn dispatch(&mut self, action: CartAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }

    fn persist_local(&self) {
        if let Err(e) = save_local_cart(self.store.as_ref(), self.state.items()) {
            self.logger.warn(&format!("Local cart could not be saved: {}", e));
        }
    }

    fn keep_pending(&mut self, report: Option<CheckoutReport>) {
        let stored = match &report {
            Some(report) => save_pending_checkout(self.store.as_ref(), report),
            None => remove_pending_checkout(self.store.as_ref()),
        };
        if let Err(e) = stored {
            self.logger
                .warn(&format!("Pending checkout could not be stored: {}", e));
        }
        self.pending_checkout = report;
    }

    fn fail(&self, message: &str, error: CartError) -> CartError {
        self.logger.error(&format!("{}: {}", message, error));
        self.notifier.error(message);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::checkout::LineOutcome;
    use crate::domain::cart::store::{LOCAL_CART_KEY, PENDING_CHECKOUT_KEY};
    use crate::domain::errors::{GatewayError, StorageError};
    use crate::domain::order::model::NewOrderProps;
    use async_trait::async_trait;
    use mockall::mock;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use uuid::Uuid;

    mock! {
        pub CartGw {}

        #[async_trait]
        impl CartGateway for CartGw {
            async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<CartLine>, GatewayError>;
            async fn add(&self, account_id: &AccountId, line: &CartLine) -> Result<CartLine, GatewayError>;
            async fn update_quantity(&self, account_id: &AccountId, id: &CartLineId, quantity: i32) -> Result<Option<CartLine>, GatewayError>;
            async fn delete(&self, account_id: &AccountId, id: &CartLineId) -> Result<(), GatewayError>;
            async fn delete_all_for_account(&self, account_id: &AccountId) -> Result<(), GatewayError>;
        }
    }

    mock! {
        pub OrderGw {}

        #[async_trait]
        impl OrderGateway for OrderGw {
            async fn create_order(&self, account_id: &AccountId, line: &CartLine) -> Result<Order, GatewayError>;
            async fn get_by_account(&self, account_id: &AccountId) -> Result<Vec<Order>, GatewayError>;
        }
    }

    mock! {
        pub Notify {}

        impl Notifier for Notify {
            fn success(&self, message: &str);
            fn error(&self, message: &str);
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MemoryStore {
        fn raw(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn lines(&self) -> Vec<CartLine> {
            self.raw(LOCAL_CART_KEY)
                .map(|raw| serde_json::from_str(&raw).unwrap())
                .unwrap_or_default()
        }
    }

    impl SessionStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.raw(key))
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn quiet_notifier() -> MockNotify {
        let mut notifier = MockNotify::new();
        notifier.expect_success().returning(|_| ());
        notifier.expect_error().returning(|_| ());
        notifier
    }

    fn account() -> AccountId {
        AccountId::new("8a6e0804-2bd0-4672-b79d-d97027f9071a")
    }

    fn props(name: &str, quantity: i32, unit_price: i64) -> CartLineProps {
        CartLineProps {
            house_id: Uuid::new_v4(),
            house_name: name.to_string(),
            color_id: None,
            color_name: "Default".to_string(),
            size_id: None,
            size_name: "Standard".to_string(),
            quantity,
            unit_price,
            image_url: None,
        }
    }

    fn line(name: &str, quantity: i32, unit_price: i64) -> CartLine {
        CartLine::new(props(name, quantity, unit_price)).unwrap()
    }

    fn order_for(account_id: &AccountId, line: &CartLine) -> Order {
        Order::new(NewOrderProps {
            account_id: account_id.clone(),
            house_id: line.house_id,
            color_id: line.color_id,
            size_id: line.size_id,
            quantity: line.quantity,
            total_price: line.total_price,
        })
        .unwrap()
    }

    /// Successive `get_by_account` answers, the last one repeating.
    fn remote_snapshots(
        snapshots: Vec<Vec<CartLine>>,
    ) -> impl FnMut(&AccountId) -> Result<Vec<CartLine>, GatewayError> + Send + 'static {
        let mut queue = VecDeque::from(snapshots);
        move |_| {
            if queue.len() > 1 {
                Ok(queue.pop_front().unwrap_or_default())
            } else {
                Ok(queue.front().cloned().unwrap_or_default())
            }
        }
    }

    fn controller(
        cart_gateway: MockCartGw,
        order_gateway: MockOrderGw,
        store: Arc<MemoryStore>,
        notifier: MockNotify,
        policy: SignInPolicy,
    ) -> CartController {
        CartController::new(
            CartControllerDeps {
                cart_gateway: Arc::new(cart_gateway),
                order_gateway: Arc::new(order_gateway),
                store,
                notifier: Arc::new(notifier),
                logger: mock_logger(),
            },
            policy,
        )
    }

    #[tokio::test]
    async fn should_keep_anonymous_lines_in_local_store() {
        let store = Arc::new(MemoryStore::default());
        let mut cart = controller(
            MockCartGw::new(),
            MockOrderGw::new(),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(None).await.unwrap();

        cart.add(props("Studio", 2, 45000)).await.unwrap();

        assert_eq!(cart.state().total_items(), 2);
        assert_eq!(cart.state().total_price(), 90000);
        assert_eq!(store.lines(), cart.state().items().to_vec());
    }

    #[tokio::test]
    async fn should_not_merge_identical_anonymous_lines() {
        let store = Arc::new(MemoryStore::default());
        let mut cart = controller(
            MockCartGw::new(),
            MockOrderGw::new(),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        let studio = props("Studio", 1, 45000);

        cart.add(studio.clone()).await.unwrap();
        cart.add(studio).await.unwrap();

        assert_eq!(cart.state().items().len(), 2);
        assert_eq!(cart.state().total_items(), 2);
    }

    #[tokio::test]
    async fn should_restore_anonymous_cart_on_initialize() {
        let store = Arc::new(MemoryStore::default());
        let lines = vec![line("A", 1, 100), line("B", 3, 50)];
        save_local_cart(store.as_ref(), &lines).unwrap();
        let mut cart = controller(
            MockCartGw::new(),
            MockOrderGw::new(),
            store,
            quiet_notifier(),
            SignInPolicy::default(),
        );

        cart.initialize(None).await.unwrap();

        assert_eq!(cart.state().items(), lines.as_slice());
        assert_eq!(cart.state().total_price(), 250);
    }

    #[tokio::test]
    async fn should_start_empty_when_local_blob_is_malformed() {
        let store = Arc::new(MemoryStore::default());
        store.set(LOCAL_CART_KEY, "{not json").unwrap();
        let mut cart = controller(
            MockCartGw::new(),
            MockOrderGw::new(),
            store,
            quiet_notifier(),
            SignInPolicy::default(),
        );

        cart.initialize(None).await.unwrap();

        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn should_treat_zero_quantity_update_as_remove() {
        let store = Arc::new(MemoryStore::default());
        let mut cart = controller(
            MockCartGw::new(),
            MockOrderGw::new(),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.add(props("A", 1, 100)).await.unwrap();
        cart.add(props("B", 2, 100)).await.unwrap();
        let first = cart.state().items()[0].id;

        cart.update_quantity(first, 0).await.unwrap();

        assert_eq!(cart.state().items().len(), 1);
        assert_eq!(cart.state().items()[0].house_name, "B");
        assert_eq!(store.lines().len(), 1);
    }

    #[tokio::test]
    async fn should_discard_local_cart_and_load_remote_on_sign_in() {
        let store = Arc::new(MemoryStore::default());
        save_local_cart(store.as_ref(), &[line("Local", 1, 100)]).unwrap();
        let remote = vec![line("Remote", 2, 45000)];
        let mut gateway = MockCartGw::new();
        gateway.expect_add().never();
        gateway
            .expect_get_by_account()
            .times(1)
            .returning(remote_snapshots(vec![remote.clone()]));
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::DiscardLocal,
        );
        cart.initialize(None).await.unwrap();

        cart.handle_auth_event(AuthEvent::SignedIn(account()))
            .await
            .unwrap();

        assert_eq!(cart.session(), &Session::Authenticated(account()));
        assert_eq!(cart.state().items(), remote.as_slice());
        assert_eq!(store.raw(LOCAL_CART_KEY), None);
    }

    #[tokio::test]
    async fn should_merge_local_lines_into_remote_when_opted_in() {
        let store = Arc::new(MemoryStore::default());
        save_local_cart(store.as_ref(), &[line("A", 1, 100), line("B", 1, 200)]).unwrap();
        let added = Arc::new(Mutex::new(Vec::new()));
        let recorded = added.clone();
        let merged = vec![line("A", 1, 100), line("B", 1, 200)];
        let mut gateway = MockCartGw::new();
        gateway.expect_add().times(2).returning(move |_, line| {
            recorded.lock().unwrap().push(line.house_name.clone());
            Ok(line.clone())
        });
        gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![merged.clone()]));
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::MergeLocal,
        );

        cart.handle_auth_event(AuthEvent::SignedIn(account()))
            .await
            .unwrap();

        assert_eq!(*added.lock().unwrap(), vec!["A", "B"]);
        assert_eq!(cart.state().items(), merged.as_slice());
        assert_eq!(store.raw(LOCAL_CART_KEY), None);
    }

    #[tokio::test]
    async fn should_keep_unmigrated_lines_locally_when_merge_fails() {
        let store = Arc::new(MemoryStore::default());
        save_local_cart(store.as_ref(), &[line("A", 1, 100), line("B", 1, 200)]).unwrap();
        let mut gateway = MockCartGw::new();
        gateway.expect_add().times(2).returning(|_, line| {
            if line.house_name == "B" {
                Err(GatewayError::Unavailable)
            } else {
                Ok(line.clone())
            }
        });
        gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![vec![line("A", 1, 100)]]));
        let mut notifier = MockNotify::new();
        notifier
            .expect_error()
            .withf(|message| message == "cart.merge_failed")
            .times(1)
            .returning(|_| ());
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            store.clone(),
            notifier,
            SignInPolicy::MergeLocal,
        );

        let result = cart.handle_auth_event(AuthEvent::SignedIn(account())).await;

        assert!(matches!(result, Err(CartError::Gateway(GatewayError::Unavailable))));
        assert_eq!(cart.state().items().len(), 1);
        let kept = store.lines();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].house_name, "B");
    }

    #[tokio::test]
    async fn should_reset_to_empty_on_sign_out_without_remote_calls() {
        let store = Arc::new(MemoryStore::default());
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .times(1)
            .returning(remote_snapshots(vec![vec![line("Remote", 1, 100)]]));
        gateway.expect_delete_all_for_account().never();
        gateway.expect_delete().never();
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();

        cart.handle_auth_event(AuthEvent::SignedOut).await.unwrap();

        assert_eq!(cart.session(), &Session::Anonymous);
        assert!(cart.state().is_empty());
        assert_eq!(store.raw(LOCAL_CART_KEY), None);
    }

    #[tokio::test]
    async fn should_write_remote_then_reload_when_authenticated() {
        let existing = line("Studio", 2, 45000);
        let merged = existing.with_quantity(3);
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .times(2)
            .returning(remote_snapshots(vec![vec![existing.clone()], vec![merged.clone()]]));
        let merged_response = merged.clone();
        gateway
            .expect_add()
            .times(1)
            .returning(move |_, _| Ok(merged_response.clone()));
        let store = Arc::new(MemoryStore::default());
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();

        let mut more = existing.props();
        more.quantity = 1;
        cart.add(more).await.unwrap();

        assert_eq!(cart.state().items().len(), 1);
        assert_eq!(cart.state().total_items(), 3);
        assert_eq!(cart.state().total_price(), 135000);
        assert_eq!(store.raw(LOCAL_CART_KEY), None);
    }

    #[tokio::test]
    async fn should_leave_state_unchanged_and_notify_when_remote_add_fails() {
        let existing = vec![line("Studio", 1, 45000)];
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .times(1)
            .returning(remote_snapshots(vec![existing.clone()]));
        gateway
            .expect_add()
            .times(1)
            .returning(|_, _| Err(GatewayError::Unavailable));
        let mut notifier = MockNotify::new();
        notifier
            .expect_error()
            .withf(|message| message == "cart.add_failed")
            .times(1)
            .returning(|_| ());
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            Arc::new(MemoryStore::default()),
            notifier,
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();
        let before = cart.state().clone();

        let result = cart.add(props("Loft", 1, 60000)).await;

        assert!(result.is_err());
        assert_eq!(cart.state(), &before);
    }

    #[tokio::test]
    async fn should_delete_remote_line_when_quantity_set_to_zero() {
        let existing = line("Studio", 1, 45000);
        let id = existing.id;
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![vec![existing], vec![]]));
        gateway.expect_update_quantity().never();
        gateway
            .expect_delete()
            .withf(move |_, line_id| line_id == &id)
            .times(1)
            .returning(|_, _| Ok(()));
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();
        let target = cart.state().items()[0].id;

        cart.update_quantity(target, 0).await.unwrap();

        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn should_reject_invalid_line_before_any_remote_call() {
        let mut gateway = MockCartGw::new();
        gateway.expect_add().never();
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );

        let result = cart.add(props("Studio", 0, 45000)).await;

        assert!(matches!(result, Err(CartError::Line(_))));
        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn should_refuse_checkout_when_anonymous() {
        let mut orders = MockOrderGw::new();
        orders.expect_create_order().never();
        let mut cart = controller(
            MockCartGw::new(),
            orders,
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.add(props("Studio", 1, 45000)).await.unwrap();

        let result = cart.checkout(&account()).await;

        assert!(matches!(result, Err(CartError::NotAuthenticated)));
        assert_eq!(cart.state().items().len(), 1);
    }

    #[tokio::test]
    async fn should_refuse_checkout_of_empty_cart() {
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![vec![]]));
        let mut orders = MockOrderGw::new();
        orders.expect_create_order().never();
        let mut cart = controller(
            gateway,
            orders,
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();

        let result = cart.checkout(&account()).await;

        assert!(matches!(result, Err(CartError::Empty)));
    }

    #[tokio::test]
    async fn should_order_every_line_then_clear_cart() {
        let lines = vec![line("A", 1, 100), line("B", 2, 300)];
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .times(2)
            .returning(remote_snapshots(vec![lines.clone(), vec![]]));
        gateway
            .expect_delete_all_for_account()
            .times(1)
            .returning(|_| Ok(()));
        let mut orders = MockOrderGw::new();
        orders
            .expect_create_order()
            .times(2)
            .returning(|account_id, line| Ok(order_for(account_id, line)));
        let mut notifier = MockNotify::new();
        notifier
            .expect_success()
            .withf(|message| message == "cart.checkout_succeeded")
            .times(1)
            .returning(|_| ());
        let mut cart = controller(
            gateway,
            orders,
            Arc::new(MemoryStore::default()),
            notifier,
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();

        let report = cart.checkout(&account()).await.unwrap();

        assert!(report.is_complete());
        assert!(report.cart_cleared);
        assert_eq!(report.ordered().len(), 2);
        assert!(cart.state().is_empty());
        assert!(cart.pending_checkout().is_none());
    }

    #[tokio::test]
    async fn should_keep_cart_and_resume_after_partial_checkout() {
        let lines = vec![line("A", 1, 100), line("B", 2, 300)];
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![lines.clone(), vec![]]));
        gateway
            .expect_delete_all_for_account()
            .times(1)
            .returning(|_| Ok(()));

        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let mut orders = MockOrderGw::new();
        orders
            .expect_create_order()
            .times(3)
            .returning(move |account_id, line| {
                let mut calls = recorded.lock().unwrap();
                calls.push(line.house_name.clone());
                if calls.len() == 2 {
                    Err(GatewayError::Unavailable)
                } else {
                    Ok(order_for(account_id, line))
                }
            });

        let mut cart = controller(
            gateway,
            orders,
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();

        let first = cart.checkout(&account()).await;

        assert!(matches!(first, Err(CartError::CheckoutIncomplete)));
        assert_eq!(cart.state().items().len(), 2);
        let pending = cart.pending_checkout().unwrap();
        assert!(matches!(pending.steps[0].outcome, LineOutcome::Ordered { .. }));
        assert!(matches!(pending.steps[1].outcome, LineOutcome::Failed { .. }));
        assert!(!pending.cart_cleared);

        let report = cart.resume_checkout().await.unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["A", "B", "B"]);
        assert!(report.is_complete());
        assert!(report.cart_cleared);
        assert!(cart.state().is_empty());
    }

    /// Orders every line except the first attempt at `failing`.
    fn orders_failing_once(failing: &'static str, calls: Arc<Mutex<Vec<String>>>) -> MockOrderGw {
        let mut orders = MockOrderGw::new();
        let mut failed = false;
        orders.expect_create_order().returning(move |account_id, line| {
            calls.lock().unwrap().push(line.house_name.clone());
            if line.house_name == failing && !failed {
                failed = true;
                Err(GatewayError::Unavailable)
            } else {
                Ok(order_for(account_id, line))
            }
        });
        orders
    }

    #[tokio::test]
    async fn should_order_lines_added_after_failed_checkout_before_clearing() {
        let a = line("A", 1, 100);
        let b = line("B", 2, 300);
        let c = line("C", 1, 500);
        let mut gateway = MockCartGw::new();
        gateway.expect_get_by_account().returning(remote_snapshots(vec![
            vec![a.clone(), b.clone()],
            vec![a.clone(), b.clone(), c.clone()],
            vec![],
        ]));
        let added = c.clone();
        gateway
            .expect_add()
            .times(1)
            .returning(move |_, _| Ok(added.clone()));
        gateway
            .expect_delete_all_for_account()
            .times(1)
            .returning(|_| Ok(()));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut cart = controller(
            gateway,
            orders_failing_once("B", calls.clone()),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();
        assert!(cart.checkout(&account()).await.is_err());

        cart.add(c.props()).await.unwrap();
        let report = cart.resume_checkout().await.unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["A", "B", "B", "C"]);
        assert_eq!(report.steps.len(), 3);
        assert!(report.is_complete());
        assert!(report.cart_cleared);
    }

    #[tokio::test]
    async fn should_not_clear_cart_while_line_added_after_failure_is_unordered() {
        let a = line("A", 1, 100);
        let b = line("B", 2, 300);
        let c = line("C", 1, 500);
        let mut gateway = MockCartGw::new();
        gateway.expect_get_by_account().returning(remote_snapshots(vec![
            vec![a.clone(), b.clone()],
            vec![a.clone(), b.clone(), c.clone()],
        ]));
        let added = c.clone();
        gateway.expect_add().returning(move |_, _| Ok(added.clone()));
        gateway.expect_delete_all_for_account().never();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let mut orders = MockOrderGw::new();
        orders.expect_create_order().returning(move |account_id, line| {
            recorded.lock().unwrap().push(line.house_name.clone());
            if line.house_name == "A" {
                Ok(order_for(account_id, line))
            } else {
                Err(GatewayError::Unavailable)
            }
        });
        let mut cart = controller(
            gateway,
            orders,
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();
        assert!(cart.checkout(&account()).await.is_err());

        cart.add(c.props()).await.unwrap();
        let result = cart.resume_checkout().await;

        assert!(matches!(result, Err(CartError::CheckoutIncomplete)));
        assert_eq!(*calls.lock().unwrap(), vec!["A", "B", "B"]);
        assert_eq!(cart.state().items().len(), 3);
        let pending = cart.pending_checkout().unwrap();
        assert_eq!(pending.steps.len(), 3);
        assert_eq!(pending.pending()[0].line.house_name, "C");
    }

    #[tokio::test]
    async fn should_not_reorder_lines_when_checkout_restarted() {
        let lines = vec![line("A", 1, 100), line("B", 2, 300)];
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![lines.clone(), vec![]]));
        gateway
            .expect_delete_all_for_account()
            .times(1)
            .returning(|_| Ok(()));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut cart = controller(
            gateway,
            orders_failing_once("B", calls.clone()),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        cart.initialize(Some(account())).await.unwrap();
        assert!(cart.checkout(&account()).await.is_err());

        let report = cart.checkout(&account()).await.unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["A", "B", "B"]);
        assert!(report.is_complete());
    }

    #[tokio::test]
    async fn should_resume_checkout_stored_by_earlier_session() {
        let lines = vec![line("A", 1, 100), line("B", 2, 300)];
        let store = Arc::new(MemoryStore::default());
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut first_gateway = MockCartGw::new();
        first_gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![lines.clone()]));
        let mut first = controller(
            first_gateway,
            orders_failing_once("B", calls.clone()),
            store.clone(),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        first.initialize(Some(account())).await.unwrap();
        assert!(first.checkout(&account()).await.is_err());
        assert!(store.raw(PENDING_CHECKOUT_KEY).is_some());
        drop(first);

        let mut second_gateway = MockCartGw::new();
        second_gateway
            .expect_get_by_account()
            .returning(remote_snapshots(vec![lines.clone(), vec![]]));
        second_gateway
            .expect_delete_all_for_account()
            .times(1)
            .returning(|_| Ok(()));
        let mut orders = MockOrderGw::new();
        let recorded = calls.clone();
        orders.expect_create_order().times(1).returning(move |account_id, line| {
            recorded.lock().unwrap().push(line.house_name.clone());
            Ok(order_for(account_id, line))
        });
        let mut second = controller(
            second_gateway,
            orders,
            store.clone(),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        second.initialize(Some(account())).await.unwrap();

        let report = second.resume_checkout().await.unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["A", "B", "B"]);
        assert!(report.cart_cleared);
        assert_eq!(store.raw(PENDING_CHECKOUT_KEY), None);
    }

    #[tokio::test]
    async fn should_fail_resume_without_pending_checkout() {
        let mut cart = controller(
            MockCartGw::new(),
            MockOrderGw::new(),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );

        let result = cart.resume_checkout().await;

        assert!(matches!(result, Err(CartError::NoPendingCheckout)));
    }

    #[tokio::test]
    async fn should_follow_auth_events_queued_on_channel() {
        let remote = vec![line("Remote", 1, 100)];
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .times(1)
            .returning(remote_snapshots(vec![remote.clone()]));
        let mut cart = controller(
            gateway,
            MockOrderGw::new(),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        let (sender, mut receiver) = broadcast::channel(8);
        sender.send(AuthEvent::SignedIn(account())).unwrap();

        let handled = cart.pump(&mut receiver).await;

        assert_eq!(handled, 1);
        assert_eq!(cart.state().items(), remote.as_slice());

        sender.send(AuthEvent::SignedOut).unwrap();
        drop(sender);
        let cart = cart.run(receiver).await;

        assert_eq!(cart.session(), &Session::Anonymous);
        assert!(cart.state().is_empty());
    }

    #[tokio::test]
    async fn should_return_controller_after_applying_events_once_channel_closes() {
        let remote = vec![line("Remote", 2, 45000)];
        let mut gateway = MockCartGw::new();
        gateway
            .expect_get_by_account()
            .times(1)
            .returning(remote_snapshots(vec![remote.clone()]));
        let cart = controller(
            gateway,
            MockOrderGw::new(),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );
        let (sender, receiver) = broadcast::channel(8);
        sender.send(AuthEvent::SignedOut).unwrap();
        sender.send(AuthEvent::SignedIn(account())).unwrap();
        drop(sender);

        let cart = tokio::time::timeout(std::time::Duration::from_secs(5), cart.run(receiver))
            .await
            .unwrap();

        assert_eq!(cart.session(), &Session::Authenticated(account()));
        assert_eq!(cart.state().items(), remote.as_slice());
        assert_eq!(cart.state().total_price(), 90000);
    }

    #[tokio::test]
    async fn should_require_session_to_list_orders() {
        let cart = controller(
            MockCartGw::new(),
            MockOrderGw::new(),
            Arc::new(MemoryStore::default()),
            quiet_notifier(),
            SignInPolicy::default(),
        );

        let result = cart.orders().await;

        assert!(matches!(result, Err(CartError::NotAuthenticated)));
    }
}
