use pinpoints::prelude::Store;
use rand::rngs::StdRng;
use tokio::sync::{Mutex, RwLock};

/// Transitions take the write lock on `store` before `rng`, so bookings are applied one at a time.
pub struct AppState {
    pub store: RwLock<Store>,
    pub rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(store: Store, rng: StdRng) -> Self {
        Self {
            store: RwLock::new(store),
            rng: Mutex::new(rng),
        }
    }
}
