/// Lazily acquired capability
/// Unacquired → Valid(value) on first use; callers that see a 401 move it back to Unacquired.
/// The lock is held across acquisition so concurrent misses wait for one acquire call.

use std::future::Future;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    Unacquired,
    Valid(T),
}

#[derive(Debug)]
pub struct CapabilityCell<T> {
    state: Mutex<Capability<T>>,
}

impl<T: Clone> Default for CapabilityCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> CapabilityCell<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(Capability::Unacquired),
        }
    }

    /// Pre-acquired, e.g. a statically configured bucket id
    pub fn valid(value: T) -> Self {
        Self {
            state: Mutex::new(Capability::Valid(value)),
        }
    }

    pub async fn get_or_acquire<F, Fut, E>(&self, acquire: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut state = self.state.lock().await;
        if let Capability::Valid(value) = &*state {
            return Ok(value.clone());
        }
        // failure leaves the cell Unacquired
        let value = acquire().await?;
        *state = Capability::Valid(value.clone());
        Ok(value)
    }

    pub async fn invalidate(&self) {
        *self.state.lock().await = Capability::Unacquired;
    }

    pub async fn snapshot(&self) -> Capability<T> {
        self.state.lock().await.clone()
    }
}
