//! Per-request relationship resolution cache.
//!
//! Every relationship resolver invoked within one GraphQL request goes
//! through this cache, so sibling fields resolving the same identifier issue
//! a single lookup. A fresh cache is attached to each request; nothing is
//! shared across requests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{AppService, Customer, DomainError, Id, User};

/// Id → resolved-entity memoisation for one GraphQL request.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    users: Mutex<HashMap<Id, User>>,
    customers: Mutex<HashMap<Id, Customer>>,
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::internal("resolution cache lock poisoned")
}

impl ResolutionCache {
    /// Resolve a user by identifier, consulting the cache first.
    pub async fn user(&self, service: &AppService, id: &Id) -> Result<User, DomainError> {
        let cached = self.users.lock().map_err(poisoned)?.get(id).cloned();
        if let Some(user) = cached {
            return Ok(user);
        }

        let user = service.user_by_id(id).await?;
        self.users
            .lock()
            .map_err(poisoned)?
            .insert(*id, user.clone());
        Ok(user)
    }

    /// Resolve a customer by identifier, consulting the cache first.
    pub async fn customer(
        &self,
        service: &AppService,
        id: &Id,
    ) -> Result<Customer, DomainError> {
        let cached = self.customers.lock().map_err(poisoned)?.get(id).cloned();
        if let Some(customer) = cached {
            return Ok(customer);
        }

        let customer = service.customer_by_id(id).await?;
        self.customers
            .lock()
            .map_err(poisoned)?
            .insert(*id, customer.clone());
        Ok(customer)
    }
}
