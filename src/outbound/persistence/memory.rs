//! In-memory store implementing every repository port.
//!
//! Fixture adapter for schema-level tests and local development without a
//! running MongoDB. Semantics mirror the real adapter: insertion order is
//! preserved, duplicate emails are rejected, project inserts existence-probe
//! their references, and empty ID sets short-circuit.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::domain::ports::{
    CustomerRepository, ProjectRepository, StoreError, UserRepository,
};
use crate::domain::{Customer, Id, Project, User};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    projects: Vec<Project>,
    customers: Vec<Customer>,
}

/// In-memory fixture store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

fn paginate<T: Clone>(items: &[T], start: u64, limit: i64) -> Vec<T> {
    let skip = usize::try_from(start).unwrap_or(usize::MAX);
    let take = if limit > 0 {
        usize::try_from(limit).unwrap_or(usize::MAX)
    } else {
        usize::MAX
    };
    items.iter().skip(skip).take(take).cloned().collect()
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::query("memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> Result<Id, StoreError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|known| known.email == user.email) {
            return Err(StoreError::already_exists(user.email.clone()));
        }

        let id = Id::from_object_id(ObjectId::new());
        let mut stored = user.clone();
        stored.id = Some(id);
        inner.users.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .users
            .iter()
            .find(|user| user.id.as_ref() == Some(id))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|user| user.email == email).cloned())
    }

    async fn delete_by_email(&self, email: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.users.len();
        inner.users.retain(|user| user.email != email);
        if inner.users.len() == before {
            return Err(StoreError::not_found("user", email));
        }
        Ok(())
    }

    async fn list(&self, start: u64, limit: i64) -> Result<Vec<User>, StoreError> {
        let inner = self.lock()?;
        Ok(paginate(&inner.users, start, limit))
    }

    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<User>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let inner = self.lock()?;
        Ok(inner
            .users
            .iter()
            .filter(|user| user.id.map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn insert(&self, project: &Project) -> Result<Id, StoreError> {
        let mut inner = self.lock()?;
        if !inner
            .users
            .iter()
            .any(|user| user.id == Some(project.owner_id))
        {
            return Err(StoreError::invalid_reference(
                "owner",
                project.owner_id.to_string(),
            ));
        }
        if !inner
            .customers
            .iter()
            .any(|customer| customer.id == Some(project.customer_id))
        {
            return Err(StoreError::invalid_reference(
                "customer",
                project.customer_id.to_string(),
            ));
        }

        let id = Id::from_object_id(ObjectId::new());
        let mut stored = project.clone();
        stored.id = Some(id);
        inner.projects.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<Project>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .projects
            .iter()
            .find(|project| project.id.as_ref() == Some(id))
            .cloned())
    }

    async fn list(&self, start: u64, limit: i64) -> Result<Vec<Project>, StoreError> {
        let inner = self.lock()?;
        Ok(paginate(&inner.projects, start, limit))
    }

    async fn find_by_owner(&self, owner_id: &Id) -> Result<Vec<Project>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .projects
            .iter()
            .filter(|project| project.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_customer(&self, customer_id: &Id) -> Result<Vec<Project>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .projects
            .iter()
            .filter(|project| project.customer_id == *customer_id)
            .cloned()
            .collect())
    }

    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<Project>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let inner = self.lock()?;
        Ok(inner
            .projects
            .iter()
            .filter(|project| project.id.map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn replace(&self, project: &Project) -> Result<(), StoreError> {
        let Some(id) = project.id else {
            return Err(StoreError::query(
                "cannot replace a project without an identifier",
            ));
        };

        let mut inner = self.lock()?;
        match inner.projects.iter_mut().find(|known| known.id == Some(id)) {
            Some(slot) => {
                *slot = project.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("project", id.to_string())),
        }
    }

    async fn delete(&self, id: &Id) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.projects.len();
        inner.projects.retain(|project| project.id.as_ref() != Some(id));
        if inner.projects.len() == before {
            return Err(StoreError::not_found("project", id.to_string()));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[Id]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut inner = self.lock()?;
        let before = inner.projects.len();
        inner
            .projects
            .retain(|project| !project.id.map(|id| ids.contains(&id)).unwrap_or(false));
        Ok((before - inner.projects.len()) as u64)
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn insert(&self, customer: &Customer) -> Result<Id, StoreError> {
        let mut inner = self.lock()?;
        let id = Id::from_object_id(ObjectId::new());
        let mut stored = customer.clone();
        stored.id = Some(id);
        inner.customers.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: &Id) -> Result<Option<Customer>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .customers
            .iter()
            .find(|customer| customer.id.as_ref() == Some(id))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.customers.clone())
    }

    async fn find_where_id_in(&self, ids: &[Id]) -> Result<Vec<Customer>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let inner = self.lock()?;
        Ok(inner
            .customers
            .iter()
            .filter(|customer| customer.id.map(|id| ids.contains(&id)).unwrap_or(false))
            .cloned()
            .collect())
    }

    async fn replace(&self, customer: &Customer) -> Result<(), StoreError> {
        let Some(id) = customer.id else {
            return Err(StoreError::query(
                "cannot replace a customer without an identifier",
            ));
        };

        let mut inner = self.lock()?;
        match inner
            .customers
            .iter_mut()
            .find(|known| known.id == Some(id))
        {
            Some(slot) => {
                *slot = customer.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("customer", id.to_string())),
        }
    }

    async fn delete(&self, id: &Id) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.customers.len();
        inner
            .customers
            .retain(|customer| customer.id.as_ref() != Some(id));
        if inner.customers.len() == before {
            return Err(StoreError::not_found("customer", id.to_string()));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[Id]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut inner = self.lock()?;
        let before = inner.customers.len();
        inner
            .customers
            .retain(|customer| !customer.id.map(|id| ids.contains(&id)).unwrap_or(false));
        Ok((before - inner.customers.len()) as u64)
    }
}
