//! Application service sitting between inbound adapters and the ports.
//!
//! Centralises input validation (empty required fields, negative pagination
//! cursors) and identifier construction from externally supplied strings, so
//! inbound adapters never talk to the persistence layer directly.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::domain::ports::{CustomerRepository, ProjectRepository, StoreError, UserRepository};
use crate::domain::{Customer, DomainError, Id, Project, User};

/// Input for user registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub email: String,
}

/// Input for project creation.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Id,
    pub customer_id: Id,
}

/// Input for customer creation.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub cuit: String,
}

/// Application service over the three repository ports.
#[derive(Clone)]
pub struct AppService {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
    customers: Arc<dyn CustomerRepository>,
}

fn map_store_error(error: StoreError) -> DomainError {
    match error {
        StoreError::Connection { message } => DomainError::store_unavailable(message),
        StoreError::Query { message } => DomainError::internal(message),
        StoreError::InvalidId { value } => {
            DomainError::invalid_identifier(format!("invalid identifier: {value}"))
        }
        err @ StoreError::NotFound { .. } => DomainError::not_found(err.to_string()),
        err @ StoreError::AlreadyExists { .. } => DomainError::already_exists(err.to_string()),
        err @ StoreError::InvalidReference { .. } => {
            DomainError::invalid_reference(err.to_string())
        }
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(
            DomainError::invalid_argument(format!("{field} must not be empty"))
                .with_details(json!({ "field": field })),
        );
    }
    Ok(())
}

/// Validate a pagination start cursor and convert it to a record skip count.
fn start_to_skip(start: i64) -> Result<u64, DomainError> {
    u64::try_from(start)
        .map_err(|_| DomainError::invalid_argument("start position cannot be a negative number"))
}

impl AppService {
    /// Create a service over the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            users,
            projects,
            customers,
        }
    }

    /// Construct an [`Id`] from an externally supplied string.
    pub fn parse_id(&self, value: &str) -> Result<Id, DomainError> {
        Id::parse(value).map_err(|err| {
            DomainError::invalid_identifier(err.to_string())
                .with_details(json!({ "value": err.value }))
        })
    }

    // ---- users ----

    /// Register a new user; duplicate email fails with `AlreadyExists`.
    pub async fn register_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        require_non_empty("email", &new_user.email)?;

        let mut user = User {
            id: None,
            name: new_user.name,
            last_name: new_user.last_name,
            email: new_user.email,
            token: None,
        };
        let id = self.users.insert(&user).await.map_err(map_store_error)?;
        user.id = Some(id);
        Ok(user)
    }

    /// Fetch a user by identifier.
    pub async fn user_by_id(&self, id: &Id) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| DomainError::not_found(format!("user {id} not found")))
    }

    /// Fetch a user by email.
    pub async fn user_by_email(&self, email: &str) -> Result<User, DomainError> {
        require_non_empty("email", email)?;
        self.users
            .find_by_email(email)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| DomainError::not_found(format!("user {email} not found")))
    }

    /// Delete the user registered under `email`.
    pub async fn delete_user(&self, email: &str) -> Result<(), DomainError> {
        require_non_empty("email", email)?;
        self.users
            .delete_by_email(email)
            .await
            .map_err(map_store_error)
    }

    /// List users in insertion order. `limit == 0` means unbounded.
    pub async fn all_users(&self, start: i64, limit: i64) -> Result<Vec<User>, DomainError> {
        let skip = start_to_skip(start)?;
        self.users
            .list(skip, limit.max(0))
            .await
            .map_err(map_store_error)
    }

    /// Fetch users by identifier set; empty input short-circuits.
    pub async fn users_where_id_in(&self, ids: &[Id]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.users
            .find_where_id_in(ids)
            .await
            .map_err(map_store_error)
    }

    // ---- projects ----

    /// Create a project; dangling owner/customer references fail with
    /// `InvalidReference`.
    pub async fn create_project(&self, new_project: NewProject) -> Result<Project, DomainError> {
        require_non_empty("name", &new_project.name)?;

        let mut project = Project {
            id: None,
            name: new_project.name,
            description: new_project.description.unwrap_or_default(),
            created_at: Utc::now(),
            owner_id: new_project.owner_id,
            customer_id: new_project.customer_id,
        };
        let id = self
            .projects
            .insert(&project)
            .await
            .map_err(map_store_error)?;
        project.id = Some(id);
        Ok(project)
    }

    /// Fetch a project by identifier.
    pub async fn project_by_id(&self, id: &Id) -> Result<Project, DomainError> {
        self.projects
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| DomainError::not_found(format!("project {id} not found")))
    }

    /// List projects in insertion order. `limit == 0` means unbounded.
    pub async fn all_projects(&self, start: i64, limit: i64) -> Result<Vec<Project>, DomainError> {
        let skip = start_to_skip(start)?;
        self.projects
            .list(skip, limit.max(0))
            .await
            .map_err(map_store_error)
    }

    /// Fetch every project owned by the given user.
    pub async fn projects_by_owner(&self, owner_id: &Id) -> Result<Vec<Project>, DomainError> {
        self.projects
            .find_by_owner(owner_id)
            .await
            .map_err(map_store_error)
    }

    /// Fetch every project billed to the given customer.
    pub async fn projects_of_customer(
        &self,
        customer_id: &Id,
    ) -> Result<Vec<Project>, DomainError> {
        self.projects
            .find_by_customer(customer_id)
            .await
            .map_err(map_store_error)
    }

    /// Fetch projects by identifier set; empty input short-circuits.
    pub async fn projects_where_id_in(&self, ids: &[Id]) -> Result<Vec<Project>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.projects
            .find_where_id_in(ids)
            .await
            .map_err(map_store_error)
    }

    /// Replace a stored project wholesale; `NotFound` when absent.
    pub async fn update_project(&self, project: Project) -> Result<Project, DomainError> {
        if project.id.is_none() {
            return Err(DomainError::invalid_argument(
                "project identifier is required for updates",
            ));
        }
        require_non_empty("name", &project.name)?;
        self.projects
            .replace(&project)
            .await
            .map_err(map_store_error)?;
        Ok(project)
    }

    /// Delete a single project; `NotFound` when absent.
    pub async fn delete_project(&self, id: &Id) -> Result<(), DomainError> {
        self.projects.delete(id).await.map_err(map_store_error)
    }

    /// Delete projects by identifier set, returning the removed count.
    pub async fn delete_projects(&self, ids: &[Id]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.projects
            .delete_many(ids)
            .await
            .map_err(map_store_error)
    }

    // ---- customers ----

    /// Create a customer.
    pub async fn create_customer(
        &self,
        new_customer: NewCustomer,
    ) -> Result<Customer, DomainError> {
        require_non_empty("name", &new_customer.name)?;
        require_non_empty("cuit", &new_customer.cuit)?;

        let mut customer = Customer {
            id: None,
            name: new_customer.name,
            cuit: new_customer.cuit,
            project_ids: Vec::new(),
        };
        let id = self
            .customers
            .insert(&customer)
            .await
            .map_err(map_store_error)?;
        customer.id = Some(id);
        Ok(customer)
    }

    /// Fetch a customer by identifier.
    pub async fn customer_by_id(&self, id: &Id) -> Result<Customer, DomainError> {
        self.customers
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| DomainError::not_found(format!("customer {id} not found")))
    }

    /// List all customers in insertion order.
    pub async fn all_customers(&self) -> Result<Vec<Customer>, DomainError> {
        self.customers.list_all().await.map_err(map_store_error)
    }

    /// Fetch customers by identifier set; empty input short-circuits.
    pub async fn customers_where_id_in(&self, ids: &[Id]) -> Result<Vec<Customer>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.customers
            .find_where_id_in(ids)
            .await
            .map_err(map_store_error)
    }

    /// Replace a stored customer wholesale; `NotFound` when absent.
    pub async fn update_customer(&self, customer: Customer) -> Result<Customer, DomainError> {
        if customer.id.is_none() {
            return Err(DomainError::invalid_argument(
                "customer identifier is required for updates",
            ));
        }
        require_non_empty("name", &customer.name)?;
        require_non_empty("cuit", &customer.cuit)?;
        self.customers
            .replace(&customer)
            .await
            .map_err(map_store_error)?;
        Ok(customer)
    }

    /// Delete a single customer; `NotFound` when absent.
    pub async fn delete_customer(&self, id: &Id) -> Result<(), DomainError> {
        self.customers.delete(id).await.map_err(map_store_error)
    }

    /// Delete customers by identifier set, returning the removed count.
    pub async fn delete_customers(&self, ids: &[Id]) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        self.customers
            .delete_many(ids)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{
        MockCustomerRepository, MockProjectRepository, MockUserRepository,
    };
    use bson::oid::ObjectId;
    use rstest::rstest;

    fn service(
        users: MockUserRepository,
        projects: MockProjectRepository,
        customers: MockCustomerRepository,
    ) -> AppService {
        AppService::new(Arc::new(users), Arc::new(projects), Arc::new(customers))
    }

    fn id() -> Id {
        Id::from_object_id(ObjectId::new())
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: email.to_owned(),
        }
    }

    #[tokio::test]
    async fn register_user_assigns_generated_id() {
        let generated = id();
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .withf(|user| user.id.is_none() && user.email == "ada@example.com")
            .times(1)
            .return_once(move |_| Ok(generated));

        let service = service(
            users,
            MockProjectRepository::new(),
            MockCustomerRepository::new(),
        );

        let user = service
            .register_user(new_user("ada@example.com"))
            .await
            .expect("registration succeeds");
        assert_eq!(user.id, Some(generated));
        assert!(user.token.is_none());
    }

    #[tokio::test]
    async fn register_user_rejects_empty_email_without_touching_store() {
        let mut users = MockUserRepository::new();
        users.expect_insert().times(0);

        let service = service(
            users,
            MockProjectRepository::new(),
            MockCustomerRepository::new(),
        );

        let err = service
            .register_user(new_user("  "))
            .await
            .expect_err("empty email rejected");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn register_user_maps_duplicate_email_to_already_exists() {
        let mut users = MockUserRepository::new();
        users
            .expect_insert()
            .times(1)
            .return_once(|_| Err(StoreError::already_exists("ada@example.com")));

        let service = service(
            users,
            MockProjectRepository::new(),
            MockCustomerRepository::new(),
        );

        let err = service
            .register_user(new_user("ada@example.com"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[rstest]
    #[case(StoreError::connection("refused"), ErrorCode::StoreUnavailable)]
    #[case(StoreError::query("boom"), ErrorCode::InternalError)]
    #[case(StoreError::invalid_id("xyz"), ErrorCode::InvalidIdentifier)]
    #[case(StoreError::not_found("user", "abc"), ErrorCode::NotFound)]
    #[tokio::test]
    async fn store_errors_map_onto_the_taxonomy(
        #[case] store_error: StoreError,
        #[case] expected: ErrorCode,
    ) {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .times(1)
            .return_once(move |_, _| Err(store_error));

        let service = service(
            users,
            MockProjectRepository::new(),
            MockCustomerRepository::new(),
        );

        let err = service.all_users(0, 0).await.expect_err("failure mapped");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn all_users_rejects_negative_start_without_touching_store() {
        let mut users = MockUserRepository::new();
        users.expect_list().times(0);

        let service = service(
            users,
            MockProjectRepository::new(),
            MockCustomerRepository::new(),
        );

        let err = service.all_users(-1, 0).await.expect_err("negative start");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn empty_id_set_lookups_issue_no_store_query() {
        let mut users = MockUserRepository::new();
        users.expect_find_where_id_in().times(0);
        let mut projects = MockProjectRepository::new();
        projects.expect_find_where_id_in().times(0);
        projects.expect_delete_many().times(0);
        let mut customers = MockCustomerRepository::new();
        customers.expect_find_where_id_in().times(0);
        customers.expect_delete_many().times(0);

        let service = service(users, projects, customers);

        assert!(service.users_where_id_in(&[]).await.expect("ok").is_empty());
        assert!(
            service
                .projects_where_id_in(&[])
                .await
                .expect("ok")
                .is_empty()
        );
        assert!(
            service
                .customers_where_id_in(&[])
                .await
                .expect("ok")
                .is_empty()
        );
        assert_eq!(service.delete_projects(&[]).await.expect("ok"), 0);
        assert_eq!(service.delete_customers(&[]).await.expect("ok"), 0);
    }

    #[tokio::test]
    async fn id_set_lookups_pass_the_ids_through() {
        let wanted = vec![id(), id()];
        let expected = wanted.clone();
        let mut projects = MockProjectRepository::new();
        projects
            .expect_find_where_id_in()
            .withf(move |ids| ids == expected)
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let service = service(
            MockUserRepository::new(),
            projects,
            MockCustomerRepository::new(),
        );

        assert!(
            service
                .projects_where_id_in(&wanted)
                .await
                .expect("lookup succeeds")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn create_project_defaults_description_and_timestamp() {
        let owner = id();
        let customer = id();
        let generated = id();
        let mut projects = MockProjectRepository::new();
        projects
            .expect_insert()
            .withf(|project| project.description.is_empty() && project.id.is_none())
            .times(1)
            .return_once(move |_| Ok(generated));

        let service = service(
            MockUserRepository::new(),
            projects,
            MockCustomerRepository::new(),
        );

        let before = Utc::now();
        let project = service
            .create_project(NewProject {
                name: "P1".to_owned(),
                description: None,
                owner_id: owner,
                customer_id: customer,
            })
            .await
            .expect("creation succeeds");

        assert_eq!(project.id, Some(generated));
        assert!(project.created_at >= before);
    }

    #[tokio::test]
    async fn create_project_surfaces_dangling_customer_reference() {
        let customer = id();
        let mut projects = MockProjectRepository::new();
        projects
            .expect_insert()
            .times(1)
            .return_once(move |_| Err(StoreError::invalid_reference("customer", customer.to_string())));

        let service = service(
            MockUserRepository::new(),
            projects,
            MockCustomerRepository::new(),
        );

        let err = service
            .create_project(NewProject {
                name: "P1".to_owned(),
                description: None,
                owner_id: id(),
                customer_id: customer,
            })
            .await
            .expect_err("dangling reference rejected");
        assert_eq!(err.code(), ErrorCode::InvalidReference);
    }

    #[tokio::test]
    async fn update_project_requires_identifier() {
        let mut projects = MockProjectRepository::new();
        projects.expect_replace().times(0);

        let service = service(
            MockUserRepository::new(),
            projects,
            MockCustomerRepository::new(),
        );

        let err = service
            .update_project(Project {
                id: None,
                name: "P1".to_owned(),
                description: String::new(),
                created_at: Utc::now(),
                owner_id: id(),
                customer_id: id(),
            })
            .await
            .expect_err("missing id rejected");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn create_customer_requires_name_and_cuit() {
        let mut customers = MockCustomerRepository::new();
        customers.expect_insert().times(0);

        let service = service(
            MockUserRepository::new(),
            MockProjectRepository::new(),
            customers,
        );

        let err = service
            .create_customer(NewCustomer {
                name: "Acme".to_owned(),
                cuit: String::new(),
            })
            .await
            .expect_err("empty cuit rejected");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
    }

    #[tokio::test]
    async fn parse_id_rejects_malformed_strings() {
        let service = service(
            MockUserRepository::new(),
            MockProjectRepository::new(),
            MockCustomerRepository::new(),
        );

        let err = service.parse_id("not-an-id").expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidIdentifier);
    }
}
