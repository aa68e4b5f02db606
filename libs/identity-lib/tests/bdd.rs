use std::sync::Arc;

use async_trait::async_trait;
use cucumber::{given, then, when, World};
use mockall::mock;
use uuid::Uuid;

use identity_lib::account_service::AccountService;
use identity_lib::entities::{AppRole, AppUser};
use identity_lib::errors_service::AccountServiceError;
use identity_lib::repository::errors::IdentityRepositoryError;
use identity_lib::repository::models::{RoleRow, UserRow};
use identity_lib::repository::traits::{
    RoleRepositoryTrait, UserRepositoryTrait, UserRoleRepositoryTrait,
};

// Mock repositories
mock! {
    #[derive(Debug)]
    pub UserRepo {}

    #[async_trait]
    impl UserRepositoryTrait for UserRepo {
        async fn create_user(&self, user_id: &str, username: &str, password_hash: &str, email: &str) -> Result<UserRow, IdentityRepositoryError>;
        async fn find_by_username(&self, username: &str) -> Result<Option<UserRow>, IdentityRepositoryError>;
    }
}

mock! {
    #[derive(Debug)]
    pub RoleRepo {}

    #[async_trait]
    impl RoleRepositoryTrait for RoleRepo {
        async fn create_role(&self, role: &str) -> Result<RoleRow, IdentityRepositoryError>;
        async fn find_role(&self, role: &str) -> Result<Option<RoleRow>, IdentityRepositoryError>;
        async fn get_roles_for_user(&self, user_id: &str) -> Result<Vec<RoleRow>, IdentityRepositoryError>;
    }
}

mock! {
    #[derive(Debug)]
    pub UserRoleRepo {}

    #[async_trait]
    impl UserRoleRepositoryTrait for UserRoleRepo {
        async fn assign_role(&self, user_id: &str, role: &str) -> Result<(), IdentityRepositoryError>;
        async fn unassign_role(&self, user_id: &str, role: &str) -> Result<(), IdentityRepositoryError>;
    }
}

#[derive(Debug, Default, World)]
pub struct TestWorld {
    // Simulated store state
    pub stored_users: Vec<UserRow>,
    pub stored_roles: Vec<RoleRow>,
    pub granted: Vec<(String, String)>,

    // Results
    pub user_result: Option<Result<AppUser, AccountServiceError>>,
    pub role_result: Option<Result<AppRole, AccountServiceError>>,
    pub grant_result: Option<Result<(), AccountServiceError>>,
}

/// Builds a service whose mock repositories answer from the world's
/// simulated store state.
fn service_from_state(
    world: &TestWorld,
) -> AccountService<MockUserRepo, MockRoleRepo, MockUserRoleRepo> {
    let mut user_repo = MockUserRepo::new();
    let users = world.stored_users.clone();
    user_repo
        .expect_find_by_username()
        .returning(move |username| Ok(users.iter().find(|u| u.username == username).cloned()));
    let users = world.stored_users.clone();
    user_repo
        .expect_create_user()
        .returning(move |user_id, username, password_hash, email| {
            if users.iter().any(|u| u.username == username) {
                return Err(IdentityRepositoryError::UsernameAlreadyExists);
            }
            if users.iter().any(|u| u.email == email) {
                return Err(IdentityRepositoryError::EmailAlreadyExists);
            }
            Ok(UserRow {
                user_id: user_id.to_string(),
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                email: email.to_string(),
            })
        });

    let mut role_repo = MockRoleRepo::new();
    let roles = world.stored_roles.clone();
    role_repo
        .expect_find_role()
        .returning(move |role| Ok(roles.iter().find(|r| r.role == role).cloned()));
    let roles = world.stored_roles.clone();
    role_repo.expect_create_role().returning(move |role| {
        if roles.iter().any(|r| r.role == role) {
            return Err(IdentityRepositoryError::RoleAlreadyExists);
        }
        Ok(RoleRow {
            role: role.to_string(),
        })
    });
    let granted = world.granted.clone();
    role_repo.expect_get_roles_for_user().returning(move |user_id| {
        Ok(granted
            .iter()
            .filter(|(id, _)| id == user_id)
            .map(|(_, role)| RoleRow { role: role.clone() })
            .collect())
    });

    let mut user_role_repo = MockUserRoleRepo::new();
    let granted = world.granted.clone();
    user_role_repo
        .expect_assign_role()
        .returning(move |user_id, role| {
            if granted.iter().any(|(id, r)| id == user_id && r == role) {
                return Err(IdentityRepositoryError::UserAlreadyHasRole);
            }
            Ok(())
        });

    AccountService::with_repos(
        Arc::new(user_repo),
        Arc::new(role_repo),
        Arc::new(user_role_repo),
    )
}

fn user_id_of(world: &TestWorld, username: &str) -> Option<String> {
    world
        .stored_users
        .iter()
        .find(|u| u.username == username)
        .map(|u| u.user_id.clone())
}

// ==================== GIVEN ====================

#[given("a clean identity store")]
async fn clean_store(world: &mut TestWorld) {
    *world = TestWorld::default();
}

#[given(expr = "a user exists with username {string}")]
async fn user_exists(world: &mut TestWorld, username: String) {
    world.stored_users.push(UserRow {
        user_id: Uuid::new_v4().to_string(),
        username: username.clone(),
        password_hash: "$argon2id$stub".to_string(),
        email: format!("{username}@example.com"),
    });
}

#[given(expr = "a role exists with name {string}")]
async fn role_exists(world: &mut TestWorld, role: String) {
    world.stored_roles.push(RoleRow { role });
}

// ==================== WHEN ====================

#[when(expr = "I create the role {string}")]
async fn create_role(world: &mut TestWorld, role: String) {
    let service = service_from_state(world);
    let result = service.add_role(&role).await;
    if let Ok(created) = &result {
        world.stored_roles.push(RoleRow {
            role: created.role.clone(),
        });
    }
    world.role_result = Some(result);
}

#[when(expr = "I register the user {string} with password {string} and email {string}")]
async fn register_user(world: &mut TestWorld, username: String, password: String, email: String) {
    let service = service_from_state(world);
    let result = service.add_user(&username, &password, &email, &password).await;
    if let Ok(user) = &result {
        world.stored_users.push(UserRow {
            user_id: user.user_id.clone(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            email: user.email.clone(),
        });
    }
    world.user_result = Some(result);
}

#[when(expr = "I register the user {string} with password {string} confirmed as {string}")]
async fn register_user_mismatch(
    world: &mut TestWorld,
    username: String,
    password: String,
    confirm: String,
) {
    let service = service_from_state(world);
    let email = format!("{username}@example.com");
    world.user_result = Some(service.add_user(&username, &password, &email, &confirm).await);
}

#[when(expr = "I grant the role {string} to {string}")]
async fn grant_role(world: &mut TestWorld, role: String, username: String) {
    let service = service_from_state(world);
    let result = service.add_role_to_user(&username, &role).await;
    if result.is_ok() {
        if let Some(user_id) = user_id_of(world, &username) {
            world.granted.push((user_id, role));
        }
    }
    world.grant_result = Some(result);
}

// ==================== THEN ====================

#[then("the role creation succeeds")]
async fn role_creation_succeeds(world: &mut TestWorld) {
    assert!(world.role_result.as_ref().unwrap().is_ok());
}

#[then("the role creation fails with a conflict")]
async fn role_creation_conflict(world: &mut TestWorld) {
    assert!(matches!(
        world.role_result.as_ref().unwrap(),
        Err(AccountServiceError::RoleAlreadyExists)
    ));
}

#[then("the registration succeeds")]
async fn registration_succeeds(world: &mut TestWorld) {
    assert!(world.user_result.as_ref().unwrap().is_ok());
}

#[then(expr = "the stored password is not {string}")]
async fn stored_password_is_hashed(world: &mut TestWorld, raw: String) {
    let user = world.user_result.as_ref().unwrap().as_ref().unwrap();
    assert_ne!(user.password_hash, raw);
    assert!(user.password_hash.starts_with("$argon2"));
}

#[then(expr = "the registration fails with a validation error on {string}")]
async fn registration_validation_error(world: &mut TestWorld, expected_field: String) {
    match world.user_result.as_ref().unwrap() {
        Err(AccountServiceError::Validation { field, .. }) => {
            assert_eq!(*field, expected_field);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[then("the registration fails with a conflict")]
async fn registration_conflict(world: &mut TestWorld) {
    assert!(matches!(
        world.user_result.as_ref().unwrap(),
        Err(AccountServiceError::UsernameAlreadyExists)
    ));
}

#[then("the grant succeeds")]
async fn grant_succeeds(world: &mut TestWorld) {
    assert!(world.grant_result.as_ref().unwrap().is_ok());
}

#[then("the grant fails with not found")]
async fn grant_not_found(world: &mut TestWorld) {
    assert!(matches!(
        world.grant_result.as_ref().unwrap(),
        Err(AccountServiceError::NotFound)
    ));
}

#[then(expr = "looking up {string} shows the role {string}")]
async fn lookup_shows_role(world: &mut TestWorld, username: String, role: String) {
    let service = service_from_state(world);
    let user = service
        .find_by_username(&username)
        .await
        .unwrap()
        .expect("user should exist");
    assert!(user.roles.iter().any(|r| r.role == role));
}

#[tokio::main]
async fn main() {
    TestWorld::run("tests/features").await;
}
