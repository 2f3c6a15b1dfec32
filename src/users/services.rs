use std::sync::Arc;

use axum::extract::FromRef;
use lazy_static::lazy_static;
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::state::AppState;
use crate::users::dto::{
    ChangePasswordRequest, CreateUserRequest, ListUsersQuery, ListUsersResponse,
    MessageResponse, PublicUser, UpdateUserRequest, UserRecord,
};
use crate::users::error::{UserError, UserResult};
use crate::users::password;
use crate::users::repo::UserRepo;
use crate::users::repo_types::{DeleteAck, UpdateAck};

const NAME_MAX_CHARS: usize = 100;
const PASSWORD_MIN_CHARS: usize = 6;
const PASSWORD_MAX_CHARS: usize = 32;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn parse_id(raw: &str) -> UserResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| UserError::Validation("Invalid user id".into()))
}

fn normalize_email(raw: &str) -> UserResult<String> {
    let email = raw.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(UserError::Validation("Invalid email".into()));
    }
    Ok(email)
}

fn normalize_name(raw: &str) -> UserResult<String> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX_CHARS {
        return Err(UserError::Validation(format!(
            "Name must be 1 to {NAME_MAX_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

fn check_password_length(plain: &str) -> UserResult<()> {
    let len = plain.chars().count();
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&len) {
        return Err(UserError::Validation(format!(
            "Password must be {PASSWORD_MIN_CHARS} to {PASSWORD_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn check_confirmation(password: &str, confirm: Option<&str>) -> UserResult<()> {
    if confirm != Some(password) {
        return Err(UserError::InvalidPassword(
            "Password confirmation does not match".into(),
        ));
    }
    Ok(())
}

/// Per-request orchestration over the user store: validate, delegate, shape.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepo>,
    default_page_size: u64,
}

impl FromRef<AppState> for UserService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), state.config.default_page_size)
    }
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepo>, default_page_size: u64) -> Self {
        Self {
            repo,
            default_page_size,
        }
    }

    async fn ensure_email_free(&self, email: &str) -> UserResult<()> {
        if self.repo.get_by_email(email).await?.is_some() {
            warn!("email already registered");
            return Err(UserError::EmailAlreadyTaken("Email already registered".into()));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_users(&self, query: ListUsersQuery) -> UserResult<ListUsersResponse> {
        let page_number = query.page_number.unwrap_or(1);
        let page_size = query.page_size.unwrap_or(self.default_page_size);
        if page_number == 0 || page_size == 0 {
            return Err(UserError::Validation(
                "page_number and page_size must be at least 1".into(),
            ));
        }

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let page = match search {
            Some(pattern) => {
                self.repo
                    .search_by_name(pattern, page_number, page_size)
                    .await?
            }
            None => self.repo.list_page(page_number, page_size).await?,
        }
        .map(PublicUser::from);

        Ok(ListUsersResponse {
            page_number,
            page_size,
            count: page.users.len() as u64,
            total_pages: page.total_pages,
            has_previous_page: page.has_previous_page,
            has_next_page: page.has_next_page,
            users: page.users,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<UserRecord> {
        let id = parse_id(id)?;
        match self.repo.get_by_id(id).await? {
            Some(user) => Ok(user.into()),
            None => {
                warn!(user_id = %id, "unknown user");
                Err(UserError::UnknownUser("Unknown user".into()))
            }
        }
    }

    #[instrument(skip(self, req))]
    pub async fn create_user(&self, req: CreateUserRequest) -> UserResult<UserRecord> {
        check_confirmation(&req.password, req.password_confirm.as_deref()).inspect_err(|_| {
            warn!("password confirmation mismatch on create");
        })?;
        let name = normalize_name(&req.name)?;
        let email = normalize_email(&req.email)?;
        check_password_length(&req.password)?;

        self.ensure_email_free(&email).await?;

        let hashed = password::hash(&req.password)?;
        let user = self.repo.create(&name, &email, &hashed).await?;
        info!(user_id = %user.id, "user created");
        Ok(user.into())
    }

    /// The uniqueness check does not exclude the user being updated, so
    /// resubmitting one's own email is reported as taken.
    #[instrument(skip(self, req))]
    pub async fn update_user(&self, id: &str, req: UpdateUserRequest) -> UserResult<UpdateAck> {
        let id = parse_id(id)?;
        let name = normalize_name(&req.name)?;
        let email = normalize_email(&req.email)?;

        self.ensure_email_free(&email).await?;

        let ack = self.repo.update(id, &name, &email).await?;
        info!(user_id = %id, matched = ack.matched_count, "user updated");
        Ok(ack)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<DeleteAck> {
        let id = parse_id(id)?;
        let ack = self.repo.delete(id).await?;
        info!(user_id = %id, deleted = ack.deleted_count, "user deleted");
        Ok(ack)
    }

    #[instrument(skip(self, req))]
    pub async fn change_password(
        &self,
        id: &str,
        req: ChangePasswordRequest,
    ) -> UserResult<MessageResponse> {
        let id = parse_id(id)?;
        check_confirmation(&req.new_password, req.confirm_password.as_deref()).inspect_err(|_| {
            warn!(user_id = %id, "password confirmation mismatch");
        })?;
        check_password_length(&req.new_password)?;

        let user = self.repo.get_by_id(id).await?.ok_or_else(|| {
            warn!(user_id = %id, "password change for unknown user");
            UserError::UnknownUser("User not found".into())
        })?;

        if !password::verify(&req.old_password, &user.password)? {
            warn!(user_id = %id, "old password does not match");
            return Err(UserError::InvalidPassword("Wrong old password".into()));
        }

        let hashed = password::hash(&req.new_password)?;
        self.repo.change_password(id, &hashed).await?;
        info!(user_id = %id, "password changed");
        Ok(MessageResponse {
            message: "Password updated successfully".into(),
        })
    }
}
