//! Operator accounts.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::codec::format_timestamp;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::model::{AuthenticateUserParams, CreateUserParams, User};
use crate::password::{hash_password, verify_password};

use super::connection::Database;
use super::rows::row_to_user;
use super::schema::USER_COLUMNS;

impl Database {
    /// Creates an operator account, hashing the password first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConstraintViolation`] if the email is empty or taken.
    pub fn create_user(&self, ctx: &RequestContext, params: &CreateUserParams) -> Result<User> {
        let password_hash = hash_password(&params.password)?;
        let now = Utc::now();
        let email = params.email.trim().to_ascii_lowercase();
        let id = self.with_connection(ctx, |conn| {
            conn.execute(
                "INSERT INTO users
                 (first_name, last_name, email, password_hash, access_level, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![
                    params.first_name,
                    params.last_name,
                    email,
                    password_hash,
                    params.access_level,
                    format_timestamp(&now)
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        log::info!("created user {id} <{email}>");
        Ok(User {
            id,
            first_name: params.first_name.clone(),
            last_name: params.last_name.clone(),
            email,
            password_hash,
            access_level: params.access_level,
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&self, ctx: &RequestContext, id: i64) -> Result<Option<User>> {
        self.with_connection(ctx, |conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
            Ok(conn.query_row(&sql, [id], row_to_user).optional()?)
        })
    }

    /// Gets a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(&self, ctx: &RequestContext, email: &str) -> Result<Option<User>> {
        self.with_connection(ctx, |conn| {
            let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
            Ok(conn
                .query_row(&sql, [email.trim().to_ascii_lowercase()], row_to_user)
                .optional()?)
        })
    }

    /// Checks credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] for an unknown email and for
    /// a wrong password alike.
    pub fn authenticate_user(
        &self,
        ctx: &RequestContext,
        params: &AuthenticateUserParams,
    ) -> Result<User> {
        let Some(user) = self.get_user_by_email(ctx, &params.email)? else {
            log::debug!("authentication failed: unknown email");
            return Err(Error::AuthenticationFailed);
        };
        if !verify_password(&params.password, &user.password_hash) {
            log::debug!("authentication failed for user {}", user.id);
            return Err(Error::AuthenticationFailed);
        }
        Ok(user)
    }
}
