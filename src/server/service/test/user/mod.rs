use super::{builder, user};
use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::{SetAdminParam, SetStatusParam, UserStatus},
    service::user::UserService,
};

mod set_admin;
mod set_status;
