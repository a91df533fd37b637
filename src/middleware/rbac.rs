// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{SystemUser, UserRole},
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. Tabela de capacidades por papel.
/// Admin pode tudo; Editor edita mas não exclui nem administra usuários;
/// Viewer é somente leitura (nenhuma permissão de escrita).
fn role_allows(role: UserRole, slug: &str) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Editor => slug != "users:manage" && !slug.ends_with(":delete"),
        UserRole::Viewer => false,
    }
}

/// 3. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Usuário injetado pelo auth_guard
        let user = parts
            .extensions
            .get::<SystemUser>()
            .ok_or(AppError::InvalidToken)?;

        let required_perm = T::slug();

        if !role_allows(user.role, required_perm) {
            return Err(AppError::Forbidden(required_perm));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permission {
    ($name:ident, $slug:literal) => {
        pub struct $name;
        impl PermissionDef for $name {
            fn slug() -> &'static str {
                $slug
            }
        }
    };
}

permission!(PermMembersWrite, "members:write");
permission!(PermMembersDelete, "members:delete");
permission!(PermFinanceWrite, "finance:write");
permission!(PermFinanceDelete, "finance:delete");
permission!(PermInventoryWrite, "inventory:write");
permission!(PermInventoryDelete, "inventory:delete");
permission!(PermOperationsWrite, "operations:write");
permission!(PermOperationsDelete, "operations:delete");
permission!(PermPeopleWrite, "people:write");
permission!(PermPeopleDelete, "people:delete");
permission!(PermUsersManage, "users:manage");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_pode_tudo() {
        assert!(role_allows(UserRole::Admin, "users:manage"));
        assert!(role_allows(UserRole::Admin, "finance:delete"));
    }

    #[test]
    fn editor_edita_mas_nao_exclui_nem_administra() {
        assert!(role_allows(UserRole::Editor, "members:write"));
        assert!(role_allows(UserRole::Editor, "inventory:write"));
        assert!(!role_allows(UserRole::Editor, "members:delete"));
        assert!(!role_allows(UserRole::Editor, "users:manage"));
    }

    #[test]
    fn viewer_somente_leitura() {
        assert!(!role_allows(UserRole::Viewer, "members:write"));
        assert!(!role_allows(UserRole::Viewer, "finance:delete"));
    }
}
