//! Domain services
//!
//! Each service wraps [`DocumentAccess`](crate::core::access::DocumentAccess)
//! with its collection name and entity-specific operations. [`Services`]
//! builds them all from one [`Connections`].

pub mod auth;
pub mod ingredients;
pub mod recipes;
pub mod users;

pub use auth::AuthService;
pub use ingredients::{IngredientsService, INGREDIENTS};
pub use recipes::{RecipesService, RECIPES};
pub use users::{UserService, USERS};

use crate::core::connection::Connections;
use crate::domain::Result;

/// Every domain service over one set of connections
#[derive(Clone)]
pub struct Services {
    pub recipes: RecipesService,
    pub ingredients: IngredientsService,
    pub users: UserService,
    pub auth: AuthService,
}

impl Services {
    /// Builds the services, initializing the store and auth client
    pub async fn new(connections: &Connections) -> Result<Self> {
        let documents = connections.documents().await?;
        let users = UserService::new(documents.clone());

        Ok(Self {
            recipes: RecipesService::new(documents.clone()),
            ingredients: IngredientsService::new(documents),
            auth: AuthService::new(connections.auth().await?, users.clone()),
            users,
        })
    }
}
