use type_map::concurrent::TypeMap;

use crate::{auth::Auth, repository::RepositoryObject};

pub struct ServiceState {
    pub repositories: TypeMap,
}

impl ServiceState {
    pub fn new() -> Self {
        Self {
            repositories: TypeMap::new(),
        }
    }

    pub fn insert<T: 'static>(&mut self, repository: RepositoryObject<T>) {
        self.repositories.insert(repository);
    }
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct HandlerContext {
    pub user_auth: Auth,
}
