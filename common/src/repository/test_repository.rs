use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson};
use serde::{de::DeserializeOwned, Serialize};

use crate::error;

use super::{Entity, Repository};

pub struct TestRepository<T> {
    _t: std::marker::PhantomData<T>,
    pub db: Mutex<Vec<Bson>>,
}

impl<T> TestRepository<T> {
    pub fn new() -> Self {
        Self {
            _t: std::marker::PhantomData,
            db: Mutex::new(Vec::new()),
        }
    }
}

impl<T> Default for TestRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for TestRepository<T>
where
    T: Entity + Clone + Send + Sync + Serialize + DeserializeOwned,
{
    async fn insert(&self, item: &T) -> error::Result<bool> {
        let mut db = self.db.lock().unwrap();

        let contains = db
            .iter()
            .any(|x| x.as_document().unwrap().get_object_id("id").unwrap() == item.id());
        if !contains {
            db.push(bson::to_bson(&item).unwrap());
        }
        Ok(!contains)
    }

    async fn find(&self, field: &str, value: &Bson) -> error::Result<Option<T>> {
        let db = self.db.lock().unwrap();
        Ok(db
            .iter()
            .find(|x| x.as_document().unwrap().get(field) == Some(value))
            .cloned()
            .map(|x| bson::from_bson(x).unwrap()))
    }

    async fn delete(&self, field: &str, id: &ObjectId) -> error::Result<Option<T>> {
        let mut db = self.db.lock().unwrap();
        let result = db
            .iter()
            .find(|x| x.as_document().unwrap().get_object_id(field).ok() == Some(*id))
            .cloned()
            .map(|x| bson::from_bson(x).unwrap());

        let pos = db
            .iter()
            .position(|x| x.as_document().unwrap().get_object_id(field).ok() == Some(*id));

        pos.map(|x| db.remove(x));

        Ok(result)
    }

    async fn find_many(&self, field: &str, value: &Bson) -> error::Result<Vec<T>> {
        let db = self.db.lock().unwrap();
        Ok(db
            .iter()
            .filter(|x| x.as_document().unwrap().get(field) == Some(value))
            .map(|x| bson::from_bson(x.clone()).unwrap())
            .collect())
    }
}
