use mongodb::bson::oid::ObjectId;

use crate::{auth::Auth, entities::letter::Letter};

pub trait AccessRules<Object, Subject> {
    fn get_access(&self, object: Object, subject: Subject) -> bool;
}

pub struct Read;

pub struct Edit;

pub struct Delete;

// The `public` flag grants nothing here: no flow serves foreign letters.

impl<'a, 'b> AccessRules<&'a Auth, &'b Letter<ObjectId>> for Read {
    fn get_access(&self, auth: &'a Auth, letter: &'b Letter<ObjectId>) -> bool {
        match auth {
            Auth::Admin(_) => true,
            Auth::User(id) => id == &letter.author_id,
            Auth::None => false,
        }
    }
}

impl<'a, 'b> AccessRules<&'a Auth, &'b Letter<ObjectId>> for Edit {
    fn get_access(&self, auth: &'a Auth, letter: &'b Letter<ObjectId>) -> bool {
        match auth {
            Auth::Admin(_) => true,
            Auth::User(id) => id == &letter.author_id,
            Auth::None => false,
        }
    }
}

impl<'a, 'b> AccessRules<&'a Auth, &'b Letter<ObjectId>> for Delete {
    fn get_access(&self, auth: &'a Auth, letter: &'b Letter<ObjectId>) -> bool {
        match auth {
            Auth::Admin(_) => true,
            Auth::User(id) => id == &letter.author_id,
            Auth::None => false,
        }
    }
}
