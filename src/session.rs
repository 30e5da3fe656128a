//! The context a front end holds while a user works with the data file.
//!
//! A `Session` owns the in-memory [`Document`] and the name of the logged-in user. Every change
//! made through it is saved to the [`Store`] before the call returns; a change that fails
//! validation is neither applied nor saved.

use crate::error::SalesError;
use crate::model::{Document, NewSale, Sale};
use crate::Store;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Session {
    store: Store,
    doc: Document,
    current_user: Option<String>,
}

impl Session {
    /// Loads the document from `store`. Nobody is logged in yet.
    pub fn open(store: Store) -> Result<Self, SalesError> {
        let doc = store.load()?;
        Ok(Self {
            store,
            doc,
            current_user: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Checks the credentials and, if they match, makes `username` the current user.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        let username = username.trim();
        if self.doc.authenticate(username, password) {
            debug!("Logged in as {username}");
            self.current_user = Some(username.to_string());
            true
        } else {
            false
        }
    }

    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// Re-reads the data file to pick up changes saved by another session.
    pub fn reload(&mut self) -> Result<(), SalesError> {
        self.doc = self.store.load()?;
        Ok(())
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), SalesError> {
        self.doc.register(username, password)?;
        self.store.save(&self.doc)
    }

    pub fn add_category(&mut self, name: &str) -> Result<(), SalesError> {
        self.doc.add_category(name)?;
        self.store.save(&self.doc)
    }

    pub fn add_subcategory(
        &mut self,
        category: &str,
        name: &str,
        price: &str,
    ) -> Result<(), SalesError> {
        self.doc.add_subcategory(category, name, price)?;
        self.store.save(&self.doc)
    }

    /// Records a sale for the current user.
    pub fn add_sale(&mut self, sale: NewSale) -> Result<u64, SalesError> {
        let id = self.doc.add_sale(self.current_user.as_deref(), sale)?;
        self.store.save(&self.doc)?;
        Ok(id)
    }

    pub fn delete_sale(&mut self, id: u64) -> Result<Sale, SalesError> {
        let sale = self.doc.delete_sale(id)?;
        self.store.save(&self.doc)?;
        Ok(sale)
    }
}
