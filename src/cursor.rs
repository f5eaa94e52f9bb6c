//! The persisted pointer to the current sound.
//!
//! `Cursor` owns the catalog and an index into it that always stays in
//! bounds. Every move is written to a one-line text file so the next launch
//! starts on the same sound. Persistence is best effort: read and write
//! failures fall back to index 0 or are only logged.

mod store;

pub use store::CursorStore;

use crate::library::{Catalog, Track};

pub struct Cursor {
    catalog: Catalog,
    index: usize,
    store: CursorStore,
}

impl Cursor {
    /// Restore the remembered index, using 0 when it is missing or out of range.
    pub fn load(catalog: Catalog, store: CursorStore) -> Self {
        let index = store
            .load()
            .filter(|&i| i < catalog.len())
            .unwrap_or(0);
        Self {
            catalog,
            index,
            store,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn current(&self) -> &Track {
        // `index < len` holds after every mutation and catalogs are never empty.
        &self.catalog.tracks()[self.index]
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len();
        self.store.save(self.index);
    }

    pub fn previous(&mut self) {
        let n = self.len();
        self.index = (self.index + n - 1) % n;
        self.store.save(self.index);
    }

    /// Swap in a rebuilt catalog, following the current sound by path.
    ///
    /// When the current file is gone the cursor falls back to index 0.
    /// Returns `true` when the current sound changed as a result.
    pub fn reconcile(&mut self, catalog: Catalog) -> bool {
        let previous = self.current().path.clone();

        self.index = catalog.position(&previous).unwrap_or(0);
        self.catalog = catalog;
        self.store.save(self.index);

        self.current().path != previous
    }
}
