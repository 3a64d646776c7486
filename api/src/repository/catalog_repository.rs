use mongodb::bson::Document;

use crate::repository::store::{CollectionName, StoreHandle, StoreResult};

/// Read-only listings curated outside this service.
pub struct CatalogRepository {
    store: StoreHandle,
}

impl CatalogRepository {
    pub fn new(store: &StoreHandle) -> Self {
        CatalogRepository {
            store: store.clone(),
        }
    }

    pub async fn get_all_categories(&self) -> StoreResult<Vec<Document>> {
        self.store.find(CollectionName::Categories, Document::new()).await
    }

    pub async fn get_new_arrivals(&self) -> StoreResult<Vec<Document>> {
        self.store
            .find(CollectionName::NewArrivalProducts, Document::new())
            .await
    }
}
