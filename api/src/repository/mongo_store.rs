use futures::stream::TryStreamExt;
use mongodb::bson::Document;
use mongodb::{Client, Collection, Database};

use super::store::{
    CollectionName, DeleteOutcome, DocumentStore, InsertOutcome, StoreResult, UpdateOutcome,
};

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        MongoStore { db }
    }

    fn collection(&self, name: CollectionName) -> Collection<Document> {
        self.db.collection::<Document>(name.as_str())
    }
}

#[rocket::async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: CollectionName, filter: Document) -> StoreResult<Vec<Document>> {
        let mut cursor = self.collection(collection).find(filter, None).await?;
        let mut documents = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            documents.push(document);
        }
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        let document = self.collection(collection).find_one(filter, None).await?;
        Ok(document)
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> StoreResult<InsertOutcome> {
        let result = self.collection(collection).insert_one(document, None).await?;
        Ok(InsertOutcome::new(result.inserted_id))
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection(collection)
            .update_one(filter, update, None)
            .await?;
        Ok(UpdateOutcome {
            upserted_id: result.upserted_id,
            ..UpdateOutcome::new(result.matched_count, result.modified_count)
        })
    }

    async fn update_many(
        &self,
        collection: CollectionName,
        filter: Document,
        update: Document,
    ) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection(collection)
            .update_many(filter, update, None)
            .await?;
        Ok(UpdateOutcome {
            upserted_id: result.upserted_id,
            ..UpdateOutcome::new(result.matched_count, result.modified_count)
        })
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> StoreResult<DeleteOutcome> {
        let result = self.collection(collection).delete_one(filter, None).await?;
        Ok(DeleteOutcome::new(result.deleted_count))
    }
}
