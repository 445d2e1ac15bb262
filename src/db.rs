use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

use crate::model::employee::Employee;

/// Connect once at startup. Failure here is fatal; the process must not
/// come up without its store.
pub async fn init_db(mongo_uri: &str) -> Database {
    let client = Client::with_uri_str(mongo_uri)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client
        .default_database()
        .unwrap_or_else(|| client.database("teamsdb"));

    // email uniqueness is enforced by the store, not the validators
    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();
    db.collection::<Employee>("employees")
        .create_index(email_index)
        .await
        .expect("Failed to create unique email index");

    db
}
