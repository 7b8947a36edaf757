use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::point::{Coordinates, GeoJsonPoint, NewPoint, Point};
use crate::store::PointStore;

/// Database used when neither the configuration nor the URI names one.
pub const DEFAULT_DATABASE: &str = "test";

/// Collection holding point documents.
pub const DEFAULT_COLLECTION: &str = "users";

/// Point as persisted in MongoDB.
///
/// ```text
/// { _id: ObjectId, name: string, location: { type: "Point", coordinates: [lon, lat] } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub location: GeoJsonPoint,
}

impl TryFrom<PointDocument> for Point {
    type Error = StoreError;

    fn try_from(document: PointDocument) -> Result<Self, Self::Error> {
        let id = document.id.ok_or_else(|| StoreError::MalformedRecord {
            message: format!("point '{}' has no _id", document.name),
        })?;

        Ok(Point {
            id: id.to_hex(),
            name: document.name,
            location: document.location,
        })
    }
}

/// `$geoWithin`/`$centerSphere` filter for a spherical cap around `center`.
pub fn spherical_cap_filter(center: Coordinates, angular_radius: f64) -> Document {
    doc! {
        "location": {
            "$geoWithin": {
                "$centerSphere": [[center.longitude(), center.latitude()], angular_radius]
            }
        }
    }
}

/// MongoDB-backed point store.
///
/// Relies on a `2dsphere` index on `location`; call
/// [`MongoPointStore::ensure_indexes`] once at startup.
#[derive(Debug, Clone)]
pub struct MongoPointStore {
    database: Database,
    collection: Collection<PointDocument>,
}

impl MongoPointStore {
    /// Connect using a connection string.
    ///
    /// The database is `database` when given, otherwise the default database
    /// named in the URI, otherwise [`DEFAULT_DATABASE`].
    pub async fn connect(
        uri: &str,
        database: Option<&str>,
        collection: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        info!(
            database = %database.name(),
            collection = %collection,
            "configured MongoDB point store"
        );

        Ok(Self::from_database(database, collection))
    }

    /// Wrap an existing database handle.
    pub fn from_database(database: Database, collection: &str) -> Self {
        let collection = database.collection::<PointDocument>(collection);
        Self {
            database,
            collection,
        }
    }

    /// Create the `2dsphere` index on `location` if it does not exist yet.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "location": "2dsphere" })
            .build();
        let created = self.collection.create_index(index).await?;
        info!(index = %created.index_name, "ensured spherical index on location");
        Ok(())
    }
}

#[async_trait]
impl PointStore for MongoPointStore {
    async fn find_within_spherical_cap(
        &self,
        center: Coordinates,
        angular_radius: f64,
    ) -> Result<Vec<Point>, StoreError> {
        let filter = spherical_cap_filter(center, angular_radius);
        debug!(filter = %filter, "querying points within spherical cap");

        let mut cursor = self.collection.find(filter).await?;
        let mut points = Vec::new();
        while cursor.advance().await? {
            let document = cursor.deserialize_current()?;
            points.push(Point::try_from(document)?);
        }

        Ok(points)
    }

    async fn save(&self, point: NewPoint) -> Result<Point, StoreError> {
        let id = ObjectId::new();
        let document = PointDocument {
            id: Some(id),
            name: point.name().to_string(),
            location: point.location(),
        };

        self.collection.insert_one(&document).await?;
        Ok(point.with_id(id.to_hex()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongo"
    }
}
