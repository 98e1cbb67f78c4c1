use std::sync::Arc;

use model_metadata::ObjectMetadata;
use relate_entrypoint::Environment;
use url::Url;
use uuid::Uuid;

use crate::service::google_client::GoogleAuthClient;
use crate::store::InMemoryFilterStore;

#[derive(Clone)]
pub(crate) struct ApiContext {
    /// the object metadata set driving schema generation and filters
    pub objects: Arc<Vec<ObjectMetadata>>,
    pub store: Arc<InMemoryFilterStore>,
    pub google_client: Arc<GoogleAuthClient>,
    /// where the frontend lives; the post-login redirect target
    pub base_url: Url,
    pub environment: Environment,
}

impl ApiContext {
    pub fn object_by_id(&self, id: Uuid) -> Option<&ObjectMetadata> {
        self.objects.iter().find(|o| o.id == id)
    }
}
