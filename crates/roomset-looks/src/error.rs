use roomset_client::ClientError;
use thiserror::Error;

/// A failed step while resolving one look.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to fetch images for look {look_id}: {source}")]
    Images {
        look_id: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to fetch spots for look {look_id} image {image_id}: {source}")]
    Spots {
        look_id: String,
        image_id: String,
        #[source]
        source: ClientError,
    },

    #[error("failed to fetch products for look {look_id}: {source}")]
    Products {
        look_id: String,
        #[source]
        source: ClientError,
    },
}
