//! Shared collaborators handed to every flow.

use crate::input::SelectionRouter;
use cuelock_crypto::CredentialCodec;
use cuelock_store::CredentialStore;
use cuelock_types::{Narrator, Vocabulary};
use std::sync::Arc;

/// Everything a flow needs besides its own state: the credential store,
/// the codec and vocabulary, the narrator announcements go out through,
/// and the router selection events come in through. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    pub store: Arc<dyn CredentialStore>,
    pub codec: CredentialCodec,
    pub vocabulary: Vocabulary,
    pub narrator: Arc<dyn Narrator>,
    pub router: SelectionRouter,
}

impl SessionContext {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        codec: CredentialCodec,
        vocabulary: Vocabulary,
        narrator: Arc<dyn Narrator>,
    ) -> Self {
        Self {
            store,
            codec,
            vocabulary,
            narrator,
            router: SelectionRouter::new(),
        }
    }
}
