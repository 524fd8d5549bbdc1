//! UUID-backed id generation

use gatherly_application::IdGenerator;
use uuid::Uuid;

/// Production id generator producing random v4 UUIDs
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
