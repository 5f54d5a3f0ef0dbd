mod bookings;
mod conversations;
mod properties;
mod users;

#[cfg(test)]
mod tests;

pub use bookings::BookingStore;
pub use conversations::ConversationStore;
pub use properties::{PropertyFilter, PropertyStore};
pub use users::UserStore;
