pub mod group_counts;
pub mod participants;

pub use group_counts::Entity as GroupCounts;
pub use group_counts::Model as GroupCount;
pub use participants::Entity as Participants;
pub use participants::Model as Participant;
