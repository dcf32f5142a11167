//! Free Fire profile API client and profile formatting

pub mod api;
pub mod profile;

pub use api::{FreeFireClient, PlayerProfile, ProfileApi};
pub use profile::format_player_profile;
