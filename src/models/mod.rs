mod game;
mod gender;
mod profile;
mod user;

pub use game::{Game, GameWithGender, NewGame, UpdateGame};
pub use gender::{Gender, NewGender};
pub use profile::Profile;
pub use user::{NewUser, UpdateUser, User, UserDetail, UserSummary};
