mod board_repo;
mod card_repo;
mod column_repo;
mod user_repo;

pub use board_repo::BoardRepo;
pub use card_repo::CardRepo;
pub use column_repo::ColumnRepo;
pub use user_repo::UserRepo;
