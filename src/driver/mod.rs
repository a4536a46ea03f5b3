pub mod binding;
pub mod player;
