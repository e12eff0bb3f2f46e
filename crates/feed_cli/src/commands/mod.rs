pub mod fetch;
pub mod generate;
pub mod keygen;
pub mod verify;
