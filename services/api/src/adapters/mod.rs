pub mod db;
pub mod memory;
pub mod password;
pub mod session;

pub use db::DbAdapter;
pub use memory::MemoryAdapter;
pub use password::Argon2PasswordAdapter;
pub use session::JwtSessionAdapter;
