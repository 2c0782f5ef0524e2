mod core;
mod pagination;

pub use self::core::GitLabClient;
